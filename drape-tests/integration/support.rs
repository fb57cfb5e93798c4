//! Shared fixtures: sample catalog and loopback servers.

use std::net::SocketAddr;

use axum::Router;
use drape_core::DrapeConfig;
use drape_search::{Catalog, CatalogItem, SearchService, SearchSession};
use drape_web::{AppState, build_router};
use tokio::net::TcpListener;

/// Eight blue jeans plus unrelated products.
pub fn sample_catalog() -> Catalog {
    let mut items: Vec<CatalogItem> = (0..8)
        .map(|i| CatalogItem {
            name: format!("Roadster Men Jeans {}", ["A", "B", "C", "D", "E", "F", "G", "H"][i]),
            brand: "Roadster".to_string(),
            colour: "Blue".to_string(),
            description: "Blue mid-rise slim fit denim jeans".to_string(),
            price: 999.0 + 100.0 * i as f64,
            img: format!("https://img.test/jeans-{i}.jpg"),
            ..Default::default()
        })
        .collect();

    items.push(CatalogItem {
        name: "Floral Maxi Dress".to_string(),
        brand: "Athena".to_string(),
        colour: "Black".to_string(),
        description: "Black floral printed maxi dress".to_string(),
        price: 1899.0,
        ..Default::default()
    });
    items.push(CatalogItem {
        name: "Cotton Kurta".to_string(),
        brand: "Anouk".to_string(),
        colour: "Orange".to_string(),
        description: "Solid straight cotton kurta".to_string(),
        price: 749.0,
        ..Default::default()
    });

    Catalog::from_items(items)
}

/// Serves `router` on an ephemeral loopback port.
pub async fn spawn(router: Router) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    addr
}

/// Serves the full application over `catalog`.
pub async fn spawn_app(catalog: Catalog) -> SocketAddr {
    let config = DrapeConfig::for_testing();
    let service = SearchService::from_catalog(catalog, config.catalog.min_similarity);
    spawn(build_router(AppState::new(service, config))).await
}

/// Session calling `POST /search` on `addr`.
pub fn remote_session(addr: SocketAddr, page_size: u32) -> SearchSession {
    let mut config = DrapeConfig::for_testing();
    config.client.endpoint = format!("http://{addr}/search");
    config.client.page_size = page_size;

    let service = SearchService::remote(&config.client).unwrap();
    SearchSession::new(service, page_size)
}
