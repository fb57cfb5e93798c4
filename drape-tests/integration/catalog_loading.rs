//! Serving a catalog file end to end, from disk to ranked results.

use std::io::Write;

use drape_core::DrapeConfig;
use drape_search::{Catalog, CatalogError, SearchService};
use drape_web::{AppState, WebError};
use tempfile::NamedTempFile;
use tokio::net::TcpListener;

use crate::support::remote_session;

const CATALOG_JSON: &str = r#"[
    {
        "name": "Women Black Printed Anarkali Kurta",
        "brand": "Sangria",
        "colour": "Black",
        "description": "Black printed kurta with ethnic motifs",
        "p_attributes": "{'Occasion': 'Festive', 'Top Shape': 'Anarkali', 'Sleeve Length': 'NA'}",
        "price": 1499.0,
        "img": "https://img.test/anarkali.jpg"
    },
    {
        "name": "Men Slim Fit Jeans",
        "brand": "Roadster",
        "colour": "Blue",
        "description": null,
        "p_attributes": {"Fit": "Slim Fit"},
        "price": 1299.0,
        "image_url": "https://img.test/jeans.jpg"
    },
    {
        "name": "Orange Solid Kurta",
        "brand": null,
        "colour": "Orange",
        "description": "Straight kurta",
        "price": null
    }
]"#;

fn catalog_file() -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(CATALOG_JSON.as_bytes()).unwrap();
    file
}

#[tokio::test]
async fn test_attributes_are_searchable() {
    let file = catalog_file();
    let catalog = Catalog::load(file.path()).unwrap();
    assert_eq!(catalog.len(), 3);

    let service = SearchService::from_catalog(catalog, 0.01);
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(drape_web::serve(
        listener,
        AppState::new(service, DrapeConfig::for_testing()),
    ));

    let mut session = remote_session(addr, 5);
    session.submit("festive anarkali").await;

    let results = session.controller().results();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].name, "Women Black Printed Anarkali Kurta");
    assert_eq!(results[0].image_url, "https://img.test/anarkali.jpg");
    assert_eq!(results[0].price, 1499.0);
}

#[tokio::test]
async fn test_null_fields_become_defaults() {
    let file = catalog_file();
    let catalog = Catalog::load(file.path()).unwrap();

    let kurta = &catalog.items()[2];
    assert_eq!(kurta.brand, "");
    assert_eq!(kurta.price, 0.0);
    assert!(kurta.attributes.is_empty());

    let jeans = &catalog.items()[1];
    assert_eq!(jeans.img, "https://img.test/jeans.jpg");
    assert_eq!(jeans.attributes.get("Fit").map(String::as_str), Some("Slim Fit"));
}

#[tokio::test]
async fn test_missing_catalog_stops_server_start() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = DrapeConfig::for_testing();
    config.catalog.path = dir.path().join("missing.json");

    let error = drape_web::run_server(config).await.unwrap_err();
    assert!(matches!(error, WebError::Catalog(CatalogError::Io { .. })));
}

#[tokio::test]
async fn test_malformed_catalog_is_rejected() {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(b"{\"not\": \"an array\"}").unwrap();

    let error = Catalog::load(file.path()).unwrap_err();
    assert!(matches!(error, CatalogError::Parse { .. }));
}
