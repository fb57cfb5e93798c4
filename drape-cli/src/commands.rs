//! CLI command implementations

use std::path::PathBuf;

use anyhow::{Context, bail};
use clap::Subcommand;
use drape_core::{DrapeConfig, MAX_PAGE_SIZE, Product, format_price};
use drape_search::{Catalog, CatalogStats, Completion, SearchService, SearchSession};

/// Longest description printed per result, in characters.
const DESCRIPTION_PREVIEW_CHARS: usize = 160;

/// Brands listed by `catalog-stats`.
const TOP_BRAND_COUNT: usize = 10;

/// Available CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Start the search server
    Serve {
        /// Host to bind to
        #[arg(long)]
        host: Option<String>,
        /// Port to bind to
        #[arg(short, long)]
        port: Option<u16>,
        /// Catalog JSON file to index
        #[arg(long)]
        catalog: Option<PathBuf>,
    },
    /// Search a running server and print the results
    Search {
        /// Free-text query
        query: String,
        /// Search endpoint URL
        #[arg(long)]
        endpoint: Option<String>,
        /// Maximum number of pages to fetch
        #[arg(long, default_value = "1")]
        pages: u32,
        /// Products per page
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..=i64::from(MAX_PAGE_SIZE)))]
        page_size: Option<u32>,
    },
    /// Print summary statistics for a catalog file
    CatalogStats {
        /// Catalog JSON file
        #[arg(long)]
        catalog: Option<PathBuf>,
    },
}

/// Handle the CLI command
///
/// # Errors
/// Returns the error of the command that failed
pub async fn handle_command(command: Commands) -> anyhow::Result<()> {
    let mut config = DrapeConfig::from_env();

    match command {
        Commands::Serve {
            host,
            port,
            catalog,
        } => {
            if let Some(host) = host {
                config.server.host = host;
            }
            if let Some(port) = port {
                config.server.port = port;
            }
            if let Some(catalog) = catalog {
                config.catalog.path = catalog;
            }
            serve(config).await
        }
        Commands::Search {
            query,
            endpoint,
            pages,
            page_size,
        } => {
            if let Some(endpoint) = endpoint {
                config.client.endpoint = endpoint;
            }
            if let Some(page_size) = page_size {
                config.client.page_size = page_size;
            }
            search(config, &query, pages).await
        }
        Commands::CatalogStats { catalog } => {
            if let Some(catalog) = catalog {
                config.catalog.path = catalog;
            }
            catalog_stats(config)
        }
    }
}

/// Run the search server until interrupted
///
/// # Errors
/// - `WebError::Catalog` - Catalog could not be loaded
/// - `WebError::Bind` - Address unavailable
pub async fn serve(config: DrapeConfig) -> anyhow::Result<()> {
    drape_web::run_server(config)
        .await
        .context("Search server stopped")
}

/// Query the configured endpoint, fetching up to `pages` pages
///
/// # Errors
/// - Blank query, invalid endpoint, or a failed page fetch
pub async fn search(config: DrapeConfig, query: &str, pages: u32) -> anyhow::Result<()> {
    if let Err(e) = config.client.endpoint_url() {
        bail!(e.user_message());
    }

    let service = SearchService::remote(&config.client)?;
    let mut session = SearchSession::new(service, config.client.page_size);

    let Some(mut completion) = session.submit(query).await else {
        bail!("Query must not be empty");
    };

    let mut printed = 0;
    let mut fetched = 1;
    loop {
        if completion == Completion::Failed {
            let message = session.controller().error().unwrap_or_default().to_string();
            bail!(message);
        }

        let results = session.controller().results();
        for (index, product) in results.iter().enumerate().skip(printed) {
            println!("{}", format_result(index + 1, product));
        }
        printed = results.len();

        if fetched >= pages {
            break;
        }
        match session.load_more().await {
            Some(next) => {
                completion = next;
                fetched += 1;
            }
            None => break,
        }
    }

    let controller = session.controller();
    if controller.shows_no_results() {
        println!("No results found. Try a different search term.");
    } else if controller.can_load_more() {
        println!(
            "More results available (fetched {} page(s), use --pages to fetch more)",
            controller.current_page()
        );
    }

    Ok(())
}

/// Print catalog statistics
///
/// # Errors
/// - `CatalogError` - File missing or malformed
pub fn catalog_stats(config: DrapeConfig) -> anyhow::Result<()> {
    let catalog = Catalog::load(&config.catalog.path)?;
    print!("{}", format_stats(&catalog.stats(TOP_BRAND_COUNT)));
    Ok(())
}

fn format_result(position: usize, product: &Product) -> String {
    let mut description: String = product
        .description
        .chars()
        .take(DESCRIPTION_PREVIEW_CHARS)
        .collect();
    if product.description.chars().count() > DESCRIPTION_PREVIEW_CHARS {
        description.push_str("...");
    }

    format!(
        "{position}. {}\n   {}  |  {}% match\n   Brand: {}\n   {description}\n",
        product.name,
        format_price(product.price),
        product.match_percentage(),
        product.brand,
    )
}

fn format_stats(stats: &CatalogStats) -> String {
    let mut out = format!(
        "Products: {}\nUnique brands: {}\n",
        stats.total_products, stats.unique_brands
    );

    if let Some(price) = stats.price {
        out.push_str(&format!(
            "Price: min {}, max {}, mean {}, median {}\n",
            format_price(price.min),
            format_price(price.max),
            format_price(price.mean),
            format_price(price.median)
        ));
    }

    if !stats.top_brands.is_empty() {
        out.push_str("Top brands:\n");
        for (brand, count) in &stats.top_brands {
            out.push_str(&format!("  {brand}: {count}\n"));
        }
    }

    out
}
