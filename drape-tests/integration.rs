//! Integration tests for Drape
//!
//! Drive the search client against real HTTP servers bound on loopback:
//! the catalog-backed search API and small stub routers that misbehave
//! on purpose.

#[path = "integration/support.rs"]
mod support;

#[path = "integration/search_client.rs"]
mod search_client;

#[path = "integration/client_failures.rs"]
mod client_failures;

#[path = "integration/catalog_loading.rs"]
mod catalog_loading;
