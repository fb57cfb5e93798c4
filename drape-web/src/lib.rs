//! Drape Web - fashion search page and JSON search API

#![warn(missing_docs)]
#![warn(clippy::missing_errors_doc)]
#![deny(clippy::missing_panics_doc)]
#![warn(clippy::too_many_lines)]
//!
//! Server-rendered HTMX + Tailwind front end over the product search
//! service, plus the `POST /search` endpoint for other clients.

pub mod components;
pub mod errors;
pub mod handlers;
pub mod pages;
pub mod server;

pub use errors::WebError;
pub use server::{AppState, build_router, run_server, serve};
