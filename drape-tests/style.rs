//! Style Enforcement Tests
//!
//! Scans the workspace sources for patterns clippy does not reject on
//! its own. Code under `#[cfg(test)]` is exempt.
//!
//! - `production_code` - no panicking unwraps and no dead-code allowances

#[path = "style/production_code.rs"]
mod production_code;
