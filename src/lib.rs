//! Client side of the WhatsApp engagement admin console.
//!
//! [`api`] is the single gateway to the backend, [`view`] turns raw records
//! plus search/filter input into display rows, and [`pages`] holds the state
//! of each console page.

pub mod api;
pub mod app;
pub mod pages;
pub mod sample;
pub mod session;
pub mod storage;
pub mod utils;
pub mod view;

use tracing_subscriber::EnvFilter;

/// Installs the fmt subscriber; `log` records are bridged into it.
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .try_init();
}
