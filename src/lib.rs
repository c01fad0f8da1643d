#![doc(test(attr(deny(warnings))))]

//! Finance Hub core: recurring expansion, chart aggregation, dashboard
//! metrics and budget comparison, plus the REST client and services that
//! feed them.

pub mod api;
pub mod config;
pub mod core;
pub mod domain;
pub mod errors;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Finance Hub tracing initialized.");
    });
}
