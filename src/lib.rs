#![doc(test(attr(deny(warnings))))]

//! Laundry Core holds the point-of-sale entry logic for a laundry shop: the
//! keypad form, the reverse-chronological record log and its JSON blob
//! storage, and the daily sales aggregation behind the dashboard widgets.

pub mod cli;
pub mod config;
pub mod core;
pub mod errors;
pub mod export;
pub mod record;
pub mod seed;
pub mod session;
pub mod storage;
pub mod time;
pub mod utils;

pub use crate::core::{Period, RecordStore};
pub use errors::{LaundryError, Result};
pub use session::InputSession;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Laundry Core tracing initialized.");
    });
}

#[cfg(test)]
mod tests {
    #[test]
    fn init_does_not_panic() {
        super::init();
    }
}
