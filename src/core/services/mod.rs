pub mod aggregation;
pub mod entry_service;

pub use aggregation::{AggregationEngine, DailyTotal, SalesSummary};
pub use entry_service::EntryService;
