pub mod period;
pub mod record_store;
pub mod services;

pub use period::Period;
pub use record_store::{LoadReport, RecordStore};
