//! Transaction records, their value fields, and the persisted row layout.

pub mod amount;
pub mod field;
#[allow(clippy::module_inception)]
pub mod record;
pub mod wire;

pub use amount::{parse_amount, round_cents};
pub use field::RecordField;
pub use record::{newest_first, FieldValues, Record, RecordId};
pub use wire::RecordRow;
