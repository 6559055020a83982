//! Save and edit flow tying the keypad session to the record log.

use tracing::{info, warn};

use crate::core::record_store::RecordStore;
use crate::errors::Result;
use crate::record::RecordId;
use crate::session::{EditTarget, InputSession};
use crate::time::Clock;

pub struct EntryService;

impl EntryService {
    /// Commits the form into the log and writes the log back. If the store
    /// rejects the commit the form is restored so the typed values survive.
    pub fn save(
        store: &mut RecordStore,
        session: &mut InputSession,
        clock: &dyn Clock,
    ) -> Result<RecordId> {
        let snapshot = session.clone();
        let commit = session.commit(clock)?;
        let created = commit.target == EditTarget::New;
        let id = match store.upsert(commit.record, commit.target) {
            Ok(id) => id,
            Err(err) => {
                warn!(error = %err, "save rejected, restoring form");
                *session = snapshot;
                return Err(err);
            }
        };
        store.persist()?;
        info!(record = %id, created, records = store.len(), "record saved");
        Ok(id)
    }

    /// Loads the record shown at display row `row` into the form.
    pub fn begin_edit(
        store: &RecordStore,
        session: &mut InputSession,
        row: usize,
    ) -> Result<RecordId> {
        let record = store.get(row)?;
        session.begin_edit(record);
        Ok(record.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::LaundryError;
    use crate::record::{FieldValues, Record, RecordField};
    use crate::storage::MemoryStorage;
    use crate::time::FixedClock;
    use chrono::{NaiveDate, NaiveTime};
    use uuid::Uuid;

    fn clock() -> FixedClock {
        FixedClock::at(
            NaiveDate::from_ymd_opt(2025, 4, 5).unwrap(),
            NaiveTime::from_hms_opt(10, 35, 0).unwrap(),
        )
    }

    fn store() -> RecordStore {
        RecordStore::new(Box::new(MemoryStorage::new()), "laundry_data")
    }

    #[test]
    fn empty_save_leaves_the_log_alone() {
        let mut store = store();
        let mut session = InputSession::new();
        let err = EntryService::save(&mut store, &mut session, &clock()).unwrap_err();
        assert!(matches!(err, LaundryError::Validation(_)));
        assert!(store.is_empty());
        assert!(store.storage().read("laundry_data").unwrap().is_none());
    }

    #[test]
    fn failed_edit_restores_the_form() {
        let mut store = store();
        let mut session = InputSession::new();
        let ghost = Record::new(
            NaiveDate::from_ymd_opt(2025, 4, 1).unwrap(),
            None,
            FieldValues::default().with(RecordField::Coin, "9"),
        );
        session.begin_edit(&Record {
            id: Uuid::new_v4(),
            ..ghost
        });
        let before = session.clone();
        let err = EntryService::save(&mut store, &mut session, &clock()).unwrap_err();
        assert!(matches!(err, LaundryError::RecordNotFound(_)));
        assert_eq!(session, before);
    }

    #[test]
    fn begin_edit_rejects_missing_rows() {
        let store = store();
        let mut session = InputSession::new();
        let err = EntryService::begin_edit(&store, &mut session, 0).unwrap_err();
        assert!(matches!(err, LaundryError::IndexOutOfRange { index: 0, len: 0 }));
        assert!(!session.is_editing());
    }
}
