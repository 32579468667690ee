// file: src/storage/validation_store.rs
// description: csv backed store of human review records, one row per company
// reference: https://docs.rs/csv

use crate::error::Result;
use crate::models::{OutreachDraft, RecordId, ValidationRecord};
use crate::utils::Validator;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

#[derive(Debug, Clone)]
pub struct ValidationStore {
    path: PathBuf,
}

impl ValidationStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// A missing file is an empty store.
    pub fn load(&self) -> Result<Vec<ValidationRecord>> {
        if !self.path.exists() {
            debug!("No validations at {}, starting empty", self.path.display());
            return Ok(Vec::new());
        }

        let mut reader = csv::Reader::from_path(&self.path)?;
        let records = reader
            .deserialize()
            .collect::<std::result::Result<Vec<ValidationRecord>, csv::Error>>()?;
        Ok(records)
    }

    pub fn get(&self, company_id: &RecordId) -> Result<Option<ValidationRecord>> {
        Ok(self
            .load()?
            .into_iter()
            .find(|r| &r.company_id == company_id))
    }

    /// Replaces the row for an already reviewed company in place, appends
    /// otherwise. Returns true when a row was replaced.
    pub fn upsert(&self, record: ValidationRecord) -> Result<bool> {
        let mut records = self.load()?;

        let replaced = match records
            .iter_mut()
            .find(|r| r.company_id == record.company_id)
        {
            Some(existing) => {
                *existing = record;
                true
            }
            None => {
                records.push(record);
                false
            }
        };

        self.write_all(&records)?;
        info!(
            "Saved validation ({} rows) to {}",
            records.len(),
            self.path.display()
        );
        Ok(replaced)
    }

    pub fn confirmed_importers(&self) -> Result<HashSet<RecordId>> {
        Ok(self
            .load()?
            .into_iter()
            .filter(ValidationRecord::confirms_importer)
            .map(|r| r.company_id)
            .collect())
    }

    fn write_all(&self, records: &[ValidationRecord]) -> Result<()> {
        write_rows(&self.path, records)
    }
}

pub fn write_drafts(path: &Path, drafts: &[OutreachDraft]) -> Result<()> {
    write_rows(path, drafts)?;
    info!("Saved {} drafts to {}", drafts.len(), path.display());
    Ok(())
}

fn write_rows<T: serde::Serialize>(path: &Path, rows: &[T]) -> Result<()> {
    Validator::ensure_parent_dir(path)?;
    let mut writer = csv::Writer::from_path(path)?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Confidence, ImporterVerdict};
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn review(id: &str, verdict: ImporterVerdict, comment: &str) -> ValidationRecord {
        ValidationRecord::new(
            RecordId::from(id),
            "Validator".to_string(),
            verdict,
            Confidence::High,
            comment.to_string(),
        )
    }

    #[test]
    fn test_missing_file_loads_empty() {
        let temp = TempDir::new().unwrap();
        let store = ValidationStore::new(temp.path().join("validated.csv"));
        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn test_upsert_appends_then_replaces_in_place() {
        let temp = TempDir::new().unwrap();
        let store = ValidationStore::new(temp.path().join("processed/validated.csv"));

        assert!(!store.upsert(review("1", ImporterVerdict::Yes, "")).unwrap());
        assert!(!store.upsert(review("2", ImporterVerdict::No, "")).unwrap());
        assert!(store
            .upsert(review("1", ImporterVerdict::Unknown, "сайт недоступен, проверить"))
            .unwrap());

        let records = store.load().unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].company_id.as_str(), "1");
        assert_eq!(records[0].is_active_importer, ImporterVerdict::Unknown);
        assert_eq!(records[0].comment, "сайт недоступен, проверить");
        assert_eq!(records[1].company_id.as_str(), "2");
    }

    #[test]
    fn test_round_trip_keeps_all_fields() {
        let temp = TempDir::new().unwrap();
        let store = ValidationStore::new(temp.path().join("validated.csv"));
        let record = review("7707083893", ImporterVerdict::Yes, "подтверждено\nпо сайту");

        store.upsert(record.clone()).unwrap();

        assert_eq!(store.get(&record.company_id).unwrap(), Some(record));
    }

    #[test]
    fn test_confirmed_importers_only_yes() {
        let temp = TempDir::new().unwrap();
        let store = ValidationStore::new(temp.path().join("validated.csv"));
        store.upsert(review("1", ImporterVerdict::Yes, "")).unwrap();
        store.upsert(review("2", ImporterVerdict::No, "")).unwrap();
        store.upsert(review("3", ImporterVerdict::Unknown, "")).unwrap();

        let confirmed = store.confirmed_importers().unwrap();
        assert_eq!(confirmed.len(), 1);
        assert!(confirmed.contains(&RecordId::from("1")));
    }
}
