// file: src/storage/feature_store.rs
// description: sqlite table of extracted feature records keyed by company id
// reference: https://docs.rs/rusqlite

use crate::error::Result;
use crate::models::{FeatureRecord, RecordId};
use crate::storage::list_codec::{join_list, parse_list};
use crate::utils::Validator;
use chrono::Utc;
use rusqlite::{Connection, OptionalExtension, Row, params};
use sha2::{Digest, Sha256};
use std::path::Path;
use tracing::{debug, info};

const SELECT_COLUMNS: &str = "company_id, is_importer, product_mentions, mentioned_countries, \
     activity_indicators, processed, has_financial_indicators, recent_activity";

const UPSERT_SQL: &str = "INSERT OR REPLACE INTO companies (
        company_id, is_importer, product_mentions, mentioned_countries,
        activity_indicators, processed, has_financial_indicators, recent_activity,
        text_hash, updated_at
    ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)";

/// A record together with the fingerprint of the text it was extracted from.
pub type StoredEntry = (FeatureRecord, Option<String>);

pub struct FeatureStore {
    conn: Connection,
}

impl FeatureStore {
    pub fn open(path: &Path) -> Result<Self> {
        Validator::ensure_parent_dir(path)?;
        let conn = Connection::open(path)?;
        let store = Self { conn };
        store.initialize_schema()?;
        debug!("Opened feature store at {}", path.display());
        Ok(store)
    }

    pub fn in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let store = Self { conn };
        store.initialize_schema()?;
        Ok(store)
    }

    fn initialize_schema(&self) -> Result<()> {
        self.conn.execute_batch(include_str!("schema.sql"))?;
        Ok(())
    }

    pub fn save(&self, record: &FeatureRecord, text_hash: Option<&str>) -> Result<()> {
        self.conn.execute(UPSERT_SQL, upsert_params(record, text_hash))?;
        Ok(())
    }

    /// Upserts every entry in one transaction.
    pub fn save_all(&mut self, entries: &[StoredEntry]) -> Result<usize> {
        let tx = self.conn.transaction()?;
        {
            let mut stmt = tx.prepare(UPSERT_SQL)?;
            for (record, text_hash) in entries {
                stmt.execute(upsert_params(record, text_hash.as_deref()))?;
            }
        }
        tx.commit()?;

        info!("Stored {} feature records", entries.len());
        Ok(entries.len())
    }

    pub fn get(&self, company_id: &RecordId) -> Result<Option<FeatureRecord>> {
        let sql = format!("SELECT {} FROM companies WHERE company_id = ?1", SELECT_COLUMNS);
        let record = self
            .conn
            .query_row(&sql, params![company_id.as_str()], row_to_record)
            .optional()?;
        Ok(record)
    }

    pub fn load_all(&self) -> Result<Vec<FeatureRecord>> {
        let sql = format!("SELECT {} FROM companies ORDER BY company_id", SELECT_COLUMNS);
        let mut stmt = self.conn.prepare(&sql)?;
        let records = stmt
            .query_map([], row_to_record)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(records)
    }

    pub fn text_hash(&self, company_id: &RecordId) -> Result<Option<String>> {
        let hash: Option<Option<String>> = self
            .conn
            .query_row(
                "SELECT text_hash FROM companies WHERE company_id = ?1",
                params![company_id.as_str()],
                |row| row.get(0),
            )
            .optional()?;
        Ok(hash.flatten())
    }

    pub fn count(&self) -> Result<usize> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM companies", [], |row| row.get(0))?;
        Ok(count as usize)
    }
}

/// Hash of the extraction settings fingerprint and the text, so either
/// changing invalidates the stored record.
pub fn text_fingerprint(settings: &str, text: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(settings.as_bytes());
    hasher.update([0u8]);
    hasher.update(text.as_bytes());
    format!("{:x}", hasher.finalize())
}

fn upsert_params<'a>(
    record: &'a FeatureRecord,
    text_hash: Option<&'a str>,
) -> impl rusqlite::Params + 'a {
    (
        record.company_id.as_str(),
        record.is_importer,
        join_list(&record.product_mentions),
        join_list(&record.mentioned_countries),
        record.activity_indicators,
        record.processed,
        record.has_financial_indicators,
        record.recent_activity,
        text_hash,
        Utc::now().to_rfc3339(),
    )
}

fn row_to_record(row: &Row<'_>) -> rusqlite::Result<FeatureRecord> {
    let products: String = row.get(2)?;
    let countries: String = row.get(3)?;

    Ok(FeatureRecord {
        company_id: RecordId::new(row.get::<_, String>(0)?),
        is_importer: row.get(1)?,
        product_mentions: parse_list(&products),
        mentioned_countries: parse_list(&countries),
        activity_indicators: row.get(4)?,
        processed: row.get(5)?,
        has_financial_indicators: row.get(6)?,
        recent_activity: row.get(7)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn sample(id: &str) -> FeatureRecord {
        let mut record = FeatureRecord::unprocessed(RecordId::from(id));
        record.processed = true;
        record.is_importer = true;
        record.product_mentions.insert("чип".to_string());
        record.product_mentions.insert("плата".to_string());
        record.mentioned_countries.insert("китай".to_string());
        record.activity_indicators = 4;
        record.recent_activity = true;
        record
    }

    #[test]
    fn test_save_and_get_round_trip() {
        let store = FeatureStore::in_memory().unwrap();
        let record = sample("7707083893");

        store.save(&record, Some("abc")).unwrap();

        assert_eq!(store.get(&record.company_id).unwrap(), Some(record.clone()));
        assert_eq!(store.text_hash(&record.company_id).unwrap(), Some("abc".to_string()));
        assert_eq!(store.count().unwrap(), 1);
    }

    #[test]
    fn test_missing_id_returns_none() {
        let store = FeatureStore::in_memory().unwrap();
        let id = RecordId::from("missing");
        assert_eq!(store.get(&id).unwrap(), None);
        assert_eq!(store.text_hash(&id).unwrap(), None);
    }

    #[test]
    fn test_save_replaces_existing_id() {
        let store = FeatureStore::in_memory().unwrap();
        let record = sample("1");
        store.save(&record, None).unwrap();

        let replacement = FeatureRecord::unprocessed(RecordId::from("1"));
        store.save(&replacement, None).unwrap();

        assert_eq!(store.count().unwrap(), 1);
        assert_eq!(store.get(&record.company_id).unwrap(), Some(replacement));
    }

    #[test]
    fn test_save_all_and_reopen() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("processed/enriched.db");

        {
            let mut store = FeatureStore::open(&path).unwrap();
            let entries = vec![(sample("2"), None), (sample("1"), Some("h1".to_string()))];
            assert_eq!(store.save_all(&entries).unwrap(), 2);
        }

        let store = FeatureStore::open(&path).unwrap();
        let records = store.load_all().unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].company_id.as_str(), "1");
        assert_eq!(records[1], sample("2"));
    }

    #[test]
    fn test_text_fingerprint_is_stable() {
        assert_eq!(text_fingerprint("s1", "импорт"), text_fingerprint("s1", "импорт"));
        assert_ne!(text_fingerprint("s1", "импорт"), text_fingerprint("s1", "экспорт"));
        assert_ne!(text_fingerprint("s1", "импорт"), text_fingerprint("s2", "импорт"));
        assert_eq!(text_fingerprint("", "").len(), 64);
    }
}
