// file: src/storage/source.rs
// description: readers for raw company rows from csv files or sqlite tables
// reference: https://docs.rs/csv and https://docs.rs/rusqlite

use crate::config::{InputConfig, SourceFormat};
use crate::error::{EnrichmentError, Result};
use crate::models::RecordId;
use crate::utils::Validator;
use rusqlite::types::Value;
use rusqlite::{Connection, OpenFlags};
use std::path::Path;
use tracing::{debug, info};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceRow {
    pub id: RecordId,
    pub text: Option<String>,
    pub name: Option<String>,
}

/// Outer error means the source itself is unusable; inner errors are
/// individual malformed rows the caller is expected to skip.
pub type SourceRows = Vec<Result<SourceRow>>;

pub fn read_source(config: &InputConfig) -> Result<SourceRows> {
    Validator::validate_file_path(&config.path)?;

    let rows = match config.format {
        SourceFormat::Csv => read_csv(&config.path, config)?,
        SourceFormat::Sqlite => read_sqlite(&config.path, config)?,
    };

    info!("Read {} rows from {}", rows.len(), config.path.display());
    Ok(rows)
}

fn read_csv(path: &Path, config: &InputConfig) -> Result<SourceRows> {
    let mut reader = csv::ReaderBuilder::new().flexible(true).from_path(path)?;
    let headers = reader.headers()?.clone();

    let column = |name: &str| headers.iter().position(|h| h.trim() == name);
    let id_idx = column(&config.id_column).ok_or_else(|| missing_column(&config.id_column, path))?;
    let text_idx =
        column(&config.text_column).ok_or_else(|| missing_column(&config.text_column, path))?;
    let name_idx = match &config.name_column {
        Some(name) => Some(column(name).ok_or_else(|| missing_column(name, path))?),
        None => None,
    };

    let rows = reader
        .records()
        .enumerate()
        .map(|(idx, record)| -> Result<SourceRow> {
            // header is line 1
            let line = idx + 2;
            let record = record?;
            let id = non_empty(record.get(id_idx)).ok_or_else(|| {
                EnrichmentError::Validation(format!("line {}: missing {}", line, config.id_column))
            })?;

            Ok(SourceRow {
                id: RecordId::new(id),
                text: non_empty(record.get(text_idx)),
                name: name_idx.and_then(|i| non_empty(record.get(i))),
            })
        })
        .collect();

    Ok(rows)
}

fn read_sqlite(path: &Path, config: &InputConfig) -> Result<SourceRows> {
    Validator::validate_sql_identifier(&config.table)?;
    Validator::validate_sql_identifier(&config.id_column)?;
    Validator::validate_sql_identifier(&config.text_column)?;

    let mut columns = vec![config.id_column.as_str(), config.text_column.as_str()];
    if let Some(name) = &config.name_column {
        Validator::validate_sql_identifier(name)?;
        columns.push(name.as_str());
    }

    let conn = Connection::open_with_flags(path, OpenFlags::SQLITE_OPEN_READ_ONLY)?;
    let sql = format!("SELECT {} FROM {}", columns.join(", "), config.table);
    debug!("Source query: {}", sql);

    let mut stmt = conn.prepare(&sql)?;
    let has_name = config.name_column.is_some();

    let rows = stmt
        .query_map([], |row| {
            let id: Value = row.get(0)?;
            let text: Value = row.get(1)?;
            let name: Value = if has_name { row.get(2)? } else { Value::Null };
            Ok((id, text, name))
        })?
        .enumerate()
        .map(|(idx, row)| -> Result<SourceRow> {
            let (id, text, name) = row?;
            let id = value_to_string(id).ok_or_else(|| {
                EnrichmentError::Validation(format!(
                    "row {}: missing {}",
                    idx + 1,
                    config.id_column
                ))
            })?;

            Ok(SourceRow {
                id: RecordId::new(id),
                text: value_to_string(text),
                name: value_to_string(name),
            })
        })
        .collect();

    Ok(rows)
}

fn value_to_string(value: Value) -> Option<String> {
    match value {
        Value::Integer(i) => Some(i.to_string()),
        Value::Real(f) => Some(f.to_string()),
        Value::Text(s) if !s.trim().is_empty() => Some(s),
        Value::Text(_) | Value::Null | Value::Blob(_) => None,
    }
}

/// Blank fields are absent; others pass through untrimmed.
fn non_empty(field: Option<&str>) -> Option<String> {
    field
        .filter(|s| !s.trim().is_empty())
        .map(str::to_string)
}

fn missing_column(column: &str, path: &Path) -> EnrichmentError {
    EnrichmentError::Validation(format!(
        "column {:?} not found in {}",
        column,
        path.display()
    ))
}
