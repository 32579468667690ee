// file: src/utils/validation.rs
// description: input validation and path helpers
// reference: input validation patterns

use crate::error::{EnrichmentError, Result};
use crate::utils::patterns::is_sql_identifier;
use std::fs;
use std::path::Path;

pub struct Validator;

impl Validator {
    pub fn validate_file_path(path: &Path) -> Result<()> {
        let canonical = fs::canonicalize(path).map_err(|e| {
            EnrichmentError::Validation(format!(
                "Cannot canonicalize path {}: {}",
                path.display(),
                e
            ))
        })?;

        if !canonical.is_file() {
            return Err(EnrichmentError::Validation(format!(
                "Path is not a file: {}",
                canonical.display()
            )));
        }

        Ok(())
    }

    pub fn validate_sql_identifier(name: &str) -> Result<()> {
        if !is_sql_identifier(name) {
            return Err(EnrichmentError::Validation(format!(
                "Invalid table or column name: {:?}",
                name
            )));
        }
        Ok(())
    }

    pub fn validate_content_not_empty(content: &str) -> Result<()> {
        if content.trim().is_empty() {
            return Err(EnrichmentError::Validation("Content is empty".to_string()));
        }
        Ok(())
    }

    pub fn ensure_parent_dir(path: &Path) -> Result<()> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(|source| EnrichmentError::FileOperation {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        Ok(())
    }

    /// Truncates on character boundaries so Cyrillic text never splits mid-codepoint.
    pub fn truncate_text(text: &str, max_chars: usize) -> String {
        if text.chars().count() <= max_chars {
            text.to_string()
        } else {
            let head: String = text.chars().take(max_chars).collect();
            format!("{}...", head)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_validate_file_path() {
        let temp = TempDir::new().unwrap();
        let file_path = temp.path().join("companies.csv");
        fs::write(&file_path, "id,website_text\n").unwrap();

        assert!(Validator::validate_file_path(&file_path).is_ok());
        assert!(Validator::validate_file_path(temp.path()).is_err());
        assert!(Validator::validate_file_path(Path::new("/nonexistent")).is_err());
    }

    #[test]
    fn test_validate_sql_identifier() {
        assert!(Validator::validate_sql_identifier("companies").is_ok());
        assert!(Validator::validate_sql_identifier("news text").is_err());
    }

    #[test]
    fn test_validate_content_not_empty() {
        assert!(Validator::validate_content_not_empty("content").is_ok());
        assert!(Validator::validate_content_not_empty("").is_err());
        assert!(Validator::validate_content_not_empty("   ").is_err());
    }

    #[test]
    fn test_ensure_parent_dir() {
        let temp = TempDir::new().unwrap();
        let nested = temp.path().join("data/processed/report.json");
        Validator::ensure_parent_dir(&nested).unwrap();
        assert!(temp.path().join("data/processed").is_dir());

        assert!(Validator::ensure_parent_dir(Path::new("report.json")).is_ok());
    }

    #[test]
    fn test_truncate_text() {
        assert_eq!(Validator::truncate_text("коротко", 10), "коротко");
        assert_eq!(
            Validator::truncate_text("импорт электроники", 6),
            "импорт..."
        );
    }
}
