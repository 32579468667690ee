// file: src/nlp/lexicon.rs
// description: dictionary lemmatizer mapping surface word forms to lemmas
// reference: tab separated form/lemma dictionaries

use crate::error::{EnrichmentError, Result};
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use tracing::debug;

const BUILTIN_LEXICON: &str = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/data/lexicon_ru.tsv"));

#[derive(Debug, Clone, Default)]
pub struct Lexicon {
    forms: HashMap<String, String>,
}

impl Lexicon {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn builtin() -> Result<Self> {
        Self::parse(BUILTIN_LEXICON, "builtin")
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            EnrichmentError::Lexicon(format!("cannot read {}: {}", path.display(), e))
        })?;
        let lexicon = Self::parse(&content, &path.display().to_string())?;
        debug!("Loaded {} lexicon entries from {}", lexicon.len(), path.display());
        Ok(lexicon)
    }

    pub fn parse(content: &str, source: &str) -> Result<Self> {
        let mut forms = HashMap::new();

        for (idx, line) in content.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let mut parts = line.split('\t').map(str::trim);
            match (parts.next(), parts.next(), parts.next()) {
                (Some(form), Some(lemma), None) if !form.is_empty() && !lemma.is_empty() => {
                    forms.insert(form.to_lowercase(), lemma.to_lowercase());
                }
                _ => {
                    return Err(EnrichmentError::Lexicon(format!(
                        "{}:{}: expected `form<TAB>lemma`, got {:?}",
                        source,
                        idx + 1,
                        line
                    )));
                }
            }
        }

        Ok(Self { forms })
    }

    /// Later entries win over existing ones.
    pub fn extend(&mut self, other: Lexicon) {
        self.forms.extend(other.forms);
    }

    /// Unknown forms are their own lemma.
    pub fn lemma<'a>(&'a self, form: &'a str) -> &'a str {
        self.forms.get(form).map(String::as_str).unwrap_or(form)
    }

    pub fn len(&self) -> usize {
        self.forms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.forms.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_builtin_lexicon_loads() {
        let lexicon = Lexicon::builtin().unwrap();
        assert!(!lexicon.is_empty());
        assert_eq!(lexicon.lemma("импортом"), "импорт");
        assert_eq!(lexicon.lemma("китая"), "китай");
        assert_eq!(lexicon.lemma("импортируем"), "импортировать");
    }

    #[test]
    fn test_unknown_form_is_identity() {
        let lexicon = Lexicon::new();
        assert_eq!(lexicon.lemma("оборот"), "оборот");
    }

    #[test]
    fn test_parse_skips_comments_and_blank_lines() {
        let lexicon = Lexicon::parse("# header\n\nчипы\tчип\n", "test").unwrap();
        assert_eq!(lexicon.len(), 1);
        assert_eq!(lexicon.lemma("чипы"), "чип");
    }

    #[test]
    fn test_parse_reports_line_number() {
        let err = Lexicon::parse("чипы\tчип\nbroken line\n", "test").unwrap_err();
        let message = err.to_string();
        assert!(message.contains("test:2"), "{}", message);
    }

    #[test]
    fn test_parse_rejects_extra_columns() {
        assert!(Lexicon::parse("a\tb\tc\n", "test").is_err());
    }

    #[test]
    fn test_load_missing_file_is_error() {
        let result = Lexicon::load(Path::new("/nonexistent/lexicon.tsv"));
        assert!(matches!(result, Err(EnrichmentError::Lexicon(_))));
    }

    #[test]
    fn test_extend_overrides_entries() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("extra.tsv");
        fs::write(&path, "импортом\tимпортирование\nмикросхемку\tмикросхема\n").unwrap();

        let mut lexicon = Lexicon::builtin().unwrap();
        lexicon.extend(Lexicon::load(&path).unwrap());

        assert_eq!(lexicon.lemma("импортом"), "импортирование");
        assert_eq!(lexicon.lemma("микросхемку"), "микросхема");
    }
}
