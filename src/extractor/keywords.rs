// file: src/extractor/keywords.rs
// description: immutable keyword sets compiled from extraction config
// reference: keyword list matching for rule based extraction

use crate::config::ExtractionConfig;
use std::collections::HashSet;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImportKeyword {
    /// Matched against sentence lemmas with negation lookback.
    Lemma(String),
    /// Contains a space; matched as a substring of the sentence text.
    Phrase(String),
}

impl ImportKeyword {
    fn parse(keyword: &str) -> Self {
        if keyword.contains(' ') {
            ImportKeyword::Phrase(keyword.to_string())
        } else {
            ImportKeyword::Lemma(keyword.to_string())
        }
    }
}

#[derive(Debug, Clone)]
pub struct KeywordSets {
    pub import_keywords: Vec<ImportKeyword>,
    pub negations: HashSet<String>,
    pub electronics: HashSet<String>,
    pub countries: HashSet<String>,
    pub activity_indicators: HashSet<String>,
    pub financial: HashSet<String>,
    pub recent_phrases: Vec<String>,
}

impl KeywordSets {
    pub fn from_config(config: &ExtractionConfig) -> Self {
        Self {
            import_keywords: normalize(&config.import_keywords)
                .map(|k| ImportKeyword::parse(&k))
                .collect(),
            negations: normalize(&config.negation_lemmas).collect(),
            electronics: normalize(&config.electronics_keywords).collect(),
            countries: normalize(&config.country_keywords).collect(),
            activity_indicators: normalize(&config.activity_indicator_lemmas).collect(),
            financial: normalize(&config.financial_lemmas).collect(),
            recent_phrases: normalize(&config.recent_activity_phrases).collect(),
        }
    }
}

fn normalize(items: &[String]) -> impl Iterator<Item = String> + '_ {
    items
        .iter()
        .map(|s| s.trim().to_lowercase())
        .filter(|s| !s.is_empty())
}
