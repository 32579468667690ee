// file: src/extractor/features.rs
// description: company feature extraction over lemmatized text
// reference: keyword matching with negation lookback

use crate::config::ExtractionConfig;
use crate::error::Result;
use crate::extractor::keywords::{ImportKeyword, KeywordSets};
use crate::models::{FeatureRecord, RecordId};
use crate::nlp::{ParsedDocument, SegmentingAnalyzer, TextAnalyzer};
use std::collections::{BTreeSet, HashSet};
use tracing::{debug, warn};

/// How many tokens before an import keyword are checked for a negation.
const NEGATION_WINDOW: usize = 2;

pub struct FeatureExtractor {
    analyzer: Box<dyn TextAnalyzer>,
    keywords: KeywordSets,
    min_text_length: usize,
    settings_fingerprint: String,
}

impl FeatureExtractor {
    /// Builds the default analyzer; fails if its lexicon cannot be loaded.
    pub fn from_config(config: &ExtractionConfig) -> Result<Self> {
        let analyzer = SegmentingAnalyzer::from_config(config)?;
        Ok(Self::with_analyzer(config, Box::new(analyzer)))
    }

    pub fn with_analyzer(config: &ExtractionConfig, analyzer: Box<dyn TextAnalyzer>) -> Self {
        let settings_fingerprint = format!("{}:{}", analyzer.name(), config.fingerprint());
        Self {
            analyzer,
            keywords: KeywordSets::from_config(config),
            min_text_length: config.min_text_length,
            settings_fingerprint,
        }
    }

    pub fn analyzer_name(&self) -> &str {
        self.analyzer.name()
    }

    /// Identifies the analyzer and settings that produced a record.
    pub fn settings_fingerprint(&self) -> &str {
        &self.settings_fingerprint
    }

    pub fn analyze(&self, text: Option<&str>, company_id: RecordId) -> FeatureRecord {
        let text = match text {
            Some(text) if text.chars().count() >= self.min_text_length => text,
            _ => {
                debug!("Text missing or too short for {}, skipping analysis", company_id);
                return FeatureRecord::unprocessed(company_id);
            }
        };

        let lowered = text.to_lowercase();
        let doc = match self.analyzer.analyze(&lowered) {
            Ok(doc) => doc,
            Err(e) => {
                warn!("Text processing failed for company_id={}: {}", company_id, e);
                return FeatureRecord::unprocessed(company_id);
            }
        };
        debug!(
            "Analyzed {} tokens in {} sentences for {}",
            doc.token_count(),
            doc.sentences.len(),
            company_id
        );

        FeatureRecord {
            is_importer: self.detect_importer(&doc),
            product_mentions: self.extract(&doc, &self.keywords.electronics),
            mentioned_countries: self.extract(&doc, &self.keywords.countries),
            activity_indicators: self.count_indicators(&doc),
            processed: true,
            has_financial_indicators: self.has_financial(&doc),
            recent_activity: self.detect_recent_activity(&lowered),
            company_id,
        }
    }

    pub fn detect_importer(&self, doc: &ParsedDocument) -> bool {
        for sentence in &doc.sentences {
            let lemmas = sentence.lemmas();

            for keyword in &self.keywords.import_keywords {
                match keyword {
                    ImportKeyword::Phrase(phrase) => {
                        if sentence.text.contains(phrase.as_str()) {
                            return true;
                        }
                    }
                    ImportKeyword::Lemma(target) => {
                        let unsuppressed = lemmas
                            .iter()
                            .enumerate()
                            .filter(|(_, lemma)| **lemma == target.as_str())
                            .any(|(i, _)| !self.is_negated(&lemmas, i));
                        if unsuppressed {
                            return true;
                        }
                    }
                }
            }
        }
        false
    }

    fn is_negated(&self, lemmas: &[&str], position: usize) -> bool {
        (1..=NEGATION_WINDOW)
            .filter_map(|back| position.checked_sub(back))
            .any(|i| self.keywords.negations.contains(lemmas[i]))
    }

    fn extract(&self, doc: &ParsedDocument, keys: &HashSet<String>) -> BTreeSet<String> {
        doc.tokens()
            .filter(|t| keys.contains(&t.lemma))
            .map(|t| t.lemma.clone())
            .collect()
    }

    fn count_indicators(&self, doc: &ParsedDocument) -> u32 {
        doc.tokens()
            .filter(|t| self.keywords.activity_indicators.contains(&t.lemma))
            .count() as u32
    }

    fn has_financial(&self, doc: &ParsedDocument) -> bool {
        doc.lemma_set()
            .iter()
            .any(|lemma| self.keywords.financial.contains(*lemma))
    }

    fn detect_recent_activity(&self, lowered_text: &str) -> bool {
        self.keywords
            .recent_phrases
            .iter()
            .any(|phrase| lowered_text.contains(phrase.as_str()))
    }
}
