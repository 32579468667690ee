// file: src/nlp/segmenter.rs
// description: rule based sentence splitting with unicode word segmentation
// reference: https://docs.rs/unicode-segmentation

use crate::config::ExtractionConfig;
use crate::error::Result;
use crate::nlp::document::{ParsedDocument, Sentence, TextAnalyzer, Token};
use crate::nlp::lexicon::Lexicon;
use lazy_static::lazy_static;
use regex::Regex;
use tracing::info;
use unicode_segmentation::UnicodeSegmentation;

lazy_static! {
    // Terminal punctuation followed by whitespace or end of text. UAX #29
    // sentence rules refuse to break before a lowercase letter, which is
    // all the extractor ever passes in.
    static ref SENTENCE_END: Regex = Regex::new(
        r"[.!?…]+(?:\s+|$)|\n\s*\n"
    ).expect("SENTENCE_END regex is valid");
}

#[derive(Debug, Clone)]
pub struct SegmentingAnalyzer {
    lexicon: Lexicon,
}

impl SegmentingAnalyzer {
    pub fn new(lexicon: Lexicon) -> Self {
        Self { lexicon }
    }

    /// Built-in lexicon, extended by `lexicon_path` when configured.
    pub fn from_config(config: &ExtractionConfig) -> Result<Self> {
        let mut lexicon = Lexicon::builtin()?;
        if let Some(path) = &config.lexicon_path {
            lexicon.extend(Lexicon::load(path)?);
        }
        info!("Text analyzer ready ({} lexicon entries)", lexicon.len());
        Ok(Self::new(lexicon))
    }

    fn split_sentences<'t>(&self, text: &'t str) -> Vec<&'t str> {
        let mut sentences = Vec::new();
        let mut start = 0;

        for boundary in SENTENCE_END.find_iter(text) {
            let end = boundary.end();
            sentences.push(&text[start..end]);
            start = end;
        }
        if start < text.len() {
            sentences.push(&text[start..]);
        }

        sentences
            .into_iter()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect()
    }

    /// Words and punctuation both become tokens; only whitespace is dropped.
    /// Negation lookback counts punctuation positions.
    fn tokenize(&self, sentence: &str) -> Vec<Token> {
        sentence
            .split_word_bounds()
            .filter(|segment| !segment.trim().is_empty())
            .map(|segment| {
                if segment.chars().any(char::is_alphanumeric) {
                    let lowered = segment.to_lowercase();
                    let lemma = self.lexicon.lemma(&lowered).to_string();
                    Token::new(segment, lemma)
                } else {
                    Token::new(segment, segment)
                }
            })
            .collect()
    }
}

impl TextAnalyzer for SegmentingAnalyzer {
    fn analyze(&self, text: &str) -> Result<ParsedDocument> {
        let sentences = self
            .split_sentences(text)
            .into_iter()
            .map(|s| Sentence {
                text: s.to_string(),
                tokens: self.tokenize(s),
            })
            .collect();

        Ok(ParsedDocument {
            text: text.to_string(),
            sentences,
        })
    }

    fn name(&self) -> &str {
        "segmenting"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn analyzer() -> SegmentingAnalyzer {
        SegmentingAnalyzer::new(Lexicon::builtin().unwrap())
    }

    #[test]
    fn test_lowercase_sentences_are_split() {
        let doc = analyzer()
            .analyze("мы занимаемся импортом электроники из китая. в 2025 году оборот вырос.")
            .unwrap();

        assert_eq!(doc.sentences.len(), 2);
        assert_eq!(doc.sentences[0].text, "мы занимаемся импортом электроники из китая.");
        assert_eq!(doc.sentences[1].text, "в 2025 году оборот вырос.");
    }

    #[test]
    fn test_tokens_carry_lemmas() {
        let doc = analyzer().analyze("мы не импортируем электронику.").unwrap();
        let lemmas = doc.sentences[0].lemmas();

        assert_eq!(lemmas, vec!["мы", "не", "импортировать", "электроника", "."]);
        assert_eq!(doc.sentences[0].tokens[2].text, "импортируем");
    }

    #[test]
    fn test_punctuation_is_kept_as_tokens() {
        let doc = analyzer()
            .analyze("без посредников, импортируем электронику из-за рубежа")
            .unwrap();
        let lemmas = doc.sentences[0].lemmas();

        assert_eq!(lemmas[2], ",");
        assert_eq!(lemmas[3], "импортировать");
        assert!(lemmas.contains(&"-"));
        assert!(!lemmas.iter().any(|l| l.trim().is_empty()));
    }

    #[test]
    fn test_decimal_point_does_not_split() {
        let doc = analyzer().analyze("оборот 1.5 млн рублей за год").unwrap();
        assert_eq!(doc.sentences.len(), 1);
        assert!(doc.lemma_set().contains("рубль"));
    }

    #[test]
    fn test_numbers_are_tokens() {
        let doc = analyzer().analyze("в 2025 году").unwrap();
        assert!(doc.tokens().any(|t| t.lemma == "2025"));
    }

    #[test]
    fn test_empty_text_has_no_sentences() {
        let doc = analyzer().analyze("   ").unwrap();
        assert!(doc.sentences.is_empty());
    }

    #[test]
    fn test_from_config_rejects_missing_lexicon() {
        let config = ExtractionConfig {
            lexicon_path: Some("/nonexistent/lexicon.tsv".into()),
            ..ExtractionConfig::default()
        };
        assert!(SegmentingAnalyzer::from_config(&config).is_err());
    }
}
