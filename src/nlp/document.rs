// file: src/nlp/document.rs
// description: parsed document model and the analyzer seam
// reference: sentence/token/lemma layering of common nlp pipelines

use crate::error::Result;
use std::collections::HashSet;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub text: String,
    pub lemma: String,
}

impl Token {
    pub fn new(text: impl Into<String>, lemma: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            lemma: lemma.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sentence {
    pub text: String,
    pub tokens: Vec<Token>,
}

impl Sentence {
    pub fn lemmas(&self) -> Vec<&str> {
        self.tokens.iter().map(|t| t.lemma.as_str()).collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ParsedDocument {
    pub text: String,
    pub sentences: Vec<Sentence>,
}

impl ParsedDocument {
    pub fn tokens(&self) -> impl Iterator<Item = &Token> {
        self.sentences.iter().flat_map(|s| s.tokens.iter())
    }

    pub fn lemma_set(&self) -> HashSet<&str> {
        self.tokens().map(|t| t.lemma.as_str()).collect()
    }

    pub fn token_count(&self) -> usize {
        self.sentences.iter().map(|s| s.tokens.len()).sum()
    }
}

/// Splits text into sentences of lemmatized tokens.
///
/// Implementations receive already lower-cased text and must not keep
/// per-call state: one analyzer instance is shared by every extraction.
pub trait TextAnalyzer: Send + Sync {
    fn analyze(&self, text: &str) -> Result<ParsedDocument>;

    fn name(&self) -> &str {
        "custom"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ParsedDocument {
        ParsedDocument {
            text: "мы импорт. импорт".to_string(),
            sentences: vec![
                Sentence {
                    text: "мы импорт.".to_string(),
                    tokens: vec![Token::new("мы", "мы"), Token::new("импорт", "импорт")],
                },
                Sentence {
                    text: "импорт".to_string(),
                    tokens: vec![Token::new("импорт", "импорт")],
                },
            ],
        }
    }

    #[test]
    fn test_tokens_span_sentences() {
        let doc = sample();
        assert_eq!(doc.tokens().count(), 3);
        assert_eq!(doc.token_count(), 3);
    }

    #[test]
    fn test_lemma_set_is_distinct() {
        let doc = sample();
        let lemmas = doc.lemma_set();
        assert_eq!(lemmas.len(), 2);
        assert!(lemmas.contains("импорт"));
    }

    #[test]
    fn test_sentence_lemmas_keep_order() {
        let doc = sample();
        assert_eq!(doc.sentences[0].lemmas(), vec!["мы", "импорт"]);
    }
}
