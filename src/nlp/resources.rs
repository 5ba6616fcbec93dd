// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Linguistic resources handed to the normalizer

use std::collections::HashSet;

use super::lemmatizer::Lemmatizer;
use super::stopwords;

/// Stopword set plus lemmatizer, built once and passed in explicitly
#[derive(Debug, Clone)]
pub struct LinguisticResources {
    stopwords: HashSet<String>,
    lemmatizer: Lemmatizer,
}

impl LinguisticResources {
    pub fn new(stopwords: HashSet<String>, lemmatizer: Lemmatizer) -> Self {
        Self {
            stopwords,
            lemmatizer,
        }
    }

    /// English stopwords and the built-in English lemmatizer
    pub fn english() -> Self {
        Self::new(stopwords::english(), Lemmatizer::english())
    }

    /// Add stopwords on top of the current set (lowercased)
    pub fn with_extra_stopwords<I, S>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.stopwords
            .extend(words.into_iter().map(|w| w.as_ref().to_lowercase()));
        self
    }

    pub fn is_stopword(&self, token: &str) -> bool {
        self.stopwords.contains(token)
    }

    pub fn stopwords(&self) -> &HashSet<String> {
        &self.stopwords
    }

    pub fn lemmatizer(&self) -> &Lemmatizer {
        &self.lemmatizer
    }
}

impl Default for LinguisticResources {
    fn default() -> Self {
        Self::english()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_english_resources() {
        let resources = LinguisticResources::english();
        assert!(resources.is_stopword("the"));
        assert!(!resources.is_stopword("attic"));
    }

    #[test]
    fn test_extra_stopwords_are_lowercased() {
        let resources = LinguisticResources::english().with_extra_stopwords(["Book", "PRICE"]);
        assert!(resources.is_stopword("book"));
        assert!(resources.is_stopword("price"));
    }

    #[test]
    fn test_injected_stopwords_replace_defaults() {
        let stopwords: HashSet<String> = ["light".to_string()].into_iter().collect();
        let resources = LinguisticResources::new(stopwords, Lemmatizer::default());
        assert!(resources.is_stopword("light"));
        assert!(!resources.is_stopword("the"));
        assert_eq!(resources.stopwords().len(), 1);
    }
}
