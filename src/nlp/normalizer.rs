// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Text normalization
//!
//! lowercase → strip punctuation → split → drop stopwords → lemmatize

use serde::Serialize;
use tracing::debug;

use super::lemmatizer::PartOfSpeech;
use super::resources::LinguisticResources;

/// Ordered lemmas of one text; duplicates are kept for counting downstream
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct TokenSequence(Vec<String>);

impl TokenSequence {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn into_vec(self) -> Vec<String> {
        self.0
    }

    /// Tokens joined by single spaces
    pub fn to_text(&self) -> String {
        self.0.join(" ")
    }
}

impl From<Vec<String>> for TokenSequence {
    fn from(tokens: Vec<String>) -> Self {
        Self(tokens)
    }
}

impl<'a> IntoIterator for &'a TokenSequence {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Lowercase and keep only alphanumerics and whitespace
pub fn clean(text: &str) -> String {
    text.to_lowercase()
        .chars()
        .filter(|c| c.is_alphanumeric() || c.is_whitespace())
        .collect()
}

/// Normalizer over an explicit set of linguistic resources
#[derive(Debug, Clone)]
pub struct Normalizer {
    resources: LinguisticResources,
    part_of_speech: PartOfSpeech,
}

impl Normalizer {
    pub fn new(resources: LinguisticResources) -> Self {
        Self {
            resources,
            part_of_speech: PartOfSpeech::Noun,
        }
    }

    /// Lemmatize assuming `pos` instead of nouns
    pub fn with_part_of_speech(mut self, pos: PartOfSpeech) -> Self {
        self.part_of_speech = pos;
        self
    }

    pub fn normalize(&self, text: &str) -> TokenSequence {
        let cleaned = clean(text);
        let lemmatizer = self.resources.lemmatizer();

        let tokens: Vec<String> = cleaned
            .split_whitespace()
            .filter(|token| !self.resources.is_stopword(token))
            .map(|token| lemmatizer.lemmatize(token, self.part_of_speech))
            // a lemma may itself be a stopword (e.g. "hes" → "he")
            .filter(|lemma| !lemma.is_empty() && !self.resources.is_stopword(lemma))
            .collect();

        debug!(
            "Normalized {} chars into {} tokens",
            text.len(),
            tokens.len()
        );
        TokenSequence(tokens)
    }

    /// Normalized tokens joined by single spaces
    pub fn normalize_to_string(&self, text: &str) -> String {
        self.normalize(text).to_text()
    }

    pub fn resources(&self) -> &LinguisticResources {
        &self.resources
    }
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::new(LinguisticResources::english())
    }
}
