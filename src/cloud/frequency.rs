// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Term frequency counting
//!
//! Tokens are lowercased, stopwords removed and plural forms folded into
//! their singular when both occur. With collocations enabled, adjacent pairs
//! whose Dunning log-likelihood score exceeds the threshold become terms of
//! their own and their count is taken away from both constituents.

use serde::Serialize;
use std::collections::{HashMap, HashSet};
use tracing::debug;

/// Pairs seen fewer times than this are never collocations
pub const MIN_COLLOCATION_COUNT: usize = 2;

/// A term with its occurrence count
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TermCount {
    pub term: String,
    pub count: usize,
    #[serde(skip)]
    first_seen: usize,
}

/// Ranked term counts: descending count, ties by first occurrence
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrequencyModel {
    terms: Vec<TermCount>,
}

impl FrequencyModel {
    /// Count single tokens only
    pub fn from_tokens<S: AsRef<str>>(tokens: &[S], stopwords: &HashSet<String>) -> Self {
        Self::build(tokens, stopwords, None)
    }

    /// Count single tokens and pairs that score above `threshold`
    pub fn with_collocations<S: AsRef<str>>(
        tokens: &[S],
        stopwords: &HashSet<String>,
        threshold: f64,
    ) -> Self {
        Self::build(tokens, stopwords, Some(threshold))
    }

    fn build<S: AsRef<str>>(
        tokens: &[S],
        stopwords: &HashSet<String>,
        collocation_threshold: Option<f64>,
    ) -> Self {
        // None marks a removed position so pairs never span a stopword
        let mut words: Vec<Option<String>> = tokens
            .iter()
            .map(|t| t.as_ref().trim().to_lowercase())
            .map(|t| (!t.is_empty() && !stopwords.contains(&t)).then_some(t))
            .collect();
        fold_plurals(&mut words);

        let mut counts: Counter = Counter::default();
        for (pos, word) in words.iter().enumerate() {
            if let Some(word) = word {
                counts.add(word, 1, pos);
            }
        }
        let n_words: usize = counts.entries.values().map(|(c, _)| *c as usize).sum();

        if let Some(threshold) = collocation_threshold {
            let mut pairs = Counter::default();
            for (pos, pair) in words.windows(2).enumerate() {
                if let [Some(first), Some(second)] = pair {
                    pairs.add(&format!("{} {}", first, second), 1, pos);
                }
            }

            let original = counts.clone();
            let mut kept = 0;
            for key in pairs.order.iter() {
                let (pair_count, first_seen) = pairs.entries[key];
                if (pair_count as usize) < MIN_COLLOCATION_COUNT {
                    continue;
                }
                let Some((first, second)) = key.split_once(' ') else {
                    continue;
                };
                let score = collocation_score(
                    pair_count as f64,
                    original.get(first) as f64,
                    original.get(second) as f64,
                    n_words as f64,
                );
                if score > threshold {
                    counts.add(first, -pair_count, first_seen);
                    counts.add(second, -pair_count, first_seen);
                    counts.add(key, pair_count, first_seen);
                    kept += 1;
                }
            }
            debug!("Kept {} collocations out of {} pairs", kept, pairs.order.len());
        }

        let mut terms: Vec<TermCount> = counts
            .order
            .iter()
            .filter_map(|term| {
                let (count, first_seen) = counts.entries[term];
                (count > 0).then(|| TermCount {
                    term: term.clone(),
                    count: count as usize,
                    first_seen,
                })
            })
            .collect();
        terms.sort_by(|a, b| {
            b.count
                .cmp(&a.count)
                .then_with(|| a.first_seen.cmp(&b.first_seen))
        });

        Self { terms }
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// All terms in rank order
    pub fn terms(&self) -> &[TermCount] {
        &self.terms
    }

    /// The `cap` highest ranked terms
    pub fn top(&self, cap: usize) -> &[TermCount] {
        &self.terms[..cap.min(self.terms.len())]
    }

    pub fn count(&self, term: &str) -> Option<usize> {
        self.terms.iter().find(|t| t.term == term).map(|t| t.count)
    }

    pub fn max_count(&self) -> usize {
        self.terms.first().map(|t| t.count).unwrap_or(0)
    }
}

/// Insertion-ordered signed counter
#[derive(Debug, Clone, Default)]
struct Counter {
    entries: HashMap<String, (i64, usize)>,
    order: Vec<String>,
}

impl Counter {
    fn add(&mut self, key: &str, delta: i64, pos: usize) {
        match self.entries.get_mut(key) {
            Some((count, _)) => *count += delta,
            None => {
                self.entries.insert(key.to_string(), (delta, pos));
                self.order.push(key.to_string());
            }
        }
    }

    fn get(&self, key: &str) -> i64 {
        self.entries.get(key).map(|(c, _)| *c).unwrap_or(0)
    }
}

/// Replace "cats" with "cat" when both forms occur
fn fold_plurals(words: &mut [Option<String>]) {
    let present: HashSet<String> = words.iter().flatten().cloned().collect();
    for word in words.iter_mut().flatten() {
        if word.ends_with('s') && !word.ends_with("ss") {
            let singular = &word[..word.len() - 1];
            if present.contains(singular) {
                *word = singular.to_string();
            }
        }
    }
}

fn log_likelihood(k: f64, n: f64, x: f64) -> f64 {
    x.max(1e-10).ln() * k + (1.0 - x).max(1e-10).ln() * (n - k)
}

/// Dunning likelihood ratio of a pair against its two words
fn collocation_score(c12: f64, c1: f64, c2: f64, n: f64) -> f64 {
    if n <= c1 || n <= c2 {
        return 0.0;
    }
    let p = c2 / n;
    let p1 = c12 / c1;
    let p2 = (c2 - c12) / (n - c1);
    let score = log_likelihood(c12, c1, p) + log_likelihood(c2 - c12, n - c1, p)
        - log_likelihood(c12, c1, p1)
        - log_likelihood(c2 - c12, n - c1, p2);
    -2.0 * score
}
