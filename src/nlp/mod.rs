// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! English text normalization
//!
//! Resources are constructed explicitly and handed to the [`Normalizer`];
//! nothing here is initialised globally.

pub mod lemmatizer;
pub mod normalizer;
pub mod resources;
pub mod stopwords;

pub use lemmatizer::{Lemmatizer, PartOfSpeech};
pub use normalizer::{clean, Normalizer, TokenSequence};
pub use resources::LinguisticResources;
