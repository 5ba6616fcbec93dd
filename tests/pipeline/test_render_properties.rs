// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use std::collections::HashSet;
use toscrape_wordcloud::{
    cloud::{CloudConfig, CloudInput, RenderError, WordCloud},
    nlp::Normalizer,
};

const PASSAGE: &str = "It is our choices, Harry, that show what we truly are, far more \
                       than our abilities. Choices shape the path; abilities only light it. \
                       Dreams and choices and more dreams.";

fn small_config() -> CloudConfig {
    CloudConfig {
        width: 320,
        height: 160,
        collocations: false,
        ..CloudConfig::default()
    }
}

#[test]
fn test_normalizer_strips_stopwords_and_lemmatizes() {
    let normalizer = Normalizer::default();
    let tokens = normalizer.normalize("A Light in the Attic");
    assert_eq!(tokens.as_slice(), ["light", "attic"]);
}

#[test]
fn test_normalizer_is_idempotent() {
    let normalizer = Normalizer::default();
    let once = normalizer.normalize_to_string(PASSAGE);
    let twice = normalizer.normalize_to_string(&once);
    assert_eq!(once, twice);
    assert!(!once.is_empty());
}

#[test]
fn test_placed_words_come_from_input() {
    let tokens = Normalizer::default().normalize(PASSAGE).into_vec();
    let cloud = WordCloud::new(small_config()).unwrap();
    let rendered = cloud.render(CloudInput::Tokens(&tokens)).unwrap();

    let vocabulary: HashSet<&str> = tokens.iter().map(String::as_str).collect();
    assert!(!rendered.words.is_empty());
    for word in &rendered.words {
        assert!(vocabulary.contains(word.term.as_str()), "unexpected term {}", word.term);
    }
}

#[test]
fn test_placed_words_respect_cap_and_order() {
    let tokens = Normalizer::default().normalize(PASSAGE).into_vec();
    let cloud = WordCloud::new(CloudConfig {
        max_words: 3,
        ..small_config()
    })
    .unwrap();
    let rendered = cloud.render(CloudInput::Tokens(&tokens)).unwrap();

    assert!(rendered.words.len() <= 3);
    assert!(rendered
        .words
        .windows(2)
        .all(|pair| pair[0].count >= pair[1].count));
    assert_eq!(rendered.words[0].term, "choice");
}

#[test]
fn test_canvas_matches_configuration() {
    let cloud = WordCloud::new(small_config()).unwrap();
    let rendered = cloud.render(CloudInput::Text(PASSAGE)).unwrap();
    assert_eq!((rendered.width(), rendered.height()), (320, 160));

    let png = rendered.to_png().unwrap();
    let decoded = image::load_from_memory(&png).unwrap();
    assert_eq!((decoded.width(), decoded.height()), (320, 160));
}

#[test]
fn test_same_seed_same_image() {
    let first = WordCloud::new(small_config())
        .unwrap()
        .render(CloudInput::Text(PASSAGE))
        .unwrap();
    let second = WordCloud::new(small_config())
        .unwrap()
        .render(CloudInput::Text(PASSAGE))
        .unwrap();
    assert_eq!(first.to_png().unwrap(), second.to_png().unwrap());
}

#[test]
fn test_stopword_only_input_is_empty_corpus() {
    let cloud = WordCloud::new(small_config()).unwrap();
    let tokens: Vec<String> = Normalizer::default().normalize("the of and to").into_vec();
    assert!(tokens.is_empty());
    assert!(matches!(
        cloud.render(CloudInput::Tokens(&tokens)),
        Err(RenderError::EmptyCorpus)
    ));
    assert!(matches!(
        cloud.render(CloudInput::Text("  ,, 42 ")),
        Err(RenderError::EmptyCorpus)
    ));
}

#[test]
fn test_invalid_configuration_is_rejected() {
    let result = WordCloud::new(CloudConfig {
        width: 0,
        ..CloudConfig::default()
    });
    assert!(matches!(result, Err(RenderError::InvalidConfig(_))));
}
