// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! English lemmatizer
//!
//! Morphological reduction in the WordNet style: an irregular-form table per
//! part of speech is consulted first, then suffix detachment rules. There is
//! no dictionary to validate candidates against, so every rule is guarded by
//! an invariant-word list and a few stem-shape checks.
//!
//! Reduction is repeated until the word stops changing, which makes every
//! lemma a fixed point: `lemmatize(lemmatize(w)) == lemmatize(w)`.

use std::collections::{HashMap, HashSet};

/// Part of speech the reduction assumes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PartOfSpeech {
    #[default]
    Noun,
    Verb,
    Adjective,
}

const NOUN_EXCEPTIONS: &[(&str, &str)] = &[
    ("children", "child"),
    ("men", "man"),
    ("women", "woman"),
    ("feet", "foot"),
    ("teeth", "tooth"),
    ("geese", "goose"),
    ("mice", "mouse"),
    ("lice", "louse"),
    ("oxen", "ox"),
    ("wolves", "wolf"),
    ("knives", "knife"),
    ("wives", "wife"),
    ("lives", "life"),
    ("leaves", "leaf"),
    ("loaves", "loaf"),
    ("thieves", "thief"),
    ("halves", "half"),
    ("calves", "calf"),
    ("shelves", "shelf"),
    ("selves", "self"),
    ("elves", "elf"),
    ("scarves", "scarf"),
    ("heroes", "hero"),
    ("potatoes", "potato"),
    ("tomatoes", "tomato"),
    ("echoes", "echo"),
    ("vetoes", "veto"),
    ("torpedoes", "torpedo"),
    ("analyses", "analysis"),
    ("theses", "thesis"),
    ("crises", "crisis"),
    ("hypotheses", "hypothesis"),
    ("diagnoses", "diagnosis"),
    ("criteria", "criterion"),
    ("phenomena", "phenomenon"),
    ("cacti", "cactus"),
    ("fungi", "fungus"),
    ("nuclei", "nucleus"),
    ("radii", "radius"),
    ("alumni", "alumnus"),
    ("matrices", "matrix"),
    ("indices", "index"),
    ("vertices", "vertex"),
    ("appendices", "appendix"),
    ("quizzes", "quiz"),
    ("aches", "ache"),
    ("headaches", "headache"),
    ("niches", "niche"),
    ("caches", "cache"),
    ("avalanches", "avalanche"),
    ("moustaches", "moustache"),
    ("mustaches", "mustache"),
    ("psyches", "psyche"),
    ("quiches", "quiche"),
    ("cliches", "cliche"),
];

const NOUN_INVARIANTS: &[&str] = &[
    "news", "series", "species", "means", "physics", "mathematics", "politics", "economics",
    "ethics", "athletics", "lens", "christmas", "always", "perhaps", "towards", "afterwards",
    "backwards", "forwards", "sometimes", "besides", "whereas", "nevertheless", "downstairs",
    "upstairs", "indoors", "outdoors", "overseas", "whereabouts", "alas", "atlas", "canvas",
    "chaos", "clothes", "scissors", "pants", "jeans", "omen", "amen", "specimen", "abdomen",
    "stamen", "semen", "acumen", "regimen", "hymen", "lumen", "famous",
];

const VERB_EXCEPTIONS: &[(&str, &str)] = &[
    ("was", "be"),
    ("were", "be"),
    ("been", "be"),
    ("being", "be"),
    ("am", "be"),
    ("is", "be"),
    ("are", "be"),
    ("has", "have"),
    ("had", "have"),
    ("having", "have"),
    ("does", "do"),
    ("did", "do"),
    ("done", "do"),
    ("went", "go"),
    ("gone", "go"),
    ("goes", "go"),
    ("got", "get"),
    ("gotten", "get"),
    ("made", "make"),
    ("said", "say"),
    ("saw", "see"),
    ("seen", "see"),
    ("came", "come"),
    ("took", "take"),
    ("taken", "take"),
    ("knew", "know"),
    ("known", "know"),
    ("gave", "give"),
    ("given", "give"),
    ("found", "find"),
    ("thought", "think"),
    ("told", "tell"),
    ("became", "become"),
    ("left", "leave"),
    ("felt", "feel"),
    ("brought", "bring"),
    ("began", "begin"),
    ("begun", "begin"),
    ("kept", "keep"),
    ("held", "hold"),
    ("wrote", "write"),
    ("written", "write"),
    ("stood", "stand"),
    ("heard", "hear"),
    ("meant", "mean"),
    ("met", "meet"),
    ("ran", "run"),
    ("paid", "pay"),
    ("sat", "sit"),
    ("spoke", "speak"),
    ("spoken", "speak"),
    ("led", "lead"),
    ("grew", "grow"),
    ("grown", "grow"),
    ("lost", "lose"),
    ("fell", "fall"),
    ("fallen", "fall"),
    ("sent", "send"),
    ("built", "build"),
    ("understood", "understand"),
    ("drew", "draw"),
    ("drawn", "draw"),
    ("broke", "break"),
    ("broken", "break"),
    ("spent", "spend"),
    ("rose", "rise"),
    ("risen", "rise"),
    ("drove", "drive"),
    ("driven", "drive"),
    ("bought", "buy"),
    ("wore", "wear"),
    ("worn", "wear"),
    ("chose", "choose"),
    ("chosen", "choose"),
    ("sought", "seek"),
    ("threw", "throw"),
    ("thrown", "throw"),
    ("caught", "catch"),
    ("dealt", "deal"),
    ("won", "win"),
    ("forgot", "forget"),
    ("forgotten", "forget"),
    ("laid", "lay"),
    ("sold", "sell"),
    ("fought", "fight"),
    ("taught", "teach"),
    ("ate", "eat"),
    ("eaten", "eat"),
    ("sang", "sing"),
    ("sung", "sing"),
    ("flew", "fly"),
    ("flown", "fly"),
    ("slept", "sleep"),
    ("fed", "feed"),
    ("fled", "flee"),
    ("dying", "die"),
    ("lying", "lie"),
    ("tying", "tie"),
    ("used", "use"),
    ("using", "use"),
    ("added", "add"),
    ("adding", "add"),
];

const VERB_INVARIANTS: &[&str] = &[
    "need", "speed", "bed", "red", "shed", "hundred", "sacred", "naked", "wicked", "kindred",
    "bred", "nothing", "something", "anything", "everything", "morning", "evening", "ceiling",
    "spring", "string", "thing", "bring", "sing", "ring", "king", "wing", "swing", "sting",
    "during", "pass", "miss", "kiss", "bless", "focus", "bias",
];

const ADJECTIVE_EXCEPTIONS: &[(&str, &str)] = &[
    ("better", "good"),
    ("best", "good"),
    ("worse", "bad"),
    ("worst", "bad"),
    ("farther", "far"),
    ("farthest", "far"),
    ("further", "far"),
    ("furthest", "far"),
    ("elder", "old"),
    ("eldest", "old"),
];

const ADJECTIVE_INVARIANTS: &[&str] = &[
    "honest", "modest", "interest", "forest", "earnest", "harvest", "protest", "request",
    "suggest", "manifest", "contest", "arrest", "digest", "conquest", "priest", "guest", "quest",
    "chest", "never", "over", "under", "other", "water", "paper", "power", "after", "ever",
    "however", "number", "river", "clever", "silver", "bitter", "proper", "tender", "super",
    "sober", "eager", "inner", "outer", "upper", "utter", "former", "latter", "whether",
    "together", "rather", "either", "neither",
];

/// Rule-based English lemmatizer
#[derive(Debug, Clone, Default)]
pub struct Lemmatizer {
    exceptions: HashMap<PartOfSpeech, HashMap<String, String>>,
    invariants: HashMap<PartOfSpeech, HashSet<String>>,
}

impl Lemmatizer {
    /// Lemmatizer loaded with the built-in English tables
    pub fn english() -> Self {
        let mut lemmatizer = Self::default();
        for (pos, exceptions, invariants) in [
            (PartOfSpeech::Noun, NOUN_EXCEPTIONS, NOUN_INVARIANTS),
            (PartOfSpeech::Verb, VERB_EXCEPTIONS, VERB_INVARIANTS),
            (PartOfSpeech::Adjective, ADJECTIVE_EXCEPTIONS, ADJECTIVE_INVARIANTS),
        ] {
            for (form, lemma) in exceptions {
                lemmatizer.add_exception(pos, form, lemma);
            }
            for word in invariants {
                lemmatizer.add_invariant(pos, word);
            }
        }
        lemmatizer
    }

    /// Map an irregular form directly to its lemma
    pub fn add_exception(&mut self, pos: PartOfSpeech, form: &str, lemma: &str) {
        self.exceptions
            .entry(pos)
            .or_default()
            .insert(form.to_string(), lemma.to_string());
    }

    /// Exclude a word from suffix rules
    pub fn add_invariant(&mut self, pos: PartOfSpeech, word: &str) {
        self.invariants
            .entry(pos)
            .or_default()
            .insert(word.to_string());
    }

    /// Reduce `word` (expected lowercase) to its lemma
    pub fn lemmatize(&self, word: &str, pos: PartOfSpeech) -> String {
        let mut current = word.to_string();
        // Every rule shortens the word except men→man, which cannot recur,
        // so this bound is never the reason the loop ends.
        for _ in 0..word.len() + 2 {
            if let Some(lemma) = self.exceptions.get(&pos).and_then(|m| m.get(&current)) {
                return lemma.clone();
            }
            if self
                .invariants
                .get(&pos)
                .is_some_and(|set| set.contains(&current))
            {
                return current;
            }
            let next = match pos {
                PartOfSpeech::Noun => reduce_noun(&current),
                PartOfSpeech::Verb => reduce_verb(&current),
                PartOfSpeech::Adjective => reduce_adjective(&current),
            };
            match next {
                Some(next) if next != current => current = next,
                _ => return current,
            }
        }
        current
    }
}

fn char_len(s: &str) -> usize {
    s.chars().count()
}

fn is_vowel(c: char) -> bool {
    matches!(c, 'a' | 'e' | 'i' | 'o' | 'u')
}

fn has_vowel(s: &str) -> bool {
    s.chars().any(|c| is_vowel(c) || c == 'y')
}

fn reduce_noun(word: &str) -> Option<String> {
    if char_len(word) <= 3
        || word.ends_with("ss")
        || word.ends_with("us")
        || word.ends_with("is")
    {
        return None;
    }
    if let Some(stem) = word.strip_suffix("ies") {
        return Some(if char_len(word) > 4 {
            format!("{}y", stem)
        } else {
            format!("{}ie", stem)
        });
    }
    if let Some(stem) = word.strip_suffix("es") {
        if word.ends_with("ses") {
            if stem.ends_with("ss") || stem.ends_with("us") {
                return Some(stem.to_string());
            }
        } else if word.ends_with("xes")
            || word.ends_with("ches")
            || word.ends_with("shes")
            || word.ends_with("zzes")
        {
            return Some(stem.to_string());
        }
    }
    if let Some(stem) = word.strip_suffix("men") {
        if char_len(word) > 4 {
            return Some(format!("{}man", stem));
        }
    }
    word.strip_suffix('s').map(str::to_string)
}

fn reduce_verb(word: &str) -> Option<String> {
    if char_len(word) <= 3 || word.ends_with("ss") {
        return None;
    }
    if let Some(stem) = word.strip_suffix("ies") {
        return Some(if char_len(word) > 4 {
            format!("{}y", stem)
        } else {
            format!("{}ie", stem)
        });
    }
    if let Some(stem) = word.strip_suffix("es") {
        if stem.ends_with("ss")
            || stem.ends_with("sh")
            || stem.ends_with("ch")
            || stem.ends_with('x')
            || stem.ends_with("zz")
        {
            return Some(stem.to_string());
        }
    }
    if let Some(stem) = word.strip_suffix('s') {
        if !word.ends_with("us") && !word.ends_with("is") {
            return Some(stem.to_string());
        }
        return None;
    }
    if let Some(stem) = word.strip_suffix("ied") {
        return Some(format!("{}y", stem));
    }
    if word.ends_with("eed") {
        return None;
    }
    if let Some(stem) = word.strip_suffix("ed") {
        if char_len(stem) < 3 || !has_vowel(stem) {
            return None;
        }
        return Some(restore_stem(stem));
    }
    if let Some(stem) = word.strip_suffix("ing") {
        if char_len(stem) < 2 || !has_vowel(stem) {
            return None;
        }
        return Some(restore_stem(stem));
    }
    None
}

fn reduce_adjective(word: &str) -> Option<String> {
    if char_len(word) <= 3 {
        return None;
    }
    if let Some(stem) = word.strip_suffix("iest") {
        if char_len(stem) >= 2 {
            return Some(format!("{}y", stem));
        }
        return None;
    }
    if let Some(stem) = word.strip_suffix("ier") {
        if char_len(stem) >= 2 {
            return Some(format!("{}y", stem));
        }
        return None;
    }
    let stem = word
        .strip_suffix("est")
        .or_else(|| word.strip_suffix("er"))?;
    if char_len(stem) < 3 || !has_vowel(stem) {
        return None;
    }
    Some(restore_stem(stem))
}

/// Undo the spelling changes made when an -ed/-ing/-er/-est suffix was added
fn restore_stem(stem: &str) -> String {
    let chars: Vec<char> = stem.chars().collect();
    let n = chars.len();
    let last = chars[n - 1];
    let prev = chars[n - 2];

    // stopp → stop, bigg → big
    if last == prev && !is_vowel(last) && !matches!(last, 'l' | 's' | 'z' | 'f' | 'd') {
        return chars[..n - 1].iter().collect();
    }
    // lov → love, continu → continue, danc → dance
    if matches!(last, 'v' | 'u' | 'c') {
        return format!("{}e", stem);
    }
    // settl → settle, troubl → trouble
    if last == 'l' && matches!(prev, 'b' | 'c' | 'd' | 'f' | 'g' | 'k' | 'p' | 't' | 'z') {
        return format!("{}e", stem);
    }
    // caus → cause, clos → close
    if matches!(last, 's' | 'z') && is_vowel(prev) {
        return format!("{}e", stem);
    }
    // mak → make, hop → hope; longer stems are left alone (visit, open)
    if (3..=4).contains(&n)
        && !is_vowel(chars[n - 3])
        && matches!(prev, 'a' | 'i' | 'o' | 'u')
        && !is_vowel(last)
        && !matches!(last, 'w' | 'x' | 'y')
    {
        return format!("{}e", stem);
    }
    stem.to_string()
}
