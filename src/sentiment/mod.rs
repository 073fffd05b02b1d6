//! Lexicon and rule based compound polarity scoring of headline text.
//!
//! Each token found in the [`Lexicon`] contributes its valence, adjusted by
//! the tokens around it:
//! - a booster or dampener up to three tokens before it (`very`, `slightly`);
//! - a negation up to three tokens before it (`not`, `never`, `...n't`);
//! - ALL-CAPS emphasis when the text mixes upper and lower case;
//! - a contrastive `but`, which halves what precedes it and boosts what follows.
//!
//! Trailing `!` and repeated `?` amplify the sum, which is then squashed into
//! `[-1, 1]` by `x / sqrt(x^2 + 15)` and rounded to 4 decimal places.

mod lexicon;

pub use lexicon::{Lexicon, init, init_with, is_initialized};

use crate::core::SentimentLabel;

const BOOST_INCR: f64 = 0.293;
const BOOST_DECR: f64 = -0.293;
const CAPS_INCR: f64 = 0.733;
const NEGATION_SCALAR: f64 = -0.74;
const NORMALIZE_ALPHA: f64 = 15.0;

const BOOSTERS: &[&str] = &[
    "absolutely", "amazingly", "completely", "considerably", "deeply", "enormously",
    "entirely", "especially", "exceptionally", "extremely", "greatly", "highly", "hugely",
    "incredibly", "intensely", "majorly", "massively", "more", "most", "particularly",
    "purely", "quite", "really", "remarkably", "sharply", "significantly", "so",
    "substantially", "thoroughly", "totally", "tremendously", "very",
];

const DAMPENERS: &[&str] = &[
    "almost", "barely", "hardly", "less", "little", "marginally", "modestly", "occasionally",
    "partly", "scarcely", "slightly", "somewhat",
];

const NEGATIONS: &[&str] = &[
    "aint", "arent", "cannot", "cant", "couldnt", "didnt", "doesnt", "dont", "hadnt",
    "hasnt", "havent", "isnt", "neither", "never", "no", "nobody", "none", "nor", "not",
    "nothing", "nowhere", "shouldnt", "wasnt", "werent", "without", "wont", "wouldnt",
];

/// Compound score and its label.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Score {
    /// Polarity in `[-1, 1]`, rounded to 4 decimal places. The label is taken
    /// from the rounded value, so `0.05004` is stored as `0.05` and is neutral.
    pub compound: f64,
    pub label: SentimentLabel,
}

/// Stateless scorer over a shared, read-only lexicon.
#[derive(Debug, Clone, Copy)]
pub struct SentimentScorer {
    lexicon: &'static Lexicon,
}

impl Default for SentimentScorer {
    fn default() -> Self {
        Self::new()
    }
}

impl SentimentScorer {
    /// A scorer over the process-wide lexicon, loading it if needed.
    #[must_use]
    pub fn new() -> Self {
        Self { lexicon: init() }
    }

    /// A scorer over a specific lexicon.
    #[must_use]
    pub const fn with_lexicon(lexicon: &'static Lexicon) -> Self {
        Self { lexicon }
    }

    /// Scores `text`. Never fails; text without known words is neutral `0.0`.
    #[must_use]
    pub fn score(&self, text: &str) -> Score {
        let compound = self.compound(text);
        Score {
            compound,
            label: SentimentLabel::from_score(compound),
        }
    }

    /// The compound polarity of `text` in `[-1, 1]`, rounded to 4 decimal places.
    #[must_use]
    pub fn compound(&self, text: &str) -> f64 {
        let words: Vec<&str> = text
            .split_whitespace()
            .map(strip_punctuation)
            .filter(|w| w.chars().count() > 1)
            .collect();
        if words.is_empty() {
            return 0.0;
        }

        let lower: Vec<String> = words.iter().map(|w| fold(w)).collect();
        let caps_differ = words.iter().any(|w| is_all_caps(w))
            && !words.iter().all(|w| is_all_caps(w));

        let mut sentiments: Vec<f64> = (0..words.len())
            .map(|i| self.valence_at(i, &words, &lower, caps_differ))
            .collect();

        if let Some(but) = lower.iter().position(|w| w == "but") {
            for (k, s) in sentiments.iter_mut().enumerate() {
                if k < but {
                    *s *= 0.5;
                } else if k > but {
                    *s *= 1.5;
                }
            }
        }

        let mut sum: f64 = sentiments.iter().sum();
        if sum != 0.0 {
            let emphasis = punctuation_emphasis(text);
            sum += emphasis * sum.signum();
        }
        round4(normalize(sum))
    }

    fn valence_at(&self, i: usize, words: &[&str], lower: &[String], caps_differ: bool) -> f64 {
        let token = lower[i].as_str();
        if BOOSTERS.contains(&token) || DAMPENERS.contains(&token) {
            return 0.0;
        }
        let Some(mut valence) = self.lexicon.get(token) else {
            return 0.0;
        };

        if caps_differ && is_all_caps(words[i]) {
            valence += CAPS_INCR * valence.signum();
        }

        for distance in 1..=3 {
            let Some(j) = i.checked_sub(distance) else {
                break;
            };
            let prior = lower[j].as_str();
            if self.lexicon.contains(prior) {
                continue;
            }

            let mut scalar = booster_scalar(prior, valence, caps_differ && is_all_caps(words[j]));
            match distance {
                2 => scalar *= 0.95,
                3 => scalar *= 0.9,
                _ => {}
            }
            valence += scalar;

            if is_negation(prior) {
                valence *= NEGATION_SCALAR;
            }
        }
        valence
    }
}

fn booster_scalar(word: &str, valence: f64, emphasized: bool) -> f64 {
    let base = if BOOSTERS.contains(&word) {
        BOOST_INCR
    } else if DAMPENERS.contains(&word) {
        BOOST_DECR
    } else {
        return 0.0;
    };
    let mut scalar = if valence < 0.0 { -base } else { base };
    if emphasized {
        scalar += CAPS_INCR * valence.signum();
    }
    scalar
}

fn is_negation(word: &str) -> bool {
    NEGATIONS.contains(&word)
}

/// Lowercases and drops apostrophes, so `don't` and `dont` match alike.
fn fold(word: &str) -> String {
    word.chars()
        .filter(|c| *c != '\'' && *c != '\u{2019}')
        .flat_map(char::to_lowercase)
        .collect()
}

fn strip_punctuation(token: &str) -> &str {
    token.trim_matches(|c: char| !(c.is_alphanumeric() || c == '$' || c == '%'))
}

fn is_all_caps(word: &str) -> bool {
    word.chars().any(char::is_alphabetic)
        && word
            .chars()
            .filter(|c| c.is_alphabetic())
            .all(char::is_uppercase)
}

fn punctuation_emphasis(text: &str) -> f64 {
    let bangs = text.matches('!').count().min(4);
    let questions = text.matches('?').count();
    let qm = match questions {
        0 | 1 => 0.0,
        2 | 3 => questions as f64 * 0.18,
        _ => 0.96,
    };
    bangs as f64 * 0.292 + qm
}

fn round4(x: f64) -> f64 {
    (x * 10_000.0).round() / 10_000.0
}

fn normalize(score: f64) -> f64 {
    let norm = score / (score * score + NORMALIZE_ALPHA).sqrt();
    norm.clamp(-1.0, 1.0)
}
