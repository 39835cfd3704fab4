//! General-purpose lexical model.
//!
//! Averages per-word polarity and subjectivity over the sentiment words of a
//! text. Intensifiers scale the following word; negators flip it at half
//! strength.

use crate::scorer::LexicalModel;
use sentiment_core::{clamp_signed, clamp_unit, Error, LexicalScore, Result};
use std::collections::HashMap;

/// Polarity multiplier applied to a negated word.
const NEGATION_FACTOR: f64 = -0.5;
/// How many tokens a negator reaches forward.
const NEGATION_SCOPE: usize = 3;

const WORDS: &[(&str, f64, f64)] = &[
    // (word, polarity, subjectivity)
    ("good", 0.7, 0.6),
    ("great", 0.8, 0.75),
    ("excellent", 1.0, 1.0),
    ("best", 1.0, 0.3),
    ("amazing", 0.6, 0.9),
    ("awesome", 1.0, 1.0),
    ("nice", 0.6, 1.0),
    ("happy", 0.8, 1.0),
    ("love", 0.5, 0.6),
    ("optimistic", 0.5, 0.8),
    ("confident", 0.5, 0.8),
    ("strong", 0.43, 0.73),
    ("solid", 0.4, 0.5),
    ("impressive", 1.0, 1.0),
    ("positive", 0.23, 0.55),
    ("profitable", 0.5, 0.5),
    ("successful", 0.75, 0.95),
    ("healthy", 0.5, 0.5),
    ("beautiful", 0.85, 1.0),
    ("wonderful", 1.0, 1.0),
    ("perfect", 1.0, 1.0),
    ("better", 0.5, 0.5),
    ("higher", 0.25, 0.5),
    ("calm", 0.3, 0.75),
    ("bad", -0.7, 0.67),
    ("terrible", -1.0, 1.0),
    ("awful", -1.0, 1.0),
    ("worst", -1.0, 1.0),
    ("horrible", -1.0, 1.0),
    ("poor", -0.4, 0.6),
    ("weak", -0.38, 0.63),
    ("negative", -0.3, 0.4),
    ("worried", -0.5, 0.6),
    ("afraid", -0.6, 0.9),
    ("scared", -0.5, 0.8),
    ("sad", -0.5, 1.0),
    ("disappointing", -0.6, 0.7),
    ("disappointed", -0.75, 0.75),
    ("ugly", -0.7, 1.0),
    ("stupid", -0.8, 1.0),
    ("risky", -0.3, 0.6),
    ("volatile", -0.2, 0.6),
    ("uncertain", -0.2, 0.6),
    ("lower", -0.15, 0.4),
    ("worse", -0.4, 0.6),
    ("dangerous", -0.6, 0.9),
    ("broken", -0.4, 0.5),
    ("overvalued", -0.4, 0.6),
    ("undervalued", 0.3, 0.6),
    ("cheap", 0.4, 0.7),
    ("expensive", -0.5, 0.7),
];

const INTENSIFIERS: &[(&str, f64)] = &[
    ("very", 1.3),
    ("really", 1.2),
    ("extremely", 1.5),
    ("incredibly", 1.4),
    ("super", 1.3),
    ("so", 1.2),
    ("too", 1.15),
    ("quite", 1.1),
    ("slightly", 0.6),
    ("somewhat", 0.7),
    ("barely", 0.5),
];

const NEGATORS: &[&str] = &[
    "not", "no", "never", "none", "nothing", "neither", "nor", "cannot", "without",
];

fn is_negator(word: &str) -> bool {
    NEGATORS.contains(&word) || word.ends_with("n't")
}

fn clean_token(token: &str) -> String {
    token
        .trim_matches(|c: char| !c.is_alphanumeric() && c != '\'')
        .to_lowercase()
}

/// General-purpose polarity/subjectivity lexicon.
#[derive(Debug, Clone)]
pub struct GeneralLexicon {
    words: HashMap<&'static str, (f64, f64)>,
    intensifiers: HashMap<&'static str, f64>,
    max_input_chars: usize,
}

impl GeneralLexicon {
    /// Create a lexicon that rejects inputs longer than `max_input_chars`.
    pub fn new(max_input_chars: usize) -> Self {
        Self {
            words: WORDS.iter().map(|&(w, p, s)| (w, (p, s))).collect(),
            intensifiers: INTENSIFIERS.iter().copied().collect(),
            max_input_chars,
        }
    }

    /// Look up a word's (polarity, subjectivity).
    pub fn entry(&self, word: &str) -> Option<(f64, f64)> {
        self.words.get(word).copied()
    }
}

impl LexicalModel for GeneralLexicon {
    fn name(&self) -> &str {
        "general"
    }

    fn score(&self, text: &str) -> Result<LexicalScore> {
        let len = text.chars().count();
        if len > self.max_input_chars {
            return Err(Error::lexicon(format!(
                "input of {len} chars exceeds limit of {}",
                self.max_input_chars
            )));
        }

        let mut polarities = Vec::new();
        let mut subjectivities = Vec::new();
        let mut intensity = 1.0;
        let mut negation_left = 0usize;

        for raw in text.split_whitespace() {
            let word = clean_token(raw);
            if word.is_empty() {
                continue;
            }

            if is_negator(&word) {
                negation_left = NEGATION_SCOPE;
                continue;
            }
            if let Some(&factor) = self.intensifiers.get(word.as_str()) {
                intensity *= factor;
                continue;
            }

            match self.entry(&word) {
                Some((polarity, subjectivity)) => {
                    let mut p = polarity * intensity;
                    if negation_left > 0 {
                        p *= NEGATION_FACTOR;
                        negation_left = 0;
                    }
                    polarities.push(clamp_signed(p));
                    subjectivities.push(clamp_unit(subjectivity * intensity));
                }
                None => {
                    negation_left = negation_left.saturating_sub(1);
                }
            }
            // Intensifiers only reach the next token
            intensity = 1.0;
        }

        if polarities.is_empty() {
            return Ok(LexicalScore {
                polarity: 0.0,
                subjectivity: Some(0.0),
                breakdown: None,
            });
        }

        let n = polarities.len() as f64;
        Ok(LexicalScore {
            polarity: clamp_signed(polarities.iter().sum::<f64>() / n),
            subjectivity: Some(clamp_unit(subjectivities.iter().sum::<f64>() / n)),
            breakdown: None,
        })
    }
}
