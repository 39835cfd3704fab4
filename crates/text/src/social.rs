//! Lexical model tuned for informal social text.
//!
//! Word and emoji valences on a ±4 scale, adjusted for boosters, negation,
//! ALL-CAPS emphasis, contrastive "but" and `!`/`?` emphasis, then squashed
//! into a compound score in [-1, 1].

use crate::scorer::LexicalModel;
use sentiment_core::{clamp_signed, Error, LexicalScore, Result, ValenceBreakdown};
use std::collections::HashMap;

const BOOSTER_INCREMENT: f64 = 0.293;
const CAPS_INCREMENT: f64 = 0.733;
const NEGATION_SCALAR: f64 = -0.74;
const EXCLAMATION_INCREMENT: f64 = 0.292;
const MAX_EXCLAMATIONS: usize = 4;
const QUESTION_INCREMENT: f64 = 0.18;
const MAX_QUESTION_EMPHASIS: f64 = 0.96;
/// Normalization constant for the compound score.
const ALPHA: f64 = 15.0;
/// How many preceding tokens boosters and negators reach.
const LOOKBACK: usize = 3;

const VALENCES: &[(&str, f64)] = &[
    ("good", 1.9),
    ("great", 3.1),
    ("excellent", 2.7),
    ("best", 3.2),
    ("amazing", 2.8),
    ("awesome", 3.1),
    ("nice", 1.8),
    ("love", 3.2),
    ("happy", 2.7),
    ("win", 2.8),
    ("winning", 2.4),
    ("gain", 2.4),
    ("gains", 2.0),
    ("profit", 1.9),
    ("strong", 2.3),
    ("optimistic", 1.3),
    ("bullish", 2.0),
    ("rally", 1.8),
    ("moon", 1.5),
    ("mooning", 2.0),
    ("hodl", 1.2),
    ("lambo", 1.5),
    ("beat", 1.2),
    ("upgrade", 1.6),
    ("breakout", 1.4),
    ("buy", 0.9),
    ("lol", 1.8),
    ("yay", 2.4),
    ("bad", -2.5),
    ("terrible", -2.1),
    ("awful", -2.0),
    ("worst", -3.1),
    ("horrible", -2.5),
    ("hate", -2.7),
    ("loss", -1.3),
    ("losses", -1.7),
    ("lose", -1.7),
    ("weak", -1.9),
    ("bearish", -2.0),
    ("crash", -1.7),
    ("crashing", -2.0),
    ("dump", -1.6),
    ("dumping", -1.6),
    ("panic", -2.3),
    ("fear", -2.2),
    ("worried", -1.2),
    ("scam", -2.5),
    ("fraud", -2.8),
    ("rekt", -2.5),
    ("fud", -1.5),
    ("bagholder", -1.8),
    ("sell", -0.6),
    ("selling", -0.7),
    ("downgrade", -1.6),
    ("miss", -1.2),
    ("disappointing", -2.2),
    ("risky", -0.8),
    ("ugh", -1.8),
    (":)", 2.0),
    (":-)", 2.0),
    (":d", 2.3),
    (":(", -1.9),
    (":-(", -1.9),
    (":'(", -2.2),
];

const EMOJI_VALENCES: &[(char, f64)] = &[
    ('🚀', 2.0),
    ('💎', 1.5),
    ('🙌', 1.6),
    ('📈', 1.8),
    ('🔥', 1.4),
    ('👍', 1.9),
    ('😀', 2.1),
    ('😂', 1.6),
    ('😍', 2.7),
    ('💰', 1.5),
    ('🐂', 1.2),
    ('📉', -1.8),
    ('👎', -1.9),
    ('😢', -2.0),
    ('😭', -2.2),
    ('😡', -2.5),
    ('💩', -2.0),
    ('🤡', -1.4),
    ('🐻', -1.2),
];

const BOOSTERS: &[(&str, f64)] = &[
    ("very", BOOSTER_INCREMENT),
    ("really", BOOSTER_INCREMENT),
    ("extremely", BOOSTER_INCREMENT),
    ("super", BOOSTER_INCREMENT),
    ("so", BOOSTER_INCREMENT),
    ("totally", BOOSTER_INCREMENT),
    ("absolutely", BOOSTER_INCREMENT),
    ("incredibly", BOOSTER_INCREMENT),
    ("hugely", BOOSTER_INCREMENT),
    ("slightly", -BOOSTER_INCREMENT),
    ("somewhat", -BOOSTER_INCREMENT),
    ("barely", -BOOSTER_INCREMENT),
    ("kinda", -BOOSTER_INCREMENT),
    ("marginally", -BOOSTER_INCREMENT),
];

const NEGATORS: &[&str] = &[
    "not", "no", "never", "none", "nothing", "nobody", "neither", "nor", "cannot",
    "without", "aint", "dont", "cant", "wont", "isnt", "didnt", "doesnt", "hardly",
];

/// One whitespace token after cleanup.
#[derive(Debug)]
struct Token {
    /// Lowercased word (or emoticon) used for lookups.
    word: String,
    /// Whether the token was written in all caps.
    shouted: bool,
    /// Emoji valences carried by the token.
    emoji: Vec<f64>,
}

fn tokenize(text: &str, emoticons: &HashMap<&'static str, f64>) -> Vec<Token> {
    text.split_whitespace()
        .map(|raw| {
            let lower = raw.to_lowercase();
            if lower.starts_with(':') && emoticons.contains_key(lower.as_str()) {
                return Token {
                    word: lower,
                    shouted: false,
                    emoji: Vec::new(),
                };
            }
            let emoji = raw
                .chars()
                .filter_map(|c| EMOJI_VALENCES.iter().find(|(e, _)| *e == c).map(|(_, v)| *v))
                .collect();
            let trimmed = raw.trim_matches(|c: char| !c.is_alphanumeric() && c != '\'');
            let letters: Vec<char> = trimmed.chars().filter(|c| c.is_alphabetic()).collect();
            let shouted = letters.len() > 1 && letters.iter().all(|c| c.is_uppercase());
            Token {
                word: trimmed.to_lowercase(),
                shouted,
                emoji,
            }
        })
        .collect()
}

fn is_negator(word: &str) -> bool {
    NEGATORS.contains(&word) || word.ends_with("n't")
}

/// Social-text valence lexicon.
#[derive(Debug, Clone)]
pub struct SocialLexicon {
    valences: HashMap<&'static str, f64>,
    boosters: HashMap<&'static str, f64>,
    max_input_chars: usize,
}

impl SocialLexicon {
    /// Create a lexicon that rejects inputs longer than `max_input_chars`.
    pub fn new(max_input_chars: usize) -> Self {
        Self {
            valences: VALENCES.iter().copied().collect(),
            boosters: BOOSTERS.iter().copied().collect(),
            max_input_chars,
        }
    }

    /// Raw valence of a word, if known.
    pub fn valence(&self, word: &str) -> Option<f64> {
        self.valences.get(word).copied()
    }

    /// Valence of token `i` after booster, caps and negation rules.
    fn token_valence(&self, tokens: &[Token], i: usize, caps_differential: bool) -> Option<f64> {
        let token = &tokens[i];
        let mut valence = self.valence(&token.word)?;
        let sign = valence.signum();

        if caps_differential && token.shouted {
            valence += sign * CAPS_INCREMENT;
        }

        let mut negated = false;
        for distance in 1..=LOOKBACK.min(i) {
            let prior = &tokens[i - distance];
            if let Some(&increment) = self.boosters.get(prior.word.as_str()) {
                let mut scalar = increment;
                if caps_differential && prior.shouted {
                    scalar += increment.signum() * CAPS_INCREMENT;
                }
                // Boosters fade with distance
                let decay = 1.0 - 0.05 * (distance - 1) as f64;
                valence += sign * scalar * decay;
            }
            if is_negator(&prior.word) {
                negated = true;
            }
        }
        if negated {
            valence *= NEGATION_SCALAR;
        }
        Some(valence)
    }

    fn punctuation_emphasis(text: &str) -> f64 {
        let exclamations = text.matches('!').count().min(MAX_EXCLAMATIONS);
        let questions = text.matches('?').count();
        let question_emphasis = match questions {
            0 | 1 => 0.0,
            2 | 3 => questions as f64 * QUESTION_INCREMENT,
            _ => MAX_QUESTION_EMPHASIS,
        };
        exclamations as f64 * EXCLAMATION_INCREMENT + question_emphasis
    }
}

impl LexicalModel for SocialLexicon {
    fn name(&self) -> &str {
        "social"
    }

    fn score(&self, text: &str) -> Result<LexicalScore> {
        let len = text.chars().count();
        if len > self.max_input_chars {
            return Err(Error::lexicon(format!(
                "input of {len} chars exceeds limit of {}",
                self.max_input_chars
            )));
        }

        let tokens = tokenize(text, &self.valences);
        let alpha_tokens = tokens.iter().filter(|t| t.word.chars().any(char::is_alphabetic)).count();
        let shouted_tokens = tokens.iter().filter(|t| t.shouted).count();
        let caps_differential = shouted_tokens > 0 && shouted_tokens < alpha_tokens;
        let but_index = tokens.iter().position(|t| t.word == "but");

        let mut sentiments = Vec::with_capacity(tokens.len());
        for i in 0..tokens.len() {
            if !tokens[i].word.is_empty() {
                let mut valence = self.token_valence(&tokens, i, caps_differential).unwrap_or(0.0);
                if let Some(b) = but_index {
                    if i < b {
                        valence *= 0.5;
                    } else if i > b {
                        valence *= 1.5;
                    }
                }
                sentiments.push(valence);
            }
            sentiments.extend(tokens[i].emoji.iter().copied());
        }

        let sum: f64 = sentiments.iter().sum();
        let emphasis = Self::punctuation_emphasis(text);
        let adjusted = if sum > 0.0 {
            sum + emphasis
        } else if sum < 0.0 {
            sum - emphasis
        } else {
            sum
        };
        let compound = clamp_signed(adjusted / (adjusted * adjusted + ALPHA).sqrt());

        Ok(LexicalScore {
            polarity: compound,
            subjectivity: None,
            breakdown: Some(breakdown(&sentiments, sum, emphasis)),
        })
    }
}

fn breakdown(sentiments: &[f64], sum: f64, emphasis: f64) -> ValenceBreakdown {
    let mut positive = 0.0;
    let mut negative = 0.0;
    let mut neutral = 0.0;
    for &s in sentiments {
        if s > 0.0 {
            positive += s + 1.0;
        } else if s < 0.0 {
            negative += s - 1.0;
        } else {
            neutral += 1.0;
        }
    }
    if sum > 0.0 {
        positive += emphasis;
    } else if sum < 0.0 {
        negative -= emphasis;
    }

    let total = positive + negative.abs() + neutral;
    if total <= 0.0 {
        return ValenceBreakdown::all_neutral();
    }
    ValenceBreakdown {
        positive: positive / total,
        negative: negative.abs() / total,
        neutral: neutral / total,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn compound(text: &str) -> f64 {
        SocialLexicon::new(10_000).score(text).unwrap().polarity
    }

    #[test]
    fn test_single_word_compound() {
        // 3.1 / sqrt(3.1^2 + 15)
        assert_relative_eq!(compound("great"), 3.1 / (3.1f64 * 3.1 + 15.0).sqrt());
    }

    #[test]
    fn test_neutral_text() {
        let score = SocialLexicon::new(10_000).score("the company released a report").unwrap();
        assert_eq!(score.polarity, 0.0);
        let b = score.breakdown.unwrap();
        assert_relative_eq!(b.neutral, 1.0);
        assert_eq!(b.positive, 0.0);
        assert!(score.subjectivity.is_none());
    }

    #[test]
    fn test_negation() {
        assert!(compound("not great") < 0.0);
        assert!(compound("this isn't good") < 0.0);
    }

    #[test]
    fn test_booster_and_dampener() {
        assert!(compound("very good") > compound("good"));
        assert!(compound("slightly good") < compound("good"));
    }

    #[test]
    fn test_caps_emphasis() {
        assert!(compound("GREAT stock") > compound("great stock"));
        // All caps everywhere carries no differential
        assert_relative_eq!(compound("GREAT STOCK"), compound("great stock"));
    }

    #[test]
    fn test_exclamation_emphasis() {
        assert!(compound("great!!!") > compound("great"));
        assert_relative_eq!(compound("great!!!!!!!!"), compound("great!!!!"));
        assert!(compound("terrible!!") < compound("terrible"));
    }

    #[test]
    fn test_emoji() {
        assert!(compound("🚀🚀🚀") > 0.5);
        assert!(compound("📉📉") < 0.0);
        assert!(compound("HODL!!! 💎🙌") > 0.0);
        assert!(compound(":(") < 0.0);
    }

    #[test]
    fn test_but_shifts_weight() {
        assert!(compound("good but terrible") < 0.0);
        assert!(compound("terrible but great") > 0.0);
    }

    #[test]
    fn test_breakdown_sums_to_one() {
        let score = SocialLexicon::new(10_000).score("great earnings but weak guidance").unwrap();
        let b = score.breakdown.unwrap();
        assert_relative_eq!(b.positive + b.negative + b.neutral, 1.0, epsilon = 1e-12);
        assert!(b.positive > 0.0 && b.negative > 0.0 && b.neutral > 0.0);
    }

    #[test]
    fn test_rejects_oversized_input() {
        let lexicon = SocialLexicon::new(3);
        assert!(matches!(lexicon.score("great"), Err(Error::Lexicon(_))));
    }
}
