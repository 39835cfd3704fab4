//! Core data types for the sentiment engine.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Clamp a value to [-1, 1], mapping NaN to 0.
#[inline]
pub fn clamp_signed(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(-1.0, 1.0)
    }
}

/// Clamp a value to [0, 1], mapping NaN to 0.
#[inline]
pub fn clamp_unit(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}

/// Five-level ordinal sentiment label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SentimentLabel {
    VeryPositive,
    Positive,
    Neutral,
    Negative,
    VeryNegative,
}

impl SentimentLabel {
    /// Collapse the label onto a three-way direction.
    pub fn direction(self) -> Direction {
        match self {
            SentimentLabel::VeryPositive | SentimentLabel::Positive => Direction::Bullish,
            SentimentLabel::Neutral => Direction::Neutral,
            SentimentLabel::Negative | SentimentLabel::VeryNegative => Direction::Bearish,
        }
    }

    /// Human-readable name.
    pub fn as_str(self) -> &'static str {
        match self {
            SentimentLabel::VeryPositive => "Very Positive",
            SentimentLabel::Positive => "Positive",
            SentimentLabel::Neutral => "Neutral",
            SentimentLabel::Negative => "Negative",
            SentimentLabel::VeryNegative => "Very Negative",
        }
    }
}

impl fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Directional reading of a signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Bullish,
    Neutral,
    Bearish,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Direction::Bullish => "bullish",
            Direction::Neutral => "neutral",
            Direction::Bearish => "bearish",
        };
        f.write_str(s)
    }
}

/// Positive/negative/neutral proportions reported by the social model.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValenceBreakdown {
    pub positive: f64,
    pub negative: f64,
    pub neutral: f64,
}

impl ValenceBreakdown {
    /// Breakdown of text with no sentiment-bearing tokens.
    pub fn all_neutral() -> Self {
        Self {
            positive: 0.0,
            negative: 0.0,
            neutral: 1.0,
        }
    }
}

/// Output of one lexical model.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LexicalScore {
    /// Polarity (or compound) in [-1, 1].
    pub polarity: f64,
    /// Subjectivity in [0, 1], if the model produces one.
    pub subjectivity: Option<f64>,
    /// Valence proportions, if the model produces them.
    pub breakdown: Option<ValenceBreakdown>,
}

impl LexicalScore {
    /// Neutral default used when a model fails.
    pub fn neutral() -> Self {
        Self {
            polarity: 0.0,
            subjectivity: None,
            breakdown: None,
        }
    }
}

/// Named sub-scores that went into a text sentiment result.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SentimentComponents {
    /// General-purpose model polarity.
    pub general_polarity: f64,
    /// Social-text model compound score.
    pub social_compound: f64,
    /// Social-text model positive proportion.
    pub social_positive: f64,
    /// Social-text model negative proportion.
    pub social_negative: f64,
    /// Social-text model neutral proportion.
    pub social_neutral: f64,
}

/// Blended sentiment of a single text.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "SentimentResultRecord")]
pub struct SentimentResult {
    score: f64,
    confidence: f64,
    subjectivity: f64,
    components: SentimentComponents,
}

impl SentimentResult {
    /// Build a result, clamping every field to its documented range.
    pub fn new(score: f64, confidence: f64, subjectivity: f64, components: SentimentComponents) -> Self {
        Self {
            score: clamp_signed(score),
            confidence: clamp_unit(confidence),
            subjectivity: clamp_unit(subjectivity),
            components,
        }
    }

    /// Result for text with no scorable content.
    pub fn empty() -> Self {
        Self::new(0.0, 0.0, 0.0, SentimentComponents::default())
    }

    /// Blended score in [-1, 1].
    pub fn score(&self) -> f64 {
        self.score
    }

    /// Agreement-based confidence in [0, 1].
    pub fn confidence(&self) -> f64 {
        self.confidence
    }

    /// Subjectivity in [0, 1].
    pub fn subjectivity(&self) -> f64 {
        self.subjectivity
    }

    /// Per-model sub-scores.
    pub fn components(&self) -> &SentimentComponents {
        &self.components
    }

    /// True when the result carries no signal at all.
    pub fn is_empty(&self) -> bool {
        self.confidence == 0.0 && self.score == 0.0 && self.subjectivity == 0.0
    }
}

/// Stored form of [`SentimentResult`]; loading goes through the clamping constructor.
#[derive(Deserialize)]
struct SentimentResultRecord {
    score: f64,
    confidence: f64,
    subjectivity: f64,
    components: SentimentComponents,
}

impl From<SentimentResultRecord> for SentimentResult {
    fn from(r: SentimentResultRecord) -> Self {
        Self::new(r.score, r.confidence, r.subjectivity, r.components)
    }
}

/// One named input to a weighted composite.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedSubScore {
    /// Unique name within one aggregation call.
    pub name: String,
    /// Score in [-1, 1]; ignored when not present.
    pub score: f64,
    /// Intended weight, > 0.
    pub weight: f64,
    /// Whether data backed this sub-score.
    pub present: bool,
}

impl NamedSubScore {
    /// A sub-score backed by data.
    pub fn present(name: impl Into<String>, score: f64, weight: f64) -> Self {
        Self {
            name: name.into(),
            score,
            weight,
            present: true,
        }
    }

    /// An intended contributor with no data.
    pub fn absent(name: impl Into<String>, weight: f64) -> Self {
        Self {
            name: name.into(),
            score: 0.0,
            weight,
            present: false,
        }
    }

    /// Present when `score` is `Some`, absent otherwise.
    pub fn from_option(name: impl Into<String>, score: Option<f64>, weight: f64) -> Self {
        match score {
            Some(s) => Self::present(name, s, weight),
            None => Self::absent(name, weight),
        }
    }
}

/// A present sub-score after weight renormalization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contribution {
    pub name: String,
    pub score: f64,
    /// Share of the composite; these sum to 1 over all contributions.
    pub normalized_weight: f64,
}

/// Result of a weighted composite.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "CompositeResultRecord")]
pub struct CompositeResult {
    score: f64,
    label: SentimentLabel,
    contributing_weight_fraction: f64,
    contributions: Vec<Contribution>,
}

impl CompositeResult {
    /// Build a result, clamping score and coverage.
    pub fn new(
        score: f64,
        label: SentimentLabel,
        contributing_weight_fraction: f64,
        contributions: Vec<Contribution>,
    ) -> Self {
        Self {
            score: clamp_signed(score),
            label,
            contributing_weight_fraction: clamp_unit(contributing_weight_fraction),
            contributions,
        }
    }

    /// The "no data" result.
    pub fn unknown() -> Self {
        Self::new(0.0, SentimentLabel::Neutral, 0.0, Vec::new())
    }

    /// Composite score in [-1, 1].
    pub fn score(&self) -> f64 {
        self.score
    }

    /// Label from the band table used by the aggregator.
    pub fn label(&self) -> SentimentLabel {
        self.label
    }

    /// Share of intended weight backed by present data.
    pub fn contributing_weight_fraction(&self) -> f64 {
        self.contributing_weight_fraction
    }

    /// Present sub-scores with their renormalized weights.
    pub fn contributions(&self) -> &[Contribution] {
        &self.contributions
    }

    /// True when no sub-score was present.
    pub fn is_unknown(&self) -> bool {
        self.contributing_weight_fraction == 0.0
    }
}

#[derive(Deserialize)]
struct CompositeResultRecord {
    score: f64,
    label: SentimentLabel,
    contributing_weight_fraction: f64,
    contributions: Vec<Contribution>,
}

impl From<CompositeResultRecord> for CompositeResult {
    fn from(r: CompositeResultRecord) -> Self {
        Self::new(r.score, r.label, r.contributing_weight_fraction, r.contributions)
    }
}

/// Population statistics over a batch of scored items.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchSummary {
    pub count: usize,
    /// Mean score; `None` for an empty batch.
    pub mean_score: Option<f64>,
    /// Mean confidence; `None` for an empty batch.
    pub mean_confidence: Option<f64>,
    /// Sample standard deviation of scores; `None` below two items.
    pub score_std_dev: Option<f64>,
    pub positive_count: usize,
    pub negative_count: usize,
    pub neutral_count: usize,
    pub positive_pct: f64,
    pub negative_pct: f64,
    pub neutral_pct: f64,
    /// Label of the mean score.
    pub label: SentimentLabel,
}

impl BatchSummary {
    /// Summary of an empty batch.
    pub fn empty() -> Self {
        Self {
            count: 0,
            mean_score: None,
            mean_confidence: None,
            score_std_dev: None,
            positive_count: 0,
            negative_count: 0,
            neutral_count: 0,
            positive_pct: 0.0,
            negative_pct: 0.0,
            neutral_pct: 0.0,
            label: SentimentLabel::Neutral,
        }
    }

    /// Whether the batch had no items.
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }
}
