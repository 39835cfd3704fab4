//! Band-table classification of bounded scores.
//!
//! A [`BandTable`] is an ordered list of intervals, each carrying a label.
//! The first band containing the score wins, so every call site can bring its
//! own thresholds while sharing one evaluation routine.

use crate::error::{Error, Result};
use crate::types::SentimentLabel;
use std::ops::{Bound, RangeBounds};

/// One interval of a band table.
#[derive(Debug, Clone, PartialEq)]
pub struct Band<L> {
    pub lower: Bound<f64>,
    pub upper: Bound<f64>,
    pub label: L,
}

impl<L> Band<L> {
    /// Create a band.
    pub fn new(lower: Bound<f64>, upper: Bound<f64>, label: L) -> Self {
        Self { lower, upper, label }
    }

    /// Check whether a value falls inside the band.
    #[inline]
    pub fn contains(&self, value: f64) -> bool {
        (self.lower, self.upper).contains(&value)
    }
}

fn bound_value(bound: &Bound<f64>) -> Option<f64> {
    match bound {
        Bound::Included(v) | Bound::Excluded(v) => Some(*v),
        Bound::Unbounded => None,
    }
}

/// Ordered label bands with a fallback for values no band covers (NaN).
#[derive(Debug, Clone, PartialEq)]
pub struct BandTable<L> {
    bands: Vec<Band<L>>,
    fallback: L,
}

impl<L: Copy> BandTable<L> {
    /// Create a validated band table.
    pub fn new(bands: Vec<Band<L>>, fallback: L) -> Result<Self> {
        if bands.is_empty() {
            return Err(Error::config("band table must contain at least one band"));
        }
        for (i, band) in bands.iter().enumerate() {
            let lower = bound_value(&band.lower);
            let upper = bound_value(&band.upper);
            if lower.is_some_and(f64::is_nan) || upper.is_some_and(f64::is_nan) {
                return Err(Error::config(format!("band {i} has a NaN bound")));
            }
            if let (Some(lo), Some(hi)) = (lower, upper) {
                if lo > hi {
                    return Err(Error::config(format!(
                        "band {i} has lower bound {lo} above upper bound {hi}"
                    )));
                }
            }
        }
        Ok(Self { bands, fallback })
    }

    /// Classify a score. First matching band wins.
    pub fn classify(&self, score: f64) -> L {
        self.bands
            .iter()
            .find(|band| band.contains(score))
            .map(|band| band.label)
            .unwrap_or(self.fallback)
    }

    /// The bands in evaluation order.
    pub fn bands(&self) -> &[Band<L>] {
        &self.bands
    }
}

impl BandTable<SentimentLabel> {
    /// Fine-grained five-label table used for text and batch classification.
    ///
    /// `>= 0.5` Very Positive, `[0.05, 0.5)` Positive, `[-0.05, 0.05)` Neutral,
    /// `(-0.5, -0.05)` Negative, `<= -0.5` Very Negative.
    pub fn fine() -> Self {
        use Bound::*;
        Self {
            bands: vec![
                Band::new(Included(0.5), Unbounded, SentimentLabel::VeryPositive),
                Band::new(Included(0.05), Excluded(0.5), SentimentLabel::Positive),
                Band::new(Included(-0.05), Excluded(0.05), SentimentLabel::Neutral),
                Band::new(Excluded(-0.5), Excluded(-0.05), SentimentLabel::Negative),
                Band::new(Unbounded, Included(-0.5), SentimentLabel::VeryNegative),
            ],
            fallback: SentimentLabel::Neutral,
        }
    }

    /// Coarse three-label table for count-ratio signals.
    ///
    /// `> t` Positive, `< -t` Negative, otherwise Neutral.
    pub fn symmetric(threshold: f64) -> Result<Self> {
        if !(threshold > 0.0 && threshold <= 1.0) {
            return Err(Error::config(format!(
                "symmetric threshold must be in (0, 1], got {threshold}"
            )));
        }
        use Bound::*;
        Self::new(
            vec![
                Band::new(Excluded(threshold), Unbounded, SentimentLabel::Positive),
                Band::new(Included(-threshold), Included(threshold), SentimentLabel::Neutral),
                Band::new(Unbounded, Excluded(-threshold), SentimentLabel::Negative),
            ],
            SentimentLabel::Neutral,
        )
    }
}

impl Default for BandTable<SentimentLabel> {
    fn default() -> Self {
        Self::fine()
    }
}

/// Classify a score with the fine-grained table.
pub fn classify(score: f64) -> SentimentLabel {
    BandTable::fine().classify(score)
}
