//! Weighted composite of named sub-scores.
//!
//! Weights of the present sub-scores are renormalized to sum to 1, so a
//! composite with missing contributors is a full-weight average of what is
//! left. The share of intended weight that was actually backed by data is
//! reported alongside the score.

use sentiment_core::{
    clamp_signed, BandTable, CompositeResult, Contribution, Error, NamedSubScore, Result,
    SentimentLabel,
};
use std::collections::HashSet;
use tracing::debug;

/// Generic weighted reducer over named sub-scores.
#[derive(Debug, Clone, Default)]
pub struct WeightedCompositeAggregator {
    bands: BandTable<SentimentLabel>,
}

impl WeightedCompositeAggregator {
    /// Create an aggregator labelling with the fine-grained table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an aggregator with its own label table.
    pub fn with_bands(bands: BandTable<SentimentLabel>) -> Self {
        Self { bands }
    }

    /// Label table applied to the composite score.
    pub fn bands(&self) -> &BandTable<SentimentLabel> {
        &self.bands
    }

    /// Reduce sub-scores to one composite.
    ///
    /// Returns the "unknown" result when nothing is present. Duplicate
    /// names, non-positive weights and out-of-range present scores are
    /// rejected.
    pub fn aggregate(&self, items: &[NamedSubScore]) -> Result<CompositeResult> {
        validate(items)?;

        let present: Vec<&NamedSubScore> = items.iter().filter(|i| i.present).collect();
        if present.is_empty() {
            debug!(intended = items.len(), "no present sub-scores, composite unknown");
            return Ok(CompositeResult::unknown());
        }

        // Weights are rescaled by their maximum so sums and products stay finite
        // and normal for any finite positive input.
        let max_present = max_weight(present.iter().copied());
        let scaled: Vec<f64> = present.iter().map(|i| i.weight / max_present).collect();
        let present_scaled: f64 = scaled.iter().sum();
        let weighted_sum: f64 = present.iter().zip(&scaled).map(|(i, w)| i.score * w).sum();
        let score = clamp_signed(weighted_sum / present_scaled);

        let max_all = max_weight(items.iter());
        let present_weight: f64 = present.iter().map(|i| i.weight / max_all).sum();
        let total_weight: f64 = items.iter().map(|i| i.weight / max_all).sum();
        let coverage = present_weight / total_weight;
        let label = self.bands.classify(score);

        let contributions = present
            .iter()
            .zip(&scaled)
            .map(|(i, w)| Contribution {
                name: i.name.clone(),
                score: i.score,
                normalized_weight: w / present_scaled,
            })
            .collect();

        debug!(
            score,
            label = %label,
            coverage,
            present = present.len(),
            intended = items.len(),
            "composite aggregated"
        );

        Ok(CompositeResult::new(score, label, coverage, contributions))
    }
}

fn max_weight<'a>(items: impl Iterator<Item = &'a NamedSubScore>) -> f64 {
    items.map(|i| i.weight).fold(0.0, f64::max)
}

fn validate(items: &[NamedSubScore]) -> Result<()> {
    let mut seen = HashSet::with_capacity(items.len());
    for item in items {
        if !seen.insert(item.name.as_str()) {
            return Err(Error::DuplicateComponent(item.name.clone()));
        }
        if !(item.weight.is_finite() && item.weight > 0.0) {
            return Err(Error::InvalidWeight {
                name: item.name.clone(),
                weight: item.weight,
            });
        }
        if item.present && !(-1.0..=1.0).contains(&item.score) {
            return Err(Error::ScoreOutOfRange {
                name: item.name.clone(),
                score: item.score,
            });
        }
    }
    Ok(())
}
