//! Population statistics over batches of sentiment results.

use crate::window::{ScoredItem, TimeWindow};
use sentiment_core::{BandTable, BatchSummary, Direction, SentimentLabel, SentimentResult};
use sentiment_text::SentimentBlender;
use statrs::statistics::Statistics;
use tracing::debug;

/// Summarizes batches of results.
#[derive(Debug, Clone, Default)]
pub struct BatchStatistics {
    bands: BandTable<SentimentLabel>,
}

impl BatchStatistics {
    /// Create a summarizer bucketing with the fine-grained table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Summarize a batch.
    ///
    /// Each item is bucketed by the direction of its label, so the three
    /// counts always add up to `count`.
    pub fn summarize(&self, results: &[SentimentResult]) -> BatchSummary {
        if results.is_empty() {
            debug!("empty batch");
            return BatchSummary::empty();
        }

        let count = results.len();
        let (mut positive, mut negative, mut neutral) = (0usize, 0usize, 0usize);
        for result in results {
            match self.bands.classify(result.score()).direction() {
                Direction::Bullish => positive += 1,
                Direction::Bearish => negative += 1,
                Direction::Neutral => neutral += 1,
            }
        }

        let scores: Vec<f64> = results.iter().map(SentimentResult::score).collect();
        let mean_score = scores.iter().copied().mean();
        let mean_confidence = results.iter().map(SentimentResult::confidence).mean();
        let score_std_dev = if count > 1 {
            Some(scores.iter().copied().std_dev())
        } else {
            None
        };

        let (positive_pct, negative_pct, neutral_pct) = percentages(count, positive, negative, neutral);

        BatchSummary {
            count,
            mean_score: Some(mean_score),
            mean_confidence: Some(mean_confidence),
            score_std_dev,
            positive_count: positive,
            negative_count: negative,
            neutral_count: neutral,
            positive_pct,
            negative_pct,
            neutral_pct,
            label: self.bands.classify(mean_score),
        }
    }

    /// Analyze raw texts and summarize them.
    pub fn summarize_texts<S: AsRef<str>>(&self, blender: &SentimentBlender, texts: &[S]) -> BatchSummary {
        self.summarize(&blender.analyze_batch(texts))
    }

    /// Summarize the items of one ticker inside a time window.
    pub fn summarize_window(&self, items: &[ScoredItem], window: &TimeWindow) -> BatchSummary {
        let results: Vec<SentimentResult> = items
            .iter()
            .filter(|item| window.contains(item))
            .map(|item| item.result)
            .collect();
        debug!(
            ticker = %window.ticker,
            days = window.days,
            selected = results.len(),
            total = items.len(),
            "window selected"
        );
        self.summarize(&results)
    }
}

/// `bucket_count / count * 100` per bucket. The three add up to 100 within
/// floating-point rounding.
fn percentages(count: usize, positive: usize, negative: usize, neutral: usize) -> (f64, f64, f64) {
    let pct = |n: usize| n as f64 / count as f64 * 100.0;
    (pct(positive), pct(negative), pct(neutral))
}
