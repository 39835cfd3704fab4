//! Institutional-holder and insider-trade sentiment.
//!
//! Both signals reduce raw records to a count ratio in [-1, 1] and feed it to
//! the composite as a single sub-score, labelled with a coarse symmetric
//! table instead of the fine text table.

use crate::composite::WeightedCompositeAggregator;
use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};
use sentiment_core::config::OwnershipConfig;
use sentiment_core::{BandTable, CompositeResult, Direction, NamedSubScore, Result};
use tracing::debug;

/// Change in one institution's position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HolderChange {
    pub holder: String,
    /// Shares added (positive) or sold (negative) since the last filing.
    pub change: f64,
}

/// What an insider transaction code means for sentiment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransactionKind {
    Purchase,
    Sale,
    /// Awards, gifts, exercises and anything else.
    Other,
}

impl TransactionKind {
    /// Parse a Form 4 style code such as `P-Purchase` or `S-Sale+OE`.
    pub fn from_code(code: &str) -> Self {
        match code.trim_start().chars().next().map(|c| c.to_ascii_uppercase()) {
            Some('P') => TransactionKind::Purchase,
            Some('S') => TransactionKind::Sale,
            _ => TransactionKind::Other,
        }
    }
}

/// One insider transaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InsiderTrade {
    pub date: NaiveDate,
    pub transaction_code: String,
}

impl InsiderTrade {
    pub fn kind(&self) -> TransactionKind {
        TransactionKind::from_code(&self.transaction_code)
    }
}

/// Raw counts behind an ownership score.
///
/// For holders, `positive`/`negative` are increasing/decreasing positions and
/// `total` is every holder. For insiders they are buys/sells and `total` is
/// every trade inside the window.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OwnershipTally {
    pub positive: usize,
    pub negative: usize,
    pub total: usize,
}

/// Ownership signal result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OwnershipSentiment {
    pub composite: CompositeResult,
    pub direction: Direction,
    pub tally: OwnershipTally,
}

impl OwnershipSentiment {
    fn from_composite(composite: CompositeResult, tally: OwnershipTally) -> Self {
        let direction = composite.label().direction();
        Self {
            composite,
            direction,
            tally,
        }
    }
}

/// Scores ownership-change records.
#[derive(Debug, Clone)]
pub struct OwnershipScorer {
    institutional: WeightedCompositeAggregator,
    insider: WeightedCompositeAggregator,
    insider_window_days: u32,
}

impl OwnershipScorer {
    pub fn new(config: &OwnershipConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            institutional: WeightedCompositeAggregator::with_bands(BandTable::symmetric(
                config.institutional_threshold,
            )?),
            insider: WeightedCompositeAggregator::with_bands(BandTable::symmetric(
                config.insider_threshold,
            )?),
            insider_window_days: config.insider_window_days,
        })
    }

    /// `(increasing - decreasing) / holders`. No holders gives the unknown result.
    pub fn institutional(&self, holders: &[HolderChange]) -> Result<OwnershipSentiment> {
        let tally = OwnershipTally {
            positive: holders.iter().filter(|h| h.change > 0.0).count(),
            negative: holders.iter().filter(|h| h.change < 0.0).count(),
            total: holders.len(),
        };
        let fraction = ratio(tally.positive, tally.negative, tally.total);
        if fraction.is_none() {
            debug!("no institutional holders");
        }

        let composite = self
            .institutional
            .aggregate(&[NamedSubScore::from_option("institutional", fraction, 1.0)])?;
        Ok(OwnershipSentiment::from_composite(composite, tally))
    }

    /// `(buys - sells) / (buys + sells)` over trades dated in
    /// `[as_of - window, as_of]`. No buys or sells gives the unknown result.
    pub fn insider(&self, trades: &[InsiderTrade], as_of: NaiveDate) -> Result<OwnershipSentiment> {
        let start = as_of
            .checked_sub_days(Days::new(u64::from(self.insider_window_days)))
            .unwrap_or(NaiveDate::MIN);

        let mut tally = OwnershipTally::default();
        for trade in trades.iter().filter(|t| t.date >= start && t.date <= as_of) {
            tally.total += 1;
            match trade.kind() {
                TransactionKind::Purchase => tally.positive += 1,
                TransactionKind::Sale => tally.negative += 1,
                TransactionKind::Other => {}
            }
        }

        let fraction = ratio(tally.positive, tally.negative, tally.positive + tally.negative);
        if fraction.is_none() {
            debug!(
                window_days = self.insider_window_days,
                in_window = tally.total,
                "no insider buys or sells in window"
            );
        }

        let composite = self
            .insider
            .aggregate(&[NamedSubScore::from_option("insider", fraction, 1.0)])?;
        Ok(OwnershipSentiment::from_composite(composite, tally))
    }

    /// Trailing window used for insider trades.
    pub fn insider_window_days(&self) -> u32 {
        self.insider_window_days
    }
}

fn ratio(positive: usize, negative: usize, total: usize) -> Option<f64> {
    if total == 0 {
        return None;
    }
    Some((positive as f64 - negative as f64) / total as f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use sentiment_core::SentimentLabel;

    fn scorer() -> OwnershipScorer {
        OwnershipScorer::new(&OwnershipConfig::default()).unwrap()
    }

    fn holder(name: &str, change: f64) -> HolderChange {
        HolderChange {
            holder: name.to_string(),
            change,
        }
    }

    fn trade(date: &str, code: &str) -> InsiderTrade {
        InsiderTrade {
            date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
            transaction_code: code.to_string(),
        }
    }

    fn as_of() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 30).unwrap()
    }

    #[test]
    fn test_transaction_codes() {
        assert_eq!(TransactionKind::from_code("P-Purchase"), TransactionKind::Purchase);
        assert_eq!(TransactionKind::from_code("S-Sale+OE"), TransactionKind::Sale);
        assert_eq!(TransactionKind::from_code("s"), TransactionKind::Sale);
        assert_eq!(TransactionKind::from_code("A-Award"), TransactionKind::Other);
        assert_eq!(TransactionKind::from_code("M-Exempt"), TransactionKind::Other);
        assert_eq!(TransactionKind::from_code(""), TransactionKind::Other);
    }

    #[test]
    fn test_institutional_bullish() {
        let holders = vec![
            holder("a", 100.0),
            holder("b", 50.0),
            holder("c", 10.0),
            holder("d", -5.0),
            holder("e", 0.0),
        ];
        let result = scorer().institutional(&holders).unwrap();
        // (3 - 1) / 5
        assert_relative_eq!(result.composite.score(), 0.4);
        assert_eq!(result.composite.label(), SentimentLabel::Positive);
        assert_eq!(result.direction, Direction::Bullish);
        assert_eq!(
            result.tally,
            OwnershipTally {
                positive: 3,
                negative: 1,
                total: 5
            }
        );
    }

    #[test]
    fn test_institutional_threshold_is_exclusive() {
        let holders = vec![
            holder("a", 1.0),
            holder("b", 1.0),
            holder("c", -1.0),
            holder("d", 0.0),
            holder("e", 0.0),
            holder("f", 0.0),
            holder("g", 0.0),
            holder("h", 0.0),
            holder("i", 0.0),
            holder("j", 0.0),
        ];
        // (2 - 1) / 10 is inside the +-0.3 neutral band
        let result = scorer().institutional(&holders).unwrap();
        assert_eq!(result.direction, Direction::Neutral);
    }

    #[test]
    fn test_institutional_empty() {
        let result = scorer().institutional(&[]).unwrap();
        assert!(result.composite.is_unknown());
        assert_eq!(result.direction, Direction::Neutral);
        assert_eq!(result.tally.total, 0);
    }

    #[test]
    fn test_insider_window() {
        let trades = vec![
            trade("2024-06-15", "S-Sale"),
            trade("2024-05-01", "S-Sale"),
            trade("2024-04-01", "P-Purchase"),
            trade("2024-04-01", "A-Award"),
            // Outside the 90-day window or in the future
            trade("2024-01-02", "P-Purchase"),
            trade("2024-07-01", "P-Purchase"),
        ];
        let result = scorer().insider(&trades, as_of()).unwrap();
        // (1 - 2) / 3
        assert_relative_eq!(result.composite.score(), -1.0 / 3.0, epsilon = 1e-12);
        assert_eq!(result.composite.label(), SentimentLabel::Negative);
        assert_eq!(result.direction, Direction::Bearish);
        assert_eq!(
            result.tally,
            OwnershipTally {
                positive: 1,
                negative: 2,
                total: 4
            }
        );
    }

    #[test]
    fn test_insider_window_edges_are_inclusive() {
        // 2024-06-30 minus 90 days
        let trades = vec![trade("2024-04-01", "P"), trade("2024-06-30", "P")];
        let result = scorer().insider(&trades, as_of()).unwrap();
        assert_eq!(result.tally.positive, 2);
        assert_relative_eq!(result.composite.score(), 1.0);
    }

    #[test]
    fn test_insider_without_buys_or_sells() {
        let trades = vec![trade("2024-06-01", "A-Award"), trade("2024-06-02", "G-Gift")];
        let result = scorer().insider(&trades, as_of()).unwrap();
        assert!(result.composite.is_unknown());
        assert_eq!(result.tally.total, 2);

        let result = scorer().insider(&[], as_of()).unwrap();
        assert!(result.composite.is_unknown());
    }

    #[test]
    fn test_custom_thresholds() {
        let config = OwnershipConfig {
            insider_threshold: 0.5,
            insider_window_days: 10,
            ..Default::default()
        };
        let scorer = OwnershipScorer::new(&config).unwrap();
        assert_eq!(scorer.insider_window_days(), 10);

        let trades = vec![
            trade("2024-06-29", "P"),
            trade("2024-06-28", "P"),
            trade("2024-06-27", "S"),
            trade("2024-06-01", "S"),
        ];
        // (2 - 1) / 3 stays neutral under +-0.5
        let result = scorer.insider(&trades, as_of()).unwrap();
        assert_eq!(result.direction, Direction::Neutral);
    }

    #[test]
    fn test_rejects_bad_config() {
        let config = OwnershipConfig {
            institutional_threshold: 0.0,
            ..Default::default()
        };
        assert!(OwnershipScorer::new(&config).is_err());
    }
}
