//! Macro market sentiment.
//!
//! Each raw indicator reading goes through its own rule table to become a
//! pre-scored sub-score in [-1, 1]. The four sub-scores are then combined by
//! the weighted composite:
//! - VIX level (fear gauge)
//! - Advance/decline breadth across NYSE and NASDAQ
//! - Put/call volume ratio, read contrarian at the extreme
//! - SPY return checked against VIX for narrow leadership

use crate::composite::WeightedCompositeAggregator;
use serde::{Deserialize, Serialize};
use sentiment_core::config::MarketWeights;
use sentiment_core::{Band, BandTable, CompositeResult, NamedSubScore, Result};
use std::fmt;
use std::ops::Bound::{Excluded, Included, Unbounded};

/// VIX regime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VixRegime {
    /// VIX < 15.
    Complacent,
    /// 15 <= VIX < 25.
    Normal,
    /// 25 <= VIX < 35.
    Fearful,
    /// VIX >= 35.
    Panic,
}

impl VixRegime {
    /// Sub-score for the regime.
    pub fn score(self) -> f64 {
        match self {
            VixRegime::Complacent => 0.5,
            VixRegime::Normal => 0.0,
            VixRegime::Fearful => -0.4,
            VixRegime::Panic => -0.8,
        }
    }
}

/// Five-step market mood of a composite score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarketMood {
    Bullish,
    SlightlyBullish,
    Neutral,
    SlightlyBearish,
    Bearish,
}

impl fmt::Display for MarketMood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            MarketMood::Bullish => "bullish",
            MarketMood::SlightlyBullish => "slightly bullish",
            MarketMood::Neutral => "neutral",
            MarketMood::SlightlyBearish => "slightly bearish",
            MarketMood::Bearish => "bearish",
        };
        f.write_str(s)
    }
}

/// Options volume over one expiration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PutCallVolume {
    pub put_volume: f64,
    pub call_volume: f64,
}

impl PutCallVolume {
    /// Put/call ratio; `None` without call volume.
    pub fn ratio(&self) -> Option<f64> {
        if self.call_volume > 0.0 && self.put_volume >= 0.0 {
            Some(self.put_volume / self.call_volume).filter(|r| r.is_finite())
        } else {
            None
        }
    }
}

/// Raw macro readings. `None` means the collector returned nothing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MarketIndicators {
    /// Latest VIX close.
    pub vix: Option<f64>,
    /// NYSE advance/decline line change over the period, in percent.
    pub nyse_ad_pct: Option<f64>,
    /// NASDAQ advance/decline line change over the period, in percent.
    pub nasdaq_ad_pct: Option<f64>,
    /// Options volume on the index ETF.
    pub put_call: Option<PutCallVolume>,
    /// SPY return over the period, in percent.
    pub spy_return_pct: Option<f64>,
}

/// Macro composite with its mood.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketSentiment {
    pub composite: CompositeResult,
    pub mood: MarketMood,
    /// Regime of the VIX reading, when there was one.
    pub vix_regime: Option<VixRegime>,
}

/// Scores macro indicators and combines them.
#[derive(Debug, Clone)]
pub struct MarketSentimentEngine {
    weights: MarketWeights,
    aggregator: WeightedCompositeAggregator,
    vix: BandTable<VixRegime>,
    advance_decline: BandTable<f64>,
    put_call: BandTable<f64>,
    fear_greed: BandTable<f64>,
    mood: BandTable<MarketMood>,
}

impl MarketSentimentEngine {
    /// Create an engine with the given indicator weights.
    pub fn new(weights: &MarketWeights) -> Result<Self> {
        weights.validate()?;

        let vix = BandTable::new(
            vec![
                Band::new(Unbounded, Excluded(15.0), VixRegime::Complacent),
                Band::new(Included(15.0), Excluded(25.0), VixRegime::Normal),
                Band::new(Included(25.0), Excluded(35.0), VixRegime::Fearful),
                Band::new(Included(35.0), Unbounded, VixRegime::Panic),
            ],
            VixRegime::Normal,
        )?;

        let advance_decline = BandTable::new(
            vec![
                Band::new(Excluded(5.0), Unbounded, 0.6),
                Band::new(Excluded(0.0), Included(5.0), 0.2),
                Band::new(Excluded(-5.0), Included(0.0), -0.2),
                Band::new(Unbounded, Included(-5.0), -0.6),
            ],
            0.0,
        )?;

        // High put/call is read as a contrarian buy at the extreme
        let put_call = BandTable::new(
            vec![
                Band::new(Excluded(1.5), Unbounded, 0.3),
                Band::new(Excluded(1.0), Included(1.5), -0.4),
                Band::new(Excluded(0.7), Included(1.0), 0.0),
                Band::new(Unbounded, Included(0.7), 0.4),
            ],
            0.0,
        )?;

        let fear_greed = BandTable::new(
            vec![
                Band::new(Unbounded, Excluded(25.0), -0.8),
                Band::new(Included(25.0), Excluded(45.0), -0.4),
                Band::new(Included(45.0), Excluded(55.0), 0.0),
                Band::new(Included(55.0), Excluded(75.0), 0.4),
                Band::new(Included(75.0), Unbounded, 0.8),
            ],
            0.0,
        )?;

        let mood = BandTable::new(
            vec![
                Band::new(Excluded(0.4), Unbounded, MarketMood::Bullish),
                Band::new(Excluded(0.1), Included(0.4), MarketMood::SlightlyBullish),
                Band::new(Excluded(-0.1), Included(0.1), MarketMood::Neutral),
                Band::new(Excluded(-0.4), Included(-0.1), MarketMood::SlightlyBearish),
                Band::new(Unbounded, Included(-0.4), MarketMood::Bearish),
            ],
            MarketMood::Neutral,
        )?;

        Ok(Self {
            weights: weights.clone(),
            aggregator: WeightedCompositeAggregator::new(),
            vix,
            advance_decline,
            put_call,
            fear_greed,
            mood,
        })
    }

    /// Regime of a VIX reading.
    pub fn vix_regime(&self, vix: f64) -> Option<VixRegime> {
        finite(vix).map(|v| self.vix.classify(v))
    }

    /// Breadth sub-score from whichever exchange readings are available.
    pub fn advance_decline_score(&self, nyse_pct: Option<f64>, nasdaq_pct: Option<f64>) -> Option<f64> {
        let readings: Vec<f64> = [nyse_pct, nasdaq_pct]
            .into_iter()
            .flatten()
            .filter(|v| v.is_finite())
            .collect();
        if readings.is_empty() {
            return None;
        }
        let avg = readings.iter().sum::<f64>() / readings.len() as f64;
        Some(self.advance_decline.classify(avg))
    }

    /// Options positioning sub-score.
    pub fn put_call_score(&self, volume: &PutCallVolume) -> Option<f64> {
        volume.ratio().map(|r| self.put_call.classify(r))
    }

    /// SPY breadth sub-score. Needs a VIX reading to tell broad from narrow strength.
    pub fn spy_breadth_score(&self, spy_return_pct: f64, vix: f64) -> Option<f64> {
        let ret = finite(spy_return_pct)?;
        let vix = finite(vix)?;
        let score = if ret > 0.0 && vix > 20.0 {
            0.1
        } else if ret > 0.0 {
            0.6
        } else if ret < -5.0 {
            -0.6
        } else {
            0.0
        };
        Some(score)
    }

    /// Fear & greed index (0-100) as a score. Not part of the composite.
    pub fn fear_greed_score(&self, index: f64) -> Option<f64> {
        finite(index).map(|v| self.fear_greed.classify(v))
    }

    /// Mood of a composite score.
    pub fn mood(&self, score: f64) -> MarketMood {
        self.mood.classify(score)
    }

    /// Weighted sub-scores for a set of readings, absent where data is missing.
    pub fn sub_scores(&self, indicators: &MarketIndicators) -> Vec<NamedSubScore> {
        let vix_score = indicators
            .vix
            .and_then(|v| self.vix_regime(v))
            .map(VixRegime::score);
        let ad_score = self.advance_decline_score(indicators.nyse_ad_pct, indicators.nasdaq_ad_pct);
        let pc_score = indicators
            .put_call
            .as_ref()
            .and_then(|v| self.put_call_score(v));
        let spy_score = match (indicators.spy_return_pct, indicators.vix) {
            (Some(ret), Some(vix)) => self.spy_breadth_score(ret, vix),
            _ => None,
        };

        vec![
            NamedSubScore::from_option("vix", vix_score, self.weights.vix),
            NamedSubScore::from_option("advance_decline", ad_score, self.weights.advance_decline),
            NamedSubScore::from_option("put_call", pc_score, self.weights.put_call),
            NamedSubScore::from_option("spy_breadth", spy_score, self.weights.spy_breadth),
        ]
    }

    /// Evaluate overall market sentiment.
    pub fn evaluate(&self, indicators: &MarketIndicators) -> Result<MarketSentiment> {
        let composite = self.aggregator.aggregate(&self.sub_scores(indicators))?;
        let mood = self.mood(composite.score());
        Ok(MarketSentiment {
            composite,
            mood,
            vix_regime: indicators.vix.and_then(|v| self.vix_regime(v)),
        })
    }
}

fn finite(value: f64) -> Option<f64> {
    Some(value).filter(|v| v.is_finite())
}
