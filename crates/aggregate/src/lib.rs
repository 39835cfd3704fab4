//! Weighted composites of independently scored signals.
//!
//! - [`WeightedCompositeAggregator`]: renormalizing weighted reducer
//! - [`MarketSentimentEngine`]: macro indicators (VIX, breadth, options)
//! - [`OwnershipScorer`]: institutional holder changes and insider trades

pub mod composite;
pub mod market;
pub mod ownership;

pub use composite::WeightedCompositeAggregator;
pub use market::{
    MarketIndicators, MarketMood, MarketSentiment, MarketSentimentEngine, PutCallVolume, VixRegime,
};
pub use ownership::{
    HolderChange, InsiderTrade, OwnershipScorer, OwnershipSentiment, OwnershipTally,
    TransactionKind,
};
