//! Ticker and time-window selection of scored items.

use chrono::{DateTime, Days, Utc};
use serde::{Deserialize, Serialize};
use sentiment_core::config::SummaryConfig;
use sentiment_core::SentimentResult;

/// A sentiment result tagged with its ticker and time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredItem {
    pub ticker: String,
    pub timestamp: DateTime<Utc>,
    pub result: SentimentResult,
}

/// Look-back window for one ticker, inclusive at both ends.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeWindow {
    pub ticker: String,
    pub days: u32,
    pub as_of: DateTime<Utc>,
}

impl TimeWindow {
    pub fn new(ticker: impl Into<String>, days: u32, as_of: DateTime<Utc>) -> Self {
        Self {
            ticker: ticker.into(),
            days,
            as_of,
        }
    }

    /// Window using the configured default look-back.
    pub fn from_config(ticker: impl Into<String>, config: &SummaryConfig, as_of: DateTime<Utc>) -> Self {
        Self::new(ticker, config.window_days, as_of)
    }

    /// Earliest included timestamp.
    pub fn start(&self) -> DateTime<Utc> {
        self.as_of
            .checked_sub_days(Days::new(u64::from(self.days)))
            .unwrap_or(DateTime::<Utc>::MIN_UTC)
    }

    /// Whether an item belongs to this window. Tickers compare case-insensitively.
    pub fn contains(&self, item: &ScoredItem) -> bool {
        item.ticker.eq_ignore_ascii_case(&self.ticker)
            && item.timestamp >= self.start()
            && item.timestamp <= self.as_of
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(day: u32, hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, day, hour, 0, 0).unwrap()
    }

    fn item(ticker: &str, timestamp: DateTime<Utc>) -> ScoredItem {
        ScoredItem {
            ticker: ticker.to_string(),
            timestamp,
            result: SentimentResult::empty(),
        }
    }

    #[test]
    fn test_window_bounds() {
        let window = TimeWindow::new("TSLA", 7, at(15, 12));
        assert_eq!(window.start(), at(8, 12));

        assert!(window.contains(&item("TSLA", at(8, 12))));
        assert!(window.contains(&item("TSLA", at(15, 12))));
        assert!(!window.contains(&item("TSLA", at(8, 11))));
        assert!(!window.contains(&item("TSLA", at(15, 13))));
    }

    #[test]
    fn test_ticker_match_ignores_case() {
        let window = TimeWindow::new("tsla", 7, at(15, 12));
        assert!(window.contains(&item("TSLA", at(10, 0))));
        assert!(!window.contains(&item("AAPL", at(10, 0))));
    }

    #[test]
    fn test_from_config() {
        let window = TimeWindow::from_config("AAPL", &SummaryConfig::default(), at(31, 0));
        assert_eq!(window.days, 30);
        assert_eq!(window.start(), Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap());
    }
}
