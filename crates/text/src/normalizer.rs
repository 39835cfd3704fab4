//! Raw text cleanup before scoring.
//!
//! Strips URLs and @mentions, drops `#` markers while keeping the hashtag
//! word, and collapses whitespace.

use regex::Regex;
use sentiment_core::{Error, Result};

const URL_PATTERN: &str = r"(?i)\b(?:https?://|www\.)\S+";
const MENTION_PATTERN: &str = r"@\w+";

/// Text normalizer holding its compiled patterns.
#[derive(Debug, Clone)]
pub struct TextNormalizer {
    url: Regex,
    mention: Regex,
}

impl TextNormalizer {
    /// Create a new normalizer.
    pub fn new() -> Result<Self> {
        let url = Regex::new(URL_PATTERN)
            .map_err(|e| Error::config(format!("invalid URL pattern: {e}")))?;
        let mention = Regex::new(MENTION_PATTERN)
            .map_err(|e| Error::config(format!("invalid mention pattern: {e}")))?;
        Ok(Self { url, mention })
    }

    /// Normalize raw text. Never fails; all-noise input yields an empty string.
    pub fn normalize(&self, text: &str) -> String {
        let without_urls = self.url.replace_all(text, " ");
        let without_mentions = self.mention.replace_all(&without_urls, " ");
        let without_hashes = without_mentions.replace('#', "");

        without_hashes.split_whitespace().collect::<Vec<_>>().join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn normalizer() -> TextNormalizer {
        TextNormalizer::new().unwrap()
    }

    #[test]
    fn test_strips_urls_and_mentions() {
        let n = normalizer();
        assert_eq!(
            n.normalize("Check https://t.co/abc123 @trader #AAPL to the moon"),
            "Check AAPL to the moon"
        );
        assert_eq!(n.normalize("see www.example.com/x now"), "see now");
        assert_eq!(n.normalize("HTTP://EXAMPLE.COM loud"), "loud");
    }

    #[test]
    fn test_keeps_hashtag_word() {
        assert_eq!(normalizer().normalize("#bullish #TSLA"), "bullish TSLA");
    }

    #[test]
    fn test_collapses_whitespace() {
        assert_eq!(normalizer().normalize("  great \t\n  earnings   "), "great earnings");
    }

    #[test]
    fn test_all_noise_is_empty() {
        let n = normalizer();
        assert_eq!(n.normalize(""), "");
        assert_eq!(n.normalize("   "), "");
        assert_eq!(n.normalize("@a @b https://x.io #"), "");
    }

    #[test]
    fn test_word_containing_www_is_kept() {
        assert_eq!(normalizer().normalize("awwwesome"), "awwwesome");
    }
}
