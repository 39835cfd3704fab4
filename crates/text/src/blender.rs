//! Blends the two lexical models into one sentiment result.
//!
//! The social-text model gets the larger weight. Confidence comes from how
//! closely the two models agree: identical readings give 1, opposite extremes
//! give 0.

use crate::normalizer::TextNormalizer;
use crate::scorer::{DualLexiconScorer, DualScore};
use sentiment_core::config::BlendConfig;
use sentiment_core::{
    clamp_signed, Config, Result, SentimentComponents, SentimentResult, ValenceBreakdown,
};
use tracing::debug;

/// Text sentiment blender.
pub struct SentimentBlender {
    normalizer: TextNormalizer,
    scorer: DualLexiconScorer,
    blend: BlendConfig,
}

impl SentimentBlender {
    /// Create a blender with the built-in lexicons.
    pub fn new(config: &Config) -> Result<Self> {
        config.lexicon.validate()?;
        Self::with_scorer(DualLexiconScorer::new(&config.lexicon), config.blend.clone())
    }

    /// Create a blender around a caller-built scorer.
    pub fn with_scorer(scorer: DualLexiconScorer, blend: BlendConfig) -> Result<Self> {
        blend.validate()?;
        Ok(Self {
            normalizer: TextNormalizer::new()?,
            scorer,
            blend,
        })
    }

    /// The normalizer applied before scoring.
    pub fn normalizer(&self) -> &TextNormalizer {
        &self.normalizer
    }

    /// Analyze one raw text.
    pub fn analyze(&self, text: &str) -> SentimentResult {
        let cleaned = self.normalizer.normalize(text);
        if cleaned.is_empty() {
            debug!(raw_len = text.len(), "empty text after normalization");
            return SentimentResult::empty();
        }

        let dual = self.scorer.score(&cleaned);
        self.blend(&dual)
    }

    /// Analyze several texts independently.
    pub fn analyze_batch<S: AsRef<str>>(&self, texts: &[S]) -> Vec<SentimentResult> {
        texts.iter().map(|t| self.analyze(t.as_ref())).collect()
    }

    /// Combine raw model outputs.
    pub fn blend(&self, dual: &DualScore) -> SentimentResult {
        let general = clamp_signed(dual.general.polarity);
        let social = clamp_signed(dual.social.polarity);

        let score = self.blend.social_weight * social + self.blend.general_weight * general;
        let confidence = 1.0 - (social - general).abs() / 2.0;
        let subjectivity = dual.general.subjectivity.unwrap_or(0.0);

        let breakdown = dual.social.breakdown.unwrap_or_else(ValenceBreakdown::all_neutral);
        let components = SentimentComponents {
            general_polarity: general,
            social_compound: social,
            social_positive: breakdown.positive,
            social_negative: breakdown.negative,
            social_neutral: breakdown.neutral,
        };

        SentimentResult::new(score, confidence, subjectivity, components)
    }
}
