//! Dual lexical scoring with fail-soft model calls.

use crate::general::GeneralLexicon;
use crate::social::SocialLexicon;
use sentiment_core::config::LexiconConfig;
use serde::{Deserialize, Serialize};
use sentiment_core::{LexicalScore, Result};
use tracing::warn;

/// A rule/dictionary-based sentiment model.
pub trait LexicalModel: Send + Sync {
    /// Short model name used in logs.
    fn name(&self) -> &str;

    /// Score already-normalized text.
    fn score(&self, text: &str) -> Result<LexicalScore>;
}

/// Raw, uncombined outputs of both models.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DualScore {
    /// General-purpose model output.
    pub general: LexicalScore,
    /// Social-text model output.
    pub social: LexicalScore,
}

/// Runs a general-purpose and a social-text model over the same text.
pub struct DualLexiconScorer {
    general: Box<dyn LexicalModel>,
    social: Box<dyn LexicalModel>,
}

impl DualLexiconScorer {
    /// Create a scorer with the built-in lexicons.
    pub fn new(config: &LexiconConfig) -> Self {
        Self::with_models(
            Box::new(GeneralLexicon::new(config.max_input_chars)),
            Box::new(SocialLexicon::new(config.max_input_chars)),
        )
    }

    /// Create a scorer from any pair of models.
    pub fn with_models(general: Box<dyn LexicalModel>, social: Box<dyn LexicalModel>) -> Self {
        Self { general, social }
    }

    /// Score text with both models. A failing model contributes its neutral default.
    pub fn score(&self, text: &str) -> DualScore {
        DualScore {
            general: score_or_neutral(self.general.as_ref(), text),
            social: score_or_neutral(self.social.as_ref(), text),
        }
    }
}

fn score_or_neutral(model: &dyn LexicalModel, text: &str) -> LexicalScore {
    match model.score(text) {
        Ok(score) if score.polarity.is_finite() => score,
        Ok(score) => {
            warn!(model = model.name(), polarity = score.polarity, "non-finite polarity, using neutral default");
            LexicalScore::neutral()
        }
        Err(e) => {
            warn!(model = model.name(), error = %e, "lexical model failed, using neutral default");
            LexicalScore::neutral()
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use sentiment_core::Error;
    use tracing_subscriber::EnvFilter;

    fn init_tracing() {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    }

    /// Model returning a fixed score.
    pub(crate) struct FixedModel {
        pub polarity: f64,
        pub subjectivity: Option<f64>,
    }

    impl LexicalModel for FixedModel {
        fn name(&self) -> &str {
            "fixed"
        }

        fn score(&self, _text: &str) -> Result<LexicalScore> {
            Ok(LexicalScore {
                polarity: self.polarity,
                subjectivity: self.subjectivity,
                breakdown: None,
            })
        }
    }

    /// Model that always fails.
    pub(crate) struct FailingModel;

    impl LexicalModel for FailingModel {
        fn name(&self) -> &str {
            "failing"
        }

        fn score(&self, _text: &str) -> Result<LexicalScore> {
            Err(Error::lexicon("malformed input"))
        }
    }

    #[test]
    fn test_builtin_models() {
        let scorer = DualLexiconScorer::new(&LexiconConfig::default());
        let dual = scorer.score("great results");
        assert!(dual.general.polarity > 0.0);
        assert!(dual.social.polarity > 0.0);
        assert!(dual.general.subjectivity.is_some());
        assert!(dual.social.breakdown.is_some());
    }

    #[test]
    fn test_failing_model_degrades_to_neutral() {
        init_tracing();
        let scorer = DualLexiconScorer::with_models(
            Box::new(FailingModel),
            Box::new(FixedModel {
                polarity: 0.4,
                subjectivity: None,
            }),
        );
        let dual = scorer.score("anything");
        assert_eq!(dual.general, LexicalScore::neutral());
        assert_eq!(dual.social.polarity, 0.4);
    }

    #[test]
    fn test_non_finite_polarity_degrades_to_neutral() {
        init_tracing();
        let scorer = DualLexiconScorer::with_models(
            Box::new(FixedModel {
                polarity: f64::NAN,
                subjectivity: Some(0.5),
            }),
            Box::new(FailingModel),
        );
        let dual = scorer.score("anything");
        assert_eq!(dual.general, LexicalScore::neutral());
        assert_eq!(dual.social, LexicalScore::neutral());
    }

    #[test]
    fn test_oversized_input_is_fail_soft() {
        let scorer = DualLexiconScorer::new(&LexiconConfig { max_input_chars: 4 });
        let dual = scorer.score("great results");
        assert_eq!(dual.general.polarity, 0.0);
        assert_eq!(dual.social.polarity, 0.0);
    }
}
