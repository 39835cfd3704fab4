//! Text sentiment scoring for the market sentiment engine.
//!
//! This crate handles:
//! - Raw text normalization (URLs, mentions, hashtags, whitespace)
//! - Two independent lexical models (general-purpose and social-text)
//! - Fail-soft dual scoring
//! - Blending into one bounded score with an agreement-based confidence

pub mod normalizer;
pub mod general;
pub mod social;
pub mod scorer;
pub mod blender;

pub use normalizer::TextNormalizer;
pub use general::GeneralLexicon;
pub use social::SocialLexicon;
pub use scorer::{DualLexiconScorer, DualScore, LexicalModel};
pub use blender::SentimentBlender;
