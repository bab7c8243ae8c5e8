//! # Taxon Similarity
//!
//! Independent similarity signals between a piece of schema text and a
//! candidate taxonomy label, and their fusion into one auditable score.
//!
//! ## Signals
//!
//! - **Word match** ([`LexicalSimilarity`]): Ratcliff/Obershelp ratio of the normalized strings
//! - **Pattern** ([`PatternSimilarity`]): `_TABLE` / `_COLUMN` style naming conventions
//! - **Semantic** ([`SemanticSimilarity`]): coverage of the text by the label's taxonomy terms
//! - **Embedding** ([`EmbeddingSimilarity`]): cosine of averaged word vectors
//!
//! Signals never fail. When a value cannot be computed the scorer returns
//! the neutral default (0.5) and records a [`SignalDiagnostic`].
//!
//! ## Example
//!
//! ```rust
//! use taxon_similarity::{combine, FusionWeights, LexicalSimilarity, SignalScorer, SignalSet};
//!
//! let lexical = LexicalSimilarity::new();
//! let signals = SignalSet {
//!     word_match: lexical.score("order_id", "order id"),
//!     pattern: 0.5,
//!     semantic: 1.0,
//!     embedding: 0.5,
//!     base: 0.9,
//!     diagnostics: Vec::new(),
//! };
//!
//! let breakdown = combine(&signals, &FusionWeights::default()).unwrap();
//! assert!((breakdown.final_score - 0.97).abs() < 1e-9);
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐
//! │    Text     │     │    Label    │
//! └─────────────┘     └─────────────┘
//!        │                   │
//!        └─────────┬─────────┘
//!                  │
//!   ┌──────────┬───┴──────┬───────────┐
//!   ▼          ▼          ▼           ▼
//! Lexical   Pattern   Semantic   Embedding     + base probability
//!   │          │          │           │
//!   └──────────┴────┬─────┴───────────┘
//!                   ▼
//!            ┌─────────────┐
//!            │ ScoreFusion │──> ScoreBreakdown
//!            └─────────────┘
//! ```

pub mod embedding;
pub mod explain;
pub mod fusion;
pub mod lexical;
pub mod pattern;
pub mod scorer;
pub mod semantic;

pub use embedding::EmbeddingSimilarity;
pub use explain::{
    PredictionResult, PredictionStats, ScoreBreakdown, Signal, SignalDiagnostic, SignalScore,
};
pub use fusion::{combine, Calibration, FusionWeights, ScoreFusion, SignalSet, WEIGHT_TOLERANCE};
pub use lexical::LexicalSimilarity;
pub use pattern::PatternSimilarity;
pub use scorer::{SignalScorer, NEUTRAL_SCORE};
pub use semantic::SemanticSimilarity;
