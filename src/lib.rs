//! gradecast: student grade prediction from trained random-forest artifacts.
//!
//! Serves single-student grade predictions from a directory of JSON
//! artifacts exported by offline training: a random-forest ensemble, a
//! standard scaler, per-column category vocabularies, and the ordered
//! feature-column list. Artifacts are validated once at load; a loaded
//! predictor is immutable and shareable across requests.
//!
//! # Key Types
//!
//! - [`GradePredictor`] - High-level predictor with fail-soft loading
//! - [`ArtifactBundle`] - The four trained artifacts, validated as a set
//! - [`StudentRecord`] - Raw input for one student
//! - [`Prediction`] - Predicted grade plus confidence percentage
//! - [`recommend`] - Ranked improvement suggestions
//!
//! # Predicting
//!
//! ```
//! use gradecast::{recommend, GradePredictor};
//! use gradecast::testing::{demo_bundle, sample_record};
//!
//! let predictor = GradePredictor::new(demo_bundle(&[62.0, 58.0]));
//! let record = sample_record();
//!
//! let prediction = predictor.predict_grade(&record)?;
//! assert_eq!(prediction.grade, 60.0);
//! assert_eq!(prediction.confidence, 96.0);
//!
//! let suggestions = recommend(&record, prediction.grade);
//! assert!(!suggestions.is_empty());
//! # Ok::<(), gradecast::PredictError>(())
//! ```
//!
//! Production deployments load from disk instead: [`GradePredictor::from_dir`]
//! never fails, and an unloaded predictor reports the load failure from every
//! prediction.

pub mod confidence;
pub mod encoding;
pub mod persist;
pub mod predictor;
pub mod recommend;
pub mod record;
pub mod repr;
pub mod scaling;
pub mod testing;
pub mod utils;

// =============================================================================
// Convenience Re-exports
// =============================================================================

// High-level prediction surface
pub use persist::{ArtifactBundle, ReadError, WriteError};
pub use predictor::{GradePredictor, PredictError, Prediction};
pub use recommend::{recommend, Impact, Recommendation};
pub use record::StudentRecord;

// Pipeline stages (for callers assembling bundles by hand)
pub use encoding::{CategoryEncoder, CategoryEncoders, EncodeError};
pub use repr::{RegressionForest, Tree};
pub use scaling::{ScaleError, StandardScaler};
