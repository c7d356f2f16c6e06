//! Grade prediction over a loaded artifact bundle.
//!
//! [`GradePredictor::from_dir`] never fails: a predictor built over a
//! missing or invalid bundle stays up and reports the load failure from
//! every prediction instead. Host processes construct one predictor at
//! startup and share it read-only across requests.

use std::path::Path;

use log::{info, warn};
use serde::Serialize;
use thiserror::Error;

use crate::confidence;
use crate::encoding::{self, EncodeError};
use crate::persist::ArtifactBundle;
use crate::record::StudentRecord;
use crate::scaling::ScaleError;
use crate::utils::{mean, round_to_places};

/// A scored prediction for one student.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Prediction {
    /// Predicted grade on the 0-100 scale, rounded to 2 decimal places.
    pub grade: f64,
    /// Ensemble agreement as a percentage, rounded to 1 decimal place.
    pub confidence: f64,
}

/// Errors from a single prediction request.
#[derive(Debug, Error)]
pub enum PredictError {
    /// No artifact bundle is available to serve from.
    #[error("model not loaded: {reason}")]
    NotLoaded { reason: String },

    /// The record could not be turned into a feature vector.
    #[error("failed to encode input: {0}")]
    Encode(#[from] EncodeError),

    /// The feature vector does not fit the loaded scaler.
    #[error("failed to scale features: {0}")]
    Scale(#[from] ScaleError),
}

enum BundleState {
    Loaded(ArtifactBundle),
    Unloaded { reason: String },
}

/// Student grade predictor backed by a random-forest artifact bundle.
pub struct GradePredictor {
    state: BundleState,
}

impl GradePredictor {
    /// Serve from an already validated bundle.
    pub fn new(bundle: ArtifactBundle) -> Self {
        Self {
            state: BundleState::Loaded(bundle),
        }
    }

    /// Load artifacts from a directory.
    ///
    /// Never fails: on a load error the predictor comes up unloaded and
    /// every subsequent prediction returns [`PredictError::NotLoaded`]
    /// carrying the reason.
    pub fn from_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();

        match ArtifactBundle::load_dir(dir) {
            Ok(bundle) => {
                info!(
                    "loaded artifact bundle from {}: {} trees over {} features",
                    dir.display(),
                    bundle.forest().n_trees(),
                    bundle.n_features()
                );
                Self::new(bundle)
            }
            Err(e) => {
                warn!("failed to load artifact bundle from {}: {e}", dir.display());
                Self {
                    state: BundleState::Unloaded {
                        reason: e.to_string(),
                    },
                }
            }
        }
    }

    /// Whether a bundle is loaded and serving.
    pub fn is_loaded(&self) -> bool {
        matches!(self.state, BundleState::Loaded(_))
    }

    /// The loaded bundle, if any.
    pub fn bundle(&self) -> Option<&ArtifactBundle> {
        match &self.state {
            BundleState::Loaded(bundle) => Some(bundle),
            BundleState::Unloaded { .. } => None,
        }
    }

    /// Why the bundle failed to load, if it did.
    pub fn load_failure(&self) -> Option<&str> {
        match &self.state {
            BundleState::Loaded(_) => None,
            BundleState::Unloaded { reason } => Some(reason),
        }
    }

    /// Predict a grade with a confidence percentage for one student.
    ///
    /// Runs encode, scale, and ensemble prediction in sequence. The grade
    /// is the mean of the per-tree estimates; confidence reflects their
    /// spread and degrades to a default rather than failing the request.
    pub fn predict_grade(&self, record: &StudentRecord) -> Result<Prediction, PredictError> {
        let bundle = match &self.state {
            BundleState::Loaded(bundle) => bundle,
            BundleState::Unloaded { reason } => {
                return Err(PredictError::NotLoaded {
                    reason: reason.clone(),
                });
            }
        };

        let features =
            encoding::encode_features(record, bundle.encoders(), bundle.feature_columns())?;
        let scaled = bundle.scaler().transform(&features)?;

        let per_tree = bundle.forest().tree_predictions(&scaled);
        let grade = round_to_places(mean(&per_tree), 2);
        let confidence = confidence::from_tree_spread(&per_tree);

        Ok(Prediction { grade, confidence })
    }
}

impl std::fmt::Debug for GradePredictor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.state {
            BundleState::Loaded(bundle) => f
                .debug_struct("GradePredictor")
                .field("loaded", &true)
                .field("n_trees", &bundle.forest().n_trees())
                .field("n_features", &bundle.n_features())
                .finish(),
            BundleState::Unloaded { reason } => f
                .debug_struct("GradePredictor")
                .field("loaded", &false)
                .field("reason", reason)
                .finish(),
        }
    }
}
