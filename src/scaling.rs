//! Fitted standardization applied to encoded feature vectors.
//!
//! The transform is `(x - mean) / scale` per feature, with parameters fitted
//! once by the external training job and never refitted here. The training
//! library replaces zero variance with a unit scale, so a zero or non-finite
//! scale in an artifact means the file is corrupt; construction rejects it.

use thiserror::Error;

/// Errors produced while building or applying a [`StandardScaler`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ScaleError {
    /// The input vector length does not match the fitted width.
    #[error("scaler fitted for {expected} features, got {got}")]
    LengthMismatch { expected: usize, got: usize },
    /// Mean and scale parameter arrays disagree in length.
    #[error("mean/scale length mismatch: {n_means} means, {n_scales} scales")]
    MismatchedParameters { n_means: usize, n_scales: usize },
    /// A scale entry is zero or non-finite.
    #[error("invalid scale {value} for feature {index}")]
    InvalidScale { index: usize, value: f64 },
}

/// Fitted per-feature standardization parameters.
#[derive(Debug, Clone)]
pub struct StandardScaler {
    means: Box<[f64]>,
    scales: Box<[f64]>,
}

impl StandardScaler {
    /// Build a scaler from fitted means and scales.
    pub fn new(means: Vec<f64>, scales: Vec<f64>) -> Result<Self, ScaleError> {
        if means.len() != scales.len() {
            return Err(ScaleError::MismatchedParameters {
                n_means: means.len(),
                n_scales: scales.len(),
            });
        }
        for (index, &value) in scales.iter().enumerate() {
            if !value.is_finite() || value == 0.0 {
                return Err(ScaleError::InvalidScale { index, value });
            }
        }

        Ok(Self {
            means: means.into_boxed_slice(),
            scales: scales.into_boxed_slice(),
        })
    }

    /// Number of features the scaler was fitted for.
    pub fn n_features(&self) -> usize {
        self.means.len()
    }

    /// Fitted per-feature means.
    pub fn means(&self) -> &[f64] {
        &self.means
    }

    /// Fitted per-feature scales.
    pub fn scales(&self) -> &[f64] {
        &self.scales
    }

    /// Standardize `features`, returning the model-ready vector.
    pub fn transform(&self, features: &[f64]) -> Result<Vec<f64>, ScaleError> {
        if features.len() != self.n_features() {
            return Err(ScaleError::LengthMismatch {
                expected: self.n_features(),
                got: features.len(),
            });
        }

        Ok(features
            .iter()
            .zip(self.means.iter().zip(self.scales.iter()))
            .map(|(&value, (&mean, &scale))| (value - mean) / scale)
            .collect())
    }
}
