//! Confidence scoring from the spread of per-tree estimates.

use log::debug;

use crate::utils::{population_std_dev, round_to_places};

/// Confidence reported when the tree spread cannot be measured.
pub const DEFAULT_CONFIDENCE: f64 = 85.0;

/// Derive a confidence percentage from per-tree estimates.
///
/// Trees that agree closely yield high confidence; the score is
/// `100 - 2 * std_dev` of the estimates (population standard deviation),
/// clamped to `[0, 100]` and rounded to one decimal place. An empty slice
/// or a non-finite spread falls back to [`DEFAULT_CONFIDENCE`].
pub fn from_tree_spread(tree_predictions: &[f64]) -> f64 {
    if tree_predictions.is_empty() {
        debug!("no tree estimates available, using default confidence");
        return DEFAULT_CONFIDENCE;
    }

    let spread = population_std_dev(tree_predictions);
    if !spread.is_finite() {
        debug!("tree estimate spread is not finite, using default confidence");
        return DEFAULT_CONFIDENCE;
    }

    round_to_places((100.0 - 2.0 * spread).clamp(0.0, 100.0), 1)
}
