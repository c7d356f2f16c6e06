//! Forest of regression trees with mean aggregation.

use crate::repr::tree::{Tree, TreeValidationError};

/// Validation errors for [`RegressionForest`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ForestValidationError {
    /// Forest contains no trees.
    NoTrees,
    /// A member tree failed structural validation.
    InvalidTree {
        tree_idx: usize,
        error: TreeValidationError,
    },
}

/// A trained random-forest regressor.
///
/// Each tree produces an independent estimate for a sample; the forest
/// prediction is the unweighted mean of those estimates. Per-tree estimates
/// are also exposed directly so callers can measure their spread.
#[derive(Debug, Clone)]
pub struct RegressionForest {
    trees: Vec<Tree>,
    n_features: usize,
}

impl RegressionForest {
    /// Create a forest over a fixed feature count.
    pub fn new(n_features: usize) -> Self {
        Self {
            trees: Vec::new(),
            n_features,
        }
    }

    /// Create a forest from trained trees.
    pub fn from_trees(trees: Vec<Tree>, n_features: usize) -> Self {
        Self { trees, n_features }
    }

    /// Append a tree to the ensemble.
    pub fn push_tree(&mut self, tree: Tree) {
        self.trees.push(tree);
    }

    /// Number of trees in the ensemble.
    #[inline]
    pub fn n_trees(&self) -> usize {
        self.trees.len()
    }

    /// Number of features each tree expects.
    #[inline]
    pub fn n_features(&self) -> usize {
        self.n_features
    }

    /// Iterate over the member trees.
    pub fn trees(&self) -> impl Iterator<Item = &Tree> {
        self.trees.iter()
    }

    /// Per-tree estimates for a single sample, in tree order.
    ///
    /// `features` must have at least [`n_features`](Self::n_features)
    /// entries; validated forests never index past that.
    pub fn tree_predictions(&self, features: &[f64]) -> Vec<f64> {
        self.trees
            .iter()
            .map(|tree| tree.predict_row(features))
            .collect()
    }

    /// Forest prediction for a single sample: the mean of all tree
    /// estimates. Returns NaN for an empty forest.
    pub fn predict_row(&self, features: &[f64]) -> f64 {
        if self.trees.is_empty() {
            return f64::NAN;
        }

        let sum: f64 = self
            .trees
            .iter()
            .map(|tree| tree.predict_row(features))
            .sum();
        sum / self.trees.len() as f64
    }

    /// Validate the ensemble: at least one tree, and every tree structurally
    /// sound against the declared feature count.
    pub fn validate(&self) -> Result<(), ForestValidationError> {
        if self.trees.is_empty() {
            return Err(ForestValidationError::NoTrees);
        }

        for (tree_idx, tree) in self.trees.iter().enumerate() {
            tree.validate(self.n_features)
                .map_err(|error| ForestValidationError::InvalidTree { tree_idx, error })?;
        }

        Ok(())
    }
}
