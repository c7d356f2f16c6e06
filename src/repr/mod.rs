//! In-memory model representations.

pub mod forest;
pub mod tree;

pub use forest::{ForestValidationError, RegressionForest};
pub use tree::{Tree, TreeValidationError};

/// Index of a node within a single tree.
pub type NodeId = u32;
