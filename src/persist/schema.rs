//! Schema types for artifact serialization.
//!
//! These types provide a stable on-disk format independent of runtime types.
//! Schema types are separate from runtime types for:
//! - Forward/backward compatibility (schema can evolve independently)
//! - Validation during deserialization
//! - Clear migration paths between schema versions
//!
//! Encoder vocabularies use `BTreeMap` for deterministic JSON output.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Current artifact format version, written into every artifact file.
pub const FORMAT_VERSION: u32 = 1;

/// Tree schema (SoA layout).
///
/// Parallel arrays indexed by node id; node 0 is the root. A child index of
/// 0 marks the parent slot as a leaf (the root can never be a child).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TreeSchema {
    /// Number of nodes (internal + leaves).
    pub num_nodes: u32,
    /// Split feature index for each node (ignored at leaves).
    pub split_indices: Vec<u32>,
    /// Split threshold for each node (ignored at leaves).
    pub thresholds: Vec<f64>,
    /// Left child index for each node (0 = leaf marker).
    pub children_left: Vec<u32>,
    /// Right child index for each node (0 = leaf marker).
    pub children_right: Vec<u32>,
    /// Leaf value for each node (ignored at internal nodes).
    pub leaf_values: Vec<f64>,
}

/// Random-forest model schema.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelSchema {
    /// Artifact format version.
    pub version: u32,
    /// Number of features every tree expects.
    pub n_features: usize,
    /// Ensemble members in prediction order.
    pub trees: Vec<TreeSchema>,
}

/// Standard-scaler schema.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScalerSchema {
    /// Artifact format version.
    pub version: u32,
    /// Per-feature means subtracted before scaling.
    pub mean: Vec<f64>,
    /// Per-feature scale divisors.
    pub scale: Vec<f64>,
}

/// Per-column category vocabulary schema.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EncodersSchema {
    /// Artifact format version.
    pub version: u32,
    /// Raw column name to its ordered class list; a label's position is its
    /// integer code.
    pub columns: BTreeMap<String, Vec<String>>,
}

/// Ordered feature-column list schema.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeatureColumnsSchema {
    /// Artifact format version.
    pub version: u32,
    /// Feature column names in model input order.
    pub columns: Vec<String>,
}

impl FeatureColumnsSchema {
    /// Consume the schema and return the ordered column names.
    pub fn into_columns(self) -> Vec<String> {
        self.columns
    }
}
