//! Conversion between runtime types and schema types.
//!
//! Runtime to schema is lossless (`From`); schema to runtime re-checks the
//! shape invariants a file could violate (`TryFrom`). Structural soundness
//! of the whole bundle (tree topology, cross-artifact feature counts) is
//! verified separately when the bundle is assembled.

use std::collections::{BTreeMap, HashSet};

use super::error::ReadError;
use super::schema::{
    EncodersSchema, ModelSchema, ScalerSchema, TreeSchema, FORMAT_VERSION,
};
use crate::encoding::{CategoryEncoder, CategoryEncoders};
use crate::repr::{NodeId, RegressionForest, Tree};
use crate::scaling::StandardScaler;

/// Reject artifacts written under a different format revision.
pub(crate) fn check_version(found: u32) -> Result<(), ReadError> {
    if found != FORMAT_VERSION {
        return Err(ReadError::UnsupportedVersion {
            found,
            current: FORMAT_VERSION,
        });
    }
    Ok(())
}

// =============================================================================
// Tree / forest conversions
// =============================================================================

impl From<&Tree> for TreeSchema {
    fn from(tree: &Tree) -> Self {
        let n_nodes = tree.n_nodes();
        let mut split_indices = Vec::with_capacity(n_nodes);
        let mut thresholds = Vec::with_capacity(n_nodes);
        let mut children_left = Vec::with_capacity(n_nodes);
        let mut children_right = Vec::with_capacity(n_nodes);
        let mut leaf_values = Vec::with_capacity(n_nodes);

        // Zero out the fields a node side does not use so the output is
        // canonical regardless of how the runtime tree was built.
        for node in 0..n_nodes as NodeId {
            let leaf = tree.is_leaf(node);
            split_indices.push(if leaf { 0 } else { tree.split_index(node) });
            thresholds.push(if leaf { 0.0 } else { tree.split_threshold(node) });
            children_left.push(if leaf { 0 } else { tree.left_child(node) });
            children_right.push(if leaf { 0 } else { tree.right_child(node) });
            leaf_values.push(if leaf { tree.leaf_value(node) } else { 0.0 });
        }

        Self {
            num_nodes: n_nodes as u32,
            split_indices,
            thresholds,
            children_left,
            children_right,
            leaf_values,
        }
    }
}

impl TryFrom<TreeSchema> for Tree {
    type Error = ReadError;

    fn try_from(schema: TreeSchema) -> Result<Self, Self::Error> {
        let n_nodes = schema.num_nodes as usize;

        let arrays = [
            ("split_indices", schema.split_indices.len()),
            ("thresholds", schema.thresholds.len()),
            ("children_left", schema.children_left.len()),
            ("children_right", schema.children_right.len()),
            ("leaf_values", schema.leaf_values.len()),
        ];
        for (name, len) in arrays {
            if len != n_nodes {
                return Err(ReadError::Validation(format!(
                    "tree array {name} has {len} entries, expected {n_nodes}"
                )));
            }
        }

        // A node is a leaf iff both child slots carry the 0 marker.
        let mut is_leaf = Vec::with_capacity(n_nodes);
        for node in 0..n_nodes {
            let left = schema.children_left[node];
            let right = schema.children_right[node];
            if (left == 0) != (right == 0) {
                return Err(ReadError::Validation(format!(
                    "tree node {node} has exactly one child (left {left}, right {right})"
                )));
            }
            is_leaf.push(left == 0);
        }

        Ok(Tree::new(
            schema.split_indices,
            schema.thresholds,
            schema.children_left,
            schema.children_right,
            is_leaf,
            schema.leaf_values,
        ))
    }
}

impl From<&RegressionForest> for ModelSchema {
    fn from(forest: &RegressionForest) -> Self {
        Self {
            version: FORMAT_VERSION,
            n_features: forest.n_features(),
            trees: forest.trees().map(TreeSchema::from).collect(),
        }
    }
}

impl TryFrom<ModelSchema> for RegressionForest {
    type Error = ReadError;

    fn try_from(schema: ModelSchema) -> Result<Self, Self::Error> {
        check_version(schema.version)?;

        let n_features = schema.n_features;
        let trees = schema
            .trees
            .into_iter()
            .map(Tree::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(RegressionForest::from_trees(trees, n_features))
    }
}

// =============================================================================
// Scaler conversions
// =============================================================================

impl From<&StandardScaler> for ScalerSchema {
    fn from(scaler: &StandardScaler) -> Self {
        Self {
            version: FORMAT_VERSION,
            mean: scaler.means().to_vec(),
            scale: scaler.scales().to_vec(),
        }
    }
}

impl TryFrom<ScalerSchema> for StandardScaler {
    type Error = ReadError;

    fn try_from(schema: ScalerSchema) -> Result<Self, Self::Error> {
        check_version(schema.version)?;

        StandardScaler::new(schema.mean, schema.scale)
            .map_err(|e| ReadError::Validation(format!("invalid scaler parameters: {e}")))
    }
}

// =============================================================================
// Encoder conversions
// =============================================================================

impl From<&CategoryEncoders> for EncodersSchema {
    fn from(encoders: &CategoryEncoders) -> Self {
        let columns = encoders
            .iter()
            .map(|(column, encoder)| (column.to_owned(), encoder.classes().to_vec()))
            .collect();

        Self {
            version: FORMAT_VERSION,
            columns,
        }
    }
}

impl TryFrom<EncodersSchema> for CategoryEncoders {
    type Error = ReadError;

    fn try_from(schema: EncodersSchema) -> Result<Self, Self::Error> {
        check_version(schema.version)?;

        let mut by_column = BTreeMap::new();
        for (column, classes) in schema.columns {
            if classes.is_empty() {
                return Err(ReadError::Validation(format!(
                    "encoder for column {column:?} has no classes"
                )));
            }

            let mut seen = HashSet::new();
            for label in &classes {
                if !seen.insert(label.as_str()) {
                    return Err(ReadError::Validation(format!(
                        "encoder for column {column:?} lists class {label:?} twice"
                    )));
                }
            }

            by_column.insert(column, CategoryEncoder::new(classes));
        }

        Ok(CategoryEncoders::new(by_column))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{demo_encoders, split_tree};

    #[test]
    fn tree_round_trips_canonically() {
        let tree = split_tree(1, 0.5, 10.0, 20.0);
        let schema = TreeSchema::from(&tree);

        assert_eq!(schema.num_nodes, 3);
        assert_eq!(schema.children_left, vec![1, 0, 0]);
        assert_eq!(schema.children_right, vec![2, 0, 0]);
        // Unused split fields of leaves are canonicalized to zero.
        assert_eq!(schema.leaf_values, vec![0.0, 10.0, 20.0]);

        let back = Tree::try_from(schema).unwrap();
        assert_eq!(back.predict_row(&[0.0, 0.4]), 10.0);
        assert_eq!(back.predict_row(&[0.0, 0.6]), 20.0);
    }

    #[test]
    fn tree_with_short_array_is_rejected() {
        let schema = TreeSchema {
            num_nodes: 3,
            split_indices: vec![1, 0, 0],
            thresholds: vec![0.5, 0.0, 0.0],
            children_left: vec![1, 0],
            children_right: vec![2, 0, 0],
            leaf_values: vec![0.0, 10.0, 20.0],
        };

        let err = Tree::try_from(schema).unwrap_err();
        assert!(matches!(err, ReadError::Validation(msg) if msg.contains("children_left")));
    }

    #[test]
    fn tree_with_half_leaf_node_is_rejected() {
        let schema = TreeSchema {
            num_nodes: 3,
            split_indices: vec![1, 0, 0],
            thresholds: vec![0.5, 0.0, 0.0],
            children_left: vec![1, 0, 0],
            children_right: vec![0, 0, 0],
            leaf_values: vec![0.0, 10.0, 20.0],
        };

        let err = Tree::try_from(schema).unwrap_err();
        assert!(matches!(err, ReadError::Validation(msg) if msg.contains("exactly one child")));
    }

    #[test]
    fn forest_version_mismatch_is_rejected() {
        let schema = ModelSchema {
            version: 99,
            n_features: 1,
            trees: vec![],
        };

        let err = RegressionForest::try_from(schema).unwrap_err();
        assert!(matches!(
            err,
            ReadError::UnsupportedVersion { found: 99, current: FORMAT_VERSION }
        ));
    }

    #[test]
    fn scaler_rejects_zero_scale_from_schema() {
        let schema = ScalerSchema {
            version: FORMAT_VERSION,
            mean: vec![0.0, 0.0],
            scale: vec![1.0, 0.0],
        };

        let err = StandardScaler::try_from(schema).unwrap_err();
        assert!(matches!(err, ReadError::Validation(msg) if msg.contains("scaler")));
    }

    #[test]
    fn encoders_round_trip_preserves_class_order() {
        let encoders = demo_encoders();
        let schema = EncodersSchema::from(&encoders);
        let back = CategoryEncoders::try_from(schema).unwrap();

        let gender = back.get("gender").unwrap();
        assert_eq!(gender.classes(), ["Female", "Male"]);
        assert_eq!(gender.code("Male"), Some(1));
    }

    #[test]
    fn encoders_with_duplicate_class_are_rejected() {
        let mut columns = BTreeMap::new();
        columns.insert(
            "lunch".to_owned(),
            vec!["standard".to_owned(), "standard".to_owned()],
        );
        let schema = EncodersSchema {
            version: FORMAT_VERSION,
            columns,
        };

        let err = CategoryEncoders::try_from(schema).unwrap_err();
        assert!(matches!(err, ReadError::Validation(msg) if msg.contains("twice")));
    }

    #[test]
    fn encoders_with_empty_class_list_are_rejected() {
        let mut columns = BTreeMap::new();
        columns.insert("lunch".to_owned(), vec![]);
        let schema = EncodersSchema {
            version: FORMAT_VERSION,
            columns,
        };

        let err = CategoryEncoders::try_from(schema).unwrap_err();
        assert!(matches!(err, ReadError::Validation(msg) if msg.contains("no classes")));
    }
}
