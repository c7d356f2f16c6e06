//! Structure-of-arrays regression tree storage and traversal.
//!
//! Trees are binary and immutable: node 0 is the root, and child id 0 is the
//! leaf sentinel (the root can never be a child). At an internal node a
//! sample goes left when `feature <= threshold`; a non-finite feature value
//! fails the comparison and goes right.

use crate::repr::NodeId;

/// Structural validation errors for [`Tree`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TreeValidationError {
    /// Tree has no nodes.
    EmptyTree,
    /// A child pointer references an out-of-bounds node.
    ChildOutOfBounds {
        node: NodeId,
        side: &'static str,
        child: NodeId,
        n_nodes: usize,
    },
    /// A node references itself as a child.
    SelfLoop { node: NodeId },
    /// A node was reached by more than one path.
    DuplicateVisit { node: NodeId },
    /// A cycle was detected during traversal.
    CycleDetected { node: NodeId },
    /// A node exists in storage but is unreachable from the root.
    UnreachableNode { node: NodeId },
    /// A split references a feature beyond the declared feature count.
    SplitIndexOutOfBounds {
        node: NodeId,
        index: u32,
        n_features: usize,
    },
}

/// Structure-of-arrays tree storage for cache-friendly traversal.
///
/// Node indices are local to this tree (0 = root). Split fields of leaf
/// nodes are ignored.
#[derive(Debug, Clone)]
pub struct Tree {
    split_indices: Box<[u32]>,
    split_thresholds: Box<[f64]>,
    left_children: Box<[NodeId]>,
    right_children: Box<[NodeId]>,
    is_leaf: Box<[bool]>,
    leaf_values: Box<[f64]>,
}

impl Tree {
    /// Create a tree from parallel per-node arrays.
    ///
    /// All arrays must have the same length (the node count). Structural
    /// soundness is checked separately via [`validate`](Self::validate);
    /// artifact reading always does so before serving.
    pub fn new(
        split_indices: Vec<u32>,
        split_thresholds: Vec<f64>,
        left_children: Vec<NodeId>,
        right_children: Vec<NodeId>,
        is_leaf: Vec<bool>,
        leaf_values: Vec<f64>,
    ) -> Self {
        let n_nodes = split_indices.len();
        debug_assert_eq!(n_nodes, split_thresholds.len());
        debug_assert_eq!(n_nodes, left_children.len());
        debug_assert_eq!(n_nodes, right_children.len());
        debug_assert_eq!(n_nodes, is_leaf.len());
        debug_assert_eq!(n_nodes, leaf_values.len());

        Self {
            split_indices: split_indices.into_boxed_slice(),
            split_thresholds: split_thresholds.into_boxed_slice(),
            left_children: left_children.into_boxed_slice(),
            right_children: right_children.into_boxed_slice(),
            is_leaf: is_leaf.into_boxed_slice(),
            leaf_values: leaf_values.into_boxed_slice(),
        }
    }

    /// Number of nodes in the tree.
    #[inline]
    pub fn n_nodes(&self) -> usize {
        self.is_leaf.len()
    }

    /// Check if a node is a leaf.
    #[inline]
    pub fn is_leaf(&self, node: NodeId) -> bool {
        self.is_leaf[node as usize]
    }

    /// The feature index a split node tests.
    #[inline]
    pub fn split_index(&self, node: NodeId) -> u32 {
        self.split_indices[node as usize]
    }

    /// The threshold a split node compares against.
    #[inline]
    pub fn split_threshold(&self, node: NodeId) -> f64 {
        self.split_thresholds[node as usize]
    }

    /// The left child node index.
    #[inline]
    pub fn left_child(&self, node: NodeId) -> NodeId {
        self.left_children[node as usize]
    }

    /// The right child node index.
    #[inline]
    pub fn right_child(&self, node: NodeId) -> NodeId {
        self.right_children[node as usize]
    }

    /// The value stored at a leaf node.
    #[inline]
    pub fn leaf_value(&self, node: NodeId) -> f64 {
        self.leaf_values[node as usize]
    }

    /// Traverse from the root to the leaf a sample lands in.
    ///
    /// `features` must cover every feature index the tree splits on;
    /// validated trees guarantee those stay below the declared feature
    /// count.
    #[inline]
    pub fn traverse_to_leaf(&self, features: &[f64]) -> NodeId {
        let mut node: NodeId = 0;

        while !self.is_leaf(node) {
            let value = features[self.split_index(node) as usize];
            node = if value <= self.split_threshold(node) {
                self.left_child(node)
            } else {
                // NaN fails the comparison and lands here as well.
                self.right_child(node)
            };
        }

        node
    }

    /// Predict the regression value for a single sample.
    pub fn predict_row(&self, features: &[f64]) -> f64 {
        self.leaf_value(self.traverse_to_leaf(features))
    }

    /// Validate structural invariants against a declared feature count.
    ///
    /// Walks the tree once (iterative DFS with color marking) rejecting
    /// out-of-bounds children, self-loops, cycles, shared subtrees, and
    /// unreachable storage; split feature indices must stay below
    /// `n_features`.
    pub fn validate(&self, n_features: usize) -> Result<(), TreeValidationError> {
        let n_nodes = self.n_nodes();
        if n_nodes == 0 {
            return Err(TreeValidationError::EmptyTree);
        }

        // 0 = unvisited, 1 = visiting, 2 = done
        let mut color = vec![0u8; n_nodes];
        let mut stack: Vec<(NodeId, u8)> = vec![(0, 0)];

        while let Some((node, phase)) = stack.pop() {
            let node_usize = node as usize;

            match phase {
                0 => {
                    match color[node_usize] {
                        0 => {}
                        1 => return Err(TreeValidationError::CycleDetected { node }),
                        2 => return Err(TreeValidationError::DuplicateVisit { node }),
                        _ => unreachable!(),
                    }

                    color[node_usize] = 1;
                    stack.push((node, 1));

                    if !self.is_leaf(node) {
                        let index = self.split_index(node);
                        if index as usize >= n_features {
                            return Err(TreeValidationError::SplitIndexOutOfBounds {
                                node,
                                index,
                                n_features,
                            });
                        }

                        let left = self.left_child(node);
                        let right = self.right_child(node);

                        if left == node || right == node {
                            return Err(TreeValidationError::SelfLoop { node });
                        }
                        if left as usize >= n_nodes {
                            return Err(TreeValidationError::ChildOutOfBounds {
                                node,
                                side: "left",
                                child: left,
                                n_nodes,
                            });
                        }
                        if right as usize >= n_nodes {
                            return Err(TreeValidationError::ChildOutOfBounds {
                                node,
                                side: "right",
                                child: right,
                                n_nodes,
                            });
                        }

                        stack.push((right, 0));
                        stack.push((left, 0));
                    }
                }
                1 => {
                    color[node_usize] = 2;
                }
                _ => unreachable!(),
            }
        }

        for (node, &c) in color.iter().enumerate() {
            if c == 0 {
                return Err(TreeValidationError::UnreachableNode {
                    node: node as NodeId,
                });
            }
        }

        Ok(())
    }
}
