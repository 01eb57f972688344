//! Binary decision trees stored as flat node arrays.
//!
//! Node 0 is the root. A split sends a row to `left` when
//! `row[feature] <= threshold` and to `right` otherwise; a leaf carries the
//! values the owning ensemble aggregates (class weights for a forest, a single
//! raw score for boosting).
use serde::{Deserialize, Serialize};

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum Node {
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
    Leaf {
        value: Vec<f64>,
    },
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct DecisionTree {
    nodes: Vec<Node>,
}

impl DecisionTree {
    pub fn new(nodes: Vec<Node>) -> Self {
        DecisionTree { nodes }
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Check that the tree can be evaluated on rows of `n_features` columns and
    /// that every leaf holds exactly `leaf_len` values.
    ///
    /// Children must point strictly forward, so evaluation always terminates.
    pub fn validate(&self, n_features: usize, leaf_len: usize) -> Result<(), String> {
        if self.nodes.is_empty() {
            return Err("tree has no nodes".to_string());
        }
        for (idx, node) in self.nodes.iter().enumerate() {
            match node {
                Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    if *feature >= n_features {
                        return Err(format!(
                            "node {} splits on feature {} but the model has {} features",
                            idx, feature, n_features
                        ));
                    }
                    if threshold.is_nan() {
                        return Err(format!("node {} has a NaN threshold", idx));
                    }
                    for child in [*left, *right] {
                        if child <= idx || child >= self.nodes.len() {
                            return Err(format!("node {} points to invalid child {}", idx, child));
                        }
                    }
                }
                Node::Leaf { value } => {
                    if value.len() != leaf_len {
                        return Err(format!(
                            "leaf {} holds {} values, expected {}",
                            idx,
                            value.len(),
                            leaf_len
                        ));
                    }
                    if value.iter().any(|v| !v.is_finite()) {
                        return Err(format!("leaf {} holds a non-finite value", idx));
                    }
                }
            }
        }
        Ok(())
    }

    /// Route `row` to its leaf and return the leaf's values.
    ///
    /// The tree must have passed [`DecisionTree::validate`] for this row width.
    pub fn leaf_values(&self, row: &[f64]) -> &[f64] {
        let mut idx = 0;
        loop {
            match &self.nodes[idx] {
                Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    idx = if row[*feature] <= *threshold { *left } else { *right };
                }
                Node::Leaf { value } => return value,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn stump() -> DecisionTree {
        DecisionTree::new(vec![
            Node::Split {
                feature: 1,
                threshold: 0.5,
                left: 1,
                right: 2,
            },
            Node::Leaf { value: vec![3.0, 1.0] },
            Node::Leaf { value: vec![0.0, 4.0] },
        ])
    }

    #[test]
    fn routes_on_threshold_inclusive_left() {
        let tree = stump();
        assert_eq!(tree.leaf_values(&[9.0, 0.5]), &[3.0, 1.0]);
        assert_eq!(tree.leaf_values(&[9.0, 0.51]), &[0.0, 4.0]);
    }

    #[test]
    fn deserializes_split_and_leaf_nodes() {
        let tree: DecisionTree = serde_json::from_value(json!({
            "nodes": [
                {"feature": 1, "threshold": 0.5, "left": 1, "right": 2},
                {"value": [3.0, 1.0]},
                {"value": [0.0, 4.0]}
            ]
        }))
        .unwrap();
        assert_eq!(tree, stump());
    }

    #[test]
    fn validate_accepts_well_formed_tree() {
        assert!(stump().validate(2, 2).is_ok());
    }

    #[test]
    fn validate_rejects_out_of_range_feature() {
        let err = stump().validate(1, 2).unwrap_err();
        assert!(err.to_string().contains("splits on feature 1"));
    }

    #[test]
    fn validate_rejects_backward_child() {
        let tree = DecisionTree::new(vec![
            Node::Split {
                feature: 0,
                threshold: 0.0,
                left: 0,
                right: 1,
            },
            Node::Leaf { value: vec![1.0] },
        ]);
        let err = tree.validate(1, 1).unwrap_err();
        assert!(err.to_string().contains("invalid child 0"));
    }

    #[test]
    fn validate_rejects_wrong_leaf_arity() {
        let err = stump().validate(2, 1).unwrap_err();
        assert!(err.to_string().contains("holds 2 values, expected 1"));
    }

    #[test]
    fn validate_rejects_empty_tree() {
        assert!(DecisionTree::new(vec![]).validate(1, 1).is_err());
    }
}
