use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::{ArtifactError, ModelError};
use crate::math::Array2;
use crate::models::classifier_trait::{check_n_features, validate_ensemble_header, ClassifierModel};
use crate::models::tree::{DecisionTree, Node};

/// Random forest classifier: the mean of per-tree class distributions.
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct RandomForestClassifier {
    feature_names_in: Vec<String>,
    classes: Vec<i64>,
    estimators: Vec<DecisionTree>,
}

impl RandomForestClassifier {
    pub fn new(
        feature_names_in: Vec<String>,
        classes: Vec<i64>,
        estimators: Vec<DecisionTree>,
    ) -> Result<Self, ArtifactError> {
        let model = RandomForestClassifier {
            feature_names_in,
            classes,
            estimators,
        };
        model.validate()?;
        Ok(model)
    }

    pub fn n_estimators(&self) -> usize {
        self.estimators.len()
    }

    /// Leaves hold one non-negative weight per class.
    pub fn validate(&self) -> Result<(), ArtifactError> {
        validate_ensemble_header(&self.feature_names_in, &self.classes, self.estimators.len())?;
        for (i, tree) in self.estimators.iter().enumerate() {
            tree.validate(self.feature_names_in.len(), self.classes.len())
                .map_err(|e| ArtifactError::Invalid(format!("estimator {}: {}", i, e)))?;
            let negative = tree.nodes().iter().any(|node| match node {
                Node::Leaf { value } => value.iter().any(|v| *v < 0.0),
                _ => false,
            });
            if negative {
                return Err(ArtifactError::Invalid(format!(
                    "estimator {}: leaf weights must be non-negative",
                    i
                )));
            }
        }
        Ok(())
    }

    fn row_proba(&self, row: &[f64]) -> Vec<f64> {
        let n_classes = self.classes.len();
        let per_tree: Vec<Vec<f64>> = self
            .estimators
            .par_iter()
            .map(|tree| normalize(tree.leaf_values(row)))
            .collect();

        // Summed in estimator order so results do not depend on thread scheduling.
        let mut proba = vec![0.0; n_classes];
        for dist in &per_tree {
            for (acc, p) in proba.iter_mut().zip(dist) {
                *acc += p;
            }
        }
        let n_trees = self.estimators.len() as f64;
        proba.iter_mut().for_each(|p| *p /= n_trees);
        proba
    }
}

/// Scale leaf weights to sum to one; an all-zero leaf stays all zero.
fn normalize(weights: &[f64]) -> Vec<f64> {
    let total: f64 = weights.iter().sum();
    if total > 0.0 {
        weights.iter().map(|w| w / total).collect()
    } else {
        weights.to_vec()
    }
}

/// Index of the first maximum.
pub(crate) fn argmax(values: &[f64]) -> usize {
    let mut best = 0;
    for (i, v) in values.iter().enumerate().skip(1) {
        if *v > values[best] {
            best = i;
        }
    }
    best
}

impl ClassifierModel for RandomForestClassifier {
    fn predict(&self, x: &Array2<f64>) -> Result<Vec<i64>, ModelError> {
        let proba = self.predict_proba(x)?;
        Ok(proba
            .rows()
            .map(|row| self.classes[argmax(row)])
            .collect())
    }

    fn predict_proba(&self, x: &Array2<f64>) -> Result<Array2<f64>, ModelError> {
        check_n_features(self, x)?;
        let n_classes = self.classes.len();
        let mut data = Vec::with_capacity(x.nrows() * n_classes);
        for row in x.rows() {
            data.extend(self.row_proba(row));
        }
        Array2::from_shape_vec((x.nrows(), n_classes), data)
            .map_err(|e| ModelError::Shape(e.to_string()))
    }

    fn feature_names_in(&self) -> &[String] {
        &self.feature_names_in
    }

    fn classes(&self) -> &[i64] {
        &self.classes
    }

    fn name(&self) -> &str {
        "RandomForestClassifier"
    }
}
