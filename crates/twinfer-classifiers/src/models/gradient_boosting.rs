use serde::{Deserialize, Serialize};

use crate::error::{ArtifactError, ModelError};
use crate::math::Array2;
use crate::models::classifier_trait::{check_n_features, validate_ensemble_header, ClassifierModel};
use crate::models::tree::DecisionTree;

/// Gradient Boosting Decision Tree (GBDT) classifier trained with binary log-loss.
///
/// The raw score is `init_raw_prediction + learning_rate * sum(leaf)` and the
/// positive-class probability is its logistic transform.
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct GradientBoostingClassifier {
    feature_names_in: Vec<String>,
    classes: Vec<i64>,
    learning_rate: f64,
    init_raw_prediction: f64,
    estimators: Vec<DecisionTree>,
}

impl GradientBoostingClassifier {
    pub fn new(
        feature_names_in: Vec<String>,
        classes: Vec<i64>,
        learning_rate: f64,
        init_raw_prediction: f64,
        estimators: Vec<DecisionTree>,
    ) -> Result<Self, ArtifactError> {
        let model = GradientBoostingClassifier {
            feature_names_in,
            classes,
            learning_rate,
            init_raw_prediction,
            estimators,
        };
        model.validate()?;
        Ok(model)
    }

    pub fn n_estimators(&self) -> usize {
        self.estimators.len()
    }

    pub fn validate(&self) -> Result<(), ArtifactError> {
        validate_ensemble_header(&self.feature_names_in, &self.classes, self.estimators.len())?;
        if !self.learning_rate.is_finite() || !self.init_raw_prediction.is_finite() {
            return Err(ArtifactError::Invalid(
                "learning_rate and init_raw_prediction must be finite".to_string(),
            ));
        }
        for (i, tree) in self.estimators.iter().enumerate() {
            tree.validate(self.feature_names_in.len(), 1)
                .map_err(|e| ArtifactError::Invalid(format!("estimator {}: {}", i, e)))?;
        }
        Ok(())
    }

    /// Raw log-odds of the positive class for each row.
    pub fn decision_function(&self, x: &Array2<f64>) -> Result<Vec<f64>, ModelError> {
        check_n_features(self, x)?;
        Ok(x.rows().map(|row| self.raw_score(row)).collect())
    }

    fn raw_score(&self, row: &[f64]) -> f64 {
        let boosted: f64 = self
            .estimators
            .iter()
            .map(|tree| tree.leaf_values(row)[0])
            .sum();
        self.init_raw_prediction + self.learning_rate * boosted
    }
}

fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

impl ClassifierModel for GradientBoostingClassifier {
    fn predict(&self, x: &Array2<f64>) -> Result<Vec<i64>, ModelError> {
        let scores = self.decision_function(x)?;
        Ok(scores
            .into_iter()
            .map(|raw| {
                if sigmoid(raw) > 0.5 {
                    self.classes[1]
                } else {
                    self.classes[0]
                }
            })
            .collect())
    }

    fn predict_proba(&self, x: &Array2<f64>) -> Result<Array2<f64>, ModelError> {
        let scores = self.decision_function(x)?;
        let mut data = Vec::with_capacity(scores.len() * 2);
        for raw in &scores {
            let p1 = sigmoid(*raw);
            data.push(1.0 - p1);
            data.push(p1);
        }
        Array2::from_shape_vec((scores.len(), 2), data)
            .map_err(|e| ModelError::Shape(e.to_string()))
    }

    fn feature_names_in(&self) -> &[String] {
        &self.feature_names_in
    }

    fn classes(&self) -> &[i64] {
        &self.classes
    }

    fn name(&self) -> &str {
        "GradientBoostingClassifier"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::tree::Node;

    fn stump(feature: usize, threshold: f64, left: f64, right: f64) -> DecisionTree {
        DecisionTree::new(vec![
            Node::Split {
                feature,
                threshold,
                left: 1,
                right: 2,
            },
            Node::Leaf { value: vec![left] },
            Node::Leaf { value: vec![right] },
        ])
    }

    fn model() -> GradientBoostingClassifier {
        GradientBoostingClassifier::new(
            vec!["f1".to_string(), "f2".to_string()],
            vec![0, 1],
            0.5,
            -1.0,
            vec![stump(0, 1.0, -1.0, 3.0), stump(1, 0.0, 0.0, 1.0)],
        )
        .unwrap()
    }

    #[test]
    fn raw_score_adds_shrunken_leaves_to_prior() {
        let m = model();
        let x = Array2::from_shape_vec((2, 2), vec![0.0, 0.0, 2.0, 1.0]).unwrap();
        let raw = m.decision_function(&x).unwrap();
        assert!((raw[0] - (-1.5)).abs() < 1e-12);
        assert!((raw[1] - 1.0).abs() < 1e-12);
    }

    #[test]
    fn probabilities_are_logistic_of_raw_score() {
        let m = model();
        let x = Array2::from_shape_vec((2, 2), vec![0.0, 0.0, 2.0, 1.0]).unwrap();
        let proba = m.predict_proba(&x).unwrap();
        let expected = 1.0 / (1.0 + (1.5f64).exp());
        assert!((proba[(0, 1)] - expected).abs() < 1e-12);
        assert!((proba[(0, 0)] + proba[(0, 1)] - 1.0).abs() < 1e-12);
        assert_eq!(m.predict(&x).unwrap(), vec![0, 1]);
    }

    #[test]
    fn zero_raw_score_predicts_negative_class() {
        let m = GradientBoostingClassifier::new(
            vec!["f1".to_string()],
            vec![3, 7],
            0.1,
            0.0,
            vec![DecisionTree::new(vec![Node::Leaf { value: vec![0.0] }])],
        )
        .unwrap();
        assert_eq!(m.predict(&Array2::from_row(vec![5.0])).unwrap(), vec![3]);
    }

    #[test]
    fn rejects_multi_value_leaves() {
        let err = GradientBoostingClassifier::new(
            vec!["f1".to_string()],
            vec![0, 1],
            0.1,
            0.0,
            vec![DecisionTree::new(vec![Node::Leaf { value: vec![0.1, 0.2] }])],
        )
        .unwrap_err();
        assert!(err.to_string().contains("expected 1"));
    }

    #[test]
    fn rejects_non_finite_learning_rate() {
        let err = GradientBoostingClassifier::new(
            vec!["f1".to_string()],
            vec![0, 1],
            f64::INFINITY,
            0.0,
            vec![DecisionTree::new(vec![Node::Leaf { value: vec![0.0] }])],
        )
        .unwrap_err();
        assert!(err.to_string().contains("must be finite"));
    }
}
