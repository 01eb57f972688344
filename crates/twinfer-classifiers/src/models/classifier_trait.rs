use std::collections::HashSet;

use crate::error::{ArtifactError, ModelError};
use crate::math::Array2;

/// A loaded, immutable binary classifier.
///
/// Implementations are shared read-only across request threads, hence the
/// `Send + Sync` bound. Inputs are matrices with one row per sample and one
/// column per entry of [`ClassifierModel::feature_names_in`].
pub trait ClassifierModel: Send + Sync {
    /// Predict a class label (one of [`ClassifierModel::classes`]) per row.
    fn predict(&self, x: &Array2<f64>) -> Result<Vec<i64>, ModelError>;

    /// Predict per-class probabilities, one row per sample and one column per
    /// class in the order of [`ClassifierModel::classes`].
    fn predict_proba(&self, x: &Array2<f64>) -> Result<Array2<f64>, ModelError>;

    /// Feature names recorded at training time, in input column order.
    fn feature_names_in(&self) -> &[String];

    /// Class labels; the positive class is the second entry.
    fn classes(&self) -> &[i64];

    /// Optional human readable name for the model
    fn name(&self) -> &str { "classifier" }
}

/// Reject inputs whose width differs from the training schema.
pub(crate) fn check_n_features(
    model: &dyn ClassifierModel,
    x: &Array2<f64>,
) -> Result<(), ModelError> {
    let expected = model.feature_names_in().len();
    if x.ncols() != expected {
        return Err(ModelError::FeatureCountMismatch {
            model: model.name().to_string(),
            expected,
            found: x.ncols(),
        });
    }
    Ok(())
}

/// Checks shared by every binary tree ensemble artifact.
pub(crate) fn validate_ensemble_header(
    feature_names_in: &[String],
    classes: &[i64],
    n_estimators: usize,
) -> Result<(), ArtifactError> {
    if feature_names_in.is_empty() {
        return Err(ArtifactError::Invalid(
            "feature_names_in is empty".to_string(),
        ));
    }
    let mut seen = HashSet::new();
    if let Some(dup) = feature_names_in.iter().find(|name| !seen.insert(name.as_str())) {
        return Err(ArtifactError::Invalid(format!(
            "duplicate feature name '{}' in feature_names_in",
            dup
        )));
    }
    if classes.len() != 2 || classes[0] == classes[1] {
        return Err(ArtifactError::Invalid(format!(
            "expected two distinct class labels, got {:?}",
            classes
        )));
    }
    if n_estimators == 0 {
        return Err(ArtifactError::Invalid("ensemble has no estimators".to_string()));
    }
    Ok(())
}
