//! The request core: model selection, feature assembly and inference.
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::config::ModelKind;
use crate::error::{ArtifactError, PredictError};
use crate::features::FeatureSchema;
use crate::models::classifier_trait::ClassifierModel;
use crate::models::factory::load_model;

/// Whether the gradient boosting schema must equal the random forest schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaCheck {
    Strict,
    Unchecked,
}

/// Successful prediction payload.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Prediction {
    pub model: ModelKind,
    pub prediction: i64,
    pub probability: f64,
}

/// Both served models plus the feature schema, immutable after construction.
pub struct Predictor {
    random_forest: Box<dyn ClassifierModel>,
    gradient_boosting: Box<dyn ClassifierModel>,
    schema: FeatureSchema,
}

impl Predictor {
    /// The schema is taken from the random forest.
    pub fn new(
        random_forest: Box<dyn ClassifierModel>,
        gradient_boosting: Box<dyn ClassifierModel>,
        check: SchemaCheck,
    ) -> Result<Self, ArtifactError> {
        let schema = FeatureSchema::new(random_forest.feature_names_in().to_vec());
        if gradient_boosting.feature_names_in() != schema.names() {
            let err = ArtifactError::SchemaMismatch {
                expected: schema.names().to_vec(),
                found: gradient_boosting.feature_names_in().to_vec(),
            };
            match check {
                SchemaCheck::Strict => return Err(err),
                SchemaCheck::Unchecked => log::warn!("[twinfer::predictor] {}", err),
            }
        }
        Ok(Predictor {
            random_forest,
            gradient_boosting,
            schema,
        })
    }

    /// Load both artifacts from disk. Either failing aborts startup.
    pub fn load<P: AsRef<Path>>(
        random_forest_path: P,
        gradient_boosting_path: P,
        check: SchemaCheck,
    ) -> Result<Self, ArtifactError> {
        let random_forest = load_model(random_forest_path, ModelKind::RandomForest)?;
        let gradient_boosting = load_model(gradient_boosting_path, ModelKind::GradientBoosting)?;
        Predictor::new(random_forest, gradient_boosting, check)
    }

    pub fn schema(&self) -> &FeatureSchema {
        &self.schema
    }

    pub fn model(&self, kind: ModelKind) -> &dyn ClassifierModel {
        match kind {
            ModelKind::RandomForest => self.random_forest.as_ref(),
            ModelKind::GradientBoosting => self.gradient_boosting.as_ref(),
        }
    }

    /// Decode a raw request body and predict.
    pub fn predict_json(&self, body: &[u8]) -> Result<Prediction, PredictError> {
        let value: Value = serde_json::from_slice(body).map_err(|e| {
            PredictError::inference(format!("Failed to decode JSON object: {}", e))
        })?;
        self.predict(&value)
    }

    /// Predict for one request body.
    pub fn predict(&self, body: &Value) -> Result<Prediction, PredictError> {
        let fields = body.as_object().ok_or_else(|| {
            PredictError::inference(format!(
                "request body must be a JSON object, got {}",
                json_type(body)
            ))
        })?;

        let kind = ModelKind::from_request(fields.get("model"))?;
        let model = self.model(kind);

        let record = self.schema.assemble(fields)?;
        let x = record.to_matrix();

        let prediction = *model
            .predict(&x)?
            .first()
            .ok_or_else(|| PredictError::inference("model returned no prediction"))?;
        let proba = model.predict_proba(&x)?;
        if proba.nrows() == 0 || proba.ncols() < 2 {
            return Err(PredictError::inference(format!(
                "model returned probabilities of shape {:?}",
                proba.shape()
            )));
        }

        Ok(Prediction {
            model: kind,
            prediction,
            probability: round_probability(proba[(0, 1)]),
        })
    }
}

/// Round to 4 decimal places.
///
/// Formatting rounds the exact binary value, so a float stored just below a
/// decimal tie rounds down.
pub fn round_probability(p: f64) -> f64 {
    format!("{:.4}", p).parse().unwrap_or(p)
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
