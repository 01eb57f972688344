use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

use crate::error::PredictError;

/// The two models served by the prediction endpoint.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum ModelKind {
    #[default]
    RandomForest,
    GradientBoosting,
}

impl ModelKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ModelKind::RandomForest => "random_forest",
            ModelKind::GradientBoosting => "gradient_boosting",
        }
    }

    /// Resolve the `model` field of a request body.
    ///
    /// An absent field selects the random forest. A string is matched
    /// case-insensitively; any other JSON type cannot be lower-cased and is
    /// reported as an inference failure rather than a bad model name.
    pub fn from_request(field: Option<&Value>) -> Result<Self, PredictError> {
        match field {
            None => Ok(ModelKind::default()),
            Some(Value::String(name)) => name
                .parse()
                .map_err(|_| PredictError::InvalidModelType),
            Some(other) => Err(PredictError::inference(format!(
                "'model' must be a string, got {}",
                other
            ))),
        }
    }
}

impl fmt::Display for ModelKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ModelKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "random_forest" => Ok(ModelKind::RandomForest),
            "gradient_boosting" => Ok(ModelKind::GradientBoosting),
            _ => Err(format!(
                "Unknown model type: {}. Use 'random_forest' or 'gradient_boosting'",
                s
            )),
        }
    }
}
