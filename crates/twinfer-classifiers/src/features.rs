//! Feature schema and per-request feature record assembly.
//!
//! The schema is the ordered list of feature names recorded in the model
//! artifacts. Every request body is projected onto it: schema features missing
//! from the body become `0.0`, body fields outside the schema are ignored.
use serde_json::{Map, Value};

use crate::error::PredictError;
use crate::math::Array2;

/// Ordered feature names a model expects as input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureSchema {
    names: Vec<String>,
}

impl FeatureSchema {
    pub fn new(names: Vec<String>) -> Self {
        FeatureSchema { names }
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Build the feature record for one request body.
    pub fn assemble(&self, body: &Map<String, Value>) -> Result<FeatureRecord, PredictError> {
        let values = self
            .names
            .iter()
            .map(|name| match body.get(name) {
                None => Ok(0.0),
                Some(value) => coerce_feature(name, value),
            })
            .collect::<Result<Vec<f64>, PredictError>>()?;
        Ok(FeatureRecord { values })
    }
}

/// Feature values of a single request, in schema order.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureRecord {
    values: Vec<f64>,
}

impl FeatureRecord {
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// The single-row model input.
    pub fn to_matrix(&self) -> Array2<f64> {
        Array2::from_row(self.values.clone())
    }
}

/// Convert a JSON feature value to the float a model consumes.
///
/// Numbers pass through, booleans map to 1/0 and numeric strings are parsed.
/// `null`, arrays, objects and non-finite values cannot be fed to a model.
pub fn coerce_feature(name: &str, value: &Value) -> Result<f64, PredictError> {
    let parsed = match value {
        Value::Number(n) => n.as_f64().ok_or_else(|| {
            PredictError::inference(format!("cannot represent {} as float for feature '{}'", n, name))
        })?,
        Value::Bool(b) => {
            if *b {
                1.0
            } else {
                0.0
            }
        }
        Value::String(s) => s.trim().parse::<f64>().map_err(|_| {
            PredictError::inference(format!("could not convert string to float: '{}'", s))
        })?,
        Value::Null => {
            return Err(PredictError::inference(format!(
                "Input contains NaN: feature '{}' is null",
                name
            )))
        }
        Value::Array(_) | Value::Object(_) => {
            return Err(PredictError::inference(format!(
                "setting an array element with a sequence: feature '{}' is not a scalar",
                name
            )))
        }
    };
    if !parsed.is_finite() {
        return Err(PredictError::inference(format!(
            "Input contains NaN or infinity: feature '{}'",
            name
        )));
    }
    Ok(parsed)
}
