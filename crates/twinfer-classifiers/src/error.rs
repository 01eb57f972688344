use std::error::Error;
use std::fmt;
use std::path::PathBuf;

/// Message returned to callers that name an unknown model.
pub const INVALID_MODEL_TYPE_MESSAGE: &str =
    "Invalid model type. Use 'random_forest' or 'gradient_boosting'.";

/// Failure while handling a single prediction request.
#[derive(Debug, Clone, PartialEq)]
pub enum PredictError {
    /// The `model` field named something other than the two served models.
    InvalidModelType,
    /// Anything raised while decoding the body, assembling the feature vector
    /// or running the model. Carries the raw message.
    Inference(String),
}

impl PredictError {
    pub fn inference(message: impl Into<String>) -> Self {
        PredictError::Inference(message.into())
    }

    /// True for errors caused by the caller's choice of model.
    pub fn is_client_error(&self) -> bool {
        matches!(self, PredictError::InvalidModelType)
    }
}

impl fmt::Display for PredictError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            PredictError::InvalidModelType => f.write_str(INVALID_MODEL_TYPE_MESSAGE),
            PredictError::Inference(message) => f.write_str(message),
        }
    }
}

impl Error for PredictError {}

impl From<ModelError> for PredictError {
    fn from(err: ModelError) -> Self {
        PredictError::Inference(err.to_string())
    }
}

/// Errors raised by a loaded model at inference time.
#[derive(Debug, Clone, PartialEq)]
pub enum ModelError {
    FeatureCountMismatch {
        model: String,
        expected: usize,
        found: usize,
    },
    Shape(String),
}

impl fmt::Display for ModelError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ModelError::FeatureCountMismatch {
                model,
                expected,
                found,
            } => write!(
                f,
                "X has {} features, but {} is expecting {} features as input.",
                found, model, expected
            ),
            ModelError::Shape(reason) => write!(f, "unexpected output shape: {}", reason),
        }
    }
}

impl Error for ModelError {}

/// Errors raised while loading model artifacts at startup.
#[derive(Debug)]
pub enum ArtifactError {
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    /// The artifact parsed but describes an unusable model.
    Invalid(String),
    /// The two models were trained on different feature schemas.
    SchemaMismatch {
        expected: Vec<String>,
        found: Vec<String>,
    },
}

impl fmt::Display for ArtifactError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ArtifactError::Io { path, source } => {
                write!(f, "Failed to read model artifact {}: {}", path.display(), source)
            }
            ArtifactError::Parse { path, source } => {
                write!(f, "Failed to parse model artifact {}: {}", path.display(), source)
            }
            ArtifactError::Invalid(reason) => write!(f, "Invalid model artifact: {}", reason),
            ArtifactError::SchemaMismatch { expected, found } => write!(
                f,
                "Feature schema mismatch: random_forest expects {:?} but gradient_boosting expects {:?}",
                expected, found
            ),
        }
    }
}

impl Error for ArtifactError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ArtifactError::Io { source, .. } => Some(source),
            ArtifactError::Parse { source, .. } => Some(source),
            _ => None,
        }
    }
}
