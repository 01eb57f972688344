//! Reading serialized tree-ensemble artifacts from disk.
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::config::ModelKind;
use crate::error::ArtifactError;
use crate::models::classifier_trait::ClassifierModel;
use crate::models::gradient_boosting::GradientBoostingClassifier;
use crate::models::random_forest::RandomForestClassifier;

/// On-disk model artifact, tagged by `kind`.
#[derive(Deserialize, Serialize, Debug, Clone)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ModelArtifact {
    RandomForest(RandomForestClassifier),
    GradientBoosting(GradientBoostingClassifier),
}

impl ModelArtifact {
    pub fn kind(&self) -> ModelKind {
        match self {
            ModelArtifact::RandomForest(_) => ModelKind::RandomForest,
            ModelArtifact::GradientBoosting(_) => ModelKind::GradientBoosting,
        }
    }

    pub fn validate(&self) -> Result<(), ArtifactError> {
        match self {
            ModelArtifact::RandomForest(model) => model.validate(),
            ModelArtifact::GradientBoosting(model) => model.validate(),
        }
    }

    pub fn summary(&self) -> ArtifactSummary {
        match self {
            ModelArtifact::RandomForest(m) => describe(self.kind(), m, m.n_estimators()),
            ModelArtifact::GradientBoosting(m) => describe(self.kind(), m, m.n_estimators()),
        }
    }

    pub fn into_model(self) -> Box<dyn ClassifierModel> {
        match self {
            ModelArtifact::RandomForest(model) => Box::new(model),
            ModelArtifact::GradientBoosting(model) => Box::new(model),
        }
    }
}

/// What `twinfer inspect` reports about an artifact.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ArtifactSummary {
    pub kind: ModelKind,
    pub n_features: usize,
    pub feature_names_in: Vec<String>,
    pub classes: Vec<i64>,
    pub n_estimators: usize,
}

fn describe(kind: ModelKind, model: &dyn ClassifierModel, n_estimators: usize) -> ArtifactSummary {
    ArtifactSummary {
        kind,
        n_features: model.feature_names_in().len(),
        feature_names_in: model.feature_names_in().to_vec(),
        classes: model.classes().to_vec(),
        n_estimators,
    }
}

/// Read and validate a model artifact.
pub fn read_artifact<P: AsRef<Path>>(path: P) -> Result<ModelArtifact, ArtifactError> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|source| ArtifactError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let artifact: ModelArtifact =
        serde_json::from_str(&content).map_err(|source| ArtifactError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
    artifact.validate().map_err(|e| match e {
        ArtifactError::Invalid(reason) => {
            ArtifactError::Invalid(format!("{}: {}", path.display(), reason))
        }
        other => other,
    })?;
    log::debug!(
        "[twinfer::artifact] Loaded {} artifact from {}",
        artifact.kind(),
        path.display()
    );
    Ok(artifact)
}
