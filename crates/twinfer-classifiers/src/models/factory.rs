use std::path::Path;

use crate::config::ModelKind;
use crate::error::ArtifactError;
use crate::io::read_artifact;
use crate::models::classifier_trait::ClassifierModel;

/// Load the artifact serving the `slot` model.
///
/// The artifact's own `kind` is not required to match the slot; a mismatch is
/// only reported, as the service treats artifacts as opaque classifiers.
pub fn load_model<P: AsRef<Path>>(
    path: P,
    slot: ModelKind,
) -> Result<Box<dyn ClassifierModel>, ArtifactError> {
    let artifact = read_artifact(&path)?;
    if artifact.kind() != slot {
        log::warn!(
            "[twinfer::factory] {} is a {} artifact but is served as {}",
            path.as_ref().display(),
            artifact.kind(),
            slot
        );
    }
    Ok(artifact.into_model())
}
