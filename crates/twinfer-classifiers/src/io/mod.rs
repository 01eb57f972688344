pub mod artifact;

pub use artifact::{read_artifact, ArtifactSummary, ModelArtifact};
