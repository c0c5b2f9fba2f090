//! External integrations

pub mod artifact_store;

pub use artifact_store::{provision_artifact, ArtifactStatus, ArtifactStore, ProvisionOutcome};
