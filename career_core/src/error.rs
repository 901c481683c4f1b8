use crate::lookup::LookupError;
use crate::profile::ValidationError;
use thiserror::Error;

/// A dependency of stages 2 or 3 was unavailable
#[derive(Error, Debug)]
pub enum CollaboratorError {
    #[error("Market lookup '{source_name}' failed for role '{role}': {error}")]
    Lookup {
        source_name: String,
        role: String,
        #[source]
        error: LookupError,
    },

    #[error("Knowledge base is unavailable: {0}")]
    KnowledgeBaseUnavailable(String),
}

/// Any failure that aborts the pipeline
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Invalid profile: {0}")]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Collaborator(#[from] CollaboratorError),
}
