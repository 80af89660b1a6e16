use blogdesk_core::repository::RepositoryError;
use blogdesk_core::workflow::WorkflowError;

#[derive(thiserror::Error, Debug)]
#[allow(clippy::enum_variant_names)]
pub enum Error {
    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Article validation failed: {0}")]
    Validation(String),

    #[error(transparent)]
    Workflow(#[from] WorkflowError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
