use thiserror::Error;

/// User-visible failures. None of these end the program.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AppError {
    #[error("No function selected")]
    NoFunctionSelected,

    #[error("No pipeline selected")]
    NoPipelineSelected,

    #[error("No approval selected")]
    NoApprovalSelected,

    #[error("Commit ID cannot be empty")]
    EmptyCommitId,

    #[error("Comment cannot be empty")]
    EmptyComment,

    #[error("Profile cannot be empty")]
    EmptyProfile,

    #[error("Region cannot be empty")]
    EmptyRegion,

    #[error("Invalid JSON payload: {0}")]
    InvalidPayload(String),

    /// A listing or connection request failed.
    #[error("Error: {0}")]
    Fetch(String),

    /// Invoke, start or approval request failed.
    #[error("Error: {0}")]
    Action(String),

    #[error("{0} is not available yet")]
    NotAvailable(String),
}
