pub mod catalog;
pub mod error;
pub mod key;
pub mod resource;
pub mod view;

pub use error::AppError;
pub use key::Key;
pub use resource::{
    ApprovalAction, FunctionStatus, InvokeResult, Item, ItemKey, Keyed, PipelineStatus,
    Searchable, StageStatus,
};
pub use view::View;

/// Requests sent from the UI to the executor.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Quit,
    Connect {
        profile: String,
        region: String,
    },
    FetchFunctions,
    FetchPipelines,
    FetchApprovals,
    InvokeFunction {
        name: String,
        payload: String,
    },
    StartPipeline {
        name: String,
        commit_id: Option<String>,
    },
    SetApproval {
        approval: ApprovalAction,
        approve: bool,
        comment: String,
    },
}

/// Completion messages sent back by the executor, one per `Action`.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Quit,
    Connected(Result<(), String>),
    Functions(Result<Vec<FunctionStatus>, String>),
    Pipelines(Result<Vec<PipelineStatus>, String>),
    Approvals(Result<Vec<ApprovalAction>, String>),
    FunctionInvoked(Result<InvokeResult, String>),
    PipelineStarted(Result<(), String>),
    ApprovalSet(Result<(), String>),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    Key(Key),
    Completed(Outcome),
    /// The terminal changed size; the next draw picks it up.
    Resize,
    Tick,
}
