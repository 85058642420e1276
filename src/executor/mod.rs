//! The background half of the app: receives [`Action`]s from the UI, talks to the
//! cloud provider and answers each one with an [`Outcome`].
//!
//! Provider calls run without a timeout and cannot be cancelled. A call that never
//! returns keeps the UI loading until the user quits.

use std::sync::Arc;

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender};
use tracing::{debug, info, warn};

use crate::core::{Action, ApprovalAction, FunctionStatus, InvokeResult, Outcome, PipelineStatus};

#[async_trait]
pub trait CloudProvider: Send + Sync {
    async fn fetch_functions(&self) -> Result<Vec<FunctionStatus>>;

    async fn fetch_pipelines(&self) -> Result<Vec<PipelineStatus>>;

    async fn fetch_approvals(&self) -> Result<Vec<ApprovalAction>>;

    async fn invoke_function(&self, name: &str, payload: &str) -> Result<InvokeResult>;

    /// Starts `name`, pinned to `commit_id` when one is given.
    async fn start_pipeline(&self, name: &str, commit_id: Option<&str>) -> Result<()>;

    async fn set_approval(
        &self,
        approval: &ApprovalAction,
        approve: bool,
        comment: &str,
    ) -> Result<()>;
}

/// Builds a provider for a chosen profile and region.
#[async_trait]
pub trait Connector: Send + Sync {
    async fn connect(&self, profile: &str, region: &str) -> Result<Arc<dyn CloudProvider>>;
}

pub struct Executor {
    connector: Box<dyn Connector>,
    provider: Option<Arc<dyn CloudProvider>>,
    action_rx: UnboundedReceiver<Action>,
    outcome_tx: UnboundedSender<Outcome>,
}

impl Executor {
    pub fn new(
        connector: Box<dyn Connector>,
        outcome_tx: UnboundedSender<Outcome>,
        action_rx: UnboundedReceiver<Action>,
    ) -> Self {
        Self {
            connector,
            provider: None,
            action_rx,
            outcome_tx,
        }
    }

    pub async fn run(mut self) {
        while let Some(action) = self.action_rx.recv().await {
            let quit = action == Action::Quit;
            let outcome = self.execute(action).await;

            if self.outcome_tx.send(outcome).is_err() {
                debug!("ui is gone, stopping executor");
                break;
            }
            if quit {
                break;
            }
        }
    }

    async fn execute(&mut self, action: Action) -> Outcome {
        info!(?action, "executing");

        match action {
            Action::Quit => Outcome::Quit,
            Action::Connect { profile, region } => {
                let result = self.connector.connect(&profile, &region).await.map(|provider| {
                    self.provider = Some(provider);
                });
                Outcome::Connected(describe(result))
            }
            Action::FetchFunctions => {
                let result = match self.provider() {
                    Ok(provider) => provider.fetch_functions().await,
                    Err(err) => Err(err),
                };
                Outcome::Functions(describe(result))
            }
            Action::FetchPipelines => {
                let result = match self.provider() {
                    Ok(provider) => provider.fetch_pipelines().await,
                    Err(err) => Err(err),
                };
                Outcome::Pipelines(describe(result))
            }
            Action::FetchApprovals => {
                let result = match self.provider() {
                    Ok(provider) => provider.fetch_approvals().await,
                    Err(err) => Err(err),
                };
                Outcome::Approvals(describe(result))
            }
            Action::InvokeFunction { name, payload } => {
                let result = match self.provider() {
                    Ok(provider) => provider.invoke_function(&name, &payload).await,
                    Err(err) => Err(err),
                };
                Outcome::FunctionInvoked(describe(result))
            }
            Action::StartPipeline { name, commit_id } => {
                let result = match self.provider() {
                    Ok(provider) => provider.start_pipeline(&name, commit_id.as_deref()).await,
                    Err(err) => Err(err),
                };
                Outcome::PipelineStarted(describe(result))
            }
            Action::SetApproval {
                approval,
                approve,
                comment,
            } => {
                let result = match self.provider() {
                    Ok(provider) => provider.set_approval(&approval, approve, &comment).await,
                    Err(err) => Err(err),
                };
                Outcome::ApprovalSet(describe(result))
            }
        }
    }

    fn provider(&self) -> Result<Arc<dyn CloudProvider>> {
        self.provider
            .clone()
            .ok_or_else(|| anyhow!("not connected to a cloud provider"))
    }
}

fn describe<T>(result: Result<T>) -> Result<T, String> {
    result.map_err(|err| {
        warn!(error = ?err, "request failed");
        err.root_cause().to_string()
    })
}
