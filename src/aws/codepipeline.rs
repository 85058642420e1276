use anyhow::{anyhow, Context, Result};
use aws_sdk_codepipeline::{
    operation::get_pipeline_state::GetPipelineStateOutput,
    types::{
        ActionExecutionStatus, ActionState, ApprovalResult, ApprovalStatus, SourceRevisionOverride,
        SourceRevisionType, StageState,
    },
};
use chrono::DateTime;
use futures::future::join_all;
use tracing::{debug, info};

use crate::core::{ApprovalAction, PipelineStatus, StageStatus};

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

async fn pipeline_names(client: &aws_sdk_codepipeline::Client) -> Result<Vec<String>> {
    let mut names: Vec<String> = Vec::new();
    let mut next_token = None;

    loop {
        let response = client
            .list_pipelines()
            .set_next_token(next_token)
            .send()
            .await
            .context("could not list pipelines")?;

        names.extend(
            response
                .pipelines()
                .iter()
                .filter_map(|p| p.name().map(str::to_string)),
        );

        next_token = response.next_token().map(str::to_string);
        if next_token.is_none() {
            break;
        }
    }

    Ok(names)
}

/// Every pipeline paired with its current state, fetched concurrently.
async fn pipeline_states(
    client: &aws_sdk_codepipeline::Client,
) -> Result<Vec<(String, GetPipelineStateOutput)>> {
    let names = pipeline_names(client).await?;
    let states = join_all(
        names
            .iter()
            .map(|name| client.get_pipeline_state().name(name).send()),
    )
    .await;

    names
        .into_iter()
        .zip(states)
        .map(|(name, state)| {
            let state = state.with_context(|| format!("could not get state of {}", name))?;
            Ok((name, state))
        })
        .collect()
}

pub(crate) async fn list_pipelines(
    client: &aws_sdk_codepipeline::Client,
) -> Result<Vec<PipelineStatus>> {
    let pipelines: Vec<PipelineStatus> = pipeline_states(client)
        .await?
        .into_iter()
        .map(|(name, state)| PipelineStatus {
            name,
            stages: state.stage_states().iter().map(stage_status).collect(),
        })
        .collect();

    debug!(count = pipelines.len(), "listed pipelines");
    Ok(pipelines)
}

pub(crate) async fn list_approvals(
    client: &aws_sdk_codepipeline::Client,
) -> Result<Vec<ApprovalAction>> {
    let approvals: Vec<ApprovalAction> = pipeline_states(client)
        .await?
        .iter()
        .flat_map(|(name, state)| pending_approvals(name, state.stage_states()))
        .collect();

    debug!(count = approvals.len(), "listed pending approvals");
    Ok(approvals)
}

pub(crate) async fn start_pipeline(
    client: &aws_sdk_codepipeline::Client,
    name: &str,
    commit_id: Option<&str>,
) -> Result<()> {
    let mut request = client.start_pipeline_execution().name(name);

    if let Some(commit_id) = commit_id {
        let action_name = source_action_name(client, name).await?;
        let revision = SourceRevisionOverride::builder()
            .action_name(action_name)
            .revision_type(SourceRevisionType::CommitId)
            .revision_value(commit_id)
            .build()?;
        request = request.source_revisions(revision);
    }

    let response = request
        .send()
        .await
        .with_context(|| format!("could not start {}", name))?;

    info!(
        pipeline = name,
        execution = response.pipeline_execution_id().unwrap_or_default(),
        "pipeline started"
    );
    Ok(())
}

pub(crate) async fn set_approval(
    client: &aws_sdk_codepipeline::Client,
    approval: &ApprovalAction,
    approve: bool,
    comment: &str,
) -> Result<()> {
    let status = if approve {
        ApprovalStatus::Approved
    } else {
        ApprovalStatus::Rejected
    };
    let result = ApprovalResult::builder()
        .summary(comment)
        .status(status)
        .build()?;

    client
        .put_approval_result()
        .pipeline_name(&approval.pipeline_name)
        .stage_name(&approval.stage_name)
        .action_name(&approval.action_name)
        .result(result)
        .token(&approval.token)
        .send()
        .await
        .with_context(|| format!("could not answer approval on {}", approval.pipeline_name))?;

    Ok(())
}

/// The first action of the first stage, which is where a commit override applies.
async fn source_action_name(client: &aws_sdk_codepipeline::Client, name: &str) -> Result<String> {
    let response = client
        .get_pipeline()
        .name(name)
        .send()
        .await
        .with_context(|| format!("could not describe {}", name))?;

    let action = response
        .pipeline()
        .and_then(|pipeline| pipeline.stages().first())
        .and_then(|stage| stage.actions().first());
    action
        .map(|a| a.name().to_string())
        .filter(|name| !name.is_empty())
        .ok_or_else(|| anyhow!("{} has no source action", name))
}

fn stage_status(stage: &StageState) -> StageStatus {
    let status = stage
        .latest_execution()
        .map(|execution| execution.status().as_str().to_string());

    StageStatus {
        name: stage.stage_name().unwrap_or_default().to_string(),
        status: status.unwrap_or_else(|| "Unknown".to_string()),
        last_updated: last_updated(stage.action_states()),
    }
}

fn last_updated(actions: &[ActionState]) -> String {
    actions
        .iter()
        .filter_map(|action| action.latest_execution()?.last_status_change())
        .map(|changed| changed.secs())
        .max()
        .and_then(|secs| DateTime::from_timestamp(secs, 0))
        .map(|changed| changed.format(TIMESTAMP_FORMAT).to_string())
        .unwrap_or_else(|| "N/A".to_string())
}

fn pending_approvals(pipeline: &str, stages: &[StageState]) -> Vec<ApprovalAction> {
    stages
        .iter()
        .flat_map(|stage| {
            stage.action_states().iter().filter_map(move |action| {
                let execution = action.latest_execution()?;
                if execution.status() != Some(&ActionExecutionStatus::InProgress) {
                    return None;
                }
                Some(ApprovalAction {
                    pipeline_name: pipeline.to_string(),
                    stage_name: stage.stage_name().unwrap_or_default().to_string(),
                    action_name: action.action_name().unwrap_or_default().to_string(),
                    token: execution.token()?.to_string(),
                })
            })
        })
        .collect()
}
