use tracing::{info, warn};

use crate::{
    core::{Action, AppError, Item, Outcome, View},
    model::Model,
};

use super::navigation;

/// Applies a completion from the executor. Every completion ends the loading state.
pub fn apply(model: Model, outcome: Outcome) -> (Model, Option<Action>) {
    let model = model.stop_loading();

    let model = match outcome {
        Outcome::Quit => model,
        Outcome::Connected(Ok(())) => {
            info!(profile = %model.aws_profile, region = %model.aws_region, "connected");
            model.show(View::SelectService)
        }
        Outcome::Connected(Err(message)) => fail_fetch(model, message),
        Outcome::Functions(result) => listing(model, result),
        Outcome::Pipelines(result) => listing(model, result),
        Outcome::Approvals(result) => listing(model, result),
        Outcome::FunctionInvoked(Ok(result)) => {
            let name = selected_function_name(&model);
            Model {
                lambda_result: Some(result),
                success_message: Some(format!("Successfully executed Lambda function: {}", name)),
                response_scroll: 0,
                ..model
            }
            .show(View::LambdaResponse)
        }
        Outcome::PipelineStarted(Ok(())) => {
            let name = model
                .selected_pipeline
                .as_ref()
                .map(|p| p.name.clone())
                .unwrap_or_default();
            succeed(model, format!("Successfully started pipeline: {}", name))
        }
        Outcome::ApprovalSet(Ok(())) => {
            let verb = if model.approve_action {
                "approved"
            } else {
                "rejected"
            };
            let message = match &model.selected_approval {
                Some(a) => format!(
                    "Successfully {} pipeline: {}, stage: {}, action: {}",
                    verb, a.pipeline_name, a.stage_name, a.action_name
                ),
                None => format!("Successfully {} pipeline", verb),
            };
            succeed(model, message)
        }
        Outcome::FunctionInvoked(Err(message))
        | Outcome::PipelineStarted(Err(message))
        | Outcome::ApprovalSet(Err(message)) => {
            warn!(%message, view = ?model.current_view, "action failed");
            model.reject(AppError::Action(message))
        }
    };

    (model, None)
}

fn listing<T: Into<Item>>(model: Model, result: Result<Vec<T>, String>) -> Model {
    match result {
        Ok(items) => {
            info!(count = items.len(), view = ?model.current_view, "listing loaded");
            model.load_listing(items.into_iter().map(Into::into).collect())
        }
        // a listing that never loaded is not worth returning to
        Err(message) => fail_fetch(navigation::reset_to_operations(model), message),
    }
}

fn fail_fetch(model: Model, message: String) -> Model {
    warn!(%message, view = ?model.current_view, "fetch failed");
    let return_view = model.current_view;
    Model {
        err: Some(AppError::Fetch(message)),
        return_view: Some(return_view),
        ..model.reset_listing()
    }
    .show(View::Error)
}

fn succeed(model: Model, message: String) -> Model {
    info!(%message);
    Model {
        success_message: Some(message),
        ..navigation::reset_to_operations(model)
    }
    .show(View::Success)
}

fn selected_function_name(model: &Model) -> String {
    model
        .selected_function
        .as_ref()
        .map(|f| f.name.clone())
        .unwrap_or_default()
}
