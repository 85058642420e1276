use tracing::debug;

use crate::{
    core::{
        catalog::{self, OperationKind},
        Action, AppError, View,
    },
    model::{table, Model, DEFAULT_LAMBDA_PAYLOAD},
};

/// The fetch that populates a listing view.
pub fn fetch_for(view: View) -> Option<Action> {
    match view {
        View::FunctionStatus => Some(Action::FetchFunctions),
        View::PipelineStatus => Some(Action::FetchPipelines),
        View::Approvals => Some(Action::FetchApprovals),
        _ => None,
    }
}

/// Confirm on the highlighted row.
pub fn forward(model: Model) -> (Model, Option<Action>) {
    debug!(view = ?model.current_view, cursor = model.cursor, "forward");

    match model.current_view {
        View::Providers => (select_provider(model), None),
        View::AuthMethodSelect => match catalog::AUTH_METHODS.get(model.cursor).copied() {
            Some(method) => {
                let model = Model {
                    selected_auth_method: Some(method),
                    ..model
                }
                .show(View::AuthConfig);
                (highlight_preferred_profile(model), None)
            }
            None => (model, None),
        },
        View::AuthConfig => match model.cursor {
            0 => (model.begin_text_input(""), None),
            row => match model.profiles.get(row - 1).cloned() {
                Some(profile) => (choose_profile(model, profile), None),
                None => (model, None),
            },
        },
        View::AwsConfig => match model.cursor {
            0 => (model.begin_text_input(""), None),
            row => match catalog::REGIONS.get(row - 1) {
                Some(region) => choose_region(model, region.to_string()),
                None => (model, None),
            },
        },
        View::SelectService => match table::services().get(model.cursor).copied() {
            Some(service) => {
                let model = Model {
                    selected_service: Some(service),
                    ..model
                };
                (model.show(View::SelectCategory), None)
            }
            None => (model, None),
        },
        View::SelectCategory => match table::categories(&model).get(model.cursor).copied() {
            Some(category) => {
                let model = Model {
                    selected_category: Some(category),
                    ..model
                };
                (model.show(View::SelectOperation), None)
            }
            None => (model, None),
        },
        View::SelectOperation => select_operation(model),
        View::Approvals => (select_approval(model), None),
        View::Confirmation => {
            let model = Model {
                approve_action: model.cursor == 0,
                approval_comment: String::new(),
                ..model
            };
            (model.show(View::Summary).begin_text_input(""), None)
        }
        View::Summary => (confirm_summary(model), None),
        View::PipelineStatus => (select_pipeline(model), None),
        View::ExecutingAction => execute_action(model),
        View::FunctionStatus => (select_function(model), None),
        View::FunctionDetails => (model.show(View::LambdaExecute), None),
        View::LambdaExecute => invoke(model),
        View::PipelineStages | View::LambdaResponse => (model, None),
        View::Error => (dismiss_error(model), None),
        View::Success => (reset_to_operations(model), None),
        View::Help => (leave_help(model), None),
    }
}

/// Cancel out of the current view to its predecessor.
pub fn back(model: Model) -> (Model, Option<Action>) {
    debug!(view = ?model.current_view, "back");

    match model.current_view {
        View::Providers => (model, None),
        View::AuthMethodSelect => {
            let model = Model {
                selected_provider: None,
                ..model
            };
            (model.show(View::Providers), None)
        }
        View::AuthConfig => {
            let model = Model {
                selected_auth_method: None,
                ..model
            };
            (model.show(View::AuthMethodSelect), None)
        }
        View::AwsConfig => {
            let model = Model {
                aws_profile: String::new(),
                ..model
            };
            (highlight_preferred_profile(model.show(View::AuthConfig)), None)
        }
        View::SelectService => {
            let model = Model {
                aws_region: String::new(),
                ..model
            };
            (highlight_preferred_region(model.show(View::AwsConfig)), None)
        }
        View::SelectCategory => {
            let model = Model {
                selected_service: None,
                ..model
            };
            (model.show(View::SelectService), None)
        }
        View::SelectOperation => {
            let model = Model {
                selected_category: None,
                selected_operation: None,
                ..model
            };
            (model.show(View::SelectCategory), None)
        }
        View::Approvals | View::PipelineStatus | View::FunctionStatus => {
            (reset_to_operations(model), None)
        }
        View::Confirmation => relist(
            Model {
                selected_approval: None,
                ..model
            },
            View::Approvals,
        ),
        View::Summary if model.is_start_pipeline_flow() => relist(
            Model {
                selected_pipeline: None,
                commit_id: String::new(),
                manual_commit_id: false,
                ..model
            },
            View::PipelineStatus,
        ),
        View::Summary => {
            let model = Model {
                approval_comment: String::new(),
                ..model
            };
            (model.clear_text_input().show(View::Confirmation), None)
        }
        View::ExecutingAction => {
            let model = model.show(View::Summary);
            if !model.is_start_pipeline_flow() {
                let comment = model.approval_comment.clone();
                (model.begin_text_input(&comment), None)
            } else if model.manual_commit_id {
                let commit_id = model.commit_id.clone();
                (model.begin_text_input(&commit_id), None)
            } else {
                (model, None)
            }
        }
        View::PipelineStages => relist(
            Model {
                selected_pipeline: None,
                ..model
            },
            View::PipelineStatus,
        ),
        View::FunctionDetails => relist(
            Model {
                selected_function: None,
                ..model
            },
            View::FunctionStatus,
        ),
        View::LambdaExecute if model.is_execute_lambda_flow => relist(
            Model {
                selected_function: None,
                is_lambda_input_mode: false,
                lambda_payload: DEFAULT_LAMBDA_PAYLOAD.to_string(),
                lambda_result: None,
                ..model
            },
            View::FunctionStatus,
        ),
        View::LambdaExecute => {
            let model = Model {
                is_lambda_input_mode: false,
                ..model
            };
            (model.show(View::FunctionDetails), None)
        }
        View::LambdaResponse => {
            let model = Model {
                response_scroll: 0,
                success_message: None,
                ..model
            };
            (model.show(View::LambdaExecute), None)
        }
        View::Error => (dismiss_error(model), None),
        View::Help => (leave_help(model), None),
        View::Success => (reset_to_operations(model), None),
    }
}

/// Validates the payload and asks for the selected function to be invoked.
pub fn invoke(model: Model) -> (Model, Option<Action>) {
    let Some(name) = model.selected_function.as_ref().map(|f| f.name.clone()) else {
        return (model.reject(AppError::NoFunctionSelected), None);
    };

    let payload = if model.lambda_payload.trim().is_empty() {
        DEFAULT_LAMBDA_PAYLOAD.to_string()
    } else {
        model.lambda_payload.clone()
    };
    if let Err(err) = serde_json::from_str::<serde_json::Value>(&payload) {
        return (model.reject(AppError::InvalidPayload(err.to_string())), None);
    }

    let model = Model {
        is_lambda_input_mode: false,
        error_message: None,
        ..model
    };
    (model, Some(Action::InvokeFunction { name, payload }))
}

pub fn show_help(model: Model) -> Model {
    if matches!(model.current_view, View::Help | View::Error) {
        return model;
    }

    Model {
        return_view: Some(model.current_view),
        current_view: View::Help,
        ..model
    }
}

pub fn choose_profile(model: Model, profile: String) -> Model {
    debug!(%profile, "profile chosen");
    let model = Model {
        aws_profile: profile,
        ..model
    };
    highlight_preferred_region(model.show(View::AwsConfig))
}

pub fn choose_region(model: Model, region: String) -> (Model, Option<Action>) {
    debug!(%region, "region chosen");
    let action = Action::Connect {
        profile: model.aws_profile.clone(),
        region: region.clone(),
    };
    let model = Model {
        aws_region: region,
        ..model
    };
    (model, Some(action))
}

/// Drops every selection below the operation level and returns to the operation menu.
pub fn reset_to_operations(model: Model) -> Model {
    Model {
        selected_operation: None,
        selected_function: None,
        selected_pipeline: None,
        selected_approval: None,
        is_execute_lambda_flow: false,
        is_lambda_input_mode: false,
        lambda_payload: DEFAULT_LAMBDA_PAYLOAD.to_string(),
        lambda_result: None,
        response_scroll: 0,
        approve_action: false,
        approval_comment: String::new(),
        commit_id: String::new(),
        manual_commit_id: false,
        success_message: None,
        ..model
    }
    .clear_text_input()
    .reset_listing()
    .show(View::SelectOperation)
}

fn relist(model: Model, view: View) -> (Model, Option<Action>) {
    let model = model.reset_listing().show(view);
    (model, fetch_for(view))
}

fn select_provider(model: Model) -> Model {
    match catalog::PROVIDERS.get(model.cursor).copied() {
        Some(provider) if provider.available => Model {
            selected_provider: Some(provider),
            ..model
        }
        .show(View::AuthMethodSelect),
        Some(provider) => model.reject(AppError::NotAvailable(provider.name.to_string())),
        None => model,
    }
}

fn select_operation(model: Model) -> (Model, Option<Action>) {
    let Some(operation) = table::operations(&model).get(model.cursor).copied() else {
        return (model, None);
    };

    let view = match operation.kind {
        OperationKind::ManualApproval => View::Approvals,
        OperationKind::PipelineStatus | OperationKind::StartPipeline => View::PipelineStatus,
        OperationKind::FunctionStatus | OperationKind::ExecuteFunction => View::FunctionStatus,
    };
    let model = Model {
        selected_operation: Some(operation),
        is_execute_lambda_flow: operation.kind == OperationKind::ExecuteFunction,
        ..model
    };
    relist(model, view)
}

fn select_approval(model: Model) -> Model {
    match model.approvals.get(model.cursor).cloned() {
        Some(approval) => Model {
            selected_approval: Some(approval),
            ..model
        }
        .show(View::Confirmation),
        None => model.reject(AppError::NoApprovalSelected),
    }
}

fn select_pipeline(model: Model) -> Model {
    let Some(pipeline) = model.pipelines.get(model.cursor).cloned() else {
        return model.reject(AppError::NoPipelineSelected);
    };

    let view = if model.is_start_pipeline_flow() {
        View::Summary
    } else {
        View::PipelineStages
    };
    Model {
        selected_pipeline: Some(pipeline),
        commit_id: String::new(),
        manual_commit_id: false,
        ..model
    }
    .show(view)
}

fn select_function(model: Model) -> Model {
    let Some(function) = model.functions.get(model.cursor).cloned() else {
        return model.reject(AppError::NoFunctionSelected);
    };

    if model.is_execute_lambda_flow {
        Model {
            selected_function: Some(function),
            lambda_payload: DEFAULT_LAMBDA_PAYLOAD.to_string(),
            ..model
        }
        .show(View::LambdaExecute)
    } else {
        Model {
            selected_function: Some(function),
            ..model
        }
        .show(View::FunctionDetails)
    }
}

fn confirm_summary(model: Model) -> Model {
    if !model.is_start_pipeline_flow() {
        let comment = model.approval_comment.clone();
        return model.begin_text_input(&comment);
    }
    if model.selected_pipeline.is_none() {
        return model.reject(AppError::NoPipelineSelected);
    }

    match model.cursor {
        table::LATEST_COMMIT_ROW => Model {
            commit_id: String::new(),
            manual_commit_id: false,
            ..model
        }
        .show(View::ExecutingAction),
        table::MANUAL_COMMIT_ROW => {
            let commit_id = model.commit_id.clone();
            model.begin_text_input(&commit_id)
        }
        _ => model,
    }
}

fn execute_action(model: Model) -> (Model, Option<Action>) {
    match model.cursor {
        table::EXECUTE_ROW => submit_action(model),
        table::CANCEL_ROW => (reset_to_operations(model), None),
        _ => (model, None),
    }
}

fn submit_action(model: Model) -> (Model, Option<Action>) {
    if model.is_start_pipeline_flow() {
        let Some(name) = model.selected_pipeline.as_ref().map(|p| p.name.clone()) else {
            return (model.reject(AppError::NoPipelineSelected), None);
        };
        let commit_id = (model.manual_commit_id && !model.commit_id.is_empty())
            .then(|| model.commit_id.clone());
        return (model, Some(Action::StartPipeline { name, commit_id }));
    }

    let Some(approval) = model.selected_approval.clone() else {
        return (model.reject(AppError::NoApprovalSelected), None);
    };
    if model.approval_comment.trim().is_empty() {
        return (model.reject(AppError::EmptyComment), None);
    }
    let action = Action::SetApproval {
        approval,
        approve: model.approve_action,
        comment: model.approval_comment.clone(),
    };
    (model, Some(action))
}

fn dismiss_error(model: Model) -> Model {
    let view = model.return_view.unwrap_or(View::Providers);
    Model {
        err: None,
        return_view: None,
        ..model
    }
    .show(view)
}

fn leave_help(model: Model) -> Model {
    let view = model.return_view.unwrap_or(View::Providers);
    Model {
        current_view: view,
        return_view: None,
        ..model
    }
}

fn highlight_preferred_profile(model: Model) -> Model {
    let cursor = model
        .preferred_profile
        .as_ref()
        .and_then(|preferred| model.profiles.iter().position(|p| p == preferred))
        .map_or(0, |index| index + 1);
    Model { cursor, ..model }
}

fn highlight_preferred_region(model: Model) -> Model {
    let cursor = model
        .preferred_region
        .as_deref()
        .and_then(|preferred| catalog::REGIONS.iter().position(|r| *r == preferred))
        .map_or(0, |index| index + 1);
    Model { cursor, ..model }
}
