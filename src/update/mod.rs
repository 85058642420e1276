//! The dispatch loop: one event in, the next model and at most one request out.

mod input;
mod navigation;
mod outcome;

use tracing::debug;

use crate::{
    core::{Action, Event, Key, View},
    model::{table, InputMode, Model, SPINNER_FRAMES},
};

const SCROLL_STEP: u16 = 10;

/// Handles a single event. While a request is in flight only quit, completions,
/// ticks and resizes get through; other keys are dropped.
///
/// Any request returned other than [`Action::Quit`] leaves the model loading.
pub fn update(model: Model, event: Event) -> (Model, Option<Action>) {
    let (model, action) = match event {
        Event::Tick => (tick(model), None),
        Event::Resize => (model, None),
        Event::Completed(outcome) => outcome::apply(model, outcome),
        Event::Key(Key::Quit) => (model, Some(Action::Quit)),
        Event::Key(key) if model.is_loading => {
            debug!(?key, "discarding key while loading");
            (model, None)
        }
        Event::Key(key) => handle_key(model, key),
    };

    match action {
        Some(action) if action != Action::Quit => {
            let model = model.start_loading(loading_message(&action));
            (model, Some(action))
        }
        action => (model, action),
    }
}

pub fn loading_message(action: &Action) -> &'static str {
    match action {
        Action::Quit => "",
        Action::Connect { .. } => "Connecting to AWS...",
        Action::FetchFunctions => "Loading functions...",
        Action::FetchPipelines => "Loading pipelines...",
        Action::FetchApprovals => "Loading approvals...",
        Action::InvokeFunction { .. } => "Executing Lambda function...",
        Action::StartPipeline { .. } => "Starting pipeline...",
        Action::SetApproval { .. } => "Executing approval action...",
    }
}

fn tick(model: Model) -> Model {
    if !model.is_loading {
        return model;
    }
    Model {
        spinner_frame: (model.spinner_frame + 1) % SPINNER_FRAMES.len(),
        ..model
    }
}

fn handle_key(model: Model, key: Key) -> (Model, Option<Action>) {
    match model.input_mode() {
        InputMode::Payload => input::edit_payload(model, key),
        InputMode::Text if model.manual_input => input::edit_text(model, key),
        InputMode::Text => input::edit_query(model, key),
        InputMode::Command => command(model, key),
    }
}

fn command(model: Model, key: Key) -> (Model, Option<Action>) {
    let view = model.current_view;

    match key {
        Key::Confirm => navigation::forward(model),
        Key::Back => navigation::back(model),
        Key::Help => (navigation::show_help(model), None),
        Key::Execute if view == View::LambdaExecute => navigation::invoke(model),
        Key::ToggleInputMode if view == View::LambdaExecute => (
            Model {
                is_lambda_input_mode: true,
                error_message: None,
                ..model
            },
            None,
        ),
        Key::PageForward if view.is_listing() => (model.next_page(), None),
        Key::PageBackward if view.is_listing() => (model.previous_page(), None),
        Key::ActivateSearch if view.is_listing() => (model.activate_search(), None),
        Key::NavigateUp
        | Key::NavigateDown
        | Key::JumpTop
        | Key::JumpBottom
        | Key::ScrollUp
        | Key::ScrollDown => (move_cursor(model, key), None),
        _ => (model, None),
    }
}

fn move_cursor(model: Model, key: Key) -> Model {
    if model.current_view == View::LambdaResponse {
        let response_scroll = match key {
            Key::NavigateUp => model.response_scroll.saturating_sub(1),
            Key::NavigateDown => model.response_scroll.saturating_add(1),
            Key::ScrollUp => model.response_scroll.saturating_sub(SCROLL_STEP),
            Key::ScrollDown => model.response_scroll.saturating_add(SCROLL_STEP),
            Key::JumpTop => 0,
            _ => model.response_scroll,
        };
        return Model {
            response_scroll,
            ..model
        };
    }

    let last = table::row_count(&model).saturating_sub(1);
    let cursor = match key {
        Key::NavigateUp => model.cursor.saturating_sub(1),
        Key::NavigateDown => (model.cursor + 1).min(last),
        Key::JumpTop => 0,
        Key::JumpBottom => last,
        _ => model.cursor,
    };
    Model { cursor, ..model }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{
        catalog::{self, OperationKind},
        AppError, ApprovalAction, FunctionStatus, InvokeResult, Item, Outcome, PipelineStatus,
        StageStatus,
    };

    fn press(model: Model, key: Key) -> (Model, Option<Action>) {
        update(model, Event::Key(key))
    }

    fn press_all(model: Model, keys: &[Key]) -> Model {
        keys.iter().fold(model, |model, key| press(model, *key).0)
    }

    fn type_text(model: Model, text: &str) -> Model {
        text.chars()
            .fold(model, |model, c| press(model, Key::Char(c)).0)
    }

    fn complete(model: Model, outcome: Outcome) -> Model {
        let (model, action) = update(model, Event::Completed(outcome));
        assert_eq!(action, None);
        model
    }

    fn at_operation(service: usize, kind: OperationKind) -> Model {
        let service = catalog::SERVICES[service];
        let category = service.categories[0];
        let operation = category.operations.iter().find(|o| o.kind == kind).copied();
        Model {
            aws_profile: "default".into(),
            aws_region: "eu-west-1".into(),
            selected_service: Some(service),
            selected_category: Some(category),
            selected_operation: operation,
            is_execute_lambda_flow: kind == OperationKind::ExecuteFunction,
            ..Model::new(5)
        }
    }

    fn functions(count: usize) -> Vec<FunctionStatus> {
        (0..count)
            .map(|i| FunctionStatus {
                name: format!("fn-{}", i),
                runtime: "python3.12".into(),
                ..Default::default()
            })
            .collect()
    }

    fn pipelines(count: usize) -> Vec<PipelineStatus> {
        (0..count)
            .map(|i| PipelineStatus {
                name: format!("pipeline-{:02}", i),
                stages: vec![StageStatus {
                    name: "Source".into(),
                    status: "Succeeded".into(),
                    last_updated: "N/A".into(),
                }],
            })
            .collect()
    }

    fn function_listing(kind: OperationKind) -> Model {
        at_operation(1, kind)
            .show(View::FunctionStatus)
            .load_listing(functions(7).into_iter().map(Item::from).collect())
    }

    fn pipeline_listing(kind: OperationKind) -> Model {
        at_operation(0, kind)
            .show(View::PipelineStatus)
            .load_listing(pipelines(12).into_iter().map(Item::from).collect())
    }

    fn approval_listing() -> Model {
        let approval = ApprovalAction {
            pipeline_name: "deploy".into(),
            stage_name: "Prod".into(),
            action_name: "Gate".into(),
            token: "tok-1".into(),
        };
        at_operation(0, OperationKind::ManualApproval)
            .show(View::Approvals)
            .load_listing(vec![Item::from(approval)])
    }

    #[test]
    fn selecting_an_operation_fetches_its_listing() {
        let model = Model {
            cursor: 0,
            ..at_operation(1, OperationKind::FunctionStatus).show(View::SelectOperation)
        };
        let model = Model {
            selected_operation: None,
            is_execute_lambda_flow: false,
            ..model
        };

        let (model, action) = press(model, Key::Confirm);

        assert_eq!(action, Some(Action::FetchFunctions));
        assert_eq!(model.current_view, View::FunctionStatus);
        assert!(model.is_execute_lambda_flow);
        assert!(model.is_loading);
        assert_eq!(model.loading_message, "Loading functions...");

        let model = complete(model, Outcome::Functions(Ok(functions(7))));
        assert!(!model.is_loading);
        assert_eq!(model.functions.len(), 5);
    }

    #[test]
    fn back_from_editor_in_execute_flow_returns_to_listing() {
        let (model, _) = press(function_listing(OperationKind::ExecuteFunction), Key::Confirm);
        assert_eq!(model.current_view, View::LambdaExecute);
        assert_eq!(model.selected_function.as_ref().map(|f| f.name.as_str()), Some("fn-0"));

        let (model, action) = press(model, Key::Back);

        assert_eq!(model.current_view, View::FunctionStatus);
        assert_eq!(model.selected_function, None);
        assert_eq!(action, Some(Action::FetchFunctions));
        assert!(model.pagination.all_items.is_empty());
    }

    #[test]
    fn back_from_editor_via_details_keeps_function() {
        let model = press_all(
            function_listing(OperationKind::FunctionStatus),
            &[Key::NavigateDown, Key::Confirm],
        );
        assert_eq!(model.current_view, View::FunctionDetails);
        let model = press(model, Key::Confirm).0;
        assert_eq!(model.current_view, View::LambdaExecute);

        let (model, action) = press(model, Key::Back);

        assert_eq!(action, None);
        assert_eq!(model.current_view, View::FunctionDetails);
        assert_eq!(model.selected_function.as_ref().map(|f| f.name.as_str()), Some("fn-1"));
    }

    #[test]
    fn back_from_response_returns_to_editor() {
        for kind in [OperationKind::ExecuteFunction, OperationKind::FunctionStatus] {
            let mut model = press(function_listing(kind), Key::Confirm).0;
            if model.current_view == View::FunctionDetails {
                model = press(model, Key::Confirm).0;
            }
            let model = type_text(press(model, Key::ToggleInputMode).0, "");
            let model = Model {
                lambda_payload: r#"{"id": 1}"#.into(),
                ..model
            };

            let (model, action) = press(model, Key::Execute);
            assert_eq!(
                action,
                Some(Action::InvokeFunction {
                    name: "fn-0".into(),
                    payload: r#"{"id": 1}"#.into(),
                })
            );
            let model = complete(
                model,
                Outcome::FunctionInvoked(Ok(InvokeResult {
                    status_code: 200,
                    ..Default::default()
                })),
            );
            assert_eq!(model.current_view, View::LambdaResponse);
            assert_eq!(
                model.success_message.as_deref(),
                Some("Successfully executed Lambda function: fn-0")
            );

            let (model, action) = press(model, Key::Back);

            assert_eq!(action, None);
            assert_eq!(model.current_view, View::LambdaExecute);
            assert_eq!(model.selected_function.as_ref().map(|f| f.name.as_str()), Some("fn-0"));
            assert_eq!(model.lambda_payload, r#"{"id": 1}"#);
        }
    }

    #[test]
    fn keys_are_discarded_while_loading() {
        let model = pipeline_listing(OperationKind::PipelineStatus)
            .activate_search()
            .set_search_query("pipeline-0")
            .start_loading("Loading pipelines...");
        let keys = [
            Key::Confirm,
            Key::Back,
            Key::NavigateDown,
            Key::PageForward,
            Key::PageBackward,
            Key::JumpBottom,
            Key::ActivateSearch,
            Key::Char('x'),
            Key::Backspace,
            Key::SubmitText,
            Key::Help,
        ];

        for key in keys {
            let (next, action) = press(model.clone(), key);
            assert_eq!(action, None);
            assert_eq!(next.current_view, model.current_view);
            assert_eq!(next.pagination, model.pagination);
            assert_eq!(next.search, model.search);
        }
    }

    #[test]
    fn quit_gets_through_while_loading() {
        let model = Model::new(5).start_loading("Connecting to AWS...");

        let (model, action) = press(model, Key::Quit);

        assert_eq!(action, Some(Action::Quit));
        assert!(model.is_loading);
    }

    #[test]
    fn ticks_advance_the_spinner_only_while_loading() {
        let model = update(Model::new(5), Event::Tick).0;
        assert_eq!(model.spinner_frame, 0);

        let model = update(model.start_loading("..."), Event::Tick).0;
        assert_eq!(model.spinner_frame, 1);
    }

    #[test]
    fn fetch_failure_shows_error_then_returns() {
        let model = pipeline_listing(OperationKind::PipelineStatus).start_loading("Loading pipelines...");

        let model = complete(model, Outcome::Pipelines(Err("AccessDenied".into())));
        assert_eq!(model.current_view, View::Error);
        assert_eq!(model.err, Some(AppError::Fetch("AccessDenied".into())));
        assert_eq!(model.return_view, Some(View::SelectOperation));
        assert!(model.pagination.all_items.is_empty());
        assert!(!model.is_loading);

        let (confirmed, action) = press(model.clone(), Key::Confirm);
        assert_eq!(action, None);
        assert_eq!(confirmed.current_view, View::SelectOperation);
        assert_eq!(confirmed.err, None);
        assert_eq!(confirmed.pagination.total_items, -1);
        assert!(confirmed.pipelines.is_empty());
        assert_eq!(confirmed.selected_pipeline, None);

        let (backed, action) = press(model, Key::Back);
        assert_eq!(action, None);
        assert_eq!(backed, confirmed);
    }

    #[test]
    fn failed_connect_returns_to_region_picker() {
        let model = Model {
            aws_profile: "staging".into(),
            ..Model::new(5).show(View::AwsConfig)
        }
        .start_loading("Connecting to AWS...");

        let model = complete(model, Outcome::Connected(Err("no credentials".into())));
        assert_eq!(model.current_view, View::Error);

        let model = press(model, Key::Confirm).0;
        assert_eq!(model.current_view, View::AwsConfig);
        assert_eq!(model.aws_profile, "staging");
    }

    #[test]
    fn cancel_row_abandons_the_action() {
        let model = press_all(
            pipeline_listing(OperationKind::StartPipeline),
            &[Key::Confirm, Key::Confirm, Key::NavigateDown],
        );
        assert_eq!(model.current_view, View::ExecutingAction);
        assert_eq!(model.cursor, table::CANCEL_ROW);

        let (model, action) = press(model, Key::Confirm);

        assert_eq!(action, None);
        assert_eq!(model.current_view, View::SelectOperation);
        assert_eq!(model.selected_pipeline, None);
        assert!(!model.is_loading);
    }

    #[test]
    fn resize_only_redraws() {
        let model = pipeline_listing(OperationKind::PipelineStatus);

        let (next, action) = update(model.clone(), Event::Resize);

        assert_eq!(action, None);
        assert_eq!(next, model);
    }

    #[test]
    fn invalid_payload_is_rejected_without_a_request() {
        let model = press(function_listing(OperationKind::ExecuteFunction), Key::Confirm).0;
        let model = press(model, Key::ToggleInputMode).0;
        let model = type_text(press(model, Key::Backspace).0, "\"broken");

        let (model, action) = press(model, Key::Execute);

        assert_eq!(action, None);
        assert!(!model.is_loading);
        assert!(matches!(model.error_message, Some(AppError::InvalidPayload(_))));
        assert_eq!(model.current_view, View::LambdaExecute);
    }

    #[test]
    fn approval_flow_submits_comment_and_resets() {
        let model = press_all(approval_listing(), &[Key::Confirm, Key::NavigateDown, Key::Confirm]);
        assert_eq!(model.current_view, View::Summary);
        assert!(model.manual_input);
        assert!(!model.approve_action);

        let (model, action) = press(model, Key::SubmitText);
        assert_eq!(action, None);
        assert_eq!(model.error_message, Some(AppError::EmptyComment));

        let model = type_text(model, "looks bad");
        let model = press(model, Key::SubmitText).0;
        assert_eq!(model.current_view, View::ExecutingAction);

        let approval = model.selected_approval.clone();
        let (model, action) = press(model, Key::Confirm);
        assert_eq!(
            action,
            approval.map(|approval| Action::SetApproval {
                approval,
                approve: false,
                comment: "looks bad".into(),
            })
        );
        assert_eq!(model.loading_message, "Executing approval action...");

        let model = complete(model, Outcome::ApprovalSet(Ok(())));
        assert_eq!(model.current_view, View::Success);
        assert_eq!(
            model.success_message.as_deref(),
            Some("Successfully rejected pipeline: deploy, stage: Prod, action: Gate")
        );
        assert_eq!(model.selected_approval, None);
        assert!(model.pagination.all_items.is_empty());

        let model = press(model, Key::Confirm).0;
        assert_eq!(model.current_view, View::SelectOperation);
    }

    #[test]
    fn start_pipeline_with_manual_commit() {
        let model = press(pipeline_listing(OperationKind::StartPipeline), Key::Confirm).0;
        assert_eq!(model.current_view, View::Summary);

        let model = press_all(model, &[Key::NavigateDown, Key::Confirm]);
        assert!(model.manual_input);
        let (model, _) = press(model, Key::SubmitText);
        assert_eq!(model.error_message, Some(AppError::EmptyCommitId));

        let model = press(type_text(model, "abc123"), Key::SubmitText).0;
        assert_eq!(model.current_view, View::ExecutingAction);

        let (model, action) = press(model, Key::Confirm);
        assert_eq!(
            action,
            Some(Action::StartPipeline {
                name: "pipeline-00".into(),
                commit_id: Some("abc123".into()),
            })
        );
        assert!(model.is_loading);
    }

    #[test]
    fn action_failure_keeps_selection_inline() {
        let model = press_all(
            pipeline_listing(OperationKind::StartPipeline),
            &[Key::Confirm, Key::Confirm],
        );
        assert_eq!(model.current_view, View::ExecutingAction);
        let (model, _) = press(model, Key::Confirm);

        let model = complete(model, Outcome::PipelineStarted(Err("throttled".into())));

        assert_eq!(model.current_view, View::ExecutingAction);
        assert_eq!(model.error_message, Some(AppError::Action("throttled".into())));
        assert_eq!(model.selected_pipeline.map(|p| p.name), Some("pipeline-00".into()));
    }

    #[test]
    fn back_onto_a_listing_fetches_again() {
        let model = press_all(
            pipeline_listing(OperationKind::PipelineStatus),
            &[Key::PageForward, Key::Confirm],
        );
        assert_eq!(model.current_view, View::PipelineStages);
        assert_eq!(model.selected_pipeline.as_ref().map(|p| p.name.as_str()), Some("pipeline-05"));

        let (model, action) = press(model, Key::Back);

        assert_eq!(action, Some(Action::FetchPipelines));
        assert_eq!(model.current_view, View::PipelineStatus);
        assert_eq!(model.pagination.current_page, 1);
        assert!(model.pagination.all_items.is_empty());
        assert!(model.is_loading);
    }

    #[test]
    fn search_keys_filter_the_listing() {
        let model = press(pipeline_listing(OperationKind::PipelineStatus), Key::ActivateSearch).0;
        let model = type_text(model, "-1");

        assert_eq!(model.search.query, "-1");
        assert_eq!(model.pagination.total_items, 2);

        let model = press(model, Key::Backspace).0;
        assert_eq!(model.search.query, "-");
        assert_eq!(model.pagination.total_items, 12);

        let model = press(model, Key::Back).0;
        assert!(!model.search.is_active);
        assert_eq!(model.current_view, View::PipelineStatus);
    }

    #[test]
    fn connecting_walks_the_configuration_views() {
        let model = Model::new(5).with_profiles(vec!["default".into(), "staging".into()]);
        let model = press_all(
            model,
            &[Key::Confirm, Key::Confirm, Key::NavigateDown, Key::NavigateDown, Key::Confirm],
        );
        assert_eq!(model.current_view, View::AwsConfig);
        assert_eq!(model.aws_profile, "staging");

        let (model, action) = press(model, Key::Confirm);
        assert_eq!(model.error_message, None);
        assert!(model.manual_input);
        assert_eq!(action, None);

        let model = type_text(model, "eu-south-1");
        let (model, action) = press(model, Key::SubmitText);
        assert_eq!(
            action,
            Some(Action::Connect {
                profile: "staging".into(),
                region: "eu-south-1".into(),
            })
        );

        let model = complete(model, Outcome::Connected(Ok(())));
        assert_eq!(model.current_view, View::SelectService);
    }

    #[test]
    fn unavailable_provider_is_reported() {
        let (model, action) = press(press(Model::new(5), Key::NavigateDown).0, Key::Confirm);

        assert_eq!(action, None);
        assert_eq!(model.current_view, View::Providers);
        assert_eq!(model.error_message, Some(AppError::NotAvailable("Azure".into())));
    }

    #[test]
    fn help_returns_to_where_it_was_opened() {
        let model = press(pipeline_listing(OperationKind::PipelineStatus), Key::NavigateDown).0;

        let model = press(model, Key::Help).0;
        assert_eq!(model.current_view, View::Help);

        let model = press(model, Key::Back).0;
        assert_eq!(model.current_view, View::PipelineStatus);
        assert_eq!(model.cursor, 1);
    }
}
