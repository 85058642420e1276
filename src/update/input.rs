//! Key handling for the modal text buffers: manual entry, search query and payload editor.

use crate::{
    core::{Action, AppError, Key, View},
    model::Model,
};

use super::navigation;

pub fn edit_text(model: Model, key: Key) -> (Model, Option<Action>) {
    match key {
        Key::Char(c) => {
            let mut text_input = model.text_input.clone();
            text_input.push(c);
            (Model { text_input, ..model }, None)
        }
        Key::Backspace => {
            let mut text_input = model.text_input.clone();
            text_input.pop();
            (Model { text_input, ..model }, None)
        }
        Key::Back => (model.clear_text_input(), None),
        Key::SubmitText | Key::Confirm => submit_text(model),
        _ => (model, None),
    }
}

fn submit_text(model: Model) -> (Model, Option<Action>) {
    let value = model.text_input.trim().to_string();

    match model.current_view {
        View::AuthConfig if value.is_empty() => (model.reject(AppError::EmptyProfile), None),
        View::AuthConfig => (
            navigation::choose_profile(model.clear_text_input(), value),
            None,
        ),
        View::AwsConfig if value.is_empty() => (model.reject(AppError::EmptyRegion), None),
        View::AwsConfig => navigation::choose_region(model.clear_text_input(), value),
        View::Summary if model.is_start_pipeline_flow() => {
            if value.is_empty() {
                return (model.reject(AppError::EmptyCommitId), None);
            }
            let model = Model {
                commit_id: value,
                manual_commit_id: true,
                ..model
            };
            (model.clear_text_input().show(View::ExecutingAction), None)
        }
        View::Summary => {
            if value.is_empty() {
                return (model.reject(AppError::EmptyComment), None);
            }
            let model = Model {
                approval_comment: value,
                ..model
            };
            (model.clear_text_input().show(View::ExecutingAction), None)
        }
        _ => (model.clear_text_input(), None),
    }
}

pub fn edit_query(model: Model, key: Key) -> (Model, Option<Action>) {
    match key {
        Key::Char(c) => {
            let mut query = model.search.query.clone();
            query.push(c);
            (model.set_search_query(query), None)
        }
        Key::Backspace => {
            let mut query = model.search.query.clone();
            query.pop();
            (model.set_search_query(query), None)
        }
        Key::Back => (model.deactivate_search(), None),
        Key::SubmitText | Key::Confirm => navigation::forward(model),
        Key::NavigateUp
        | Key::NavigateDown
        | Key::JumpTop
        | Key::JumpBottom
        | Key::PageForward
        | Key::PageBackward => super::command(model, key),
        _ => (model, None),
    }
}

pub fn edit_payload(model: Model, key: Key) -> (Model, Option<Action>) {
    match key {
        Key::Char(c) => {
            let mut lambda_payload = model.lambda_payload.clone();
            lambda_payload.push(c);
            (Model { lambda_payload, ..model }, None)
        }
        Key::SubmitText => {
            let mut lambda_payload = model.lambda_payload.clone();
            lambda_payload.push('\n');
            (Model { lambda_payload, ..model }, None)
        }
        Key::Backspace => {
            let mut lambda_payload = model.lambda_payload.clone();
            lambda_payload.pop();
            (Model { lambda_payload, ..model }, None)
        }
        Key::Back | Key::ToggleInputMode => (
            Model {
                is_lambda_input_mode: false,
                ..model
            },
            None,
        ),
        Key::Execute => navigation::invoke(model),
        _ => (model, None),
    }
}
