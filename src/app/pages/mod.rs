use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    Frame,
};

use crate::{
    core::View,
    model::{InputMode, Model, SPINNER_FRAMES},
};

use self::{
    error::{ErrorPage, SuccessPage},
    help::HelpPage,
    lambda::{EditorPage, ResponsePage},
    listing::ListingPage,
};

use super::component::{ComponentRender, InputBox, RenderProps};

mod error;
mod help;
mod lambda;
mod listing;

/// Draws the frame around whichever page the current view calls for.
pub struct AppRouter;

impl AppRouter {
    fn render_body(&self, frame: &mut Frame, model: &Model, area: Rect) {
        match model.current_view {
            View::Error => ErrorPage.render(frame, (model, area)),
            View::Success => SuccessPage.render(frame, (model, area)),
            View::Help => HelpPage.render(frame, (model, area)),
            View::LambdaExecute => EditorPage.render(frame, (model, area)),
            View::LambdaResponse => ResponsePage.render(frame, (model, area)),
            _ if model.manual_input => {
                let chunks = Layout::default()
                    .direction(Direction::Vertical)
                    .constraints([Constraint::Min(1), Constraint::Length(3)])
                    .split(area);

                ListingPage.render(frame, (model, chunks[0]));
                InputBox::new(&model.text_input).render(
                    frame,
                    RenderProps {
                        title: input_title(model).to_string(),
                        area: chunks[1],
                        border_color: Color::Yellow,
                        show_cursor: true,
                    },
                );
            }
            _ => ListingPage.render(frame, (model, area)),
        }
    }
}

impl ComponentRender<&Model> for AppRouter {
    fn render(&self, frame: &mut Frame, model: &Model) {
        let searching = model.search.is_active && model.current_view.is_listing();

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Min(1),
                Constraint::Length(if searching { 3 } else { 0 }),
                Constraint::Length(1),
                Constraint::Length(1),
            ])
            .split(frame.size());

        frame.render_widget(
            Text::styled(
                title(model),
                Style::default()
                    .fg(Color::LightBlue)
                    .add_modifier(Modifier::BOLD),
            ),
            chunks[0],
        );
        frame.render_widget(
            Text::styled(context(model), Style::default().fg(Color::Gray)),
            chunks[1],
        );

        self.render_body(frame, model, chunks[2]);

        if searching {
            InputBox::new(&model.search.query).render(
                frame,
                RenderProps {
                    title: "Search".to_string(),
                    area: chunks[3],
                    border_color: Color::White,
                    show_cursor: true,
                },
            );
        }

        frame.render_widget(status_line(model), chunks[4]);
        frame.render_widget(
            Text::styled(
                help_text(model),
                Style::default().fg(Color::White).bg(Color::DarkGray),
            ),
            chunks[5],
        );
    }
}

pub fn title(model: &Model) -> String {
    let title = model.current_view.title();
    if !model.current_view.is_listing() || model.pagination.total_items < 0 {
        return title.to_string();
    }

    format!(
        "{} - Page {} of {} ({} items)",
        title,
        model.pagination.current_page,
        model.pagination.total_pages(),
        model.pagination.total_items
    )
}

fn context(model: &Model) -> String {
    let mut parts: Vec<String> = Vec::new();

    if !model.aws_profile.is_empty() {
        parts.push(format!("Profile: {}", model.aws_profile));
    }
    if !model.aws_region.is_empty() {
        parts.push(format!("Region: {}", model.aws_region));
    }
    if let Some(service) = &model.selected_service {
        parts.push(format!("Service: {}", service.name));
    }
    if let Some(category) = &model.selected_category {
        parts.push(format!("Category: {}", category.name));
    }
    if let Some(operation) = &model.selected_operation {
        parts.push(format!("Operation: {}", operation.name));
    }
    if let Some(function) = &model.selected_function {
        parts.push(format!("Function: {}", function.name));
    }
    if let Some(pipeline) = &model.selected_pipeline {
        parts.push(format!("Pipeline: {}", pipeline.name));
    }
    if let Some(approval) = &model.selected_approval {
        parts.push(format!(
            "Approval: {}/{}/{}",
            approval.pipeline_name, approval.stage_name, approval.action_name
        ));
    }

    parts.join(" | ")
}

fn status_line(model: &Model) -> Line<'static> {
    if model.is_loading {
        let frame = SPINNER_FRAMES[model.spinner_frame % SPINNER_FRAMES.len()];
        return Line::from(Span::styled(
            format!("{} {}", frame, model.loading_message),
            Style::default().fg(Color::Yellow),
        ));
    }

    if let Some(error) = &model.error_message {
        return Line::from(Span::styled(
            error.to_string(),
            Style::default().fg(Color::Red),
        ));
    }

    Line::default()
}

fn input_title(model: &Model) -> &'static str {
    match model.current_view {
        View::AuthConfig => "Profile",
        View::AwsConfig => "Region",
        View::Summary if model.is_start_pipeline_flow() => "Commit ID",
        View::Summary => "Comment",
        _ => "Input",
    }
}

pub fn help_text(model: &Model) -> &'static str {
    if model.is_loading {
        return "help: [q/ctrl+c] quit";
    }

    match model.input_mode() {
        InputMode::Payload => {
            "help: [esc] command mode, [enter] new line, [F5/ctrl+enter] execute"
        }
        InputMode::Text if model.manual_input => "help: [enter] submit, [esc] cancel",
        InputMode::Text => {
            "help: [type] filter, [↑/↓] move, [←/→] page, [enter] select, [esc] clear search"
        }
        InputMode::Command => match model.current_view {
            View::Providers => "help: [enter] select, [↑/↓] move, [?] help, [q] quit",
            View::FunctionStatus | View::PipelineStatus | View::Approvals => {
                "help: [enter] select, [j/k] move, [h/l] page, [/] search, [esc] back, [q] quit"
            }
            View::LambdaExecute => {
                "help: [i] edit payload, [enter/F5] execute, [esc] back, [q] quit"
            }
            View::LambdaResponse => "help: [j/k] scroll, [PgUp/PgDn] page, [esc] back, [q] quit",
            View::Error => "help: [enter/esc] dismiss, [q] quit",
            View::Success => "help: [enter] continue, [q] quit",
            View::Help => "help: [enter/esc] close",
            _ => "help: [enter] select, [j/k] move, [esc] back, [?] help, [q] quit",
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Item, PipelineStatus};

    #[test]
    fn listing_title_reports_pages() {
        let items = (0..12)
            .map(|i| {
                Item::Pipeline(PipelineStatus {
                    name: format!("p-{:02}", i),
                    stages: vec![],
                })
            })
            .collect();
        let model = Model::new(5).show(View::PipelineStatus);
        assert_eq!(title(&model), "Select Pipeline");

        let model = model.load_listing(items).next_page();
        assert_eq!(title(&model), "Select Pipeline - Page 2 of 3 (12 items)");
    }

    #[test]
    fn loading_only_advertises_quit() {
        let model = Model::new(5).start_loading("Loading pipelines...");

        assert_eq!(help_text(&model), "help: [q/ctrl+c] quit");
    }
}
