use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::Line,
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::{
    app::component::{ComponentRender, InputBox, RenderProps},
    core::InvokeResult,
    model::Model,
};

pub struct EditorPage;

impl ComponentRender<(&Model, Rect)> for EditorPage {
    fn render(&self, frame: &mut Frame, (model, area): (&Model, Rect)) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Min(3)])
            .split(area);

        let name = model
            .selected_function
            .as_ref()
            .map(|f| f.name.as_str())
            .unwrap_or_default();
        let mode = if model.is_lambda_input_mode {
            " INSERT "
        } else {
            " NORMAL "
        };
        frame.render_widget(
            Paragraph::new(format!("Function: {}\nMode:{}", name, mode))
                .style(Style::default().fg(Color::White)),
            chunks[0],
        );

        InputBox::new(&model.lambda_payload).render(
            frame,
            RenderProps {
                title: "Payload (JSON)".to_string(),
                area: chunks[1],
                border_color: if model.is_lambda_input_mode {
                    Color::Yellow
                } else {
                    Color::White
                },
                show_cursor: model.is_lambda_input_mode,
            },
        );
    }
}

pub struct ResponsePage;

impl ComponentRender<(&Model, Rect)> for ResponsePage {
    fn render(&self, frame: &mut Frame, (model, area): (&Model, Rect)) {
        let content = model
            .lambda_result
            .as_ref()
            .map(format_response)
            .unwrap_or_default();

        let mut lines: Vec<Line> = Vec::new();
        if let Some(message) = &model.success_message {
            lines.push(Line::styled(message.clone(), Style::default().fg(Color::Green)));
            lines.push(Line::default());
        }
        lines.extend(content.lines().map(|line| Line::from(line.to_string())));

        let response = Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .scroll((model.response_scroll, 0))
            .block(Block::default().title("Response").borders(Borders::ALL));

        frame.render_widget(response, area);
    }
}

pub fn format_response(result: &InvokeResult) -> String {
    let body = if result.payload.trim().is_empty() {
        "(empty response)".to_string()
    } else {
        serde_json::from_str::<serde_json::Value>(&result.payload)
            .ok()
            .and_then(|value| serde_json::to_string_pretty(&value).ok())
            .unwrap_or_else(|| result.payload.clone())
    };

    format!(
        "Status Code: {}\nExecuted Version: {}\n\nResponse:\n{}\n\nLogs:\n{}",
        result.status_code, result.executed_version, body, result.logs
    )
}
