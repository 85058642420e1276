use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::Text,
    widgets::{Paragraph, Wrap},
    Frame,
};

use crate::{app::component::ComponentRender, model::Model};

fn centered_rect(r: Rect, percent_x: u16, percent_y: u16) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

fn render_message(frame: &mut Frame, area: Rect, heading: &str, message: &str, hint: &str, color: Color) {
    let rect = centered_rect(area, 60, 100);

    let chunks = Layout::default()
        .constraints(
            [
                Constraint::Min(1),
                Constraint::Max(1),
                Constraint::Max(1),
                Constraint::Max(4),
                Constraint::Max(1),
                Constraint::Max(1),
                Constraint::Min(1),
            ]
            .as_ref(),
        )
        .direction(Direction::Vertical)
        .split(rect);

    let heading = Text::styled(heading.to_string(), Style::default().fg(color)).centered();
    let message = Paragraph::new(Text::styled(message.to_string(), Style::default().fg(color)).centered())
        .wrap(Wrap { trim: true });
    let hint = Text::styled(hint.to_string(), Style::default().fg(Color::Gray)).centered();

    frame.render_widget(heading, chunks[1]);
    frame.render_widget(message, chunks[3]);
    frame.render_widget(hint, chunks[5]);
}

pub struct ErrorPage;

impl ComponentRender<(&Model, Rect)> for ErrorPage {
    fn render(&self, frame: &mut Frame, (model, area): (&Model, Rect)) {
        let message = model
            .err
            .as_ref()
            .map(ToString::to_string)
            .unwrap_or_else(|| "Something went wrong".to_string());

        render_message(
            frame,
            area,
            "UH OH",
            &message,
            "[enter/esc] dismiss, [q] quit",
            Color::Red,
        );
    }
}

pub struct SuccessPage;

impl ComponentRender<(&Model, Rect)> for SuccessPage {
    fn render(&self, frame: &mut Frame, (model, area): (&Model, Rect)) {
        render_message(
            frame,
            area,
            "DONE",
            model.success_message.as_deref().unwrap_or_default(),
            "[enter] back to operations, [q] quit",
            Color::Green,
        );
    }
}
