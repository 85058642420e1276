use ratatui::{
    layout::{Constraint, Rect},
    style::{Color, Style, Stylize},
    text::Text,
    widgets::{Block, Borders, Paragraph, Row, Table, TableState, Wrap},
    Frame,
};

use crate::{
    app::component::ComponentRender,
    core::View,
    model::{table, Model},
};

/// Every table-shaped view: menus, listings, stages, details and pickers.
pub struct ListingPage;

impl ComponentRender<(&Model, Rect)> for ListingPage {
    fn render(&self, frame: &mut Frame, (model, area): (&Model, Rect)) {
        let block = Block::default()
            .title(model.current_view.title())
            .borders(Borders::ALL);

        let columns = table::columns(model);
        let rows = table::rows(model);

        if rows.is_empty() {
            let text = Paragraph::new(Text::styled(empty_text(model), Style::default().fg(Color::Gray)))
                .wrap(Wrap { trim: false })
                .block(block);
            frame.render_widget(text, area);
            return;
        }

        let widths: Vec<Constraint> = columns
            .iter()
            .enumerate()
            .map(|(i, column)| {
                if i + 1 == columns.len() {
                    Constraint::Min(column.width)
                } else {
                    Constraint::Length(column.width)
                }
            })
            .collect();

        let table = Table::new(rows.into_iter().map(Row::new), widths)
            .column_spacing(1)
            .header(
                Row::new(columns.iter().map(|column| column.title))
                    .underlined()
                    .bold(),
            )
            .block(block)
            .highlight_style(Style::default().fg(Color::Yellow).bg(Color::DarkGray))
            .highlight_symbol(">> ");

        let mut state = TableState::default().with_selected(Some(model.cursor));
        frame.render_stateful_widget(table, area, &mut state);
    }
}

fn empty_text(model: &Model) -> String {
    if model.is_loading {
        return String::new();
    }

    match model.current_view {
        View::Approvals => "No pending approvals found".to_string(),
        View::PipelineStatus => "No pipelines found".to_string(),
        View::FunctionStatus => "No functions found".to_string(),
        View::PipelineStages => "This pipeline has no stages".to_string(),
        View::Summary => match &model.selected_approval {
            Some(approval) => format!(
                "Pipeline: {}\nStage: {}\nAction: {}\nDecision: {}\n\nEnter a comment for this decision.",
                approval.pipeline_name,
                approval.stage_name,
                approval.action_name,
                if model.approve_action {
                    "Approve"
                } else {
                    "Reject"
                }
            ),
            None => "No approval selected".to_string(),
        },
        _ => "Nothing to show".to_string(),
    }
}
