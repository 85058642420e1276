use ratatui::{
    layout::{Constraint, Rect},
    style::Stylize,
    widgets::{Block, Borders, Row, Table},
    Frame,
};

use crate::{app::component::ComponentRender, model::Model};

const BINDINGS: &[(&str, &str)] = &[
    ("enter", "Select the highlighted row"),
    ("esc / -", "Go back"),
    ("↑ / k, ↓ / j", "Move the highlight"),
    ("g / home, G / end", "Jump to the first or last row"),
    ("← / h, → / l", "Previous or next page"),
    ("/", "Search the current listing"),
    ("i", "Edit the Lambda payload"),
    ("F5 / ctrl+enter", "Execute the Lambda function"),
    ("PgUp / PgDn", "Scroll the Lambda response"),
    ("?", "Show this help"),
    ("q / ctrl+c", "Quit"),
];

pub struct HelpPage;

impl ComponentRender<(&Model, Rect)> for HelpPage {
    fn render(&self, frame: &mut Frame, (_, area): (&Model, Rect)) {
        let rows = BINDINGS
            .iter()
            .map(|(keys, description)| Row::new(vec![*keys, *description]));

        let table = Table::new(rows, [Constraint::Length(20), Constraint::Min(1)])
            .column_spacing(1)
            .header(Row::new(vec!["key", "action"]).underlined().bold())
            .block(Block::default().title("Keys").borders(Borders::ALL));

        frame.render_widget(table, area);
    }
}
