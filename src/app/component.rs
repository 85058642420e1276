use ratatui::{
    layout::Rect,
    style::{Color, Style},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

pub trait ComponentRender<Props> {
    fn render(&self, frame: &mut Frame, props: Props);
}

pub struct RenderProps {
    pub title: String,
    pub area: Rect,
    pub border_color: Color,
    pub show_cursor: bool,
}

/// A bordered single-buffer text field.
pub struct InputBox<'a> {
    text: &'a str,
}

impl<'a> InputBox<'a> {
    pub fn new(text: &'a str) -> Self {
        Self { text }
    }
}

impl ComponentRender<RenderProps> for InputBox<'_> {
    fn render(&self, frame: &mut Frame, props: RenderProps) {
        let input = Paragraph::new(self.text)
            .style(Style::default().fg(Color::White))
            .wrap(Wrap { trim: false })
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(props.border_color))
                    .title(props.title),
            );

        frame.render_widget(input, props.area);

        if props.show_cursor {
            let inner_width = props.area.width.saturating_sub(2).max(1);
            let last_line = self.text.lines().last().unwrap_or_default();
            let line_count = self.text.lines().count().max(1) as u16
                + u16::from(self.text.ends_with('\n'));
            let column = if self.text.ends_with('\n') {
                0
            } else {
                last_line.chars().count() as u16 % inner_width
            };

            frame.set_cursor(
                props.area.x + 1 + column,
                (props.area.y + line_count).min(props.area.bottom().saturating_sub(2)),
            );
        }
    }
}
