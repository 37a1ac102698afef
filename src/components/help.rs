// ABOUTME: Key-binding help overlay

use crate::components::layout::centered_rect;
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Clear, Paragraph},
};

pub struct HelpComponent;

impl HelpComponent {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let dialog_area = centered_rect(area, 56, 16);
        frame.render_widget(Clear, dialog_area);

        let block = Block::default()
            .title(" Keys ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Yellow));
        let inner = block.inner(dialog_area);
        frame.render_widget(block, dialog_area);

        let lines = vec![
            Line::raw("enter / l   launch session, or go to the running IDE"),
            Line::raw("s           stop the active session"),
            Line::raw("r           re-fetch the active session"),
            Line::raw("a           toggle autosave (student dialog)"),
            Line::raw("p           toggle persistent storage (student dialog)"),
            Line::raw("d           switch student/admin dialog"),
            Line::raw("↑/↓ or j/k  select a settings field (admin dialog)"),
            Line::raw("space       toggle a flag / edit a text field (admin)"),
            Line::raw("enter       save the field being edited"),
            Line::raw("esc         cancel editing, close help, or quit"),
            Line::raw("?           toggle this help"),
            Line::raw("q           quit"),
        ];

        frame.render_widget(Paragraph::new(lines), inner);
    }
}
