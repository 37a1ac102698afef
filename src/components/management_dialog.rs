// ABOUTME: Admin management IDE dialog with the editable launch-settings form

use crate::app::AppState;
use crate::components::ide_dialog::{button_row, quota_header, session_line};
use crate::components::layout::centered_rect;
use crate::ide::lock_state;
use crate::models::SettingValue;
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Clear, Paragraph, Row, Table},
};

pub struct ManagementDialogComponent;

impl ManagementDialogComponent {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, state: &AppState) {
        let ide = lock_state(&state.ide);
        let field_count = ide.settings.len() as u16;
        drop(ide);

        let height = (11 + field_count).min(area.height);
        let dialog_area = centered_rect(area, 76.min(area.width.saturating_sub(2)), height);
        frame.render_widget(Clear, dialog_area);

        let block = Block::default()
            .title(" Anubis Management IDE ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Magenta));
        let inner = block.inner(dialog_area);
        frame.render_widget(block, dialog_area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2),                   // quota header
                Constraint::Length(field_count.max(1)),  // settings form
                Constraint::Length(1),                   // editing hint
                Constraint::Length(1),                   // session line
                Constraint::Length(1),                   // buttons
            ])
            .split(inner);

        let sessions_available = lock_state(&state.ide).sessions_available;
        frame.render_widget(Paragraph::new(quota_header(sessions_available)), chunks[0]);

        self.render_form(frame, chunks[1], state);

        if state.form.editing {
            let fields = state.form_fields();
            let field = fields
                .get(state.form.selected)
                .cloned()
                .unwrap_or_default();
            frame.render_widget(
                Paragraph::new(format!("{field} = {}▏ (enter to save, esc to cancel)", state.form.buffer))
                    .style(Style::default().fg(Color::Yellow)),
                chunks[2],
            );
        }

        frame.render_widget(Paragraph::new(session_line(state)), chunks[3]);
        frame.render_widget(Paragraph::new(button_row(state)), chunks[4]);
    }

    fn render_form(&self, frame: &mut Frame, area: Rect, state: &AppState) {
        let ide = lock_state(&state.ide);

        if ide.settings.is_empty() {
            frame.render_widget(
                Paragraph::new("… loading default settings")
                    .style(Style::default().fg(Color::DarkGray)),
                area,
            );
            return;
        }

        let held = ide.session.is_some();
        let rows: Vec<Row> = ide
            .settings
            .fields()
            .enumerate()
            .map(|(index, (name, value))| {
                let selected = index == state.form.selected;
                let marker = if selected { "▸" } else { " " };
                let rendered = match value {
                    SettingValue::Flag(true) => "[x]".to_string(),
                    SettingValue::Flag(false) => "[ ]".to_string(),
                    SettingValue::Text(text) => text.clone(),
                };
                let style = if held {
                    Style::default().fg(Color::DarkGray)
                } else if selected {
                    Style::default().fg(Color::Black).bg(Color::White)
                } else {
                    Style::default()
                };
                Row::new(vec![format!("{marker} {name}"), rendered]).style(style)
            })
            .collect();

        let table = Table::new(
            rows,
            [Constraint::Length(24), Constraint::Min(10)],
        );
        frame.render_widget(table, area);
    }
}
