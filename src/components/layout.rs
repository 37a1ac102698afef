// ABOUTME: Top-level TUI layout: title bar, active dialog, notice footer, help overlay

use crate::app::{AppState, DialogKind};
use crate::api::NoteLevel;
use crate::components::{HelpComponent, IdeDialogComponent, ManagementDialogComponent};
use crate::ide::lock_state;
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph},
};

pub struct LayoutComponent {
    ide_dialog: IdeDialogComponent,
    management_dialog: ManagementDialogComponent,
    help: HelpComponent,
}

impl LayoutComponent {
    pub fn new() -> Self {
        Self {
            ide_dialog: IdeDialogComponent::new(),
            management_dialog: ManagementDialogComponent::new(),
            help: HelpComponent::new(),
        }
    }

    pub fn render(&self, frame: &mut Frame, state: &AppState) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // title bar
                Constraint::Min(1),    // dialog
                Constraint::Length(3), // notices
                Constraint::Length(1), // key hints
            ])
            .split(frame.size());

        self.render_title(frame, chunks[0], state);

        match state.dialog {
            DialogKind::Student => self.ide_dialog.render(frame, chunks[1], state),
            DialogKind::Admin => self.management_dialog.render(frame, chunks[1], state),
        }

        self.render_notices(frame, chunks[2], state);
        self.render_hints(frame, chunks[3], state);

        if state.help_visible {
            self.help.render(frame, frame.size());
        }
    }

    fn render_title(&self, frame: &mut Frame, area: Rect, state: &AppState) {
        let variant = match state.dialog {
            DialogKind::Student => "Cloud IDE",
            DialogKind::Admin => "Management IDE",
        };
        let title = Line::from(vec![
            Span::styled(
                " Anubis ",
                Style::default().fg(Color::Black).bg(Color::Cyan).bold(),
            ),
            Span::raw(" "),
            Span::styled(variant, Style::default().fg(Color::Cyan)),
        ]);
        frame.render_widget(Paragraph::new(title), area);
    }

    fn render_notices(&self, frame: &mut Frame, area: Rect, state: &AppState) {
        let ide = lock_state(&state.ide);
        let lines: Vec<Line> = ide
            .current_notices()
            .rev()
            .take(area.height.saturating_sub(1) as usize)
            .map(|notice| {
                let style = match notice.level {
                    NoteLevel::Error => Style::default().fg(Color::Red),
                    NoteLevel::Warning => Style::default().fg(Color::Yellow),
                    NoteLevel::Success => Style::default().fg(Color::Green),
                    NoteLevel::Info => Style::default().fg(Color::Gray),
                };
                Line::from(Span::styled(notice.message.clone(), style))
            })
            .collect();

        let block = Block::default().borders(Borders::TOP);
        frame.render_widget(Paragraph::new(lines).block(block), area);
    }

    fn render_hints(&self, frame: &mut Frame, area: Rect, state: &AppState) {
        let hints = match state.dialog {
            DialogKind::Student => {
                " enter launch │ s stop │ a autosave │ p storage │ d admin │ r refresh │ ? help │ q quit"
            }
            DialogKind::Admin => {
                " enter launch │ s stop │ ↑/↓ field │ space edit/toggle │ d student │ ? help │ q quit"
            }
        };
        frame.render_widget(
            Paragraph::new(hints).style(Style::default().fg(Color::DarkGray)),
            area,
        );
    }
}

/// Center a `width` x `height` rect inside `area`, clamped to fit.
pub fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

/// Frames for the launch-in-progress spinner.
pub const SPINNER_FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

pub fn spinner_frame(tick: usize) -> &'static str {
    SPINNER_FRAMES[tick % SPINNER_FRAMES.len()]
}
