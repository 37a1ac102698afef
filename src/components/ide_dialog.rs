// ABOUTME: Student-facing Cloud IDE dialog: quota header, launch options, session controls

use crate::app::AppState;
use crate::components::layout::{centered_rect, spinner_frame};
use crate::ide::lock_state;
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

/// Quota header line both dialog variants share, keyed on the tri-state
/// availability flag.
pub fn quota_header(sessions_available: Option<bool>) -> Line<'static> {
    match sessions_available {
        None => Line::from(Span::styled(
            "… checking session availability",
            Style::default().fg(Color::DarkGray),
        )),
        Some(true) => Line::from(vec![
            Span::styled("● ", Style::default().fg(Color::Green)),
            Span::raw("IDE sessions are currently available"),
        ]),
        Some(false) => Line::from(vec![
            Span::styled("✗ ", Style::default().fg(Color::Red)),
            Span::raw("Maximum IDE sessions in use, try again in a few minutes"),
        ]),
    }
}

/// The "Launch Session" / "Go to IDE" / "Stop Session" button row.
pub fn button_row(state: &AppState) -> Line<'static> {
    let ide = lock_state(&state.ide);
    let mut spans: Vec<Span> = Vec::new();

    if ide.show_stop {
        spans.push(Span::styled(
            "[ Stop Session (s) ]",
            Style::default().fg(Color::Red).bold(),
        ));
        spans.push(Span::raw("  "));
    }

    let held = ide.session.is_some();
    let blocked = ide.loading || ide.sessions_available == Some(false);
    let label = if held {
        "[ Go to IDE (enter) ]"
    } else {
        "[ Launch Session (enter) ]"
    };
    let style = if held {
        Style::default().fg(Color::Green).bold()
    } else if blocked {
        Style::default().fg(Color::DarkGray)
    } else {
        Style::default().fg(Color::Cyan).bold()
    };
    spans.push(Span::styled(label, style));

    if ide.loading {
        spans.push(Span::raw(" "));
        spans.push(Span::styled(
            spinner_frame(state.spinner_frame).to_string(),
            Style::default().fg(Color::Green),
        ));
    }

    Line::from(spans)
}

/// Session state line, "No Active IDE" when nothing has been observed.
pub fn session_line(state: &AppState) -> Line<'static> {
    let ide = lock_state(&state.ide);
    match (&ide.session, &ide.session_label) {
        (Some(session), _) => Line::from(vec![
            Span::styled(
                format!("{} ", session.state.indicator()),
                Style::default().fg(Color::Green),
            ),
            Span::raw(format!("Session {} — {}", session.id, session.state.label())),
        ]),
        (None, Some(label)) => Line::from(Span::raw(label.clone())),
        (None, None) => Line::from(Span::styled(
            "No Active IDE",
            Style::default().fg(Color::DarkGray),
        )),
    }
}

fn toggle_line(label: &str, on: bool, locked: bool) -> Line<'static> {
    let mark = if on { "[x]" } else { "[ ]" };
    let style = if locked {
        Style::default().fg(Color::DarkGray)
    } else {
        Style::default()
    };
    Line::from(Span::styled(format!("{mark} {label}"), style))
}

pub struct IdeDialogComponent;

impl IdeDialogComponent {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, state: &AppState) {
        let dialog_area = centered_rect(area, 72.min(area.width.saturating_sub(2)), 14);
        frame.render_widget(Clear, dialog_area);

        let block = Block::default()
            .title(" Anubis Cloud IDE ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan));
        let inner = block.inner(dialog_area);
        frame.render_widget(block, dialog_area);

        let (sessions_available, held) = {
            let ide = lock_state(&state.ide);
            (ide.sessions_available, ide.session.is_some())
        };

        let assignment = state
            .assignment_id
            .as_deref()
            .unwrap_or("(no assignment selected)");

        let lines = vec![
            quota_header(sessions_available),
            Line::raw(""),
            Line::from(Span::styled(
                "By using the Anubis Cloud IDE you agree to the course's acceptable use policy.",
                Style::default().fg(Color::Gray),
            )),
            Line::raw(""),
            Line::from(format!("Assignment: {assignment}")),
            // Launch options lock once a session exists.
            toggle_line("Autosave (a) — commit and push work every few minutes", state.autosave, held),
            toggle_line("Persistent storage (p) — keep /home/anubis on a volume", state.persistent_storage, held),
            Line::raw(""),
            session_line(state),
            Line::raw(""),
            button_row(state),
        ];

        frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), inner);
    }
}
