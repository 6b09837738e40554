//! # StatusBar Component
//!
//! Footer line: submission status on the left, key hints on the right.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Span;
use ratatui::widgets::Paragraph;

use crate::tui::component::Component;

const SPINNER: [&str; 4] = ["|", "/", "-", "\\"];
const KEY_HINTS: &str = "Enter send · ↑↓ scroll · Esc quit";

pub struct StatusBar<'a> {
    pub status_message: &'a str,
    pub submitting: bool,
    pub spinner_frame: usize,
}

impl<'a> StatusBar<'a> {
    pub fn new(status_message: &'a str, submitting: bool, spinner_frame: usize) -> Self {
        Self {
            status_message,
            submitting,
            spinner_frame,
        }
    }
}

impl Component for StatusBar<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let [left, right] =
            Layout::horizontal([Constraint::Min(0), Constraint::Length(KEY_HINTS.chars().count() as u16)])
                .areas(area);

        let status = if self.submitting {
            Span::styled(
                format!("{} {}", SPINNER[self.spinner_frame % SPINNER.len()], self.status_message),
                Style::default().fg(Color::Yellow),
            )
        } else {
            Span::styled(self.status_message.to_string(), Style::default().fg(Color::Green))
        };
        frame.render_widget(status, left);

        let hints = Paragraph::new(KEY_HINTS)
            .style(Style::default().fg(Color::DarkGray).add_modifier(Modifier::DIM));
        frame.render_widget(hints, right);
    }
}
