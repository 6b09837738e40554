//! # TitleBar Component
//!
//! Window header of the contact terminal.
//!
//! Stateless: it receives everything as props and renders a single line.
//! The title text changes based on state:
//!
//! 1. **Unseen content**: `"● ● ●  neural_contact.exe | relay: emailjs | ↓ New"`
//! 2. **Default**: `"● ● ●  neural_contact.exe | relay: emailjs"`

use crate::tui::component::Component;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};

/// Top bar showing the window title, gateway name and scroll notification.
pub struct TitleBar {
    /// Name of the email gateway in use (e.g., "emailjs")
    pub gateway_name: String,
    /// Whether there's content below the current scroll position
    pub has_unseen_content: bool,
}

impl TitleBar {
    pub fn new(gateway_name: String, has_unseen_content: bool) -> Self {
        Self {
            gateway_name,
            has_unseen_content,
        }
    }

    fn title_text(&self) -> String {
        if self.has_unseen_content {
            format!("neural_contact.exe | relay: {} | ↓ New", self.gateway_name)
        } else {
            format!("neural_contact.exe | relay: {}", self.gateway_name)
        }
    }
}

impl Component for TitleBar {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let line = Line::from(vec![
            Span::styled("● ", Style::default().fg(Color::Red)),
            Span::styled("● ", Style::default().fg(Color::Yellow)),
            Span::styled("● ", Style::default().fg(Color::Green)),
            Span::raw(" "),
            Span::styled(self.title_text(), Style::default().fg(Color::Gray)),
        ]);

        frame.render_widget(line, area);
    }
}
