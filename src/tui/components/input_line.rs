//! # InputLine Component
//!
//! Single-line prompt in the style of a shell: the step's prompt label
//! followed by the text being typed.
//!
//! The buffer and cursor are internal state. The prompt label and the
//! `disabled` flag are props from the application state; while disabled
//! (a dispatch is in flight) every key is ignored and the line is dimmed.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Paragraph};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

/// High-level events emitted by the InputLine
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// User submitted the text (Enter pressed)
    Submit(String),
    ContentChanged,
}

pub struct InputLine {
    /// Text buffer (Internal State)
    pub buffer: String,
    /// Cursor as byte offset into `buffer`
    cursor: usize,
    /// Prompt label for the current step (Prop)
    pub prompt_label: &'static str,
    /// Ignore input while a dispatch is in flight (Prop)
    pub disabled: bool,
}

impl Default for InputLine {
    fn default() -> Self {
        Self::new()
    }
}

impl InputLine {
    pub fn new() -> Self {
        Self {
            buffer: String::new(),
            cursor: 0,
            prompt_label: "",
            disabled: false,
        }
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    fn prev_boundary(&self) -> usize {
        self.buffer[..self.cursor]
            .char_indices()
            .next_back()
            .map_or(0, |(i, _)| i)
    }

    fn next_boundary(&self) -> usize {
        self.buffer[self.cursor..]
            .chars()
            .next()
            .map_or(self.cursor, |c| self.cursor + c.len_utf8())
    }

    /// Byte offset where the visible part of the buffer starts so the
    /// cursor stays within `available` columns.
    fn visible_start(&self, available: usize) -> usize {
        let mut start = 0;
        let mut width = self.buffer[..self.cursor].width();
        for c in self.buffer[..self.cursor].chars() {
            if width < available {
                break;
            }
            width -= c.width().unwrap_or(0);
            start += c.len_utf8();
        }
        start
    }
}

impl Component for InputLine {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let style = if self.disabled {
            Style::default().fg(Color::DarkGray).add_modifier(Modifier::DIM)
        } else {
            Style::default().fg(Color::LightGreen)
        };

        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(style);
        let inner = block.inner(area);

        let label_width = self.prompt_label.width() as u16 + 1;
        let available = inner.width.saturating_sub(label_width + 1) as usize;
        let start = self.visible_start(available);
        let visible = &self.buffer[start..];

        let line = Line::from(vec![
            Span::styled(format!("{} ", self.prompt_label), style.add_modifier(Modifier::BOLD)),
            Span::styled(visible, style),
        ]);
        frame.render_widget(Paragraph::new(line).block(block), area);

        if !self.disabled {
            let cursor_col = self.buffer[start..self.cursor].width() as u16;
            let x = (inner.x + label_width + cursor_col).min(inner.right().saturating_sub(1));
            frame.set_cursor_position((x, inner.y));
        }
    }
}

impl EventHandler for InputLine {
    type Event = InputEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        if self.disabled {
            return None;
        }
        match event {
            TuiEvent::InputChar(c) => {
                self.buffer.insert(self.cursor, *c);
                self.cursor += c.len_utf8();
                Some(InputEvent::ContentChanged)
            }
            TuiEvent::Paste(text) => {
                // Single-line prompt: newlines become spaces
                let text = text.replace(['\r', '\n'], " ");
                self.buffer.insert_str(self.cursor, &text);
                self.cursor += text.len();
                Some(InputEvent::ContentChanged)
            }
            TuiEvent::Backspace => (self.cursor > 0).then(|| {
                let prev = self.prev_boundary();
                self.buffer.drain(prev..self.cursor);
                self.cursor = prev;
                InputEvent::ContentChanged
            }),
            TuiEvent::Delete => (self.cursor < self.buffer.len()).then(|| {
                let next = self.next_boundary();
                self.buffer.drain(self.cursor..next);
                InputEvent::ContentChanged
            }),
            TuiEvent::CursorLeft => (self.cursor > 0).then(|| {
                self.cursor = self.prev_boundary();
                InputEvent::ContentChanged
            }),
            TuiEvent::CursorRight => (self.cursor < self.buffer.len()).then(|| {
                self.cursor = self.next_boundary();
                InputEvent::ContentChanged
            }),
            TuiEvent::CursorHome => (self.cursor != 0).then(|| {
                self.cursor = 0;
                InputEvent::ContentChanged
            }),
            TuiEvent::CursorEnd => (self.cursor != self.buffer.len()).then(|| {
                self.cursor = self.buffer.len();
                InputEvent::ContentChanged
            }),
            TuiEvent::Submit => {
                let text = std::mem::take(&mut self.buffer);
                self.cursor = 0;
                Some(InputEvent::Submit(text))
            }
            _ => None,
        }
    }
}
