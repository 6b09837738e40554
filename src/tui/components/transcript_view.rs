//! # TranscriptView Component
//!
//! Scrollable view of the terminal transcript.
//!
//! `TranscriptView` is a transient component (created each frame) that wraps
//! `&'a mut TranscriptViewState` (persistent state) and the `Transcript` (props).
//! Line heights are measured with `textwrap` so the scroll canvas can be sized
//! before anything is drawn, and only the lines around the viewport are
//! rendered into it.
//!
//! New lines always re-pin the view to the bottom, so the newest line is
//! visible after every append even if the user had scrolled up.

use std::ops::Range;

use ratatui::Frame;
use ratatui::layout::{Position, Rect, Size};
use ratatui::style::{Color, Style};
use ratatui::widgets::{Paragraph, Wrap};
use tui_scrollview::{ScrollView, ScrollViewState, ScrollbarVisibility};

use crate::core::transcript::{LineKind, Transcript, TranscriptLine};
use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

/// Scroll state for the transcript. Persisted in the parent TuiState.
pub struct TranscriptViewState {
    pub scroll_state: ScrollViewState,
    /// When true, auto-scroll to bottom on new content
    pub stick_to_bottom: bool,
    /// Measured height of every transcript line at `content_width`
    pub heights: Vec<u16>,
    /// Running sums of `heights`: `prefix_heights[i]` is the row just below line `i`
    pub prefix_heights: Vec<u16>,
    content_width: u16,
    /// Transcript generation the cache was built for
    generation: u64,
    /// Transcript length seen at the last render, used to detect appends
    seen_lines: usize,
    /// Last known viewport height (for scroll clamping between frames)
    pub viewport_height: u16,
    /// True when lines exist below the visible window
    pub has_unseen_content: bool,
}

impl Default for TranscriptViewState {
    fn default() -> Self {
        Self::new()
    }
}

impl TranscriptViewState {
    pub fn new() -> Self {
        Self {
            scroll_state: ScrollViewState::default(),
            stick_to_bottom: true,
            heights: Vec::new(),
            prefix_heights: Vec::new(),
            content_width: 0,
            generation: 0,
            seen_lines: 0,
            viewport_height: 0,
            has_unseen_content: false,
        }
    }

    fn total_height(&self) -> u16 {
        self.prefix_heights.last().copied().unwrap_or(0)
    }

    fn max_offset(&self) -> u16 {
        self.total_height().saturating_sub(self.viewport_height)
    }

    /// Clamp scroll offset so it never exceeds the content bounds.
    pub fn clamp_scroll(&mut self) {
        let max_y = self.max_offset();
        let current = self.scroll_state.offset();
        if current.y > max_y {
            self.scroll_state.set_offset(Position { x: current.x, y: max_y });
        }
    }

    /// Re-engage auto-scroll if the user has reached the bottom.
    pub fn repin_if_at_bottom(&mut self) {
        let max_y = self.max_offset();
        let current = self.scroll_state.offset();
        if current.y >= max_y {
            self.stick_to_bottom = true;
            self.scroll_state.set_offset(Position { x: current.x, y: max_y });
        }
    }

    fn rebuild_prefix_heights(&mut self) {
        self.prefix_heights = self
            .heights
            .iter()
            .scan(0u16, |acc, &h| {
                *acc = acc.saturating_add(h);
                Some(*acc)
            })
            .collect();
    }

    /// Lines intersecting the viewport, padded by half a viewport on
    /// either side.
    pub fn visible_range(&self, scroll_offset: u16, viewport_height: u16) -> Range<usize> {
        let buffer = viewport_height / 2;
        let buffered_start = scroll_offset.saturating_sub(buffer);
        let buffered_end = scroll_offset
            .saturating_add(viewport_height)
            .saturating_add(buffer);

        let start = self
            .prefix_heights
            .partition_point(|&end| end <= buffered_start);
        let end = self
            .prefix_heights
            .partition_point(|&end| end < buffered_end)
            .saturating_add(1)
            .min(self.prefix_heights.len());

        start..end
    }

    /// Brings measured heights in line with the transcript. Appended lines
    /// are measured incrementally; a width change or a reset re-measures
    /// everything.
    fn sync(&mut self, transcript: &Transcript, content_width: u16) {
        let lines = transcript.lines();
        let was_reset = transcript.generation() != self.generation;
        if was_reset || content_width != self.content_width {
            self.heights.clear();
            self.content_width = content_width;
            self.generation = transcript.generation();
        }
        let measured = self.heights.len();
        for line in &lines[measured..] {
            self.heights.push(line_height(line, content_width));
        }
        if self.heights.len() != measured || self.prefix_heights.len() != self.heights.len() {
            self.rebuild_prefix_heights();
        }

        if was_reset {
            self.scroll_state.set_offset(Position { x: 0, y: 0 });
            self.stick_to_bottom = true;
        } else if lines.len() > self.seen_lines {
            self.stick_to_bottom = true;
        }
        self.seen_lines = lines.len();
    }
}

/// Rows a line occupies when wrapped to `width` columns.
pub fn line_height(line: &TranscriptLine, width: u16) -> u16 {
    if width == 0 {
        return 1;
    }
    let rows = textwrap::wrap(&line.text, width as usize).len().max(1);
    u16::try_from(rows).unwrap_or(u16::MAX)
}

fn line_style(kind: LineKind) -> Style {
    match kind {
        LineKind::Input => Style::default().fg(Color::LightGreen),
        LineKind::Output => Style::default().fg(Color::Gray),
    }
}

/// Scrollable transcript component.
/// Created fresh each frame with references to state and data.
pub struct TranscriptView<'a> {
    pub state: &'a mut TranscriptViewState,
    pub transcript: &'a Transcript,
}

impl<'a> TranscriptView<'a> {
    pub fn new(state: &'a mut TranscriptViewState, transcript: &'a Transcript) -> Self {
        Self { state, transcript }
    }
}

impl Component for TranscriptView<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let content_width = area.width.saturating_sub(1); // -1 for scrollbar
        self.state.sync(self.transcript, content_width);
        self.state.viewport_height = area.height;

        let total_height = self.state.total_height();
        if self.state.stick_to_bottom {
            let bottom = self.state.max_offset();
            self.state.scroll_state.set_offset(Position { x: 0, y: bottom });
        } else {
            self.state.clamp_scroll();
        }
        let offset = self.state.scroll_state.offset().y;

        let mut scroll_view = ScrollView::new(Size::new(content_width, total_height))
            .vertical_scrollbar_visibility(ScrollbarVisibility::Automatic)
            .horizontal_scrollbar_visibility(ScrollbarVisibility::Never);

        let visible = self.state.visible_range(offset, area.height);
        let mut y_offset = match visible.start {
            0 => 0,
            i => self.state.prefix_heights[i - 1],
        };
        let lines = &self.transcript.lines()[visible.clone()];
        for (line, &height) in lines.iter().zip(&self.state.heights[visible]) {
            let paragraph = Paragraph::new(line.text.as_str())
                .style(line_style(line.kind))
                .wrap(Wrap { trim: false });
            scroll_view.render_widget(paragraph, Rect::new(0, y_offset, content_width, height));
            y_offset = y_offset.saturating_add(height);
        }

        frame.render_stateful_widget(scroll_view, area, &mut self.state.scroll_state);

        self.state.has_unseen_content = total_height > area.height && offset < self.state.max_offset();
    }
}

/// Implemented on the state because scroll position must outlive the
/// per-frame `TranscriptView`.
impl EventHandler for TranscriptViewState {
    type Event = ();

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::ScrollUp => {
                self.scroll_state.scroll_up();
                self.stick_to_bottom = false;
            }
            TuiEvent::ScrollDown => {
                self.scroll_state.scroll_down();
                self.repin_if_at_bottom();
            }
            TuiEvent::ScrollPageUp => {
                self.scroll_state.scroll_page_up();
                self.stick_to_bottom = false;
            }
            TuiEvent::ScrollPageDown => {
                self.scroll_state.scroll_page_down();
                self.repin_if_at_bottom();
            }
            TuiEvent::ScrollToBottom => {
                self.stick_to_bottom = true;
            }
            _ => {}
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn draw(state: &mut TranscriptViewState, transcript: &Transcript, width: u16, height: u16) -> String {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal
            .draw(|f| {
                let area = f.area();
                TranscriptView::new(state, transcript).render(f, area);
            })
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn test_line_height_wraps() {
        let line = TranscriptLine::output("aaaa bbbb cccc");
        assert_eq!(line_height(&line, 80), 1);
        assert_eq!(line_height(&line, 5), 3);
        assert_eq!(line_height(&TranscriptLine::output(""), 10), 1);
    }

    #[test]
    fn test_renders_banner() {
        let mut state = TranscriptViewState::new();
        let transcript = Transcript::new();
        let text = draw(&mut state, &transcript, 80, 10);
        assert!(text.contains("Welcome to the Neural Interface Terminal"));
        assert_eq!(state.heights.len(), 3);
    }

    #[test]
    fn test_newest_line_visible_after_append() {
        let mut state = TranscriptViewState::new();
        let mut transcript = Transcript::new();
        for i in 0..30 {
            transcript.push_output(format!("line {i}"));
        }
        draw(&mut state, &transcript, 40, 5);

        // User scrolls away from the bottom
        state.handle_event(&TuiEvent::ScrollPageUp);
        assert!(!state.stick_to_bottom);

        transcript.push_input("user@neural:~$ newest");
        let text = draw(&mut state, &transcript, 40, 5);
        assert!(state.stick_to_bottom);
        assert!(text.contains("newest"));
        assert!(!state.has_unseen_content);
    }

    #[test]
    fn test_reset_remeasures() {
        let mut state = TranscriptViewState::new();
        let mut transcript = Transcript::new();
        transcript.push_output("extra");
        draw(&mut state, &transcript, 40, 10);
        assert_eq!(state.heights.len(), 4);

        transcript.reset();
        draw(&mut state, &transcript, 40, 10);
        assert_eq!(state.heights.len(), 3);
    }

    #[test]
    fn test_reset_then_regrow_before_redraw_remeasures() {
        let mut state = TranscriptViewState::new();
        let mut transcript = Transcript::new();
        let message = vec!["word"; 40].join(" ");
        transcript.push_input(format!("message> {message}"));
        transcript.push_output("$ Processing transmission...");
        draw(&mut state, &transcript, 21, 8);
        assert!(state.heights[3] > 2);

        // `clear` then `contact` handled in the same event batch
        transcript.reset();
        transcript.push_input("user@neural:~$ contact");
        transcript.push_output("$ Enter your email address:");
        let text = draw(&mut state, &transcript, 21, 8);

        let fresh: Vec<u16> = transcript.lines().iter().map(|l| line_height(l, 20)).collect();
        assert_eq!(state.heights, fresh);
        assert_eq!(state.total_height(), fresh.iter().sum::<u16>());
        assert!(text.contains("address:"));
        assert!(!state.has_unseen_content);
    }

    #[test]
    fn test_visible_range_covers_viewport_only() {
        let mut state = TranscriptViewState::new();
        state.heights = vec![1; 100];
        state.rebuild_prefix_heights();

        let range = state.visible_range(50, 10);
        assert!(range.start <= 50 && range.end >= 60);
        assert!(range.len() < 30);

        assert_eq!(state.visible_range(0, 10).start, 0);
        assert_eq!(state.visible_range(90, 10).end, 100);
    }

    #[test]
    fn test_only_visible_lines_are_drawn_at_their_rows() {
        let mut state = TranscriptViewState::new();
        let mut transcript = Transcript::new();
        for i in 0..500 {
            transcript.push_output(format!("line {i}"));
        }
        let text = draw(&mut state, &transcript, 40, 5);
        assert!(text.contains("line 499"));
        assert!(!text.contains("line 400"));
        assert_eq!(state.prefix_heights.len(), transcript.len());
    }

    #[test]
    fn test_heights_saturate_instead_of_overflowing() {
        let mut state = TranscriptViewState::new();
        state.heights = vec![u16::MAX, u16::MAX, 3];
        state.rebuild_prefix_heights();
        assert_eq!(state.total_height(), u16::MAX);
        assert!(state.visible_range(u16::MAX, 10).end <= 3);

        let huge = TranscriptLine::output("a ".repeat(70_000));
        assert_eq!(line_height(&huge, 1), u16::MAX);
    }
}
