//! # Transcript
//!
//! The scrollback log of the contact terminal. Lines are appended in order
//! and never edited. The only way to shrink it is [`Transcript::reset`],
//! which puts the banner back and bumps the transcript's generation so
//! views caching per-line layout know to start over.

/// Banner shown on startup and after `clear`/`cls`.
pub const BANNER: [&str; 3] = [
    "$ Welcome to the Neural Interface Terminal",
    "$ Type 'contact' and hit Enter to open a transmission",
    "$ ——————————————————————————————————",
];

/// Whether a line was typed by the user or printed by the terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    Input,
    Output,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscriptLine {
    pub kind: LineKind,
    pub text: String,
}

impl TranscriptLine {
    pub fn input(text: impl Into<String>) -> Self {
        Self {
            kind: LineKind::Input,
            text: text.into(),
        }
    }

    pub fn output(text: impl Into<String>) -> Self {
        Self {
            kind: LineKind::Output,
            text: text.into(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Transcript {
    lines: Vec<TranscriptLine>,
    /// Incremented by every reset
    generation: u64,
}

/// Two transcripts are equal when they hold the same lines, whatever
/// their reset history.
impl PartialEq for Transcript {
    fn eq(&self, other: &Self) -> bool {
        self.lines == other.lines
    }
}

impl Eq for Transcript {}

impl Default for Transcript {
    fn default() -> Self {
        Self::new()
    }
}

impl Transcript {
    /// Creates a transcript holding only the banner.
    pub fn new() -> Self {
        Self {
            lines: BANNER.iter().map(|l| TranscriptLine::output(*l)).collect(),
            generation: 0,
        }
    }

    pub fn push(&mut self, line: TranscriptLine) {
        self.lines.push(line);
    }

    pub fn push_input(&mut self, text: impl Into<String>) {
        self.push(TranscriptLine::input(text));
    }

    pub fn push_output(&mut self, text: impl Into<String>) {
        self.push(TranscriptLine::output(text));
    }

    /// Drops everything and restores the banner.
    pub fn reset(&mut self) {
        let generation = self.generation.wrapping_add(1);
        *self = Self::new();
        self.generation = generation;
    }

    /// Changes whenever the transcript has been reset, even if it has
    /// since grown back past its old length.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn lines(&self) -> &[TranscriptLine] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn last(&self) -> Option<&TranscriptLine> {
        self.lines.last()
    }
}
