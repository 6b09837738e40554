//! # Application State
//!
//! Core business state for the contact terminal. Domain logic only,
//! no TUI-specific types. Presentation state lives in the `tui` module.
//!
//! ```text
//! App
//! ├── gateway: Arc<dyn EmailGateway>  // where finished drafts go
//! ├── transcript: Transcript          // scrollback shown to the user
//! ├── step: Step                      // which field we are collecting
//! ├── draft: DraftMessage             // fields collected so far
//! ├── submitting: bool                // dispatch in flight
//! └── status_message: String          // status bar text
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs.

use std::sync::Arc;

use crate::core::transcript::Transcript;
use crate::gateway::EmailGateway;

/// Which prompt the terminal is currently answering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Step {
    #[default]
    Idle,
    CollectingEmail,
    CollectingSubject,
    CollectingMessage,
}

impl Step {
    /// Label rendered in front of the input line and echoed input.
    pub fn prompt_label(self) -> &'static str {
        match self {
            Step::Idle => "user@neural:~$",
            Step::CollectingEmail => "email>",
            Step::CollectingSubject => "subject>",
            Step::CollectingMessage => "message>",
        }
    }
}

/// The contact submission being filled in, one field per accepted line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DraftMessage {
    pub email: String,
    pub subject: String,
    pub message: String,
}

impl DraftMessage {
    pub fn is_empty(&self) -> bool {
        self.email.is_empty() && self.subject.is_empty() && self.message.is_empty()
    }

    pub fn is_complete(&self) -> bool {
        !self.email.is_empty() && !self.subject.is_empty() && !self.message.is_empty()
    }
}

pub struct App {
    pub gateway: Arc<dyn EmailGateway>,
    pub transcript: Transcript,
    pub step: Step,
    pub draft: DraftMessage,
    /// True only while a dispatch is in flight. Blocks all input.
    pub submitting: bool,
    pub status_message: String,
}

impl App {
    pub fn new(gateway: Arc<dyn EmailGateway>) -> Self {
        Self {
            gateway,
            transcript: Transcript::new(),
            step: Step::Idle,
            draft: DraftMessage::default(),
            submitting: false,
            status_message: String::from("✓ Ready"),
        }
    }

    pub fn prompt_label(&self) -> &'static str {
        self.step.prompt_label()
    }
}
