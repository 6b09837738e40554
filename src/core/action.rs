//! # Actions
//!
//! Everything that can happen in the contact terminal becomes an `Action`.
//! User presses Enter? That's `Action::Submit(line)`.
//! The gateway answers? That's `Action::DispatchSucceeded` or `DispatchFailed`.
//!
//! The `update()` function takes the current state and an action, mutates
//! the state, and returns an `Effect` describing any I/O the adapter must
//! perform. No side effects here. I/O happens elsewhere.
//!
//! ```text
//! State + Action  →  update()  →  New State + Effect
//! ```

use log::{debug, info, warn};

use crate::core::state::{App, DraftMessage, Step};

pub const EMAIL_PROMPT: &str = "$ Enter your email address:";
pub const SUBJECT_PROMPT: &str = "$ Enter a subject:";
pub const MESSAGE_PROMPT: &str = "$ Enter your message:";
pub const PROCESSING_LINE: &str = "$ Processing transmission...";
pub const SUCCESS_LINES: [&str; 2] = [
    "✓ Message transmitted successfully!",
    "✓ Will respond within 24 hours.",
];
pub const FAILURE_LINE: &str = "✗ Transmission failed. Please try again.";

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// A line submitted from the input control. Trimmed inside `update`.
    Submit(String),
    DispatchSucceeded,
    /// Carries the gateway error text for logging only.
    DispatchFailed(String),
    Quit,
}

/// I/O the adapter must perform after an update.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    None,
    /// Send this draft to the email gateway, then report back with
    /// `DispatchSucceeded` or `DispatchFailed`.
    Dispatch(DraftMessage),
    Quit,
}

pub fn update(app: &mut App, action: Action) -> Effect {
    match action {
        Action::Submit(raw) => submit(app, &raw),
        Action::DispatchSucceeded => {
            if !app.submitting {
                warn!("Dispatch success arrived with nothing in flight, ignoring");
                return Effect::None;
            }
            info!("Dispatch succeeded");
            for line in SUCCESS_LINES {
                app.transcript.push_output(line);
            }
            finish_dispatch(app);
            Effect::None
        }
        Action::DispatchFailed(reason) => {
            if !app.submitting {
                warn!("Dispatch failure arrived with nothing in flight, ignoring: {reason}");
                return Effect::None;
            }
            warn!("Dispatch failed: {reason}");
            app.transcript.push_output(FAILURE_LINE);
            finish_dispatch(app);
            Effect::None
        }
        Action::Quit => Effect::Quit,
    }
}

fn submit(app: &mut App, raw: &str) -> Effect {
    if app.submitting {
        debug!("Input ignored while a dispatch is in flight");
        return Effect::None;
    }

    let line = raw.trim();
    if line.is_empty() {
        return Effect::None;
    }

    if line == "clear" || line == "cls" {
        info!("Transcript cleared from {:?}", app.step);
        app.transcript.reset();
        app.draft = DraftMessage::default();
        app.step = Step::Idle;
        return Effect::None;
    }

    app.transcript
        .push_input(format!("{} {}", app.step.prompt_label(), line));

    match app.step {
        Step::Idle => {
            if line == "contact" {
                app.draft = DraftMessage::default();
                app.transcript.push_output(EMAIL_PROMPT);
                advance(app, Step::CollectingEmail);
            } else {
                debug!("Unknown command: {line}");
                app.transcript
                    .push_output(format!("command not found: {line}"));
            }
            Effect::None
        }
        Step::CollectingEmail => {
            app.draft.email = line.to_string();
            app.transcript.push_output(SUBJECT_PROMPT);
            advance(app, Step::CollectingSubject);
            Effect::None
        }
        Step::CollectingSubject => {
            app.draft.subject = line.to_string();
            app.transcript.push_output(MESSAGE_PROMPT);
            advance(app, Step::CollectingMessage);
            Effect::None
        }
        Step::CollectingMessage => {
            app.draft.message = line.to_string();
            debug_assert!(app.draft.is_complete(), "dispatching an incomplete draft");
            app.transcript.push_output(PROCESSING_LINE);
            app.submitting = true;
            app.status_message = String::from("⏳ Processing...");
            info!("Draft complete, requesting dispatch");
            Effect::Dispatch(app.draft.clone())
        }
    }
}

fn advance(app: &mut App, next: Step) {
    debug!("Step {:?} -> {:?}", app.step, next);
    app.step = next;
}

fn finish_dispatch(app: &mut App) {
    app.draft = DraftMessage::default();
    app.submitting = false;
    app.status_message = String::from("✓ Ready");
    advance(app, Step::Idle);
}
