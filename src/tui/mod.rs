//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the UI,
//! and translates keyboard events into core::Action values.
//!
//! This is the only module that knows about ratatui and crossterm.
//! It is also the only place that performs the dispatch I/O requested by
//! `core::action::update` through `Effect::Dispatch`.
//!
//! ## Redraw Strategy
//!
//! - **Submitting**: draws every ~80ms so the spinner moves.
//! - **Idle**: sleeps up to 500ms, only redraws on events, resize or
//!   a dispatch outcome arriving from the background task.

mod component;
pub mod components;
mod event;
mod ui;

use log::{debug, info, warn};
use std::io::stdout;
use std::sync::{Arc, mpsc};

use crossterm::cursor::{Hide, SetCursorStyle, Show};
use crossterm::event::{
    DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
};
use crossterm::execute;
use ratatui::DefaultTerminal;
use uuid::Uuid;

use crate::core::action::{Action, Effect, update};
use crate::core::config::ResolvedConfig;
use crate::core::state::{App, DraftMessage};
use crate::gateway::{EmailGateway, EmailJsGateway};
use crate::tui::component::EventHandler;
use crate::tui::components::{InputEvent, InputLine, TranscriptViewState};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};

/// TUI-specific presentation state (not part of core business logic)
pub struct TuiState {
    pub transcript_view: TranscriptViewState,
    pub input_line: InputLine,
}

impl Default for TuiState {
    fn default() -> Self {
        Self::new()
    }
}

impl TuiState {
    pub fn new() -> Self {
        Self {
            transcript_view: TranscriptViewState::new(),
            input_line: InputLine::new(),
        }
    }

    /// Copies the props the components read from `App`.
    pub fn sync_props(&mut self, app: &App) {
        self.input_line.prompt_label = app.prompt_label();
        self.input_line.disabled = app.submitting;
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        execute!(
            stdout(),
            EnableMouseCapture,
            EnableBracketedPaste,
            Show,                        // Show cursor for input editing
            SetCursorStyle::SteadyBlock, // Non-blinking: avoids blink timer reset from continuous redraws
        )?;
        info!("Terminal modes enabled (mouse, bracketed paste, steady block cursor)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(
            stdout(),
            DisableMouseCapture,
            DisableBracketedPaste,
            Hide // Hide cursor on exit
        );
    }
}

/// Build the email gateway from a resolved config.
pub fn build_gateway(config: &ResolvedConfig) -> Arc<dyn EmailGateway> {
    Arc::new(EmailJsGateway::new(
        config.emailjs.clone(),
        Some(config.emailjs_base_url.clone()),
    ))
}

pub fn run(config: ResolvedConfig) -> std::io::Result<()> {
    let gateway = build_gateway(&config);
    info!("Using gateway '{}' at {}", gateway.name(), config.emailjs_base_url);

    let mut app = App::new(gateway);
    let mut tui = TuiState::new();

    let mut terminal = ratatui::init();
    let result = match TerminalModeGuard::new() {
        Ok(_terminal_mode_guard) => event_loop(&mut terminal, &mut app, &mut tui),
        Err(e) => Err(e),
    };

    ratatui::restore();
    result
}

fn event_loop(terminal: &mut DefaultTerminal, app: &mut App, tui: &mut TuiState) -> std::io::Result<()> {
    // Channel for actions from background tasks
    let (tx, rx) = mpsc::channel();

    let start_time = std::time::Instant::now();
    let mut needs_redraw = true; // Force first frame

    loop {
        tui.sync_props(app);

        if app.submitting {
            needs_redraw = true;
        }

        if needs_redraw {
            let spinner_frame = (start_time.elapsed().as_secs_f32() * 12.0) as usize;
            terminal.draw(|f| ui::draw_ui(f, app, tui, spinner_frame))?;
            needs_redraw = false;
        }

        let timeout = if app.submitting {
            std::time::Duration::from_millis(80)
        } else {
            std::time::Duration::from_millis(500)
        };
        let first_event = poll_event_timeout(timeout);

        // Process first event + drain ALL pending events before next draw
        if first_event.is_some() {
            needs_redraw = true;
        }
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            match event {
                TuiEvent::Resize => {}
                TuiEvent::Quit => {
                    if update(app, Action::Quit) == Effect::Quit {
                        info!("Quit requested");
                        return Ok(());
                    }
                }
                TuiEvent::ScrollUp
                | TuiEvent::ScrollDown
                | TuiEvent::ScrollPageUp
                | TuiEvent::ScrollPageDown
                | TuiEvent::ScrollToBottom => {
                    tui.transcript_view.handle_event(&event);
                }
                _ => {
                    if let Some(InputEvent::Submit(text)) = tui.input_line.handle_event(&event) {
                        let effect = update(app, Action::Submit(text));
                        if let Effect::Dispatch(draft) = effect {
                            spawn_dispatch(app.gateway.clone(), draft, tx.clone());
                        }
                        // Props may change after a submit (prompt label, disabled)
                        tui.sync_props(app);
                    }
                }
            }
        }

        // Handle background task actions (dispatch outcomes)
        while let Ok(action) = rx.try_recv() {
            needs_redraw = true;
            debug!("Event loop received: {:?}", action);
            if update(app, action) == Effect::Quit {
                return Ok(());
            }
        }
    }
}

/// Sends the draft on the tokio runtime and reports the outcome back
/// through `tx`. No timeout and no cancellation: the task runs until the
/// gateway answers or the transport fails.
fn spawn_dispatch(gateway: Arc<dyn EmailGateway>, draft: DraftMessage, tx: mpsc::Sender<Action>) {
    let dispatch_id = Uuid::new_v4();
    info!("Spawning dispatch {} via {}", dispatch_id, gateway.name());

    tokio::spawn(async move {
        let started = std::time::Instant::now();
        let action = match gateway.send(&draft).await {
            Ok(()) => {
                info!(
                    "Dispatch {} delivered in {}ms",
                    dispatch_id,
                    started.elapsed().as_millis()
                );
                Action::DispatchSucceeded
            }
            Err(e) => {
                warn!("Dispatch {} failed: {}", dispatch_id, e);
                Action::DispatchFailed(e.to_string())
            }
        };
        if tx.send(action).is_err() {
            warn!("Failed to report dispatch {}: receiver dropped", dispatch_id);
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::GatewayError;
    use async_trait::async_trait;

    struct FailingGateway;

    #[async_trait]
    impl EmailGateway for FailingGateway {
        fn name(&self) -> &str {
            "failing"
        }

        async fn send(&self, _draft: &DraftMessage) -> Result<(), GatewayError> {
            Err(GatewayError::Network("connection refused".into()))
        }
    }

    fn draft() -> DraftMessage {
        DraftMessage {
            email: "a@b.com".into(),
            subject: "hello".into(),
            message: "hi there".into(),
        }
    }

    #[tokio::test]
    async fn test_spawn_dispatch_reports_success() {
        let (tx, rx) = mpsc::channel();
        spawn_dispatch(Arc::new(crate::test_support::NoopGateway), draft(), tx);
        let action = tokio::task::spawn_blocking(move || rx.recv()).await.unwrap().unwrap();
        assert_eq!(action, Action::DispatchSucceeded);
    }

    #[tokio::test]
    async fn test_spawn_dispatch_reports_failure() {
        let (tx, rx) = mpsc::channel();
        spawn_dispatch(Arc::new(FailingGateway), draft(), tx);
        let action = tokio::task::spawn_blocking(move || rx.recv()).await.unwrap().unwrap();
        assert_eq!(
            action,
            Action::DispatchFailed("network error: connection refused".into())
        );
    }

    #[test]
    fn test_sync_props_tracks_app() {
        let mut app = crate::test_support::test_app();
        let mut tui = TuiState::new();
        tui.sync_props(&app);
        assert_eq!(tui.input_line.prompt_label, "user@neural:~$");

        update(&mut app, Action::Submit("contact".into()));
        tui.sync_props(&app);
        assert_eq!(tui.input_line.prompt_label, "email>");
        assert!(!tui.input_line.disabled);
    }
}
