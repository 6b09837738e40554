use ratatui::Frame;
use ratatui::layout::{Constraint, Layout};

use crate::core::state::App;
use crate::tui::TuiState;
use crate::tui::component::Component;
use crate::tui::components::{StatusBar, TitleBar, TranscriptView};

/// Height of the bordered input line.
const INPUT_HEIGHT: u16 = 3;

pub fn draw_ui(frame: &mut Frame, app: &App, tui: &mut TuiState, spinner_frame: usize) {
    use Constraint::{Length, Min};
    let layout = Layout::vertical([Length(1), Min(0), Length(INPUT_HEIGHT), Length(1)]);
    let [title_area, transcript_area, input_area, status_area] = layout.areas(frame.area());

    TranscriptView::new(&mut tui.transcript_view, &app.transcript).render(frame, transcript_area);

    // Title last so it reflects the scroll state computed this frame
    TitleBar::new(
        app.gateway.name().to_string(),
        tui.transcript_view.has_unseen_content,
    )
    .render(frame, title_area);

    tui.input_line.render(frame, input_area);

    StatusBar::new(&app.status_message, app.submitting, spinner_frame).render(frame, status_area);
}
