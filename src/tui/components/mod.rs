//! # TUI Components
//!
//! All UI components for the contact terminal.
//!
//! ### Stateless Components (Props-Based Rendering)
//!
//! - `TitleBar`: window header with the relay name
//! - `StatusBar`: footer with submission status and key hints
//!
//! ### Stateful Components (Event-Driven)
//!
//! - `InputLine`: the prompt the user types into
//! - `TranscriptView`: scrollable transcript with stick-to-bottom
//!
//! Components receive external data as props (fields or constructor
//! parameters) instead of reaching into `App`, which keeps them testable
//! against `TestBackend`.
//!
//! ```text
//! components/
//! ├── mod.rs              (this file)
//! ├── title_bar.rs        (window header)
//! ├── transcript_view.rs  (scrollback)
//! ├── input_line.rs       (prompt + buffer)
//! └── status_bar.rs       (footer)
//! ```

pub mod input_line;
pub mod status_bar;
pub mod title_bar;
pub mod transcript_view;

pub use input_line::{InputEvent, InputLine};
pub use status_bar::StatusBar;
pub use title_bar::TitleBar;
pub use transcript_view::{TranscriptView, TranscriptViewState};
