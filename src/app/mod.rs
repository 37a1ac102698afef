// ABOUTME: TUI application structure: state, key events, browser hand-off

pub mod browser;
pub mod events;
pub mod state;

pub use events::{AppEvent, EventHandler};
pub use state::{App, AppState, AsyncAction, DialogKind};
