//! Presenter Adapters
//!
//! - `ConsolePresenter` - Plain-text terminal output
//! - `RecordingPresenter` - Keeps events for assertions

mod console;
mod recording;

pub use console::{render, ConsolePresenter};
pub use recording::RecordingPresenter;
