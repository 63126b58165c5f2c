//! Interactive TUI interface

pub mod app;
pub mod effects;
pub mod rendering;

pub use app::{ApiReply, App, InputMode, run_tui};
