//! Presentation: the UI sink interface and its implementations.

pub mod sink;
pub mod terminal;

pub use sink::*;
pub use terminal::TerminalSink;
