//! Engine, configuration, constants, errors and the encounter loop.

pub mod config;
pub mod constants;
pub mod engine;
pub mod error;
pub mod game_loop;

pub use config::*;
pub use engine::Engine;
pub use error::*;
pub use game_loop::*;
