//! The player character: classes and races, creation, progression, pets and saves.

pub mod class;
pub mod creation;
pub mod pet;
pub mod progression;
pub mod save;
pub mod types;

pub use class::*;
pub use creation::*;
pub use pet::*;
pub use progression::*;
pub use save::*;
pub use types::*;
