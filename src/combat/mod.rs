//! Damage, encounter generation and the encounter state machine.

pub mod damage;
pub mod encounter;
pub mod logic;
pub mod types;

pub use damage::*;
pub use encounter::*;
pub use logic::*;
pub use types::*;
