//! Item system: types, equipment, drops, and scoring.

pub mod drops;
pub mod equipment;
pub mod scoring;
pub mod types;

pub use drops::*;
pub use equipment::*;
pub use scoring::*;
pub use types::*;
