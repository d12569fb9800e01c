//! Level-banded areas and movement between them.

mod progression;

pub use progression::{place_for_level, AreaMove};
