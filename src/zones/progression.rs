//! Area placement after a level-up.

use crate::data::{Area, GameData};
use rand::seq::SliceRandom;
use rand::Rng;

/// How a character's area changed after a level-up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AreaMove {
    /// No area was set; the level-appropriate one was assigned.
    Entered,
    /// The level-appropriate area differs from the current one.
    Outgrown,
    /// Still level-appropriate, but wandered off to another suitable area.
    Wanderlust,
    Stayed,
}

/// Decides where a character of `level` should be, starting from `current`.
///
/// Wanderlust is only rolled when the character is already in the
/// level-appropriate area.
pub fn place_for_level<'a>(
    data: &'a GameData,
    current: Option<&str>,
    level: u32,
    wanderlust_chance: f64,
    rng: &mut impl Rng,
) -> (AreaMove, &'a Area) {
    let target = data.find_area_for_level(level);

    let Some(current_id) = current else {
        return (AreaMove::Entered, target);
    };

    if target.id != current_id {
        return (AreaMove::Outgrown, target);
    }

    if rng.gen::<f64>() < wanderlust_chance {
        let alternatives: Vec<&Area> = data
            .areas()
            .iter()
            .filter(|area| area.id != current_id && area.suits_level(level))
            .collect();
        if let Some(&area) = alternatives.choose(rng) {
            return (AreaMove::Wanderlust, area);
        }
    }

    (AreaMove::Stayed, target)
}
