// Leveling
pub const MAX_LEVEL: u32 = 100;
pub const STARTING_LEVEL: u32 = 1;
pub const XP_CURVE_BASE: f64 = 1000.0;
pub const XP_CURVE_EXPONENT: f64 = 1.241;

// Level at and below which the low growth regime applies
pub const GROWTH_REGIME_SPLIT_LEVEL: u32 = 50;

/// Per-level multiplicative growth rates for one regime.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GrowthRates {
    pub hp: f64,
    pub atk: f64,
    pub def: f64,
    pub mag: f64,
    pub mr: f64,
}

pub const PLAYER_GROWTH_LOW: GrowthRates = GrowthRates {
    hp: 0.055,
    atk: 0.045,
    def: 0.045,
    mag: 0.045,
    mr: 0.0,
};

pub const PLAYER_GROWTH_HIGH: GrowthRates = GrowthRates {
    hp: 0.065,
    atk: 0.055,
    def: 0.055,
    mag: 0.055,
    mr: 0.0,
};

pub const ENEMY_GROWTH_LOW: GrowthRates = GrowthRates {
    hp: 0.055,
    atk: 0.045,
    def: 0.045,
    mag: 0.0,
    mr: 0.0,
};

pub const ENEMY_GROWTH_HIGH: GrowthRates = GrowthRates {
    hp: 0.065,
    atk: 0.055,
    def: 0.055,
    mag: 0.0,
    mr: 0.0,
};

pub fn player_growth_for_level(level: u32) -> &'static GrowthRates {
    if level <= GROWTH_REGIME_SPLIT_LEVEL {
        &PLAYER_GROWTH_LOW
    } else {
        &PLAYER_GROWTH_HIGH
    }
}

pub fn enemy_growth_for_level(level: u32) -> &'static GrowthRates {
    if level <= GROWTH_REGIME_SPLIT_LEVEL {
        &ENEMY_GROWTH_LOW
    } else {
        &ENEMY_GROWTH_HIGH
    }
}

/// One compounding growth step. HP-style stats round down, the rest up.
pub fn grow_stat(value: u32, rate: f64, round_up: bool) -> u32 {
    let grown = value as f64 * (1.0 + rate);
    // Guards against 1.05 * 20 landing a hair above 21.
    let rounded = if round_up {
        (grown - 1e-9).ceil()
    } else {
        (grown + 1e-9).floor()
    };
    rounded.max(0.0) as u32
}

// Encounter scaling
pub const ENEMY_XP_PER_LEVEL: u64 = 50;
pub const ENCOUNTER_LEVELS_BELOW: u32 = 1;
pub const ENCOUNTER_LEVELS_ABOVE: u32 = 2;

// Synthetic fallback enemy, defined at level 1
pub const GENERIC_ENEMY_NAME: &str = "Wandering Beast";
pub const GENERIC_ENEMY_HP: u32 = 50;
pub const GENERIC_ENEMY_ATK: u32 = 8;
pub const GENERIC_ENEMY_DEF: u32 = 4;
pub const GENERIC_ENEMY_MR: u32 = 0;
pub const GENERIC_ENEMY_XP: u64 = 100;

// Level-pick weights by offset above the player
pub const LEVEL_WEIGHT_AT_OR_BELOW: f64 = 1.0;
pub const LEVEL_WEIGHT_PLUS_ONE: f64 = 0.5;
pub const LEVEL_WEIGHT_PLUS_TWO: f64 = 0.15;
pub const LEVEL_WEIGHT_FALLBACK_NUMERATOR: f64 = 0.25;

// Items
pub const BOSS_ITEM_ID_MIN: u32 = 5000;
pub const SCORE_PER_ITEM_LEVEL: f64 = 10.0;
pub const MELEE_WEIGHT_ATK: f64 = 1.0;
pub const MELEE_WEIGHT_MAG: f64 = 0.5;
pub const CASTER_WEIGHT_ATK: f64 = 0.5;
pub const CASTER_WEIGHT_MAG: f64 = 1.0;
pub const WEIGHT_DEF: f64 = 0.8;

// Persistence
pub const SAVE_KEY: &str = "idleRPGPlayer";
pub const SAVE_FORMAT_VERSION: u32 = 1;
