//! Damage model: exponential mitigation, HP-fraction caps, crits and spread.

use super::types::{Attacker, AttackerRole, Defender};
use crate::core::config::{CritSpec, DamageCaps};
use rand::Rng;

/// Largest single hit `attacker` may land on a target with `target_max_hp`.
pub fn damage_cap(role: AttackerRole, attacker_level: u32, target_max_hp: u32, caps: &DamageCaps) -> f64 {
    let low_band = attacker_level <= caps.low_band_max_level;
    let fraction = match role {
        AttackerRole::Boss => caps.boss,
        AttackerRole::Enemy if low_band => caps.enemy_low,
        AttackerRole::Enemy => caps.enemy_high,
        AttackerRole::Ally if low_band => caps.ally_low,
        AttackerRole::Ally => caps.ally_high,
    };
    fraction * target_max_hp as f64
}

fn finalize(raw: f64, cap: f64) -> u32 {
    let capped = raw.min(cap).floor();
    if capped < 1.0 {
        1
    } else {
        capped as u32
    }
}

/// `ATK * e^(-DEF/100)`, capped by the attacker's band, at least 1.
pub fn calculate_physical_damage(attacker: &Attacker, target: &Defender, caps: &DamageCaps) -> u32 {
    let raw = attacker.atk as f64 * (-(target.def as f64) / 100.0).exp();
    let cap = damage_cap(attacker.role, attacker.level, target.max_hp, caps);
    finalize(raw, cap)
}

/// `(base + MAG) * e^(-MR/100) * multiplier`, capped by the ally band
/// whatever the caster, at least 1.
pub fn calculate_spell_damage(
    base_damage: u32,
    attacker: &Attacker,
    target: &Defender,
    multiplier: f64,
    caps: &DamageCaps,
) -> u32 {
    let raw = (base_damage as f64 + attacker.mag as f64)
        * (-(target.mr as f64) / 100.0).exp()
        * multiplier;
    let cap = damage_cap(AttackerRole::Ally, attacker.level, target.max_hp, caps);
    finalize(raw, cap)
}

/// Uniform spread of `range` around `base`, floored, at least 1.
pub fn randomize_damage(base: u32, range: u32, rng: &mut impl Rng) -> u32 {
    if range == 0 {
        return base.max(1);
    }
    let low = base as f64 - range as f64;
    let high = base as f64 + range as f64;
    let rolled = rng.gen_range(low..=high).floor();
    if rolled < 1.0 {
        1
    } else {
        rolled as u32
    }
}

pub fn roll_crit(chance: f64, rng: &mut impl Rng) -> bool {
    rng.gen::<f64>() < chance
}

/// Outcome of one resolved hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hit {
    pub amount: u32,
    pub critical: bool,
}

/// Applies the crit roll then the random spread to a formula result.
pub fn resolve_hit(base: u32, crit: CritSpec, range: u32, rng: &mut impl Rng) -> Hit {
    let critical = roll_crit(crit.chance, rng);
    let pre_spread = if critical {
        (base as f64 * crit.multiplier).floor() as u32
    } else {
        base
    };
    Hit {
        amount: randomize_damage(pre_spread, range, rng),
        critical,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn ally(level: u32, atk: u32, mag: u32) -> Attacker {
        Attacker {
            role: AttackerRole::Ally,
            level,
            atk,
            mag,
        }
    }

    fn target(def: u32, mr: u32, max_hp: u32) -> Defender {
        Defender { def, mr, max_hp }
    }

    #[test]
    fn test_cap_bands() {
        let caps = DamageCaps::default();
        assert!((damage_cap(AttackerRole::Boss, 1, 100, &caps) - 25.0).abs() < 1e-9);
        assert!((damage_cap(AttackerRole::Enemy, 3, 100, &caps) - 10.0).abs() < 1e-9);
        assert!((damage_cap(AttackerRole::Enemy, 4, 100, &caps) - 16.0).abs() < 1e-9);
        assert!((damage_cap(AttackerRole::Ally, 3, 100, &caps) - 12.0).abs() < 1e-9);
        assert!((damage_cap(AttackerRole::Ally, 4, 100, &caps) - 17.0).abs() < 1e-9);
    }

    #[test]
    fn test_physical_uncapped_uses_raw() {
        let caps = DamageCaps::default();
        // 15 * e^-0.1 = 13.57
        let dmg = calculate_physical_damage(&ally(1, 15, 0), &target(10, 0, 1000), &caps);
        assert_eq!(dmg, 13);
    }

    #[test]
    fn test_physical_capped_by_target_hp() {
        let caps = DamageCaps::default();
        // raw 13.57, cap 0.12 * 50 = 6
        let dmg = calculate_physical_damage(&ally(1, 15, 0), &target(10, 0, 50), &caps);
        assert_eq!(dmg, 6);
    }

    #[test]
    fn test_boss_never_exceeds_quarter_hp() {
        let caps = DamageCaps::default();
        let boss = Attacker {
            role: AttackerRole::Boss,
            level: 20,
            atk: 10_000,
            mag: 0,
        };
        for max_hp in [40, 130, 999, 5000] {
            let dmg = calculate_physical_damage(&boss, &target(0, 0, max_hp), &caps);
            assert!(dmg as f64 <= 0.25 * max_hp as f64);
        }
    }

    #[test]
    fn test_minimum_one_damage() {
        let caps = DamageCaps::default();
        assert_eq!(calculate_physical_damage(&ally(1, 1, 0), &target(900, 0, 100), &caps), 1);
        assert_eq!(calculate_physical_damage(&ally(1, 0, 0), &target(0, 0, 100), &caps), 1);
        assert_eq!(calculate_spell_damage(0, &ally(1, 0, 0), &target(0, 500, 100), 1.01, &caps), 1);
    }

    #[test]
    fn test_physical_monotonic_in_atk_and_def() {
        let caps = DamageCaps::default();
        let mut last = 0;
        for atk in (0..300).step_by(7) {
            let dmg = calculate_physical_damage(&ally(10, atk, 0), &target(25, 0, 2000), &caps);
            assert!(dmg >= last);
            last = dmg;
        }
        let mut last = u32::MAX;
        for def in (0..400).step_by(9) {
            let dmg = calculate_physical_damage(&ally(10, 120, 0), &target(def, 0, 2000), &caps);
            assert!(dmg <= last);
            last = dmg;
        }
    }

    #[test]
    fn test_spell_damage_formula_and_cap() {
        let caps = DamageCaps::default();
        // (30 + 12) * e^0 * 1.01 = 42.42
        assert_eq!(calculate_spell_damage(30, &ally(5, 0, 12), &target(0, 0, 1000), 1.01, &caps), 42);
        // Cap 0.17 * 100 = 17
        assert_eq!(calculate_spell_damage(30, &ally(5, 0, 12), &target(0, 0, 100), 1.01, &caps), 17);
    }

    #[test]
    fn test_spell_monotonic_in_mag_and_mr() {
        let caps = DamageCaps::default();
        let mut last = 0;
        for mag in (0..200).step_by(5) {
            let dmg = calculate_spell_damage(40, &ally(8, 0, mag), &target(0, 20, 5000), 1.01, &caps);
            assert!(dmg >= last);
            last = dmg;
        }
        let mut last = u32::MAX;
        for mr in (0..300).step_by(11) {
            let dmg = calculate_spell_damage(40, &ally(8, 0, 60), &target(0, mr, 5000), 1.01, &caps);
            assert!(dmg <= last);
            last = dmg;
        }
    }

    #[test]
    fn test_spell_uses_ally_band_even_for_foes() {
        let caps = DamageCaps::default();
        let boss_caster = Attacker {
            role: AttackerRole::Boss,
            level: 2,
            atk: 0,
            mag: 1000,
        };
        assert_eq!(calculate_spell_damage(0, &boss_caster, &target(0, 0, 100), 1.0, &caps), 12);
    }

    #[test]
    fn test_randomize_within_range() {
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        for _ in 0..500 {
            let dmg = randomize_damage(13, 5, &mut rng);
            assert!((8..=18).contains(&dmg));
        }
    }

    #[test]
    fn test_randomize_clips_to_one() {
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        for _ in 0..200 {
            assert!(randomize_damage(2, 5, &mut rng) >= 1);
        }
        assert_eq!(randomize_damage(0, 0, &mut rng), 1);
        assert_eq!(randomize_damage(9, 0, &mut rng), 9);
    }

    #[test]
    fn test_resolve_hit_always_crits_at_full_chance() {
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        let hit = resolve_hit(10, CritSpec::new(1.0, 2.0), 0, &mut rng);
        assert!(hit.critical);
        assert_eq!(hit.amount, 20);
        let hit = resolve_hit(10, CritSpec::new(0.0, 2.0), 0, &mut rng);
        assert!(!hit.critical);
        assert_eq!(hit.amount, 10);
    }

    #[test]
    fn test_crit_multiplier_floors_before_spread() {
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        let hit = resolve_hit(7, CritSpec::new(1.0, 1.5), 0, &mut rng);
        assert_eq!(hit.amount, 10);
    }

    #[test]
    fn test_level_one_warrior_first_hit_window() {
        // ATK 15 vs DEF 10: floor(15 * e^-0.1) = 13, spread 5, capped at 0.12 * max HP.
        let caps = DamageCaps::default();
        let mut rng = ChaCha8Rng::seed_from_u64(2024);
        let foe = target(10, 0, 200);
        let base = calculate_physical_damage(&ally(1, 15, 0), &foe, &caps);
        assert!(base as f64 <= 0.12 * 200.0);
        for _ in 0..200 {
            let hit = resolve_hit(base, CritSpec::new(0.0, 1.5), 5, &mut rng);
            assert!((8..=18).contains(&hit.amount));
        }
    }
}
