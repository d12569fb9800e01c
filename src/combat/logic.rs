//! The encounter state machine.
//!
//! An encounter walks through its phases one [`Engine::advance`] call at a
//! time:
//!
//! ```text
//! SelectEncounter -> PetPhase -> PlayerPhase -> Resolution -> Done
//!                                                  \-> PostBattleRecovery -> Done
//! ```
//!
//! Each round returns the pause the caller should wait before the next
//! call, so a real-time loop and a test can drive the same machine.

use super::damage::{calculate_physical_damage, calculate_spell_damage, resolve_hit, Hit};
use super::encounter::{generate_boss, generate_enemy, threat_descriptor, Threat};
use super::types::{Combatant, Foe};
use crate::character::{select_pet, Character, SaveStore};
use crate::core::config::CritSpec;
use crate::core::engine::Engine;
use crate::core::game_loop::Pacer;
use crate::data::Spell;
use crate::items::{pick_boss_drop, pick_enemy_drop, Item};
use crate::milestones::MilestoneKind;
use crate::ui::{LogTone, UiSink, UnitKind};
use log::{debug, warn};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EncounterKind {
    Normal,
    Boss,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    SelectEncounter,
    PetPhase,
    PlayerPhase,
    Resolution,
    /// Boss defeats only: the character is revived at reduced HP.
    PostBattleRecovery,
    Done,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    Victory,
    Defeat,
    /// The player phase hit its round bound with both sides standing.
    Stalemate,
}

/// Delay the caller should observe before advancing again.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pause {
    Round,
    Encounter,
    Recovery,
}

/// Summary of a finished encounter.
#[derive(Debug, Clone, PartialEq)]
pub struct EncounterReport {
    pub kind: EncounterKind,
    pub foe_name: String,
    pub foe_level: u32,
    pub outcome: Outcome,
    /// Pet and player rounds combined.
    pub rounds: u32,
    pub xp_gained: u64,
    pub xp_lost: u64,
    pub levels_gained: u32,
    pub drop: Option<Item>,
    pub equipped: bool,
    pub pet_fell: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Step {
    Continue(Option<Pause>),
    Finished(EncounterReport),
}

/// One in-flight encounter.
#[derive(Debug, Clone)]
pub struct Encounter {
    requested: EncounterKind,
    kind: EncounterKind,
    phase: Phase,
    foe: Option<Foe>,
    boss_drops: Vec<u32>,
    pet_rounds: u32,
    player_rounds: u32,
    outcome: Option<Outcome>,
    xp_gained: u64,
    xp_lost: u64,
    levels_gained: u32,
    drop: Option<Item>,
    equipped: bool,
    pet_fell: bool,
}

impl Encounter {
    /// A boss request falls back to a normal encounter when the area has
    /// no boss.
    pub fn new(requested: EncounterKind) -> Self {
        Self {
            requested,
            kind: requested,
            phase: Phase::SelectEncounter,
            foe: None,
            boss_drops: Vec::new(),
            pet_rounds: 0,
            player_rounds: 0,
            outcome: None,
            xp_gained: 0,
            xp_lost: 0,
            levels_gained: 0,
            drop: None,
            equipped: false,
            pet_fell: false,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn kind(&self) -> EncounterKind {
        self.kind
    }

    pub fn foe(&self) -> Option<&Foe> {
        self.foe.as_ref()
    }

    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    pub fn is_boss(&self) -> bool {
        self.kind == EncounterKind::Boss
    }

    fn foe_hp_label(&self) -> &'static str {
        if self.is_boss() {
            "Boss HP"
        } else {
            "Enemy HP"
        }
    }

    fn foe_name(&self) -> String {
        self.foe.as_ref().map(|f| f.name.clone()).unwrap_or_default()
    }

    fn report(&self) -> EncounterReport {
        EncounterReport {
            kind: self.kind,
            foe_name: self.foe_name(),
            foe_level: self.foe.as_ref().map(|f| f.level).unwrap_or(0),
            outcome: self.outcome.unwrap_or(Outcome::Stalemate),
            rounds: self.pet_rounds + self.player_rounds,
            xp_gained: self.xp_gained,
            xp_lost: self.xp_lost,
            levels_gained: self.levels_gained,
            drop: self.drop.clone(),
            equipped: self.equipped,
            pet_fell: self.pet_fell,
        }
    }

    fn finish_with(&mut self, outcome: Outcome) {
        self.outcome = Some(outcome);
        self.phase = Phase::Resolution;
    }
}

impl<U: UiSink, S: SaveStore, R: Rng> Engine<U, S, R> {
    /// A fresh encounter for [`Engine::advance`] to drive.
    pub fn begin_encounter(&self, kind: EncounterKind) -> Encounter {
        Encounter::new(kind)
    }

    /// Runs one step of `encounter`.
    pub fn advance(&mut self, encounter: &mut Encounter, character: &mut Character) -> Step {
        match encounter.phase {
            Phase::SelectEncounter => {
                self.select_encounter(encounter, character);
                Step::Continue(None)
            }
            Phase::PetPhase => self.pet_round(encounter, character),
            Phase::PlayerPhase => self.player_round(encounter, character),
            Phase::Resolution => self.resolve(encounter, character),
            Phase::PostBattleRecovery => {
                self.recover(encounter, character);
                Step::Continue(None)
            }
            Phase::Done => Step::Finished(encounter.report()),
        }
    }

    /// Drives a whole encounter, pausing through `pacer` between steps.
    pub fn run_encounter(
        &mut self,
        character: &mut Character,
        kind: EncounterKind,
        pacer: &mut impl Pacer,
    ) -> EncounterReport {
        let mut encounter = self.begin_encounter(kind);
        loop {
            match self.advance(&mut encounter, character) {
                Step::Continue(Some(pause)) => pacer.pause(pause),
                Step::Continue(None) => {}
                Step::Finished(report) => return report,
            }
        }
    }

    /// Boss roll for one loop iteration.
    pub fn roll_encounter_kind(&mut self) -> EncounterKind {
        if self.rng.gen::<f64>() < self.config.combat.boss_chance {
            EncounterKind::Boss
        } else {
            EncounterKind::Normal
        }
    }

    fn select_encounter(&mut self, encounter: &mut Encounter, character: &mut Character) {
        let area_id = match character
            .current_area
            .clone()
            .filter(|id| self.data.area(id).is_some())
        {
            Some(id) => id,
            None => {
                let id = self.data.find_area_for_level(character.level).id.clone();
                character.current_area = Some(id.clone());
                id
            }
        };

        let boss = match encounter.requested {
            EncounterKind::Boss => generate_boss(&self.data, &area_id, &mut self.rng)
                .map(|(foe, template)| (foe, template.drops.clone())),
            EncounterKind::Normal => None,
        };
        if encounter.requested == EncounterKind::Boss && boss.is_none() {
            debug!("no boss in {}; fighting a normal encounter", area_id);
        }

        let foe = match boss {
            Some((foe, drops)) => {
                encounter.kind = EncounterKind::Boss;
                encounter.boss_drops = drops;
                self.say(
                    LogTone::Danger,
                    format!(
                        "A Boss Encounter! A fearsome {} (Level {}) appears!",
                        foe.name, foe.level
                    ),
                );
                foe
            }
            None => {
                encounter.kind = EncounterKind::Normal;
                let foe = generate_enemy(&self.data, character.level, &area_id, &mut self.rng);
                let threat = threat_descriptor(foe.level, character.level);
                let tone = match threat {
                    Threat::Wild => LogTone::Muted,
                    Threat::Threatening => LogTone::Plain,
                    Threat::Formidable => LogTone::Formidable,
                    Threat::Fearsome => LogTone::Danger,
                };
                self.say(
                    tone,
                    format!("A {} {} (Level {}) appears!", threat.word(), foe.name, foe.level),
                );
                foe
            }
        };
        debug!(
            "{} meets {} (level {}, {} HP) in {}",
            character.name, foe.name, foe.level, foe.max_hp, area_id
        );
        self.ui.refresh_hp_bar(UnitKind::Foe, foe.current_hp, foe.max_hp);
        encounter.foe = Some(foe);

        character.spell_cooldown = 0;
        character.pet_died = false;
        let pet_class = character.class.is_pet_class();
        if pet_class && character.pet.is_none() {
            self.assign_pet(character);
        }

        if pet_class && character.has_living_pet() {
            encounter.phase = Phase::PetPhase;
        } else {
            if pet_class {
                character.pet_died = true;
            }
            self.hand_off(encounter, character);
        }
    }

    fn hand_off(&mut self, encounter: &mut Encounter, character: &Character) {
        if character.class.is_pet_class() {
            self.say(
                LogTone::Notice,
                "You step forward to fight in place of your pet!",
            );
        } else if encounter.is_boss() {
            self.say(LogTone::Notice, "You step forward to fight!");
        }
        encounter.phase = Phase::PlayerPhase;
    }

    fn foe_strikes(&mut self, encounter: &Encounter, foe: &Foe, target: &Combatant) -> Hit {
        let rules = self.config.rules(encounter.is_boss());
        let crit = rules.foe_physical;
        let base = calculate_physical_damage(
            &foe.as_attacker(),
            &target.as_defender(),
            &self.config.caps,
        );
        let hit = resolve_hit(base, crit, self.config.combat.damage_range, &mut self.rng);
        if hit.critical {
            let who = if encounter.is_boss() { "boss" } else { "enemy" };
            self.say(
                LogTone::Critical,
                format!("The {} lands a Critical Hit!", who),
            );
        }
        hit
    }

    fn pet_round(&mut self, encounter: &mut Encounter, character: &mut Character) -> Step {
        let Some(pet) = character.pet.as_ref().filter(|pet| pet.is_alive()) else {
            self.hand_off(encounter, character);
            return Step::Continue(None);
        };
        let Some(mut foe) = encounter.foe.take() else {
            encounter.finish_with(Outcome::Stalemate);
            return Step::Continue(None);
        };

        if encounter.pet_rounds >= self.config.combat.max_phase_rounds {
            warn!(
                "pet phase against {} hit {} rounds; handing off",
                foe.name, self.config.combat.max_phase_rounds
            );
            encounter.foe = Some(foe);
            self.hand_off(encounter, character);
            return Step::Continue(None);
        }
        encounter.pet_rounds += 1;

        let view = Combatant::pet(pet);
        let crit = self.config.rules(encounter.is_boss()).player_physical;
        let base = calculate_physical_damage(&view.as_attacker(), &foe.as_defender(), &self.config.caps);
        let hit = resolve_hit(base, crit, self.config.combat.damage_range, &mut self.rng);
        if hit.critical {
            self.say(LogTone::Critical, "Your pet lands a Critical Hit!");
        }
        foe.take_damage(hit.amount);
        self.say(
            LogTone::Plain,
            format!(
                "{} attacks, dealing {} damage! {}: {}",
                view.name,
                hit.amount,
                encounter.foe_hp_label(),
                foe.current_hp
            ),
        );
        self.ui.refresh_hp_bar(UnitKind::Foe, foe.current_hp, foe.max_hp);

        if !foe.is_alive() {
            encounter.foe = Some(foe);
            encounter.finish_with(Outcome::Victory);
            return Step::Continue(Some(Pause::Round));
        }

        let hit = self.foe_strikes(encounter, &foe, &view);
        let foe_name = foe.name.clone();
        encounter.foe = Some(foe);

        let Some(pet) = character.pet.as_mut() else {
            return Step::Continue(Some(Pause::Round));
        };
        pet.take_damage(hit.amount);
        let (pet_name, pet_hp, pet_max) = (pet.name.clone(), pet.current_hp, pet.max_hp());
        self.say(
            LogTone::Plain,
            format!(
                "{} attacks for {} damage. {} HP: {}",
                foe_name, hit.amount, pet_name, pet_hp
            ),
        );
        self.ui.refresh_hp_bar(UnitKind::Pet, pet_hp, pet_max);

        if pet_hp == 0 {
            character.pet_died = true;
            encounter.pet_fell = true;
            self.say(
                LogTone::Defeat,
                format!("Your pet {} has fallen!", pet_name),
            );
            self.hand_off(encounter, character);
        }
        Step::Continue(Some(Pause::Round))
    }

    fn choose_spell(&mut self, character: &Character) -> Option<Spell> {
        if character.spell_cooldown > 0 {
            return None;
        }
        let chance = character.class.spell_cast_chance();
        if chance == 0 {
            return None;
        }
        let spells = self.data.spells_for(character.class, character.level);
        if spells.is_empty() || self.rng.gen_range(0..100) >= chance {
            return None;
        }
        spells.choose(&mut self.rng).map(|&spell| spell.clone())
    }

    fn player_round(&mut self, encounter: &mut Encounter, character: &mut Character) -> Step {
        if !character.is_alive() {
            encounter.finish_with(Outcome::Defeat);
            return Step::Continue(None);
        }
        let Some(mut foe) = encounter.foe.take() else {
            encounter.finish_with(Outcome::Stalemate);
            return Step::Continue(None);
        };

        if encounter.player_rounds >= self.config.combat.max_phase_rounds {
            warn!(
                "player phase against {} hit {} rounds; calling a stalemate",
                foe.name, self.config.combat.max_phase_rounds
            );
            encounter.foe = Some(foe);
            encounter.finish_with(Outcome::Stalemate);
            return Step::Continue(None);
        }
        encounter.player_rounds += 1;

        let view = Combatant::player(character);
        let rules = self.config.rules(encounter.is_boss());
        let (physical_crit, spell_crit): (CritSpec, CritSpec) = (rules.player_physical, rules.player_spell);
        let range = self.config.combat.damage_range;
        let mut cooldown_set = false;

        if let Some(spell) = self.choose_spell(character) {
            let base = calculate_spell_damage(
                spell.base_damage,
                &view.as_attacker(),
                &foe.as_defender(),
                self.config.combat.spell_multiplier,
                &self.config.caps,
            );
            let hit = resolve_hit(base, spell_crit, range, &mut self.rng);
            if hit.critical {
                self.say(LogTone::Critical, "You land a Critical Spell Hit!");
            }
            foe.take_damage(hit.amount);
            self.say(
                LogTone::Plain,
                format!(
                    "You cast {}, dealing {} magical damage! {}: {}",
                    spell.name,
                    hit.amount,
                    encounter.foe_hp_label(),
                    foe.current_hp
                ),
            );
            if spell.base_damage >= self.config.combat.spell_cooldown_threshold {
                let rounds = (spell.base_damage / self.config.combat.spell_cooldown_divisor).max(1);
                character.spell_cooldown = rounds;
                cooldown_set = true;
                debug!("{} recharges for {} rounds", spell.name, rounds);
            }
        } else {
            let base = calculate_physical_damage(&view.as_attacker(), &foe.as_defender(), &self.config.caps);
            let hit = resolve_hit(base, physical_crit, range, &mut self.rng);
            if hit.critical {
                self.say(LogTone::Critical, "You land a Critical Hit!");
            }
            foe.take_damage(hit.amount);
            self.say(
                LogTone::Plain,
                format!(
                    "You attack {}, dealing {} damage! {}: {}",
                    foe.name,
                    hit.amount,
                    encounter.foe_hp_label(),
                    foe.current_hp
                ),
            );
        }
        self.ui.refresh_hp_bar(UnitKind::Foe, foe.current_hp, foe.max_hp);

        if !foe.is_alive() {
            encounter.foe = Some(foe);
            encounter.finish_with(Outcome::Victory);
            return Step::Continue(Some(Pause::Round));
        }

        let hit = self.foe_strikes(encounter, &foe, &view);
        character.take_damage(hit.amount);
        self.say(
            LogTone::Plain,
            format!(
                "{} attacks for {} damage. Your HP: {}",
                foe.name, hit.amount, character.current_hp
            ),
        );
        encounter.foe = Some(foe);
        self.ui
            .refresh_hp_bar(UnitKind::Player, character.current_hp, character.max_hp());
        self.ui.refresh_stats(character);

        if !cooldown_set {
            character.spell_cooldown = character.spell_cooldown.saturating_sub(1);
        }
        if !character.is_alive() {
            encounter.finish_with(Outcome::Defeat);
        }
        Step::Continue(Some(Pause::Round))
    }

    fn resolve(&mut self, encounter: &mut Encounter, character: &mut Character) -> Step {
        character.spell_cooldown = 0;
        let foe_name = encounter.foe_name();
        let pause = match encounter.outcome.unwrap_or(Outcome::Stalemate) {
            Outcome::Victory => {
                self.resolve_victory(encounter, character, &foe_name);
                encounter.phase = Phase::Done;
                None
            }
            Outcome::Defeat => {
                self.resolve_defeat(encounter, character, &foe_name);
                if encounter.is_boss() {
                    encounter.phase = Phase::PostBattleRecovery;
                    Some(Pause::Recovery)
                } else {
                    encounter.phase = Phase::Done;
                    None
                }
            }
            Outcome::Stalemate => {
                self.say(
                    LogTone::Notice,
                    format!("The battle with {} ends in a stalemate.", foe_name),
                );
                character.heal_full();
                encounter.phase = Phase::Done;
                None
            }
        };
        self.refresh_all(character);
        self.persist(character);
        Step::Continue(pause)
    }

    fn resolve_victory(&mut self, encounter: &mut Encounter, character: &mut Character, foe_name: &str) {
        let xp = encounter.foe.as_ref().map(|f| f.xp).unwrap_or(0);
        if encounter.is_boss() {
            self.say(LogTone::Victory, format!("You have defeated {}!", foe_name));
            character.totals.boss_kills += 1;
        } else {
            self.say(LogTone::Victory, format!("You defeated {}!", foe_name));
            character.totals.enemy_kills += 1;
        }

        encounter.xp_gained = xp;
        encounter.levels_gained = self.add_xp(character, xp);
        if encounter.is_boss() {
            self.check_milestones(character, MilestoneKind::BossKill, character.totals.boss_kills);
        } else {
            self.check_milestones(character, MilestoneKind::Kill, character.totals.enemy_kills);
        }

        self.roll_drop(encounter, character, foe_name);

        character.heal_full();
        if let Some(pet) = character.pet.as_mut().filter(|pet| pet.is_alive()) {
            pet.heal_full();
        }
        self.say(LogTone::Recovery, "You feel rejuvenated and fully healed!");
        self.resummon_pet(character);
    }

    /// Replaces a pet lost in this battle, if one is available yet.
    fn resummon_pet(&mut self, character: &mut Character) {
        if !character.pet_died || !character.class.is_pet_class() {
            return;
        }
        if select_pet(&self.data, character.class, character.level).is_none() {
            return;
        }
        self.say(LogTone::Recovery, "You recover and summon a new pet!");
        self.assign_pet(character);
    }

    fn roll_drop(&mut self, encounter: &mut Encounter, character: &mut Character, foe_name: &str) {
        let item = if encounter.is_boss() {
            let item = pick_boss_drop(&encounter.boss_drops, &self.data.items, &mut self.rng).cloned();
            if item.is_none() {
                self.say(
                    LogTone::Muted,
                    "The boss did not drop any recognizable items.",
                );
            }
            item
        } else {
            if self.rng.gen::<f64>() >= self.config.combat.drop_chance {
                return;
            }
            let area = character
                .current_area
                .as_deref()
                .and_then(|id| self.data.area(id));
            match area {
                Some(area) => pick_enemy_drop(&self.data.items, area, &mut self.rng).cloned(),
                None => None,
            }
        };
        let Some(item) = item else {
            return;
        };

        let source = if encounter.is_boss() { "The boss" } else { foe_name };
        self.say(
            LogTone::Loot(item.rarity),
            format!("{} dropped {}!", source, item.display_name()),
        );
        character.totals.item_drops += 1;
        encounter.drop = Some(item.clone());
        encounter.equipped = self.equip_if_better(character, item);
        self.check_milestones(character, MilestoneKind::ItemDrop, character.totals.item_drops);
    }

    fn resolve_defeat(&mut self, encounter: &mut Encounter, character: &mut Character, foe_name: &str) {
        self.say(LogTone::Defeat, format!("You were defeated by {}.", foe_name));
        character.totals.death_count += 1;
        self.check_milestones(character, MilestoneKind::Death, character.totals.death_count);

        let retained = self.config.rules(encounter.is_boss()).xp_retained_on_defeat;
        let kept = (character.xp as f64 * retained).floor() as u64;
        encounter.xp_lost = character.xp - kept.min(character.xp);
        character.xp = kept.min(character.xp);
        debug!("{} lost {} XP", character.name, encounter.xp_lost);

        if encounter.is_boss() {
            character.current_hp = 0;
            return;
        }
        character.heal_full();
        if character.pet_died && character.class.is_pet_class() {
            self.assign_pet(character);
        }
    }

    fn recover(&mut self, encounter: &mut Encounter, character: &mut Character) {
        self.resummon_pet(character);
        let fraction = self.config.combat.boss_hp_recovery;
        character.current_hp = ((character.max_hp() as f64 * fraction).floor() as u32)
            .clamp(1, character.max_hp().max(1));
        self.say(LogTone::Recovery, "You prepare for the next battle.");
        self.refresh_all(character);
        self.persist(character);
        encounter.phase = Phase::Done;
    }
}
