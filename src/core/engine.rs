//! The game engine: owns reference data, configuration and the injected
//! collaborators, and drives one character through its session.
//!
//! Behaviour lives in `impl Engine` blocks next to the state it concerns:
//! encounters in `combat::logic`, XP in `character::progression`, pets in
//! `character::pet`.

use super::config::GameConfig;
use super::error::{CreationError, SaveError};
use super::game_loop::RunHandle;
use crate::character::{
    clear_save, create_character, load_character, save_character, Character, CharacterIntake,
    SaveStore,
};
use crate::core::constants::{MAX_LEVEL, STARTING_LEVEL};
use crate::data::GameData;
use crate::items::{auto_equip_if_better, Item};
use crate::milestones::{evaluate, MilestoneKind};
use crate::ui::{LogEntry, LogTone, UiSink, UnitKind};
use log::{error, info, warn};
use rand::Rng;

pub struct Engine<U: UiSink, S: SaveStore, R: Rng> {
    pub(crate) data: GameData,
    pub(crate) config: GameConfig,
    pub(crate) ui: U,
    pub(crate) store: S,
    pub(crate) rng: R,
    pub(crate) run: RunHandle,
}

impl<U: UiSink, S: SaveStore, R: Rng> Engine<U, S, R> {
    pub fn new(data: GameData, config: GameConfig, ui: U, store: S, rng: R) -> Self {
        Self {
            data,
            config,
            ui,
            store,
            rng,
            run: RunHandle::new(),
        }
    }

    pub fn data(&self) -> &GameData {
        &self.data
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn ui(&self) -> &U {
        &self.ui
    }

    pub fn ui_mut(&mut self) -> &mut U {
        &mut self.ui
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    /// Shared stop flag for the encounter loop.
    pub fn run_handle(&self) -> RunHandle {
        self.run.clone()
    }

    pub(crate) fn say(&mut self, tone: LogTone, message: impl Into<String>) {
        self.ui.append_log(LogEntry::new(tone, message));
    }

    /// Pushes every panel the character affects.
    pub fn refresh_all(&mut self, character: &Character) {
        self.ui.refresh_stats(character);
        self.ui.refresh_equipment(&character.equipment);
        self.ui
            .refresh_hp_bar(UnitKind::Player, character.current_hp, character.max_hp());
        if let Some(pet) = &character.pet {
            self.ui
                .refresh_hp_bar(UnitKind::Pet, pet.current_hp, pet.max_hp());
        }
        if let Some(area) = character
            .current_area
            .as_deref()
            .and_then(|id| self.data.area(id))
        {
            self.ui.refresh_area(area);
        }
    }

    pub fn save(&mut self, character: &Character) -> Result<(), SaveError> {
        save_character(&mut self.store, character)
    }

    /// Saves, logging instead of failing. Used at every mutation point.
    pub(crate) fn persist(&mut self, character: &Character) {
        if let Err(e) = self.save(character) {
            error!("failed to save {}: {}", character.name, e);
        }
    }

    /// Loads the saved character and repairs anything reference data no
    /// longer agrees with.
    pub fn load(&mut self) -> Option<Character> {
        let mut character = load_character(&self.store)?;

        character.level = character.level.clamp(STARTING_LEVEL, MAX_LEVEL);
        let known_area = character
            .current_area
            .as_deref()
            .and_then(|id| self.data.area(id))
            .map(|area| area.id.clone());
        if known_area.is_none() {
            if let Some(id) = &character.current_area {
                warn!("saved area '{}' no longer exists; relocating", id);
            }
        }
        character.current_area = Some(
            known_area.unwrap_or_else(|| self.data.find_area_for_level(character.level).id.clone()),
        );
        character.current_hp = character.current_hp.min(character.max_hp());
        character.spell_cooldown = 0;
        character.pet = None;
        character.pet_died = false;
        if character.class.is_pet_class() {
            self.assign_pet(&mut character);
        }

        info!(
            "loaded {} (level {} {} {})",
            character.name, character.level, character.race, character.class
        );
        self.refresh_all(&character);
        Some(character)
    }

    pub fn create(&mut self, intake: &CharacterIntake) -> Result<Character, CreationError> {
        let mut character = create_character(intake, &self.data, &self.config.progression)?;
        let area_name = character
            .current_area
            .as_deref()
            .and_then(|id| self.data.area(id))
            .map(|area| area.name.clone())
            .unwrap_or_default();

        info!(
            "created {} the {} {}",
            character.name, character.race, character.class
        );
        self.say(
            LogTone::Victory,
            format!(
                "Welcome, {}! Your adventure begins in {}.",
                character.name, area_name
            ),
        );
        self.assign_pet(&mut character);
        self.refresh_all(&character);
        self.persist(&character);
        Ok(character)
    }

    /// Resumes the saved character, or creates one from `intake`.
    pub fn start(&mut self, intake: &CharacterIntake) -> Result<Character, CreationError> {
        if let Some(character) = self.load() {
            self.say(
                LogTone::Victory,
                format!("Welcome back, {}!", character.name),
            );
            return Ok(character);
        }
        self.create(intake)
    }

    /// Stops the loop and deletes the save.
    pub fn reset(&mut self) -> Result<(), SaveError> {
        self.run.stop();
        clear_save(&mut self.store)?;
        info!("save cleared");
        Ok(())
    }

    /// Equips `item` when it outscores the occupied slot and reports it.
    pub fn equip_if_better(&mut self, character: &mut Character, item: Item) -> bool {
        let name = item.display_name();
        let rarity = item.rarity;
        let slot = item.slot;
        if !auto_equip_if_better(item, &mut character.equipment, character.class) {
            return false;
        }
        self.ui.append_log(LogEntry::new(
            LogTone::Loot(rarity),
            format!("You equip {} ({}).", name, slot),
        ));
        self.ui.refresh_equipment(&character.equipment);
        self.ui.refresh_stats(character);
        true
    }

    /// Records newly reached milestones of `kind` and announces them.
    /// Returns how many were unlocked.
    pub fn check_milestones(&mut self, character: &mut Character, kind: MilestoneKind, value: u64) -> usize {
        let unlocked: Vec<String> = evaluate(&self.data, &mut character.milestones, kind, value)
            .into_iter()
            .map(|m| m.name.clone())
            .collect();
        for name in &unlocked {
            info!("{} achieved milestone {}", character.name, name);
            self.say(LogTone::Milestone, format!("Milestone achieved: {}!", name));
        }
        unlocked.len()
    }
}
