//! The write-only presentation interface the engine reports through.

use crate::character::Character;
use crate::data::Area;
use crate::items::{Equipment, Rarity};

/// Colour class of a narrative line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogTone {
    Plain,
    /// XP gains.
    Gain,
    LevelUp,
    Critical,
    Victory,
    Defeat,
    /// Healing, recovery and pet summons.
    Recovery,
    /// Hand-offs between pet and player.
    Notice,
    /// Encounter announcements by threat.
    Muted,
    Formidable,
    Danger,
    Milestone,
    /// Item names, coloured by rarity.
    Loot(Rarity),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    pub message: String,
    pub tone: LogTone,
}

impl LogEntry {
    pub fn new(tone: LogTone, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            tone,
        }
    }
}

/// Which HP bar to redraw.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnitKind {
    Player,
    Pet,
    Foe,
}

/// Presentation collaborator. The engine never reads state back from it.
pub trait UiSink {
    fn append_log(&mut self, entry: LogEntry);
    fn refresh_stats(&mut self, character: &Character);
    fn refresh_equipment(&mut self, equipment: &Equipment);
    fn refresh_area(&mut self, area: &Area);
    fn refresh_hp_bar(&mut self, unit: UnitKind, current: u32, max: u32);
}

/// Discards everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl UiSink for NullSink {
    fn append_log(&mut self, _entry: LogEntry) {}
    fn refresh_stats(&mut self, _character: &Character) {}
    fn refresh_equipment(&mut self, _equipment: &Equipment) {}
    fn refresh_area(&mut self, _area: &Area) {}
    fn refresh_hp_bar(&mut self, _unit: UnitKind, _current: u32, _max: u32) {}
}

/// Keeps every call for inspection.
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    pub log: Vec<LogEntry>,
    pub stats_refreshes: usize,
    pub equipment_refreshes: usize,
    pub areas: Vec<String>,
    pub hp_bars: Vec<(UnitKind, u32, u32)>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> impl Iterator<Item = &str> {
        self.log.iter().map(|entry| entry.message.as_str())
    }

    /// True if any logged line contains `needle`.
    pub fn contains(&self, needle: &str) -> bool {
        self.messages().any(|m| m.contains(needle))
    }

    pub fn count_containing(&self, needle: &str) -> usize {
        self.messages().filter(|m| m.contains(needle)).count()
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

impl UiSink for RecordingSink {
    fn append_log(&mut self, entry: LogEntry) {
        self.log.push(entry);
    }

    fn refresh_stats(&mut self, _character: &Character) {
        self.stats_refreshes += 1;
    }

    fn refresh_equipment(&mut self, _equipment: &Equipment) {
        self.equipment_refreshes += 1;
    }

    fn refresh_area(&mut self, area: &Area) {
        self.areas.push(area.id.clone());
    }

    fn refresh_hp_bar(&mut self, unit: UnitKind, current: u32, max: u32) {
        self.hp_bars.push((unit, current, max));
    }
}
