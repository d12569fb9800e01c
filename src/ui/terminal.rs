//! Plain scrolling terminal output with crossterm colours.

use super::sink::{LogEntry, LogTone, UiSink, UnitKind};
use crate::character::{Character, Stats};
use crate::data::Area;
use crate::items::{Equipment, EquipmentSlot, Rarity};
use crossterm::style::{Color, Stylize};
use std::io::{self, Write};

const HP_BAR_WIDTH: usize = 20;

pub fn tone_color(tone: LogTone) -> Color {
    match tone {
        LogTone::Plain => Color::Reset,
        LogTone::Gain => Color::Yellow,
        LogTone::LevelUp => Color::Blue,
        LogTone::Critical => Color::DarkYellow,
        LogTone::Victory => Color::Green,
        LogTone::Defeat => Color::Red,
        LogTone::Recovery => Color::Green,
        LogTone::Notice => Color::Cyan,
        LogTone::Muted => Color::Grey,
        LogTone::Formidable => Color::Yellow,
        LogTone::Danger => Color::DarkRed,
        LogTone::Milestone => Color::Magenta,
        LogTone::Loot(rarity) => rarity_color(rarity),
    }
}

pub fn rarity_color(rarity: Rarity) -> Color {
    match rarity.color() {
        "green" => Color::Green,
        "blue" => Color::Blue,
        "purple" => Color::Magenta,
        "orange" => Color::Rgb {
            r: 255,
            g: 165,
            b: 0,
        },
        _ => Color::White,
    }
}

/// Renders `current/max` as a fixed-width bar.
pub fn hp_bar(current: u32, max: u32) -> String {
    let filled = if max == 0 {
        0
    } else {
        ((current.min(max) as usize * HP_BAR_WIDTH) + max as usize - 1) / max as usize
    };
    format!(
        "[{}{}] {}/{}",
        "#".repeat(filled),
        "-".repeat(HP_BAR_WIDTH - filled),
        current,
        max
    )
}

/// Writes the narrative log to stdout. Panels print only when they change.
#[derive(Debug, Default)]
pub struct TerminalSink {
    show_hp_bars: bool,
    last_stats: Option<(u32, Stats)>,
    last_area: Option<String>,
}

impl TerminalSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_hp_bars(mut self) -> Self {
        self.show_hp_bars = true;
        self
    }

    fn emit(&self, line: String) {
        let mut out = io::stdout().lock();
        // Nothing useful to do if stdout is gone.
        let _ = writeln!(out, "{}", line);
        let _ = out.flush();
    }
}

impl UiSink for TerminalSink {
    fn append_log(&mut self, entry: LogEntry) {
        let color = tone_color(entry.tone);
        self.emit(format!("{}", entry.message.with(color)));
    }

    fn refresh_stats(&mut self, character: &Character) {
        let eff = character.effective_stats();
        let snapshot = (character.level, eff);
        if self.last_stats == Some(snapshot) {
            return;
        }
        self.last_stats = Some(snapshot);
        let t = &character.totals;
        self.emit(
            format!(
                "== {} the {} {} | Lv {} | XP {}/{} | HP {} ATK {} DEF {} MAG {} MR {} | kills {} bosses {} drops {} deaths {}",
                character.name,
                character.race,
                character.class,
                character.level,
                character.xp,
                character.xp_to_next,
                eff.hp,
                eff.atk,
                eff.def,
                eff.mag,
                eff.mr,
                t.enemy_kills,
                t.boss_kills,
                t.item_drops,
                t.death_count
            )
            .bold()
            .to_string(),
        );
    }

    fn refresh_equipment(&mut self, equipment: &Equipment) {
        for slot in EquipmentSlot::ALL {
            if let Some(item) = equipment.get(slot) {
                self.emit(format!(
                    "   {:<9} {}",
                    slot.name(),
                    item.display_name().with(rarity_color(item.rarity))
                ));
            }
        }
    }

    fn refresh_area(&mut self, area: &Area) {
        if self.last_area.as_deref() == Some(area.id.as_str()) {
            return;
        }
        self.last_area = Some(area.id.clone());
        self.emit(
            format!(
                "-- {} (levels {}-{}) {}",
                area.name, area.recommended_level, area.max_level, area.description
            )
            .italic()
            .to_string(),
        );
    }

    fn refresh_hp_bar(&mut self, unit: UnitKind, current: u32, max: u32) {
        if !self.show_hp_bars {
            return;
        }
        let label = match unit {
            UnitKind::Player => "You",
            UnitKind::Pet => "Pet",
            UnitKind::Foe => "Foe",
        };
        self.emit(format!("   {:<3} {}", label, hp_bar(current, max)).dark_grey().to_string());
    }
}
