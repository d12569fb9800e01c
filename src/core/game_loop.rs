//! The continuous encounter loop and its pacing.
//!
//! Pacing is injected so the interactive binary can sleep between rounds
//! while tests and headless runs skip the waits entirely.

use super::config::PacingConfig;
use super::engine::Engine;
use crate::character::{Character, SaveStore};
use crate::combat::{EncounterKind, EncounterReport, Outcome, Pause};
use crate::ui::UiSink;
use log::{debug, info};
use rand::Rng;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;

/// Waits out a [`Pause`].
pub trait Pacer {
    fn pause(&mut self, pause: Pause);
}

/// Sleeps for the configured delays.
#[derive(Debug, Clone)]
pub struct SleepPacer {
    pacing: PacingConfig,
}

impl SleepPacer {
    pub fn from_config(pacing: &PacingConfig) -> Self {
        Self {
            pacing: pacing.clone(),
        }
    }
}

impl Pacer for SleepPacer {
    fn pause(&mut self, pause: Pause) {
        let delay = match pause {
            Pause::Round => self.pacing.round_delay(),
            Pause::Encounter => self.pacing.encounter_delay(),
            Pause::Recovery => self.pacing.recovery_delay(),
        };
        thread::sleep(delay);
    }
}

/// Never waits; counts the pauses it was asked for.
#[derive(Debug, Clone, Copy, Default)]
pub struct InstantPacer {
    pub pauses: usize,
}

impl Pacer for InstantPacer {
    fn pause(&mut self, _pause: Pause) {
        self.pauses += 1;
    }
}

/// Shared running flag. Clearing it ends the loop after the current encounter.
#[derive(Debug, Clone, Default)]
pub struct RunHandle(Arc<AtomicBool>);

impl RunHandle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn stop(&self) {
        self.0.store(false, Ordering::SeqCst);
    }

    pub fn is_running(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// What a loop run amounted to.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoopSummary {
    pub encounters: u64,
    pub boss_encounters: u64,
    pub victories: u64,
    pub defeats: u64,
    pub stalemates: u64,
    pub xp_gained: u64,
    pub levels_gained: u32,
    pub items_dropped: u64,
}

impl LoopSummary {
    pub fn record(&mut self, report: &EncounterReport) {
        self.encounters += 1;
        if report.kind == EncounterKind::Boss {
            self.boss_encounters += 1;
        }
        match report.outcome {
            Outcome::Victory => self.victories += 1,
            Outcome::Defeat => self.defeats += 1,
            Outcome::Stalemate => self.stalemates += 1,
        }
        self.xp_gained += report.xp_gained;
        self.levels_gained += report.levels_gained;
        if report.drop.is_some() {
            self.items_dropped += 1;
        }
    }
}

/// Runs encounters back to back until stopped.
#[derive(Debug, Clone)]
pub struct GameLoop<P: Pacer> {
    pacer: P,
    max_encounters: Option<u64>,
}

impl<P: Pacer> GameLoop<P> {
    pub fn new(pacer: P) -> Self {
        Self {
            pacer,
            max_encounters: None,
        }
    }

    /// Stops on its own after `limit` encounters.
    pub fn with_max_encounters(mut self, limit: u64) -> Self {
        self.max_encounters = Some(limit);
        self
    }

    pub fn pacer(&self) -> &P {
        &self.pacer
    }

    /// Runs until the engine's [`RunHandle`] is stopped or the encounter
    /// limit is reached. Starting while already running is harmless.
    pub fn run<U: UiSink, S: SaveStore, R: Rng>(
        &mut self,
        engine: &mut Engine<U, S, R>,
        character: &mut Character,
    ) -> LoopSummary {
        let handle = engine.run_handle();
        handle.start();
        info!("encounter loop started for {}", character.name);

        let mut summary = LoopSummary::default();
        while handle.is_running() {
            if self
                .max_encounters
                .is_some_and(|limit| summary.encounters >= limit)
            {
                break;
            }
            let kind = engine.roll_encounter_kind();
            let report = engine.run_encounter(character, kind, &mut self.pacer);
            debug!(
                "{:?} against {} (level {}): {:?}",
                report.kind, report.foe_name, report.foe_level, report.outcome
            );
            summary.record(&report);
            self.pacer.pause(Pause::Encounter);
        }

        handle.stop();
        info!(
            "encounter loop stopped after {} encounters",
            summary.encounters
        );
        summary
    }
}
