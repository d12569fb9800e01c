//! Idle RPG - an unattended combat and progression engine.
//!
//! The [`core::Engine`] owns the reference data and drives a
//! [`character::Character`] through endless encounters, reporting through a
//! [`ui::UiSink`] and persisting through a [`character::SaveStore`].

pub mod character;
pub mod combat;
pub mod core;
pub mod data;
pub mod items;
pub mod milestones;
pub mod ui;
pub mod zones;
