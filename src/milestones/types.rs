//! Milestone categories and the per-character achievement log.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Event category a milestone listens to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MilestoneKind {
    #[serde(rename = "level")]
    Level,
    #[serde(rename = "kill")]
    Kill,
    #[serde(rename = "bossKill")]
    BossKill,
    /// Value is the level of the pet that joined.
    #[serde(rename = "pet")]
    Pet,
    #[serde(rename = "itemDrop")]
    ItemDrop,
    #[serde(rename = "death")]
    Death,
    /// Categories this engine never emits. Such milestones are never achieved.
    #[serde(other)]
    Unknown,
}

impl MilestoneKind {
    pub fn name(&self) -> &'static str {
        match self {
            MilestoneKind::Level => "Level",
            MilestoneKind::Kill => "Kills",
            MilestoneKind::BossKill => "Boss Kills",
            MilestoneKind::Pet => "Pets",
            MilestoneKind::ItemDrop => "Item Drops",
            MilestoneKind::Death => "Deaths",
            MilestoneKind::Unknown => "Other",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AchievedMilestone {
    /// Unix timestamp.
    pub achieved_at: i64,
}

/// Milestones a character has achieved. Entries are never removed.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MilestoneLog {
    #[serde(default)]
    achieved: BTreeMap<String, AchievedMilestone>,
}

impl MilestoneLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_achieved(&self, id: &str) -> bool {
        self.achieved.contains_key(id)
    }

    /// Records `id`. Returns false if it was already recorded.
    pub fn unlock(&mut self, id: &str) -> bool {
        if self.is_achieved(id) {
            return false;
        }
        self.achieved.insert(
            id.to_string(),
            AchievedMilestone {
                achieved_at: chrono::Utc::now().timestamp(),
            },
        );
        true
    }

    pub fn get(&self, id: &str) -> Option<&AchievedMilestone> {
        self.achieved.get(id)
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.achieved.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.achieved.len()
    }

    pub fn is_empty(&self) -> bool {
        self.achieved.is_empty()
    }
}
