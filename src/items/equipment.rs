use super::types::{EquipmentSlot, Item, Stat};
use serde::{Deserialize, Serialize};

/// Player equipment slots.
///
/// Every slot is `#[serde(default)]` so a save with a missing or partial
/// equipment map still loads with all eight slots present.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Equipment {
    #[serde(rename = "Head")]
    pub head: Option<Item>,
    #[serde(rename = "Torso")]
    pub torso: Option<Item>,
    #[serde(rename = "Legs")]
    pub legs: Option<Item>,
    #[serde(rename = "Back")]
    pub back: Option<Item>,
    #[serde(rename = "Main Hand")]
    pub main_hand: Option<Item>,
    #[serde(rename = "Offhand")]
    pub offhand: Option<Item>,
    #[serde(rename = "Ring 1")]
    pub ring1: Option<Item>,
    #[serde(rename = "Ring 2")]
    pub ring2: Option<Item>,
}

/// Summed stat modifiers across all equipped items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EquipmentBonuses {
    pub atk: i32,
    pub def: i32,
    pub mag: i32,
    pub mr: i32,
}

impl Equipment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, slot: EquipmentSlot) -> &Option<Item> {
        match slot {
            EquipmentSlot::Head => &self.head,
            EquipmentSlot::Torso => &self.torso,
            EquipmentSlot::Legs => &self.legs,
            EquipmentSlot::Back => &self.back,
            EquipmentSlot::MainHand => &self.main_hand,
            EquipmentSlot::Offhand => &self.offhand,
            EquipmentSlot::Ring1 => &self.ring1,
            EquipmentSlot::Ring2 => &self.ring2,
        }
    }

    pub fn set(&mut self, slot: EquipmentSlot, item: Option<Item>) {
        match slot {
            EquipmentSlot::Head => self.head = item,
            EquipmentSlot::Torso => self.torso = item,
            EquipmentSlot::Legs => self.legs = item,
            EquipmentSlot::Back => self.back = item,
            EquipmentSlot::MainHand => self.main_hand = item,
            EquipmentSlot::Offhand => self.offhand = item,
            EquipmentSlot::Ring1 => self.ring1 = item,
            EquipmentSlot::Ring2 => self.ring2 = item,
        }
    }

    pub fn iter_equipped(&self) -> impl Iterator<Item = &Item> {
        [
            &self.head,
            &self.torso,
            &self.legs,
            &self.back,
            &self.main_hand,
            &self.offhand,
            &self.ring1,
            &self.ring2,
        ]
        .into_iter()
        .filter_map(|item| item.as_ref())
    }

    pub fn bonuses(&self) -> EquipmentBonuses {
        self.iter_equipped()
            .fold(EquipmentBonuses::default(), |acc, item| EquipmentBonuses {
                atk: acc.atk + item.modifier(Stat::Atk),
                def: acc.def + item.modifier(Stat::Def),
                mag: acc.mag + item.modifier(Stat::Mag),
                mr: acc.mr + item.modifier(Stat::Mr),
            })
    }
}
