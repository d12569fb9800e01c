use crate::core::constants::BOSS_ITEM_ID_MIN;
use crate::core::error::DataError;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EquipmentSlot {
    Head,
    Torso,
    Legs,
    Back,
    #[serde(rename = "Main Hand")]
    MainHand,
    Offhand,
    #[serde(rename = "Ring 1")]
    Ring1,
    #[serde(rename = "Ring 2")]
    Ring2,
}

impl EquipmentSlot {
    pub const ALL: [EquipmentSlot; 8] = [
        EquipmentSlot::Head,
        EquipmentSlot::Torso,
        EquipmentSlot::Legs,
        EquipmentSlot::Back,
        EquipmentSlot::MainHand,
        EquipmentSlot::Offhand,
        EquipmentSlot::Ring1,
        EquipmentSlot::Ring2,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            EquipmentSlot::Head => "Head",
            EquipmentSlot::Torso => "Torso",
            EquipmentSlot::Legs => "Legs",
            EquipmentSlot::Back => "Back",
            EquipmentSlot::MainHand => "Main Hand",
            EquipmentSlot::Offhand => "Offhand",
            EquipmentSlot::Ring1 => "Ring 1",
            EquipmentSlot::Ring2 => "Ring 2",
        }
    }
}

impl fmt::Display for EquipmentSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Rarity {
    Common = 0,
    Uncommon = 1,
    Rare = 2,
    Epic = 3,
    Legendary = 4,
}

impl Rarity {
    /// Returns the display name for this rarity tier.
    pub fn name(&self) -> &'static str {
        match self {
            Rarity::Common => "Common",
            Rarity::Uncommon => "Uncommon",
            Rarity::Rare => "Rare",
            Rarity::Epic => "Epic",
            Rarity::Legendary => "Legendary",
        }
    }

    /// Equipment score multiplier.
    pub fn multiplier(&self) -> f64 {
        match self {
            Rarity::Common => 1.0,
            Rarity::Uncommon => 1.1,
            Rarity::Rare => 1.25,
            Rarity::Epic => 1.5,
            Rarity::Legendary => 2.0,
        }
    }

    /// Colour the item name is rendered in.
    pub fn color(&self) -> &'static str {
        match self {
            Rarity::Common => "white",
            Rarity::Uncommon => "green",
            Rarity::Rare => "blue",
            Rarity::Epic => "purple",
            Rarity::Legendary => "orange",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Stat {
    #[serde(rename = "ATK")]
    Atk,
    #[serde(rename = "DEF")]
    Def,
    #[serde(rename = "MAG")]
    Mag,
    #[serde(rename = "MR")]
    Mr,
}

impl Stat {
    pub fn from_key(key: &str) -> Option<Stat> {
        match key.trim().to_ascii_uppercase().as_str() {
            "ATK" => Some(Stat::Atk),
            "DEF" => Some(Stat::Def),
            "MAG" => Some(Stat::Mag),
            "MR" => Some(Stat::Mr),
            _ => None,
        }
    }
}

pub type Modifiers = BTreeMap<Stat, i32>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: u32,
    pub name: String,
    pub slot: EquipmentSlot,
    pub level: u32,
    pub rarity: Rarity,
    #[serde(default, deserialize_with = "deserialize_modifiers")]
    pub modifiers: Modifiers,
}

impl Item {
    /// Boss-exclusive items never drop from regular encounters.
    pub fn is_boss_drop(&self) -> bool {
        self.id >= BOSS_ITEM_ID_MIN
    }

    pub fn modifier(&self, stat: Stat) -> i32 {
        self.modifiers.get(&stat).copied().unwrap_or(0)
    }

    /// "[Rare] Mithril Coif" style label.
    pub fn display_name(&self) -> String {
        format!("[{}] {}", self.rarity.name(), self.name)
    }
}

/// Parses the compact `"ATK:5,DEF:-2"` modifier form.
pub fn parse_modifiers(text: &str) -> Result<Modifiers, DataError> {
    let mut modifiers = Modifiers::new();
    for entry in text.split(',').map(str::trim).filter(|e| !e.is_empty()) {
        let (key, value) = entry
            .split_once(':')
            .ok_or_else(|| DataError::Modifier(entry.to_string()))?;
        let stat = Stat::from_key(key).ok_or_else(|| DataError::Modifier(entry.to_string()))?;
        let value: i32 = value
            .trim()
            .parse()
            .map_err(|_| DataError::Modifier(entry.to_string()))?;
        *modifiers.entry(stat).or_insert(0) += value;
    }
    Ok(modifiers)
}

fn deserialize_modifiers<'de, D>(deserializer: D) -> Result<Modifiers, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Repr {
        Map(Modifiers),
        Text(String),
    }

    match Repr::deserialize(deserializer)? {
        Repr::Map(map) => Ok(map),
        Repr::Text(text) => parse_modifiers(&text).map_err(serde::de::Error::custom),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rarity_multipliers_increase() {
        let tiers = [
            Rarity::Common,
            Rarity::Uncommon,
            Rarity::Rare,
            Rarity::Epic,
            Rarity::Legendary,
        ];
        for pair in tiers.windows(2) {
            assert!(pair[0].multiplier() < pair[1].multiplier());
        }
        assert_eq!(Rarity::Legendary.multiplier(), 2.0);
        assert_eq!(Rarity::Epic.color(), "purple");
    }

    #[test]
    fn test_parse_modifiers_text_form() {
        let mods = parse_modifiers("ATK:5, DEF:-2,mr:3").unwrap();
        assert_eq!(mods.get(&Stat::Atk), Some(&5));
        assert_eq!(mods.get(&Stat::Def), Some(&-2));
        assert_eq!(mods.get(&Stat::Mr), Some(&3));
        assert_eq!(mods.get(&Stat::Mag), None);
    }

    #[test]
    fn test_parse_modifiers_empty() {
        assert!(parse_modifiers("").unwrap().is_empty());
    }

    #[test]
    fn test_parse_modifiers_rejects_unknown_stat() {
        assert!(matches!(
            parse_modifiers("LUCK:4"),
            Err(DataError::Modifier(_))
        ));
        assert!(parse_modifiers("ATK=4").is_err());
        assert!(parse_modifiers("ATK:four").is_err());
    }

    #[test]
    fn test_item_deserializes_both_modifier_forms() {
        let text: Item = serde_json::from_str(
            r#"{"id":1,"name":"Rusty Sword","slot":"Main Hand","level":1,"rarity":"Common","modifiers":"ATK:3"}"#,
        )
        .unwrap();
        let map: Item = serde_json::from_str(
            r#"{"id":2,"name":"Cloth Cap","slot":"Head","level":1,"rarity":"Uncommon","modifiers":{"DEF":2,"MR":1}}"#,
        )
        .unwrap();
        assert_eq!(text.slot, EquipmentSlot::MainHand);
        assert_eq!(text.modifier(Stat::Atk), 3);
        assert_eq!(map.modifier(Stat::Def), 2);
        assert_eq!(map.modifier(Stat::Atk), 0);
    }

    #[test]
    fn test_item_without_modifiers() {
        let item: Item = serde_json::from_str(
            r#"{"id":3,"name":"Plain Ring","slot":"Ring 1","level":2,"rarity":"Common"}"#,
        )
        .unwrap();
        assert!(item.modifiers.is_empty());
    }

    #[test]
    fn test_boss_drop_boundary() {
        let mut item: Item = serde_json::from_str(
            r#"{"id":4999,"name":"x","slot":"Back","level":1,"rarity":"Common"}"#,
        )
        .unwrap();
        assert!(!item.is_boss_drop());
        item.id = 5000;
        assert!(item.is_boss_drop());
    }
}
