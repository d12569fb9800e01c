//! Integration tests: saving, resuming and resetting through a file store.

use idle_rpg::character::{load_character, CharacterIntake, FileStore, SaveStore};
use idle_rpg::core::constants::SAVE_KEY;
use idle_rpg::core::{Engine, GameConfig};
use idle_rpg::data::GameData;
use idle_rpg::ui::RecordingSink;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::fs;
use std::path::Path;

fn create_engine(dir: &Path) -> Engine<RecordingSink, FileStore, ChaCha8Rng> {
    Engine::new(
        GameData::bundled().unwrap(),
        GameConfig::default(),
        RecordingSink::new(),
        FileStore::in_dir(dir).unwrap(),
        ChaCha8Rng::seed_from_u64(17),
    )
}

#[test]
fn test_resume_in_new_session() {
    let dir = tempfile::tempdir().unwrap();
    let original = {
        let mut engine = create_engine(dir.path());
        let mut character = engine
            .start(&CharacterIntake::new("Lyra", "Wood Elf", "Ranger", "Female"))
            .unwrap();
        engine.add_xp(&mut character, 1500);
        engine.save(&character).unwrap();
        character
    };

    let mut engine = create_engine(dir.path());
    let resumed = engine
        .start(&CharacterIntake::new("Someone", "Human", "Warrior", "Male"))
        .unwrap();

    assert_eq!(resumed.id, original.id);
    assert_eq!(resumed.name, "Lyra");
    assert_eq!(resumed.level, 2);
    assert_eq!(resumed.xp, original.xp);
    assert_eq!(resumed.milestones, original.milestones);
    assert!(engine.ui().contains("Welcome back, Lyra!"));
}

#[test]
fn test_save_file_is_checksummed_json() {
    let dir = tempfile::tempdir().unwrap();
    let mut engine = create_engine(dir.path());
    engine.create(&CharacterIntake::default()).unwrap();

    let path = engine.store().path_for(SAVE_KEY);
    let doc: serde_json::Value = serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap();
    assert_eq!(doc["version"], 1);
    assert_eq!(doc["checksum"].as_str().map(str::len), Some(64));
    assert_eq!(doc["character"]["class"], "Warrior");
    assert!(doc["character"]["HP"].is_u64());
}

#[test]
fn test_tampered_save_starts_fresh() {
    let dir = tempfile::tempdir().unwrap();
    {
        let mut engine = create_engine(dir.path());
        engine
            .create(&CharacterIntake::new("Lyra", "Wood Elf", "Ranger", "Female"))
            .unwrap();
    }
    let store = FileStore::in_dir(dir.path()).unwrap();
    let path = store.path_for(SAVE_KEY);
    let tampered = fs::read_to_string(&path).unwrap().replace("Lyra", "Lyrа");
    fs::write(&path, tampered).unwrap();
    assert!(load_character(&store).is_none());

    let mut engine = create_engine(dir.path());
    let character = engine
        .start(&CharacterIntake::new("Fresh", "Human", "Monk", "Male"))
        .unwrap();
    assert_eq!(character.name, "Fresh");
    assert!(engine.ui().contains("Welcome, Fresh!"));
}

#[test]
fn test_pet_is_resummoned_on_load() {
    let dir = tempfile::tempdir().unwrap();
    {
        let mut engine = create_engine(dir.path());
        let mut character = engine
            .create(&CharacterIntake::new("Zed", "Erudite", "Magician", "Male"))
            .unwrap();
        if let Some(pet) = character.pet.as_mut() {
            pet.current_hp = 0;
        }
        character.pet_died = true;
        engine.save(&character).unwrap();
    }

    let mut engine = create_engine(dir.path());
    let character = engine.load().unwrap();
    let pet = character.pet.as_ref().unwrap();
    assert_eq!(pet.current_hp, pet.max_hp());
    assert!(!character.pet_died);
}

#[test]
fn test_reset_deletes_save() {
    let dir = tempfile::tempdir().unwrap();
    let mut engine = create_engine(dir.path());
    engine.create(&CharacterIntake::default()).unwrap();
    assert!(engine.store().read(SAVE_KEY).unwrap().is_some());

    engine.reset().unwrap();

    assert!(engine.store().read(SAVE_KEY).unwrap().is_none());
    assert!(engine.load().is_none());
}
