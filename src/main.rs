use anyhow::{Context, Result};
use idle_rpg::character::FileStore;
use idle_rpg::core::{Engine, GameConfig, GameLoop, SleepPacer};
use idle_rpg::data::GameData;
use idle_rpg::ui::TerminalSink;
use log::info;
use std::path::PathBuf;

const CONFIG_ENV: &str = "IDLE_RPG_CONFIG";
const DATA_ENV: &str = "IDLE_RPG_DATA";

fn print_help() {
    println!("Idle RPG - an unattended fantasy combat log\n");
    println!("Usage: idle-rpg [OPTIONS]\n");
    println!("Options:");
    println!("  --reset             Delete the saved character and start over");
    println!("  --encounters <N>    Stop after N encounters");
    println!("  --no-bars           Hide HP bars");
    println!("  -h, --help          Print this help\n");
    println!("Environment:");
    println!("  {}     Path to a TOML config file", CONFIG_ENV);
    println!("  {}       Directory with reference data JSON tables", DATA_ENV);
    println!("  RUST_LOG            Diagnostic log level (default: info)");
}

struct Args {
    reset: bool,
    encounters: Option<u64>,
    hp_bars: bool,
}

fn parse_args() -> Result<Option<Args>> {
    let mut args = Args {
        reset: false,
        encounters: None,
        hp_bars: true,
    };
    let mut iter = std::env::args().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--reset" => args.reset = true,
            "--no-bars" => args.hp_bars = false,
            "--encounters" => {
                let value = iter.next().context("--encounters needs a number")?;
                args.encounters = Some(
                    value
                        .parse()
                        .with_context(|| format!("invalid encounter count '{}'", value))?,
                );
            }
            "--help" | "-h" => {
                print_help();
                return Ok(None);
            }
            other => anyhow::bail!("unknown argument '{}' (try --help)", other),
        }
    }
    Ok(Some(args))
}

fn load_config() -> Result<GameConfig> {
    match std::env::var_os(CONFIG_ENV) {
        Some(path) => {
            let path = PathBuf::from(path);
            GameConfig::load(&path)
                .with_context(|| format!("loading config from {}", path.display()))
        }
        None => Ok(GameConfig::default()),
    }
}

fn load_data() -> Result<GameData> {
    match std::env::var_os(DATA_ENV) {
        Some(dir) => {
            let dir = PathBuf::from(dir);
            GameData::load_dir(&dir)
                .with_context(|| format!("loading reference data from {}", dir.display()))
        }
        None => GameData::bundled().context("loading bundled reference data"),
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let Some(args) = parse_args()? else {
        return Ok(());
    };

    let config = load_config()?;
    let data = load_data()?;
    let store = FileStore::new().context("opening save directory")?;
    info!("saves live in {}", store.dir().display());

    let intake = config.new_character.clone().unwrap_or_default();
    let pacer = SleepPacer::from_config(&config.pacing);
    let sink = if args.hp_bars {
        TerminalSink::new().with_hp_bars()
    } else {
        TerminalSink::new()
    };
    let mut engine = Engine::new(data, config, sink, store, rand::thread_rng());

    if args.reset {
        engine.reset().context("clearing save")?;
        println!("Save cleared.");
    }

    let mut character = engine
        .start(&intake)
        .context("creating character from [new_character]")?;

    let mut game_loop = GameLoop::new(pacer);
    if let Some(limit) = args.encounters {
        game_loop = game_loop.with_max_encounters(limit);
    }
    let summary = game_loop.run(&mut engine, &mut character);
    info!(
        "{} encounters: {} won, {} lost, {} stalemates",
        summary.encounters, summary.victories, summary.defeats, summary.stalemates
    );

    engine.save(&character).context("saving character")?;
    Ok(())
}
