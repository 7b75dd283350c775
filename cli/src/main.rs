//! Headless driver for the minesweeper engine: applies scripted moves to a
//! new game and prints the resulting board as JSON.

use std::path::PathBuf;

use buscaminas_core::{Coord, Coord2, GameController, MineGenerator, RevealOutcome, Snapshot};
use clap::Parser;
use serde::Serialize;

use config::GameSettings;

mod config;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,

    /// TOML file with game settings; command line values take precedence
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(flatten)]
    settings: GameSettings,

    /// Cell to flag before revealing, as ROW,COL (repeatable)
    #[arg(long = "flag", value_name = "ROW,COL", value_parser = parse_coords)]
    flags: Vec<Coord2>,

    /// Cell to reveal, as ROW,COL (repeatable, applied in order)
    #[arg(long = "reveal", value_name = "ROW,COL", value_parser = parse_coords)]
    reveals: Vec<Coord2>,

    /// Pretty-print the JSON output
    #[arg(long)]
    pretty: bool,
}

#[derive(Serialize, Debug)]
struct Report {
    seed: u64,
    snapshot: Snapshot,
}

fn parse_coords(text: &str) -> Result<Coord2, String> {
    let (row, col) = text
        .split_once(',')
        .ok_or_else(|| format!("expected ROW,COL but got {text:?}"))?;
    let row = row
        .trim()
        .parse::<Coord>()
        .map_err(|err| format!("invalid row {row:?}: {err}"))?;
    let col = col
        .trim()
        .parse::<Coord>()
        .map_err(|err| format!("invalid column {col:?}: {err}"))?;
    Ok((row, col))
}

/// Applies every flag, then every reveal in order.
fn play<G: MineGenerator>(
    game: &mut GameController<G>,
    flags: &[Coord2],
    reveals: &[Coord2],
) -> anyhow::Result<()> {
    for &coords in flags {
        let outcome = game.toggle_flag(coords)?;
        log::info!("flag {:?}: {:?}", coords, outcome);
    }

    for &coords in reveals {
        let outcome = game.reveal(coords)?;
        log::info!("reveal {:?}: {:?}", coords, outcome);
        match outcome {
            RevealOutcome::HitMine => log::info!("Hit a mine, game lost"),
            RevealOutcome::Won => log::info!("All safe cells revealed, game won"),
            RevealOutcome::NoChange if game.is_game_over() => {
                log::warn!("Reveal at {:?} ignored, game already over", coords)
            }
            _ => {}
        }
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    env_logger::Builder::new()
        .filter_level(args.verbose.log_level_filter())
        .init();

    let settings = match &args.config {
        Some(path) => args.settings.clone().or(GameSettings::load(path)?),
        None => args.settings.clone(),
    };
    let config = settings.game_config()?;
    log::debug!("config: {:?}", config);

    let mut game = match settings.seed {
        Some(seed) => GameController::with_seed(config, seed)?,
        None => GameController::with_config(config)?,
    };
    let seed = game.generator().seed();
    log::info!(
        "New {}x{} game with {} mines, seed {}",
        config.rows,
        config.cols,
        config.mines,
        seed
    );

    play(&mut game, &args.flags, &args.reveals)?;

    let report = Report {
        seed,
        snapshot: game.snapshot(),
    };
    let json = if args.pretty {
        serde_json::to_string_pretty(&report)?
    } else {
        serde_json::to_string(&report)?
    };
    println!("{json}");
    Ok(())
}
