//! # Delve Main Entry Point
//!
//! Initializes the game state and runs a line-oriented terminal loop.

use clap::Parser;
use delve::{
    DelveError, DelveResult, GameSnapshot, GameState, InputHandler, ItemKind, PlayerInput, Tile,
    HELP_TEXT,
};
use std::io::{self, BufRead, Write};

/// Command line arguments for Delve.
#[derive(Parser, Debug)]
#[command(name = "delve")]
#[command(about = "A turn-based, procedurally generated dungeon crawler")]
#[command(version)]
struct Args {
    /// Random seed for dungeon generation
    #[arg(short, long)]
    seed: Option<u64>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "warn")]
    log_level: String,
}

fn main() -> DelveResult<()> {
    let args = Args::parse();

    initialize_logging(&args.log_level)?;

    let seed = args.seed.unwrap_or_else(rand::random);
    log::info!("Starting Delve v{} with seed {}", delve::VERSION, seed);

    let mut game = GameState::new(seed)?;
    run_game_loop(&mut game)
}

/// Sends log output to stderr so it never interleaves with the map.
/// `RUST_LOG`, when set, overrides the command line level.
fn initialize_logging(log_level: &str) -> DelveResult<()> {
    let level: log::LevelFilter = log_level
        .parse()
        .map_err(|_| DelveError::InvalidConfig(format!("Unknown log level '{}'", log_level)))?;

    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .target(env_logger::Target::Stderr)
        .init();

    Ok(())
}

fn run_game_loop(game: &mut GameState) -> DelveResult<()> {
    let input_handler = InputHandler::new();
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    render(&mut stdout, &game.snapshot())?;
    println!("{}", HELP_TEXT);

    for line in stdin.lock().lines() {
        let Some(line) = readable_line(line)? else {
            println!("Unreadable input. {}", HELP_TEXT);
            continue;
        };

        let Some(input) = input_handler.parse(&line) else {
            println!("Unknown command. {}", HELP_TEXT);
            continue;
        };

        match input {
            PlayerInput::Quit => break,
            PlayerInput::Help => println!("{}", HELP_TEXT),
            PlayerInput::ShowState => println!("{}", game.snapshot().to_json()?),
            other => {
                if let Some(intent) = input_handler.input_to_intent(other) {
                    game.submit_intent(intent)?;
                    render(&mut stdout, &game.snapshot())?;
                }
            }
        }
    }

    let stats = game.statistics();
    log::info!(
        "Session over: depth {}, {} enemies defeated, {} steps",
        stats.max_depth_reached,
        stats.enemies_defeated,
        stats.steps_taken
    );
    Ok(())
}

/// Passes through a line of input, mapping undecodable bytes to `None`.
/// Any other read failure ends the session.
fn readable_line(line: io::Result<String>) -> DelveResult<Option<String>> {
    match line {
        Ok(line) => Ok(Some(line)),
        Err(err) if err.kind() == io::ErrorKind::InvalidData => {
            log::warn!("Skipping input line: {}", err);
            Ok(None)
        }
        Err(err) => Err(err.into()),
    }
}

/// Draws the map, a status line and the latest narration.
fn render(out: &mut impl Write, snapshot: &GameSnapshot) -> io::Result<()> {
    for (y, row) in snapshot.tiles.iter().enumerate() {
        let line: String = row
            .iter()
            .enumerate()
            .map(|(x, tile)| glyph_at(snapshot, x as i32, y as i32, *tile))
            .collect();
        writeln!(out, "{}", line)?;
    }

    let player = &snapshot.player;
    writeln!(
        out,
        "Depth {} | HP {}/{} | ATK {} | Potions {} | XP {}",
        snapshot.depth,
        player.stats.hp,
        player.stats.max_hp,
        player.stats.attack_power,
        player.potion_count,
        player.experience
    )?;
    writeln!(out, "{}", snapshot.message)?;
    out.flush()
}

fn glyph_at(snapshot: &GameSnapshot, x: i32, y: i32, tile: Tile) -> char {
    let here = |pos: delve::Position| pos.x == x && pos.y == y;

    if here(snapshot.player.position) {
        '@'
    } else if snapshot.monsters.iter().any(|(_, m)| here(m.position)) {
        'M'
    } else if let Some((_, item)) = snapshot.items.iter().find(|(_, i)| here(i.position)) {
        match item.kind {
            ItemKind::HealthElixir => '!',
            ItemKind::PowerCrystal => '*',
        }
    } else if snapshot.stairs.is_some_and(here) {
        '>'
    } else {
        match tile {
            Tile::Wall => '#',
            Tile::Floor => '.',
        }
    }
}
