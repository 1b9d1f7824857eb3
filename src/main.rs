//! Strictly Gomoku - command-line front end
//!
//! Inspect variants, replay move lists and run a local matchmaking demo.

#![warn(missing_docs)]

mod cli;

use anyhow::{Context, Result, bail};
use clap::Parser;
use cli::{Cli, Command};
use std::sync::Arc;
use strictly_gomoku::{
    BoardStateMachine, EngineConfig, GameOrchestrator, InMemoryStore, MatchStatus, Square,
    SystemClock, UserId, VariantRegistry,
};
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => EngineConfig::from_file(path)?,
        None => EngineConfig::default(),
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.log_filter())),
        )
        .init();

    let registry = config.registry()?;
    match cli.command {
        Command::Variants => list_variants(&registry),
        Command::Replay {
            variant,
            moves,
            json,
        } => {
            let variant = variant.unwrap_or_else(|| config.default_variant().clone());
            replay(&registry, &variant, &moves, json)
        }
        Command::Demo { variant } => {
            let variant = variant.unwrap_or_else(|| config.default_variant().clone());
            run_demo(registry, &variant)
        }
    }
}

/// Print every enabled variant
fn list_variants(registry: &VariantRegistry) -> Result<()> {
    for rules in registry.iter() {
        let config = rules.config();
        let points = rules.points();
        println!(
            "{:<10} {:>2}x{:<2} opening={:<12} timer={}s finish={}/{} draw={} forfeit={}/{}",
            config.name(),
            config.board_size(),
            config.board_size(),
            config.opening_rule().to_string(),
            rules.turn_timer(),
            points.on_finish.winner,
            points.on_finish.loser,
            points.on_draw.shared,
            points.on_forfeit_or_timer.winner,
            points.on_forfeit_or_timer.forfeiter,
        );
    }
    Ok(())
}

/// Parse "c,r c,r ..." into squares on a `size` board
fn parse_moves(moves: &str, size: u16) -> Result<Vec<Square>> {
    moves
        .split_whitespace()
        .map(|token| {
            let (col, row) = token
                .split_once(',')
                .with_context(|| format!("Move '{}' is not col,row", token))?;
            let col: u16 = col.trim().parse().with_context(|| format!("Bad column in '{}'", token))?;
            let row: u16 = row.trim().parse().with_context(|| format!("Bad row in '{}'", token))?;
            Ok(Square::new(col, row, size)?)
        })
        .collect()
}

/// Replay a move list and print the board
#[instrument(skip(registry, moves))]
fn replay(registry: &VariantRegistry, variant: &str, moves: &str, json: bool) -> Result<()> {
    let rules = registry.require(variant)?;
    let size = *rules.config().board_size();
    let squares = parse_moves(moves, size)?;
    let board = BoardStateMachine::new(rules).replay(&squares)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&board)?);
    } else {
        print!("{}", board.render(size));
        match (board.turn(), board.winner()) {
            (Some(turn), _) => println!("{} to move, {}s left", turn.player, turn.seconds_remaining),
            (None, Some(winner)) => println!("{} player wins", winner),
            (None, None) => println!("Draw"),
        }
    }
    Ok(())
}

/// Two local players find each other and play until someone wins
#[instrument(skip(registry))]
fn run_demo(registry: VariantRegistry, variant: &str) -> Result<()> {
    let rules = registry.require(variant)?;
    let size = *rules.config().board_size();
    let orchestrator = GameOrchestrator::new(
        Arc::new(registry),
        Arc::new(InMemoryStore::new()),
        Arc::new(SystemClock),
    );

    let host = UserId::new(1)?;
    let guest = UserId::new(2)?;
    let waiting = orchestrator.find_or_join_game(variant, host)?;
    println!("host: {:?}", waiting);
    let game_id = match orchestrator.find_or_join_game(variant, guest)? {
        MatchStatus::GameMatch(id) => id,
        other => bail!("Guest was not matched: {:?}", other),
    };
    println!("guest: {:?}", MatchStatus::GameMatch(game_id));

    // Host fills five columns of the middle row, opening on the center and
    // following with the far end so constrained openings accept it.
    let mid = size / 2;
    let first_col = mid.saturating_sub(4);
    let mut host_cols: Vec<u16> = (first_col..first_col + 5).filter(|col| *col != mid).collect();
    host_cols.sort_by_key(|col| std::cmp::Reverse(col.abs_diff(mid)));
    host_cols.insert(0, mid);
    let guest_row = mid + 2;

    for (turn, host_col) in host_cols.into_iter().enumerate() {
        let game = orchestrator.make_move(game_id, host, Square::new(host_col, mid, size)?)?;
        println!("host plays ({}, {}) -> {}", host_col, mid, game.state());
        if game.board().is_terminal() {
            break;
        }
        let guest_col = first_col + turn as u16;
        let game = orchestrator.make_move(game_id, guest, Square::new(guest_col, guest_row, size)?)?;
        println!("guest plays ({}, {}) -> {}", guest_col, guest_row, game.state());
    }

    let game = orchestrator.get_game_by_id(game_id)?;
    print!("{}", game.board().render(size));
    for user in [host, guest] {
        let stats = orchestrator.player_stats(user)?;
        println!("{}: {} points, {} wins, {} games", user, stats.points(), stats.wins(), stats.games());
    }
    info!(game_id = %game_id, state = %game.state(), "Demo finished");
    Ok(())
}
