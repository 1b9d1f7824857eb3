//! Strictly Gomoku library - five-in-a-row rules and matchmaking
//!
//! This library provides the core of an online five-in-a-row service:
//! per-variant rules, an immutable board state machine, a concurrency-safe
//! lobby matchmaker and an orchestrator that ties them to scoring.
//!
//! # Architecture
//!
//! - **Games**: Variant rules, board snapshots and the state machine
//! - **Lobby**: Pairing waiting players into games
//! - **Orchestrator**: The operations outside callers use
//! - **Store**: Persistence contract with an in-memory implementation
//!
//! # Example
//!
//! ```
//! use strictly_gomoku::{GameOrchestrator, MatchStatus, Square, UserId, VariantRegistry};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let orchestrator = GameOrchestrator::in_memory(VariantRegistry::standard());
//! let host = UserId::new(1)?;
//! let guest = UserId::new(2)?;
//!
//! orchestrator.find_or_join_game("freestyle", host)?;
//! let MatchStatus::GameMatch(game) = orchestrator.find_or_join_game("freestyle", guest)? else {
//!     unreachable!("a host is waiting");
//! };
//! orchestrator.make_move(game, host, Square::new(7, 7, 15)?)?;
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod clock;
mod config;
mod error;
mod games;
mod lobby;
mod locks;
mod orchestrator;
mod scoring;
mod store;

// Crate-level exports - Rules engine
pub use games::gomoku::{
    Board, BoardStateMachine, Direction, DrawPoints, FinishPoints, ForfeitPoints, Freestyle,
    GamePoints, Grid, MAX_BOARD_SIZE, MoveError, OpeningRule, Player, Pro, Square, SquareError,
    Tiny, Turn, UnknownVariant, VariantConfig, VariantKind, VariantRegistry, VariantRules,
    WinReason, chebyshev_distance, rules, within_bounds,
};

// Crate-level exports - Matchmaking
pub use lobby::{LobbyMatchmaker, LobbyStatus, MatchStatus};

// Crate-level exports - Orchestration and scoring
pub use error::GameError;
pub use orchestrator::GameOrchestrator;
pub use scoring::Scoring;

// Crate-level exports - Persistence and clock collaborators
pub use clock::{Clock, ManualClock, SystemClock};
pub use store::{
    ClaimOutcome, GameId, GameRecord, GameState, GameStore, InMemoryStore, LobbyId, LobbyRecord,
    NewLobby, PlayerStats, PointsAward, StoreError, UserId, UserIdError,
};

// Crate-level exports - Configuration
pub use config::{ConfigError, EngineConfig};
