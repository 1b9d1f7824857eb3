//! Persistence collaborator: games, lobbies and player points.

mod error;
mod memory;
mod models;
mod repository;

pub use error::StoreError;
pub use memory::InMemoryStore;
pub use models::{
    ClaimOutcome, GameId, GameRecord, GameState, LobbyId, LobbyRecord, NewLobby, PlayerStats, PointsAward,
    UserId, UserIdError,
};
pub use repository::GameStore;
