//! Lobby matchmaking: pairing waiting players into games.

mod matchmaker;
mod status;

pub use matchmaker::LobbyMatchmaker;
pub use status::{LobbyStatus, MatchStatus};
