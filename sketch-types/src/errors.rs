use serde::{Deserialize, Serialize};
use thiserror::Error;
use ts_rs::TS;

/// Failures surfaced to the requesting session as an `error` event.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum RoomError {
    #[error("Room not found")]
    RoomNotFound,
    #[error("Invalid password")]
    InvalidPassword,
    #[error("Room is full")]
    RoomFull,
    #[error("Only the host can do that")]
    NotHost,
    #[error("Only the drawer can do that")]
    NotDrawer,
    #[error("Invalid room settings: {reason}")]
    InvalidConfig { reason: String },
    #[error("Need at least 2 players to start")]
    NotEnoughPlayers,
    #[error("A game is already in progress")]
    GameInProgress,
    #[error("Not in a room")]
    NotInRoom,
    #[error("Already in a room")]
    AlreadyInRoom,
    #[error("Player not found")]
    PlayerNotFound,
    #[error("You cannot kick yourself")]
    CannotKickSelf,
}

impl RoomError {
    pub fn invalid_config(reason: impl Into<String>) -> Self {
        RoomError::InvalidConfig {
            reason: reason.into(),
        }
    }
}
