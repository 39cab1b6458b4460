use crate::PlayerId;
use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;
use uuid::Uuid;

/// Transport-session identity; changes whenever a client reconnects.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct SessionId(Uuid);

impl SessionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identity a client presents when creating or joining a room.
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(default, rename_all = "camelCase")]
pub struct PlayerProfile {
    pub id: Option<PlayerId>,
    pub name: String,
    pub avatar: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    pub id: PlayerId,
    #[serde(skip)]
    #[ts(skip)]
    pub session_id: SessionId,
    pub name: String,
    pub avatar: String,
    pub score: u32,
    pub round_score: u32,
    pub is_drawing: bool,
    pub has_guessed_correctly: bool,
    pub guess_count: u32,
    pub correct_guesses: u32,
}

impl Player {
    pub fn new(profile: PlayerProfile, session_id: SessionId) -> Self {
        let name = profile.name.trim();
        Self {
            id: profile.id.unwrap_or_else(|| Uuid::new_v4().to_string()),
            session_id,
            name: if name.is_empty() {
                "Player".to_string()
            } else {
                name.to_string()
            },
            avatar: profile.avatar,
            score: 0,
            round_score: 0,
            is_drawing: false,
            has_guessed_correctly: false,
            guess_count: 0,
            correct_guesses: 0,
        }
    }

    /// Clears per-round flags at the start of every round.
    pub fn reset_round(&mut self) {
        self.is_drawing = false;
        self.has_guessed_correctly = false;
        self.round_score = 0;
    }

    /// Zeroes all game statistics when the room returns to waiting.
    pub fn reset_game(&mut self) {
        self.reset_round();
        self.score = 0;
        self.guess_count = 0;
        self.correct_guesses = 0;
    }

    /// Correct guesses as a rounded percentage of all guesses.
    pub fn accuracy(&self) -> u32 {
        if self.guess_count == 0 {
            0
        } else {
            (self.correct_guesses as f64 / self.guess_count as f64 * 100.0).round() as u32
        }
    }
}
