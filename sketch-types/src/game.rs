use crate::{Player, PlayerId, RoomId};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub enum RoomPhase {
    Waiting,
    Drawing,
    Results,
    GameOver,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    /// Score multiplier applied to base points plus time bonus.
    pub fn multiplier(self) -> f64 {
        match self {
            Difficulty::Easy => 1.0,
            Difficulty::Medium => 1.5,
            Difficulty::Hard => 2.0,
        }
    }
}

/// Difficulty filter applied to categories when picking a word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum DifficultyMode {
    #[default]
    Mixed,
    Easy,
    Medium,
    Hard,
}

impl DifficultyMode {
    pub fn allows(self, difficulty: Difficulty) -> bool {
        match self {
            DifficultyMode::Mixed => true,
            DifficultyMode::Easy => difficulty == Difficulty::Easy,
            DifficultyMode::Medium => difficulty == Difficulty::Medium,
            DifficultyMode::Hard => difficulty == Difficulty::Hard,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "kebab-case")]
pub enum WordSelectionMode {
    #[default]
    Category,
    CustomOnly,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct GameSettings {
    pub round_time: u32,
    pub max_rounds: u32,
    pub points_for_correct_guess: u32,
    pub points_for_drawer: u32,
    /// Elapsed-time percentages at which another letter is revealed, ascending.
    pub hint_timings: Vec<u8>,
    pub categories: Vec<String>,
    pub difficulty: DifficultyMode,
    pub max_players: usize,
    pub word_mode: WordSelectionMode,
    pub include_custom_words: bool,
    pub custom_words: Vec<String>,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            round_time: 90,
            max_rounds: 5,
            points_for_correct_guess: 100,
            points_for_drawer: 50,
            hint_timings: vec![50, 70, 90],
            categories: vec![
                "Animals".to_string(),
                "Objects".to_string(),
                "Food".to_string(),
                "Nature".to_string(),
            ],
            difficulty: DifficultyMode::Mixed,
            max_players: 12,
            word_mode: WordSelectionMode::Category,
            include_custom_words: false,
            custom_words: Vec::new(),
        }
    }
}

/// Partial settings sent by clients; unset fields keep their current value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(default, rename_all = "camelCase")]
pub struct SettingsPatch {
    pub round_time: Option<u32>,
    pub max_rounds: Option<u32>,
    pub points_for_correct_guess: Option<u32>,
    pub points_for_drawer: Option<u32>,
    pub hint_timings: Option<Vec<u8>>,
    pub categories: Option<Vec<String>>,
    pub difficulty: Option<DifficultyMode>,
    pub max_players: Option<usize>,
    pub word_mode: Option<WordSelectionMode>,
    pub include_custom_words: Option<bool>,
    pub custom_words: Option<Vec<String>>,
}

/// `roomData` of a create-room command.
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(default, rename_all = "camelCase")]
pub struct RoomConfig {
    pub name: Option<String>,
    pub is_private: bool,
    pub password: Option<String>,
    pub settings: SettingsPatch,
}

/// Host-issued change to a waiting room.
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(default, rename_all = "camelCase")]
pub struct RoomUpdate {
    pub is_private: Option<bool>,
    pub password: Option<String>,
    pub settings: SettingsPatch,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum DrawAction {
    Start,
    Draw,
    End,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum DrawTool {
    Brush,
    Eraser,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct DrawingEvent {
    #[serde(rename = "type")]
    pub action: DrawAction,
    pub x: f64,
    pub y: f64,
    pub tool: DrawTool,
    pub color: String,
    pub size: f64,
    pub opacity: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum ChatKind {
    Chat,
    Guess,
    System,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    pub id: String,
    pub player: String,
    pub player_id: Option<PlayerId>,
    pub message: String,
    #[serde(rename = "type")]
    pub kind: ChatKind,
    pub is_correct: bool,
    pub similarity: u8,
    pub timestamp: String, // ISO 8601 string
}

/// Full room view sent to members. Never carries the secret word.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct RoomSnapshot {
    pub id: RoomId,
    pub name: String,
    pub host_id: Option<PlayerId>,
    pub players: Vec<Player>,
    pub phase: RoomPhase,
    pub round: u32,
    pub max_rounds: u32,
    pub current_drawer_id: Option<PlayerId>,
    pub current_category: Option<String>,
    pub current_difficulty: Option<Difficulty>,
    pub time_left: u32,
    pub total_time: u32,
    pub hint_revealed: Vec<bool>,
    pub masked_word: Option<String>,
    pub drawing_data: Vec<DrawingEvent>,
    pub is_private: bool,
    pub settings: GameSettings,
}

/// Lightweight listing entry for room browsing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct RoomSummary {
    pub id: RoomId,
    pub name: String,
    pub player_count: usize,
    pub max_players: usize,
    pub phase: RoomPhase,
    pub round: u32,
    pub max_rounds: u32,
    pub categories: Vec<String>,
    pub difficulty: DifficultyMode,
    pub is_private: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CorrectGuesser {
    pub player_id: PlayerId,
    pub name: String,
    pub score: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardEntry {
    pub rank: u32,
    pub player_id: PlayerId,
    pub name: String,
    pub score: u32,
    pub round_score: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct FinalScore {
    pub rank: u32,
    pub player_id: PlayerId,
    pub name: String,
    pub total_score: u32,
    pub accuracy: u32,
    pub correct_guesses: u32,
    pub total_guesses: u32,
}
