use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer, Serialize};
use ts_rs::TS;

use crate::{
    ChatMessage, CorrectGuesser, Difficulty, DrawingEvent, FinalScore, LeaderboardEntry, Player,
    PlayerId, PlayerProfile, RoomConfig, RoomId, RoomSnapshot, RoomUpdate,
};

/// Payload of commands that carry no data. Accepts `{}`, `null` or a missing
/// `data` field, and is sent as `{}`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
pub struct NoPayload {}

impl<'de> Deserialize<'de> for NoPayload {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Option::<IgnoredAny>::deserialize(deserializer).map(|_| NoPayload {})
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(
    tag = "event",
    content = "data",
    rename_all = "kebab-case",
    rename_all_fields = "camelCase"
)]
pub enum ClientMessage {
    CreateRoom {
        room_data: RoomConfig,
        player: PlayerProfile,
    },
    JoinRoom {
        room_id: RoomId,
        player: PlayerProfile,
        #[serde(default)]
        password: Option<String>,
    },
    StartGame(NoPayload),
    DrawingEvent(DrawingEvent),
    ClearCanvas(NoPayload),
    ChatMessage {
        message: String,
    },
    KickPlayer {
        player_id: PlayerId,
    },
    UpdateRoom(RoomUpdate),
    LeaveRoom(NoPayload),
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(
    tag = "event",
    content = "data",
    rename_all = "kebab-case",
    rename_all_fields = "camelCase"
)]
pub enum ServerMessage {
    RoomCreated {
        room_id: RoomId,
        room: RoomSnapshot,
    },
    RoomJoined {
        room: RoomSnapshot,
    },
    PlayerJoined {
        player: Player,
        players: Vec<Player>,
    },
    PlayerLeft {
        player: Player,
        players: Vec<Player>,
    },
    PlayerReconnected {
        player_id: PlayerId,
    },
    GameStarted {
        room: RoomSnapshot,
    },
    RoundStarted {
        round: u32,
        max_rounds: u32,
        drawer: String,
        drawer_id: PlayerId,
        category: String,
        difficulty: Difficulty,
        time_left: u32,
        masked_word: String,
    },
    /// Sent only to the drawer.
    WordToDraw {
        word: String,
    },
    HintRevealed {
        hints: Vec<bool>,
        masked_word: String,
    },
    TimeUpdate {
        time_left: u32,
    },
    DrawingEvent(DrawingEvent),
    CanvasCleared,
    ChatMessage(ChatMessage),
    CorrectGuess {
        player: String,
        player_id: PlayerId,
        word: String,
        points: u32,
        category: String,
    },
    CloseGuess {
        player: String,
        guess: String,
        similarity: u8,
    },
    RoundEnded {
        word: String,
        category: String,
        difficulty: Difficulty,
        drawer: Option<String>,
        correct_guessers: Vec<CorrectGuesser>,
        leaderboard: Vec<LeaderboardEntry>,
    },
    GameOver {
        winner: Option<String>,
        winner_id: Option<PlayerId>,
        final_scores: Vec<FinalScore>,
    },
    RoomReset {
        room: RoomSnapshot,
    },
    RoomUpdated {
        room: RoomSnapshot,
    },
    Kicked,
    LeftRoom,
    Error {
        message: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_message_uses_event_names() {
        let parsed: ClientMessage =
            serde_json::from_str(r#"{"event":"chat-message","data":{"message":"cat"}}"#).unwrap();
        assert!(matches!(parsed, ClientMessage::ChatMessage { message } if message == "cat"));

        for frame in [
            r#"{"event":"start-game"}"#,
            r#"{"event":"start-game","data":null}"#,
            r#"{"event":"start-game","data":{}}"#,
            r#"{"data":{},"event":"start-game"}"#,
        ] {
            let parsed: ClientMessage = serde_json::from_str(frame).unwrap();
            assert!(matches!(parsed, ClientMessage::StartGame(_)), "{}", frame);
        }

        let parsed: ClientMessage =
            serde_json::from_str(r#"{"event":"clear-canvas","data":{}}"#).unwrap();
        assert!(matches!(parsed, ClientMessage::ClearCanvas(_)));
        let parsed: ClientMessage =
            serde_json::from_str(r#"{"event":"leave-room","data":{}}"#).unwrap();
        assert!(matches!(parsed, ClientMessage::LeaveRoom(_)));

        let json = serde_json::to_value(ClientMessage::StartGame(NoPayload::default())).unwrap();
        assert_eq!(json, serde_json::json!({"event": "start-game", "data": {}}));

        let parsed: ClientMessage = serde_json::from_str(
            r#"{"event":"join-room","data":{"roomId":"ABC123","player":{"name":"Bob"}}}"#,
        )
        .unwrap();
        match parsed {
            ClientMessage::JoinRoom {
                room_id,
                player,
                password,
            } => {
                assert_eq!(room_id, "ABC123");
                assert_eq!(player.name, "Bob");
                assert!(password.is_none());
            }
            other => panic!("Expected JoinRoom, got {:?}", other),
        }
    }

    #[test]
    fn test_drawing_event_wire_shape() {
        let parsed: ClientMessage = serde_json::from_str(
            r##"{"event":"drawing-event","data":{"type":"draw","x":1.5,"y":2.0,"tool":"eraser","color":"#000","size":4,"opacity":1}}"##,
        )
        .unwrap();
        match parsed {
            ClientMessage::DrawingEvent(event) => {
                assert_eq!(event.action, crate::DrawAction::Draw);
                assert_eq!(event.tool, crate::DrawTool::Eraser);
            }
            other => panic!("Expected DrawingEvent, got {:?}", other),
        }
    }

    #[test]
    fn test_server_message_serializes_camel_case_fields() {
        let json = serde_json::to_value(ServerMessage::TimeUpdate { time_left: 42 }).unwrap();
        assert_eq!(json["event"], "time-update");
        assert_eq!(json["data"]["timeLeft"], 42);

        let json = serde_json::to_value(ServerMessage::CanvasCleared).unwrap();
        assert_eq!(json["event"], "canvas-cleared");
    }
}
