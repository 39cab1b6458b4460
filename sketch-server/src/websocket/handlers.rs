use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::coordinator::GameCoordinator;
use sketch_types::{ClientMessage, RoomError, ServerMessage, SessionId};

/// Per-connection dispatcher from decoded client events to the coordinator.
#[derive(Clone)]
pub struct MessageHandler {
    session_id: SessionId,
    coordinator: Arc<GameCoordinator>,
}

impl MessageHandler {
    pub fn new(session_id: SessionId, coordinator: Arc<GameCoordinator>) -> Self {
        Self {
            session_id,
            coordinator,
        }
    }

    pub async fn handle_message(&self, message: ClientMessage) {
        let result = match message {
            ClientMessage::CreateRoom { room_data, player } => {
                self.handle_create_room(room_data, player).await
            }
            ClientMessage::JoinRoom {
                room_id,
                player,
                password,
            } => {
                self.coordinator
                    .join_room(self.session_id, &room_id, player, password)
                    .await
            }
            ClientMessage::StartGame(_) => self.coordinator.start_game(self.session_id).await,
            ClientMessage::DrawingEvent(event) => {
                self.coordinator.drawing_event(self.session_id, event).await
            }
            ClientMessage::ClearCanvas(_) => self.coordinator.clear_canvas(self.session_id).await,
            ClientMessage::ChatMessage { message } => {
                self.coordinator.chat(self.session_id, &message).await
            }
            ClientMessage::KickPlayer { player_id } => {
                self.coordinator.kick(self.session_id, &player_id).await
            }
            ClientMessage::UpdateRoom(update) => {
                self.coordinator.update_room(self.session_id, update).await
            }
            ClientMessage::LeaveRoom(_) => self.coordinator.leave_room(self.session_id).await,
        };

        if let Err(err) = result {
            self.send_error(err);
        }
    }

    pub async fn handle_disconnect(&self) {
        info!("Handling disconnect for session {}", self.session_id);
        self.coordinator.disconnect(self.session_id).await;
    }

    async fn handle_create_room(
        &self,
        room_data: sketch_types::RoomConfig,
        player: sketch_types::PlayerProfile,
    ) -> Result<(), RoomError> {
        let room_id = self
            .coordinator
            .create_room(self.session_id, room_data, player)
            .await?;
        info!("Session {} created room {}", self.session_id, room_id);
        Ok(())
    }

    fn send_error(&self, err: RoomError) {
        debug!("Request from {} rejected: {}", self.session_id, err);
        self.send_message(ServerMessage::Error {
            message: err.to_string(),
        });
    }

    pub fn send_message(&self, message: ServerMessage) {
        if let Err(e) = self
            .coordinator
            .connections()
            .send_to_connection(self.session_id, message)
        {
            warn!("Failed to send message to {}: {}", self.session_id, e);
        }
    }
}
