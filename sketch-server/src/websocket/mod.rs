use futures_util::{SinkExt, StreamExt};
use std::sync::Arc;
use tracing::{debug, error, info, warn};
use warp::ws::{Message, WebSocket};

use crate::coordinator::GameCoordinator;
use sketch_types::{ClientMessage, ServerMessage, SessionId};

pub mod connection;
pub mod handlers;
pub mod rate_limiter;

#[cfg(test)]
mod integration_tests;

pub use connection::ConnectionManager;
use handlers::MessageHandler;
use rate_limiter::RateLimiter;

/// Runs one client session until either side closes, then removes the
/// session from its room.
pub async fn handle_connection(
    websocket: WebSocket,
    coordinator: Arc<GameCoordinator>,
    rate_limiter: RateLimiter,
) {
    let session_id = SessionId::new();
    info!("New WebSocket connection: {}", session_id);

    let (mut ws_sender, mut ws_receiver) = websocket.split();
    let connections = coordinator.connections().clone();
    let message_receiver = connections.create_connection(session_id);
    let message_handler = MessageHandler::new(session_id, coordinator.clone());

    let incoming_handler = {
        let message_handler = message_handler.clone();
        let mut rate_limiter = rate_limiter;

        async move {
            while let Some(result) = ws_receiver.next().await {
                match result {
                    Ok(msg) => {
                        if msg.is_close() {
                            break;
                        }
                        handle_message(msg, &mut rate_limiter, &message_handler, session_id).await;
                    }
                    Err(e) => {
                        warn!("WebSocket error for {}: {}", session_id, e);
                        break;
                    }
                }
            }
        }
    };

    let outgoing_handler = async move {
        let mut receiver = message_receiver;

        while let Some(message) = receiver.recv().await {
            let json = match serde_json::to_string(&message) {
                Ok(json) => json,
                Err(e) => {
                    error!("Failed to serialize message: {:?}", e);
                    continue;
                }
            };

            if let Err(e) = ws_sender.send(Message::text(json)).await {
                warn!("Failed to send message to {}: {:?}", session_id, e);
                break;
            }
        }
    };

    tokio::select! {
        _ = incoming_handler => {},
        _ = outgoing_handler => {},
    }

    message_handler.handle_disconnect().await;
    match connections.remove_connection(session_id) {
        Some(connection) => info!(
            "Connection {} disconnected after {:?}",
            session_id,
            connection.connected_at.elapsed()
        ),
        None => info!("Connection {} disconnected", session_id),
    }
}

async fn handle_message(
    msg: Message,
    rate_limiter: &mut RateLimiter,
    message_handler: &MessageHandler,
    session_id: SessionId,
) {
    if !rate_limiter.check_rate_limit() {
        warn!("Rate limit exceeded for session {}, dropping message", session_id);
        return;
    }

    let Ok(text) = msg.to_str() else {
        debug!("Ignoring non-text frame from {}", session_id);
        return;
    };

    match serde_json::from_str::<ClientMessage>(text) {
        Ok(client_message) => message_handler.handle_message(client_message).await,
        Err(e) => {
            warn!("Invalid message from {}: {}", session_id, e);
            message_handler.send_message(ServerMessage::Error {
                message: format!("Invalid message: {}", e),
            });
        }
    }
}
