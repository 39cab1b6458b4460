use dashmap::DashMap;
use sketch_types::{ServerMessage, SessionId};
use tokio::sync::mpsc;
use tokio::time::Instant;

#[derive(Debug, Clone)]
pub struct Connection {
    pub id: SessionId,
    pub connected_at: Instant,
    pub sender: mpsc::UnboundedSender<ServerMessage>,
}

impl Connection {
    pub fn new(id: SessionId) -> (Self, mpsc::UnboundedReceiver<ServerMessage>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        let connection = Self {
            id,
            connected_at: Instant::now(),
            sender,
        };
        (connection, receiver)
    }

    pub fn send_message(&self, message: ServerMessage) -> Result<(), String> {
        self.sender
            .send(message)
            .map_err(|_| "Connection closed".to_string())
    }
}

/// Outbound channels of every live session. Sends never block.
#[derive(Default)]
pub struct ConnectionManager {
    connections: DashMap<SessionId, Connection>,
}

impl ConnectionManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn create_connection(&self, id: SessionId) -> mpsc::UnboundedReceiver<ServerMessage> {
        let (connection, receiver) = Connection::new(id);
        self.connections.insert(id, connection);
        receiver
    }

    pub fn remove_connection(&self, id: SessionId) -> Option<Connection> {
        self.connections.remove(&id).map(|(_, connection)| connection)
    }

    /// Registered and its writer is still draining the channel.
    pub fn is_connected(&self, id: SessionId) -> bool {
        self.connections
            .get(&id)
            .is_some_and(|connection| !connection.sender.is_closed())
    }

    pub fn send_to_connection(&self, id: SessionId, message: ServerMessage) -> Result<(), String> {
        match self.connections.get(&id) {
            Some(connection) => connection.send_message(message),
            None => Err("Connection not found".to_string()),
        }
    }

    /// Deliver to each session, skipping any that have gone away.
    pub fn send_to_many<I>(&self, ids: I, message: &ServerMessage)
    where
        I: IntoIterator<Item = SessionId>,
    {
        for id in ids {
            if let Err(e) = self.send_to_connection(id, message.clone()) {
                tracing::debug!("Dropping message for {}: {}", id, e);
            }
        }
    }

    pub fn connection_count(&self) -> usize {
        self.connections.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_connection_creation_and_removal() {
        let manager = ConnectionManager::new();
        let id = SessionId::new();

        let _receiver = manager.create_connection(id);
        assert_eq!(manager.connection_count(), 1);
        assert!(manager.is_connected(id));

        assert!(manager.remove_connection(id).is_some());
        assert_eq!(manager.connection_count(), 0);
        assert!(!manager.is_connected(id));
        assert!(manager.remove_connection(id).is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_removed_connection_reports_its_age() {
        let manager = ConnectionManager::new();
        let id = SessionId::new();
        let _receiver = manager.create_connection(id);

        tokio::time::advance(std::time::Duration::from_secs(90)).await;
        let connection = manager.remove_connection(id).unwrap();
        assert_eq!(connection.connected_at.elapsed().as_secs(), 90);
    }

    #[tokio::test]
    async fn test_dropped_receiver_is_not_connected() {
        let manager = ConnectionManager::new();
        let id = SessionId::new();
        let receiver = manager.create_connection(id);
        assert!(manager.is_connected(id));

        drop(receiver);
        assert!(!manager.is_connected(id));
    }

    #[tokio::test]
    async fn test_rapid_connect_disconnect_cycles() {
        let manager = ConnectionManager::new();
        let ids: Vec<SessionId> = (0..100).map(|_| SessionId::new()).collect();
        let _receivers: Vec<_> = ids.iter().map(|id| manager.create_connection(*id)).collect();
        assert_eq!(manager.connection_count(), 100);

        for id in ids {
            manager.remove_connection(id);
        }
        assert_eq!(manager.connection_count(), 0);
    }

    #[tokio::test]
    async fn test_message_sending_to_nonexistent_connection() {
        let manager = ConnectionManager::new();
        let result = manager.send_to_connection(SessionId::new(), ServerMessage::Kicked);
        assert_eq!(result.unwrap_err(), "Connection not found");
    }

    #[tokio::test]
    async fn test_send_after_receiver_dropped() {
        let manager = ConnectionManager::new();
        let id = SessionId::new();
        drop(manager.create_connection(id));

        let result = manager.send_to_connection(id, ServerMessage::Kicked);
        assert_eq!(result.unwrap_err(), "Connection closed");
    }

    #[tokio::test]
    async fn test_send_to_many_skips_missing_sessions() {
        let manager = ConnectionManager::new();
        let first = SessionId::new();
        let second = SessionId::new();
        let mut first_rx = manager.create_connection(first);
        let mut second_rx = manager.create_connection(second);

        manager.send_to_many([first, SessionId::new(), second], &ServerMessage::CanvasCleared);

        assert!(matches!(first_rx.recv().await, Some(ServerMessage::CanvasCleared)));
        assert!(matches!(second_rx.recv().await, Some(ServerMessage::CanvasCleared)));
    }
}
