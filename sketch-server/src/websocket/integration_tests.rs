use futures_util::StreamExt;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;
use warp::test::{WsClient, ws};

use super::connection::ConnectionManager;
use super::rate_limiter::RateLimiter;
use crate::config::Config;
use crate::coordinator::GameCoordinator;
use crate::create_routes;
use sketch_core::WordCatalog;
use sketch_types::{ClientMessage, PlayerProfile, RoomConfig, RoomSummary, ServerMessage};

fn test_coordinator() -> Arc<GameCoordinator> {
    let config = Config {
        rng_seed: Some(42),
        ..Config::defaults()
    };
    GameCoordinator::new(
        config,
        Arc::new(ConnectionManager::new()),
        Arc::new(WordCatalog::builtin()),
    )
}

fn routes(
    coordinator: Arc<GameCoordinator>,
) -> impl warp::Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
    create_routes(coordinator, RateLimiter::default())
}

async fn connect(coordinator: &Arc<GameCoordinator>) -> WsClient {
    ws().path("/ws")
        .handshake(routes(coordinator.clone()))
        .await
        .expect("WebSocket handshake failed")
}

async fn send(client: &mut WsClient, message: &ClientMessage) {
    client
        .send(warp::ws::Message::text(serde_json::to_string(message).unwrap()))
        .await;
}

async fn receive(client: &mut WsClient) -> ServerMessage {
    let msg = timeout(Duration::from_secs(1), client.next())
        .await
        .expect("Timeout waiting for message")
        .expect("WebSocket closed")
        .expect("WebSocket error");
    serde_json::from_str(msg.to_str().expect("text frame")).expect("valid server message")
}

fn profile(id: &str, name: &str) -> PlayerProfile {
    PlayerProfile {
        id: Some(id.to_string()),
        name: name.to_string(),
        avatar: String::new(),
    }
}

#[tokio::test]
async fn test_create_and_join_over_websocket() {
    let coordinator = test_coordinator();
    let mut host = connect(&coordinator).await;
    let mut guest = connect(&coordinator).await;

    send(
        &mut host,
        &ClientMessage::CreateRoom {
            room_data: RoomConfig::default(),
            player: profile("p1", "Alice"),
        },
    )
    .await;

    let room_id = match receive(&mut host).await {
        ServerMessage::RoomCreated { room_id, room } => {
            assert_eq!(room.players.len(), 1);
            assert_eq!(room.host_id.as_deref(), Some("p1"));
            room_id
        }
        other => panic!("Expected RoomCreated, got {:?}", other),
    };

    send(
        &mut guest,
        &ClientMessage::JoinRoom {
            room_id: room_id.to_lowercase(),
            player: profile("p2", "Bob"),
            password: None,
        },
    )
    .await;

    match receive(&mut guest).await {
        ServerMessage::RoomJoined { room } => assert_eq!(room.players.len(), 2),
        other => panic!("Expected RoomJoined, got {:?}", other),
    }
    match receive(&mut host).await {
        ServerMessage::PlayerJoined { player, players } => {
            assert_eq!(player.name, "Bob");
            assert_eq!(players.len(), 2);
        }
        other => panic!("Expected PlayerJoined, got {:?}", other),
    }
}

#[tokio::test]
async fn test_invalid_json_gets_error_and_connection_survives() {
    let coordinator = test_coordinator();
    let mut client = connect(&coordinator).await;

    client.send(warp::ws::Message::text("not json")).await;
    assert!(matches!(receive(&mut client).await, ServerMessage::Error { .. }));

    send(
        &mut client,
        &ClientMessage::CreateRoom {
            room_data: RoomConfig::default(),
            player: profile("p1", "Alice"),
        },
    )
    .await;
    assert!(matches!(receive(&mut client).await, ServerMessage::RoomCreated { .. }));
}

#[tokio::test]
async fn test_join_unknown_room_reports_error() {
    let coordinator = test_coordinator();
    let mut client = connect(&coordinator).await;

    send(
        &mut client,
        &ClientMessage::JoinRoom {
            room_id: "ZZZZZZ".to_string(),
            player: profile("p1", "Alice"),
            password: None,
        },
    )
    .await;

    match receive(&mut client).await {
        ServerMessage::Error { message } => assert_eq!(message, "Room not found"),
        other => panic!("Expected Error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_health_endpoint() {
    let coordinator = test_coordinator();
    let response = warp::test::request()
        .method("GET")
        .path("/health")
        .reply(&routes(coordinator))
        .await;

    assert_eq!(response.status(), 200);
    assert_eq!(response.body(), "OK");
}

#[tokio::test]
async fn test_room_endpoints() {
    let coordinator = test_coordinator();
    let mut host = connect(&coordinator).await;
    send(
        &mut host,
        &ClientMessage::CreateRoom {
            room_data: RoomConfig {
                name: Some("Doodles".to_string()),
                ..RoomConfig::default()
            },
            player: profile("p1", "Alice"),
        },
    )
    .await;
    let room_id = match receive(&mut host).await {
        ServerMessage::RoomCreated { room_id, .. } => room_id,
        other => panic!("Expected RoomCreated, got {:?}", other),
    };

    let response = warp::test::request()
        .method("GET")
        .path("/rooms")
        .reply(&routes(coordinator.clone()))
        .await;
    assert_eq!(response.status(), 200);
    let rooms: Vec<RoomSummary> = serde_json::from_slice(response.body()).unwrap();
    assert_eq!(rooms.len(), 1);
    assert_eq!(rooms[0].name, "Doodles");
    assert_eq!(rooms[0].player_count, 1);

    let response = warp::test::request()
        .method("GET")
        .path(&format!("/rooms/{}", room_id))
        .reply(&routes(coordinator.clone()))
        .await;
    assert_eq!(response.status(), 200);

    let response = warp::test::request()
        .method("GET")
        .path("/rooms/NOPE00")
        .reply(&routes(coordinator))
        .await;
    assert_eq!(response.status(), 404);
}
