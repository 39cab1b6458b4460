use std::sync::Arc;
use warp::Filter;

use crate::coordinator::GameCoordinator;
use crate::websocket::rate_limiter::RateLimiter;

pub mod config;
pub mod coordinator;
pub mod registry;
pub mod scheduler;
pub mod websocket;

pub fn create_routes(
    coordinator: Arc<GameCoordinator>,
    rate_limiter: RateLimiter,
) -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
    let coordinator_filter = warp::any().map({
        let coordinator = coordinator.clone();
        move || coordinator.clone()
    });

    let rate_limiter_filter = warp::any().map(move || rate_limiter.clone());

    // WebSocket endpoint
    let websocket = warp::path("ws")
        .and(warp::ws())
        .and(coordinator_filter.clone())
        .and(rate_limiter_filter)
        .map(|ws: warp::ws::Ws, coordinator, rate_limiter| {
            ws.on_upgrade(move |socket| websocket::handle_connection(socket, coordinator, rate_limiter))
        });

    let health = warp::path("health")
        .and(warp::get())
        .map(|| warp::reply::with_status("OK", warp::http::StatusCode::OK));

    // Public room browser
    let rooms = warp::path!("rooms")
        .and(warp::get())
        .and(coordinator_filter.clone())
        .map(|coordinator: Arc<GameCoordinator>| warp::reply::json(&coordinator.list_rooms()));

    let room = warp::path!("rooms" / String)
        .and(warp::get())
        .and(coordinator_filter)
        .map(handle_room_request);

    let cors = warp::cors()
        .allow_any_origin()
        .allow_headers(vec!["content-type"])
        .allow_methods(vec!["GET"]);

    websocket
        .or(health)
        .or(rooms)
        .or(room)
        .with(cors)
        .with(warp::log("sketch_server"))
}

fn handle_room_request(room_id: String, coordinator: Arc<GameCoordinator>) -> impl warp::Reply {
    match coordinator.room_summary(&room_id) {
        Some(summary) => warp::reply::with_status(
            warp::reply::json(&summary),
            warp::http::StatusCode::OK,
        ),
        None => warp::reply::with_status(
            warp::reply::json(&serde_json::json!({
                "error": "Room not found"
            })),
            warp::http::StatusCode::NOT_FOUND,
        ),
    }
}
