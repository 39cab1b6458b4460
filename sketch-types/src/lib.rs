pub mod errors;
pub mod game;
pub mod messages;
pub mod player;

// Re-export all types
pub use errors::*;
pub use game::*;
pub use messages::*;
pub use player::*;

/// Six-character room code, also the broadcast channel key.
pub type RoomId = String;

/// Stable logical player identity, kept across reconnects.
pub type PlayerId = String;
