pub mod game_events;
pub mod guess;
pub mod hints;
pub mod room;
pub mod scoring;
pub mod settings;
pub mod word_catalog;

// Re-export main components
pub use game_events::*;
pub use guess::*;
pub use hints::*;
pub use room::*;
pub use scoring::*;
pub use word_catalog::*;
