#![allow(dead_code)]

use rand::SeedableRng;
use rand::rngs::StdRng;
use sketch_core::{Effects, Recipient, Room, Scheduled, WordCatalog, WordCategory};
use sketch_types::{
    Difficulty, PlayerProfile, RoomConfig, RoomPhase, ServerMessage, SessionId, SettingsPatch,
};
use std::sync::Arc;

pub const TEST_WORD: &str = "ELEPHANT";

/// Catalog whose every pick is [`TEST_WORD`] (hard, 50 base points).
pub fn single_word_catalog() -> Arc<WordCatalog> {
    Arc::new(WordCatalog::from_categories(vec![WordCategory::new(
        "Animals",
        Difficulty::Hard,
        50,
        &[TEST_WORD],
    )]))
}

pub fn profile(name: &str) -> PlayerProfile {
    PlayerProfile {
        id: Some(format!("player-{}", name.to_lowercase())),
        name: name.to_string(),
        avatar: String::new(),
    }
}

pub fn test_rng() -> StdRng {
    StdRng::seed_from_u64(1234)
}

/// A room plus the sessions of its players, in join order.
pub struct TestRoom {
    pub room: Room,
    pub sessions: Vec<SessionId>,
    pub rng: StdRng,
}

impl TestRoom {
    pub fn session(&self, index: usize) -> SessionId {
        self.sessions[index]
    }

    pub fn start(&mut self) -> Effects {
        let host = self.sessions[0];
        self.room
            .start_game(host, &mut self.rng)
            .expect("host should be able to start")
    }

    pub fn tick(&mut self) -> Effects {
        let generation = self.room.generation();
        self.room.tick(generation, &mut self.rng)
    }

    pub fn run(&mut self, task: Scheduled) -> Effects {
        self.room.run_scheduled(task, &mut self.rng)
    }

    pub fn guess(&mut self, index: usize, text: &str) -> Effects {
        let session = self.sessions[index];
        self.room.chat(session, text).expect("player is in the room")
    }
}

pub fn create_room(names: &[&str], settings: SettingsPatch) -> TestRoom {
    let catalog = single_word_catalog();
    let host_session = SessionId::new();
    let config = RoomConfig {
        name: Some("Test Room".to_string()),
        settings,
        ..RoomConfig::default()
    };
    let (mut room, _) = Room::create(
        "ROOM01".to_string(),
        config,
        profile(names[0]),
        host_session,
        catalog,
    )
    .expect("room settings are valid");

    let mut sessions = vec![host_session];
    for name in &names[1..] {
        let session = SessionId::new();
        room.join(profile(name), session, None)
            .expect("room has space");
        sessions.push(session);
    }

    TestRoom {
        room,
        sessions,
        rng: test_rng(),
    }
}

pub fn create_default_room(names: &[&str]) -> TestRoom {
    create_room(names, SettingsPatch::default())
}

/// Exactly one drawer while drawing, none otherwise.
pub fn assert_drawer_invariant(room: &Room) {
    let drawing = room.players.iter().filter(|p| p.is_drawing).count();
    match room.phase {
        RoomPhase::Drawing => assert_eq!(drawing, 1, "expected exactly one drawer"),
        phase => assert_eq!(drawing, 0, "expected no drawer in {:?}", phase),
    }
}

pub fn has_message(effects: &Effects, check: impl Fn(&ServerMessage) -> bool) -> bool {
    effects.messages().any(check)
}

pub fn messages_to(effects: &Effects, recipient: Recipient) -> Vec<&ServerMessage> {
    effects
        .outbound
        .iter()
        .filter(|outbound| outbound.to == recipient)
        .map(|outbound| &outbound.message)
        .collect()
}

pub fn word_to_draw(effects: &Effects) -> Option<(Recipient, String)> {
    effects.outbound.iter().find_map(|outbound| match &outbound.message {
        ServerMessage::WordToDraw { word } => Some((outbound.to, word.clone())),
        _ => None,
    })
}
