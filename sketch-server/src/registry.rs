use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use sketch_core::{Effects, Room};
use sketch_types::{RoomError, RoomId, RoomSummary, SessionId};
use std::sync::{Arc, Mutex};
use tokio::sync::{MutexGuard, watch};
use tokio::task::JoinHandle;
use tracing::info;

const ROOM_CODE_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";
pub const ROOM_CODE_LENGTH: usize = 6;

/// Everything guarded by a room's lock.
pub struct RoomSlot {
    pub room: Room,
    pub rng: StdRng,
    pub round_timer: Option<JoinHandle<()>>,
    pub pending: Option<JoinHandle<()>>,
    pub closed: bool,
}

impl RoomSlot {
    /// Cancel every task still attached to the room.
    pub fn close(&mut self) {
        self.closed = true;
        if let Some(timer) = self.round_timer.take() {
            timer.abort();
        }
        if let Some(pending) = self.pending.take() {
            pending.abort();
        }
    }
}

pub struct RoomHandle {
    pub id: RoomId,
    slot: tokio::sync::Mutex<RoomSlot>,
    summary: watch::Sender<RoomSummary>,
}

impl RoomHandle {
    fn new(room: Room, rng: StdRng) -> Self {
        let (summary, _) = watch::channel(room.summary());
        Self {
            id: room.id.clone(),
            slot: tokio::sync::Mutex::new(RoomSlot {
                room,
                rng,
                round_timer: None,
                pending: None,
                closed: false,
            }),
            summary,
        }
    }

    pub async fn lock(&self) -> MutexGuard<'_, RoomSlot> {
        self.slot.lock().await
    }

    /// Last published summary; never waits on the room lock.
    pub fn summary(&self) -> RoomSummary {
        self.summary.borrow().clone()
    }

    pub fn publish(&self, room: &Room) {
        self.summary.send_replace(room.summary());
    }
}

/// Live rooms by code and the room each session belongs to.
pub struct RoomRegistry {
    rooms: DashMap<RoomId, Arc<RoomHandle>>,
    sessions: DashMap<SessionId, RoomId>,
    rng: Mutex<StdRng>,
}

impl RoomRegistry {
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self {
            rooms: DashMap::new(),
            sessions: DashMap::new(),
            rng: Mutex::new(rng),
        }
    }

    fn with_rng<T>(&self, f: impl FnOnce(&mut StdRng) -> T) -> T {
        let mut rng = self.rng.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        f(&mut rng)
    }

    fn generate_code(&self) -> RoomId {
        self.with_rng(|rng| {
            (0..ROOM_CODE_LENGTH)
                .map(|_| ROOM_CODE_ALPHABET[rng.random_range(0..ROOM_CODE_ALPHABET.len())] as char)
                .collect()
        })
    }

    /// Allocate an unused code, build the room with it and register it.
    ///
    /// Codes are retried until one is free. Nothing is registered when `build`
    /// fails.
    pub fn create_room<F>(&self, build: F) -> Result<(Arc<RoomHandle>, Effects), RoomError>
    where
        F: FnOnce(RoomId) -> Result<(Room, Effects), RoomError>,
    {
        loop {
            let code = self.generate_code();
            match self.rooms.entry(code.clone()) {
                Entry::Occupied(_) => {
                    tracing::debug!("Room code {} already taken, retrying", code);
                }
                Entry::Vacant(vacant) => {
                    let (room, effects) = build(code)?;
                    let rng = self.with_rng(|master| StdRng::from_rng(master));
                    let handle = Arc::new(RoomHandle::new(room, rng));
                    vacant.insert(handle.clone());
                    return Ok((handle, effects));
                }
            }
        }
    }

    pub fn get_room(&self, id: &str) -> Option<Arc<RoomHandle>> {
        self.rooms.get(id).map(|entry| entry.value().clone())
    }

    pub fn remove_room(&self, id: &str) {
        if self.rooms.remove(id).is_some() {
            info!("Room {} destroyed", id);
        }
    }

    pub fn map_session(&self, session: SessionId, room_id: RoomId) {
        self.sessions.insert(session, room_id);
    }

    /// Forget a session's membership if it still points at `room_id`.
    pub fn unmap_session(&self, session: SessionId, room_id: &str) {
        self.sessions.remove_if(&session, |_, mapped| mapped == room_id);
    }

    pub fn room_id_for_session(&self, session: SessionId) -> Option<RoomId> {
        self.sessions.get(&session).map(|entry| entry.value().clone())
    }

    pub fn room_for_session(&self, session: SessionId) -> Option<Arc<RoomHandle>> {
        let room_id = self.room_id_for_session(session)?;
        self.get_room(&room_id)
    }

    /// Public rooms for browsing, built from published summaries.
    pub fn list_public(&self) -> Vec<RoomSummary> {
        let mut rooms: Vec<RoomSummary> = self
            .rooms
            .iter()
            .map(|entry| entry.value().summary())
            .filter(|summary| !summary.is_private)
            .collect();
        rooms.sort_by(|a, b| a.id.cmp(&b.id));
        rooms
    }

    pub fn room_count(&self) -> usize {
        self.rooms.len()
    }

    pub fn session_count(&self) -> usize {
        self.sessions.len()
    }
}
