use sketch_core::{Effects, Recipient, Room, Scheduled, TimerCommand, WordCatalog};
use sketch_types::{
    DrawingEvent, PlayerProfile, RoomConfig, RoomError, RoomId, RoomSummary, RoomUpdate,
    ServerMessage, SessionId,
};
use std::sync::{Arc, Weak};
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::registry::{RoomHandle, RoomRegistry, RoomSlot};
use crate::scheduler::RoundScheduler;
use crate::websocket::ConnectionManager;

/// Routes client actions to rooms and carries out the effects they return.
///
/// Every room operation runs under that room's lock; dispatch, timer changes
/// and room teardown happen before the lock is released.
pub struct GameCoordinator {
    me: Weak<GameCoordinator>,
    registry: RoomRegistry,
    connections: Arc<ConnectionManager>,
    scheduler: RoundScheduler,
    catalog: Arc<WordCatalog>,
    config: Config,
}

impl GameCoordinator {
    pub fn new(
        config: Config,
        connections: Arc<ConnectionManager>,
        catalog: Arc<WordCatalog>,
    ) -> Arc<Self> {
        Arc::new_cyclic(|me| Self {
            me: me.clone(),
            registry: RoomRegistry::new(config.rng_seed),
            connections,
            scheduler: RoundScheduler::new(&config),
            catalog,
            config,
        })
    }

    pub fn connections(&self) -> &Arc<ConnectionManager> {
        &self.connections
    }

    pub fn registry(&self) -> &RoomRegistry {
        &self.registry
    }

    pub async fn create_room(
        &self,
        session: SessionId,
        mut config: RoomConfig,
        player: PlayerProfile,
    ) -> Result<RoomId, RoomError> {
        if self.registry.room_id_for_session(session).is_some() {
            return Err(RoomError::AlreadyInRoom);
        }
        if config.settings.max_players.is_none() {
            config.settings.max_players = Some(
                self.config
                    .max_players_per_room
                    .min(sketch_core::settings::MAX_ROOM_CAPACITY),
            );
        }

        let catalog = self.catalog.clone();
        let (handle, effects) = self
            .registry
            .create_room(|id| Room::create(id, config, player, session, catalog))?;
        self.registry.map_session(session, handle.id.clone());

        let mut slot = handle.lock().await;
        self.apply(&handle, &mut slot, effects);
        Ok(handle.id.clone())
    }

    pub async fn join_room(
        &self,
        session: SessionId,
        room_id: &str,
        player: PlayerProfile,
        password: Option<String>,
    ) -> Result<(), RoomError> {
        if self.registry.room_id_for_session(session).is_some() {
            return Err(RoomError::AlreadyInRoom);
        }
        let room_id = room_id.trim().to_uppercase();
        let handle = self
            .registry
            .get_room(&room_id)
            .ok_or(RoomError::RoomNotFound)?;

        let mut slot = handle.lock().await;
        if slot.closed {
            return Err(RoomError::RoomNotFound);
        }
        // A seat is only taken over once its previous transport has gone away.
        let live_seat = player
            .id
            .as_deref()
            .and_then(|id| slot.room.session_of_player(id))
            .is_some_and(|previous| self.connections.is_connected(previous));
        if live_seat {
            warn!(
                "Session {} tried to join room {} as a player who is still connected",
                session, handle.id
            );
            return Err(RoomError::AlreadyInRoom);
        }
        let effects = slot.room.join(player, session, password.as_deref())?;
        self.registry.map_session(session, handle.id.clone());
        self.apply(&handle, &mut slot, effects);
        Ok(())
    }

    pub async fn start_game(&self, session: SessionId) -> Result<(), RoomError> {
        self.with_room(session, |slot| {
            let RoomSlot { room, rng, .. } = slot;
            room.start_game(session, rng)
        })
        .await
    }

    pub async fn drawing_event(
        &self,
        session: SessionId,
        event: DrawingEvent,
    ) -> Result<(), RoomError> {
        self.with_room(session, |slot| Ok(slot.room.drawing_event(session, event)))
            .await
    }

    pub async fn clear_canvas(&self, session: SessionId) -> Result<(), RoomError> {
        self.with_room(session, |slot| Ok(slot.room.clear_canvas(session)))
            .await
    }

    pub async fn chat(&self, session: SessionId, message: &str) -> Result<(), RoomError> {
        self.with_room(session, |slot| slot.room.chat(session, message))
            .await
    }

    pub async fn kick(&self, session: SessionId, player_id: &str) -> Result<(), RoomError> {
        self.with_room(session, |slot| slot.room.kick(session, player_id))
            .await
    }

    pub async fn update_room(&self, session: SessionId, update: RoomUpdate) -> Result<(), RoomError> {
        self.with_room(session, |slot| slot.room.update(session, update))
            .await
    }

    pub async fn leave_room(&self, session: SessionId) -> Result<(), RoomError> {
        self.with_room(session, |slot| slot.room.leave(session))
            .await
    }

    /// Transport-level disconnect. Never fails; a session outside any room is
    /// simply forgotten.
    pub async fn disconnect(&self, session: SessionId) {
        let Some(room_id) = self.registry.room_id_for_session(session) else {
            return;
        };
        if let Some(handle) = self.registry.get_room(&room_id) {
            let mut slot = handle.lock().await;
            if !slot.closed {
                let effects = slot.room.remove_session(session);
                self.apply(&handle, &mut slot, effects);
            }
        }
        self.registry.unmap_session(session, &room_id);
        debug!("Session {} disconnected from room {}", session, room_id);
    }

    /// One round-timer tick. Returns whether the ticker should keep running.
    pub async fn tick_round(&self, handle: &Arc<RoomHandle>, generation: u64) -> bool {
        let mut slot = handle.lock().await;
        if slot.closed {
            return false;
        }
        let RoomSlot { room, rng, .. } = &mut *slot;
        let effects = room.tick(generation, rng);
        if effects.is_empty() {
            return false;
        }

        let finished = effects.stops_timer();
        if finished {
            // The calling task is this timer; detach it instead of aborting it.
            slot.round_timer.take();
        }
        self.apply(handle, &mut slot, effects);
        !finished
    }

    pub async fn run_scheduled(&self, handle: &Arc<RoomHandle>, task: Scheduled) {
        let mut slot = handle.lock().await;
        if slot.closed || slot.room.generation() != task.generation() {
            return;
        }
        slot.pending.take();
        let RoomSlot { room, rng, .. } = &mut *slot;
        let effects = room.run_scheduled(task, rng);
        self.apply(handle, &mut slot, effects);
    }

    pub fn list_rooms(&self) -> Vec<RoomSummary> {
        self.registry.list_public()
    }

    pub fn room_summary(&self, room_id: &str) -> Option<RoomSummary> {
        self.registry
            .get_room(&room_id.trim().to_uppercase())
            .map(|handle| handle.summary())
    }

    async fn with_room<F>(&self, session: SessionId, op: F) -> Result<(), RoomError>
    where
        F: FnOnce(&mut RoomSlot) -> Result<Effects, RoomError>,
    {
        let handle = self
            .registry
            .room_for_session(session)
            .ok_or(RoomError::NotInRoom)?;
        let mut slot = handle.lock().await;
        if slot.closed {
            return Err(RoomError::NotInRoom);
        }
        let effects = op(&mut *slot)?;
        self.apply(&handle, &mut slot, effects);
        Ok(())
    }

    fn apply(&self, handle: &Arc<RoomHandle>, slot: &mut RoomSlot, effects: Effects) {
        let Effects {
            outbound,
            timer,
            scheduled,
            released,
        } = effects;

        for session in released {
            self.registry.unmap_session(session, &handle.id);
        }

        for message in outbound {
            self.dispatch(&slot.room, message.to, &message.message);
        }

        match timer {
            Some(TimerCommand::Start { generation }) => {
                if let Some(old) = slot.round_timer.take() {
                    old.abort();
                }
                slot.round_timer = Some(self.scheduler.spawn_round_timer(
                    self.me.clone(),
                    Arc::downgrade(handle),
                    generation,
                ));
            }
            Some(TimerCommand::Stop) => {
                if let Some(old) = slot.round_timer.take() {
                    old.abort();
                }
            }
            None => {}
        }

        if let Some(task) = scheduled {
            if let Some(old) = slot.pending.take() {
                old.abort();
            }
            slot.pending = Some(self.scheduler.spawn_delayed(
                self.me.clone(),
                Arc::downgrade(handle),
                task,
            ));
        }

        if slot.room.is_empty() {
            slot.close();
            self.registry.remove_room(&handle.id);
            info!("Room {} closed after the last player left", handle.id);
        }

        handle.publish(&slot.room);
    }

    fn dispatch(&self, room: &Room, to: Recipient, message: &ServerMessage) {
        match to {
            Recipient::Room => {
                self.connections
                    .send_to_many(room.players.iter().map(|p| p.session_id), message);
            }
            Recipient::RoomExcept(excluded) => {
                self.connections.send_to_many(
                    room.players
                        .iter()
                        .map(|p| p.session_id)
                        .filter(|session| *session != excluded),
                    message,
                );
            }
            Recipient::Session(session) => {
                if let Err(e) = self.connections.send_to_connection(session, message.clone()) {
                    debug!("Dropping message for {}: {}", session, e);
                }
            }
        }
    }
}
