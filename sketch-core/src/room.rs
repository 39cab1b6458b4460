use rand::Rng;
use sketch_types::{
    ChatKind, ChatMessage, CorrectGuesser, Difficulty, DrawingEvent, FinalScore, LeaderboardEntry,
    Player, PlayerId, PlayerProfile, RoomConfig, RoomError, RoomId, RoomPhase, RoomSnapshot,
    RoomSummary, RoomUpdate, ServerMessage, SessionId, GameSettings,
};
use std::sync::Arc;
use tracing::{debug, info};
use uuid::Uuid;

use crate::{
    Effects, GuessMatcher, HintRevealer, Scheduled, ScoringEngine, TimerCommand, WordCatalog,
    settings::{self, MIN_PLAYERS_TO_START},
};

enum Departure {
    Left,
    Kicked,
}

/// One game session: membership, phase and the current round.
///
/// Every mutating operation returns [`Effects`] describing the messages to
/// send and the timers to start or stop. The room itself performs no I/O.
#[derive(Debug)]
pub struct Room {
    pub id: RoomId,
    pub name: String,
    /// Join order. The player at index 0 is the host.
    pub players: Vec<Player>,
    pub phase: RoomPhase,
    pub round: u32,
    pub current_drawer_id: Option<PlayerId>,
    current_word: Option<String>,
    pub current_category: Option<String>,
    pub current_difficulty: Option<Difficulty>,
    base_points: u32,
    pub time_left: u32,
    pub total_time: u32,
    pub hint_revealed: Vec<bool>,
    pub drawing_data: Vec<DrawingEvent>,
    pub is_private: bool,
    password_hash: Option<String>,
    pub settings: GameSettings,
    generation: u64,
    next_drawer: usize,
    used_words: Vec<String>,
    catalog: Arc<WordCatalog>,
}

impl Room {
    /// Build a room with the creator as host and report it back to them.
    pub fn create(
        id: RoomId,
        config: RoomConfig,
        creator: PlayerProfile,
        session: SessionId,
        catalog: Arc<WordCatalog>,
    ) -> Result<(Self, Effects), RoomError> {
        let settings = settings::resolve_settings(&config.settings)?;
        let password_hash = if config.is_private {
            match config.password.as_deref().map(str::trim) {
                Some(password) if !password.is_empty() => Some(settings::hash_password(password)),
                _ => return Err(RoomError::invalid_config("private rooms need a password")),
            }
        } else {
            None
        };

        let host = Player::new(creator, session);
        let name = match config.name.as_deref().map(str::trim) {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => format!("{}'s Room", host.name),
        };

        let room = Self {
            id,
            name,
            players: vec![host],
            phase: RoomPhase::Waiting,
            round: 0,
            current_drawer_id: None,
            current_word: None,
            current_category: None,
            current_difficulty: None,
            base_points: 0,
            time_left: 0,
            total_time: settings.round_time,
            hint_revealed: Vec::new(),
            drawing_data: Vec::new(),
            is_private: config.is_private,
            password_hash,
            settings,
            generation: 0,
            next_drawer: 0,
            used_words: Vec::new(),
            catalog,
        };

        info!("Room {} created by {}", room.id, room.players[0].name);

        let mut effects = Effects::new();
        effects.to_session(
            session,
            ServerMessage::RoomCreated {
                room_id: room.id.clone(),
                room: room.snapshot(),
            },
        );
        Ok((room, effects))
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn current_word(&self) -> Option<&str> {
        self.current_word.as_deref()
    }

    pub fn host(&self) -> Option<&Player> {
        self.players.first()
    }

    pub fn is_host(&self, session: SessionId) -> bool {
        self.host().is_some_and(|host| host.session_id == session)
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    pub fn player_by_session(&self, session: SessionId) -> Option<&Player> {
        self.players.iter().find(|p| p.session_id == session)
    }

    /// Transport session currently bound to the player with this id.
    pub fn session_of_player(&self, player_id: &str) -> Option<SessionId> {
        self.players
            .iter()
            .find(|p| p.id == player_id)
            .map(|p| p.session_id)
    }

    pub fn drawer(&self) -> Option<&Player> {
        self.players.iter().find(|p| p.is_drawing)
    }

    fn index_of_session(&self, session: SessionId) -> Option<usize> {
        self.players.iter().position(|p| p.session_id == session)
    }

    pub fn join(
        &mut self,
        profile: PlayerProfile,
        session: SessionId,
        password: Option<&str>,
    ) -> Result<Effects, RoomError> {
        if let Some(hash) = &self.password_hash {
            if !settings::verify_password(hash, password) {
                return Err(RoomError::InvalidPassword);
            }
        }

        if let Some(id) = &profile.id {
            if let Some(index) = self.players.iter().position(|p| &p.id == id) {
                return Ok(self.reconnect(index, session));
            }
        }

        if self.players.len() >= settings::capacity(&self.settings) {
            return Err(RoomError::RoomFull);
        }

        let player = Player::new(profile, session);
        info!("Player {} joined room {}", player.name, self.id);
        self.players.push(player.clone());

        let mut effects = Effects::new();
        effects.to_session(
            session,
            ServerMessage::RoomJoined {
                room: self.snapshot(),
            },
        );
        effects.to_room_except(
            session,
            ServerMessage::PlayerJoined {
                player: player.clone(),
                players: self.players.clone(),
            },
        );
        effects.to_room(system_message(format!("{} joined the room", player.name)));
        Ok(effects)
    }

    fn reconnect(&mut self, index: usize, session: SessionId) -> Effects {
        let mut effects = Effects::new();
        let previous = std::mem::replace(&mut self.players[index].session_id, session);
        if previous != session {
            effects.released.push(previous);
        }

        let player = &self.players[index];
        info!("Player {} reconnected to room {}", player.name, self.id);
        let player_id = player.id.clone();
        let is_drawing = player.is_drawing;

        effects.to_session(
            session,
            ServerMessage::RoomJoined {
                room: self.snapshot(),
            },
        );
        if is_drawing && self.phase == RoomPhase::Drawing {
            if let Some(word) = &self.current_word {
                effects.to_session(session, ServerMessage::WordToDraw { word: word.clone() });
            }
        }
        effects.to_room_except(session, ServerMessage::PlayerReconnected { player_id });
        effects
    }

    pub fn start_game<R: Rng + ?Sized>(
        &mut self,
        session: SessionId,
        rng: &mut R,
    ) -> Result<Effects, RoomError> {
        if self.player_by_session(session).is_none() {
            return Err(RoomError::NotInRoom);
        }
        if !self.is_host(session) {
            return Err(RoomError::NotHost);
        }
        if self.phase != RoomPhase::Waiting {
            return Err(RoomError::GameInProgress);
        }
        if self.players.len() < MIN_PLAYERS_TO_START {
            return Err(RoomError::NotEnoughPlayers);
        }

        info!("Game started in room {}", self.id);
        self.round = 0;
        self.next_drawer = 0;
        self.used_words.clear();

        let round = self.start_round(rng);
        let mut effects = Effects::new();
        effects.to_room(ServerMessage::GameStarted {
            room: self.snapshot(),
        });
        effects.merge(round);
        Ok(effects)
    }

    fn start_round<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Effects {
        if self.round >= self.settings.max_rounds {
            return self.game_over();
        }
        if self.players.is_empty() {
            return self.reset();
        }

        self.generation += 1;
        self.round += 1;
        self.phase = RoomPhase::Drawing;
        self.drawing_data.clear();
        for player in &mut self.players {
            player.reset_round();
        }

        let drawer_index = self.next_drawer % self.players.len();
        self.next_drawer = drawer_index + 1;
        self.players[drawer_index].is_drawing = true;
        let drawer = self.players[drawer_index].clone();
        self.current_drawer_id = Some(drawer.id.clone());

        let selection = self
            .catalog
            .select_word(&self.settings, &self.used_words, rng);
        self.used_words.push(selection.word.clone());
        self.current_category = Some(selection.category.clone());
        self.current_difficulty = Some(selection.difficulty);
        self.base_points = selection.base_points;
        self.time_left = self.settings.round_time;
        self.total_time = self.settings.round_time;
        self.hint_revealed = HintRevealer::reveal(
            &selection.word,
            &self.settings.hint_timings,
            0,
            self.total_time,
            &HintRevealer::initial_mask(&selection.word),
            rng,
        );
        let masked_word = HintRevealer::masked_word(&selection.word, &self.hint_revealed);
        self.current_word = Some(selection.word.clone());

        info!(
            "Round {}/{} started in room {}, {} is drawing",
            self.round, self.settings.max_rounds, self.id, drawer.name
        );

        let mut effects = Effects::new();
        effects.to_room(ServerMessage::RoundStarted {
            round: self.round,
            max_rounds: self.settings.max_rounds,
            drawer: drawer.name,
            drawer_id: drawer.id,
            category: selection.category,
            difficulty: selection.difficulty,
            time_left: self.time_left,
            masked_word,
        });
        effects.to_session(
            drawer.session_id,
            ServerMessage::WordToDraw {
                word: selection.word,
            },
        );
        effects.timer = Some(TimerCommand::Start {
            generation: self.generation,
        });
        effects
    }

    /// One countdown second. Ticks from an earlier round are ignored.
    pub fn tick<R: Rng + ?Sized>(&mut self, generation: u64, rng: &mut R) -> Effects {
        if self.phase != RoomPhase::Drawing || generation != self.generation {
            return Effects::new();
        }
        let Some(word) = self.current_word.clone() else {
            return Effects::new();
        };

        let mut effects = Effects::new();
        self.time_left = self.time_left.saturating_sub(1);

        let elapsed = self.total_time.saturating_sub(self.time_left);
        let mask = HintRevealer::reveal(
            &word,
            &self.settings.hint_timings,
            elapsed,
            self.total_time,
            &self.hint_revealed,
            rng,
        );
        if mask != self.hint_revealed {
            self.hint_revealed = mask;
            effects.to_room(ServerMessage::HintRevealed {
                hints: self.hint_revealed.clone(),
                masked_word: HintRevealer::masked_word(&word, &self.hint_revealed),
            });
        }

        effects.to_room(ServerMessage::TimeUpdate {
            time_left: self.time_left,
        });

        if self.time_left == 0 {
            debug!("Round {} timed out in room {}", self.round, self.id);
            effects.merge(self.end_round());
        }
        effects
    }

    pub fn end_round(&mut self) -> Effects {
        let drawer_name = self.drawer().map(|p| p.name.clone());
        self.end_round_with(drawer_name)
    }

    fn end_round_with(&mut self, drawer_name: Option<String>) -> Effects {
        if self.phase != RoomPhase::Drawing {
            return Effects::new();
        }

        self.generation += 1;
        self.phase = RoomPhase::Results;
        for player in &mut self.players {
            player.is_drawing = false;
        }

        let correct_guessers = self
            .players
            .iter()
            .filter(|p| p.has_guessed_correctly)
            .map(|p| CorrectGuesser {
                player_id: p.id.clone(),
                name: p.name.clone(),
                score: p.round_score,
            })
            .collect();

        let leaderboard = self
            .ranked_players()
            .into_iter()
            .enumerate()
            .map(|(i, p)| LeaderboardEntry {
                rank: i as u32 + 1,
                player_id: p.id.clone(),
                name: p.name.clone(),
                score: p.score,
                round_score: p.round_score,
            })
            .collect();

        info!("Round {} ended in room {}", self.round, self.id);

        let mut effects = Effects::new();
        effects.to_room(ServerMessage::RoundEnded {
            word: self.current_word.clone().unwrap_or_default(),
            category: self.current_category.clone().unwrap_or_default(),
            difficulty: self.current_difficulty.unwrap_or(Difficulty::Medium),
            drawer: drawer_name,
            correct_guessers,
            leaderboard,
        });
        effects.timer = Some(TimerCommand::Stop);
        effects.scheduled = Some(if self.round >= self.settings.max_rounds {
            Scheduled::GameOver {
                generation: self.generation,
            }
        } else {
            Scheduled::NextRound {
                generation: self.generation,
            }
        });
        effects
    }

    /// Run a delayed step if it still belongs to the current phase.
    pub fn run_scheduled<R: Rng + ?Sized>(&mut self, task: Scheduled, rng: &mut R) -> Effects {
        if task.generation() != self.generation {
            debug!("Dropping stale {:?} for room {}", task, self.id);
            return Effects::new();
        }

        match task {
            Scheduled::NextRound { .. } if self.phase == RoomPhase::Results => {
                if self.players.len() >= MIN_PLAYERS_TO_START {
                    self.start_round(rng)
                } else {
                    info!("Not enough players to continue in room {}", self.id);
                    self.reset()
                }
            }
            Scheduled::GameOver { .. } if self.phase == RoomPhase::Results => self.game_over(),
            Scheduled::Reset { .. } if self.phase == RoomPhase::GameOver => self.reset(),
            _ => Effects::new(),
        }
    }

    fn game_over(&mut self) -> Effects {
        self.generation += 1;
        self.phase = RoomPhase::GameOver;
        for player in &mut self.players {
            player.is_drawing = false;
        }

        let mut winner: Option<&Player> = None;
        for player in &self.players {
            if winner.is_none_or(|best| player.score > best.score) {
                winner = Some(player);
            }
        }
        let winner_name = winner.map(|p| p.name.clone());
        let winner_id = winner.map(|p| p.id.clone());

        let final_scores = self
            .ranked_players()
            .into_iter()
            .enumerate()
            .map(|(i, p)| FinalScore {
                rank: i as u32 + 1,
                player_id: p.id.clone(),
                name: p.name.clone(),
                total_score: p.score,
                accuracy: p.accuracy(),
                correct_guesses: p.correct_guesses,
                total_guesses: p.guess_count,
            })
            .collect();

        info!(
            "Game over in room {}, winner: {}",
            self.id,
            winner_name.as_deref().unwrap_or("nobody")
        );

        let mut effects = Effects::new();
        effects.to_room(ServerMessage::GameOver {
            winner: winner_name,
            winner_id,
            final_scores,
        });
        effects.timer = Some(TimerCommand::Stop);
        effects.scheduled = Some(Scheduled::Reset {
            generation: self.generation,
        });
        effects
    }

    fn reset(&mut self) -> Effects {
        self.generation += 1;
        self.phase = RoomPhase::Waiting;
        self.round = 0;
        self.current_drawer_id = None;
        self.current_word = None;
        self.current_category = None;
        self.current_difficulty = None;
        self.base_points = 0;
        self.time_left = 0;
        self.hint_revealed.clear();
        self.drawing_data.clear();
        self.used_words.clear();
        self.next_drawer = 0;
        for player in &mut self.players {
            player.reset_game();
        }

        info!("Room {} reset to waiting", self.id);

        let mut effects = Effects::new();
        effects.to_room(ServerMessage::RoomReset {
            room: self.snapshot(),
        });
        effects.timer = Some(TimerCommand::Stop);
        effects
    }

    /// Record and relay a stroke. Anyone but the current drawer is ignored.
    pub fn drawing_event(&mut self, session: SessionId, event: DrawingEvent) -> Effects {
        let is_drawer = self.phase == RoomPhase::Drawing
            && self.player_by_session(session).is_some_and(|p| p.is_drawing);
        if !is_drawer {
            debug!("Ignoring drawing event from non-drawer in room {}", self.id);
            return Effects::new();
        }

        self.drawing_data.push(event.clone());
        let mut effects = Effects::new();
        effects.to_room_except(session, ServerMessage::DrawingEvent(event));
        effects
    }

    pub fn clear_canvas(&mut self, session: SessionId) -> Effects {
        if !self.player_by_session(session).is_some_and(|p| p.is_drawing) {
            debug!("Ignoring canvas clear from non-drawer in room {}", self.id);
            return Effects::new();
        }

        self.drawing_data.clear();
        let mut effects = Effects::new();
        effects.to_room(ServerMessage::CanvasCleared);
        effects
    }

    /// Relay chat, treating it as a guess when the sender is still guessing.
    pub fn chat(&mut self, session: SessionId, text: &str) -> Result<Effects, RoomError> {
        let index = self
            .index_of_session(session)
            .ok_or(RoomError::NotInRoom)?;
        let text = text.trim();
        if text.is_empty() {
            return Ok(Effects::new());
        }

        let player = &self.players[index];
        let is_guess =
            self.phase == RoomPhase::Drawing && !player.is_drawing && !player.has_guessed_correctly;

        let mut effects = Effects::new();
        let mut is_correct = false;
        let mut similarity = 0;
        let mut round_over = false;

        if let (true, Some(word)) = (is_guess, self.current_word.clone()) {
            let check = GuessMatcher::check(text, &word);
            is_correct = check.is_correct;
            similarity = check.similarity;
            self.players[index].guess_count += 1;

            if check.is_correct {
                effects.merge(self.award_correct_guess(index, &word));
                round_over = self.all_guessers_done();
            } else if check.is_close() {
                effects.to_room(ServerMessage::CloseGuess {
                    player: self.players[index].name.clone(),
                    guess: text.to_string(),
                    similarity,
                });
            }
        }

        let player = &self.players[index];
        effects.to_room(ServerMessage::ChatMessage(ChatMessage {
            id: Uuid::new_v4().to_string(),
            player: player.name.clone(),
            player_id: Some(player.id.clone()),
            message: if is_correct {
                "Guessed the word!".to_string()
            } else {
                text.to_string()
            },
            kind: if is_guess { ChatKind::Guess } else { ChatKind::Chat },
            is_correct,
            similarity,
            timestamp: chrono::Utc::now().to_rfc3339(),
        }));

        if round_over {
            debug!("Every guesser found the word in room {}", self.id);
            effects.merge(self.end_round());
        }
        Ok(effects)
    }

    fn award_correct_guess(&mut self, index: usize, word: &str) -> Effects {
        let difficulty = self.current_difficulty.unwrap_or(Difficulty::Medium);
        let points = ScoringEngine::score(
            self.time_left,
            self.total_time,
            self.base_points,
            difficulty,
            false,
        );
        let drawer_points = ScoringEngine::score(
            self.time_left,
            self.total_time,
            self.base_points,
            difficulty,
            true,
        );

        let guesser = &mut self.players[index];
        guesser.has_guessed_correctly = true;
        guesser.correct_guesses += 1;
        guesser.score += points;
        guesser.round_score += points;
        let name = guesser.name.clone();
        let player_id = guesser.id.clone();

        if let Some(drawer) = self.players.iter_mut().find(|p| p.is_drawing) {
            drawer.score += drawer_points;
            drawer.round_score += drawer_points;
        }

        info!("{} guessed the word in room {} for {} points", name, self.id, points);

        let mut effects = Effects::new();
        effects.to_room(ServerMessage::CorrectGuess {
            player: name,
            player_id,
            word: word.to_string(),
            points,
            category: self.current_category.clone().unwrap_or_default(),
        });
        effects
    }

    /// True once no player besides the drawer is still guessing.
    fn all_guessers_done(&self) -> bool {
        self.players
            .iter()
            .filter(|p| !p.is_drawing)
            .all(|p| p.has_guessed_correctly)
    }

    pub fn kick(&mut self, session: SessionId, target_id: &str) -> Result<Effects, RoomError> {
        if self.player_by_session(session).is_none() {
            return Err(RoomError::NotInRoom);
        }
        if !self.is_host(session) {
            return Err(RoomError::NotHost);
        }
        let index = self
            .players
            .iter()
            .position(|p| p.id == target_id)
            .ok_or(RoomError::PlayerNotFound)?;
        if self.players[index].session_id == session {
            return Err(RoomError::CannotKickSelf);
        }

        let mut effects = Effects::new();
        effects.to_session(self.players[index].session_id, ServerMessage::Kicked);
        effects.merge(self.remove_at(index, Departure::Kicked));
        Ok(effects)
    }

    /// Voluntary leave; the leaver is told and the rest of the room is updated.
    pub fn leave(&mut self, session: SessionId) -> Result<Effects, RoomError> {
        let index = self
            .index_of_session(session)
            .ok_or(RoomError::NotInRoom)?;
        let mut effects = self.remove_at(index, Departure::Left);
        effects.to_session(session, ServerMessage::LeftRoom);
        Ok(effects)
    }

    /// Transport disconnect.
    pub fn remove_session(&mut self, session: SessionId) -> Effects {
        match self.index_of_session(session) {
            Some(index) => self.remove_at(index, Departure::Left),
            None => Effects::new(),
        }
    }

    fn remove_at(&mut self, index: usize, departure: Departure) -> Effects {
        let player = self.players.remove(index);
        if index < self.next_drawer {
            self.next_drawer -= 1;
        }

        let mut effects = Effects::new();
        effects.released.push(player.session_id);

        match departure {
            Departure::Left => info!("Player {} left room {}", player.name, self.id),
            Departure::Kicked => info!("Player {} was kicked from room {}", player.name, self.id),
        }

        if self.players.is_empty() {
            self.generation += 1;
            effects.timer = Some(TimerCommand::Stop);
            return effects;
        }

        let notice = match departure {
            Departure::Left => format!("{} left the room", player.name),
            Departure::Kicked => format!("{} was kicked from the room", player.name),
        };
        let was_drawing = player.is_drawing;
        let name = player.name.clone();

        effects.to_room(ServerMessage::PlayerLeft {
            player,
            players: self.players.clone(),
        });
        effects.to_room(system_message(notice));

        if self.phase == RoomPhase::Drawing {
            if was_drawing {
                info!("Drawer left room {}, ending round early", self.id);
                effects.merge(self.end_round_with(Some(name)));
            } else if self.all_guessers_done() {
                effects.merge(self.end_round());
            }
        }
        effects
    }

    /// Host-only change of settings or privacy while waiting.
    pub fn update(&mut self, session: SessionId, update: RoomUpdate) -> Result<Effects, RoomError> {
        if self.player_by_session(session).is_none() {
            return Err(RoomError::NotInRoom);
        }
        if !self.is_host(session) {
            return Err(RoomError::NotHost);
        }
        if self.phase != RoomPhase::Waiting {
            return Err(RoomError::GameInProgress);
        }

        let settings = settings::apply_patch(&self.settings, &update.settings)?;
        if self.players.len() > settings::capacity(&settings) {
            return Err(RoomError::invalid_config(
                "max players is below the current player count",
            ));
        }

        let is_private = update.is_private.unwrap_or(self.is_private);
        let password_hash = if is_private {
            match update.password.as_deref().map(str::trim) {
                Some(password) if !password.is_empty() => Some(settings::hash_password(password)),
                _ => self.password_hash.clone(),
            }
        } else {
            None
        };
        if is_private && password_hash.is_none() {
            return Err(RoomError::invalid_config("private rooms need a password"));
        }

        self.settings = settings;
        self.is_private = is_private;
        self.password_hash = password_hash;
        self.total_time = self.settings.round_time;

        info!("Room {} settings updated", self.id);

        let mut effects = Effects::new();
        effects.to_room(ServerMessage::RoomUpdated {
            room: self.snapshot(),
        });
        Ok(effects)
    }

    /// Players ordered by score, highest first; ties keep join order.
    fn ranked_players(&self) -> Vec<&Player> {
        let mut ranked: Vec<&Player> = self.players.iter().collect();
        ranked.sort_by(|a, b| b.score.cmp(&a.score));
        ranked
    }

    pub fn snapshot(&self) -> RoomSnapshot {
        let masked_word = match (&self.current_word, self.phase) {
            (Some(word), RoomPhase::Drawing) => {
                Some(HintRevealer::masked_word(word, &self.hint_revealed))
            }
            _ => None,
        };

        RoomSnapshot {
            id: self.id.clone(),
            name: self.name.clone(),
            host_id: self.host().map(|p| p.id.clone()),
            players: self.players.clone(),
            phase: self.phase,
            round: self.round,
            max_rounds: self.settings.max_rounds,
            current_drawer_id: self.current_drawer_id.clone(),
            current_category: self.current_category.clone(),
            current_difficulty: self.current_difficulty,
            time_left: self.time_left,
            total_time: self.total_time,
            hint_revealed: self.hint_revealed.clone(),
            masked_word,
            drawing_data: self.drawing_data.clone(),
            is_private: self.is_private,
            settings: self.settings.clone(),
        }
    }

    pub fn summary(&self) -> RoomSummary {
        RoomSummary {
            id: self.id.clone(),
            name: self.name.clone(),
            player_count: self.players.len(),
            max_players: settings::capacity(&self.settings),
            phase: self.phase,
            round: self.round,
            max_rounds: self.settings.max_rounds,
            categories: self.settings.categories.clone(),
            difficulty: self.settings.difficulty,
            is_private: self.is_private,
        }
    }
}

fn system_message(message: String) -> ServerMessage {
    ServerMessage::ChatMessage(ChatMessage {
        id: Uuid::new_v4().to_string(),
        player: "System".to_string(),
        player_id: None,
        message,
        kind: ChatKind::System,
        is_correct: false,
        similarity: 0,
        timestamp: chrono::Utc::now().to_rfc3339(),
    })
}
