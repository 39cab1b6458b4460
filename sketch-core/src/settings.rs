use regex::Regex;
use sha2::{Digest, Sha256};
use sketch_types::{GameSettings, RoomError, SettingsPatch, WordSelectionMode};
use std::sync::LazyLock;

use crate::word_catalog::normalize_words;

/// Hard upper bound on room size regardless of settings.
pub const MAX_ROOM_CAPACITY: usize = 12;
pub const MIN_PLAYERS_TO_START: usize = 2;

const ROUND_TIME_RANGE: std::ops::RangeInclusive<u32> = 30..=180;
const MAX_ROUNDS_RANGE: std::ops::RangeInclusive<u32> = 1..=10;
const MAX_PLAYERS_RANGE: std::ops::RangeInclusive<usize> = 2..=MAX_ROOM_CAPACITY;

static CUSTOM_WORD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Z0-9][A-Z0-9 '\-]{0,31}$").expect("custom word pattern is valid")
});

/// Defaults with the patch applied on top.
pub fn resolve_settings(patch: &SettingsPatch) -> Result<GameSettings, RoomError> {
    apply_patch(&GameSettings::default(), patch)
}

/// Apply a partial update, normalize it, then validate the result.
pub fn apply_patch(current: &GameSettings, patch: &SettingsPatch) -> Result<GameSettings, RoomError> {
    let mut settings = current.clone();

    if let Some(round_time) = patch.round_time {
        settings.round_time = round_time;
    }
    if let Some(max_rounds) = patch.max_rounds {
        settings.max_rounds = max_rounds;
    }
    if let Some(points) = patch.points_for_correct_guess {
        settings.points_for_correct_guess = points;
    }
    if let Some(points) = patch.points_for_drawer {
        settings.points_for_drawer = points;
    }
    if let Some(hint_timings) = &patch.hint_timings {
        settings.hint_timings = hint_timings.clone();
    }
    if let Some(categories) = &patch.categories {
        settings.categories = categories.clone();
    }
    if let Some(difficulty) = patch.difficulty {
        settings.difficulty = difficulty;
    }
    if let Some(max_players) = patch.max_players {
        settings.max_players = max_players;
    }
    if let Some(word_mode) = patch.word_mode {
        settings.word_mode = word_mode;
    }
    if let Some(include) = patch.include_custom_words {
        settings.include_custom_words = include;
    }
    if let Some(custom_words) = &patch.custom_words {
        settings.custom_words = custom_words.clone();
    }

    settings.hint_timings.sort_unstable();
    settings.hint_timings.dedup();
    settings.custom_words = normalize_words(&settings.custom_words);

    validate(&settings)?;
    Ok(settings)
}

pub fn validate(settings: &GameSettings) -> Result<(), RoomError> {
    if !ROUND_TIME_RANGE.contains(&settings.round_time) {
        return Err(RoomError::invalid_config(format!(
            "round time must be between {} and {} seconds",
            ROUND_TIME_RANGE.start(),
            ROUND_TIME_RANGE.end()
        )));
    }
    if !MAX_ROUNDS_RANGE.contains(&settings.max_rounds) {
        return Err(RoomError::invalid_config(format!(
            "rounds must be between {} and {}",
            MAX_ROUNDS_RANGE.start(),
            MAX_ROUNDS_RANGE.end()
        )));
    }
    if !MAX_PLAYERS_RANGE.contains(&settings.max_players) {
        return Err(RoomError::invalid_config(format!(
            "max players must be between {} and {}",
            MAX_PLAYERS_RANGE.start(),
            MAX_PLAYERS_RANGE.end()
        )));
    }
    if settings.hint_timings.iter().any(|t| *t > 100) {
        return Err(RoomError::invalid_config(
            "hint timings must be percentages between 0 and 100",
        ));
    }
    if settings.word_mode != WordSelectionMode::CustomOnly && settings.categories.is_empty() {
        return Err(RoomError::invalid_config("select at least one category"));
    }
    if let Some(word) = settings
        .custom_words
        .iter()
        .find(|word| !CUSTOM_WORD.is_match(word))
    {
        return Err(RoomError::invalid_config(format!(
            "custom word \"{}\" is not allowed",
            word
        )));
    }
    Ok(())
}

/// Effective capacity of a room.
pub fn capacity(settings: &GameSettings) -> usize {
    settings.max_players.min(MAX_ROOM_CAPACITY)
}

/// SHA-256 hex digest stored in place of the plain password.
pub fn hash_password(password: &str) -> String {
    hex::encode(Sha256::digest(password.as_bytes()))
}

pub fn verify_password(hash: &str, candidate: Option<&str>) -> bool {
    candidate.is_some_and(|candidate| hash_password(candidate) == hash)
}
