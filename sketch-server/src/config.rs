use std::env;
use std::str::FromStr;
use std::time::Duration;
use tracing::warn;

use sketch_core::settings::MAX_ROOM_CAPACITY;

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub max_players_per_room: usize,
    pub round_tick: Duration,
    pub next_round_delay: Duration,
    pub game_over_delay: Duration,
    pub reset_delay: Duration,
    pub rate_limit_burst: u32,
    pub rate_limit_per_second: u32,
    pub words_file: Option<String>,
    pub rng_seed: Option<u64>,
}

impl Config {
    /// Read settings from the environment, falling back to defaults.
    pub fn new() -> Self {
        let defaults = Self::defaults();

        let max_players_per_room = env_or("MAX_PLAYERS_PER_ROOM", defaults.max_players_per_room);
        let max_players_per_room = if (2..=MAX_ROOM_CAPACITY).contains(&max_players_per_room) {
            max_players_per_room
        } else {
            warn!(
                "MAX_PLAYERS_PER_ROOM must be between 2 and {}, using {}",
                MAX_ROOM_CAPACITY, defaults.max_players_per_room
            );
            defaults.max_players_per_room
        };

        Self {
            host: env::var("HOST").unwrap_or(defaults.host),
            port: env_or("PORT", defaults.port),
            max_players_per_room,
            round_tick: Duration::from_millis(env_or("ROUND_TICK_MILLIS", 1000)),
            next_round_delay: Duration::from_secs(env_or("NEXT_ROUND_DELAY_SECONDS", 5)),
            game_over_delay: Duration::from_secs(env_or("GAME_OVER_DELAY_SECONDS", 10)),
            reset_delay: Duration::from_secs(env_or("RESET_DELAY_SECONDS", 10)),
            rate_limit_burst: env_or("RATE_LIMIT_BURST", defaults.rate_limit_burst),
            rate_limit_per_second: env_or("RATE_LIMIT_PER_SECOND", defaults.rate_limit_per_second),
            words_file: env::var("WORDS_FILE").ok().filter(|path| !path.is_empty()),
            rng_seed: env::var("RNG_SEED").ok().and_then(|raw| match raw.parse() {
                Ok(seed) => Some(seed),
                Err(_) => {
                    warn!("Invalid RNG_SEED value {:?}, using entropy", raw);
                    None
                }
            }),
        }
    }

    /// Built-in defaults, ignoring the environment.
    pub fn defaults() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            max_players_per_room: MAX_ROOM_CAPACITY,
            round_tick: Duration::from_secs(1),
            next_round_delay: Duration::from_secs(5),
            game_over_delay: Duration::from_secs(10),
            reset_delay: Duration::from_secs(10),
            rate_limit_burst: 120,
            rate_limit_per_second: 60,
            words_file: None,
            rng_seed: None,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::defaults()
    }
}

fn env_or<T: FromStr>(key: &str, default: T) -> T {
    match env::var(key) {
        Ok(raw) => raw.parse().unwrap_or_else(|_| {
            warn!("Invalid {} value {:?}, using default", key, raw);
            default
        }),
        Err(_) => default,
    }
}
