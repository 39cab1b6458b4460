use sketch_core::Scheduled;
use std::sync::Weak;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tracing::debug;

use crate::config::Config;
use crate::coordinator::GameCoordinator;
use crate::registry::RoomHandle;

/// Spawns the per-room round ticker and the delayed phase transitions.
///
/// Tasks hold weak references so a destroyed room or a dropped coordinator
/// ends them on their next wakeup.
#[derive(Debug, Clone)]
pub struct RoundScheduler {
    tick: Duration,
    next_round_delay: Duration,
    game_over_delay: Duration,
    reset_delay: Duration,
}

impl RoundScheduler {
    pub fn new(config: &Config) -> Self {
        Self {
            tick: config.round_tick,
            next_round_delay: config.next_round_delay,
            game_over_delay: config.game_over_delay,
            reset_delay: config.reset_delay,
        }
    }

    pub fn delay_for(&self, task: Scheduled) -> Duration {
        match task {
            Scheduled::NextRound { .. } => self.next_round_delay,
            Scheduled::GameOver { .. } => self.game_over_delay,
            Scheduled::Reset { .. } => self.reset_delay,
        }
    }

    pub fn spawn_round_timer(
        &self,
        coordinator: Weak<GameCoordinator>,
        room: Weak<RoomHandle>,
        generation: u64,
    ) -> JoinHandle<()> {
        let period = self.tick;
        tokio::spawn(async move {
            let mut interval = tokio::time::interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                interval.tick().await;
                let (Some(coordinator), Some(room)) = (coordinator.upgrade(), room.upgrade()) else {
                    break;
                };
                if !coordinator.tick_round(&room, generation).await {
                    debug!("Round timer for room {} finished", room.id);
                    break;
                }
            }
        })
    }

    pub fn spawn_delayed(
        &self,
        coordinator: Weak<GameCoordinator>,
        room: Weak<RoomHandle>,
        task: Scheduled,
    ) -> JoinHandle<()> {
        let delay = self.delay_for(task);
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if let (Some(coordinator), Some(room)) = (coordinator.upgrade(), room.upgrade()) {
                coordinator.run_scheduled(&room, task).await;
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delays_follow_config() {
        let scheduler = RoundScheduler::new(&Config::defaults());
        assert_eq!(
            scheduler.delay_for(Scheduled::NextRound { generation: 1 }),
            Duration::from_secs(5)
        );
        assert_eq!(
            scheduler.delay_for(Scheduled::GameOver { generation: 1 }),
            Duration::from_secs(10)
        );
        assert_eq!(
            scheduler.delay_for(Scheduled::Reset { generation: 1 }),
            Duration::from_secs(10)
        );
    }
}
