use sketch_types::Difficulty;

/// Maximum bonus awarded for guessing at the very start of a round.
pub const MAX_TIME_BONUS: f64 = 50.0;
pub const MIN_POINTS: u32 = 10;

pub struct ScoringEngine;

impl ScoringEngine {
    /// Points for a correct guess, or the drawer's share of it.
    ///
    /// The time bonus scales with the fraction of the round still remaining,
    /// the difficulty multiplier is applied on top, and the drawer receives half.
    /// Nobody ever scores fewer than [`MIN_POINTS`].
    pub fn score(
        time_left: u32,
        total_time: u32,
        base_points: u32,
        difficulty: Difficulty,
        is_drawer: bool,
    ) -> u32 {
        let time_bonus = if total_time == 0 {
            0.0
        } else {
            (time_left.min(total_time) as f64 / total_time as f64 * MAX_TIME_BONUS).floor()
        };

        let mut raw = ((base_points as f64 + time_bonus) * difficulty.multiplier()).floor();
        if is_drawer {
            raw = (raw * 0.5).floor();
        }

        (raw as u32).max(MIN_POINTS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_time_hard_word() {
        assert_eq!(ScoringEngine::score(90, 90, 50, Difficulty::Hard, false), 200);
        assert_eq!(ScoringEngine::score(90, 90, 50, Difficulty::Hard, true), 100);
    }

    #[test]
    fn test_time_bonus_is_floored() {
        // 45/90 * 50 = 25, (75 + 25) * 1.5 = 150
        assert_eq!(ScoringEngine::score(45, 90, 75, Difficulty::Medium, false), 150);
        // 1/3 * 50 = 16.67 -> 16
        assert_eq!(ScoringEngine::score(30, 90, 50, Difficulty::Easy, false), 66);
        // (75 + 16) * 1.5 = 136.5 -> 136, halved -> 68
        assert_eq!(ScoringEngine::score(30, 90, 75, Difficulty::Medium, true), 68);
    }

    #[test]
    fn test_minimum_points() {
        assert_eq!(ScoringEngine::score(0, 90, 0, Difficulty::Easy, false), MIN_POINTS);
        assert_eq!(ScoringEngine::score(0, 90, 15, Difficulty::Easy, true), MIN_POINTS);
    }

    #[test]
    fn test_zero_total_time() {
        assert_eq!(ScoringEngine::score(0, 0, 50, Difficulty::Easy, false), 50);
    }
}
