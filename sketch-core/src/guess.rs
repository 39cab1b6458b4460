/// Similarity above which a wrong guess is announced as close.
pub const CLOSE_GUESS_THRESHOLD: u8 = 70;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GuessCheck {
    pub is_correct: bool,
    pub similarity: u8,
}

impl GuessCheck {
    pub fn is_close(&self) -> bool {
        !self.is_correct && self.similarity > CLOSE_GUESS_THRESHOLD
    }
}

pub struct GuessMatcher;

impl GuessMatcher {
    /// Compare a guess against the secret word after normalizing both.
    pub fn check(guess: &str, target: &str) -> GuessCheck {
        let guess = Self::normalize(guess);
        let target = Self::normalize(target);

        if guess == target {
            return GuessCheck {
                is_correct: true,
                similarity: 100,
            };
        }

        GuessCheck {
            is_correct: false,
            similarity: Self::similarity(&guess, &target),
        }
    }

    /// Lowercase and strip everything that is not a letter or digit.
    pub fn normalize(input: &str) -> String {
        input
            .chars()
            .filter(|c| c.is_alphanumeric())
            .flat_map(char::to_lowercase)
            .collect()
    }

    fn similarity(a: &str, b: &str) -> u8 {
        let max_len = a.chars().count().max(b.chars().count());
        if max_len == 0 {
            return 100;
        }
        let distance = levenshtein(a, b).min(max_len);
        (100.0 * (max_len - distance) as f64 / max_len as f64).round() as u8
    }
}

pub fn levenshtein(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    let mut previous: Vec<usize> = (0..=b.len()).collect();
    let mut current = vec![0; b.len() + 1];

    for (i, ca) in a.iter().enumerate() {
        current[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let cost = if ca == cb { 0 } else { 1 };
            current[j + 1] = (previous[j + 1] + 1)
                .min(current[j] + 1)
                .min(previous[j] + cost);
        }
        std::mem::swap(&mut previous, &mut current);
    }

    previous[b.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_match() {
        assert_eq!(
            GuessMatcher::check("CAT", "CAT"),
            GuessCheck {
                is_correct: true,
                similarity: 100
            }
        );
    }

    #[test]
    fn test_normalization_ignores_case_and_punctuation() {
        assert!(GuessMatcher::check("ice-cream!", "ICE CREAM").is_correct);
        assert!(GuessMatcher::check("  Cat ", "CAT").is_correct);
    }

    #[test]
    fn test_empty_guess() {
        assert_eq!(
            GuessMatcher::check("", "CAT"),
            GuessCheck {
                is_correct: false,
                similarity: 0
            }
        );
    }

    #[test]
    fn test_single_edit_similarity() {
        let result = GuessMatcher::check("KAT", "CAT");
        assert!(!result.is_correct);
        assert_eq!(result.similarity, 67);
        assert!(!result.is_close());
    }

    #[test]
    fn test_close_guess_threshold() {
        // One edit over eight letters: round(87.5) = 88
        let result = GuessMatcher::check("ELEPHANE", "ELEPHANT");
        assert_eq!(result.similarity, 88);
        assert!(result.is_close());
    }

    #[test]
    fn test_levenshtein() {
        assert_eq!(levenshtein("kitten", "sitting"), 3);
        assert_eq!(levenshtein("", "abc"), 3);
        assert_eq!(levenshtein("abc", "abc"), 0);
        assert_eq!(levenshtein("flaw", "lawn"), 2);
    }
}
