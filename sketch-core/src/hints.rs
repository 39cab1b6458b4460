use rand::Rng;

/// Share of a word's letters that hints may ever uncover.
pub const MAX_REVEAL_RATIO: f64 = 0.3;
pub const HIDDEN_LETTER: char = '_';

pub struct HintRevealer;

impl HintRevealer {
    /// Spaces, hyphens and apostrophes are never hidden.
    pub fn is_always_visible(c: char) -> bool {
        matches!(c, ' ' | '-' | '\'')
    }

    pub fn initial_mask(word: &str) -> Vec<bool> {
        word.chars().map(Self::is_always_visible).collect()
    }

    /// Extend `previous` with one more revealed letter for every threshold
    /// crossed, up to the reveal cap.
    ///
    /// Letters revealed in `previous` stay revealed, so calling this every tick
    /// with growing `elapsed` only ever adds to the mask.
    pub fn reveal<R: Rng + ?Sized>(
        word: &str,
        thresholds: &[u8],
        elapsed: u32,
        total: u32,
        previous: &[bool],
        rng: &mut R,
    ) -> Vec<bool> {
        let chars: Vec<char> = word.chars().collect();
        let mut mask = if previous.len() == chars.len() {
            previous.to_vec()
        } else {
            Self::initial_mask(word)
        };
        for (slot, c) in mask.iter_mut().zip(&chars) {
            *slot |= Self::is_always_visible(*c);
        }

        let percent = if total == 0 {
            100.0
        } else {
            elapsed as f64 / total as f64 * 100.0
        };
        let crossed = thresholds
            .iter()
            .filter(|&&threshold| percent >= threshold as f64)
            .count();

        let letters = chars.iter().filter(|c| !Self::is_always_visible(**c)).count();
        let cap = (letters as f64 * MAX_REVEAL_RATIO).floor() as usize;
        let target = crossed.min(cap);

        let mut revealed = chars
            .iter()
            .zip(&mask)
            .filter(|(c, shown)| **shown && !Self::is_always_visible(**c))
            .count();

        while revealed < target {
            let hidden: Vec<usize> = mask
                .iter()
                .enumerate()
                .filter(|(_, shown)| !**shown)
                .map(|(i, _)| i)
                .collect();
            if hidden.is_empty() {
                break;
            }
            let index = hidden[rng.random_range(0..hidden.len())];
            mask[index] = true;
            revealed += 1;
        }

        mask
    }

    /// Render the word with hidden letters replaced by underscores.
    pub fn masked_word(word: &str, mask: &[bool]) -> String {
        word.chars()
            .enumerate()
            .map(|(i, c)| {
                if mask.get(i).copied().unwrap_or(false) || Self::is_always_visible(c) {
                    c
                } else {
                    HIDDEN_LETTER
                }
            })
            .collect()
    }
}
