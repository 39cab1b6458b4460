use anyhow::{Context, Result, anyhow};
use rand::Rng;
use serde::{Deserialize, Serialize};
use sketch_types::{Difficulty, GameSettings, WordSelectionMode};
use std::path::Path;

pub const CUSTOM_CATEGORY: &str = "Custom";
const CUSTOM_DIFFICULTY: Difficulty = Difficulty::Medium;
const CUSTOM_BASE_POINTS: u32 = 75;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WordCategory {
    pub name: String,
    pub difficulty: Difficulty,
    pub base_points: u32,
    pub words: Vec<String>,
}

impl WordCategory {
    pub fn new(name: &str, difficulty: Difficulty, base_points: u32, words: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            difficulty,
            base_points,
            words: words.iter().map(|w| w.to_string()).collect(),
        }
    }
}

/// The word picked for a round.
#[derive(Debug, Clone, PartialEq)]
pub struct WordSelection {
    pub word: String,
    pub category: String,
    pub difficulty: Difficulty,
    pub base_points: u32,
    pub is_custom: bool,
}

enum Candidate<'a> {
    Category(&'a WordCategory),
    Custom(&'a [String]),
}

impl Candidate<'_> {
    fn words(&self) -> &[String] {
        match self {
            Candidate::Category(category) => &category.words,
            Candidate::Custom(words) => words,
        }
    }

    fn has_unused(&self, used: &[String]) -> bool {
        self.words().iter().any(|w| !used.contains(w))
    }

    fn selection(&self, word: String) -> WordSelection {
        match self {
            Candidate::Category(category) => WordSelection {
                word,
                category: category.name.clone(),
                difficulty: category.difficulty,
                base_points: category.base_points,
                is_custom: false,
            },
            Candidate::Custom(_) => WordSelection {
                word,
                category: CUSTOM_CATEGORY.to_string(),
                difficulty: CUSTOM_DIFFICULTY,
                base_points: CUSTOM_BASE_POINTS,
                is_custom: true,
            },
        }
    }
}

#[derive(Debug, Clone)]
pub struct WordCatalog {
    categories: Vec<WordCategory>,
}

impl WordCatalog {
    /// Catalog with the four built-in categories.
    pub fn builtin() -> Self {
        Self::from_categories(vec![
            WordCategory::new(
                "Animals",
                Difficulty::Easy,
                50,
                &[
                    "CAT", "DOG", "FISH", "BIRD", "HORSE", "COW", "PIG", "SHEEP", "DUCK", "FROG",
                    "RABBIT", "MOUSE", "BEAR", "LION", "TIGER", "ELEPHANT", "GIRAFFE", "MONKEY",
                    "PENGUIN", "DOLPHIN",
                ],
            ),
            WordCategory::new(
                "Objects",
                Difficulty::Medium,
                75,
                &[
                    "CHAIR", "TABLE", "BOOK", "PHONE", "COMPUTER", "CAMERA", "GUITAR", "PIANO",
                    "BICYCLE", "CAR", "AIRPLANE", "BOAT", "UMBRELLA", "CLOCK", "LAMP", "MIRROR",
                    "SCISSORS", "HAMMER",
                ],
            ),
            WordCategory::new(
                "Food",
                Difficulty::Easy,
                50,
                &[
                    "PIZZA",
                    "BURGER",
                    "SANDWICH",
                    "APPLE",
                    "BANANA",
                    "ORANGE",
                    "CAKE",
                    "COOKIE",
                    "ICE CREAM",
                    "CHOCOLATE",
                    "BREAD",
                    "CHEESE",
                    "PASTA",
                    "RICE",
                ],
            ),
            WordCategory::new(
                "Nature",
                Difficulty::Medium,
                75,
                &[
                    "TREE", "FLOWER", "MOUNTAIN", "OCEAN", "RIVER", "LAKE", "FOREST", "DESERT",
                    "RAINBOW", "CLOUD", "SUN", "MOON", "STAR",
                ],
            ),
        ])
    }

    /// Words are trimmed and uppercased; blank entries are dropped.
    pub fn from_categories(categories: Vec<WordCategory>) -> Self {
        let categories = categories
            .into_iter()
            .map(|mut category| {
                category.words = normalize_words(&category.words);
                category
            })
            .collect();
        Self { categories }
    }

    /// Parse a JSON array of `{name, difficulty, basePoints, words}` objects.
    pub fn from_json(json: &str) -> Result<Self> {
        let categories: Vec<WordCategory> =
            serde_json::from_str(json).context("Failed to parse word catalog JSON")?;
        let catalog = Self::from_categories(categories);
        if catalog.word_count() == 0 {
            return Err(anyhow!("Word catalog contains no words"));
        }
        Ok(catalog)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read word catalog {}", path.display()))?;
        Self::from_json(&json)
    }

    pub fn category_names(&self) -> Vec<&str> {
        self.categories.iter().map(|c| c.name.as_str()).collect()
    }

    pub fn word_count(&self) -> usize {
        self.categories.iter().map(|c| c.words.len()).sum()
    }

    /// Pick a word honoring the room's categories, difficulty and word mode.
    ///
    /// Words in `used` are avoided while any unused candidate remains. When the
    /// configured categories yield nothing, the whole catalog is used instead.
    pub fn select_word<R: Rng + ?Sized>(
        &self,
        settings: &GameSettings,
        used: &[String],
        rng: &mut R,
    ) -> WordSelection {
        let custom_words = normalize_words(&settings.custom_words);

        if settings.word_mode == WordSelectionMode::CustomOnly && !custom_words.is_empty() {
            return pick(&[Candidate::Custom(&custom_words)], used, rng);
        }

        let mut candidates: Vec<Candidate> = self
            .categories
            .iter()
            .filter(|c| !c.words.is_empty())
            .filter(|c| settings.categories.iter().any(|name| name == &c.name))
            .filter(|c| settings.difficulty.allows(c.difficulty))
            .map(Candidate::Category)
            .collect();

        if settings.include_custom_words
            && !custom_words.is_empty()
            && settings.difficulty.allows(CUSTOM_DIFFICULTY)
        {
            candidates.push(Candidate::Custom(&custom_words));
        }

        if candidates.is_empty() {
            tracing::debug!("No words match room settings, falling back to full catalog");
            candidates = self
                .categories
                .iter()
                .filter(|c| !c.words.is_empty())
                .map(Candidate::Category)
                .collect();
        }

        if candidates.is_empty() {
            return fallback_word();
        }

        pick(&candidates, used, rng)
    }
}

impl Default for WordCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

fn pick<R: Rng + ?Sized>(candidates: &[Candidate], used: &[String], rng: &mut R) -> WordSelection {
    let fresh: Vec<&Candidate> = candidates.iter().filter(|c| c.has_unused(used)).collect();
    let pool: Vec<&Candidate> = if fresh.is_empty() {
        candidates.iter().collect()
    } else {
        fresh
    };

    let candidate = pool[rng.random_range(0..pool.len())];
    let unused: Vec<&String> = candidate
        .words()
        .iter()
        .filter(|w| !used.contains(w))
        .collect();
    let words: Vec<&String> = if unused.is_empty() {
        candidate.words().iter().collect()
    } else {
        unused
    };

    let word = words[rng.random_range(0..words.len())].clone();
    candidate.selection(word)
}

fn fallback_word() -> WordSelection {
    WordSelection {
        word: "CAT".to_string(),
        category: "Animals".to_string(),
        difficulty: Difficulty::Easy,
        base_points: 50,
        is_custom: false,
    }
}

pub fn normalize_words(words: &[String]) -> Vec<String> {
    words
        .iter()
        .map(|w| w.trim().to_uppercase())
        .filter(|w| !w.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use sketch_types::DifficultyMode;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(7)
    }

    #[test]
    fn test_builtin_catalog() {
        let catalog = WordCatalog::builtin();
        assert_eq!(
            catalog.category_names(),
            vec!["Animals", "Objects", "Food", "Nature"]
        );
        assert_eq!(catalog.word_count(), 65);
    }

    #[test]
    fn test_selection_respects_categories_and_difficulty() {
        let catalog = WordCatalog::builtin();
        let settings = GameSettings {
            categories: vec!["Animals".to_string(), "Objects".to_string()],
            difficulty: DifficultyMode::Medium,
            ..GameSettings::default()
        };

        let mut rng = rng();
        for _ in 0..50 {
            let selection = catalog.select_word(&settings, &[], &mut rng);
            assert_eq!(selection.category, "Objects");
            assert_eq!(selection.difficulty, Difficulty::Medium);
            assert_eq!(selection.base_points, 75);
        }
    }

    #[test]
    fn test_empty_candidate_set_falls_back_to_catalog() {
        let catalog = WordCatalog::builtin();
        let settings = GameSettings {
            categories: vec!["Animals".to_string()],
            difficulty: DifficultyMode::Hard,
            ..GameSettings::default()
        };

        let selection = catalog.select_word(&settings, &[], &mut rng());
        assert!(catalog.category_names().contains(&selection.category.as_str()));
        assert!(!selection.is_custom);
    }

    #[test]
    fn test_custom_only_mode() {
        let catalog = WordCatalog::builtin();
        let settings = GameSettings {
            word_mode: WordSelectionMode::CustomOnly,
            custom_words: vec!["  rocket ship ".to_string(), "volcano".to_string()],
            ..GameSettings::default()
        };

        let mut rng = rng();
        for _ in 0..20 {
            let selection = catalog.select_word(&settings, &[], &mut rng);
            assert!(selection.is_custom);
            assert_eq!(selection.category, CUSTOM_CATEGORY);
            assert!(["ROCKET SHIP", "VOLCANO"].contains(&selection.word.as_str()));
        }
    }

    #[test]
    fn test_custom_only_with_no_words_uses_categories() {
        let catalog = WordCatalog::builtin();
        let settings = GameSettings {
            word_mode: WordSelectionMode::CustomOnly,
            ..GameSettings::default()
        };

        let selection = catalog.select_word(&settings, &[], &mut rng());
        assert!(!selection.is_custom);
    }

    #[test]
    fn test_used_words_are_avoided_until_exhausted() {
        let catalog = WordCatalog::from_categories(vec![WordCategory::new(
            "Animals",
            Difficulty::Easy,
            50,
            &["cat", "dog"],
        )]);
        let settings = GameSettings::default();
        let mut rng = rng();

        for _ in 0..10 {
            let selection = catalog.select_word(&settings, &["CAT".to_string()], &mut rng);
            assert_eq!(selection.word, "DOG");
        }

        let used = vec!["CAT".to_string(), "DOG".to_string()];
        let selection = catalog.select_word(&settings, &used, &mut rng);
        assert!(used.contains(&selection.word));
    }

    #[test]
    fn test_from_json() {
        let json = r#"[{"name":"Space","difficulty":"hard","basePoints":100,"words":["comet"," nebula ",""]}]"#;
        let catalog = WordCatalog::from_json(json).unwrap();
        assert_eq!(catalog.category_names(), vec!["Space"]);
        assert_eq!(catalog.word_count(), 2);

        let settings = GameSettings {
            categories: vec!["Space".to_string()],
            ..GameSettings::default()
        };
        let selection = catalog.select_word(&settings, &[], &mut rng());
        assert_eq!(selection.difficulty, Difficulty::Hard);
        assert!(["COMET", "NEBULA"].contains(&selection.word.as_str()));
    }

    #[test]
    fn test_from_json_rejects_empty_catalog() {
        assert!(WordCatalog::from_json("[]").is_err());
        assert!(WordCatalog::from_json("not json").is_err());
    }

    #[test]
    fn test_empty_catalog_returns_fallback_word() {
        let catalog = WordCatalog::from_categories(Vec::new());
        let selection = catalog.select_word(&GameSettings::default(), &[], &mut rng());
        assert_eq!(selection.word, "CAT");
    }
}
