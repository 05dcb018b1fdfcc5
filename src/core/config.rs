//! Engine configuration.
//!
//! `GameConfig` carries every tunable of scoring and of the stock mods.
//! Defaults reproduce the classic rules: 10..=30 points per round, first to
//! 120 is champion, 8 bombs that each take 2 discs, aliens that abduct 4-5.
//!
//! Configs can be built in code with the `with_*` builders or loaded from
//! TOML; unknown keys fall back to their defaults.
//!
//! ```
//! use connect_mods::core::GameConfig;
//!
//! let config = GameConfig::from_toml_str("championship_score = 60\nseed = 7").unwrap();
//! assert_eq!(config.championship_score, 60);
//! assert_eq!(config.max_round_points, 30);
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::error::ConfigError;
use super::position::{COLS, ROWS};

/// Complete engine configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Cumulative score that ends the match.
    pub championship_score: u32,

    /// Floor of the points awarded for a round win.
    pub min_round_points: u32,

    /// Cap of the points awarded for a round win.
    pub max_round_points: u32,

    /// Player-move count at which the speed bonus reaches zero.
    pub par_player_moves: u32,

    /// Bonus points per player-move under par.
    pub points_per_saved_move: u32,

    /// Fraction of the grid hidden as bombs each round.
    pub bomb_ratio: f64,

    /// Own discs removed when a bomb goes off.
    pub bomb_discs_removed: usize,

    /// Fewest discs an alien abducts.
    pub alien_min_abducted: usize,

    /// Most discs an alien abducts.
    pub alien_max_abducted: usize,

    /// Root seed for every random roll of the engine.
    pub seed: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            championship_score: 120,
            min_round_points: 10,
            max_round_points: 30,
            par_player_moves: 20,
            points_per_saved_move: 2,
            bomb_ratio: 0.15,
            bomb_discs_removed: 2,
            alien_min_abducted: 4,
            alien_max_abducted: 5,
            seed: 42,
        }
    }
}

impl GameConfig {
    /// Parse a TOML document and validate it.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::FileRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Set the root seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set the championship threshold.
    #[must_use]
    pub fn with_championship_score(mut self, score: u32) -> Self {
        self.championship_score = score;
        self
    }

    /// Set the fraction of cells hidden as bombs.
    #[must_use]
    pub fn with_bomb_ratio(mut self, ratio: f64) -> Self {
        self.bomb_ratio = ratio;
        self
    }

    /// Set how many discs a bomb removes.
    #[must_use]
    pub fn with_bomb_discs_removed(mut self, count: usize) -> Self {
        self.bomb_discs_removed = count;
        self
    }

    /// Set the abduction range of the alien mod.
    #[must_use]
    pub fn with_alien_abducted(mut self, min: usize, max: usize) -> Self {
        self.alien_min_abducted = min;
        self.alien_max_abducted = max;
        self
    }

    /// Number of bombs hidden per round.
    #[must_use]
    pub fn bomb_count(&self) -> usize {
        ((ROWS * COLS) as f64 * self.bomb_ratio).floor() as usize
    }

    /// Check value ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.championship_score == 0 {
            return Err(ConfigError::Validation("championship_score must be > 0".into()));
        }
        if self.min_round_points > self.max_round_points {
            return Err(ConfigError::Validation(
                "min_round_points must be <= max_round_points".into(),
            ));
        }
        if !(0.0..1.0).contains(&self.bomb_ratio) {
            return Err(ConfigError::Validation("bomb_ratio must be in [0, 1)".into()));
        }
        if self.alien_min_abducted > self.alien_max_abducted {
            return Err(ConfigError::Validation(
                "alien_min_abducted must be <= alien_max_abducted".into(),
            ));
        }
        if self.alien_max_abducted > ROWS * COLS {
            return Err(ConfigError::Validation(
                "alien_max_abducted cannot exceed the number of cells".into(),
            ));
        }
        Ok(())
    }
}
