//! Playground configuration.
//!
//! Every field has a default. With the `serde_json` feature a config can be
//! read from JSON, where missing fields keep their defaults:
//!
//! ```json
//! { "game": { "duration_ms": 60000 }, "stats_refresh_ms": 500 }
//! ```

use crate::engine::array::check_range;
use crate::error::{PlaygroundError, Result};
use crate::game::{GameConfig, ensure_positive};
use crate::loading::LoadingConfig;

/// Parameters for the playground's "generate array" button.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ArrayDefaults {
    pub length: i64,
    pub min: i32,
    pub max: i32,
}

impl Default for ArrayDefaults {
    fn default() -> Self {
        Self { length: 8, min: 1, max: 100 }
    }
}

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlaygroundConfig {
    pub game: GameConfig,
    pub loading: LoadingConfig,
    pub array: ArrayDefaults,
    /// Period of the stats panel refresh.
    pub stats_refresh_ms: f64,
}

impl Default for PlaygroundConfig {
    fn default() -> Self {
        Self {
            game: GameConfig::default(),
            loading: LoadingConfig::default(),
            array: ArrayDefaults::default(),
            stats_refresh_ms: 1000.0,
        }
    }
}

impl PlaygroundConfig {
    /// Reject values that would break the game, loading or stats timers.
    pub fn validate(&self) -> Result<()> {
        self.game.validate()?;
        self.loading.validate()?;
        ensure_positive("stats_refresh_ms", self.stats_refresh_ms)?;
        let ArrayDefaults { length, min, max } = self.array;
        check_range(length, min, max)
            .map_err(|_| PlaygroundError::InvalidConfig(format!("array defaults {length} in {min}..={max}")))
    }

    #[cfg(feature = "serde_json")]
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json).map_err(|e| PlaygroundError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }
}
