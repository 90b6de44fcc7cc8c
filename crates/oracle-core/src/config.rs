//! Configuration for draws and the access gate.

use chrono::Duration;
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

use crate::error::OracleResult;
use crate::gate::{DailyAccessGate, MAX_COOLDOWN_MINUTES, MIN_COOLDOWN_MINUTES};

fn clamp_minutes(minutes: i64) -> i64 {
    minutes.clamp(MIN_COOLDOWN_MINUTES, MAX_COOLDOWN_MINUTES)
}

/// Tunable parameters for the daily draw.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OracleConfig {
    /// Number of candidate cards offered per draw (at least 1).
    pub draw_size: usize,
    /// Minutes between two successful draws (1 to 527,040).
    pub cooldown_minutes: i64,
    /// RNG seed for reproducible draws. `None` seeds from the OS.
    pub seed: Option<u64>,
}

impl Default for OracleConfig {
    fn default() -> Self {
        Self {
            draw_size: 5,
            cooldown_minutes: 24 * 60,
            seed: None,
        }
    }
}

impl OracleConfig {
    /// Set the number of candidates per draw (minimum 1).
    pub fn with_draw_size(mut self, draw_size: usize) -> Self {
        self.draw_size = draw_size.max(1);
        self
    }

    /// Set the cooldown between draws (minimum one minute).
    pub fn with_cooldown(mut self, cooldown: Duration) -> Self {
        self.cooldown_minutes = clamp_minutes(cooldown.num_minutes());
        self
    }

    /// Set the RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Parse a configuration from JSON. Missing fields take their defaults
    /// and out-of-range values are clamped.
    pub fn from_json(json: &str) -> OracleResult<Self> {
        let mut cfg: Self = serde_json::from_str(json)?;
        cfg.draw_size = cfg.draw_size.max(1);
        cfg.cooldown_minutes = clamp_minutes(cfg.cooldown_minutes);
        Ok(cfg)
    }

    /// The cooldown as a duration.
    pub fn cooldown(&self) -> Duration {
        Duration::minutes(clamp_minutes(self.cooldown_minutes))
    }

    /// The access gate described by this configuration.
    pub fn gate(&self) -> DailyAccessGate {
        DailyAccessGate::new(self.cooldown())
    }

    /// A fresh RNG: seeded when a seed is configured, OS-seeded otherwise.
    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        }
    }
}
