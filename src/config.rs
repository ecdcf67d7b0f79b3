//! Application Config
//!
//! Optional JSON embedded in `index.html` as
//! `<script type="application/json" id="app-config">`; every field has a default.

use std::time::Duration;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};

/// Element id of the embedded config block
pub const CONFIG_ELEMENT_ID: &str = "app-config";

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AppConfig {
    pub log_level: String,
    /// Lines kept in the in-memory log history
    pub log_history: usize,
    pub lazy_load: LazyLoadConfig,
    /// Seed for the simulated backend; random when absent
    pub rng_seed: Option<u64>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_history: 200,
            lazy_load: LazyLoadConfig::default(),
            rng_seed: None,
        }
    }
}

/// Bounds of the simulated lazy-load delay, uniformly sampled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LazyLoadConfig {
    pub min_delay_ms: u32,
    pub max_delay_ms: u32,
}

impl Default for LazyLoadConfig {
    fn default() -> Self {
        Self { min_delay_ms: 600, max_delay_ms: 1000 }
    }
}

impl LazyLoadConfig {
    pub fn sample_delay<R: Rng + ?Sized>(&self, rng: &mut R) -> Duration {
        let ms = rng.random_range(self.min_delay_ms..=self.max_delay_ms);
        Duration::from_millis(u64::from(ms))
    }
}

impl AppConfig {
    pub fn from_json(json: &str) -> AppResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> AppResult<()> {
        if !LOG_LEVELS.contains(&self.log_level.as_str()) {
            return Err(AppError::InvalidConfig {
                field: "logLevel",
                reason: format!("expected one of {}", LOG_LEVELS.join(", ")),
            });
        }
        if self.log_history == 0 {
            return Err(AppError::InvalidConfig {
                field: "logHistory",
                reason: "must be at least 1".to_string(),
            });
        }
        if self.lazy_load.min_delay_ms > self.lazy_load.max_delay_ms {
            return Err(AppError::InvalidConfig {
                field: "lazyLoad.minDelayMs",
                reason: format!(
                    "{} exceeds maxDelayMs {}",
                    self.lazy_load.min_delay_ms, self.lazy_load.max_delay_ms
                ),
            });
        }
        Ok(())
    }

    /// Read the embedded config block, if the page has one
    pub fn from_document() -> Option<AppResult<Self>> {
        let text = web_sys::window()?
            .document()?
            .get_element_by_id(CONFIG_ELEMENT_ID)?
            .text_content()?;
        if text.trim().is_empty() {
            return None;
        }
        Some(Self::from_json(&text))
    }
}
