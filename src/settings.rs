//! Show configuration
//!
//! Supplied by the host page as JSON (the canvas `data-config` attribute).
//! Nothing here is persisted.

use serde::{Deserialize, Serialize};

use crate::consts::{FADE_ALPHA, LAUNCH_INTERVAL_MS, MAX_LAUNCH_COUNT};
use crate::flow::{Memory, default_memories};

/// Errors reading a configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid show config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Show and page tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShowConfig {
    /// Minimum time between launch gates (ms)
    pub launch_interval_ms: f64,
    /// Fireworks per launch gate are drawn from 1..=max_launches
    pub max_launches: u32,
    /// Alpha of the black overlay painted each visible frame
    pub fade_alpha: f32,

    // === Page ===
    /// Seconds counted down before the show starts
    pub countdown_secs: u32,
    /// Seconds of fireworks before the Next button appears
    pub next_button_delay_secs: u32,
    /// Expected PIN
    pub pin: String,
    /// Cards on the wishes page
    pub memories: Vec<Memory>,

    // === Audio ===
    /// Background music source
    pub music_url: String,
    /// Background music volume (0.0 - 1.0)
    pub music_volume: f32,
    /// Chime played when leaving the PIN page
    pub success_sound_url: String,

    /// Fixed RNG seed (otherwise the host picks one)
    pub seed: Option<u64>,
}

impl Default for ShowConfig {
    fn default() -> Self {
        Self {
            launch_interval_ms: LAUNCH_INTERVAL_MS,
            max_launches: MAX_LAUNCH_COUNT,
            fade_alpha: FADE_ALPHA,

            countdown_secs: 10,
            next_button_delay_secs: 30,
            pin: "19032004".to_string(),
            memories: default_memories(),

            music_url: "assets/background-music.mp3".to_string(),
            music_volume: 0.6,
            success_sound_url: "assets/success.mp3".to_string(),

            seed: None,
        }
    }
}

impl ShowConfig {
    /// Parse a JSON object; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: ShowConfig = serde_json::from_str(json)?;
        Ok(config.sanitized())
    }

    /// Parse `json` if present, falling back to defaults on any error
    pub fn from_json_or_default(json: Option<&str>) -> Self {
        match json.map(Self::from_json) {
            Some(Ok(config)) => {
                log::info!("Loaded show config");
                config
            }
            Some(Err(e)) => {
                log::warn!("{}; using defaults", e);
                Self::default()
            }
            None => Self::default(),
        }
    }

    /// Copy with every value clamped into its usable range
    pub fn sanitized(&self) -> Self {
        let mut config = self.clone();
        if !config.launch_interval_ms.is_finite() {
            config.launch_interval_ms = LAUNCH_INTERVAL_MS;
        }
        config.launch_interval_ms = config.launch_interval_ms.max(16.0);
        config.max_launches = config.max_launches.clamp(1, 8);
        if !(config.fade_alpha > 0.0 && config.fade_alpha <= 1.0) {
            config.fade_alpha = FADE_ALPHA;
        }
        config.music_volume = if config.music_volume.is_finite() {
            config.music_volume.clamp(0.0, 1.0)
        } else {
            0.6
        };
        config
    }
}
