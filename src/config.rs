use crate::error::{Result, VoicepackError};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Tool-wide defaults for the dataset builder. CLI flags always win; these
/// only fill in the values the user did not pass.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Output sample rate for extracted clips.
    pub sample_rate: u32,
    /// Merge transcript segments if the gap is at most this many seconds.
    pub max_gap: f64,
    /// Minimum characters for a speech region.
    pub min_chars: usize,
    /// Minimum speech region duration in seconds.
    pub min_duration: f64,
    /// Padding around each speech region in seconds.
    pub padding: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            sample_rate: 24000,
            max_gap: 3.0,
            min_chars: 80,
            min_duration: 12.0,
            padding: 3.5,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let mut config = Self::default();

        // Load from config file if it exists
        if let Some(config_path) = Self::config_file_path() {
            if config_path.exists() {
                let contents = std::fs::read_to_string(&config_path)?;
                if let Ok(file_config) = toml::from_str::<Config>(&contents) {
                    config = file_config;
                }
            }
        }

        // Override with environment variables
        if let Ok(rate) = std::env::var("VOICEPACK_SAMPLE_RATE") {
            if let Ok(r) = rate.parse() {
                config.sample_rate = r;
            }
        }
        if let Ok(gap) = std::env::var("VOICEPACK_MAX_GAP") {
            if let Ok(g) = gap.parse() {
                config.max_gap = g;
            }
        }
        if let Ok(chars) = std::env::var("VOICEPACK_MIN_CHARS") {
            if let Ok(c) = chars.parse() {
                config.min_chars = c;
            }
        }
        if let Ok(duration) = std::env::var("VOICEPACK_MIN_DURATION") {
            if let Ok(d) = duration.parse() {
                config.min_duration = d;
            }
        }
        if let Ok(padding) = std::env::var("VOICEPACK_PADDING") {
            if let Ok(p) = padding.parse() {
                config.padding = p;
            }
        }

        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.sample_rate == 0 {
            return Err(VoicepackError::Config(
                "Sample rate must be greater than 0".to_string(),
            ));
        }
        if self.max_gap < 0.0 {
            return Err(VoicepackError::Config(
                "Max gap must not be negative".to_string(),
            ));
        }
        if self.min_duration < 0.0 {
            return Err(VoicepackError::Config(
                "Min duration must not be negative".to_string(),
            ));
        }
        if self.padding < 0.0 {
            return Err(VoicepackError::Config(
                "Padding must not be negative".to_string(),
            ));
        }
        Ok(())
    }

    fn config_file_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("voicepack").join("config.toml"))
    }
}
