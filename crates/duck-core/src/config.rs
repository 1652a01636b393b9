//! Startup configuration.
//!
//! Defaults come from `constants.rs`. The web frontend feeds each URL query
//! pair through `apply_override`, e.g. `?elevation=30&stick=1&words=duck,bird`.

use crate::constants::{
    DEFAULT_SPEECH_LANG, DEFAULT_WAKE_WORDS, DUCK_MODEL_PATH, QUACK_SOUND_PATH,
    WATER_NORMALS_PATH,
};
use crate::error::ConfigError;
use crate::params::Parameters;

/// Keys understood by `SceneConfig::apply_override`.
pub const OVERRIDE_KEYS: &[&str] = &["elevation", "azimuth", "stick", "speech", "lang", "words"];

#[derive(Clone, Debug)]
pub struct SceneConfig {
    pub duck_model_path: String,
    pub water_normals_path: String,
    pub quack_sound_path: String,
    pub wake_words: Vec<String>,
    pub speech_lang: String,
    pub speech_enabled: bool,
    pub initial: Parameters,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            duck_model_path: DUCK_MODEL_PATH.to_string(),
            water_normals_path: WATER_NORMALS_PATH.to_string(),
            quack_sound_path: QUACK_SOUND_PATH.to_string(),
            wake_words: DEFAULT_WAKE_WORDS.iter().map(|w| w.to_string()).collect(),
            speech_lang: DEFAULT_SPEECH_LANG.to_string(),
            speech_enabled: true,
            initial: Parameters::default(),
        }
    }
}

fn parse_bool(key: &str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "on" | "yes" => Ok(true),
        "0" | "false" | "off" | "no" => Ok(false),
        _ => Err(invalid(key, value)),
    }
}

fn parse_f32(key: &str, value: &str) -> Result<f32, ConfigError> {
    value
        .trim()
        .parse::<f32>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| invalid(key, value))
}

fn invalid(key: &str, value: &str) -> ConfigError {
    ConfigError::InvalidValue {
        key: key.to_string(),
        value: value.to_string(),
    }
}

impl SceneConfig {
    pub fn apply_override(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        match key {
            "elevation" => {
                self.initial.set_elevation(parse_f32(key, value)?);
            }
            "azimuth" => {
                self.initial.set_azimuth(parse_f32(key, value)?);
            }
            "stick" => {
                self.initial.set_has_stick(parse_bool(key, value)?);
            }
            "speech" => self.speech_enabled = parse_bool(key, value)?,
            "lang" => {
                if value.trim().is_empty() {
                    return Err(invalid(key, value));
                }
                self.speech_lang = value.trim().to_string();
            }
            "words" => {
                let words: Vec<String> = value
                    .split(',')
                    .map(|w| w.trim().to_string())
                    .filter(|w| !w.is_empty())
                    .collect();
                if words.is_empty() {
                    return Err(invalid(key, value));
                }
                self.wake_words = words;
            }
            _ => return Err(ConfigError::UnknownKey(key.to_string())),
        }
        Ok(())
    }

    /// Apply every pair, logging and skipping the ones that do not parse.
    pub fn apply_overrides<'a>(&mut self, pairs: impl IntoIterator<Item = (&'a str, &'a str)>) {
        for (k, v) in pairs {
            if let Err(e) = self.apply_override(k, v) {
                log::warn!("[config] ignoring override: {}", e);
            }
        }
    }
}
