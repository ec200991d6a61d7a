use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use tracing::{debug, info};

use crate::constants::*;
use crate::error::{ConfigError, ScriptError};

/// Looked up in the working directory when no `--config` is given.
pub const DEFAULT_CONFIG_FILE: &str = "hero-typewriter.toml";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub script: Script,

    #[serde(default)]
    pub targets: Targets,

    #[serde(default)]
    pub timings: TimingsConfig,

    #[serde(default)]
    pub display: DisplayConfig,
}

/// Text typed by the sequencer.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Script {
    #[serde(default = "default_greetings")]
    pub greetings: Vec<String>,
    #[serde(default = "default_name")]
    pub name: String,
    #[serde(default = "default_subtitle_1")]
    pub subtitle_1: String,
    #[serde(default = "default_subtitle_2")]
    pub subtitle_2: String,
}

/// Identifiers of the page elements the sequencer writes to.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Targets {
    #[serde(default = "default_greeting_target")]
    pub greeting: String,
    #[serde(default = "default_name_target")]
    pub name: String,
    #[serde(default = "default_subtitle_1_target")]
    pub subtitle_1: String,
    #[serde(default = "default_subtitle_2_target")]
    pub subtitle_2: String,
    #[serde(default = "default_call_to_action_target")]
    pub call_to_action: String,
}

/// Timings as written in the config file, in milliseconds.
#[derive(Debug, Clone, Deserialize)]
pub struct TimingsConfig {
    #[serde(default = "default_greeting_char_ms")]
    pub greeting_char_ms: u64,
    #[serde(default = "default_name_pause_ms")]
    pub name_pause_ms: u64,
    #[serde(default = "default_name_char_ms")]
    pub name_char_ms: u64,
    #[serde(default = "default_word_stagger_ms")]
    pub word_stagger_ms: u64,
    #[serde(default = "default_subtitle_pause_ms")]
    pub subtitle_pause_ms: u64,
    #[serde(default = "default_word_fade_ms")]
    pub word_fade_ms: u64,
    #[serde(default = "default_rotation_delay_ms")]
    pub rotation_delay_ms: u64,
    #[serde(default = "default_hold_ms")]
    pub hold_ms: u64,
    #[serde(default = "default_erase_char_ms")]
    pub erase_char_ms: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DisplayConfig {
    #[serde(default = "default_fps")]
    pub fps: u32,
    #[serde(default = "default_width")]
    pub width: i32,
    #[serde(default = "default_height")]
    pub height: i32,
    #[serde(default = "default_call_to_action_label")]
    pub call_to_action_label: String,
}

/// Resolved timings used by the sequencer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timings {
    pub greeting_char: Duration,
    pub name_pause: Duration,
    pub name_char: Duration,
    pub word_stagger: Duration,
    pub subtitle_pause: Duration,
    pub word_fade: Duration,
    pub rotation_delay: Duration,
    pub hold: Duration,
    pub erase_char: Duration,
}

impl Default for Script {
    fn default() -> Self {
        Self {
            greetings: default_greetings(),
            name: default_name(),
            subtitle_1: default_subtitle_1(),
            subtitle_2: default_subtitle_2(),
        }
    }
}

impl Default for Targets {
    fn default() -> Self {
        Self {
            greeting: default_greeting_target(),
            name: default_name_target(),
            subtitle_1: default_subtitle_1_target(),
            subtitle_2: default_subtitle_2_target(),
            call_to_action: default_call_to_action_target(),
        }
    }
}

impl Default for TimingsConfig {
    fn default() -> Self {
        Self {
            greeting_char_ms: default_greeting_char_ms(),
            name_pause_ms: default_name_pause_ms(),
            name_char_ms: default_name_char_ms(),
            word_stagger_ms: default_word_stagger_ms(),
            subtitle_pause_ms: default_subtitle_pause_ms(),
            word_fade_ms: default_word_fade_ms(),
            rotation_delay_ms: default_rotation_delay_ms(),
            hold_ms: default_hold_ms(),
            erase_char_ms: default_erase_char_ms(),
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            fps: default_fps(),
            width: default_width(),
            height: default_height(),
            call_to_action_label: default_call_to_action_label(),
        }
    }
}

impl Default for Timings {
    fn default() -> Self {
        Self {
            greeting_char: Duration::from_millis(GREETING_CHAR_MS),
            name_pause: Duration::from_millis(NAME_PAUSE_MS),
            name_char: Duration::from_millis(NAME_CHAR_MS),
            word_stagger: Duration::from_millis(WORD_STAGGER_MS),
            subtitle_pause: Duration::from_millis(SUBTITLE_PAUSE_MS),
            word_fade: Duration::from_millis(WORD_FADE_MS),
            rotation_delay: Duration::from_millis(ROTATION_DELAY_MS),
            hold: Duration::from_millis(HOLD_MS),
            erase_char: Duration::from_millis(ERASE_CHAR_MS),
        }
    }
}

fn default_greetings() -> Vec<String> {
    ["Hello", "Hola", "Bonjour", "Ciao", "Hallo", "Olá", "Namaste", "Konnichiwa", "Salaam", "Ni hao"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}
fn default_name() -> String { "I'm Arndy".to_string() }
fn default_subtitle_1() -> String { "Video editor and motion designer".to_string() }
fn default_subtitle_2() -> String { "Telling stories one frame at a time".to_string() }

fn default_greeting_target() -> String { "greeting-text".to_string() }
fn default_name_target() -> String { "name-text".to_string() }
fn default_subtitle_1_target() -> String { "subtitle-1".to_string() }
fn default_subtitle_2_target() -> String { "subtitle-2".to_string() }
fn default_call_to_action_target() -> String { "view-work-btn".to_string() }

fn default_greeting_char_ms() -> u64 { GREETING_CHAR_MS }
fn default_name_pause_ms() -> u64 { NAME_PAUSE_MS }
fn default_name_char_ms() -> u64 { NAME_CHAR_MS }
fn default_word_stagger_ms() -> u64 { WORD_STAGGER_MS }
fn default_subtitle_pause_ms() -> u64 { SUBTITLE_PAUSE_MS }
fn default_word_fade_ms() -> u64 { WORD_FADE_MS }
fn default_rotation_delay_ms() -> u64 { ROTATION_DELAY_MS }
fn default_hold_ms() -> u64 { HOLD_MS }
fn default_erase_char_ms() -> u64 { ERASE_CHAR_MS }

fn default_fps() -> u32 { FPS }
fn default_width() -> i32 { RENDER_WIDTH }
fn default_height() -> i32 { RENDER_HEIGHT }
fn default_call_to_action_label() -> String { "View My Work".to_string() }

impl Config {
    /// Reads `path`, or `hero-typewriter.toml` if present, or falls back to defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let config = match path {
            Some(p) => Self::read(p)?,
            None => {
                let default_path = Path::new(DEFAULT_CONFIG_FILE);
                if default_path.is_file() {
                    Self::read(default_path)?
                } else {
                    debug!("No config file found, using defaults");
                    Self::default()
                }
            }
        };
        config.validate()?;
        Ok(config)
    }

    fn read(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: PathBuf::from(path),
            source,
        })?;
        let config: Config = toml::from_str(&content)?;
        info!(path = %path.display(), "Loaded config");
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.script.validate()?;
        self.timings.resolve()?;
        if self.display.fps == 0 {
            return Err(ConfigError::ZeroFrameRate);
        }
        Ok(())
    }
}

impl Script {
    pub fn validate(&self) -> Result<(), ScriptError> {
        if self.greetings.is_empty() {
            return Err(ScriptError::NoGreetings);
        }
        if let Some(index) = self.greetings.iter().position(|g| g.is_empty()) {
            return Err(ScriptError::EmptyGreeting { index });
        }
        for (field, text) in [
            ("name", &self.name),
            ("subtitle_1", &self.subtitle_1),
            ("subtitle_2", &self.subtitle_2),
        ] {
            if text.trim().is_empty() {
                return Err(ScriptError::EmptyField { field });
            }
        }
        Ok(())
    }
}

impl Targets {
    /// Every element the sequencer needs, in the order they are checked.
    pub fn required(&self) -> [&str; 5] {
        [
            self.greeting.as_str(),
            self.name.as_str(),
            self.subtitle_1.as_str(),
            self.subtitle_2.as_str(),
            self.call_to_action.as_str(),
        ]
    }
}

impl Timings {
    /// Per-step intervals must be positive or the driver would never advance time.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, interval) in [
            ("greeting_char", self.greeting_char),
            ("name_char", self.name_char),
            ("word_stagger", self.word_stagger),
            ("erase_char", self.erase_char),
        ] {
            if interval.is_zero() {
                return Err(ConfigError::ZeroInterval { field });
            }
        }
        Ok(())
    }
}

impl TimingsConfig {
    pub fn resolve(&self) -> Result<Timings, ConfigError> {
        let timings = Timings {
            greeting_char: Duration::from_millis(self.greeting_char_ms),
            name_pause: Duration::from_millis(self.name_pause_ms),
            name_char: Duration::from_millis(self.name_char_ms),
            word_stagger: Duration::from_millis(self.word_stagger_ms),
            subtitle_pause: Duration::from_millis(self.subtitle_pause_ms),
            word_fade: Duration::from_millis(self.word_fade_ms),
            rotation_delay: Duration::from_millis(self.rotation_delay_ms),
            hold: Duration::from_millis(self.hold_ms),
            erase_char: Duration::from_millis(self.erase_char_ms),
        };
        timings.validate()?;
        Ok(timings)
    }
}
