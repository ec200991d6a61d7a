use std::path::PathBuf;
use thiserror::Error;

/// Problems with the text a sequencer is asked to type.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ScriptError {
    #[error("Greeting list is empty")]
    NoGreetings,

    #[error("Greeting #{index} is empty")]
    EmptyGreeting { index: usize },

    #[error("Field '{field}' must contain text")]
    EmptyField { field: &'static str },
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config from {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid script: {0}")]
    Script(#[from] ScriptError),

    #[error("Timing '{field}' must be greater than zero")]
    ZeroInterval { field: &'static str },

    #[error("Frame rate must be greater than zero")]
    ZeroFrameRate,
}
