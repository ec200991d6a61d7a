//! Typewriter hero animation: a greeting, a name and two subtitles typed into
//! a page, followed by an endless rotation through greetings in many languages.
//!
//! ```no_run
//! use std::time::Duration;
//! use hero_typewriter::{Config, Document, Sequencer};
//!
//! let config = Config::default();
//! let timings = config.timings.resolve().unwrap();
//! let page = Document::with_targets(config.targets.required());
//! let mut sequencer = Sequencer::new(config.script, config.targets, timings, page).unwrap();
//!
//! sequencer.run_intro(Duration::ZERO);
//! sequencer.tick(Duration::from_secs(5));
//! ```

pub mod clock;
pub mod config;
pub mod constants;
pub mod error;
pub mod layout;
pub mod page;
pub mod sequencer;
pub mod state;
pub mod telemetry;
pub mod terminal;
#[cfg(feature = "window")]
pub mod window;

pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{Config, Script, Targets, Timings};
pub use error::{ConfigError, ScriptError};
pub use page::{Document, Mutation, Page};
pub use sequencer::{Sequencer, StartOutcome, StopHandle};
pub use state::{Phase, SequencerState, Status, Stroke};
