//! Greeting/typewriter sequencer.
//!
//! Types a scripted intro (greeting, name, two subtitles) into page targets,
//! then rotates through the greeting list forever. Every step renders once and
//! returns the delay until its successor; `tick` replays all steps due at a
//! given clock time, so the sequence is identical however coarse the ticks are.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use tracing::debug;

use crate::config::{Script, Targets, Timings};
use crate::error::ConfigError;
use crate::page::Page;
use crate::state::{Phase, SequencerState, Status, Stroke};

/// Result of asking the sequencer to start.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StartOutcome {
    Started,
    AlreadyRunning,
    /// Nothing was written. Carries the first missing element id.
    MissingTarget(String),
}

/// Cancels a running sequencer from anywhere, including another thread.
///
/// Stopping bumps a generation counter; steps scheduled under an older
/// generation are dropped on the next tick.
#[derive(Debug, Clone, Default)]
pub struct StopHandle {
    generation: Arc<AtomicU64>,
}

impl StopHandle {
    pub fn stop(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
    }

    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }
}

pub struct Sequencer<P: Page> {
    script: Script,
    name_line: String,
    targets: Targets,
    timings: Timings,
    page: P,

    state: SequencerState,
    status: Status,
    due: Option<Duration>,

    stop: StopHandle,
    generation: u64,
}

impl<P: Page> Sequencer<P> {
    pub fn new(script: Script, targets: Targets, timings: Timings, page: P) -> Result<Self, ConfigError> {
        script.validate()?;
        timings.validate()?;
        // The name continues the greeting line
        let name_line = format!(" {}", script.name.trim_start());

        Ok(Self {
            script,
            name_line,
            targets,
            timings,
            page,
            state: SequencerState::new(),
            status: Status::Idle,
            due: None,
            stop: StopHandle::default(),
            generation: 0,
        })
    }

    /// Starts the intro at `now`. Rotation follows on its own once the intro is done.
    pub fn run_intro(&mut self, now: Duration) -> StartOutcome {
        self.observe_stop();

        if self.status == Status::Running {
            debug!(phase = ?self.state.phase, "Ignoring start, sequencer already running");
            return StartOutcome::AlreadyRunning;
        }

        if let Some(missing) = self.targets.required().into_iter().find(|id| !self.page.contains(id)) {
            debug!(target_id = missing, "Required element missing, sequencer disabled");
            self.status = Status::Inert;
            self.due = None;
            return StartOutcome::MissingTarget(missing.to_string());
        }

        if self.status == Status::Stopped {
            for id in self.targets.required() {
                self.page.clear(id);
            }
        }

        self.state = SequencerState::new();
        self.generation = self.stop.generation();
        self.status = Status::Running;
        self.due = Some(now);
        debug!(generation = self.generation, "Intro started");
        StartOutcome::Started
    }

    /// Runs every step due at or before `now`. Returns how many ran.
    pub fn tick(&mut self, now: Duration) -> usize {
        self.observe_stop();

        let mut steps = 0;
        while let Some(due) = self.due {
            if due > now {
                break;
            }
            let delay = self.step();
            self.due = Some(due + delay);
            steps += 1;
        }
        steps
    }

    pub fn stop_handle(&self) -> StopHandle {
        self.stop.clone()
    }

    pub fn stop(&mut self) {
        self.stop.stop();
        self.observe_stop();
    }

    pub fn next_deadline(&self) -> Option<Duration> {
        self.due
    }

    pub fn state(&self) -> &SequencerState {
        &self.state
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn targets(&self) -> &Targets {
        &self.targets
    }

    pub fn page(&self) -> &P {
        &self.page
    }

    pub fn page_mut(&mut self) -> &mut P {
        &mut self.page
    }

    pub fn into_page(self) -> P {
        self.page
    }

    fn observe_stop(&mut self) {
        if self.status == Status::Running && self.stop.generation() != self.generation {
            debug!(phase = ?self.state.phase, "Sequencer stopped, dropping pending steps");
            self.status = Status::Stopped;
            self.due = None;
        }
    }

    /// Executes the current step and returns the delay before the next one.
    fn step(&mut self) -> Duration {
        match self.state.phase {
            Phase::Greeting => {
                let greeting = &self.script.greetings[self.state.greeting_index];
                if type_next_char(&mut self.page, &self.targets.greeting, greeting, &mut self.state.cursor) {
                    self.timings.greeting_char
                } else {
                    self.advance_phase()
                }
            }
            Phase::Name => {
                if type_next_char(&mut self.page, &self.targets.name, &self.name_line, &mut self.state.cursor) {
                    self.timings.name_char
                } else {
                    self.advance_phase()
                }
            }
            Phase::Subtitle1 => {
                if reveal_next_word(&mut self.page, &self.targets.subtitle_1, &self.script.subtitle_1, &mut self.state.cursor) {
                    self.timings.word_stagger
                } else {
                    self.advance_phase()
                }
            }
            Phase::Subtitle2 => {
                if reveal_next_word(&mut self.page, &self.targets.subtitle_2, &self.script.subtitle_2, &mut self.state.cursor) {
                    self.timings.word_stagger
                } else {
                    self.advance_phase()
                }
            }
            Phase::Rotating => self.rotate(),
        }
    }

    fn advance_phase(&mut self) -> Duration {
        let from = self.state.phase;
        let Some(to) = from.next() else {
            return Duration::ZERO;
        };

        if from == Phase::Subtitle2 {
            self.page.show(&self.targets.call_to_action);
            self.state.intro_complete = true;
            debug!("Intro complete");
        }

        self.state.phase = to;
        self.state.cursor = 0;
        if to == Phase::Rotating {
            // The intro greeting is still on screen: rotation starts by erasing it
            self.state.stroke = Stroke::Erasing;
            self.state.cursor = self.current_greeting().chars().count();
        }

        debug!(from = ?from, to = ?to, "Phase transition");
        to.lead_in(&self.timings)
    }

    /// One step of the perpetual greeting rotation.
    fn rotate(&mut self) -> Duration {
        debug_assert!(self.state.intro_complete && !self.state.phase.is_intro());

        match self.state.stroke {
            Stroke::Typing => {
                let greeting = &self.script.greetings[self.state.greeting_index];
                if type_next_char(&mut self.page, &self.targets.greeting, greeting, &mut self.state.cursor) {
                    self.timings.greeting_char
                } else {
                    self.state.stroke = Stroke::Holding;
                    self.timings.hold
                }
            }
            Stroke::Holding => {
                self.state.stroke = Stroke::Erasing;
                Duration::ZERO
            }
            Stroke::Erasing => {
                if self.state.cursor > 0 {
                    self.state.cursor -= 1;
                    let shown = char_prefix(self.current_greeting(), self.state.cursor).to_string();
                    self.page.set_text(&self.targets.greeting, &shown);
                    self.timings.erase_char
                } else {
                    self.state.greeting_index = (self.state.greeting_index + 1) % self.script.greetings.len();
                    self.state.stroke = Stroke::Typing;
                    debug!(index = self.state.greeting_index, "Rotating to next greeting");
                    Duration::ZERO
                }
            }
        }
    }

    fn current_greeting(&self) -> &str {
        &self.script.greetings[self.state.greeting_index]
    }
}

/// Writes one more character of `text`. Returns false once `text` was already complete.
fn type_next_char<P: Page>(page: &mut P, id: &str, text: &str, cursor: &mut usize) -> bool {
    if *cursor >= text.chars().count() {
        return false;
    }
    *cursor += 1;
    page.set_text(id, char_prefix(text, *cursor));
    true
}

/// Appends the next word of `text` with its trailing space. Returns false when none is left.
fn reveal_next_word<P: Page>(page: &mut P, id: &str, text: &str, cursor: &mut usize) -> bool {
    let Some(word) = text.split_whitespace().nth(*cursor) else {
        return false;
    };
    *cursor += 1;
    page.append_word(id, &format!("{} ", word));
    true
}

fn char_prefix(text: &str, chars: usize) -> &str {
    match text.char_indices().nth(chars) {
        Some((end, _)) => &text[..end],
        None => text,
    }
}
