use std::time::Duration;

use crate::config::Timings;

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Phase {
    Greeting,  // Typing the first greeting into the greeting slot
    Name,      // Typing the name phrase after the greeting
    Subtitle1, // Revealing the first subtitle word by word
    Subtitle2, // Revealing the second subtitle word by word
    Rotating,  // Erasing and retyping greetings forever
}

impl Phase {
    /// Transition table of the intro. `Rotating` has no successor: it loops on itself.
    pub fn next(self) -> Option<Phase> {
        match self {
            Phase::Greeting => Some(Phase::Name),
            Phase::Name => Some(Phase::Subtitle1),
            Phase::Subtitle1 => Some(Phase::Subtitle2),
            Phase::Subtitle2 => Some(Phase::Rotating),
            Phase::Rotating => None,
        }
    }

    /// Pause between the end of the previous phase and the first step of this one.
    pub fn lead_in(self, timings: &Timings) -> Duration {
        match self {
            Phase::Greeting | Phase::Subtitle1 => Duration::ZERO,
            Phase::Name => timings.name_pause,
            Phase::Subtitle2 => timings.subtitle_pause,
            Phase::Rotating => timings.rotation_delay,
        }
    }

    pub fn is_intro(self) -> bool {
        self != Phase::Rotating
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Stroke {
    Typing,  // Adding one character per step
    Holding, // Fully typed, waiting before erasure
    Erasing, // Removing one character per step
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Status {
    Idle,    // Constructed, never started
    Running, // Steps are scheduled
    Inert,   // A required target was missing, nothing runs
    Stopped, // Cancelled through the stop handle
}

/// The single mutable record of a sequencer run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SequencerState {
    pub phase: Phase,
    pub greeting_index: usize,
    /// Characters typed in the current phase, or words revealed in a subtitle phase.
    pub cursor: usize,
    pub intro_complete: bool,
    /// Only meaningful while `phase` is `Rotating`.
    pub stroke: Stroke,
}

impl SequencerState {
    pub fn new() -> Self {
        Self {
            phase: Phase::Greeting,
            greeting_index: 0,
            cursor: 0,
            intro_complete: false,
            stroke: Stroke::Typing,
        }
    }
}

impl Default for SequencerState {
    fn default() -> Self {
        Self::new()
    }
}
