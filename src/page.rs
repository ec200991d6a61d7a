use std::collections::BTreeMap;
use std::time::Duration;

use crate::constants::*;

/// The hosting page as seen by the sequencer: elements looked up by id.
///
/// Writes to an id the page does not contain are ignored, like a failed
/// element lookup.
pub trait Page {
    fn contains(&self, id: &str) -> bool;

    /// Replaces the whole text content of an element.
    fn set_text(&mut self, id: &str, text: &str);

    /// Appends a word that fades in on its own.
    fn append_word(&mut self, id: &str, word: &str);

    /// Empties an element and hides it again.
    fn clear(&mut self, id: &str);

    /// Marks an element (the call-to-action) as visible.
    fn show(&mut self, id: &str);
}

#[derive(Debug, Clone, PartialEq)]
pub struct Word {
    pub text: String,
    pub age: f32, // Seconds since insertion
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Slot {
    pub text: String,
    pub words: Vec<Word>,
    pub visible: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mutation {
    Text { target: String, text: String },
    Shown { target: String },
}

/// In-memory page holding one slot per element id.
#[derive(Debug, Clone)]
pub struct Document {
    slots: BTreeMap<String, Slot>,
    fade_duration: f32,
    mutations: u64,
    journal: Option<Vec<Mutation>>,
}

impl Document {
    pub fn new() -> Self {
        Self {
            slots: BTreeMap::new(),
            fade_duration: WORD_FADE_MS as f32 / 1000.0,
            mutations: 0,
            journal: None,
        }
    }

    pub fn with_targets<'a, I>(ids: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut document = Self::new();
        for id in ids {
            document.insert(id);
        }
        document
    }

    pub fn with_fade(mut self, fade: Duration) -> Self {
        self.fade_duration = fade.as_secs_f32();
        self
    }

    /// Keeps every mutation so the order of writes can be inspected.
    /// Grows without bound while rotating, so only use it for finite runs.
    pub fn recording(mut self) -> Self {
        self.journal = Some(Vec::new());
        self
    }

    pub fn insert(&mut self, id: &str) {
        self.slots.entry(id.to_string()).or_default();
    }

    pub fn remove(&mut self, id: &str) -> Option<Slot> {
        self.slots.remove(id)
    }

    pub fn slot(&self, id: &str) -> Option<&Slot> {
        self.slots.get(id)
    }

    pub fn text(&self, id: &str) -> Option<&str> {
        self.slots.get(id).map(|slot| slot.text.as_str())
    }

    pub fn is_visible(&self, id: &str) -> bool {
        self.slots.get(id).is_some_and(|slot| slot.visible)
    }

    /// Number of writes that hit an existing element.
    pub fn mutations(&self) -> u64 {
        self.mutations
    }

    pub fn journal(&self) -> &[Mutation] {
        self.journal.as_deref().unwrap_or(&[])
    }

    /// Advances word fade-ins by `dt` seconds.
    pub fn update(&mut self, dt: f32) {
        for slot in self.slots.values_mut() {
            for word in slot.words.iter_mut() {
                if word.age < self.fade_duration {
                    word.age += dt;
                }
            }
        }
    }

    /// 0.0 when just inserted, 1.0 once fully faded in.
    pub fn opacity(&self, word: &Word) -> f32 {
        if self.fade_duration <= 0.0 {
            return 1.0;
        }
        (word.age / self.fade_duration).clamp(0.0, 1.0)
    }

    fn record_text(&mut self, id: &str) {
        self.mutations += 1;
        if let (Some(journal), Some(slot)) = (self.journal.as_mut(), self.slots.get(id)) {
            journal.push(Mutation::Text {
                target: id.to_string(),
                text: slot.text.clone(),
            });
        }
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Page for Document {
    fn contains(&self, id: &str) -> bool {
        self.slots.contains_key(id)
    }

    fn set_text(&mut self, id: &str, text: &str) {
        let Some(slot) = self.slots.get_mut(id) else {
            return;
        };
        slot.text.clear();
        slot.text.push_str(text);
        slot.words.clear();
        self.record_text(id);
    }

    fn append_word(&mut self, id: &str, word: &str) {
        let Some(slot) = self.slots.get_mut(id) else {
            return;
        };
        slot.text.push_str(word);
        slot.words.push(Word {
            text: word.to_string(),
            age: 0.0,
        });
        self.record_text(id);
    }

    fn clear(&mut self, id: &str) {
        let Some(slot) = self.slots.get_mut(id) else {
            return;
        };
        *slot = Slot::default();
        self.record_text(id);
    }

    fn show(&mut self, id: &str) {
        let Some(slot) = self.slots.get_mut(id) else {
            return;
        };
        slot.visible = true;
        self.mutations += 1;
        if let Some(journal) = self.journal.as_mut() {
            journal.push(Mutation::Shown {
                target: id.to_string(),
            });
        }
    }
}
