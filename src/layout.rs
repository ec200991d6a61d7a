use crate::config::Targets;
use crate::page::Document;

pub const BACKGROUND: (u8, u8, u8) = (18, 18, 24);

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Tone {
    Greeting,
    Name,
    Subtitle,
    CallToAction,
}

impl Tone {
    pub fn rgb(self) -> (u8, u8, u8) {
        match self {
            Tone::Greeting => (255, 200, 87),
            Tone::Name => (240, 240, 240),
            Tone::Subtitle => (190, 190, 200),
            Tone::CallToAction => (94, 200, 230),
        }
    }
}

/// A run of text drawn in one style.
#[derive(Debug, Clone, PartialEq)]
pub struct Span {
    pub text: String,
    pub tone: Tone,
    pub opacity: f32,
}

impl Span {
    /// Span colour mixed into the background by its opacity, for outputs without alpha.
    pub fn blended_rgb(&self) -> (u8, u8, u8) {
        let (br, bg, bb) = BACKGROUND;
        let (r, g, b) = self.tone.rgb();
        let t = self.opacity.clamp(0.0, 1.0);
        let mix = |from: u8, to: u8| (from as f32 + (to as f32 - from as f32) * t).round() as u8;
        (mix(br, r), mix(bg, g), mix(bb, b))
    }

    /// Span colour with its opacity as alpha, for outputs that blend.
    pub fn rgba(&self) -> (u8, u8, u8, u8) {
        let (r, g, b) = self.tone.rgb();
        let alpha = (self.opacity.clamp(0.0, 1.0) * 255.0).round() as u8;
        (r, g, b, alpha)
    }
}

/// Hero section as four lines: greeting + name, both subtitles, and the button.
pub fn compose(document: &Document, targets: &Targets, call_to_action_label: &str) -> Vec<Vec<Span>> {
    let mut lines = Vec::with_capacity(4);

    let mut headline = Vec::new();
    for (id, tone) in [(&targets.greeting, Tone::Greeting), (&targets.name, Tone::Name)] {
        if let Some(text) = document.text(id) {
            if !text.is_empty() {
                headline.push(Span { text: text.to_string(), tone, opacity: 1.0 });
            }
        }
    }
    lines.push(headline);

    for id in [&targets.subtitle_1, &targets.subtitle_2] {
        let spans: Vec<Span> = document
            .slot(id)
            .map(|slot| {
                slot.words
                    .iter()
                    .map(|word| Span {
                        text: word.text.clone(),
                        tone: Tone::Subtitle,
                        opacity: document.opacity(word),
                    })
                    .collect()
            })
            .unwrap_or_default();
        lines.push(spans);
    }

    let mut button = Vec::new();
    if document.is_visible(&targets.call_to_action) {
        button.push(Span {
            text: format!("[ {} ]", call_to_action_label),
            tone: Tone::CallToAction,
            opacity: 1.0,
        });
    }
    lines.push(button);

    lines
}
