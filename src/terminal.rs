use std::io::{self, Write};

use crossterm::cursor;
use crossterm::queue;
use crossterm::style::{Attribute, Color, Print, ResetColor, SetAttribute, SetForegroundColor};
use crossterm::terminal::{Clear, ClearType};

use crate::config::Targets;
use crate::layout::{self, Tone};
use crate::page::Document;

/// Redraws the hero section in place, one frame at a time.
pub struct TerminalRenderer<W: Write> {
    out: W,
    lines_drawn: u16,
    call_to_action_label: String,
}

impl<W: Write> TerminalRenderer<W> {
    pub fn new(out: W, call_to_action_label: &str) -> Self {
        Self {
            out,
            lines_drawn: 0,
            call_to_action_label: call_to_action_label.to_string(),
        }
    }

    pub fn begin(&mut self) -> io::Result<()> {
        queue!(self.out, cursor::Hide)?;
        self.out.flush()
    }

    pub fn draw(&mut self, document: &Document, targets: &Targets) -> io::Result<()> {
        let lines = layout::compose(document, targets, &self.call_to_action_label);

        // MoveUp(0) still moves one row on some terminals
        if self.lines_drawn > 0 {
            queue!(self.out, cursor::MoveUp(self.lines_drawn))?;
        }

        for line in &lines {
            queue!(self.out, cursor::MoveToColumn(0), Clear(ClearType::CurrentLine))?;
            for span in line {
                let (r, g, b) = span.blended_rgb();
                if matches!(span.tone, Tone::Greeting | Tone::CallToAction) {
                    queue!(self.out, SetAttribute(Attribute::Bold))?;
                }
                queue!(
                    self.out,
                    SetForegroundColor(Color::Rgb { r, g, b }),
                    Print(&span.text),
                    SetAttribute(Attribute::Reset)
                )?;
            }
            queue!(self.out, ResetColor, Print("\r\n"))?;
        }

        self.lines_drawn = lines.len() as u16;
        self.out.flush()
    }

    pub fn finish(&mut self) -> io::Result<()> {
        queue!(self.out, ResetColor, cursor::Show)?;
        self.out.flush()
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}
