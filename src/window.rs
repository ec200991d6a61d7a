use anyhow::{Result, anyhow};
use raylib::prelude::*;

use crate::config::{DisplayConfig, Targets};
use crate::layout::{self, BACKGROUND, Span};
use crate::page::Document;

const HEADLINE_SIZE: i32 = 72;
const SUBTITLE_SIZE: i32 = 32;
const BUTTON_SIZE: i32 = 28;
const LINE_GAP: i32 = 24;

/// Raylib window showing the hero section, drawn through a fixed size framebuffer.
pub struct WindowRenderer {
    rl: RaylibHandle,
    thread: RaylibThread,
    framebuffer: RenderTexture2D,
    call_to_action_label: String,
}

impl WindowRenderer {
    pub fn open(display: &DisplayConfig) -> Result<Self> {
        let (mut rl, thread) = raylib::init()
            .size(display.width / 2, display.height / 2)
            .title("Hero Typewriter")
            .vsync()
            .resizable()
            .build();
        rl.set_target_fps(display.fps);
        rl.set_trace_log(TraceLogLevel::LOG_ERROR);

        let framebuffer = rl
            .load_render_texture(&thread, display.width as u32, display.height as u32)
            .map_err(|e| anyhow!("Failed to create render texture: {}", e))?;

        Ok(Self {
            rl,
            thread,
            framebuffer,
            call_to_action_label: display.call_to_action_label.clone(),
        })
    }

    pub fn should_close(&self) -> bool {
        self.rl.window_should_close()
    }

    pub fn frame_time(&self) -> f32 {
        self.rl.get_frame_time()
    }

    pub fn draw(&mut self, document: &Document, targets: &Targets) {
        let lines = layout::compose(document, targets, &self.call_to_action_label);
        let width = self.framebuffer.width();
        let height = self.framebuffer.height();
        let thread = &self.thread;

        self.rl.draw_texture_mode(thread, &mut self.framebuffer, |mut tmd| {
            let mut d = tmd.begin_drawing(thread);
            let (r, g, b) = BACKGROUND;
            d.clear_background(Color::new(r, g, b, 255));

            // Vertically centre the block of four lines
            let sizes = [HEADLINE_SIZE, SUBTITLE_SIZE, SUBTITLE_SIZE, BUTTON_SIZE];
            let block: i32 = sizes.iter().sum::<i32>() + LINE_GAP * (sizes.len() as i32 - 1);
            let mut y = (height - block) / 2;

            for (line, size) in lines.iter().zip(sizes) {
                let line_width: i32 = line.iter().map(|span| measure_text(&span.text, size)).sum();
                let mut x = (width - line_width) / 2;
                for span in line {
                    d.draw_text(&span.text, x, y, size, span_color(span));
                    x += measure_text(&span.text, size);
                }
                y += size + LINE_GAP;
            }
        });

        // Framebuffer is stored upside down, flip it while scaling to the window
        let mut d = self.rl.begin_drawing(&self.thread);
        let sw = d.get_screen_width() as f32;
        let sh = d.get_screen_height() as f32;
        d.draw_texture_pro(
            &self.framebuffer,
            Rectangle::new(0.0, 0.0, width as f32, -(height as f32)),
            Rectangle::new(0.0, 0.0, sw, sh),
            Vector2::new(0.0, 0.0),
            0.0,
            Color::WHITE,
        );
    }
}

fn span_color(span: &Span) -> Color {
    let (r, g, b, a) = span.rgba();
    Color::new(r, g, b, a)
}
