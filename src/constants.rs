pub const RENDER_WIDTH: i32 = 1280;           // Width of the window renderer
pub const RENDER_HEIGHT: i32 = 720;           // Height of the window renderer
pub const FPS: u32 = 60;                      // Frames per second

pub const GREETING_CHAR_MS: u64 = 150;        // Typing speed of the greeting word (per char)
pub const NAME_PAUSE_MS: u64 = 300;           // Pause between greeting and name
pub const NAME_CHAR_MS: u64 = 120;            // Typing speed of the name phrase (per char)
pub const WORD_STAGGER_MS: u64 = 100;         // Delay between subtitle word insertions
pub const SUBTITLE_PAUSE_MS: u64 = 500;       // Pause between the two subtitles
pub const WORD_FADE_MS: u64 = 600;            // Fade-in duration of a single subtitle word
pub const ROTATION_DELAY_MS: u64 = 3000;      // Delay between intro completion and rotation
pub const HOLD_MS: u64 = 2000;                // Time a rotated greeting stays fully typed
pub const ERASE_CHAR_MS: u64 = 50;            // Erase speed of a rotated greeting (per char)

pub const HEADLESS_DURATION: f32 = 10.0;      // Simulated seconds for a headless run
