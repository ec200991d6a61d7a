use std::io;
use std::path::PathBuf;
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use tracing::{info, warn};

use hero_typewriter::clock::{Clock, ManualClock, SystemClock};
use hero_typewriter::config::{Config, DisplayConfig};
use hero_typewriter::constants::HEADLESS_DURATION;
use hero_typewriter::layout;
use hero_typewriter::page::Document;
use hero_typewriter::sequencer::{Sequencer, StartOutcome};
use hero_typewriter::state::Status;
use hero_typewriter::telemetry;
use hero_typewriter::terminal::TerminalRenderer;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum RendererKind {
    /// Redraw the hero section in place on stdout
    Terminal,
    /// Open a raylib window (needs the `window` feature)
    Window,
    /// Simulate time without drawing and print the final frame
    Headless,
}

#[derive(Debug, Parser)]
#[command(name = "hero-typewriter", version, about = "Typewriter hero animation with rotating greetings")]
struct Cli {
    /// Config file (defaults to ./hero-typewriter.toml when present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[arg(short, long, value_enum, default_value_t = RendererKind::Terminal)]
    renderer: RendererKind,

    /// Stop after this many seconds (headless defaults to 10)
    #[arg(short, long, value_parser = parse_seconds)]
    duration: Option<f32>,

    /// Log at info level unless RUST_LOG says otherwise
    #[arg(short, long)]
    verbose: bool,
}

fn parse_seconds(value: &str) -> Result<f32, String> {
    let seconds: f32 = value.parse().map_err(|e| format!("{}", e))?;
    if !seconds.is_finite() || seconds < 0.0 {
        return Err(format!("expected a finite, non-negative number of seconds, got {}", value));
    }
    Ok(seconds)
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    telemetry::init_tracing(cli.verbose);

    let config = Config::load(cli.config.as_deref()).context("Failed to load configuration")?;
    let timings = config.timings.resolve()?;

    let document = Document::with_targets(config.targets.required()).with_fade(timings.word_fade);
    let mut sequencer = Sequencer::new(config.script.clone(), config.targets.clone(), timings, document)
        .context("Invalid script")?;

    info!(renderer = ?cli.renderer, greetings = config.script.greetings.len(), "Starting");

    match cli.renderer {
        RendererKind::Headless => run_headless(&mut sequencer, &config.display, cli.duration),
        RendererKind::Terminal => run_terminal(&mut sequencer, &config.display, cli.duration),
        RendererKind::Window => run_window(&mut sequencer, &config.display, cli.duration),
    }
}

fn start(sequencer: &mut Sequencer<Document>, now: Duration) {
    if let StartOutcome::MissingTarget(id) = sequencer.run_intro(now) {
        warn!(target_id = %id, "Page is missing an element, nothing will be animated");
    }
}

fn expired(duration: Option<f32>, now: Duration) -> bool {
    duration.is_some_and(|limit| now.as_secs_f32() >= limit)
}


fn run_headless(sequencer: &mut Sequencer<Document>, display: &DisplayConfig, duration: Option<f32>) -> Result<()> {
    let clock = ManualClock::new();
    let frame = Duration::from_secs_f32(1.0 / display.fps as f32);
    let limit = duration.unwrap_or(HEADLESS_DURATION);

    start(sequencer, clock.now());
    while !expired(Some(limit), clock.now()) {
        clock.advance(frame);
        sequencer.tick(clock.now());
        sequencer.page_mut().update(frame.as_secs_f32());
    }

    let state = sequencer.state();
    info!(phase = ?state.phase, index = state.greeting_index, "Simulation finished");

    for line in layout::compose(sequencer.page(), sequencer.targets(), &display.call_to_action_label) {
        let text: String = line.iter().map(|span| span.text.as_str()).collect();
        println!("{}", text);
    }
    Ok(())
}

fn run_terminal(sequencer: &mut Sequencer<Document>, display: &DisplayConfig, duration: Option<f32>) -> Result<()> {
    let clock = SystemClock::new();
    let frame = Duration::from_secs_f32(1.0 / display.fps as f32);

    let handle = sequencer.stop_handle();
    ctrlc::set_handler(move || handle.stop()).context("Failed to install Ctrl-C handler")?;

    let mut renderer = TerminalRenderer::new(io::stdout(), &display.call_to_action_label);
    renderer.begin()?;

    start(sequencer, clock.now());
    let mut last = clock.now();
    loop {
        let now = clock.now();
        sequencer.tick(now);
        sequencer.page_mut().update((now - last).as_secs_f32());
        last = now;

        renderer.draw(sequencer.page(), sequencer.targets())?;

        if sequencer.status() != Status::Running || expired(duration, now) {
            break;
        }
        thread::sleep(frame);
    }

    renderer.finish()?;
    Ok(())
}

#[cfg(feature = "window")]
fn run_window(sequencer: &mut Sequencer<Document>, display: &DisplayConfig, duration: Option<f32>) -> Result<()> {
    use hero_typewriter::window::WindowRenderer;

    let clock = SystemClock::new();
    let mut window = WindowRenderer::open(display)?;

    start(sequencer, clock.now());
    while !window.should_close() && !expired(duration, clock.now()) {
        sequencer.tick(clock.now());
        sequencer.page_mut().update(window.frame_time());
        window.draw(sequencer.page(), sequencer.targets());
    }
    sequencer.stop();
    Ok(())
}

#[cfg(not(feature = "window"))]
fn run_window(_: &mut Sequencer<Document>, _: &DisplayConfig, _: Option<f32>) -> Result<()> {
    anyhow::bail!("this build has no window renderer, rebuild with `--features window`")
}
