//! Terminal runner (default binary).
//!
//! Crossterm input, a framebuffer renderer, and a fixed simulation tick.
//! Optionally records one JSON snapshot per locked piece, or replays a
//! recorded intent log headlessly.

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use anyhow::{anyhow, Result};
use crossterm::event::{self, Event, KeyEventKind};

use blockwell::core::{shapes, Game};
use blockwell::input::{map_key, should_quit};
use blockwell::record::{JsonDirRecorder, LockSink};
use blockwell::replay;
use blockwell::term::{FrameBuffer, GameView, TerminalRenderer, Viewport};
use blockwell::types::TICK_MS;

const USAGE: &str = "\
blockwell [options]

Options:
  --seed <u32>     piece bag seed (default 1)
  --record <dir>   write one JSON snapshot per locked piece under <dir>
  --replay <file>  run a recorded intent log headlessly and print the locks
  -h, --help       show this help
";

#[derive(Debug)]
struct RunConfig {
    seed: u32,
    record_root: Option<PathBuf>,
    replay: Option<PathBuf>,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            seed: 1,
            record_root: None,
            replay: None,
        }
    }
}

/// Returns `Ok(None)` when the caller asked for help.
fn parse_args(args: &[String]) -> Result<Option<RunConfig>> {
    let mut config = RunConfig::default();
    let mut i = 0usize;
    while i < args.len() {
        match args[i].as_str() {
            "-h" | "--help" => return Ok(None),
            "--seed" => {
                i += 1;
                let v = args
                    .get(i)
                    .ok_or_else(|| anyhow!("missing value for --seed"))?;
                config.seed = v
                    .parse::<u32>()
                    .map_err(|_| anyhow!("invalid --seed value: {}", v))?;
            }
            "--record" => {
                i += 1;
                let v = args
                    .get(i)
                    .ok_or_else(|| anyhow!("missing value for --record"))?;
                config.record_root = Some(PathBuf::from(v));
            }
            "--replay" => {
                i += 1;
                let v = args
                    .get(i)
                    .ok_or_else(|| anyhow!("missing value for --replay"))?;
                config.replay = Some(PathBuf::from(v));
            }
            other => {
                return Err(anyhow!("unknown argument: {} (try --help)", other));
            }
        }
        i += 1;
    }
    Ok(Some(config))
}

struct SessionReport {
    score: u32,
    turns: u32,
    sink_failures: u32,
    last_sink_error: Option<String>,
}

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let config = match parse_args(&args)? {
        Some(config) => config,
        None => {
            print!("{}", USAGE);
            return Ok(());
        }
    };

    shapes::validate().map_err(|e| anyhow!("shape catalog: {}", e.message()))?;

    if let Some(path) = &config.replay {
        return run_replay(path);
    }

    let mut recorder = match &config.record_root {
        Some(root) => Some(JsonDirRecorder::create_session(root)?),
        None => None,
    };

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let outcome = run(&mut term, config.seed, &mut recorder);

    // Always try to restore terminal state.
    let _ = term.exit();

    let report = outcome?;
    println!("final score {} over {} locks", report.score, report.turns);
    if let Some(recorder) = &recorder {
        println!("snapshots written to {}", recorder.dir().display());
    }
    if report.sink_failures > 0 {
        let detail = report
            .last_sink_error
            .map(|e| format!(" (last: {})", e))
            .unwrap_or_default();
        eprintln!(
            "recorder: {} snapshot writes failed{}",
            report.sink_failures, detail
        );
    }
    Ok(())
}

fn run_replay(path: &Path) -> Result<()> {
    let log = replay::load_log(path)?;
    let records = replay::run_log(&log);
    for record in &records {
        println!("turn {:>4}  score {:>8}", record.turn, record.score);
    }
    println!("{} locks replayed from {}", records.len(), path.display());
    Ok(())
}

fn run(
    term: &mut TerminalRenderer,
    seed: u32,
    recorder: &mut Option<JsonDirRecorder>,
) -> Result<SessionReport> {
    let mut game = Game::new(seed);
    let view = GameView::default();
    let mut frame = FrameBuffer::new(0, 0);

    let mut sink_failures = 0u32;
    let mut last_sink_error: Option<String> = None;

    let mut last_tick = Instant::now();
    let tick_duration = Duration::from_millis(TICK_MS as u64);

    loop {
        // Render.
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        view.render_into(&game, Viewport::new(w, h), &mut frame);
        term.draw_swap(&mut frame)?;

        // Input with timeout until the next tick.
        let timeout = tick_duration
            .checked_sub(last_tick.elapsed())
            .unwrap_or_else(|| Duration::from_secs(0));

        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) => {
                    // Terminal auto-repeat stands in for held-key movement.
                    if matches!(key.kind, KeyEventKind::Press | KeyEventKind::Repeat) {
                        if should_quit(key) {
                            break;
                        }
                        if let Some(intent) = map_key(key) {
                            game.apply(intent);
                        }
                    }
                }
                Event::Resize(_, _) => term.invalidate(),
                _ => {}
            }
        }

        // Tick.
        if last_tick.elapsed() >= tick_duration {
            last_tick = Instant::now();
            game.tick(TICK_MS);

            if let Some(record) = game.take_lock_record() {
                if let Some(recorder) = recorder.as_mut() {
                    if let Err(e) = recorder.record(&record) {
                        sink_failures += 1;
                        last_sink_error = Some(e.to_string());
                    }
                }
            }
        }
    }

    Ok(SessionReport {
        score: game.score(),
        turns: game.turn(),
        sink_failures,
        last_sink_error,
    })
}
