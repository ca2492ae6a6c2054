mod app;
mod event;
mod ui;

use std::fs::File;
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    cursor::Show,
    event::{KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags},
    execute,
    terminal::{
        disable_raw_mode, enable_raw_mode, supports_keyboard_enhancement, EnterAlternateScreen,
        LeaveAlternateScreen,
    },
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tracing::info;
use tracing_subscriber::EnvFilter;

use app::App;
use event::{game_key, Event, EventHandler};
use invaders::{KeyState, WaveConfig};

#[derive(Parser, Debug)]
#[command(version, about = "Defend the line against a marching alien wave")]
struct Args {
    /// Seed for reproducible waves.
    #[arg(long)]
    seed: Option<u64>,

    /// Frames per second.
    #[arg(long, default_value_t = 60, value_parser = clap::value_parser!(u64).range(1..=240))]
    fps: u64,

    /// Write tracing output to this file.
    #[arg(long)]
    log_file: Option<PathBuf>,
}

type Backend = CrosstermBackend<io::Stdout>;

fn main() -> Result<()> {
    let args = Args::parse();

    if let Some(path) = &args.log_file {
        let file = File::create(path)
            .with_context(|| format!("failed to create log file {}", path.display()))?;
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
            )
            .with_writer(Mutex::new(file))
            .with_ansi(false)
            .init();
    }

    enable_raw_mode().context("failed to enable raw mode")?;
    let reports_release = supports_keyboard_enhancement().unwrap_or(false);
    let result = setup_and_run(&args, reports_release);
    let restored = restore_terminal(reports_release).context("failed to restore terminal");
    result.and(restored)
}

fn setup_and_run(args: &Args, reports_release: bool) -> Result<()> {
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("failed to enter alternate screen")?;
    if reports_release {
        execute!(
            stdout,
            PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES)
        )?;
    }
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    info!(seed = ?args.seed, fps = args.fps, reports_release, "starting");
    run(&mut terminal, args, reports_release)
}

/// Undoes every terminal mode change, even after a failed step, and reports
/// the first failure.
fn restore_terminal(reports_release: bool) -> io::Result<()> {
    let mut stdout = io::stdout();
    let mut pop = || {
        if reports_release {
            execute!(io::stdout(), PopKeyboardEnhancementFlags)
        } else {
            Ok(())
        }
    };
    let mut leave = || execute!(stdout, LeaveAlternateScreen, Show);
    let mut raw = disable_raw_mode;
    let mut steps: [Step<'_>; 3] = [&mut pop, &mut raw, &mut leave];
    run_all(&mut steps)
}

type Step<'a> = &'a mut dyn FnMut() -> io::Result<()>;

fn run_all(steps: &mut [Step<'_>]) -> io::Result<()> {
    let mut first = Ok(());
    for step in steps.iter_mut() {
        let outcome = step();
        if first.is_ok() {
            first = outcome;
        }
    }
    first
}

fn run(terminal: &mut Terminal<Backend>, args: &Args, reports_release: bool) -> Result<()> {
    let mut app = App::new(WaveConfig::default(), args.seed);
    let mut keys = KeyState::new(reports_release);
    let events = EventHandler::new(Duration::from_millis(1000 / args.fps));
    let mut last_frame = Instant::now();

    loop {
        terminal.draw(|frame| ui::render(frame, &app))?;

        match events.next()? {
            Event::Tick => {
                let now = Instant::now();
                let dt = now.duration_since(last_frame).as_secs_f64();
                last_frame = now;
                app.update(&keys, dt)?;
                keys.tick();
            }
            Event::Key(key) => {
                app.on_key(key);
                if let Some(key) = game_key(key.code) {
                    keys.press(key);
                }
            }
            Event::Release(key) => {
                if let Some(key) = game_key(key.code) {
                    keys.release(key);
                }
            }
        }

        if app.should_quit {
            info!("quit");
            return Ok(());
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;

    #[test]
    fn every_restore_step_runs_after_a_failure() {
        let ran = RefCell::new(Vec::new());
        let mut first = || -> io::Result<()> {
            ran.borrow_mut().push(1);
            Err(io::Error::new(io::ErrorKind::Other, "first"))
        };
        let mut second = || -> io::Result<()> {
            ran.borrow_mut().push(2);
            Err(io::Error::new(io::ErrorKind::Other, "second"))
        };
        let mut third = || -> io::Result<()> {
            ran.borrow_mut().push(3);
            Ok(())
        };
        let mut steps: [Step<'_>; 3] = [&mut first, &mut second, &mut third];
        let result = run_all(&mut steps);
        assert_eq!(*ran.borrow(), vec![1, 2, 3]);
        assert_eq!(result.unwrap_err().to_string(), "first");
    }

    #[test]
    fn clean_restore_is_ok() {
        let mut ok = || -> io::Result<()> { Ok(()) };
        let mut steps: [Step<'_>; 1] = [&mut ok];
        assert!(run_all(&mut steps).is_ok());
    }
}
