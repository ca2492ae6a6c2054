use std::io;
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use crossterm::event::{self, KeyCode, KeyEvent, KeyEventKind};

use invaders::Key;

pub enum Event {
    /// A press or an auto-repeat.
    Key(KeyEvent),
    Release(KeyEvent),
    Tick,
}

pub struct EventHandler {
    rx: mpsc::Receiver<Event>,
}

impl EventHandler {
    pub fn new(tick_rate: Duration) -> Self {
        let (tx, rx) = mpsc::channel();

        thread::spawn(move || {
            let mut last_tick = Instant::now();
            loop {
                // Keep ticking on schedule even while key repeats stream in.
                let timeout = tick_rate.saturating_sub(last_tick.elapsed());
                if event::poll(timeout).unwrap_or(false) {
                    if let Ok(event::Event::Key(key)) = event::read() {
                        let forwarded = match key.kind {
                            KeyEventKind::Press | KeyEventKind::Repeat => Event::Key(key),
                            KeyEventKind::Release => Event::Release(key),
                        };
                        if tx.send(forwarded).is_err() {
                            return;
                        }
                    }
                }
                if last_tick.elapsed() >= tick_rate {
                    last_tick = Instant::now();
                    if tx.send(Event::Tick).is_err() {
                        return;
                    }
                }
            }
        });

        Self { rx }
    }

    pub fn next(&self) -> io::Result<Event> {
        self.rx
            .recv()
            .map_err(|e| io::Error::new(io::ErrorKind::Other, e))
    }
}

/// Game keys: arrows or A/D to move, space or up to fire, S or Enter to
/// start.
pub fn game_key(code: KeyCode) -> Option<Key> {
    match code {
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => Some(Key::Left),
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => Some(Key::Right),
        KeyCode::Char(' ') | KeyCode::Up => Some(Key::Fire),
        KeyCode::Char('s') | KeyCode::Char('S') | KeyCode::Enter => Some(Key::Start),
        _ => None,
    }
}
