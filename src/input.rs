use std::collections::HashMap;

/// Keys the game reacts to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    Left,
    Right,
    Fire,
    Start,
}

/// Key-down queries for the current frame.
pub trait Input {
    fn is_key_down(&self, key: Key) -> bool;
}

/// Frames a key stays down after its last press or repeat when the terminal
/// never reports releases. Once auto-repeat is running (15 Hz or faster) the
/// window is refreshed before it lapses at 60 FPS. It does not cover the
/// initial repeat delay (typically 250-600 ms): a held key reads as up from
/// the end of the window until the first repeat arrives. Stretching the
/// window over that delay would make every tap move the ship for half a
/// second. Terminals with keyboard enhancement report releases and never
/// hit this path.
const HOLD_WINDOW: u64 = 6;

/// Tracks which keys are down across frames.
///
/// With release reporting a key is down from its press until its release.
/// Without it, a key is down while its last press or repeat is at most
/// `HOLD_WINDOW` frames old.
#[derive(Clone, Debug)]
pub struct KeyState {
    reports_release: bool,
    frame: u64,
    last_seen: HashMap<Key, u64>,
}

impl KeyState {
    pub fn new(reports_release: bool) -> Self {
        Self {
            reports_release,
            frame: 0,
            last_seen: HashMap::new(),
        }
    }

    /// Records a press or an auto-repeat.
    pub fn press(&mut self, key: Key) {
        self.last_seen.insert(key, self.frame);
    }

    pub fn release(&mut self, key: Key) {
        self.last_seen.remove(&key);
    }

    /// Advances the frame counter; call once per rendered frame.
    pub fn tick(&mut self) {
        self.frame += 1;
        if !self.reports_release {
            let frame = self.frame;
            self.last_seen
                .retain(|_, &mut seen| frame.saturating_sub(seen) <= HOLD_WINDOW);
        }
    }
}

impl Input for KeyState {
    fn is_key_down(&self, key: Key) -> bool {
        self.last_seen.contains_key(&key)
    }
}
