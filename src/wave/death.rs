//! Ship death animation.

/// Result of feeding the sequencer one frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DeathTick {
    pub frame: u32,
    pub done: bool,
}

/// Step-driven explosion animation. It only advances when fed a frame delta.
#[derive(Clone, Debug, PartialEq)]
pub struct DeathSequencer {
    elapsed: f64,
    duration: f64,
    frames: u32,
}

impl DeathSequencer {
    /// Starts at zero elapsed time.
    pub fn new(duration: f64, frames: u32) -> Self {
        Self {
            elapsed: 0.0,
            duration,
            frames: frames.max(1),
        }
    }

    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    /// Current sprite frame, `floor(elapsed / duration * frames)` clamped to
    /// the last frame.
    pub fn frame(&self) -> u32 {
        if self.duration <= 0.0 {
            return self.frames - 1;
        }
        let fraction = (self.elapsed / self.duration).clamp(0.0, 1.0);
        ((fraction * self.frames as f64) as u32).min(self.frames - 1)
    }

    pub fn tick(&mut self, dt: f64) -> DeathTick {
        self.elapsed += dt;
        DeathTick {
            frame: self.frame(),
            done: self.elapsed >= self.duration,
        }
    }
}
