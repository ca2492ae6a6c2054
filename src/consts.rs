//! Game constants. Coordinates are in play-area units with the origin at the
//! bottom-left corner and y growing upward.

// ── Play area ────────────────────────────────────────────────────────────────

pub const GAME_WIDTH: f64 = 800.0;
pub const GAME_HEIGHT: f64 = 700.0;

/// Horizontal threshold the aliens must never reach.
pub const DEFENSE_LINE: f64 = 100.0;

// ── Ship ─────────────────────────────────────────────────────────────────────

pub const SHIP_WIDTH: f64 = 44.0;
pub const SHIP_HEIGHT: f64 = 44.0;
/// y of the ship's center.
pub const SHIP_BOTTOM: f64 = 32.0;
/// Horizontal distance per frame while a direction key is held.
pub const SHIP_MOVEMENT: f64 = 5.0;
pub const SHIP_LIVES: u32 = 3;

/// Seconds the death animation runs before the ship is removed.
pub const DEATH_SPEED: f64 = 0.5;
pub const SHIP_DEATH_FRAMES: u32 = 7;

// ── Aliens ───────────────────────────────────────────────────────────────────

pub const ALIEN_WIDTH: f64 = 33.0;
pub const ALIEN_HEIGHT: f64 = 33.0;
pub const ALIEN_H_SEP: f64 = 16.0;
pub const ALIEN_V_SEP: f64 = 16.0;
/// Gap between the top of the play area and the first row.
pub const ALIEN_CEILING: f64 = 100.0;
pub const ALIEN_ROWS: usize = 5;
pub const ALIENS_IN_ROW: usize = 12;

pub const ALIEN_H_WALK: f64 = 8.0;
pub const ALIEN_V_WALK: f64 = 16.0;
/// Seconds between march steps.
pub const ALIEN_SPEED: f64 = 1.0;

// ── Bolts ────────────────────────────────────────────────────────────────────

pub const BOLT_WIDTH: f64 = 4.0;
pub const BOLT_HEIGHT: f64 = 16.0;
/// Vertical distance per frame.
pub const BOLT_SPEED: f64 = 10.0;
/// Upper bound on march steps between two alien shots.
pub const BOLT_RATE: u32 = 5;
