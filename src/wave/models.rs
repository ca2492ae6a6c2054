//! Ship, alien and bolt entities.

use crate::consts::*;

use super::death::DeathSequencer;
use super::draw::{Drawable, Sprite, Surface};

/// Axis-aligned box described by its center.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Bounds {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    pub fn contains(&self, px: f64, py: f64) -> bool {
        (px - self.x).abs() <= self.width / 2.0 && (py - self.y).abs() <= self.height / 2.0
    }

    pub fn bottom(&self) -> f64 {
        self.y - self.height / 2.0
    }

    pub fn top(&self) -> f64 {
        self.y + self.height / 2.0
    }
}

/// Which side fired a bolt.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Side {
    Player,
    Alien,
}

/// Horizontal march direction of the grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Heading {
    Left,
    Right,
}

impl Heading {
    pub fn sign(self) -> f64 {
        match self {
            Heading::Left => -1.0,
            Heading::Right => 1.0,
        }
    }

    pub fn reversed(self) -> Self {
        match self {
            Heading::Left => Heading::Right,
            Heading::Right => Heading::Left,
        }
    }
}

// ── Bolts ────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Bolt {
    x: f64,
    y: f64,
    velocity: f64,
}

impl Bolt {
    pub fn new(x: f64, y: f64, velocity: f64) -> Self {
        Self { x, y, velocity }
    }

    /// An upward bolt fired by the ship.
    pub fn player(x: f64, y: f64) -> Self {
        Self::new(x, y, BOLT_SPEED)
    }

    /// A downward bolt fired by an alien.
    pub fn alien(x: f64, y: f64) -> Self {
        Self::new(x, y, -BOLT_SPEED)
    }

    pub fn x(&self) -> f64 {
        self.x
    }

    pub fn y(&self) -> f64 {
        self.y
    }

    pub fn velocity(&self) -> f64 {
        self.velocity
    }

    /// Ownership is carried by the velocity sign: anything moving up belongs
    /// to the player. Every collision rule goes through this accessor.
    pub fn is_player_owned(&self) -> bool {
        self.velocity > 0.0
    }

    pub fn side(&self) -> Side {
        if self.is_player_owned() {
            Side::Player
        } else {
            Side::Alien
        }
    }

    pub fn bounds(&self) -> Bounds {
        Bounds::new(self.x, self.y, BOLT_WIDTH, BOLT_HEIGHT)
    }

    /// The four sample points used for hit tests.
    pub fn corners(&self) -> [(f64, f64); 4] {
        let h = BOLT_WIDTH / 2.0;
        [
            (self.x - h, self.y - h),
            (self.x - h, self.y + h),
            (self.x + h, self.y - h),
            (self.x + h, self.y + h),
        ]
    }

    pub(crate) fn advance(&mut self) {
        self.y += self.velocity;
    }

    /// True while the bolt is inside the vertical play bounds.
    pub fn in_play(&self) -> bool {
        self.y >= 0.0 && self.y <= GAME_HEIGHT
    }
}

impl Drawable for Bolt {
    fn draw(&self, surface: &mut dyn Surface) {
        surface.fill_rect(self.bounds(), self.side());
    }
}

fn struck(bounds: &Bounds, bolt: &Bolt) -> bool {
    bolt.corners().iter().any(|&(x, y)| bounds.contains(x, y))
}

// ── Ship ─────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct Ship {
    x: f64,
    y: f64,
    frame: u32,
    pub(crate) death: Option<DeathSequencer>,
}

impl Ship {
    pub fn new() -> Self {
        Self::at(GAME_WIDTH / 2.0)
    }

    pub fn at(x: f64) -> Self {
        Self {
            x,
            y: SHIP_BOTTOM,
            frame: 0,
            death: None,
        }
    }

    pub fn x(&self) -> f64 {
        self.x
    }

    pub fn y(&self) -> f64 {
        self.y
    }

    /// Sprite-strip index; 0 is the intact ship.
    pub fn frame(&self) -> u32 {
        self.frame
    }

    pub(crate) fn set_frame(&mut self, frame: u32) {
        self.frame = frame;
    }

    pub fn is_dying(&self) -> bool {
        self.death.is_some()
    }

    pub fn bounds(&self) -> Bounds {
        Bounds::new(self.x, self.y, SHIP_WIDTH, SHIP_HEIGHT)
    }

    /// Only alien bolts can hit the ship.
    pub fn collides_with(&self, bolt: &Bolt) -> bool {
        !bolt.is_player_owned() && struck(&self.bounds(), bolt)
    }

    pub(crate) fn move_left(&mut self) {
        self.x = (self.x - SHIP_MOVEMENT).max(SHIP_WIDTH / 2.0);
    }

    pub(crate) fn move_right(&mut self) {
        self.x = (self.x + SHIP_MOVEMENT).min(GAME_WIDTH - SHIP_WIDTH / 2.0);
    }

    /// Where a player bolt leaves the ship.
    pub(crate) fn muzzle(&self) -> (f64, f64) {
        (self.x, self.y + SHIP_HEIGHT / 2.0)
    }
}

impl Default for Ship {
    fn default() -> Self {
        Self::new()
    }
}

impl Drawable for Ship {
    fn draw(&self, surface: &mut dyn Surface) {
        surface.sprite(Sprite::Ship { frame: self.frame }, self.bounds());
    }
}

// ── Aliens ───────────────────────────────────────────────────────────────────

/// Sprite variant, chosen by row.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AlienKind {
    Squid,
    Crab,
    Octopus,
}

impl AlienKind {
    /// Rows cycle through the variants with period six.
    pub fn for_row(row: usize) -> Self {
        match row % 6 {
            1 | 2 => AlienKind::Crab,
            3 | 4 => AlienKind::Squid,
            _ => AlienKind::Octopus,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Alien {
    x: f64,
    y: f64,
    kind: AlienKind,
}

impl Alien {
    pub fn new(x: f64, y: f64, kind: AlienKind) -> Self {
        Self { x, y, kind }
    }

    /// The alien that starts a wave at the given cell.
    pub fn for_cell(row: usize, col: usize) -> Self {
        let x = ALIEN_H_SEP + ALIEN_WIDTH / 2.0 + col as f64 * (ALIEN_WIDTH + ALIEN_H_SEP);
        let y = GAME_HEIGHT - ALIEN_CEILING - row as f64 * (ALIEN_HEIGHT + ALIEN_V_SEP);
        Self::new(x, y, AlienKind::for_row(row))
    }

    pub fn x(&self) -> f64 {
        self.x
    }

    pub fn y(&self) -> f64 {
        self.y
    }

    pub fn kind(&self) -> AlienKind {
        self.kind
    }

    pub fn bounds(&self) -> Bounds {
        Bounds::new(self.x, self.y, ALIEN_WIDTH, ALIEN_HEIGHT)
    }

    /// Only player bolts can hit an alien.
    pub fn collides_with(&self, bolt: &Bolt) -> bool {
        bolt.is_player_owned() && struck(&self.bounds(), bolt)
    }

    pub(crate) fn walk(&mut self, heading: Heading) {
        self.x += ALIEN_H_WALK * heading.sign();
    }

    pub(crate) fn descend(&mut self) {
        self.y -= ALIEN_V_WALK;
    }

    /// True when the alien is within the edge margin of the side it is
    /// walking toward.
    pub fn approaching_edge(&self, heading: Heading) -> bool {
        match heading {
            Heading::Right => self.x >= GAME_WIDTH - ALIEN_H_SEP,
            Heading::Left => self.x <= ALIEN_H_SEP,
        }
    }

    /// Where this alien's bolts spawn.
    pub(crate) fn muzzle(&self) -> (f64, f64) {
        (self.x, self.y - ALIEN_HEIGHT / 2.0)
    }
}

impl Drawable for Alien {
    fn draw(&self, surface: &mut dyn Surface) {
        surface.sprite(Sprite::Alien(self.kind), self.bounds());
    }
}
