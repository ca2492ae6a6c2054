//! One wave: the ship, the alien grid, bolts in flight and the frame pipeline
//! that moves them.

mod bolts;
mod death;
mod draw;
mod grid;
mod models;

pub use bolts::BoltRegistry;
pub use death::{DeathSequencer, DeathTick};
pub use draw::{Drawable, Sprite, Surface};
pub use grid::{AlienGrid, Cell};
pub use models::{Alien, AlienKind, Bolt, Bounds, Heading, Ship, Side};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info};

use crate::consts::*;
use crate::error::{validate_delta, WaveError};
use crate::input::{Input, Key};

/// Tunables a wave is built from.
#[derive(Clone, Debug, PartialEq)]
pub struct WaveConfig {
    pub rows: usize,
    pub cols: usize,
    pub lives: u32,
    /// Seconds between march steps.
    pub march_interval: f64,
    /// Alien shots come every 1..=bolt_rate march steps.
    pub bolt_rate: u32,
    pub death_duration: f64,
    pub defense_line: f64,
}

impl Default for WaveConfig {
    fn default() -> Self {
        Self {
            rows: ALIEN_ROWS,
            cols: ALIENS_IN_ROW,
            lives: SHIP_LIVES,
            march_interval: ALIEN_SPEED,
            bolt_rate: BOLT_RATE,
            death_duration: DEATH_SPEED,
            defense_line: DEFENSE_LINE,
        }
    }
}

pub struct Wave<R = StdRng> {
    config: WaveConfig,
    ship: Option<Ship>,
    grid: AlienGrid,
    bolts: BoltRegistry,
    lives: u32,
    heading: Heading,
    march_timer: f64,
    steps_since_shot: u32,
    shot_after: u32,
    fire_held: bool,
    empty: bool,
    breached: bool,
    ship_hit: bool,
    rng: R,
}

impl Wave<StdRng> {
    pub fn new(config: WaveConfig) -> Self {
        Self::with_rng(config, StdRng::from_entropy())
    }
}

impl<R: Rng> Wave<R> {
    pub fn with_rng(config: WaveConfig, rng: R) -> Self {
        let grid = AlienGrid::new(config.rows, config.cols);
        Self::with_grid(config, grid, rng)
    }

    /// A wave over a prepared grid. `config.rows`/`cols` are ignored in
    /// favor of the grid's own dimensions.
    pub fn with_grid(config: WaveConfig, grid: AlienGrid, mut rng: R) -> Self {
        let shot_after = draw_shot_interval(&mut rng, config.bolt_rate);
        let empty = grid.is_empty();
        let breached = grid.breaches(config.defense_line);
        Self {
            lives: config.lives,
            config,
            ship: Some(Ship::new()),
            grid,
            bolts: BoltRegistry::new(),
            heading: Heading::Right,
            march_timer: 0.0,
            steps_since_shot: 0,
            shot_after,
            fire_held: false,
            empty,
            breached,
            ship_hit: false,
            rng,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────────────

    pub fn ship(&self) -> Option<&Ship> {
        self.ship.as_ref()
    }

    pub fn ship_present(&self) -> bool {
        self.ship.is_some()
    }

    pub fn lives(&self) -> u32 {
        self.lives
    }

    /// Whether every grid cell was empty at the start of the last update.
    pub fn is_wave_empty(&self) -> bool {
        self.empty
    }

    /// Whether an alien had reached the defense line at the start of the
    /// last update.
    pub fn line_breached(&self) -> bool {
        self.breached
    }

    /// Set when the ship is struck; stays set through the death animation
    /// until [`Wave::respawn_ship`].
    pub fn ship_collided(&self) -> bool {
        self.ship_hit
    }

    pub fn grid(&self) -> &AlienGrid {
        &self.grid
    }

    pub fn bolts(&self) -> &BoltRegistry {
        &self.bolts
    }

    pub fn heading(&self) -> Heading {
        self.heading
    }

    pub fn defense_line(&self) -> f64 {
        self.config.defense_line
    }

    /// Puts a fresh ship back after the death animation and clears the
    /// collision flag.
    pub fn respawn_ship(&mut self) {
        if self.ship.is_none() {
            self.ship = Some(Ship::new());
        }
        self.ship_hit = false;
        info!(lives = self.lives, "ship respawned");
    }

    // ── Frame pipeline ───────────────────────────────────────────────────────

    /// Advances the wave by one frame. A bad `dt` is rejected before
    /// anything moves.
    pub fn update(&mut self, input: &impl Input, dt: f64) -> Result<(), WaveError> {
        let dt = validate_delta(dt)?;

        self.refresh_status();
        self.resolve_ship_hits();
        if !self.empty {
            self.resolve_alien_hits();
            self.march(dt);
            // The last alien may have fallen a moment ago.
            if self.steps_since_shot >= self.shot_after && !self.grid.is_empty() {
                self.alien_fire();
            }
        }
        if !self.ship_hit {
            self.steer(input);
            self.player_fire(input);
        } else {
            // Track the fire key so a release during the animation counts.
            self.fire_held = input.is_key_down(Key::Fire);
            self.animate_death(dt);
        }
        self.bolts.advance();
        Ok(())
    }

    fn refresh_status(&mut self) {
        let empty = self.grid.is_empty();
        if empty && !self.empty {
            info!("wave cleared");
        }
        self.empty = empty;

        let breached = self.grid.breaches(self.config.defense_line);
        if breached && !self.breached {
            info!("aliens reached the defense line");
        }
        self.breached = breached;
    }

    /// A dying ship is still a target until the animation removes it.
    fn resolve_ship_hits(&mut self) {
        let Some(ship) = self.ship.as_ref() else {
            return;
        };
        let hits = self.bolts.consume(|bolt| ship.collides_with(bolt));
        if hits == 0 {
            return;
        }
        self.ship_hit = true;
        self.lives = self.lives.saturating_sub(hits as u32);
        info!(hits, lives = self.lives, "ship hit");
    }

    fn resolve_alien_hits(&mut self) {
        let grid = &mut self.grid;
        self.bolts.consume(|bolt| match grid.strike(bolt) {
            Some((row, col)) => {
                debug!(row, col, "alien destroyed");
                true
            }
            None => false,
        });
    }

    fn march(&mut self, dt: f64) {
        self.march_timer += dt;
        if self.march_timer <= self.config.march_interval {
            return;
        }
        self.march_timer = 0.0;
        self.heading = self.grid.march(self.heading);
        self.steps_since_shot += 1;
    }

    fn alien_fire(&mut self) {
        self.steps_since_shot = 0;
        let Some(shooter) = self.grid.pick_shooter(&mut self.rng) else {
            debug_assert!(false, "alien fire requested on an empty grid");
            return;
        };
        let (x, y) = shooter.muzzle();
        self.bolts.spawn(Bolt::alien(x, y));
        self.shot_after = draw_shot_interval(&mut self.rng, self.config.bolt_rate);
        debug!(x, y, next_in = self.shot_after, "alien fired");
    }

    fn steer(&mut self, input: &impl Input) {
        let Some(ship) = self.ship.as_mut() else {
            return;
        };
        if input.is_key_down(Key::Left) {
            ship.move_left();
        }
        if input.is_key_down(Key::Right) {
            ship.move_right();
        }
    }

    /// Fires on the press edge only, and only with no player bolt in flight.
    fn player_fire(&mut self, input: &impl Input) {
        let down = input.is_key_down(Key::Fire);
        let pressed = down && !self.fire_held;
        self.fire_held = down;
        if !pressed || self.bolts.has_player_bolt() {
            return;
        }
        if let Some(ship) = &self.ship {
            let (x, y) = ship.muzzle();
            self.bolts.spawn(Bolt::player(x, y));
        }
    }

    fn animate_death(&mut self, dt: f64) {
        let Some(ship) = self.ship.as_mut() else {
            return;
        };
        if ship.death.is_none() {
            ship.death = Some(DeathSequencer::new(
                self.config.death_duration,
                SHIP_DEATH_FRAMES,
            ));
            ship.set_frame(0);
            return;
        }
        let tick = match ship.death.as_mut() {
            Some(sequencer) => sequencer.tick(dt),
            None => return,
        };
        ship.set_frame(tick.frame);
        if tick.done {
            self.bolts.clear();
            self.ship = None;
            info!(lives = self.lives, "ship destroyed");
        }
    }

    // ── Drawing ──────────────────────────────────────────────────────────────

    /// Aliens row by row, then the ship, the defense line and the bolts.
    pub fn draw(&self, surface: &mut dyn Surface) {
        self.grid.draw(surface);
        if let Some(ship) = &self.ship {
            ship.draw(surface);
        }
        surface.hline(self.config.defense_line, 0.0, GAME_WIDTH);
        for bolt in self.bolts.iter() {
            bolt.draw(surface);
        }
    }
}

fn draw_shot_interval<R: Rng>(rng: &mut R, bolt_rate: u32) -> u32 {
    rng.gen_range(1..=bolt_rate.max(1))
}
