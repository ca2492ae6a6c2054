use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::info;

use invaders::{Input, Key, Wave, WaveConfig, WaveError};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    Won,
    Lost,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum State {
    /// Waiting for the first start press.
    Inactive,
    /// Builds a wave; lasts one frame.
    NewWave,
    Active,
    /// Ship destroyed with lives left; the wave is frozen on screen.
    Paused,
    /// Brings the ship back; lasts one frame.
    Continue,
    Complete(Outcome),
}

pub struct App {
    pub should_quit: bool,
    pub state: State,
    pub wave: Option<Wave>,
    config: WaveConfig,
    rng: StdRng,
    start_held: bool,
}

impl App {
    pub fn new(config: WaveConfig, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            should_quit: false,
            state: State::Inactive,
            wave: None,
            config,
            rng,
            start_held: false,
        }
    }

    /// Quit keys. Everything else is game input and goes through the key
    /// state instead.
    pub fn on_key(&mut self, key: KeyEvent) {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }
        if matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc) {
            self.should_quit = true;
        }
    }

    /// The banner for the current state, if any.
    pub fn message(&self) -> Option<&'static str> {
        match self.state {
            State::Inactive => Some("Press 'S' to Play"),
            State::Paused => Some("Press 'S' to Continue"),
            State::Complete(Outcome::Won) => Some("Game Over, YOU WIN!"),
            State::Complete(Outcome::Lost) => Some("Game Over, YOU LOSE!"),
            State::NewWave | State::Active | State::Continue => None,
        }
    }

    pub fn update(&mut self, input: &impl Input, dt: f64) -> Result<(), WaveError> {
        self.determine_state(input);

        if self.state == State::NewWave {
            let rng = StdRng::seed_from_u64(self.rng.gen());
            self.wave = Some(Wave::with_rng(self.config.clone(), rng));
            self.set_state(State::Active);
        }
        if self.state == State::Continue {
            if let Some(wave) = self.wave.as_mut() {
                wave.respawn_ship();
            }
            self.set_state(State::Active);
        }
        if self.state == State::Active {
            self.play(input, dt)?;
        }
        Ok(())
    }

    fn play(&mut self, input: &impl Input, dt: f64) -> Result<(), WaveError> {
        let Some(wave) = self.wave.as_mut() else {
            return Ok(());
        };
        if wave.is_wave_empty() {
            self.set_state(State::Complete(Outcome::Won));
            return Ok(());
        }
        if wave.line_breached() {
            self.set_state(State::Complete(Outcome::Lost));
            return Ok(());
        }

        wave.update(input, dt)?;

        if wave.ship_collided() && !wave.ship_present() {
            let next = if wave.lives() == 0 {
                State::Complete(Outcome::Lost)
            } else {
                State::Paused
            };
            self.set_state(next);
        }
        Ok(())
    }

    /// Start presses only count on the frame the key goes down.
    fn determine_state(&mut self, input: &impl Input) {
        let down = input.is_key_down(Key::Start);
        let pressed = down && !self.start_held;
        self.start_held = down;
        if !pressed {
            return;
        }
        let lives = self.wave.as_ref().map(Wave::lives).unwrap_or(0);
        match self.state {
            State::Inactive | State::Complete(_) => self.set_state(State::NewWave),
            State::Paused if lives > 0 => self.set_state(State::Continue),
            State::Paused => self.set_state(State::Complete(Outcome::Lost)),
            State::NewWave | State::Active | State::Continue => {}
        }
    }

    fn set_state(&mut self, next: State) {
        if next != self.state {
            info!(from = ?self.state, to = ?next, "state change");
            self.state = next;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use invaders::consts::*;
    use invaders::wave::{Alien, AlienGrid, AlienKind, Cell};
    use invaders::KeyState;

    const DT: f64 = 1.0 / 64.0;

    fn active_with(config: WaveConfig, grid: AlienGrid) -> App {
        let mut app = App::new(config.clone(), Some(9));
        app.wave = Some(Wave::with_grid(config, grid, StdRng::seed_from_u64(9)));
        app.state = State::Active;
        app
    }

    /// One alien hovering over the ship that fires at every march step.
    fn gunner_over_ship() -> AlienGrid {
        AlienGrid::from_fn(1, 1, |_, _| {
            Cell::Alive(Alien::new(GAME_WIDTH / 2.0, 300.0, AlienKind::Crab))
        })
    }

    fn run_until(app: &mut App, keys: &KeyState, done: impl Fn(&App) -> bool) {
        for _ in 0..600 {
            if done(app) {
                return;
            }
            app.update(keys, DT).unwrap();
        }
        panic!("condition not reached, state {:?}", app.state);
    }

    #[test]
    fn start_press_builds_a_wave() {
        let mut app = App::new(WaveConfig::default(), Some(1));
        let mut keys = KeyState::new(true);
        app.update(&keys, DT).unwrap();
        assert_eq!(app.state, State::Inactive);
        assert_eq!(app.message(), Some("Press 'S' to Play"));

        keys.press(Key::Start);
        app.update(&keys, DT).unwrap();
        assert_eq!(app.state, State::Active);
        assert!(app.wave.as_ref().unwrap().ship_present());
        assert_eq!(app.message(), None);
    }

    #[test]
    fn held_start_does_not_restart() {
        let mut app = App::new(WaveConfig::default(), Some(1));
        let mut keys = KeyState::new(true);
        keys.press(Key::Start);
        app.update(&keys, DT).unwrap();
        keys.press(Key::Left);
        for _ in 0..10 {
            app.update(&keys, DT).unwrap();
        }
        let x = app.wave.as_ref().unwrap().ship().unwrap().x();
        assert_eq!(x, GAME_WIDTH / 2.0 - 10.0 * SHIP_MOVEMENT);
    }

    #[test]
    fn ship_loss_pauses_then_continues() {
        // The gunner lands a few shots before it walks off the ship.
        let config = WaveConfig {
            march_interval: 0.0,
            bolt_rate: 1,
            lives: 10,
            ..WaveConfig::default()
        };
        let mut app = active_with(config, gunner_over_ship());
        let mut keys = KeyState::new(true);
        run_until(&mut app, &keys, |app| app.state == State::Paused);
        assert_eq!(app.message(), Some("Press 'S' to Continue"));
        let wave = app.wave.as_ref().unwrap();
        assert!(wave.lives() > 0 && wave.lives() < 10);
        assert!(!wave.ship_present());

        // Frozen while paused.
        app.update(&keys, DT).unwrap();
        assert_eq!(app.state, State::Paused);

        keys.press(Key::Start);
        app.update(&keys, DT).unwrap();
        assert_eq!(app.state, State::Active);
        let wave = app.wave.as_ref().unwrap();
        assert!(wave.ship_present());
        assert!(!wave.ship_collided());
    }

    #[test]
    fn last_life_ends_after_the_animation() {
        let config = WaveConfig {
            march_interval: 0.0,
            bolt_rate: 1,
            lives: 1,
            ..WaveConfig::default()
        };
        let mut app = active_with(config, gunner_over_ship());
        let keys = KeyState::new(true);
        run_until(&mut app, &keys, |app| {
            app.wave.as_ref().map(Wave::lives) == Some(0)
        });
        assert_eq!(app.state, State::Active);
        assert!(app.wave.as_ref().unwrap().ship_present());
        run_until(&mut app, &keys, |app| app.state != State::Active);
        assert_eq!(app.state, State::Complete(Outcome::Lost));
        assert_eq!(app.message(), Some("Game Over, YOU LOSE!"));
    }

    #[test]
    fn clearing_the_grid_wins() {
        let config = WaveConfig { march_interval: 100.0, ..WaveConfig::default() };
        let mut app = active_with(config, gunner_over_ship());
        let mut keys = KeyState::new(true);
        keys.press(Key::Fire);
        run_until(&mut app, &keys, |app| app.state != State::Active);
        assert_eq!(app.state, State::Complete(Outcome::Won));
        assert_eq!(app.message(), Some("Game Over, YOU WIN!"));
    }

    #[test]
    fn breach_loses() {
        let grid = AlienGrid::from_fn(1, 1, |_, _| {
            Cell::Alive(Alien::new(300.0, DEFENSE_LINE, AlienKind::Squid))
        });
        let mut app = active_with(WaveConfig::default(), grid);
        let keys = KeyState::new(true);
        app.update(&keys, DT).unwrap();
        app.update(&keys, DT).unwrap();
        assert_eq!(app.state, State::Complete(Outcome::Lost));
    }

    #[test]
    fn start_after_game_over_begins_a_new_wave() {
        let grid = AlienGrid::from_fn(1, 1, |_, _| Cell::Empty);
        let mut app = active_with(WaveConfig::default(), grid);
        let mut keys = KeyState::new(true);
        app.update(&keys, DT).unwrap();
        assert_eq!(app.state, State::Complete(Outcome::Won));
        keys.press(Key::Start);
        app.update(&keys, DT).unwrap();
        assert_eq!(app.state, State::Active);
        let wave = app.wave.as_ref().unwrap();
        assert_eq!(wave.grid().alive_count(), ALIEN_ROWS * ALIENS_IN_ROW);
    }

    #[test]
    fn quit_keys() {
        let mut app = App::new(WaveConfig::default(), None);
        app.on_key(KeyEvent::new(KeyCode::Char('x'), KeyModifiers::NONE));
        assert!(!app.should_quit);
        app.on_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(app.should_quit);
    }
}
