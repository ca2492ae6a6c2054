use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use invaders::consts::*;
use invaders::wave::{Alien, AlienGrid, AlienKind, Bolt, Cell};
use invaders::{Key, KeyState, Wave, WaveConfig, WaveError};

const DT: f64 = 1.0 / 64.0;

fn player_bolts(wave: &Wave) -> usize {
    wave.bolts().iter().filter(|bolt| bolt.is_player_owned()).count()
}

fn empty_grid() -> AlienGrid {
    AlienGrid::from_fn(2, 2, |_, _| Cell::Empty)
}

/// One alien straight above the ship.
fn lone_alien(y: f64) -> AlienGrid {
    AlienGrid::from_fn(1, 1, |_, _| Cell::Alive(Alien::new(GAME_WIDTH / 2.0, y, AlienKind::Octopus)))
}

#[test]
fn random_play_keeps_invariants() {
    let mut rng = StdRng::seed_from_u64(0xfeed);
    let mut wave = Wave::with_rng(WaveConfig::default(), StdRng::seed_from_u64(11));
    let mut keys = KeyState::new(true);
    let mut lives = wave.lives();

    for _ in 0..5_000 {
        for key in [Key::Left, Key::Right, Key::Fire] {
            if rng.gen_bool(0.3) {
                keys.press(key);
            } else {
                keys.release(key);
            }
        }
        wave.update(&keys, DT).unwrap();

        assert!(wave.lives() <= lives, "lives went up");
        lives = wave.lives();
        assert_eq!((wave.grid().rows(), wave.grid().cols()), (ALIEN_ROWS, ALIENS_IN_ROW));
        assert!(player_bolts(&wave) <= 1);

        if wave.ship_collided() && !wave.ship_present() && wave.lives() > 0 {
            wave.respawn_ship();
        }
        if wave.line_breached() || wave.is_wave_empty() {
            break;
        }
    }
}

#[test]
fn held_fire_shoots_once() {
    let mut wave = Wave::with_grid(WaveConfig::default(), empty_grid(), StdRng::seed_from_u64(1));
    let mut keys = KeyState::new(true);
    keys.press(Key::Fire);

    wave.update(&keys, DT).unwrap();
    assert_eq!(player_bolts(&wave), 1);

    // Long enough for the bolt to leave through the top.
    for _ in 0..120 {
        wave.update(&keys, DT).unwrap();
        assert!(player_bolts(&wave) <= 1);
    }
    assert_eq!(player_bolts(&wave), 0);

    keys.release(Key::Fire);
    wave.update(&keys, DT).unwrap();
    keys.press(Key::Fire);
    wave.update(&keys, DT).unwrap();
    assert_eq!(player_bolts(&wave), 1);
}

#[test]
fn bad_delta_leaves_the_wave_untouched() {
    let mut wave = Wave::with_rng(WaveConfig::default(), StdRng::seed_from_u64(2));
    let mut keys = KeyState::new(true);
    keys.press(Key::Left);
    keys.press(Key::Fire);

    assert_eq!(wave.update(&keys, -0.5), Err(WaveError::InvalidDelta(-0.5)));
    assert!(wave.update(&keys, f64::NAN).is_err());
    assert!(wave.bolts().is_empty());
    assert_eq!(wave.ship().map(|ship| ship.x()), Some(GAME_WIDTH / 2.0));

    wave.update(&keys, 0.0).unwrap();
    assert_eq!(player_bolts(&wave), 1);
}

#[test]
fn single_alien_wave_is_cleared() {
    let config = WaveConfig { march_interval: 1_000.0, ..WaveConfig::default() };
    let mut wave = Wave::with_grid(config, lone_alien(400.0), StdRng::seed_from_u64(3));
    let mut keys = KeyState::new(true);
    keys.press(Key::Fire);

    let mut frames = 0;
    while !wave.is_wave_empty() {
        assert!(frames < 200, "alien never went down");
        wave.update(&keys, DT).unwrap();
        frames += 1;
    }
    assert_eq!(wave.grid().alive_count(), 0);
    assert_eq!(player_bolts(&wave), 0);
    assert!(!wave.line_breached());
}

#[test]
fn bolts_leave_the_play_area() {
    let mut wave = Wave::with_grid(WaveConfig::default(), empty_grid(), StdRng::seed_from_u64(4));
    let mut keys = KeyState::new(true);
    keys.press(Key::Fire);
    wave.update(&keys, DT).unwrap();
    let start = wave.bolts().iter().next().map(Bolt::y).unwrap();

    let frames = ((GAME_HEIGHT - start) / BOLT_SPEED).ceil() as usize + 1;
    for _ in 0..frames {
        wave.update(&keys, DT).unwrap();
    }
    assert!(wave.bolts().is_empty());
}

#[test]
fn ship_goes_down_after_the_animation() {
    let config = WaveConfig { march_interval: 0.0, bolt_rate: 1, ..WaveConfig::default() };
    let mut wave = Wave::with_grid(config.clone(), lone_alien(300.0), StdRng::seed_from_u64(5));
    let keys = KeyState::new(true);

    let mut frames = 0;
    while !wave.ship_collided() {
        assert!(frames < 200, "ship never hit");
        wave.update(&keys, DT).unwrap();
        frames += 1;
    }
    assert_eq!(wave.lives(), config.lives - 1);

    let mut fed = 0.0;
    loop {
        wave.update(&keys, DT).unwrap();
        fed += DT;
        if !wave.ship_present() {
            break;
        }
        assert!(fed < config.death_duration, "ship outlived its animation");
    }
    assert!(fed >= config.death_duration);
    assert!(wave.bolts().is_empty());
    // The next shots land while the ship is still going down.
    assert!(wave.lives() < config.lives - 1);

    wave.respawn_ship();
    assert!(wave.ship_present());
    assert!(!wave.ship_collided());
}
