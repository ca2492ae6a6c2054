//! Alien invaders wave simulation.
//!
//! The [`wave::Wave`] engine is frame-stepped: call [`wave::Wave::update`]
//! once per frame with the current input and the seconds elapsed, then
//! [`wave::Wave::draw`] onto any [`wave::Surface`].

pub mod consts;
pub mod error;
pub mod input;
pub mod wave;

pub use error::WaveError;
pub use input::{Input, Key, KeyState};
pub use wave::{Wave, WaveConfig};
