use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum WaveError {
    #[error("frame delta must be finite and non-negative, got {0}")]
    InvalidDelta(f64),
}

/// Checks a frame delta before it reaches the simulation.
pub fn validate_delta(dt: f64) -> Result<f64, WaveError> {
    if dt.is_finite() && dt >= 0.0 {
        Ok(dt)
    } else {
        Err(WaveError::InvalidDelta(dt))
    }
}
