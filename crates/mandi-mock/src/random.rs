//! Jitter source abstraction for the synthetic price series.
//!
//! The analysis report mixes a smooth signal with random noise. Routing the
//! noise through [`JitterSource`] lets tests pin it and assert on the smooth
//! part alone.

use rand::Rng;
use std::fmt;

/// Trait for providing noise samples in `[0, 1)`.
pub trait JitterSource: Send + Sync + fmt::Debug {
    /// Returns the next sample in `[0, 1)`.
    fn next_unit(&self) -> f64;
}

/// Production implementation using the thread-local RNG.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadRngJitter;

impl ThreadRngJitter {
    pub fn new() -> Self {
        Self
    }
}

impl JitterSource for ThreadRngJitter {
    fn next_unit(&self) -> f64 {
        rand::thread_rng().gen::<f64>()
    }
}

/// Always returns the same sample. Zero removes the noise entirely.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedJitter(f64);

impl FixedJitter {
    /// Creates a fixed source; the value is clamped into `[0, 1)`.
    pub fn new(value: f64) -> Self {
        let value = if value.is_finite() { value } else { 0.0 };
        FixedJitter(value.clamp(0.0, 1.0 - f64::EPSILON))
    }

    /// A source with no noise.
    pub fn zero() -> Self {
        FixedJitter(0.0)
    }
}

impl JitterSource for FixedJitter {
    fn next_unit(&self) -> f64 {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_thread_rng_stays_in_unit_interval() {
        let jitter = ThreadRngJitter::new();
        for _ in 0..1_000 {
            let sample = jitter.next_unit();
            assert!((0.0..1.0).contains(&sample));
        }
    }

    #[test]
    fn test_fixed_jitter_clamps() {
        assert_eq!(FixedJitter::new(0.25).next_unit(), 0.25);
        assert_eq!(FixedJitter::new(-1.0).next_unit(), 0.0);
        assert!(FixedJitter::new(7.0).next_unit() < 1.0);
        assert_eq!(FixedJitter::new(f64::NAN).next_unit(), 0.0);
        assert_eq!(FixedJitter::zero().next_unit(), 0.0);
    }
}
