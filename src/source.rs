use rand::Rng;
use rand_distr::{Distribution, Uniform};

use crate::{Interval, WalkError};

/// The uniform draws a walk is built from.
///
/// Generation only ever talks to this trait, so tests can script every
/// draw and callers can bring any [`rand::Rng`] through [`RngSource`].
pub trait UniformSource {
    /// A real drawn uniformly from the closed interval `range`.
    fn uniform(&mut self, range: Interval) -> Result<f64, WalkError>;

    /// An integer drawn uniformly from `lo..=hi`.
    fn integer(&mut self, lo: i64, hi: i64) -> Result<i64, WalkError>;

    /// `-1.0` or `+1.0`, each with probability one half.
    fn sign(&mut self) -> f64;

    /// A real drawn uniformly from `[0, 100)`.
    fn percent(&mut self) -> f64;
}

/// [`UniformSource`] over a `rand` generator.
pub struct RngSource<R> {
    rng: R,
}

impl<R: Rng> RngSource<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl RngSource<rand::rngs::ThreadRng> {
    pub fn thread() -> Self {
        Self::new(rand::rng())
    }
}

impl<R: Rng> UniformSource for RngSource<R> {
    fn uniform(&mut self, range: Interval) -> Result<f64, WalkError> {
        let dist = Uniform::new_inclusive(range.min, range.max).map_err(|_| {
            WalkError::DegenerateRange {
                min: range.min,
                max: range.max,
            }
        })?;
        Ok(dist.sample(&mut self.rng))
    }

    fn integer(&mut self, lo: i64, hi: i64) -> Result<i64, WalkError> {
        let dist = Uniform::new_inclusive(lo, hi).map_err(|_| WalkError::DegenerateRange {
            min: lo as f64,
            max: hi as f64,
        })?;
        Ok(dist.sample(&mut self.rng))
    }

    fn sign(&mut self) -> f64 {
        if self.rng.random_bool(0.5) { 1.0 } else { -1.0 }
    }

    fn percent(&mut self) -> f64 {
        self.rng.random_range(0.0..100.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{SeedableRng, rngs::SmallRng};

    #[test]
    fn test_uniform_stays_in_range() {
        let mut source = RngSource::new(SmallRng::seed_from_u64(7));
        let range = Interval {
            min: -2.5,
            max: 4.0,
        };
        for _ in 0..1000 {
            let v = source.uniform(range).unwrap();
            assert!((range.min..=range.max).contains(&v), "{v} escaped");
        }
    }

    #[test]
    fn test_point_range_is_constant() {
        let mut source = RngSource::new(SmallRng::seed_from_u64(1));
        let range = Interval { min: 2.0, max: 2.0 };
        assert_eq!(source.uniform(range), Ok(2.0));
    }

    #[test]
    fn test_inverted_range_is_degenerate() {
        let mut source = RngSource::new(SmallRng::seed_from_u64(1));
        let range = Interval { min: 3.0, max: 1.0 };
        assert_eq!(
            source.uniform(range),
            Err(WalkError::DegenerateRange { min: 3.0, max: 1.0 })
        );
    }

    #[test]
    fn test_sign_and_integer_values() {
        let mut source = RngSource::new(SmallRng::seed_from_u64(3));
        let mut seen = [false; 3];
        for _ in 0..500 {
            let s = source.sign();
            assert!(s == 1.0 || s == -1.0);
            let i = source.integer(-1, 1).unwrap();
            seen[(i + 1) as usize] = true;
            let p = source.percent();
            assert!((0.0..100.0).contains(&p));
        }
        assert_eq!(seen, [true; 3]);
    }
}
