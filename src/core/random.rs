//! Sources of uniformly distributed random numbers.
//!
//! Every sampling routine in this crate receives its random source explicitly. In production this
//! is any generator implementing `rand::Rng`, for example one `Pcg64` stream per worker; in tests
//! it is a [`FakeStream`] replaying a fixed sequence so that exact sample values can be checked.
use crate::core::error::{DistributionError, Result};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// A source of independent random numbers uniformly distributed in `[0, 1)`.
pub trait RandomSource {
    /// Returns the next random number.
    fn random_number(&mut self) -> f64;
}

impl<R: Rng + ?Sized> RandomSource for R {
    fn random_number(&mut self) -> f64 {
        self.gen::<f64>()
    }
}

/// A deterministic random source that cycles through a fixed sequence of numbers.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct FakeStream {
    numbers: Vec<f64>,
    position: usize,
    consumed: usize,
}

impl FakeStream {
    /// Creates a stream that returns `numbers` in order and starts over once the end is reached.
    /// Every number must lie in `[0, 1)`.
    pub fn new(numbers: Vec<f64>) -> Result<Self> {
        if numbers.is_empty() {
            return Err(DistributionError::invalid(
                "a fake stream needs at least one number",
            ));
        }

        if let Some(bad) = numbers.iter().find(|&&u| !(0.0..1.0).contains(&u)) {
            return Err(DistributionError::invalid(format!(
                "fake stream number {} is not in [0, 1)",
                bad
            )));
        }

        Ok(Self {
            numbers,
            position: 0,
            consumed: 0,
        })
    }

    /// Returns how many numbers were drawn from this stream so far.
    pub fn consumed(&self) -> usize {
        self.consumed
    }

    /// Rewinds the stream to its first number.
    pub fn reset(&mut self) {
        self.position = 0;
        self.consumed = 0;
    }
}

impl RandomSource for FakeStream {
    fn random_number(&mut self) -> f64 {
        let number = self.numbers[self.position];
        self.position = (self.position + 1) % self.numbers.len();
        self.consumed += 1;
        number
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand_pcg::Pcg64;

    #[test]
    fn fake_stream_cycles() {
        let mut stream = FakeStream::new(vec![0.25, 0.5]).unwrap();

        assert_eq!(stream.random_number(), 0.25);
        assert_eq!(stream.random_number(), 0.5);
        assert_eq!(stream.random_number(), 0.25);
        assert_eq!(stream.consumed(), 3);

        stream.reset();

        assert_eq!(stream.random_number(), 0.25);
        assert_eq!(stream.consumed(), 1);
    }

    #[test]
    fn fake_stream_rejects_bad_numbers() {
        assert!(FakeStream::new(vec![]).is_err());
        assert!(FakeStream::new(vec![0.5, 1.0]).is_err());
        assert!(FakeStream::new(vec![-0.1]).is_err());
        assert!(FakeStream::new(vec![f64::NAN]).is_err());
    }

    #[test]
    fn generators_are_random_sources() {
        let mut rng = Pcg64::new(0xcafef00dd15ea5e5, 0xa02bdbf7bb3c0a7ac28fa16a64abf96);

        for _ in 0..1000 {
            let u = rng.random_number();
            assert!((0.0..1.0).contains(&u));
        }
    }
}
