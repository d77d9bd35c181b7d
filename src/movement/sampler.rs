use crate::core::geometry::angle::FULL_TURN;
use crate::error::{Error, Result};

use super::random::RandomProvider;

/// Upper bound of a single Lévy sample, and of the number of steps of a path.
pub const MAX_STEPS: usize = 10_000;

/// Draw a heading in whole degrees, uniformly from `[0, 360)`.
pub fn sample_heading<P>(rng: &mut P) -> f64
where
    P: RandomProvider + ?Sized,
{
    rng.gen_index(FULL_TURN as usize) as f64
}

/// Sampler of the number of roads a path traverses.
///
/// Step counts follow a power law: `round(min_path_length * u^(-1/lambda))`
/// for `u` uniform in `[0, 1)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LevySampler {
    lambda: f64,
    min_path_length: usize,
    max_path_length: Option<usize>,
}

impl LevySampler {
    /// Create a sampler.
    ///
    /// `max_path_length` caps the step count in addition to [`MAX_STEPS`].
    pub fn new(
        lambda: f64,
        min_path_length: usize,
        max_path_length: Option<usize>,
    ) -> Result<Self> {
        if !(lambda.is_finite() && lambda > 0.0) {
            return Err(Error::configuration(
                "lambda",
                lambda,
                "a finite number greater than 0",
            ));
        }
        if min_path_length == 0 {
            return Err(Error::configuration(
                "min_path_length",
                min_path_length,
                "at least 1",
            ));
        }
        if let Some(max_path_length) = max_path_length {
            if max_path_length < min_path_length {
                return Err(Error::configuration(
                    "max_path_length",
                    max_path_length,
                    format!("at least min_path_length ({})", min_path_length),
                ));
            }
        }
        Ok(Self {
            lambda,
            min_path_length,
            max_path_length,
        })
    }

    pub fn lambda(&self) -> f64 {
        self.lambda
    }

    pub fn min_path_length(&self) -> usize {
        self.min_path_length
    }

    pub fn max_path_length(&self) -> Option<usize> {
        self.max_path_length
    }

    /// Draw `u^(-1/lambda)`, clamped to [`MAX_STEPS`].
    ///
    /// The value is at least 1 for any `u` in `[0, 1)`; anything below that
    /// means the random provider broke its contract.
    pub fn levy_value<P>(&self, rng: &mut P) -> Result<f64>
    where
        P: RandomProvider + ?Sized,
    {
        let u = rng.gen_f64();
        let value = u.powf(-1.0 / self.lambda);
        if !(value >= 1.0) {
            return Err(Error::SamplingInvariant {
                value,
                lambda: self.lambda,
            });
        }
        Ok(value.min(MAX_STEPS as f64))
    }

    /// Draw the number of steps of a path.
    pub fn sample<P>(&self, rng: &mut P) -> Result<usize>
    where
        P: RandomProvider + ?Sized,
    {
        let value = self.levy_value(rng)?;
        let steps = (self.min_path_length as f64 * value)
            .round()
            .min(MAX_STEPS as f64) as usize;
        Ok(self
            .max_path_length
            .map_or(steps, |max_path_length| steps.min(max_path_length)))
    }
}
