use crate::error::{Error, Result};

use super::random::RandomProvider;

/// Provider of the speed an agent keeps along one path.
pub trait SpeedGenerator {
    fn generate_speed<P>(&self, rng: &mut P) -> f64
    where
        P: RandomProvider + ?Sized;
}

/// Speed drawn uniformly from `[min, max]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UniformSpeed {
    min: f64,
    max: f64,
}

impl UniformSpeed {
    pub fn new(min: f64, max: f64) -> Result<Self> {
        if !(min.is_finite() && max.is_finite() && 0.0 <= min && min <= max) {
            return Err(Error::configuration(
                "speed",
                format!("[{}, {}]", min, max),
                "0 <= min <= max",
            ));
        }
        Ok(Self { min, max })
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }
}

impl SpeedGenerator for UniformSpeed {
    fn generate_speed<P>(&self, rng: &mut P) -> f64
    where
        P: RandomProvider + ?Sized,
    {
        (self.max - self.min) * rng.gen_f64() + self.min
    }
}
