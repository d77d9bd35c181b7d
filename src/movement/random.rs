use rand::{rngs::StdRng, Rng, SeedableRng};

/// Provider of uniformly distributed random values.
///
/// Every model owns its own provider, so a seeded provider replays the same
/// movement.
pub trait RandomProvider {
    /// Value in `[0, 1)`.
    fn gen_f64(&mut self) -> f64;

    /// Value in `[0, bound)`. `bound` must be positive.
    fn gen_index(&mut self, bound: usize) -> usize;
}

/// Random provider backed by a `rand` generator.
#[derive(Debug, Clone)]
pub struct RngSource<R> {
    rng: R,
}

impl<R: Rng> RngSource<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl RngSource<StdRng> {
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }

    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }
}

impl<R: Rng> RandomProvider for RngSource<R> {
    fn gen_f64(&mut self) -> f64 {
        self.rng.gen()
    }

    fn gen_index(&mut self, bound: usize) -> usize {
        self.rng.gen_range(0..bound)
    }
}

/// Random provider that replays a fixed sequence of values in `[0, 1)`, cycling
/// when it runs out.
///
/// Indexes are derived from the same sequence (`floor(value * bound)`).
#[derive(Debug, Clone)]
pub struct SequenceRandom {
    values: Vec<f64>,
    position: usize,
}

impl SequenceRandom {
    /// Create a provider from values in `[0, 1)`. An empty sequence always yields 0.
    pub fn new(values: Vec<f64>) -> Self {
        Self {
            values,
            position: 0,
        }
    }

    /// Number of values drawn so far.
    pub fn draws(&self) -> usize {
        self.position
    }
}

impl RandomProvider for SequenceRandom {
    fn gen_f64(&mut self) -> f64 {
        let value = if self.values.is_empty() {
            0.0
        } else {
            self.values[self.position % self.values.len()]
        };
        self.position += 1;
        value
    }

    fn gen_index(&mut self, bound: usize) -> usize {
        let index = (self.gen_f64() * bound as f64) as usize;
        index.min(bound.saturating_sub(1))
    }
}
