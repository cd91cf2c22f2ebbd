use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Source of bounded random integers.
///
/// Every weighted draw in the crate goes through this trait, so a fixed
/// sequence of values makes sampling, walks and generation reproducible.
pub trait RandomSource {
	/// Returns a value in `[0, bound)`.
	///
	/// `bound` must be strictly positive.
	fn next_below(&mut self, bound: usize) -> usize;
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
	fn next_below(&mut self, bound: usize) -> usize {
		(**self).next_below(bound)
	}
}

/// Uniform random source backed by `rand`'s standard generator.
#[derive(Debug, Clone)]
pub struct StdRandom {
	rng: StdRng,
}

impl StdRandom {
	/// Creates a source seeded from the operating system.
	pub fn new() -> Self {
		Self { rng: StdRng::from_os_rng() }
	}

	/// Creates a source that yields the same sequence for the same seed.
	pub fn seeded(seed: u64) -> Self {
		Self { rng: StdRng::seed_from_u64(seed) }
	}
}

impl Default for StdRandom {
	fn default() -> Self {
		Self::new()
	}
}

impl RandomSource for StdRandom {
	fn next_below(&mut self, bound: usize) -> usize {
		self.rng.random_range(0..bound)
	}
}

/// Replays a fixed list of values, cycling when the list runs out.
///
/// Each value is reduced modulo the requested bound, so `ScriptedRandom::new(vec![0])`
/// always picks the first entry of any distribution.
#[derive(Debug, Clone)]
pub struct ScriptedRandom {
	values: Vec<usize>,
	position: usize,
}

impl ScriptedRandom {
	/// Creates a scripted source. An empty script behaves like `vec![0]`.
	pub fn new(values: Vec<usize>) -> Self {
		let values = if values.is_empty() { vec![0] } else { values };
		Self { values, position: 0 }
	}

	/// Number of draws consumed so far.
	pub fn draws(&self) -> usize {
		self.position
	}
}

impl RandomSource for ScriptedRandom {
	fn next_below(&mut self, bound: usize) -> usize {
		let value = self.values[self.position % self.values.len()];
		self.position += 1;
		value % bound
	}
}
