use std::collections::BTreeMap;

use crate::error::{GenError, Result};
use crate::random::RandomSource;

/// Frequency table over observed values.
///
/// Conceptually, this is the set of outgoing edges of one Markov chain node,
/// each edge weighted by how many times it was observed.
///
/// ## Responsibilities:
/// - Accumulate observations one at a time
/// - Draw a value with probability proportional to its count
/// - Merge with another table (parallel training support)
///
/// ## Invariants
/// - `total` is the sum of all counts
/// - Every stored count is strictly positive
/// - Values are visited in ascending `Ord` order, so a draw is fully
///   determined by the random value it consumes
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WeightedSampler<T: Ord> {
	/// Example: { "cat" => 3, "dog" => 1 }
	counts: BTreeMap<T, usize>,
	total: usize,
}

impl<T: Ord> WeightedSampler<T> {
	/// Creates an empty sampler.
	pub fn new() -> Self {
		Self { counts: BTreeMap::new(), total: 0 }
	}

	/// Records one observation of `value`.
	///
	/// - If the value already exists, its count is increased.
	/// - Otherwise, it is inserted with a count of 1.
	pub fn record(&mut self, value: T) {
		*self.counts.entry(value).or_insert(0) += 1;
		self.total += 1;
	}

	/// Records `n` observations of `value` at once.
	///
	/// Same as calling `record` `n` times. `n == 0` records nothing.
	pub fn record_n(&mut self, value: T, n: usize) {
		if n == 0 {
			return;
		}
		*self.counts.entry(value).or_insert(0) += n;
		self.total += n;
	}

	/// Sum of all recorded counts.
	pub fn total(&self) -> usize {
		self.total
	}

	/// Number of times `value` was recorded.
	pub fn count(&self, value: &T) -> usize {
		self.counts.get(value).copied().unwrap_or(0)
	}

	/// Number of distinct values.
	pub fn len(&self) -> usize {
		self.counts.len()
	}

	pub fn is_empty(&self) -> bool {
		self.counts.is_empty()
	}

	/// Iterates `(value, count)` pairs in draw order.
	pub fn iter(&self) -> impl Iterator<Item = (&T, usize)> {
		self.counts.iter().map(|(value, count)| (value, *count))
	}

	/// Draws a value using weighted random sampling.
	///
	/// Consumes exactly one `next_below(total)` draw, then performs an O(n)
	/// cumulative subtraction over the values in order.
	///
	/// # Errors
	/// Returns `EmptyDistribution` if nothing was recorded.
	pub fn pick(&self, random: &mut dyn RandomSource) -> Result<&T> {
		if self.total == 0 {
			return Err(GenError::EmptyDistribution("no observations recorded".to_owned()));
		}

		let mut r = random.next_below(self.total);
		for (value, count) in &self.counts {
			if r < *count {
				return Ok(value);
			}
			r -= count;
		}

		// r < total and total is the sum of the counts
		Err(GenError::EmptyDistribution(format!(
			"draw out of range for total {}",
			self.total
		)))
	}
}

impl<T: Ord + Clone> WeightedSampler<T> {
	/// Merges another sampler into this one.
	///
	/// Counts of matching values are summed, which is the same as recording
	/// every observation of `other` here.
	pub fn merge(&mut self, other: &Self) {
		for (value, count) in &other.counts {
			*self.counts.entry(value.clone()).or_insert(0) += *count;
		}
		self.total += other.total;
	}
}

impl<T: Ord> Default for WeightedSampler<T> {
	fn default() -> Self {
		Self::new()
	}
}

impl<T: Ord> FromIterator<T> for WeightedSampler<T> {
	fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
		let mut sampler = Self::new();
		for value in iter {
			sampler.record(value);
		}
		sampler
	}
}
