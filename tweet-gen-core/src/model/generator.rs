use log::debug;

use super::chain::MarkovChain;
use super::distribution::WeightedSampler;
use crate::config::GeneratorConfig;
use crate::error::{GenError, Result};
use crate::random::RandomSource;

/// Smallest accepted target length.
pub const MIN_TARGET_LENGTH: usize = 2;

/// High-level generator turning walks over a `MarkovChain` into tweets.
///
/// # Responsibilities
/// - Validate the requested length against the configured ceiling
/// - Concatenate one or more walks until the target length is reached
/// - Terminate every sentence with a weighted random punctuation mark
///
/// The generator only borrows the chain. Several generators, each with its
/// own random source, can run over the same trained chain.
pub struct TextGenerator<'a, R: RandomSource> {
	chain: &'a MarkovChain,
	random: R,
	config: GeneratorConfig,
	marks: WeightedSampler<char>,
}

impl<'a, R: RandomSource> TextGenerator<'a, R> {
	/// Creates a generator with the default configuration.
	pub fn new(chain: &'a MarkovChain, random: R) -> Self {
		let config = GeneratorConfig::default();
		let marks = config.mark_sampler();
		Self { chain, random, config, marks }
	}

	/// Creates a generator with a custom configuration.
	///
	/// # Errors
	/// Returns `InvalidArgument` if the configuration does not validate.
	pub fn with_config(chain: &'a MarkovChain, random: R, config: GeneratorConfig) -> Result<Self> {
		config.validate()?;
		let marks = config.mark_sampler();
		Ok(Self { chain, random, config, marks })
	}

	/// Generates one tweet of approximately `target_length` characters.
	///
	/// # Behavior
	/// - Starts a walk and emits its tokens separated by single spaces.
	/// - Stops once the text is at least `target_length` characters long, or
	///   at least `max_length`.
	/// - When a walk ends early, appends a punctuation mark and starts a new
	///   walk.
	/// - A token is only appended if the text, plus a final mark, still fits
	///   within `max_length`.
	/// - Appends a final mark unless the text already ends with one.
	///
	/// # Errors
	/// - `InvalidArgument` unless `2 <= target_length < max_length`.
	/// - `EmptyDistribution` if the chain was never trained.
	pub fn generate(&mut self, target_length: usize) -> Result<String> {
		let ceiling = self.config.max_length;
		if target_length < MIN_TARGET_LENGTH || target_length >= ceiling {
			return Err(GenError::InvalidArgument(format!(
				"target length must be between {} and {}, got {}",
				MIN_TARGET_LENGTH,
				ceiling - 1,
				target_length
			)));
		}

		let chain = self.chain;
		let mut walk = chain.walk(&mut self.random)?;
		let mut tweet = walk.advance(&mut self.random)?;
		if tweet.chars().count() >= ceiling {
			tweet = tweet.chars().take(ceiling - 1).collect();
		}
		let mut length = tweet.chars().count();

		while length < target_length && length < ceiling {
			if !walk.has_more() {
				tweet.push(self.random_punctuation()?);
				length += 1;
				if length >= target_length || length >= ceiling {
					break;
				}
				walk = chain.walk(&mut self.random)?;
			}

			// Keep room for the final mark
			let fits = walk
				.peek()
				.is_some_and(|token| length + token.chars().count() + 2 <= ceiling);
			if !fits {
				break;
			}

			let token = walk.advance(&mut self.random)?;
			length += token.chars().count() + 1;
			tweet.push(' ');
			tweet.push_str(&token);
		}

		if !self.is_punctuated(&tweet) {
			tweet.push(self.random_punctuation()?);
		}

		debug!("generated {} characters for target {}", tweet.chars().count(), target_length);
		Ok(tweet)
	}

	/// Generates `count` tweets with `generate`, in order.
	///
	/// A `count` of 0 returns an empty list.
	pub fn generate_many(&mut self, count: usize, target_length: usize) -> Result<Vec<String>> {
		(0..count).map(|_| self.generate(target_length)).collect()
	}

	/// Draws a terminal punctuation mark according to the configured weights.
	///
	/// Consumes one draw from the random source.
	pub fn random_punctuation(&mut self) -> Result<char> {
		self.marks.pick(&mut self.random).copied()
	}

	/// Returns true if `text` ends with one of the configured marks.
	pub fn is_punctuated(&self, text: &str) -> bool {
		text.chars()
			.last()
			.is_some_and(|last| self.marks.count(&last) > 0)
	}
}
