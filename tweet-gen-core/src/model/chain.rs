use std::collections::HashMap;
use std::sync::mpsc;
use std::thread;

use log::debug;

use super::distribution::WeightedSampler;
use super::walk::Walk;
use crate::error::{GenError, Result};
use crate::random::RandomSource;

/// Successor of a token in the chain.
///
/// `End` marks the end of a sentence. It sorts after every word, so in a
/// sampler it is always the last bucket of the cumulative scan.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Successor {
	Word(String),
	End,
}

impl Successor {
	/// Returns the word, or `None` for the end marker.
	pub fn as_word(&self) -> Option<&str> {
		match self {
			Successor::Word(word) => Some(word),
			Successor::End => None,
		}
	}
}

impl From<&str> for Successor {
	fn from(word: &str) -> Self {
		Successor::Word(word.to_owned())
	}
}

/// First-order Markov chain over word bigrams.
///
/// The chain is the trained table only. Walks over it are separate `Walk`
/// values borrowing the chain, so a trained chain can be shared read-only by
/// any number of concurrent walks.
///
/// # Invariants
/// - Every trained token owns a sampler with at least one observation
/// - Every start word is also a key of `transitions`
/// - Every `Successor::Word` recorded in a sampler is a key of `transitions`
#[derive(Clone, Debug, Default)]
pub struct MarkovChain {
	/// Mapping from a token to the distribution of what follows it
	transitions: HashMap<String, WeightedSampler<Successor>>,

	/// Tokens observed at the start of a sentence
	start_words: WeightedSampler<String>,
}

impl MarkovChain {
	/// Creates an untrained chain.
	pub fn new() -> Self {
		Self::default()
	}

	/// Builds a chain from a whole corpus, training chunks in parallel.
	///
	/// # Behavior
	/// - Splits the sentences into chunks (based on CPU cores * factor).
	/// - Spawns threads to train a partial chain for each chunk.
	/// - Merges all partial chains sequentially.
	///
	/// Counts are summed on merge, so the result is the same as training
	/// every sentence in order on a single chain.
	///
	/// # Errors
	/// - The first training error met by any chunk.
	/// - `Worker` if a training thread panicked.
	pub fn from_sentences(sentences: Vec<Vec<String>>) -> Result<Self> {
		Self::train_chunks(sentences, |chain, sentence| chain.train(sentence))
	}

	/// Splits `sentences` across worker threads, each applying `train` to
	/// its own partial chain, then merges the partial chains.
	///
	/// Sentences are moved into the workers, not cloned.
	fn train_chunks<F>(sentences: Vec<Vec<String>>, train: F) -> Result<Self>
	where
		F: Fn(&mut MarkovChain, Vec<String>) -> Result<()> + Send + Copy + 'static,
	{
		if sentences.is_empty() {
			return Ok(Self::new());
		}

		let total = sentences.len();
		let cpus = num_cpus::get();
		let factor = 8;
		let chunks = cpus * factor;
		let chunk_size = total.div_ceil(chunks);

		let (tx, rx) = mpsc::channel();
		let mut workers = Vec::new();
		let mut remaining = sentences.into_iter();
		loop {
			let chunk: Vec<Vec<String>> = remaining.by_ref().take(chunk_size).collect();
			if chunk.is_empty() {
				break;
			}
			let tx = tx.clone();

			workers.push(thread::spawn(move || {
				let mut partial = MarkovChain::new();
				let trained = chunk.into_iter().try_for_each(|sentence| train(&mut partial, sentence));
				// The receiver outlives every sender
				let _ = tx.send(trained.map(|_| partial));
			}));
		}
		drop(tx);

		// A panicking worker never sends, its partial chain would be lost
		let chunk_count = workers.len();
		for worker in workers {
			worker
				.join()
				.map_err(|_| GenError::Worker("training thread panicked".to_owned()))?;
		}

		let mut chain = MarkovChain::new();
		for partial in rx.iter() {
			chain.merge(&partial?);
		}

		debug!(
			"trained chain from {} sentences in {} chunks: {} tokens, {} observations",
			total,
			chunk_count,
			chain.len(),
			chain.observations()
		);
		Ok(chain)
	}

	/// Records one transition observation from `first` to `second`.
	fn add_bigram(&mut self, first: &str, second: Successor) {
		self.transitions
			.entry(first.to_owned())
			.or_default()
			.record(second);
	}

	/// Adds one sentence of training data.
	///
	/// - An empty sentence is ignored.
	/// - The first token is recorded as a start word.
	/// - Each consecutive pair is recorded as a transition.
	/// - The last token is recorded as transitioning to `Successor::End`.
	///
	/// # Errors
	/// Returns `InvalidArgument` if any token is empty. The sentence is
	/// checked before anything is recorded, so a rejected sentence leaves
	/// the chain untouched.
	pub fn train<I, S>(&mut self, sentence: I) -> Result<()>
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		let tokens: Vec<String> = sentence.into_iter().map(Into::into).collect();
		if let Some(position) = tokens.iter().position(|token| token.is_empty()) {
			return Err(GenError::InvalidArgument(format!(
				"empty token at position {position}"
			)));
		}

		let Some((first, rest)) = tokens.split_first() else {
			return Ok(());
		};

		self.start_words.record(first.clone());
		let mut previous = first;
		for token in rest {
			self.add_bigram(previous, Successor::Word(token.clone()));
			previous = token;
		}
		self.add_bigram(previous, Successor::End);

		Ok(())
	}

	/// Returns the successor distribution of `token`, if it was trained.
	pub fn successors(&self, token: &str) -> Option<&WeightedSampler<Successor>> {
		self.transitions.get(token)
	}

	/// Returns the distribution of sentence-initial tokens.
	pub fn start_words(&self) -> &WeightedSampler<String> {
		&self.start_words
	}

	/// Number of distinct trained tokens.
	pub fn len(&self) -> usize {
		self.transitions.len()
	}

	pub fn is_empty(&self) -> bool {
		self.transitions.is_empty()
	}

	/// Total number of transition observations, end markers included.
	pub fn observations(&self) -> usize {
		self.transitions.values().map(WeightedSampler::total).sum()
	}

	/// Starts a walk at a start word drawn by frequency.
	///
	/// Consumes one draw from `random`.
	///
	/// # Errors
	/// Returns `EmptyDistribution` if the chain was never trained.
	pub fn walk(&self, random: &mut dyn RandomSource) -> Result<Walk<'_>> {
		if self.start_words.total() == 0 {
			return Err(GenError::EmptyDistribution("chain has no start words".to_owned()));
		}
		let start = self.start_words.pick(random)?;
		Ok(Walk::new(self, start.clone()))
	}

	/// Starts a walk at an explicit token.
	///
	/// The token is not required to be a start word, but the chain must
	/// have been trained.
	///
	/// # Errors
	/// Returns `EmptyDistribution` if the chain was never trained.
	pub fn walk_from(&self, start: &str) -> Result<Walk<'_>> {
		if self.start_words.total() == 0 {
			return Err(GenError::EmptyDistribution("chain has no start words".to_owned()));
		}
		Ok(Walk::new(self, start.to_owned()))
	}

	/// Merges another chain into this one.
	///
	/// Counts for matching tokens and transitions are summed.
	pub fn merge(&mut self, other: &Self) {
		for (token, sampler) in &other.transitions {
			if let Some(existing) = self.transitions.get_mut(token) {
				existing.merge(sampler);
			} else {
				self.transitions.insert(token.clone(), sampler.clone());
			}
		}
		self.start_words.merge(&other.start_words);
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn corpus(size: usize) -> Vec<Vec<String>> {
		(0..size)
			.map(|i| vec![format!("w{}", i % 5), "end".to_owned()])
			.collect()
	}

	#[test]
	fn test_panicking_worker_is_an_error() {
		let result = MarkovChain::train_chunks(corpus(50), |chain, sentence| {
			if sentence[0] == "w3" {
				panic!("worker failure");
			}
			chain.train(sentence)
		});
		assert!(matches!(result, Err(GenError::Worker(_))));
	}

	#[test]
	fn test_every_chunk_is_merged() {
		let chain = MarkovChain::train_chunks(corpus(1001), |chain, sentence| chain.train(sentence)).unwrap();
		assert_eq!(chain.start_words().total(), 1001);
		assert_eq!(chain.observations(), 2002);
	}
}
