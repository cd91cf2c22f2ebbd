use log::trace;

use super::chain::{MarkovChain, Successor};
use crate::error::{GenError, Result};
use crate::random::RandomSource;

/// Cursor of one walk over a trained `MarkovChain`.
///
/// A walk either holds the token it will emit next, or is exhausted once
/// the end marker has been drawn. The chain itself is only borrowed, so
/// the table cannot change while a walk is in progress.
#[derive(Debug, Clone)]
pub struct Walk<'a> {
	chain: &'a MarkovChain,
	current: Option<String>,
}

impl<'a> Walk<'a> {
	pub(crate) fn new(chain: &'a MarkovChain, start: String) -> Self {
		Self { chain, current: Some(start) }
	}

	/// Returns true if `advance` will yield another token.
	pub fn has_more(&self) -> bool {
		self.current.is_some()
	}

	/// Returns the token `advance` will yield, without consuming it.
	pub fn peek(&self) -> Option<&str> {
		self.current.as_deref()
	}

	/// Emits the held token and moves to one of its successors.
	///
	/// Consumes one draw from `random`. Drawing the end marker exhausts the
	/// walk; the held token is still returned.
	///
	/// # Errors
	/// - `ExhaustedWalk` if the walk already ended.
	/// - `EmptyDistribution` if the held token was never trained, which can
	///   only happen after `MarkovChain::walk_from`. The walk is left as is.
	pub fn advance(&mut self, random: &mut dyn RandomSource) -> Result<String> {
		let Some(token) = self.current.as_deref() else {
			return Err(GenError::ExhaustedWalk);
		};

		let successors = self.chain.successors(token).ok_or_else(|| {
			GenError::EmptyDistribution(format!("no successors for token '{token}'"))
		})?;

		let next = match successors.pick(random)? {
			Successor::Word(word) => Some(word.clone()),
			Successor::End => None,
		};
		trace!("walk step '{}' -> {:?}", token, next);

		Ok(std::mem::replace(&mut self.current, next).unwrap_or_default())
	}
}
