use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{GenError, Result};
use crate::model::distribution::WeightedSampler;

/// Character ceiling of a generated tweet.
pub const MAX_TWEET_LENGTH: usize = 280;

/// A punctuation mark that may end a generated sentence, with its draw weight.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct TerminalMark {
	pub mark: char,
	pub weight: u32,
}

/// Generation settings.
///
/// Every field has a default, so a JSON file only needs the keys it
/// overrides:
///
/// ```json
/// { "max_length": 140 }
/// ```
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(default)]
pub struct GeneratorConfig {
	/// Hard ceiling on the length of a generated string, in characters.
	pub max_length: usize,

	/// Marks used to terminate sentences. `.` is drawn 70% of the time by
	/// default, `!`, `?` and `;` share the rest.
	pub terminal_marks: Vec<TerminalMark>,
}

impl Default for GeneratorConfig {
	fn default() -> Self {
		Self {
			max_length: MAX_TWEET_LENGTH,
			terminal_marks: vec![
				TerminalMark { mark: '.', weight: 7 },
				TerminalMark { mark: '!', weight: 1 },
				TerminalMark { mark: '?', weight: 1 },
				TerminalMark { mark: ';', weight: 1 },
			],
		}
	}
}

impl GeneratorConfig {
	/// Loads and validates a configuration from a JSON file.
	pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
		let text = std::fs::read_to_string(path)?;
		let config: Self = serde_json::from_str(&text)?;
		config.validate()?;
		Ok(config)
	}

	/// Checks the configuration.
	///
	/// # Errors
	/// Returns `InvalidArgument` if:
	/// - `max_length` leaves no room for a two character target and a mark
	/// - no terminal mark is configured
	/// - a mark has a zero weight or appears twice
	pub fn validate(&self) -> Result<()> {
		if self.max_length < 3 {
			return Err(GenError::InvalidArgument(format!(
				"max_length must be at least 3, got {}",
				self.max_length
			)));
		}
		if self.terminal_marks.is_empty() {
			return Err(GenError::InvalidArgument("no terminal marks configured".to_owned()));
		}

		let mut seen = HashSet::new();
		for terminal in &self.terminal_marks {
			if terminal.weight == 0 {
				return Err(GenError::InvalidArgument(format!(
					"terminal mark '{}' has a zero weight",
					terminal.mark
				)));
			}
			if !seen.insert(terminal.mark) {
				return Err(GenError::InvalidArgument(format!(
					"terminal mark '{}' is configured twice",
					terminal.mark
				)));
			}
		}
		Ok(())
	}

	/// Builds the distribution used to draw terminal marks.
	pub(crate) fn mark_sampler(&self) -> WeightedSampler<char> {
		let mut sampler = WeightedSampler::new();
		for terminal in &self.terminal_marks {
			sampler.record_n(terminal.mark, terminal.weight as usize);
		}
		sampler
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_default_mark_weights() {
		let sampler = GeneratorConfig::default().mark_sampler();
		assert_eq!(sampler.total(), 10);
		assert_eq!(sampler.count(&'.'), 7);
		assert_eq!(sampler.count(&';'), 1);
	}

	#[test]
	fn test_huge_weights_build_at_once() {
		let config = GeneratorConfig {
			terminal_marks: vec![
				TerminalMark { mark: '.', weight: 4_000_000_000 },
				TerminalMark { mark: '!', weight: 1 },
			],
			..Default::default()
		};
		assert!(config.validate().is_ok());
		let sampler = config.mark_sampler();
		assert_eq!(sampler.total(), 4_000_000_001);
		assert_eq!(sampler.count(&'.'), 4_000_000_000);
	}

	#[test]
	fn test_partial_json_uses_defaults() {
		let config: GeneratorConfig = serde_json::from_str(r#"{ "max_length": 140 }"#).unwrap();
		assert_eq!(config.max_length, 140);
		assert_eq!(config.terminal_marks, GeneratorConfig::default().terminal_marks);
		assert!(config.validate().is_ok());
	}

	#[test]
	fn test_validate_rejects_bad_marks() {
		let mut config = GeneratorConfig::default();
		config.terminal_marks.push(TerminalMark { mark: '.', weight: 1 });
		assert!(matches!(config.validate(), Err(GenError::InvalidArgument(_))));

		config.terminal_marks = vec![TerminalMark { mark: '.', weight: 0 }];
		assert!(matches!(config.validate(), Err(GenError::InvalidArgument(_))));

		config.terminal_marks.clear();
		assert!(matches!(config.validate(), Err(GenError::InvalidArgument(_))));
	}

	#[test]
	fn test_validate_rejects_tiny_ceiling() {
		let config = GeneratorConfig { max_length: 2, ..Default::default() };
		assert!(matches!(config.validate(), Err(GenError::InvalidArgument(_))));
	}
}
