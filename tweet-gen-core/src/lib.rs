//! Markov-chain tweet generation library.
//!
//! This crate trains a first-order word Markov chain on short texts and
//! generates new, length-bounded texts by weighted random walks:
//! - Weighted frequency tables and the bigram chain built on them
//! - Walk cursors and the tweet generator
//! - Tweet cleaning and CSV corpus loading
//! - Internal utilities for I/O and path handling

/// Chain, walks and generation logic.
pub mod model;

/// Injectable random sources.
pub mod random;

/// Generation settings.
pub mod config;

/// Tweet cleaning and training data extraction.
pub mod corpus;

/// I/O utilities (line reading, output writing, path helpers).
pub mod io;

/// Error type shared by the whole crate.
pub mod error;

pub use config::{GeneratorConfig, TerminalMark, MAX_TWEET_LENGTH};
pub use error::{GenError, Result};
pub use model::chain::{MarkovChain, Successor};
pub use model::distribution::WeightedSampler;
pub use model::generator::TextGenerator;
pub use model::walk::Walk;
pub use random::{RandomSource, ScriptedRandom, StdRandom};
