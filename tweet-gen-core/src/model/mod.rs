//! Markov chain text generation.
//!
//! This module provides the word-level generation pipeline:
//! - Frequency tables with deterministic weighted draws (`WeightedSampler`)
//! - The bigram transition table (`MarkovChain`)
//! - Per-walk cursors over a trained chain (`Walk`)
//! - Length-bounded tweet assembly (`TextGenerator`)

/// Observation counts over values, with weighted random draws.
pub mod distribution;

/// Bigram transition table with sentence start and end tracking.
///
/// Supports incremental and parallel training, and merging.
pub mod chain;

/// Cursor of one walk over a trained chain.
pub mod walk;

/// Tweet assembly from repeated walks.
///
/// Handles length bounds, restarts on early sentence ends, and terminal
/// punctuation.
pub mod generator;
