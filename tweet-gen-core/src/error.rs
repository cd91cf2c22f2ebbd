use thiserror::Error;

/// Errors raised by the chain, the generator and their collaborators.
///
/// The first three variants are contract violations and are raised at the
/// offending call. The remaining ones report training thread failures and
/// wrap ambient I/O and configuration failures.
#[derive(Error, Debug)]
pub enum GenError {
	#[error("Invalid argument: {0}")]
	InvalidArgument(String),

	#[error("Empty distribution: {0}")]
	EmptyDistribution(String),

	#[error("Walk exhausted: no further tokens")]
	ExhaustedWalk,

	#[error("Worker error: {0}")]
	Worker(String),

	#[error("IO error: {0}")]
	Io(#[from] std::io::Error),

	#[error("Config error: {0}")]
	Config(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, GenError>;
