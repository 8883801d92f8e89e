//! Library error type.

pub type Result<T> = std::result::Result<T, Error>;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
	#[error("JSON error: {0}")]
	SerdeJSON(#[from] serde_json::Error),
	#[error("parsing error: {0}")]
	Parse(String),
	#[error("validation error: {0}")]
	Validation(String),
	/// Nothing is left of the identifier once normalized.
	#[error("identifier \"{0}\" is empty after normalization")]
	EmptyIdentifier(String),
	/// A package tried to claim one of the virtual identifiers.
	#[error("identifier \"{0}\" is reserved")]
	ReservedIdentifier(String),
}
