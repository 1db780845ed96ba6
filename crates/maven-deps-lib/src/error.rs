//! Library error type.

pub type Result<T> = std::result::Result<T, Error>;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
	#[error("download failed: {0}")]
	Download(#[from] crate::repository::DownloadError),
	#[error("metadata error: {0}")]
	Metadata(#[from] crate::repository::MetadataError),
	#[error("operation not supported: {0}")]
	UnsupportedOperation(&'static str),
	#[error(transparent)]
	Aggregate(#[from] AggregateError),
	#[error("IO error: {0}")]
	IO(#[from] std::io::Error),
	#[error("cache IO error: {0}")]
	CacheIO(std::io::Error),
	#[error("zip error: {0}")]
	Zip(#[from] zip::result::ZipError),
	#[error("parsing error: {0}")]
	Parse(String),
	#[error("version of {0} is already resolved")]
	VersionAlreadyResolved(String),
	#[error("classpath injection failed: {0}")]
	Injection(String),
}

/// Every candidate repository failed for one artifact.
///
/// One cause is recorded per repository, in the order the repositories were
/// tried, so the caller sees every failure instead of only the last one.
#[derive(Debug)]
pub struct AggregateError {
	what: String,
	causes: Vec<Error>,
}

impl AggregateError {
	pub fn new(what: impl Into<String>) -> Self {
		AggregateError { what: what.into(), causes: Vec::new() }
	}

	pub fn push(&mut self, cause: Error) {
		self.causes.push(cause);
	}

	/// One cause per attempted repository, in attempt order.
	pub fn causes(&self) -> &[Error] {
		&self.causes
	}
}

impl std::fmt::Display for AggregateError {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", self.what)?;
		for cause in &self.causes {
			write!(f, "\n\tcaused by: {}", cause)?;
		}
		Ok(())
	}
}

impl std::error::Error for AggregateError {}
