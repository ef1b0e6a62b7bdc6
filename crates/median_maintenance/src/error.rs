use std::io;
use std::num::ParseIntError;
use std::path::PathBuf;

#[derive(thiserror::Error, Debug)]
pub enum StreamError {
	#[error("Couldn't convert {token:?} on line {line}")]
	Parse {
		token: String,
		line: usize,
		#[source]
		source: ParseIntError,
	},
	#[error("Failed to open {}", path.display())]
	Open {
		path: PathBuf,
		#[source]
		source: io::Error,
	},
	#[error("Failed to read input")]
	Io(#[from] io::Error),
}

impl StreamError {
	/// Offending text for a parse failure.
	pub fn token(&self) -> Option<&str> {
		match self {
			Self::Parse { token, .. } => Some(token),
			Self::Open { .. } | Self::Io(_) => None,
		}
	}
}
