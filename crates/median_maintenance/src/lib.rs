mod checksum;
mod error;
mod source;
mod tracker;

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::num::NonZeroU64;
use std::path::Path;

use tracing::debug;

pub use checksum::{Checksum, DEFAULT_MODULUS, MedianSession};
pub use error::StreamError;
pub use source::LineSource;
pub use tracker::MedianTracker;

/// Checksum of the running medians of an in-memory sequence.
pub fn checksum_from_values<I>(values: I, modulus: NonZeroU64) -> u64
where
	I: IntoIterator<Item = i64>,
{
	let mut session = MedianSession::with_modulus(modulus);
	session.extend(values);

	debug!("Processed {} values, checksum {}", session.len(), session.finalize());
	session.finalize()
}

/// Checksum of the running medians of a line-per-integer text stream.
///
/// Fails on the first malformed line; no partial checksum is returned.
pub fn checksum_from_reader<R: BufRead>(reader: R, modulus: NonZeroU64) -> Result<u64, StreamError> {
	let mut session = MedianSession::with_modulus(modulus);

	for value in LineSource::new(reader) {
		session.insert(value?);
	}

	debug!("Processed {} lines, checksum {}", session.len(), session.finalize());
	Ok(session.finalize())
}

pub fn checksum_from_file(path: impl AsRef<Path>, modulus: NonZeroU64) -> Result<u64, StreamError> {
	let path = path.as_ref();
	let file = File::open(path).map_err(|source| StreamError::Open { path: path.to_path_buf(), source })?;

	debug!("Reading {}", path.display());
	checksum_from_reader(BufReader::new(file), modulus)
}
