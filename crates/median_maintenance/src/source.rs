use std::io::{BufRead, Lines};

use crate::error::StreamError;

/// Reads one integer per line, taken from the first whitespace-delimited token.
///
/// The first malformed line ends the stream: its error is yielded once and every later call returns
/// `None`.
pub struct LineSource<R> {
	lines: Lines<R>,
	line: usize,
	done: bool,
}

impl<R: BufRead> LineSource<R> {
	pub fn new(reader: R) -> Self {
		Self { lines: reader.lines(), line: 0, done: false }
	}
}

impl<R: BufRead> Iterator for LineSource<R> {
	type Item = Result<i64, StreamError>;

	fn next(&mut self) -> Option<Self::Item> {
		if self.done {
			return None;
		}

		let item = match self.lines.next()? {
			Ok(text) => {
				self.line += 1;
				parse_line(&text, self.line)
			},
			Err(e) => Err(StreamError::Io(e)),
		};

		self.done = item.is_err();
		Some(item)
	}
}

fn parse_line(text: &str, line: usize) -> Result<i64, StreamError> {
	let token = text.split_whitespace().next().unwrap_or_default();

	token.parse().map_err(|source| StreamError::Parse { token: token.to_string(), line, source })
}
