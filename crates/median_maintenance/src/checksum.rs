use std::num::NonZeroU64;

use crate::tracker::MedianTracker;

pub const DEFAULT_MODULUS: NonZeroU64 = match NonZeroU64::new(10_000) {
	Some(modulus) => modulus,
	None => unreachable!(),
};

/// Sum of running medians, kept reduced modulo a fixed modulus so it never overflows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Checksum {
	modulus: NonZeroU64,
	value: u64,
	count: u64,
}

impl Default for Checksum {
	fn default() -> Self {
		Self::new(DEFAULT_MODULUS)
	}
}

impl Checksum {
	pub const fn new(modulus: NonZeroU64) -> Self {
		Self { modulus, value: 0, count: 0 }
	}

	pub fn add(&mut self, median: impl Into<i128>) {
		let modulus = i128::from(self.modulus.get());
		let folded = (i128::from(self.value) + median.into().rem_euclid(modulus)) % modulus;

		// folded is in [0, modulus)
		self.value = u64::try_from(folded).unwrap_or_default();
		self.count += 1;
	}

	/// Current sum modulo the modulus, always in `[0, modulus)`.
	pub const fn finalize(&self) -> u64 {
		self.value
	}

	pub const fn count(&self) -> u64 {
		self.count
	}

	pub const fn modulus(&self) -> NonZeroU64 {
		self.modulus
	}
}

/// One stream-processing session: a fresh tracker plus the checksum of its medians.
#[derive(Debug, Clone)]
pub struct MedianSession<T = i64> {
	tracker: MedianTracker<T>,
	checksum: Checksum,
}

impl<T: Ord + Copy + Into<i128>> Default for MedianSession<T> {
	fn default() -> Self {
		Self::with_modulus(DEFAULT_MODULUS)
	}
}

impl<T: Ord + Copy + Into<i128>> MedianSession<T> {
	pub const fn with_modulus(modulus: NonZeroU64) -> Self {
		Self { tracker: MedianTracker::new(), checksum: Checksum::new(modulus) }
	}

	pub fn insert(&mut self, value: T) -> T {
		let median = self.tracker.insert(value);
		self.checksum.add(median);
		median
	}

	pub const fn finalize(&self) -> u64 {
		self.checksum.finalize()
	}

	pub fn median(&self) -> Option<T> {
		self.tracker.median()
	}

	pub fn len(&self) -> usize {
		self.tracker.len()
	}

	pub fn is_empty(&self) -> bool {
		self.tracker.is_empty()
	}

	pub const fn tracker(&self) -> &MedianTracker<T> {
		&self.tracker
	}

	pub const fn checksum(&self) -> &Checksum {
		&self.checksum
	}
}

impl<T: Ord + Copy + Into<i128>> Extend<T> for MedianSession<T> {
	fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
		for value in iter {
			self.insert(value);
		}
	}
}


#[cfg(test)]
mod proptests {
	use super::*;
	use proptest::prelude::*;

	proptest! {
		// --- finalize stays in [0, modulus) ---
		#[test]
		fn finalize_in_range(
			values in proptest::collection::vec(any::<i64>(), 0..100),
			m in 1_u64..=u64::MAX,
		) {
			let modulus = NonZeroU64::new(m).unwrap();
			let mut session = MedianSession::with_modulus(modulus);
			session.extend(values);
			prop_assert!(session.finalize() < m);
		}

		// --- incremental reduction equals reducing the full sum ---
		#[test]
		fn matches_wide_sum(values in proptest::collection::vec(any::<i32>(), 1..100), m in 1_u64..50_000) {
			let modulus = NonZeroU64::new(m).unwrap();
			let mut session = MedianSession::with_modulus(modulus);
			let mut tracker = MedianTracker::new();
			let mut total = 0_i128;
			for v in values {
				session.insert(v);
				total += i128::from(tracker.insert(v));
			}
			prop_assert_eq!(i128::from(session.finalize()), total.rem_euclid(i128::from(m)));
		}
	}
}
