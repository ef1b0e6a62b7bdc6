use std::cmp::Reverse;
use std::collections::BinaryHeap;

/// Running median-low of a stream of values.
///
/// Values are split between a max-ordered lower half and a min-ordered upper half. After every
/// insertion each value in the lower half is `<=` each value in the upper half, and the lower half
/// holds as many values as the upper half or exactly one more, so its peak is the median-low.
///
/// A tracker has a single owner. Sharing one between threads needs external locking.
#[derive(Debug, Clone)]
pub struct MedianTracker<T = i64> {
	lower: BinaryHeap<T>,
	upper: BinaryHeap<Reverse<T>>,
}

impl<T: Ord + Copy> Default for MedianTracker<T> {
	fn default() -> Self {
		Self::new()
	}
}

impl<T: Ord + Copy> MedianTracker<T> {
	pub const fn new() -> Self {
		Self { lower: BinaryHeap::new(), upper: BinaryHeap::new() }
	}

	/// Adds `value` and returns the median-low of everything inserted so far.
	pub fn insert(&mut self, value: T) -> T {
		// an empty lower half is always seeded first
		if self.lower.peek().is_some_and(|&peak| value > peak) {
			self.upper.push(Reverse(value));
		} else {
			self.lower.push(value);
		}

		self.rebalance();

		self.lower.peek().copied().unwrap_or(value)
	}

	fn rebalance(&mut self) {
		if self.lower.len() < self.upper.len() {
			if let Some(Reverse(floor)) = self.upper.pop() {
				self.lower.push(floor);
			}
		} else if self.upper.len() + 1 < self.lower.len() {
			if let Some(peak) = self.lower.pop() {
				self.upper.push(Reverse(peak));
			}
		}
	}

	pub fn median(&self) -> Option<T> {
		self.lower_peak()
	}

	pub fn lower_peak(&self) -> Option<T> {
		self.lower.peek().copied()
	}

	pub fn upper_floor(&self) -> Option<T> {
		self.upper.peek().map(|&Reverse(v)| v)
	}

	pub fn len(&self) -> usize {
		self.lower.len() + self.upper.len()
	}

	pub fn is_empty(&self) -> bool {
		self.lower.is_empty()
	}

	pub fn lower_len(&self) -> usize {
		self.lower.len()
	}

	pub fn upper_len(&self) -> usize {
		self.upper.len()
	}
}

impl<T: Ord + Copy> Extend<T> for MedianTracker<T> {
	fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
		for value in iter {
			self.insert(value);
		}
	}
}

impl<T: Ord + Copy> FromIterator<T> for MedianTracker<T> {
	fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
		let mut tracker = Self::new();
		tracker.extend(iter);
		tracker
	}
}
