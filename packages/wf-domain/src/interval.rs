use std::fmt;

use serde::{Deserialize, Serialize};

/// Closed range `[start, end]` over a global unit index space. Always `start <= end`.
///
/// Zero-unit spans are not representable; callers carry `Option<Interval>` instead.
/// Serialized as a two-element array, `[start, end]`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "(usize, usize)", into = "(usize, usize)")]
pub struct Interval {
	start: usize,
	end: usize,
}
impl Interval {
	pub fn new(start: usize, end: usize) -> Option<Self> {
		(start <= end).then_some(Self { start, end })
	}

	/// Interval covering `count` units starting at `start`, or `None` when `count` is zero.
	pub fn spanning(start: usize, count: usize) -> Option<Self> {
		let last = count.checked_sub(1)?;

		Self::new(start, start.checked_add(last)?)
	}

	pub fn start(&self) -> usize {
		self.start
	}

	pub fn end(&self) -> usize {
		self.end
	}

	pub fn unit_count(&self) -> usize {
		self.end - self.start + 1
	}

	pub fn overlaps(&self, other: &Self) -> bool {
		self.start <= other.end && other.start <= self.end
	}

	pub fn indices(&self) -> std::ops::RangeInclusive<usize> {
		self.start..=self.end
	}
}
impl fmt::Display for Interval {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "[{}, {}]", self.start, self.end)
	}
}
impl TryFrom<(usize, usize)> for Interval {
	type Error = String;

	fn try_from((start, end): (usize, usize)) -> Result<Self, Self::Error> {
		Self::new(start, end).ok_or_else(|| format!("Interval start {start} exceeds end {end}."))
	}
}
impl From<Interval> for (usize, usize) {
	fn from(interval: Interval) -> Self {
		(interval.start, interval.end)
	}
}
