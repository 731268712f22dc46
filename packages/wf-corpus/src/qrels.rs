use std::collections::BTreeMap;

/// One relevance judgment over numeric query and unit indices.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct Judgment {
	pub query: usize,
	pub unit: usize,
	pub score: u32,
}

/// Sparse judgments keeping the maximum score per `(query, unit)` pair.
///
/// Zero scores are never stored.
#[derive(Clone, Debug, Default)]
pub struct JudgmentSet {
	scores: BTreeMap<(usize, usize), u32>,
}
impl JudgmentSet {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn record(&mut self, query: usize, unit: usize, score: u32) {
		if score == 0 {
			return;
		}

		let slot = self.scores.entry((query, unit)).or_insert(score);

		*slot = (*slot).max(score);
	}

	pub fn get(&self, query: usize, unit: usize) -> Option<u32> {
		self.scores.get(&(query, unit)).copied()
	}

	pub fn len(&self) -> usize {
		self.scores.len()
	}

	pub fn is_empty(&self) -> bool {
		self.scores.is_empty()
	}

	/// Judgments ordered by query, then unit.
	pub fn into_judgments(self) -> Vec<Judgment> {
		self.scores
			.into_iter()
			.map(|((query, unit), score)| Judgment { query, unit, score })
			.collect()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn keeps_maximum_and_drops_zero() {
		let mut set = JudgmentSet::new();

		set.record(0, 5, 2);
		set.record(0, 5, 4);
		set.record(0, 5, 1);
		set.record(1, 5, 0);

		assert_eq!(set.get(0, 5), Some(4));
		assert_eq!(set.get(1, 5), None);
		assert_eq!(set.len(), 1);
	}
}
