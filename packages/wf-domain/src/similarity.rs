use std::collections::HashSet;

use crate::normalize::normalize;

/// Lowercased word set of the normalized text.
pub fn word_set(text: &str) -> HashSet<String> {
	normalize(text).to_lowercase().split_whitespace().map(str::to_string).collect()
}

/// Jaccard similarity of two word sets. Two empty sets score zero.
pub fn jaccard(a: &HashSet<String>, b: &HashSet<String>) -> f64 {
	let union = a.union(b).count();

	if union == 0 {
		return 0.0;
	}

	a.intersection(b).count() as f64 / union as f64
}

/// Index of the candidate most similar to `target`, if any reaches `threshold`.
///
/// The earliest candidate wins ties.
pub fn best_match<'a, I>(target: &str, candidates: I, threshold: f64) -> Option<usize>
where
	I: IntoIterator<Item = (usize, &'a str)>,
{
	let target_words = word_set(target);
	let mut best: Option<(usize, f64)> = None;

	for (index, text) in candidates {
		let similarity = jaccard(&target_words, &word_set(text));

		if similarity < threshold {
			continue;
		}
		if best.map(|(_, score)| similarity > score).unwrap_or(true) {
			best = Some((index, similarity));
		}
	}

	best.map(|(index, _)| index)
}
