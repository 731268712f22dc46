use std::collections::{BTreeMap, BTreeSet, HashMap};

use wf_domain::{Interval, normalize};

use crate::{
	Error, Result,
	qrels::{Judgment, JudgmentSet},
	units::Unit,
	window::Window,
};

/// A corpus entry that sentence judgments can be lifted onto.
pub trait DerivedUnit {
	fn index(&self) -> usize;

	fn text(&self) -> &str;
}
impl DerivedUnit for Unit {
	fn index(&self) -> usize {
		self.index
	}

	fn text(&self) -> &str {
		&self.text
	}
}
impl DerivedUnit for Window {
	fn index(&self) -> usize {
		self.unit.index
	}

	fn text(&self) -> &str {
		&self.unit.text
	}
}

/// Lifts sentence-level judgments onto derived units.
///
/// For each query only the units inside its derived intervals are candidates. A
/// judged sentence scores every candidate whose normalized text contains the
/// normalized sentence; the retained score per pair is the maximum. `units[i]`
/// must carry index `i`.
pub fn propagate<U>(
	sentence_judgments: &[Judgment],
	sentence_texts: &HashMap<usize, String>,
	units: &[U],
	query_intervals: &BTreeMap<usize, Vec<Interval>>,
) -> Result<Vec<Judgment>>
where
	U: DerivedUnit,
{
	let mut by_query: BTreeMap<usize, Vec<(usize, u32)>> = BTreeMap::new();

	for judgment in sentence_judgments.iter().filter(|judgment| judgment.score > 0) {
		by_query.entry(judgment.query).or_default().push((judgment.unit, judgment.score));
	}

	let mut normalized_units: Vec<Option<String>> = vec![None; units.len()];
	let mut out = JudgmentSet::new();

	for (query, sentences) in &by_query {
		let candidates = candidate_units(*query, query_intervals, units)?;

		for (sentence, score) in sentences {
			let Some(sentence_text) = sentence_texts.get(sentence) else {
				tracing::warn!(query, sentence, "Judged sentence is absent from the corpus.");

				continue;
			};
			let needle = normalize(sentence_text);

			if needle.is_empty() {
				continue;
			}

			let mut matched = false;

			for &candidate in &candidates {
				let haystack = normalized_units[candidate]
					.get_or_insert_with(|| normalize(units[candidate].text()));

				if haystack.contains(needle.as_str()) {
					out.record(*query, candidate, *score);

					matched = true;
				}
			}

			if !matched {
				tracing::debug!(query, sentence, "Judged sentence matched no derived unit.");
			}
		}
	}

	if out.is_empty() && !by_query.is_empty() {
		tracing::warn!("No judged sentence matched any derived unit.");
	}

	tracing::info!(
		queries = by_query.len(),
		judgments = out.len(),
		"Propagated judgments onto derived units."
	);

	Ok(out.into_judgments())
}

fn candidate_units<U>(
	query: usize,
	query_intervals: &BTreeMap<usize, Vec<Interval>>,
	units: &[U],
) -> Result<BTreeSet<usize>>
where
	U: DerivedUnit,
{
	let mut candidates = BTreeSet::new();

	for interval in query_intervals.get(&query).map(Vec::as_slice).unwrap_or(&[]) {
		for index in interval.indices() {
			let unit = units.get(index).ok_or_else(|| Error::IndexOutOfSync {
				message: format!(
					"query {query} references unit {index} but only {} units exist.",
					units.len()
				),
			})?;

			if unit.index() != index {
				return Err(Error::IndexOutOfSync {
					message: format!("unit at position {index} carries index {}.", unit.index()),
				});
			}

			candidates.insert(index);
		}
	}

	Ok(candidates)
}
