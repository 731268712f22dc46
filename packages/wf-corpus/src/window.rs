//! Fixed-width sliding windows over the global sentence stream.
//!
//! Windows ignore document boundaries: window `i` covers sentences `[i, i + W - 1]`
//! wherever they came from. A query's window intervals are derived from its
//! sentence intervals and then widened by `W - 1` windows towards each
//! neighbouring query, except left of the first query and right of the last.

use std::collections::BTreeMap;

use wf_domain::Interval;

use crate::{Error, Result, units::Unit};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Window {
	pub unit: Unit,
	pub start_sentence: usize,
}

#[derive(Debug)]
pub struct WindowCorpus {
	pub window_size: usize,
	pub total_sentences: usize,
	pub windows: Vec<Window>,
	/// Per-query window intervals after cross-query extension.
	pub query_intervals: BTreeMap<usize, Vec<Interval>>,
}

pub fn window_count(total_sentences: usize, window_size: usize) -> usize {
	if window_size == 0 || window_size > total_sentences {
		return 0;
	}

	total_sentences - window_size + 1
}

/// Windows over `sentences`, which must be ordered by index starting at zero.
pub fn assemble_windows(sentences: &[Unit], window_size: usize) -> Result<Vec<Window>> {
	check_window_size(window_size)?;

	let windows = sentences
		.windows(window_size)
		.enumerate()
		.map(|(index, span)| {
			let text = span.iter().map(|sentence| sentence.text.as_str()).collect::<Vec<_>>();

			Window {
				unit: Unit { index, title: String::new(), text: text.join(" ") },
				start_sentence: span[0].index,
			}
		})
		.collect();

	Ok(windows)
}

/// Maps sentence intervals into the window index space.
///
/// Each `[s, e]` becomes `[s, min(e + W - 1, T - 1) - (W - 1)]`, kept non-inverted.
/// Starts inside the last `W - 1` sentences lie past the last window; the cross-query
/// extension clamps them.
pub fn to_window_intervals(
	sentence_intervals: &[Interval],
	window_size: usize,
	total_sentences: usize,
) -> Vec<Interval> {
	if window_count(total_sentences, window_size) == 0 {
		return Vec::new();
	}

	let reach = window_size - 1;

	sentence_intervals
		.iter()
		.filter_map(|interval| {
			let extended_end = (interval.end() + reach).min(total_sentences - 1);
			let start = interval.start();

			Interval::new(start, (extended_end - reach).max(start))
		})
		.collect()
}

/// Widens every query's window intervals by `W - 1` towards its neighbours and
/// clamps the result into `[0, total_windows - 1]`.
///
/// Queries are visited in ascending id order. The first query keeps its starts and
/// the last query keeps its ends.
pub fn extend_across_queries(
	per_query: &BTreeMap<usize, Vec<Interval>>,
	window_size: usize,
	total_windows: usize,
) -> BTreeMap<usize, Vec<Interval>> {
	let reach = window_size.saturating_sub(1);
	let last_position = per_query.len().saturating_sub(1);
	let Some(last_window) = total_windows.checked_sub(1) else {
		return per_query.keys().map(|query| (*query, Vec::new())).collect();
	};

	per_query
		.iter()
		.enumerate()
		.map(|(position, (query, intervals))| {
			let extended = intervals
				.iter()
				.filter_map(|interval| {
					let mut start = interval.start();
					let mut end = interval.end();

					if position != 0 {
						start = start.saturating_sub(reach);
					}
					if position != last_position {
						end += reach;
					}

					Interval::new(start.min(last_window), end.min(last_window))
				})
				.collect();

			(*query, extended)
		})
		.collect()
}

/// Builds the window corpus and the extended per-query window intervals from a
/// sentence-granularity construction pass.
pub fn build_windows(
	sentences: &[Unit],
	sentence_intervals: &BTreeMap<usize, Vec<Interval>>,
	window_size: usize,
) -> Result<WindowCorpus> {
	let windows = assemble_windows(sentences, window_size)?;
	let total_sentences = sentences.len();
	let total_windows = windows.len();
	let raw: BTreeMap<usize, Vec<Interval>> = sentence_intervals
		.iter()
		.map(|(query, intervals)| {
			(*query, to_window_intervals(intervals, window_size, total_sentences))
		})
		.collect();
	let query_intervals = extend_across_queries(&raw, window_size, total_windows);

	if total_windows == 0 {
		tracing::warn!(
			window_size,
			total_sentences,
			"Window size exceeds the sentence stream. No windows built."
		);
	}

	tracing::info!(window_size, total_sentences, windows = total_windows, "Assembled windows.");

	Ok(WindowCorpus { window_size, total_sentences, windows, query_intervals })
}

fn check_window_size(window_size: usize) -> Result<()> {
	if window_size == 0 {
		return Err(Error::InvalidArgument {
			message: "window size must be greater than zero.".to_string(),
		});
	}

	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;

	fn interval(start: usize, end: usize) -> Interval {
		Interval::new(start, end).expect("Valid interval.")
	}

	fn sentences(count: usize) -> Vec<Unit> {
		(0..count)
			.map(|index| Unit { index, title: String::new(), text: format!("S{index}.") })
			.collect()
	}

	#[test]
	fn window_text_joins_sentences_with_spaces() {
		let windows = assemble_windows(&sentences(4), 3).expect("Windows must build.");

		assert_eq!(windows.len(), 2);
		assert_eq!(windows[0].unit.text, "S0. S1. S2.");
		assert_eq!(windows[1].unit.text, "S1. S2. S3.");
		assert_eq!(windows[1].start_sentence, 1);
	}

	#[test]
	fn zero_window_size_is_rejected() {
		assert!(assemble_windows(&sentences(3), 0).is_err());
	}

	#[test]
	fn sentence_interval_maps_to_window_interval() {
		// T = 10, W = 3: [2, 5] -> extended end 7 -> [2, 5].
		assert_eq!(to_window_intervals(&[interval(2, 5)], 3, 10), vec![interval(2, 5)]);
		// Tail interval: [8, 9] -> extended end 9 -> end 7 < start 8 -> [8, 8], past window 7.
		assert_eq!(to_window_intervals(&[interval(8, 9)], 3, 10), vec![interval(8, 8)]);
	}

	#[test]
	fn oversized_window_yields_nothing() {
		assert!(to_window_intervals(&[interval(0, 1)], 3, 2).is_empty());
	}

	#[test]
	fn extension_skips_outer_edges() {
		let per_query = BTreeMap::from([
			(0, vec![interval(0, 3)]),
			(1, vec![interval(4, 6)]),
			(2, vec![interval(7, 7)]),
		]);
		let extended = extend_across_queries(&per_query, 3, 8);

		assert_eq!(extended[&0], vec![interval(0, 5)]);
		assert_eq!(extended[&1], vec![interval(2, 7)]);
		assert_eq!(extended[&2], vec![interval(5, 7)]);
	}

	#[test]
	fn tail_start_is_clamped_after_extension() {
		let per_query = BTreeMap::from([(0, vec![interval(0, 4)]), (1, vec![interval(5, 5)])]);
		let extended = extend_across_queries(&per_query, 3, 5);

		assert_eq!(extended[&0], vec![interval(0, 4)]);
		assert_eq!(extended[&1], vec![interval(3, 4)]);
	}

	#[test]
	fn lone_tail_query_is_clamped_to_the_last_window() {
		let per_query = BTreeMap::from([(0, vec![interval(8, 8)])]);

		assert_eq!(extend_across_queries(&per_query, 3, 8)[&0], vec![interval(7, 7)]);
	}
}
