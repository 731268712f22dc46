use std::collections::{BTreeMap, HashMap};

use wf_domain::Interval;

/// Mutable state of one construction pass: the global unit counter, the
/// source-URL interval cache and the per-query interval lists.
///
/// A source URL maps to `None` when its document produced zero units.
#[derive(Debug, Default)]
pub struct BuildContext {
	next_index: usize,
	source_intervals: HashMap<String, Option<Interval>>,
	source_order: Vec<String>,
	query_intervals: BTreeMap<usize, Vec<Interval>>,
}
impl BuildContext {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn next_index(&self) -> usize {
		self.next_index
	}

	/// Claims `count` consecutive indices.
	pub fn allocate(&mut self, count: usize) -> Option<Interval> {
		let interval = Interval::spanning(self.next_index, count);

		self.next_index += count;

		interval
	}

	/// `Some(interval)` once the URL has been built, where `interval` may itself be empty.
	pub fn source_interval(&self, url: &str) -> Option<Option<Interval>> {
		self.source_intervals.get(url).copied()
	}

	pub fn record_source(&mut self, url: &str, interval: Option<Interval>) {
		if self.source_intervals.contains_key(url) {
			return;
		}

		self.source_intervals.insert(url.to_string(), interval);
		self.source_order.push(url.to_string());
	}

	/// Registers the query so that it appears in the output even with no material.
	pub fn open_query(&mut self, query: usize) {
		self.query_intervals.entry(query).or_default();
	}

	pub fn push_query_interval(&mut self, query: usize, interval: Interval) {
		self.query_intervals.entry(query).or_default().push(interval);
	}

	pub fn query_intervals(&self, query: usize) -> &[Interval] {
		self.query_intervals.get(&query).map(Vec::as_slice).unwrap_or(&[])
	}

	pub fn queries(&self) -> &BTreeMap<usize, Vec<Interval>> {
		&self.query_intervals
	}

	/// Built sources in first-seen order.
	pub fn sources(&self) -> impl Iterator<Item = (&str, Option<Interval>)> {
		self.source_order.iter().map(|url| (url.as_str(), self.source_intervals[url]))
	}
}
