use std::collections::HashSet;

use wf_domain::Interval;

use crate::{context::BuildContext, fact::Source};

/// What to do with one source reference of a query.
#[derive(Debug)]
pub enum SourcePlan<'a> {
	/// The URL was already built for an earlier query.
	Reuse(Option<Interval>),
	Build(&'a Source),
}

/// Drops references whose URL already appeared earlier in the same query.
pub fn unique_sources(sources: &[Source]) -> Vec<&Source> {
	let mut seen = HashSet::new();
	let mut unique = Vec::with_capacity(sources.len());

	for source in sources {
		if seen.insert(source.url.as_str()) {
			unique.push(source);
		}
	}

	unique
}

/// Resolves each unique reference against the URL cache.
pub fn plan_sources<'a>(ctx: &BuildContext, sources: &'a [Source]) -> Vec<SourcePlan<'a>> {
	unique_sources(sources)
		.into_iter()
		.map(|source| match ctx.source_interval(&source.url) {
			Some(interval) => SourcePlan::Reuse(interval),
			None => SourcePlan::Build(source),
		})
		.collect()
}
