use wf_chunking::{Segmenter, split_paragraphs};
use wf_domain::{Interval, normalize};

use crate::{
	Error, Result,
	context::BuildContext,
	dedup::{self, SourcePlan},
	fact::{Fact, Source},
};

/// Granularities built one source document at a time.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SourceGranularity {
	Sentence,
	Paragraph,
	Article,
}

/// One addressable corpus entry. `index` is its position in the global index space.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Unit {
	pub index: usize,
	pub title: String,
	pub text: String,
}

#[derive(Clone, Debug, Default)]
pub struct BuildOptions {
	/// Normalized text marking a source the fetch stage could not find.
	pub missing_source_sentinel: Option<String>,
}
impl BuildOptions {
	pub fn from_config(cfg: &wf_config::Build) -> Self {
		Self { missing_source_sentinel: cfg.missing_source_sentinel.as_deref().map(normalize) }
	}
}

/// Result of the construction pass.
#[derive(Debug)]
pub struct CorpusBuild {
	pub units: Vec<Unit>,
	pub context: BuildContext,
	pub missing_sources: usize,
}

pub struct UnitBuilder<'a> {
	granularity: SourceGranularity,
	segmenter: &'a dyn Segmenter,
}
impl<'a> UnitBuilder<'a> {
	pub fn new(granularity: SourceGranularity, segmenter: &'a dyn Segmenter) -> Self {
		Self { granularity, segmenter }
	}

	/// Unit texts of one normalized document, in document order.
	pub fn segment<'t>(&self, normalized: &'t str) -> Vec<&'t str> {
		match self.granularity {
			SourceGranularity::Sentence => self.segmenter.sentences(normalized),
			SourceGranularity::Paragraph => split_paragraphs(normalized),
			SourceGranularity::Article if normalized.is_empty() => Vec::new(),
			SourceGranularity::Article => vec![normalized],
		}
	}

	/// Appends the units of one document and returns the interval covering them.
	pub fn build(
		&self,
		ctx: &mut BuildContext,
		units: &mut Vec<Unit>,
		normalized: &str,
	) -> Result<Option<Interval>> {
		if units.len() != ctx.next_index() {
			return Err(Error::IndexOutOfSync {
				message: format!(
					"counter is at {} but {} units exist.",
					ctx.next_index(),
					units.len()
				),
			});
		}

		let segments = self.segment(normalized);
		let start = ctx.next_index();
		let interval = ctx.allocate(segments.len());

		units.extend(segments.into_iter().enumerate().map(|(offset, text)| Unit {
			index: start + offset,
			title: String::new(),
			text: text.to_string(),
		}));

		Ok(interval)
	}

	/// Runs the construction pass over every fact, in fact order.
	pub fn build_corpus(&self, facts: &[Fact], options: &BuildOptions) -> Result<CorpusBuild> {
		let mut ctx = BuildContext::new();
		let mut units = Vec::new();
		let mut missing_sources = 0_usize;

		for fact in facts {
			ctx.open_query(fact.id);

			for plan in dedup::plan_sources(&ctx, &fact.sources) {
				let interval = match plan {
					SourcePlan::Reuse(interval) => interval,
					SourcePlan::Build(source) => {
						let Some(normalized) = usable_text(source, options) else {
							tracing::warn!(
								query = fact.id,
								url = %source.url,
								"Source text is missing. Skipping reference."
							);

							missing_sources += 1;

							continue;
						};
						let interval = self.build(&mut ctx, &mut units, &normalized)?;

						if interval.is_none() {
							tracing::warn!(
								query = fact.id,
								url = %source.url,
								granularity = ?self.granularity,
								"Source produced no units."
							);
						}

						ctx.record_source(&source.url, interval);

						interval
					},
				};

				if let Some(interval) = interval {
					ctx.push_query_interval(fact.id, interval);
				}
			}
		}

		tracing::info!(
			granularity = ?self.granularity,
			units = units.len(),
			queries = facts.len(),
			missing_sources,
			"Built corpus."
		);

		Ok(CorpusBuild { units, context: ctx, missing_sources })
	}
}

fn usable_text(source: &Source, options: &BuildOptions) -> Option<String> {
	let normalized = normalize(source.text.as_deref()?);

	if normalized.is_empty() {
		return None;
	}
	if options.missing_source_sentinel.as_deref() == Some(normalized.as_str()) {
		return None;
	}

	Some(normalized)
}
