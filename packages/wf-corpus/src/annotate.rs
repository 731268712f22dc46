use wf_domain::similarity;

use crate::{
	dedup,
	fact::Fact,
	qrels::{Judgment, JudgmentSet},
	units::CorpusBuild,
};

/// A judged excerpt that matched no unit of its source.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnmatchedExcerpt {
	pub query: usize,
	pub text: String,
	pub score: u32,
}

#[derive(Debug, Default)]
pub struct Annotation {
	pub judgments: Vec<Judgment>,
	pub unmatched: Vec<UnmatchedExcerpt>,
}

/// Assigns each positively scored excerpt to the most similar unit of its source.
///
/// Candidates are limited to the units built from the excerpt's own source document.
pub fn annotate(facts: &[Fact], build: &CorpusBuild, threshold: f64) -> Annotation {
	let mut judgments = JudgmentSet::new();
	let mut unmatched = Vec::new();

	for fact in facts {
		for source in dedup::unique_sources(&fact.sources) {
			let Some(Some(interval)) = build.context.source_interval(&source.url) else {
				continue;
			};

			for excerpt in source.excerpts.iter().filter(|excerpt| excerpt.score > 0) {
				let candidates = interval
					.indices()
					.filter_map(|index| build.units.get(index))
					.map(|unit| (unit.index, unit.text.as_str()));

				match similarity::best_match(&excerpt.text, candidates, threshold) {
					Some(unit) => judgments.record(fact.id, unit, excerpt.score),
					None => {
						tracing::debug!(
							query = fact.id,
							url = %source.url,
							"Excerpt matched no unit."
						);

						unmatched.push(UnmatchedExcerpt {
							query: fact.id,
							text: excerpt.text.clone(),
							score: excerpt.score,
						});
					},
				}
			}
		}
	}

	tracing::info!(
		judgments = judgments.len(),
		unmatched = unmatched.len(),
		"Annotated sentence-level judgments."
	);

	Annotation { judgments: judgments.into_judgments(), unmatched }
}
