use std::collections::{BTreeMap, HashMap};

use serde::{Serialize, Serializer};

use wf_chunking::Segmenter;
use wf_config::Config;
use wf_domain::{Interval, format_id, parse_id};
use wf_storage::models::{DocRecord, NotFoundRecord, QrelRow};

use crate::{
	Error, Result,
	annotate::{self, Annotation},
	fact::Fact,
	propagate,
	qrels::Judgment,
	units::{BuildOptions, CorpusBuild, SourceGranularity, Unit, UnitBuilder},
	window,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Granularity {
	Sentence,
	Paragraph,
	Article,
	Window { size: usize },
}
impl Granularity {
	/// File name suffix for this granularity's outputs.
	pub fn suffix(&self) -> String {
		match self {
			Self::Sentence => "sent".to_string(),
			Self::Paragraph => "paragraphs".to_string(),
			Self::Article => "articles".to_string(),
			Self::Window { size } => format!("window{size}"),
		}
	}

	fn source_granularity(&self) -> SourceGranularity {
		match self {
			Self::Sentence | Self::Window { .. } => SourceGranularity::Sentence,
			Self::Paragraph => SourceGranularity::Paragraph,
			Self::Article => SourceGranularity::Article,
		}
	}
}

/// The persisted sentence stage: corpus texts and judgments keyed by numeric index.
#[derive(Debug, Default)]
pub struct SentenceBase {
	pub texts: HashMap<usize, String>,
	pub judgments: Vec<Judgment>,
}
impl SentenceBase {
	/// Parses persisted sentence records. Bad or duplicate ids are fatal; zero scores are dropped.
	pub fn from_records(
		corpus: &[DocRecord],
		qrels: &[QrelRow],
		prefixes: &wf_config::Corpus,
	) -> Result<Self> {
		let mut texts = HashMap::with_capacity(corpus.len());

		for record in corpus {
			let index = parse_prefixed(&prefixes.corpus_prefix, &record.id)?;

			if texts.insert(index, record.text.clone()).is_some() {
				return Err(Error::MalformedRecord {
					message: format!("duplicate sentence id {:?}.", record.id),
				});
			}
		}

		let mut judgments = Vec::with_capacity(qrels.len());

		for row in qrels {
			if row.score == 0 {
				continue;
			}

			judgments.push(Judgment {
				query: parse_prefixed(&prefixes.query_prefix, &row.query_id)?,
				unit: parse_prefixed(&prefixes.corpus_prefix, &row.corpus_id)?,
				score: row.score,
			});
		}

		Ok(Self { texts, judgments })
	}
}

/// Per-query intervals in query order. Serialized as a JSON object keyed by query id.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct QueryIntervals(pub Vec<(String, Vec<Interval>)>);
impl Serialize for QueryIntervals {
	fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: Serializer,
	{
		serializer.collect_map(self.0.iter().map(|(query, intervals)| (query, intervals)))
	}
}

/// Everything one granularity run emits, computed before anything is written.
#[derive(Debug)]
pub struct StageOutput {
	pub granularity: Granularity,
	pub queries: Vec<DocRecord>,
	pub corpus: Vec<DocRecord>,
	pub qrels: Vec<QrelRow>,
	pub query_intervals: QueryIntervals,
	/// Source-level intervals in first-seen order; `None` for a source with no units.
	pub source_intervals: Vec<Option<Interval>>,
	pub not_found: Vec<NotFoundRecord>,
}

pub struct Pipeline<'a> {
	cfg: &'a Config,
	segmenter: &'a dyn Segmenter,
}
impl<'a> Pipeline<'a> {
	pub fn new(cfg: &'a Config, segmenter: &'a dyn Segmenter) -> Self {
		Self { cfg, segmenter }
	}

	pub fn run(
		&self,
		facts: &[Fact],
		granularity: Granularity,
		base: Option<&SentenceBase>,
	) -> Result<StageOutput> {
		let options = BuildOptions::from_config(&self.cfg.build);
		let builder = UnitBuilder::new(granularity.source_granularity(), self.segmenter);
		let build = builder.build_corpus(facts, &options)?;
		let queries = self.query_records(facts);
		let source_intervals = build.context.sources().map(|(_, interval)| interval).collect();

		match granularity {
			Granularity::Sentence => {
				let Annotation { judgments, unmatched } =
					annotate::annotate(facts, &build, self.cfg.build.excerpt_match_threshold);
				let not_found = unmatched
					.into_iter()
					.map(|excerpt| NotFoundRecord {
						query_id: self.query_id(excerpt.query),
						score_text: excerpt.text,
						relevance: excerpt.score,
					})
					.collect();

				Ok(StageOutput {
					granularity,
					queries,
					corpus: self.corpus_records(&build.units, &self.cfg.corpus.corpus_prefix),
					qrels: self.qrel_rows(&judgments, &self.cfg.corpus.corpus_prefix),
					query_intervals: self.query_intervals(build.context.queries()),
					source_intervals,
					not_found,
				})
			},
			Granularity::Paragraph | Granularity::Article => {
				let base = require_base(base, granularity)?;
				let judgments = propagate::propagate(
					&base.judgments,
					&base.texts,
					&build.units,
					build.context.queries(),
				)?;

				Ok(StageOutput {
					granularity,
					queries,
					corpus: self.corpus_records(&build.units, &self.cfg.corpus.corpus_prefix),
					qrels: self.qrel_rows(&judgments, &self.cfg.corpus.corpus_prefix),
					query_intervals: self.query_intervals(build.context.queries()),
					source_intervals,
					not_found: Vec::new(),
				})
			},
			Granularity::Window { size } => {
				let base = require_base(base, granularity)?;

				check_sentence_stream(&build, base)?;

				let corpus = window::build_windows(&build.units, build.context.queries(), size)?;
				let judgments = propagate::propagate(
					&base.judgments,
					&base.texts,
					&corpus.windows,
					&corpus.query_intervals,
				)?;
				let units: Vec<Unit> =
					corpus.windows.into_iter().map(|window| window.unit).collect();

				Ok(StageOutput {
					granularity,
					queries,
					corpus: self.corpus_records(&units, &self.cfg.corpus.window_prefix),
					qrels: self.qrel_rows(&judgments, &self.cfg.corpus.window_prefix),
					query_intervals: self.query_intervals(&corpus.query_intervals),
					source_intervals,
					not_found: Vec::new(),
				})
			},
		}
	}

	fn query_id(&self, query: usize) -> String {
		format_id(&self.cfg.corpus.query_prefix, query)
	}

	fn query_records(&self, facts: &[Fact]) -> Vec<DocRecord> {
		facts
			.iter()
			.map(|fact| DocRecord {
				id: self.query_id(fact.id),
				title: String::new(),
				text: fact.text.clone(),
			})
			.collect()
	}

	fn corpus_records(&self, units: &[Unit], prefix: &str) -> Vec<DocRecord> {
		units
			.iter()
			.map(|unit| DocRecord {
				id: format_id(prefix, unit.index),
				title: unit.title.clone(),
				text: unit.text.clone(),
			})
			.collect()
	}

	fn qrel_rows(&self, judgments: &[Judgment], prefix: &str) -> Vec<QrelRow> {
		judgments
			.iter()
			.map(|judgment| QrelRow {
				query_id: self.query_id(judgment.query),
				corpus_id: format_id(prefix, judgment.unit),
				score: judgment.score,
			})
			.collect()
	}

	fn query_intervals(&self, intervals: &BTreeMap<usize, Vec<Interval>>) -> QueryIntervals {
		QueryIntervals(
			intervals
				.iter()
				.map(|(query, intervals)| (self.query_id(*query), intervals.clone()))
				.collect(),
		)
	}
}

fn require_base(base: Option<&SentenceBase>, granularity: Granularity) -> Result<&SentenceBase> {
	base.ok_or_else(|| Error::InvalidArgument {
		message: format!(
			"{granularity:?} granularity requires the sentence corpus and sentence qrels."
		),
	})
}

/// The rebuilt sentence stream must be the persisted one, index for index.
fn check_sentence_stream(build: &CorpusBuild, base: &SentenceBase) -> Result<()> {
	if build.units.len() != base.texts.len() {
		return Err(Error::IndexOutOfSync {
			message: format!(
				"rebuilt {} sentences but the sentence corpus holds {}.",
				build.units.len(),
				base.texts.len()
			),
		});
	}

	for unit in &build.units {
		if base.texts.get(&unit.index) != Some(&unit.text) {
			return Err(Error::IndexOutOfSync {
				message: format!("sentence {} differs from the sentence corpus.", unit.index),
			});
		}
	}

	Ok(())
}

fn parse_prefixed(prefix: &str, id: &str) -> Result<usize> {
	parse_id(prefix, id).ok_or_else(|| Error::MalformedRecord {
		message: format!("id {id:?} does not match `{prefix}-<n>`."),
	})
}
