use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum};
use color_eyre::eyre;

use wf_chunking::UnicodeSentenceSegmenter;
use wf_config::Config;
use wf_corpus::{Granularity, Pipeline, SentenceBase, StageOutput, facts_from_records};
use wf_providers::wikipedia::WikipediaClient;
use wf_storage::{io, models::DocRecord};

#[derive(Debug, Parser)]
#[command(
	version = wf_cli::VERSION,
	rename_all = "kebab",
	styles = wf_cli::styles(),
)]
pub struct Args {
	#[arg(long, short = 'c', value_name = "FILE")]
	pub config: PathBuf,
	#[command(subcommand)]
	pub command: Command,
}

#[derive(Debug, Subcommand)]
#[command(rename_all = "kebab")]
pub enum Command {
	/// Fetch the text of every source that lacks it and write the completed fact file.
	Hydrate {
		#[arg(long, value_name = "FILE")]
		facts: PathBuf,
		#[arg(long, value_name = "FILE")]
		out: PathBuf,
	},
	/// Build the corpus, queries and qrels for one granularity.
	Build(BuildArgs),
}

#[derive(Debug, clap::Args)]
#[command(rename_all = "kebab")]
pub struct BuildArgs {
	#[arg(long, value_name = "FILE")]
	pub facts: PathBuf,
	#[arg(long, short = 'o', value_name = "DIR")]
	pub out_dir: PathBuf,
	#[arg(long, short = 'g', value_enum)]
	pub granularity: GranularityArg,
	/// Overrides `build.window_size`.
	#[arg(long, value_name = "N")]
	pub window_size: Option<usize>,
	/// Defaults to the sentence corpus inside `--out-dir`.
	#[arg(long, value_name = "FILE")]
	pub sentence_corpus: Option<PathBuf>,
	/// Defaults to the sentence qrels inside `--out-dir`.
	#[arg(long, value_name = "FILE")]
	pub sentence_qrels: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum GranularityArg {
	Sentence,
	Paragraph,
	Article,
	Window,
}

/// File names of one output directory.
#[derive(Clone, Debug)]
pub struct OutputLayout {
	dir: PathBuf,
}
impl OutputLayout {
	pub fn new(dir: impl Into<PathBuf>) -> Self {
		Self { dir: dir.into() }
	}

	pub fn queries(&self) -> PathBuf {
		self.dir.join("queries.jsonl")
	}

	pub fn corpus(&self, granularity: Granularity) -> PathBuf {
		self.dir.join(format!("corpus-{}.jsonl", granularity.suffix()))
	}

	pub fn qrels(&self, granularity: Granularity) -> PathBuf {
		self.dir.join(format!("qrels-{}.tsv", granularity.suffix()))
	}

	pub fn query_intervals(&self, granularity: Granularity) -> PathBuf {
		self.dir.join(format!("queries-interval-{}.json", granularity.suffix()))
	}

	pub fn link_intervals(&self, granularity: Granularity) -> PathBuf {
		self.dir.join(format!("link-intervals-{}.jsonl", granularity.suffix()))
	}

	pub fn not_found(&self) -> PathBuf {
		self.dir.join("not-found.jsonl")
	}
}

pub async fn run(args: Args) -> eyre::Result<()> {
	let cfg = wf_config::load(&args.config)?;

	wf_cli::init_tracing(&cfg.service.log_level);

	match args.command {
		Command::Hydrate { facts, out } => hydrate(&cfg, &facts, &out).await,
		Command::Build(build_args) => build(&cfg, &build_args).map(|_| ()),
	}
}

pub async fn hydrate(cfg: &Config, facts: &Path, out: &Path) -> eyre::Result<()> {
	let mut records = io::read_facts(facts)?;
	let client = WikipediaClient::new(&cfg.providers.wikipedia)?;
	let report = wf_corpus::hydrate::hydrate(
		&mut records,
		&client,
		cfg.build.missing_source_sentinel.as_deref(),
	)
	.await?;

	io::write_json_pretty(out, &records)?;

	tracing::info!(
		path = %out.display(),
		records = records.len(),
		fetched = report.fetched,
		not_found = report.not_found,
		"Wrote hydrated fact file."
	);

	Ok(())
}

/// Computes one stage completely, then writes its files.
pub fn build(cfg: &Config, args: &BuildArgs) -> eyre::Result<StageOutput> {
	let granularity = resolve_granularity(cfg, args)?;
	let layout = OutputLayout::new(&args.out_dir);
	let records = io::read_facts(&args.facts)?;
	let facts = facts_from_records(&records);
	let base = match granularity {
		Granularity::Sentence => None,
		_ => {
			let corpus_path =
				args.sentence_corpus.clone().unwrap_or_else(|| layout.corpus(Granularity::Sentence));
			let qrels_path =
				args.sentence_qrels.clone().unwrap_or_else(|| layout.qrels(Granularity::Sentence));

			Some(load_sentence_base(cfg, &corpus_path, &qrels_path)?)
		},
	};
	let segmenter = UnicodeSentenceSegmenter;
	let output = Pipeline::new(cfg, &segmenter).run(&facts, granularity, base.as_ref())?;

	write_stage(&layout, &output)?;

	tracing::info!(
		granularity = %granularity.suffix(),
		queries = output.queries.len(),
		units = output.corpus.len(),
		qrels = output.qrels.len(),
		"Wrote stage outputs."
	);

	Ok(output)
}

fn resolve_granularity(cfg: &Config, args: &BuildArgs) -> eyre::Result<Granularity> {
	let granularity = match args.granularity {
		GranularityArg::Sentence => Granularity::Sentence,
		GranularityArg::Paragraph => Granularity::Paragraph,
		GranularityArg::Article => Granularity::Article,
		GranularityArg::Window => {
			let size = args.window_size.unwrap_or(cfg.build.window_size);

			if size == 0 {
				eyre::bail!("--window-size must be greater than zero.");
			}

			Granularity::Window { size }
		},
	};

	if args.window_size.is_some() && !matches!(granularity, Granularity::Window { .. }) {
		tracing::warn!("--window-size only applies to the window granularity; ignoring it.");
	}

	Ok(granularity)
}

fn load_sentence_base(cfg: &Config, corpus: &Path, qrels: &Path) -> eyre::Result<SentenceBase> {
	let corpus_records: Vec<DocRecord> = io::read_jsonl(corpus)?;
	let qrel_rows = io::read_qrels(qrels)?;

	Ok(SentenceBase::from_records(&corpus_records, &qrel_rows, &cfg.corpus)?)
}

fn write_stage(layout: &OutputLayout, output: &StageOutput) -> eyre::Result<()> {
	let granularity = output.granularity;

	io::write_jsonl(&layout.queries(), &output.queries)?;
	io::write_jsonl(&layout.corpus(granularity), &output.corpus)?;
	io::write_qrels(&layout.qrels(granularity), &output.qrels)?;
	io::write_json_pretty(&layout.query_intervals(granularity), &output.query_intervals)?;
	io::write_jsonl(&layout.link_intervals(granularity), &output.source_intervals)?;

	if granularity == Granularity::Sentence {
		io::write_jsonl(&layout.not_found(), &output.not_found)?;
	}

	Ok(())
}
