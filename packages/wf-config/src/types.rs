use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct Config {
	pub service: Service,
	pub corpus: Corpus,
	pub build: Build,
	pub providers: Providers,
}

#[derive(Debug, Deserialize)]
pub struct Service {
	pub log_level: String,
}

/// Identifier prefixes. Every emitted id has the shape `<prefix>-<n>`.
#[derive(Clone, Debug, Deserialize)]
pub struct Corpus {
	pub query_prefix: String,
	pub corpus_prefix: String,
	pub window_prefix: String,
}

#[derive(Clone, Debug, Deserialize)]
pub struct Build {
	#[serde(default = "default_window_size")]
	pub window_size: usize,
	/// Minimum word-set Jaccard similarity for an excerpt to claim a sentence.
	#[serde(default = "default_excerpt_match_threshold")]
	pub excerpt_match_threshold: f64,
	/// Text the article fetch stores when a page has no extract. Sources carrying it are
	/// treated as missing.
	pub missing_source_sentinel: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Providers {
	pub wikipedia: Wikipedia,
}

#[derive(Clone, Debug, Deserialize)]
pub struct Wikipedia {
	pub api_base: String,
	pub timeout_ms: u64,
	#[serde(default = "default_user_agent")]
	pub user_agent: String,
}

fn default_window_size() -> usize {
	6
}

fn default_excerpt_match_threshold() -> f64 {
	0.2
}

fn default_user_agent() -> String {
	concat!("wikifacts-datasets/", env!("CARGO_PKG_VERSION")).to_string()
}
