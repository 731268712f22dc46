mod error;
mod types;

pub use error::{Error, Result};
pub use types::{Build, Config, Corpus, Providers, Service, Wikipedia};

use std::{fs, path::Path};

pub fn load(path: &Path) -> Result<Config> {
	let raw = fs::read_to_string(path)
		.map_err(|err| Error::ReadConfig { path: path.to_path_buf(), source: err })?;

	let mut cfg: Config = toml::from_str(&raw)
		.map_err(|err| Error::ParseConfig { path: path.to_path_buf(), source: err })?;

	normalize(&mut cfg);

	validate(&cfg)?;

	Ok(cfg)
}

pub fn validate(cfg: &Config) -> Result<()> {
	if cfg.service.log_level.trim().is_empty() {
		return Err(Error::Validation {
			message: "service.log_level must be non-empty.".to_string(),
		});
	}

	for (label, prefix) in [
		("corpus.query_prefix", &cfg.corpus.query_prefix),
		("corpus.corpus_prefix", &cfg.corpus.corpus_prefix),
		("corpus.window_prefix", &cfg.corpus.window_prefix),
	] {
		if prefix.trim().is_empty() {
			return Err(Error::Validation { message: format!("{label} must be non-empty.") });
		}
		if prefix.chars().any(char::is_whitespace) {
			return Err(Error::Validation {
				message: format!("{label} must not contain whitespace."),
			});
		}
	}

	if cfg.corpus.corpus_prefix == cfg.corpus.query_prefix {
		return Err(Error::Validation {
			message: "corpus.corpus_prefix must differ from corpus.query_prefix.".to_string(),
		});
	}
	if cfg.build.window_size == 0 {
		return Err(Error::Validation {
			message: "build.window_size must be greater than zero.".to_string(),
		});
	}
	if !cfg.build.excerpt_match_threshold.is_finite() {
		return Err(Error::Validation {
			message: "build.excerpt_match_threshold must be a finite number.".to_string(),
		});
	}
	if !(cfg.build.excerpt_match_threshold > 0.0 && cfg.build.excerpt_match_threshold <= 1.0) {
		return Err(Error::Validation {
			message: "build.excerpt_match_threshold must be in the range (0.0, 1.0].".to_string(),
		});
	}
	if cfg.providers.wikipedia.api_base.trim().is_empty() {
		return Err(Error::Validation {
			message: "providers.wikipedia.api_base must be non-empty.".to_string(),
		});
	}
	if cfg.providers.wikipedia.timeout_ms == 0 {
		return Err(Error::Validation {
			message: "providers.wikipedia.timeout_ms must be greater than zero.".to_string(),
		});
	}

	Ok(())
}

fn normalize(cfg: &mut Config) {
	if cfg
		.build
		.missing_source_sentinel
		.as_deref()
		.map(|sentinel| sentinel.trim().is_empty())
		.unwrap_or(false)
	{
		cfg.build.missing_source_sentinel = None;
	}

	cfg.corpus.query_prefix = cfg.corpus.query_prefix.trim().to_string();
	cfg.corpus.corpus_prefix = cfg.corpus.corpus_prefix.trim().to_string();
	cfg.corpus.window_prefix = cfg.corpus.window_prefix.trim().to_string();
}
