use std::{
	env, fs,
	path::PathBuf,
	sync::atomic::{AtomicU64, Ordering},
	time::{SystemTime, UNIX_EPOCH},
};

use toml::Value;

use wf_config::Config;

const SAMPLE_CONFIG_TEMPLATE_TOML: &str = include_str!("fixtures/sample_config.template.toml");

fn sample_toml_with_build(window_size: i64, threshold: f64, sentinel: &str) -> String {
	let mut value: Value =
		toml::from_str(SAMPLE_CONFIG_TEMPLATE_TOML).expect("Failed to parse template config.");
	let root = value.as_table_mut().expect("Template config must be a table.");
	let build = root
		.get_mut("build")
		.and_then(Value::as_table_mut)
		.expect("Template config must include [build].");

	build.insert("window_size".to_string(), Value::Integer(window_size));
	build.insert("excerpt_match_threshold".to_string(), Value::Float(threshold));
	build.insert("missing_source_sentinel".to_string(), Value::String(sentinel.to_string()));

	toml::to_string(&value).expect("Failed to render template config.")
}

fn write_temp_config(payload: String) -> PathBuf {
	static COUNTER: AtomicU64 = AtomicU64::new(0);

	let nanos = SystemTime::now()
		.duration_since(UNIX_EPOCH)
		.expect("System time must be valid.")
		.as_nanos();
	let ordinal = COUNTER.fetch_add(1, Ordering::SeqCst);
	let pid = std::process::id();
	let mut path = env::temp_dir();

	path.push(format!("wf_config_test_{nanos}_{pid}_{ordinal}.toml"));

	fs::write(&path, payload).expect("Failed to write test config.");

	path
}

fn base_config() -> Config {
	toml::from_str(SAMPLE_CONFIG_TEMPLATE_TOML).expect("Failed to parse test config.")
}

#[test]
fn sample_config_loads() {
	let path = write_temp_config(SAMPLE_CONFIG_TEMPLATE_TOML.to_string());
	let result = wf_config::load(&path);

	fs::remove_file(&path).expect("Failed to remove test config.");

	let cfg = result.expect("Sample config must be valid.");

	assert_eq!(cfg.build.window_size, 6);
	assert_eq!(cfg.corpus.window_prefix, "bw_window");
	assert_eq!(cfg.build.missing_source_sentinel.as_deref(), Some("Текст не найден."));
}

#[test]
fn build_defaults_apply_when_omitted() {
	let mut value: Value =
		toml::from_str(SAMPLE_CONFIG_TEMPLATE_TOML).expect("Failed to parse template config.");
	let build = value
		.get_mut("build")
		.and_then(Value::as_table_mut)
		.expect("Template config must include [build].");

	build.clear();

	let cfg: Config = toml::from_str(&toml::to_string(&value).expect("Failed to render config."))
		.expect("Failed to parse config without build keys.");

	assert_eq!(cfg.build.window_size, 6);
	assert!((cfg.build.excerpt_match_threshold - 0.2).abs() < 1e-12);
	assert!(cfg.build.missing_source_sentinel.is_none());
	assert!(cfg.providers.wikipedia.user_agent.starts_with("wikifacts-datasets/"));
}

#[test]
fn window_size_must_be_positive() {
	let path = write_temp_config(sample_toml_with_build(0, 0.2, "x"));
	let result = wf_config::load(&path);

	fs::remove_file(&path).expect("Failed to remove test config.");

	let err = result.expect_err("Expected window_size validation error.");

	assert!(
		err.to_string().contains("build.window_size must be greater than zero."),
		"Unexpected error: {err}"
	);
}

#[test]
fn excerpt_threshold_must_be_in_range() {
	for threshold in [0.0, 1.5, -0.1] {
		let path = write_temp_config(sample_toml_with_build(6, threshold, "x"));
		let result = wf_config::load(&path);

		fs::remove_file(&path).expect("Failed to remove test config.");

		let err = result.expect_err("Expected threshold validation error.");

		assert!(
			err.to_string().contains("build.excerpt_match_threshold must be in the range"),
			"Unexpected error for {threshold}: {err}"
		);
	}
}

#[test]
fn blank_sentinel_is_normalized_to_none() {
	let path = write_temp_config(sample_toml_with_build(3, 0.5, "   "));
	let result = wf_config::load(&path);

	fs::remove_file(&path).expect("Failed to remove test config.");

	let cfg = result.expect("Config with blank sentinel must load.");

	assert!(cfg.build.missing_source_sentinel.is_none());
}

#[test]
fn prefixes_must_be_non_empty_and_distinct() {
	let mut cfg = base_config();

	cfg.corpus.window_prefix = " ".to_string();

	let err = wf_config::validate(&cfg).expect_err("Expected prefix validation error.");

	assert!(
		err.to_string().contains("corpus.window_prefix must be non-empty."),
		"Unexpected error: {err}"
	);

	let mut cfg = base_config();

	cfg.corpus.corpus_prefix = cfg.corpus.query_prefix.clone();

	let err = wf_config::validate(&cfg).expect_err("Expected distinct prefix validation error.");

	assert!(
		err.to_string().contains("corpus.corpus_prefix must differ from corpus.query_prefix."),
		"Unexpected error: {err}"
	);
}

#[test]
fn wikipedia_timeout_must_be_positive() {
	let mut cfg = base_config();

	cfg.providers.wikipedia.timeout_ms = 0;

	let err = wf_config::validate(&cfg).expect_err("Expected timeout validation error.");

	assert!(
		err.to_string().contains("providers.wikipedia.timeout_ms must be greater than zero."),
		"Unexpected error: {err}"
	);
}

#[test]
fn missing_file_reports_path() {
	let mut path = env::temp_dir();

	path.push("wf_config_test_does_not_exist.toml");

	let err = wf_config::load(&path).expect_err("Expected read error.");

	assert!(matches!(err, wf_config::Error::ReadConfig { .. }), "Unexpected error: {err}");
}
