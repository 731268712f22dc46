use std::path::PathBuf;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("Failed to access {path:?}.")]
	Io { path: PathBuf, source: std::io::Error },
	#[error("Malformed record in {path:?} at line {line}: {source}")]
	Json { path: PathBuf, line: usize, source: serde_json::Error },
	#[error("Malformed record in {path:?} at line {line}: {message}")]
	Malformed { path: PathBuf, line: usize, message: String },
}
