//! Line-delimited JSON and TSV persistence for corpus, query, qrel and interval files.

use std::{
	fs::{self, File},
	io::{BufRead, BufReader, BufWriter, Write},
	path::Path,
};

use serde::{Serialize, de::DeserializeOwned};

use crate::{
	Error, Result,
	models::{FactRecord, QrelRow},
};

pub const QRELS_HEADER: &str = "query-id\tcorpus-id\tscore";

/// Reads the fact file: a JSON array, an array of arrays (flattened in order), or JSON lines.
pub fn read_facts(path: &Path) -> Result<Vec<FactRecord>> {
	let raw = fs::read_to_string(path).map_err(|err| io_error(path, err))?;

	if let Some(body) = raw.trim_start().strip_prefix('[') {
		let parsed = if body.trim_start().starts_with('[') {
			serde_json::from_str::<Vec<Vec<FactRecord>>>(&raw)
				.map(|groups| groups.into_iter().flatten().collect())
		} else {
			serde_json::from_str::<Vec<FactRecord>>(&raw)
		};

		return parsed
			.map_err(|err| Error::Json { path: path.to_path_buf(), line: err.line(), source: err });
	}

	parse_jsonl(path, &raw)
}

pub fn read_jsonl<T>(path: &Path) -> Result<Vec<T>>
where
	T: DeserializeOwned,
{
	let raw = fs::read_to_string(path).map_err(|err| io_error(path, err))?;

	parse_jsonl(path, &raw)
}

pub fn write_jsonl<T>(path: &Path, records: &[T]) -> Result<()>
where
	T: Serialize,
{
	let mut writer = create(path)?;

	for (index, record) in records.iter().enumerate() {
		serde_json::to_writer(&mut writer, record).map_err(|err| Error::Json {
			path: path.to_path_buf(),
			line: index + 1,
			source: err,
		})?;
		writer.write_all(b"\n").map_err(|err| io_error(path, err))?;
	}

	finish(path, writer, records.len())
}

pub fn write_json_pretty<T>(path: &Path, value: &T) -> Result<()>
where
	T: Serialize,
{
	let mut writer = create(path)?;

	serde_json::to_writer_pretty(&mut writer, value)
		.map_err(|err| Error::Json { path: path.to_path_buf(), line: 0, source: err })?;
	writer.write_all(b"\n").map_err(|err| io_error(path, err))?;

	finish(path, writer, 1)
}

/// Reads a qrels TSV. The first line is a header; blank lines are ignored.
pub fn read_qrels(path: &Path) -> Result<Vec<QrelRow>> {
	let file = File::open(path).map_err(|err| io_error(path, err))?;
	let mut rows = Vec::new();

	for (index, line) in BufReader::new(file).lines().enumerate() {
		let line = line.map_err(|err| io_error(path, err))?;

		if index == 0 || line.trim().is_empty() {
			continue;
		}

		let malformed = |message: String| Error::Malformed {
			path: path.to_path_buf(),
			line: index + 1,
			message,
		};
		let parts: Vec<&str> = line.trim_end_matches(['\r', '\n']).split('\t').collect();
		let [query_id, corpus_id, score] = parts.as_slice() else {
			return Err(malformed(format!("expected 3 tab-separated fields, got {}", parts.len())));
		};
		let score = score
			.trim()
			.parse::<u32>()
			.map_err(|err| malformed(format!("invalid score {score:?}: {err}")))?;

		rows.push(QrelRow {
			query_id: query_id.trim().to_string(),
			corpus_id: corpus_id.trim().to_string(),
			score,
		});
	}

	Ok(rows)
}

pub fn write_qrels(path: &Path, rows: &[QrelRow]) -> Result<()> {
	let mut writer = create(path)?;

	writeln!(writer, "{QRELS_HEADER}").map_err(|err| io_error(path, err))?;

	for row in rows {
		writeln!(writer, "{}\t{}\t{}", row.query_id, row.corpus_id, row.score)
			.map_err(|err| io_error(path, err))?;
	}

	finish(path, writer, rows.len())
}

fn parse_jsonl<T>(path: &Path, raw: &str) -> Result<Vec<T>>
where
	T: DeserializeOwned,
{
	let mut records = Vec::new();

	for (index, line) in raw.lines().enumerate() {
		if line.trim().is_empty() {
			continue;
		}

		let record = serde_json::from_str(line).map_err(|err| Error::Json {
			path: path.to_path_buf(),
			line: index + 1,
			source: err,
		})?;

		records.push(record);
	}

	Ok(records)
}

fn create(path: &Path) -> Result<BufWriter<File>> {
	if let Some(parent) = path.parent()
		&& !parent.as_os_str().is_empty()
	{
		fs::create_dir_all(parent).map_err(|err| io_error(parent, err))?;
	}

	let file = File::create(path).map_err(|err| io_error(path, err))?;

	Ok(BufWriter::new(file))
}

fn finish(path: &Path, mut writer: BufWriter<File>, count: usize) -> Result<()> {
	writer.flush().map_err(|err| io_error(path, err))?;

	tracing::debug!(path = %path.display(), count, "Wrote records.");

	Ok(())
}

fn io_error(path: &Path, source: std::io::Error) -> Error {
	Error::Io { path: path.to_path_buf(), source }
}
