use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// One input fact with the source documents it was checked against.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct FactRecord {
	pub fact: String,
	#[serde(default)]
	pub links: Vec<LinkRecord>,
	#[serde(flatten)]
	pub extra: Map<String, Value>,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct LinkRecord {
	pub link: String,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub link_data: Option<String>,
	#[serde(default)]
	pub scores: Vec<ScoreRecord>,
	#[serde(flatten)]
	pub extra: Map<String, Value>,
}

/// A judged excerpt of a source document.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct ScoreRecord {
	pub text: String,
	#[serde(deserialize_with = "deserialize_score")]
	pub score: u32,
}

/// Row shape shared by corpus and query files.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct DocRecord {
	#[serde(rename = "_id")]
	pub id: String,
	#[serde(default)]
	pub title: String,
	pub text: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QrelRow {
	pub query_id: String,
	pub corpus_id: String,
	pub score: u32,
}

/// A judged excerpt that matched no unit of its source document.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct NotFoundRecord {
	pub query_id: String,
	pub score_text: String,
	pub relevance: u32,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawScore {
	Int(i64),
	Text(String),
}

fn deserialize_score<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
	D: Deserializer<'de>,
{
	let value = match RawScore::deserialize(deserializer)? {
		RawScore::Int(value) => value,
		RawScore::Text(raw) => raw.trim().parse::<i64>().map_err(serde::de::Error::custom)?,
	};

	u32::try_from(value).map_err(|_| {
		serde::de::Error::custom(format!("score must be a non-negative integer, got {value}"))
	})
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn parses_fact_with_string_and_integer_scores() {
		let raw = r#"{
			"fact": "Paris is the capital of France.",
			"links": [{
				"link": "https://ru.wikipedia.org/wiki/Paris",
				"link_data": "Paris is the capital of France.",
				"scores": [{ "text": "capital of France", "score": "2" }, { "text": "x", "score": 0 }]
			}],
			"topic": "geo"
		}"#;
		let fact: FactRecord = serde_json::from_str(raw).expect("Failed to parse fact.");

		assert_eq!(fact.links[0].scores[0].score, 2);
		assert_eq!(fact.links[0].scores[1].score, 0);
		assert_eq!(fact.extra.get("topic").and_then(Value::as_str), Some("geo"));
	}

	#[test]
	fn rejects_negative_score() {
		let raw = r#"{ "text": "x", "score": -1 }"#;

		assert!(serde_json::from_str::<ScoreRecord>(raw).is_err());
	}

	#[test]
	fn rejects_fact_without_text() {
		let raw = r#"{ "links": [] }"#;

		assert!(serde_json::from_str::<FactRecord>(raw).is_err());
	}

	#[test]
	fn doc_record_uses_underscore_id() {
		let record =
			DocRecord { id: "bwc-0".to_string(), title: String::new(), text: "T".to_string() };
		let json = serde_json::to_string(&record).expect("Failed to serialize record.");

		assert_eq!(json, r#"{"_id":"bwc-0","title":"","text":"T"}"#);
	}
}
