//! MediaWiki plain-text extract client.

use std::time::Duration;

use percent_encoding::percent_decode_str;
use reqwest::Client;
use serde_json::Value;
use url::Url;

use crate::{Error, Result};

const WIKI_SEGMENT: &str = "wiki";

pub struct WikipediaClient {
	client: Client,
	api_base: String,
}
impl WikipediaClient {
	pub fn new(cfg: &wf_config::Wikipedia) -> Result<Self> {
		if cfg.api_base.trim().is_empty() {
			return Err(Error::InvalidConfig {
				message: "Wikipedia api_base must be non-empty.".to_string(),
			});
		}

		let client = Client::builder()
			.timeout(Duration::from_millis(cfg.timeout_ms))
			.user_agent(cfg.user_agent.clone())
			.build()?;

		Ok(Self { client, api_base: cfg.api_base.clone() })
	}

	/// Plain-text extract of the article, or `None` when the page has none.
	pub async fn fetch_extract(&self, title: &str) -> Result<Option<String>> {
		let res = self
			.client
			.get(&self.api_base)
			.query(&[
				("action", "query"),
				("prop", "extracts"),
				("explaintext", "1"),
				("format", "json"),
				("titles", title),
			])
			.send()
			.await?;
		let json: Value = res.error_for_status()?.json().await?;
		let extract = parse_extract_response(json)?;

		tracing::debug!(%title, found = extract.is_some(), "Received article extract.");

		Ok(extract)
	}
}

/// Article title from a `.../wiki/<title>` URL, percent-decoded with underscores as spaces.
///
/// Query and fragment are ignored. Titles may contain `/`.
pub fn article_title(link: &str) -> Option<String> {
	let url = Url::parse(link).ok()?;
	let mut segments = url.path_segments()?;

	segments.by_ref().find(|segment| *segment == WIKI_SEGMENT)?;

	let raw = segments.collect::<Vec<_>>().join("/");

	if raw.is_empty() {
		return None;
	}

	Some(percent_decode_str(&raw).decode_utf8_lossy().replace('_', " "))
}

fn parse_extract_response(json: Value) -> Result<Option<String>> {
	let pages = json
		.get("query")
		.and_then(|query| query.get("pages"))
		.and_then(Value::as_object)
		.ok_or_else(|| Error::InvalidResponse {
			message: "Extract response is missing query.pages.".to_string(),
		})?;
	let Some(page) = pages.values().next() else {
		return Ok(None);
	};

	Ok(page.get("extract").and_then(Value::as_str).map(str::to_string))
}
