use std::collections::HashMap;

use wf_domain::normalize;
use wf_providers::wikipedia::{self, WikipediaClient};
use wf_storage::models::FactRecord;

use crate::{BoxFuture, Result};

/// Remote source of article text, keyed by article title.
pub trait ArticleSource
where
	Self: Send + Sync,
{
	/// `Ok(None)` when the article exists nowhere.
	fn fetch<'a>(&'a self, title: &'a str) -> BoxFuture<'a, Result<Option<String>>>;
}
impl ArticleSource for WikipediaClient {
	fn fetch<'a>(&'a self, title: &'a str) -> BoxFuture<'a, Result<Option<String>>> {
		Box::pin(async move { Ok(self.fetch_extract(title).await?) })
	}
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct HydrateReport {
	pub present: usize,
	pub fetched: usize,
	pub not_found: usize,
	pub unresolved: usize,
}

/// Fills every link without `link_data` from `source`.
///
/// Pages without text get `sentinel` when one is configured and stay empty otherwise.
/// Titles are fetched at most once per call.
pub async fn hydrate(
	records: &mut [FactRecord],
	source: &dyn ArticleSource,
	sentinel: Option<&str>,
) -> Result<HydrateReport> {
	let mut report = HydrateReport::default();
	let mut fetched: HashMap<String, Option<String>> = HashMap::new();

	for link in records.iter_mut().flat_map(|record| record.links.iter_mut()) {
		if link.link_data.is_some() {
			report.present += 1;

			continue;
		}

		let Some(title) = wikipedia::article_title(&link.link) else {
			tracing::warn!(url = %link.link, "Cannot derive an article title from the link.");

			report.unresolved += 1;

			continue;
		};
		let text = match fetched.get(&title) {
			Some(text) => text.clone(),
			None => {
				let text = source.fetch(&title).await?.map(|raw| normalize(&raw));

				tracing::debug!(%title, found = text.is_some(), "Fetched article.");

				fetched.insert(title.clone(), text.clone());

				text
			},
		};

		match text {
			Some(text) => {
				report.fetched += 1;
				link.link_data = Some(text);
			},
			None => {
				tracing::warn!(%title, "Article has no extract.");

				report.not_found += 1;
				link.link_data = sentinel.map(str::to_string);
			},
		}
	}

	tracing::info!(
		present = report.present,
		fetched = report.fetched,
		not_found = report.not_found,
		unresolved = report.unresolved,
		"Hydrated source documents."
	);

	Ok(report)
}
