use wf_domain::normalize;
use wf_storage::models::FactRecord;

/// A query: one input fact with its source references, in input order.
#[derive(Clone, Debug)]
pub struct Fact {
	pub id: usize,
	pub text: String,
	pub sources: Vec<Source>,
}
impl Fact {
	pub fn from_record(id: usize, record: &FactRecord) -> Self {
		let sources = record
			.links
			.iter()
			.map(|link| Source {
				url: link.link.clone(),
				text: link.link_data.clone(),
				excerpts: link
					.scores
					.iter()
					.map(|score| Excerpt { text: score.text.clone(), score: score.score })
					.collect(),
			})
			.collect();

		Self { id, text: normalize(&record.fact), sources }
	}
}

#[derive(Clone, Debug)]
pub struct Source {
	pub url: String,
	/// Raw document text. `None` when the record never carried it.
	pub text: Option<String>,
	pub excerpts: Vec<Excerpt>,
}

#[derive(Clone, Debug)]
pub struct Excerpt {
	pub text: String,
	pub score: u32,
}

pub fn facts_from_records(records: &[FactRecord]) -> Vec<Fact> {
	records.iter().enumerate().map(|(id, record)| Fact::from_record(id, record)).collect()
}
