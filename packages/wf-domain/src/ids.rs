//! Corpus and query identifiers of the form `<prefix>-<n>`.

pub fn format_id(prefix: &str, index: usize) -> String {
	format!("{prefix}-{index}")
}

/// Parses `<prefix>-<n>`, returning `n`. The prefix itself may contain dashes.
pub fn parse_id(prefix: &str, id: &str) -> Option<usize> {
	let (head, tail) = id.rsplit_once('-')?;

	if head != prefix || tail.is_empty() || !tail.bytes().all(|b| b.is_ascii_digit()) {
		return None;
	}

	tail.parse().ok()
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn parses_what_it_formats() {
		assert_eq!(parse_id("bwc", &format_id("bwc", 42)), Some(42));
		assert_eq!(parse_id("bw_window", "bw_window-0"), Some(0));
		assert_eq!(parse_id("a-b", "a-b-3"), Some(3));
	}

	#[test]
	fn rejects_foreign_or_malformed_ids() {
		assert_eq!(parse_id("bwc", "bwq-1"), None);
		assert_eq!(parse_id("bwc", "bwc-"), None);
		assert_eq!(parse_id("bwc", "bwc-+1"), None);
		assert_eq!(parse_id("bwc", "bwc1"), None);
	}
}
