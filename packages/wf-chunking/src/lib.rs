use unicode_segmentation::UnicodeSegmentation;

/// Sentence boundary provider: ordered, non-overlapping substrings of the input.
pub trait Segmenter
where
	Self: Send + Sync,
{
	fn sentences<'a>(&self, text: &'a str) -> Vec<&'a str>;
}

/// UAX #29 sentence boundaries. Segments are trimmed and empty ones are dropped.
#[derive(Clone, Copy, Debug, Default)]
pub struct UnicodeSentenceSegmenter;
impl Segmenter for UnicodeSentenceSegmenter {
	fn sentences<'a>(&self, text: &'a str) -> Vec<&'a str> {
		text.split_sentence_bounds().map(str::trim).filter(|s| !s.is_empty()).collect()
	}
}

/// Splits on blank lines (`\n\n`). Paragraphs are trimmed and empty ones are dropped.
pub fn split_paragraphs(text: &str) -> Vec<&str> {
	let paragraphs: Vec<&str> =
		text.split("\n\n").map(str::trim).filter(|para| !para.is_empty()).collect();

	tracing::trace!(count = paragraphs.len(), "Split text into paragraphs.");

	paragraphs
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn splits_sentences_without_surrounding_whitespace() {
		let sentences = UnicodeSentenceSegmenter
			.sentences("Paris is the capital of France. It has many museums.");

		assert_eq!(sentences, vec!["Paris is the capital of France.", "It has many museums."]);
	}

	#[test]
	fn sentences_of_blank_text_are_empty() {
		assert!(UnicodeSentenceSegmenter.sentences("").is_empty());
		assert!(UnicodeSentenceSegmenter.sentences(" \n\n ").is_empty());
	}

	#[test]
	fn splits_cyrillic_sentences() {
		let sentences = UnicodeSentenceSegmenter.sentences("Москва — столица. Город большой!");

		assert_eq!(sentences, vec!["Москва — столица.", "Город большой!"]);
	}

	#[test]
	fn splits_paragraphs_on_blank_lines() {
		let paragraphs = split_paragraphs("First para.\nStill first.\n\n\n\nSecond.\n\n  \n\nThird.");

		assert_eq!(paragraphs, vec!["First para.\nStill first.", "Second.", "Third."]);
	}

	#[test]
	fn paragraphs_of_blank_text_are_empty() {
		assert!(split_paragraphs("").is_empty());
	}
}
