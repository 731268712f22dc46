use std::sync::LazyLock;

use regex::Regex;
use unicode_normalization::{UnicodeNormalization, char::canonical_combining_class};

/// Letters whose diacritic is part of their identity. They survive mark stripping.
pub const PROTECTED_LETTERS: [char; 2] = ['й', 'ё'];

static STRESSED_VOWEL: LazyLock<Regex> = LazyLock::new(|| {
	Regex::new("([аеёиоуыэюяАЕЁИОУЫЭЮЯ])\u{0301}").expect("Stress pattern must compile.")
});
static SECTION_HEADER: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r"==\s*(.*?)\s*==\s*").expect("Header pattern must compile."));

/// Canonical form used for every text comparison in the pipeline.
///
/// Idempotent: `normalize(&normalize(x)) == normalize(x)`.
pub fn normalize(input: &str) -> String {
	if input.is_empty() {
		return String::new();
	}

	let unstressed = STRESSED_VOWEL.replace_all(input, "$1");
	let unheaded = strip_headers(&unstressed);
	let spaced = unheaded.replace('\u{00A0}', " ");
	let composed: String = spaced.trim().nfc().collect();
	let mut out = String::with_capacity(composed.len());

	for ch in composed.chars() {
		if PROTECTED_LETTERS.contains(&ch) {
			out.push(ch);

			continue;
		}

		out.extend(ch.to_string().nfd().filter(|c| canonical_combining_class(*c) == 0));
	}

	// Dropping marks can join a new `==` marker or expose whitespace the first pass missed.
	strip_headers(&out).trim().to_string()
}

fn strip_headers(text: &str) -> String {
	let mut current = text.to_string();

	loop {
		let next = SECTION_HEADER.replace_all(&current, "$1 ").into_owned();

		if next == current {
			return current;
		}

		current = next;
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn strips_stress_marks() {
		assert_eq!(normalize("Москва\u{0301}"), "Москва");
		assert_eq!(normalize("за\u{0301}мок"), "замок");
	}

	#[test]
	fn keeps_protected_letters() {
		assert_eq!(normalize("ёлка и йод"), "ёлка и йод");
		assert_eq!(normalize("е\u{0308}лка"), "ёлка");
	}

	#[test]
	fn strips_latin_diacritics() {
		assert_eq!(normalize("Café Crème naïve"), "Cafe Creme naive");
	}

	#[test]
	fn replaces_section_headers() {
		assert_eq!(normalize("Intro.\n== History ==\nFounded."), "Intro.\nHistory Founded.");
		assert_eq!(normalize("== A ==\n\n== B ==\nText"), "A B Text");
	}

	#[test]
	fn replaces_non_breaking_spaces_and_trims() {
		assert_eq!(normalize("\u{00A0} 10\u{00A0}km  "), "10 km");
	}

	#[test]
	fn empty_input_stays_empty() {
		assert_eq!(normalize(""), "");
		assert_eq!(normalize("   "), "");
	}

	#[test]
	fn header_joined_by_mark_stripping_is_removed() {
		assert_eq!(normalize("=\u{0301}= Intro =\u{0301}= text"), "Intro text");
	}

	#[test]
	fn trailing_mark_after_space_is_fully_trimmed() {
		assert_eq!(normalize("a \u{0301}"), "a");
	}
}
