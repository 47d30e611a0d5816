use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

use super::request::Sample;

/// Marks the beginning of an article in the engine's training format.
pub const START_MARKER: &str = "<|startoftext|>";

/// Header line preceding the title.
pub const TITLE_MARKER: &str = "=====TITLE=====";

/// Header line preceding the content.
pub const CONTENT_MARKER: &str = "=====CONTENT=====";

/// Where the engine should cut a sample that runs into the next article.
pub const TRUNCATE_MARKER: &str = "<|endoftext|><|startoftext|>";

/// Engine control tokens: anything opening with `<|` and closing with `|>`.
static CONTROL_TOKEN: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r"<\|[^|>]*\|>").expect("control token pattern is valid"));

static REPEATED_SPACES: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r" {2,}").expect("space pattern is valid"));

/// Raised when a raw sample does not follow the prompt format.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("engine output is missing the start-of-text and title header")]
pub struct DecodeError;

fn sample_header() -> String {
	format!("{START_MARKER}\n{TITLE_MARKER}\n")
}

fn content_separator() -> String {
	format!("\n{CONTENT_MARKER}\n")
}

/// Builds the prompt sent to the engine.
///
/// Newlines in `initial_content` are replaced by a single space, since the
/// content section is a single line of the prompt.
pub fn encode(title: &str, initial_content: &str) -> String {
	let initial_content = initial_content.replace("\r\n", " ").replace(['\n', '\r'], " ");
	[START_MARKER, TITLE_MARKER, title, CONTENT_MARKER, initial_content.as_str()].join("\n")
}

/// Decodes a raw engine sample back into a title and content.
///
/// # Behavior
/// - Everything up to and including the first sample header is discarded.
/// - Control tokens are deleted and runs of spaces collapsed.
/// - The remainder is split on the content header; without one, the whole
///   remainder is the title and the content is empty.
///
/// # Errors
/// Returns [`DecodeError`] if the sample header is missing.
pub fn decode(raw: &str) -> Result<Sample, DecodeError> {
	let header = sample_header();
	let start = raw.find(&header).ok_or(DecodeError)?;
	let body = &raw[start + header.len()..];

	let body = CONTROL_TOKEN.replace_all(body, "");
	let body = REPEATED_SPACES.replace_all(&body, " ");

	let separator = content_separator();
	let mut parts = body.splitn(3, separator.as_str());
	let title = parts.next().unwrap_or_default().to_owned();
	let content = parts.next().unwrap_or_default().to_owned();

	Ok(Sample::new(title, content))
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn prompt_has_fixed_layout() {
		assert_eq!(
			encode("A Title", "Some seed"),
			"<|startoftext|>\n=====TITLE=====\nA Title\n=====CONTENT=====\nSome seed"
		);
	}

	#[test]
	fn content_newlines_become_spaces() {
		let prompt = encode("T", "one\ntwo\r\nthree\rfour");
		assert!(prompt.ends_with("\none two three four"));
		assert_eq!(prompt.matches('\n').count(), 4);
	}

	#[test]
	fn empty_content_is_accepted() {
		assert_eq!(encode("T", ""), "<|startoftext|>\n=====TITLE=====\nT\n=====CONTENT=====\n");
	}

	#[test]
	fn round_trip_preserves_title_and_content() {
		let cases = [
			("My Title", "Some seed"),
			("Quarterly results: up 3%", ""),
			("Ünïcödé title", "content with | pipes and <angle> brackets"),
			("", "content only"),
		];
		for (title, content) in cases {
			let sample = decode(&encode(title, content)).unwrap();
			assert_eq!(sample.title(), title);
			assert_eq!(sample.content(), content);
		}
	}

	#[test]
	fn generated_continuation_is_kept() {
		let raw = format!("{} and the rest of the article.", encode("Title", "It began"));
		let sample = decode(&raw).unwrap();
		assert_eq!(sample.content(), "It began and the rest of the article.");
	}

	#[test]
	fn text_before_the_header_is_discarded() {
		let raw = format!("noise {}", encode("Title", "Body"));
		assert_eq!(decode(&raw).unwrap().title(), "Title");
	}

	#[test]
	fn control_tokens_are_stripped_and_spaces_collapsed() {
		let raw = format!("{}  more<|endoftext|>   text <|pad|>end", encode("Ti  tle", "Body"));
		let sample = decode(&raw).unwrap();
		assert_eq!(sample.title(), "Ti tle");
		assert_eq!(sample.content(), "Body more text end");
	}

	#[test]
	fn missing_content_header_yields_empty_content() {
		let raw = "<|startoftext|>\n=====TITLE=====\nOnly a title";
		let sample = decode(raw).unwrap();
		assert_eq!(sample.title(), "Only a title");
		assert_eq!(sample.content(), "");
	}

	#[test]
	fn only_the_first_two_sections_are_kept() {
		let raw = "<|startoftext|>\n=====TITLE=====\nT\n=====CONTENT=====\nfirst\n=====CONTENT=====\nsecond";
		let sample = decode(raw).unwrap();
		assert_eq!(sample.title(), "T");
		assert_eq!(sample.content(), "first");
	}

	#[test]
	fn missing_header_is_a_contract_violation() {
		assert_eq!(decode("just some text"), Err(DecodeError));
		assert_eq!(decode("=====TITLE=====\nno start marker"), Err(DecodeError));
	}

	#[test]
	fn decode_is_deterministic() {
		let raw = format!("{} <|x|> tail", encode("T", "C"));
		assert_eq!(decode(&raw), decode(&raw));
	}
}
