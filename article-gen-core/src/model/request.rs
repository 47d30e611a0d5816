use std::fmt;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::io;

/// Largest number of words the engine can produce for one sample.
pub const CONTEXT_LIMIT: usize = 1023;

/// Default number of samples per request.
pub const DEFAULT_SAMPLE_COUNT: usize = 1;

/// Default word bound per sample.
pub const DEFAULT_MAX_WORDS: usize = CONTEXT_LIMIT;

/// One generated article.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sample {
	title: String,
	content: String,
}

/// Samples in the order the engine produced them.
pub type SampleSet = Vec<Sample>;

impl Sample {
	pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
		Self { title: title.into(), content: content.into() }
	}

	pub fn title(&self) -> &str {
		&self.title
	}

	pub fn content(&self) -> &str {
		&self.content
	}
}

/// Renders the sample the way it is printed and written to disk:
/// the title, a newline, then the content.
impl fmt::Display for Sample {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}\n{}", self.title, self.content)
	}
}

/// A validated generation request.
///
/// # Invariants
/// - `title` is not empty
/// - `sample_count >= 1`
/// - `1 <= max_words <= CONTEXT_LIMIT`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
	title: String,
	initial_content: String,
	sample_count: usize,
	max_words: usize,
}

impl GenerationRequest {
	/// Creates a request after checking its invariants.
	///
	/// # Errors
	/// Returns [`Error::Configuration`] if the title is empty or a count is
	/// out of range.
	pub fn new(
		title: impl Into<String>,
		initial_content: impl Into<String>,
		sample_count: usize,
		max_words: usize,
	) -> Result<Self> {
		let title = title.into();
		if title.is_empty() {
			return Err(Error::configuration("title must not be empty"));
		}
		if sample_count == 0 {
			return Err(Error::configuration("number of samples must be a positive integer"));
		}
		if !(1..=CONTEXT_LIMIT).contains(&max_words) {
			return Err(Error::configuration(format!(
				"number of words must be between 1 and {CONTEXT_LIMIT}, got {max_words}"
			)));
		}
		Ok(Self { title, initial_content: initial_content.into(), sample_count, max_words })
	}

	pub fn title(&self) -> &str {
		&self.title
	}

	pub fn initial_content(&self) -> &str {
		&self.initial_content
	}

	pub fn sample_count(&self) -> usize {
		self.sample_count
	}

	pub fn max_words(&self) -> usize {
		self.max_words
	}
}

/// Where generated samples go besides being returned.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OutputOptions {
	/// Print each sample to standard output.
	pub print: bool,
	/// Base path of the output file(s).
	pub output_path: Option<PathBuf>,
}

impl OutputOptions {
	pub fn new(print: bool, output_path: Option<PathBuf>) -> Self {
		Self { print, output_path }
	}

	pub fn output_path(&self) -> Option<&Path> {
		self.output_path.as_deref()
	}

	/// Paths a batch of `sample_count` samples may touch: the base path, and
	/// the numbered siblings when there is more than one sample.
	pub fn target_paths(&self, sample_count: usize) -> Vec<PathBuf> {
		let Some(base) = self.output_path() else {
			return Vec::new();
		};
		let mut paths = vec![base.to_path_buf()];
		if sample_count > 1 {
			paths.extend((0..sample_count).map(|index| io::indexed_output_path(base, index)));
		}
		paths
	}

	/// Checks that at least one destination is requested.
	pub(crate) fn ensure_destination(&self) -> Result<()> {
		if !self.print && self.output_path.is_none() {
			return Err(Error::configuration(
				"output has not been set to either console or an output file",
			));
		}
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn sample_renders_title_then_content() {
		assert_eq!(Sample::new("Title", "Body").to_string(), "Title\nBody");
		assert_eq!(Sample::new("Title", "").to_string(), "Title\n");
	}

	#[test]
	fn request_rejects_out_of_range_values() {
		assert!(GenerationRequest::new("", "", 1, 10).unwrap_err().is_configuration());
		assert!(GenerationRequest::new("T", "", 0, 10).is_err());
		assert!(GenerationRequest::new("T", "", 1, 0).is_err());
		assert!(GenerationRequest::new("T", "", 1, CONTEXT_LIMIT + 1).is_err());
	}

	#[test]
	fn request_accepts_bounds() {
		let request = GenerationRequest::new("T", "seed", 3, CONTEXT_LIMIT).unwrap();
		assert_eq!(request.title(), "T");
		assert_eq!(request.initial_content(), "seed");
		assert_eq!(request.sample_count(), 3);
		assert_eq!(request.max_words(), CONTEXT_LIMIT);
		assert!(GenerationRequest::new("T", "", 1, 1).is_ok());
	}

	#[test]
	fn output_needs_a_destination() {
		assert!(OutputOptions::default().ensure_destination().is_err());
		assert!(OutputOptions::new(true, None).ensure_destination().is_ok());
		assert!(OutputOptions::new(false, Some("out.txt".into())).ensure_destination().is_ok());
	}

	#[test]
	fn target_paths_cover_numbered_siblings() {
		let output = OutputOptions::new(false, Some("out/sample.txt".into()));
		assert_eq!(output.target_paths(1), [PathBuf::from("out/sample.txt")]);
		assert_eq!(
			output.target_paths(2),
			[
				PathBuf::from("out/sample.txt"),
				PathBuf::from("out/sample0.txt"),
				PathBuf::from("out/sample1.txt"),
			]
		);
		assert!(OutputOptions::new(true, None).target_paths(3).is_empty());
	}
}
