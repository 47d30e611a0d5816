use std::io::Write;
use std::path::Path;

use crate::engine::Engine;
use crate::error::{Error, Result};
use crate::io;
use crate::model::codec;
use crate::model::request::{GenerationRequest, OutputOptions, Sample, SampleSet};
use crate::model::source::InputSource;

/// High-level article generator.
///
/// # Responsibilities
/// - Validate requests before the engine is called
/// - Resolve titles and seed content from literal values or files
/// - Turn one request into a prompt, and the engine's raw output into samples
/// - Fan the samples out to the console and/or numbered files
///
/// The generator owns its engine. It is constructed once at start-up and
/// handed to whichever front-end runs.
#[derive(Debug)]
pub struct Generator<E> {
	engine: E,
}

impl<E: Engine> Generator<E> {
	pub fn new(engine: E) -> Self {
		Self { engine }
	}

	pub fn engine(&self) -> &E {
		&self.engine
	}

	/// Generates the samples of a request without printing or writing them.
	///
	/// # Errors
	/// - [`Error::Configuration`] if the request exceeds the engine's context limit
	/// - [`Error::Engine`] if generation fails
	/// - [`Error::DecodeContract`] if a sample does not follow the prompt format
	pub fn generate_samples(&self, request: &GenerationRequest) -> Result<SampleSet> {
		let limit = self.engine.context_limit();
		if request.max_words() > limit {
			return Err(Error::configuration(format!(
				"number of words must be between 1 and {limit}, got {}",
				request.max_words()
			)));
		}

		let prompt = codec::encode(request.title(), request.initial_content());
		log::info!(
			"generating {} sample(s) of at most {} words for '{}'",
			request.sample_count(),
			request.max_words(),
			request.title()
		);

		let raw_samples = self.engine.generate(&prompt, request.sample_count(), request.max_words())?;
		if raw_samples.len() != request.sample_count() {
			log::warn!(
				"engine returned {} sample(s), {} were requested",
				raw_samples.len(),
				request.sample_count()
			);
		}

		let samples = raw_samples
			.iter()
			.map(|raw| codec::decode(raw))
			.collect::<Result<SampleSet, _>>()?;
		log::info!("generated {} sample(s)", samples.len());
		Ok(samples)
	}

	/// Generates articles for a title and optional seed content.
	///
	/// # Parameters
	/// - `initial_content`: seed text the article continues from; `None` is
	///   the same as an empty string
	/// - `output`: console and/or file destinations, at least one required
	///
	/// # Behavior
	/// - Every check happens before the engine is called.
	/// - Each sample is printed as its title, a newline, then its content.
	/// - Files are written following [`write_samples`].
	pub fn generate(
		&self,
		title: &str,
		initial_content: Option<&str>,
		sample_count: usize,
		output: &OutputOptions,
		max_words: usize,
	) -> Result<SampleSet> {
		output.ensure_destination()?;
		let request = GenerationRequest::new(title, initial_content.unwrap_or_default(), sample_count, max_words)?;

		let samples = self.generate_samples(&request)?;

		if output.print {
			print_samples(std::io::stdout().lock(), &samples)?;
		}
		if let Some(path) = output.output_path() {
			write_samples(path, &samples)?;
		}

		Ok(samples)
	}

	/// Generates articles from a file holding the title on its first line
	/// and, optionally, the initial content on its second line.
	///
	/// # Errors
	/// - [`Error::Configuration`] if the output path or a numbered sibling is the input file
	/// - [`Error::InputFile`] if the file is missing or unreadable
	pub fn generate_from_single_file<P: AsRef<Path>>(
		&self,
		path: P,
		sample_count: usize,
		output: &OutputOptions,
		max_words: usize,
	) -> Result<SampleSet> {
		let path = path.as_ref();
		output.ensure_destination()?;
		Self::check_not_overwriting(output, sample_count, [path])?;

		let lines = io::read_file(path).map_err(|source| Error::InputFile { path: path.to_path_buf(), source })?;
		let title = lines.first().map(|line| line.trim_end()).unwrap_or_default();
		let initial_content = lines.get(1).map(|line| line.trim_end()).unwrap_or_default();

		self.generate(title, Some(initial_content), sample_count, output, max_words)
	}

	/// Generates articles from a title file and an optional content file,
	/// reading the first line of each.
	///
	/// # Errors
	/// - [`Error::Configuration`] if the output path or a numbered sibling is one of the inputs
	/// - [`Error::InputFile`] if a file is missing or unreadable
	pub fn generate_from_files<P: AsRef<Path>>(
		&self,
		title_path: P,
		content_path: Option<&Path>,
		sample_count: usize,
		output: &OutputOptions,
		max_words: usize,
	) -> Result<SampleSet> {
		let title_path = title_path.as_ref();
		output.ensure_destination()?;
		Self::check_not_overwriting(output, sample_count, std::iter::once(title_path).chain(content_path))?;

		let title = Self::read_first_line(title_path)?;
		let initial_content = match content_path {
			Some(content_path) => Self::read_first_line(content_path)?,
			None => String::new(),
		};

		self.generate(&title, Some(&initial_content), sample_count, output, max_words)
	}

	/// Generates articles from whichever source [`InputSource::resolve`] picked.
	pub fn generate_from_source(
		&self,
		source: &InputSource,
		sample_count: usize,
		output: &OutputOptions,
		max_words: usize,
	) -> Result<SampleSet> {
		match source {
			InputSource::CombinedFile(path) => self.generate_from_single_file(path, sample_count, output, max_words),
			InputSource::SplitFiles { title_path, content_path } => {
				self.generate_from_files(title_path, content_path.as_deref(), sample_count, output, max_words)
			}
			InputSource::Literal { title, content } => {
				self.generate(title, content.as_deref(), sample_count, output, max_words)
			}
		}
	}

	fn read_first_line(path: &Path) -> Result<String> {
		io::first_line(path).map_err(|source| Error::InputFile { path: path.to_path_buf(), source })
	}

	/// Refuses a batch whose output file, or any numbered sibling of it,
	/// is one of the inputs.
	fn check_not_overwriting<'a>(
		output: &OutputOptions,
		sample_count: usize,
		inputs: impl IntoIterator<Item = &'a Path>,
	) -> Result<()> {
		let targets = output.target_paths(sample_count);
		for input in inputs {
			if let Some(target) = targets.iter().find(|target| io::same_file(target, input)) {
				return Err(Error::configuration(format!(
					"output filename '{}' cannot be the same as an input filename",
					target.display()
				)));
			}
		}
		Ok(())
	}
}

/// Writes samples under `base`.
///
/// - One sample goes to `base` itself.
/// - Several samples go to `base` with the zero-based sample index
///   inserted before the extension (`sample.txt` → `sample0.txt`, …).
///
/// Existing files are overwritten. A failed write stops the batch and
/// leaves the files already written in place.
pub fn write_samples<P: AsRef<Path>>(base: P, samples: &[Sample]) -> Result<()> {
	let base = base.as_ref();
	if let [sample] = samples {
		return write_sample(base, sample);
	}
	for (index, sample) in samples.iter().enumerate() {
		write_sample(&io::indexed_output_path(base, index), sample)?;
	}
	Ok(())
}

/// Prints each sample as its title, a newline, then its content.
fn print_samples<W: Write>(mut out: W, samples: &[Sample]) -> Result<()> {
	for sample in samples {
		writeln!(out, "{sample}").map_err(Error::ConsoleWrite)?;
	}
	out.flush().map_err(Error::ConsoleWrite)
}

fn write_sample(path: &Path, sample: &Sample) -> Result<()> {
	io::write_file(path, &sample.to_string())
		.map_err(|source| Error::OutputWrite { path: path.to_path_buf(), source })?;
	log::debug!("wrote {}", path.display());
	Ok(())
}
