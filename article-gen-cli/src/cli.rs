use std::path::PathBuf;

use clap::Parser;

use article_gen_core::{
    CONTEXT_LIMIT, DEFAULT_MAX_WORDS, DEFAULT_SAMPLE_COUNT, Error, InputArgs, InputSource, OutputOptions, Result,
};

const EXAMPLES: &str = "\
EXAMPLES:
    article-gen
        Opens the Article Generator window.

    article-gen -f example.txt -o sample.txt -n 3
        Generates 3 articles from the title and initial content in 'example.txt'
        and writes them to 'sample0.txt', 'sample1.txt' and 'sample2.txt'.

    article-gen -T \"A title\" -C \"The first words\" -p
        Prints one article to the console.";

/// Command-line surface. Running without any option opens the GUI.
#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(name = "article-gen")]
#[command(about = "Generate articles from a title and optional initial content")]
#[command(version, after_help = EXAMPLES)]
pub struct Cli {
    /// Use the title and initial content in this file: the title on the first
    /// line, the initial content (if any) on the second.
    #[arg(short = 'f', long, value_parser = existing_file)]
    pub filename: Option<PathBuf>,

    /// Write the generated sample to this new file. With several samples, the
    /// sample number is inserted before the extension.
    #[arg(short = 'o', long, value_parser = new_file)]
    pub output_filename: Option<PathBuf>,

    /// Print the generated sample(s) to the console.
    #[arg(short = 'p', long)]
    pub print: bool,

    /// How many samples to generate.
    #[arg(short = 'n', long, default_value_t = DEFAULT_SAMPLE_COUNT, value_parser = positive_int)]
    pub num_samples: usize,

    /// Maximum number of words in each sample (1 to 1023).
    #[arg(short = 'w', long, default_value_t = DEFAULT_MAX_WORDS, value_parser = word_count)]
    pub num_words: usize,

    /// Use the title on the first line of this file. Ignored with --filename.
    #[arg(short = 't', long, value_parser = existing_file)]
    pub title_filename: Option<PathBuf>,

    /// Use the initial content on the first line of this file. Ignored
    /// without --title-filename.
    #[arg(short = 'c', long, value_parser = existing_file)]
    pub content_filename: Option<PathBuf>,

    /// Use this title. Ignored with --filename or --title-filename.
    #[arg(short = 'T', long)]
    pub title: Option<String>,

    /// Use this initial content. Ignored without --title.
    #[arg(short = 'C', long)]
    pub content: Option<String>,
}

/// A fully validated batch run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Plan {
    pub source: InputSource,
    pub sample_count: usize,
    pub max_words: usize,
    pub output: OutputOptions,
}

/// What the executable does.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    /// Open the desktop front-end.
    Interactive,
    /// Generate from the command line.
    Batch(Plan),
}

fn positive_int(value: &str) -> Result<usize, String> {
    match value.parse::<usize>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(format!("{value} is not a positive int")),
    }
}

fn word_count(value: &str) -> Result<usize, String> {
    let n = positive_int(value)?;
    if n > CONTEXT_LIMIT {
        return Err(format!("{value} is more than the maximum of {CONTEXT_LIMIT} words"));
    }
    Ok(n)
}

fn existing_file(value: &str) -> Result<PathBuf, String> {
    let path = PathBuf::from(value);
    if !path.is_file() {
        return Err(format!("{value} is not the name of a file that exists"));
    }
    Ok(path)
}

fn new_file(value: &str) -> Result<PathBuf, String> {
    let path = PathBuf::from(value);
    if path.is_file() {
        return Err(format!("{value} already exists"));
    }
    Ok(path)
}

impl Cli {
    /// Returns `true` when every option still holds its default value.
    pub fn is_default(&self) -> bool {
        self.filename.is_none()
            && self.output_filename.is_none()
            && !self.print
            && self.num_samples == DEFAULT_SAMPLE_COUNT
            && self.num_words == DEFAULT_MAX_WORDS
            && self.title_filename.is_none()
            && self.content_filename.is_none()
            && self.title.is_none()
            && self.content.is_none()
    }

    /// Decides what to run. Every check happens here, before any engine is
    /// loaded.
    ///
    /// # Errors
    /// Returns [`Error::Configuration`] if no output is requested, if the
    /// output is one of the inputs, or if no title source is given.
    pub fn into_mode(self) -> Result<Mode> {
        if self.is_default() {
            return Ok(Mode::Interactive);
        }

        if !self.print && self.output_filename.is_none() {
            return Err(Error::Configuration(
                "output has not been set to either console or an output file: use --print and/or --output-filename"
                    .to_owned(),
            ));
        }

        let inputs = InputArgs {
            filename: self.filename,
            title_filename: self.title_filename,
            content_filename: self.content_filename,
            title: self.title,
            content: self.content,
        };
        let output = OutputOptions::new(self.print, self.output_filename);
        for target in output.target_paths(self.num_samples) {
            if inputs.paths().any(|input| input == target.as_path()) {
                return Err(Error::Configuration(format!(
                    "output filename '{}' cannot be the same as an input filename",
                    target.display()
                )));
            }
        }

        let source = InputSource::resolve(inputs)?;
        Ok(Mode::Batch(Plan {
            source,
            sample_count: self.num_samples,
            max_words: self.num_words,
            output,
        }))
    }
}
