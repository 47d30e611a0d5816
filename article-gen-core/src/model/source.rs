use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Where the title and initial content of a request come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource {
	/// One file: title on line 1, content (if any) on line 2.
	CombinedFile(PathBuf),
	/// Title on line 1 of one file, content on line 1 of an optional other.
	SplitFiles { title_path: PathBuf, content_path: Option<PathBuf> },
	/// Literal values.
	Literal { title: String, content: Option<String> },
}

/// Every input a caller may have supplied, before precedence is applied.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputArgs {
	pub filename: Option<PathBuf>,
	pub title_filename: Option<PathBuf>,
	pub content_filename: Option<PathBuf>,
	pub title: Option<String>,
	pub content: Option<String>,
}

impl InputArgs {
	/// All input file paths that were supplied, used or not.
	pub fn paths(&self) -> impl Iterator<Item = &Path> {
		[&self.filename, &self.title_filename, &self.content_filename]
			.into_iter()
			.filter_map(|path| path.as_deref())
	}
}

impl InputSource {
	/// Picks the input source by precedence.
	///
	/// # Behavior
	/// - A combined file wins over a title file, which wins over a literal title.
	/// - A content file is only used together with a title file, literal
	///   content only together with a literal title. Ignored values are
	///   logged as warnings.
	///
	/// # Errors
	/// Returns [`Error::Configuration`] if no title source was supplied.
	pub fn resolve(args: InputArgs) -> Result<Self> {
		let InputArgs { filename, title_filename, mut content_filename, title, mut content } = args;

		let source = if let Some(path) = filename {
			Self::CombinedFile(path)
		} else if let Some(title_path) = title_filename {
			Self::SplitFiles { title_path, content_path: content_filename.take() }
		} else if let Some(title) = title {
			Self::Literal { title, content: content.take() }
		} else {
			return Err(Error::configuration(
				"no title given: use --filename, --title-filename or --title",
			));
		};

		let mut ignored = Vec::new();
		if content_filename.is_some() {
			ignored.push("--content-filename");
		}
		if content.is_some() {
			ignored.push("--content");
		}
		if !ignored.is_empty() {
			log::warn!("ignoring {} because the title comes from {}", ignored.join(" and "), source.describe());
		}

		log::info!("reading title from {}", source.describe());
		Ok(source)
	}

	/// Input files this source reads.
	pub fn paths(&self) -> Vec<&Path> {
		match self {
			Self::CombinedFile(path) => vec![path.as_path()],
			Self::SplitFiles { title_path, content_path } => {
				std::iter::once(title_path.as_path()).chain(content_path.as_deref()).collect()
			}
			Self::Literal { .. } => Vec::new(),
		}
	}

	fn describe(&self) -> String {
		match self {
			Self::CombinedFile(path) => format!("'{}'", path.display()),
			Self::SplitFiles { title_path, .. } => format!("'{}'", title_path.display()),
			Self::Literal { .. } => "the command line".to_owned(),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn args() -> InputArgs {
		InputArgs {
			filename: Some("both.txt".into()),
			title_filename: Some("title.txt".into()),
			content_filename: Some("content.txt".into()),
			title: Some("Literal".into()),
			content: Some("literal content".into()),
		}
	}

	#[test]
	fn combined_file_takes_priority() {
		assert_eq!(InputSource::resolve(args()).unwrap(), InputSource::CombinedFile("both.txt".into()));
	}

	#[test]
	fn title_file_beats_literal_title_and_keeps_content_file() {
		let args = InputArgs { filename: None, ..args() };
		assert_eq!(
			InputSource::resolve(args).unwrap(),
			InputSource::SplitFiles {
				title_path: "title.txt".into(),
				content_path: Some("content.txt".into()),
			}
		);
	}

	#[test]
	fn literal_title_uses_literal_content_only() {
		let args = InputArgs { filename: None, title_filename: None, ..args() };
		assert_eq!(
			InputSource::resolve(args).unwrap(),
			InputSource::Literal { title: "Literal".into(), content: Some("literal content".into()) }
		);
	}

	#[test]
	fn content_without_title_is_an_error() {
		let args = InputArgs {
			content_filename: Some("content.txt".into()),
			content: Some("text".into()),
			..InputArgs::default()
		};
		assert!(InputSource::resolve(args).unwrap_err().is_configuration());
	}

	#[test]
	fn paths_lists_only_files_read() {
		let source = InputSource::SplitFiles { title_path: "t.txt".into(), content_path: None };
		assert_eq!(source.paths(), vec![Path::new("t.txt")]);
		assert!(InputSource::Literal { title: "T".into(), content: None }.paths().is_empty());
		assert_eq!(args().paths().count(), 3);
	}
}
