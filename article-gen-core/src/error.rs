use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::engine::EngineError;
use crate::model::codec::DecodeError;

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Every way a generation run can fail.
///
/// The variants follow the order in which a run can fail: configuration is
/// checked first, then inputs are read, then the engine is called, its output
/// decoded and finally written out.
#[derive(Debug, Error)]
pub enum Error {
	/// Bad or missing options, conflicting paths, output mode unset.
	#[error("{0}")]
	Configuration(String),

	#[error("cannot read input file '{}': {source}", path.display())]
	InputFile {
		path: PathBuf,
		#[source]
		source: io::Error,
	},

	#[error("cannot read configuration '{}': {message}", path.display())]
	Config { path: PathBuf, message: String },

	/// The engine could not be brought up. Fatal at start-up.
	#[error("text generation engine unavailable: {0}")]
	EngineUnavailable(String),

	/// The engine was up but a generation call failed.
	#[error("text generation failed: {0}")]
	Engine(String),

	#[error(transparent)]
	DecodeContract(#[from] DecodeError),

	/// Siblings written earlier in the same batch are left in place.
	#[error("cannot write output file '{}': {source}", path.display())]
	OutputWrite {
		path: PathBuf,
		#[source]
		source: io::Error,
	},

	/// Standard output was closed or failed while printing samples.
	#[error("cannot print samples to the console: {0}")]
	ConsoleWrite(#[source] io::Error),
}

impl Error {
	pub(crate) fn configuration(message: impl Into<String>) -> Self {
		Self::Configuration(message.into())
	}

	/// Returns `true` for errors caused by how the tool was invoked rather
	/// than by what happened while running it.
	pub fn is_configuration(&self) -> bool {
		matches!(self, Self::Configuration(_) | Self::Config { .. })
	}
}

impl From<EngineError> for Error {
	fn from(error: EngineError) -> Self {
		match error {
			EngineError::Unavailable(_) | EngineError::AlreadyInitialized => {
				Self::EngineUnavailable(error.to_string())
			}
			EngineError::Generation(message) => Self::Engine(message),
		}
	}
}
