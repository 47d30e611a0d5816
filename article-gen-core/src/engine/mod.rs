//! Boundary to the pretrained text-generation engine.
//!
//! The orchestrator only sees the [`Engine`] trait. A GPT-2 backend built on
//! `rust-bert` is available behind the `gpt2` feature.

use std::sync::atomic::{AtomicBool, Ordering};

use thiserror::Error;

use crate::config::EngineConfig;
use crate::model::request::CONTEXT_LIMIT;

/// GPT-2 backend (requires libtorch).
#[cfg(feature = "gpt2")]
pub mod gpt2;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
	/// The model could not be found or loaded.
	#[error("{0}")]
	Unavailable(String),

	/// A second engine was constructed in the same process.
	#[error("the engine has already been initialised in this process")]
	AlreadyInitialized,

	/// The model was loaded but generation failed.
	#[error("{0}")]
	Generation(String),
}

/// A pretrained text generator.
///
/// Implementations are synchronous and may block for as long as inference
/// takes.
pub trait Engine {
	/// Generates `sample_count` continuations of `prompt`, each bounded by
	/// `max_length` words. Every returned string starts with the prompt.
	fn generate(&self, prompt: &str, sample_count: usize, max_length: usize) -> Result<Vec<String>, EngineError>;

	/// Largest `max_length` accepted by [`Engine::generate`].
	fn context_limit(&self) -> usize {
		CONTEXT_LIMIT
	}
}

impl<E: Engine + ?Sized> Engine for Box<E> {
	fn generate(&self, prompt: &str, sample_count: usize, max_length: usize) -> Result<Vec<String>, EngineError> {
		(**self).generate(prompt, sample_count, max_length)
	}

	fn context_limit(&self) -> usize {
		(**self).context_limit()
	}
}

/// One-shot latch guarding process-wide engine state.
///
/// The model runtime is loaded once per process and never torn down, so a
/// backend claims its latch while being constructed and refuses a second
/// construction.
pub struct InitOnce {
	claimed: AtomicBool,
}

impl InitOnce {
	pub const fn new() -> Self {
		Self { claimed: AtomicBool::new(false) }
	}

	/// Claims the latch.
	///
	/// # Errors
	/// Returns [`EngineError::AlreadyInitialized`] on every call after the first.
	pub fn claim(&self) -> Result<(), EngineError> {
		self.claimed
			.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
			.map(|_| ())
			.map_err(|_| EngineError::AlreadyInitialized)
	}

	pub fn is_claimed(&self) -> bool {
		self.claimed.load(Ordering::Acquire)
	}
}

impl Default for InitOnce {
	fn default() -> Self {
		Self::new()
	}
}

/// Cuts `raw` at the first occurrence of `marker` found at or after byte
/// offset `from`. Offsets past the end or inside a character leave `raw`
/// untouched.
pub fn truncate_sample<'a>(raw: &'a str, marker: &str, from: usize) -> &'a str {
	if marker.is_empty() {
		return raw;
	}
	match raw.get(from..).and_then(|tail| tail.find(marker)) {
		Some(position) => &raw[..from + position],
		None => raw,
	}
}

/// Number of tokens a model may add after a prompt of `prompt_tokens`
/// tokens: `requested`, capped so prompt and continuation fit in `limit`
/// positions.
///
/// # Errors
/// Returns [`EngineError::Generation`] if the prompt alone fills the context.
pub fn new_token_budget(requested: usize, prompt_tokens: usize, limit: usize) -> Result<usize, EngineError> {
	let room = limit.saturating_sub(prompt_tokens);
	if room == 0 {
		return Err(EngineError::Generation(format!(
			"the prompt is {prompt_tokens} tokens long and leaves no room in a context of {limit}"
		)));
	}
	if requested > room {
		log::debug!("capping generation at {room} new tokens instead of {requested}");
	}
	Ok(requested.min(room))
}

/// Loads the engine described by `config`.
///
/// Called once at start-up; the returned engine is handed to the generator.
///
/// # Errors
/// Returns [`EngineError::Unavailable`] if the model cannot be loaded, or if
/// this build carries no model backend.
#[cfg(feature = "gpt2")]
pub fn load_engine(config: &EngineConfig) -> Result<Box<dyn Engine>, EngineError> {
	Ok(Box::new(gpt2::Gpt2Engine::load(config)?))
}

#[cfg(not(feature = "gpt2"))]
pub fn load_engine(config: &EngineConfig) -> Result<Box<dyn Engine>, EngineError> {
	Err(EngineError::Unavailable(format!(
		"this build has no model backend; rebuild with the `gpt2` feature to load '{}'",
		config.run_directory().display()
	)))
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn latch_rejects_second_claim() {
		static LATCH: InitOnce = InitOnce::new();
		assert!(!LATCH.is_claimed());
		assert_eq!(LATCH.claim(), Ok(()));
		assert_eq!(LATCH.claim(), Err(EngineError::AlreadyInitialized));
		assert!(LATCH.is_claimed());
	}

	#[test]
	fn truncation_starts_at_offset() {
		let raw = "<|startoftext|>abc<|endoftext|><|startoftext|>def";
		assert_eq!(truncate_sample(raw, "<|startoftext|>", 1), "<|startoftext|>abc<|endoftext|>");
		assert_eq!(truncate_sample(raw, "<|endoftext|><|startoftext|>", 0), "<|startoftext|>abc");
	}

	#[test]
	fn truncation_without_marker_keeps_everything() {
		assert_eq!(truncate_sample("abc", "<|x|>", 0), "abc");
		assert_eq!(truncate_sample("abc", "", 0), "abc");
		assert_eq!(truncate_sample("abc", "a", 10), "abc");
		assert_eq!(truncate_sample("é<|x|>", "<|x|>", 1), "é<|x|>");
	}

	#[test]
	fn token_budget_leaves_room_for_the_prompt() {
		assert_eq!(new_token_budget(100, 15, CONTEXT_LIMIT), Ok(100));
		assert_eq!(new_token_budget(CONTEXT_LIMIT, 15, CONTEXT_LIMIT), Ok(CONTEXT_LIMIT - 15));
		assert_eq!(new_token_budget(10, CONTEXT_LIMIT - 1, CONTEXT_LIMIT), Ok(1));
	}

	#[test]
	fn prompt_filling_the_context_is_refused() {
		assert!(matches!(new_token_budget(1, CONTEXT_LIMIT, CONTEXT_LIMIT), Err(EngineError::Generation(_))));
		assert!(new_token_budget(1, CONTEXT_LIMIT + 40, CONTEXT_LIMIT).is_err());
	}

	#[cfg(not(feature = "gpt2"))]
	#[test]
	fn backendless_build_reports_unavailable() {
		let error = load_engine(&EngineConfig::default()).err().unwrap();
		assert!(matches!(error, EngineError::Unavailable(_)));
	}
}
