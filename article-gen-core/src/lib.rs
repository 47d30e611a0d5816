//! Article generation driven by a pretrained language model.
//!
//! This crate provides:
//! - The prompt format understood by the fine-tuned model, and decoding of its output
//! - An engine boundary, with an optional GPT-2 backend (`gpt2` feature)
//! - Request validation, input resolution and output fan-out
//! - Engine configuration loaded from TOML
//!
//! Front-ends (command line, desktop) build a [`Generator`] once at start-up
//! and drive it.

/// Engine settings.
pub mod config;

/// Text-generation engine boundary.
pub mod engine;

/// Error taxonomy shared by every front-end.
pub mod error;

/// Prompt format, requests, input resolution and the generator.
pub mod model;

/// I/O utilities (line reading, numbered output paths).
pub mod io;

pub use config::EngineConfig;
pub use engine::{Engine, EngineError, load_engine};
pub use error::{Error, Result};
pub use model::generator::{Generator, write_samples};
pub use model::request::{CONTEXT_LIMIT, DEFAULT_MAX_WORDS, DEFAULT_SAMPLE_COUNT, GenerationRequest, OutputOptions, Sample, SampleSet};
pub use model::source::{InputArgs, InputSource};
