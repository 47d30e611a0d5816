//! Top-level module for article generation.
//!
//! This module provides:
//! - The prompt format shared with the engine (`codec`)
//! - Requests, samples and output destinations (`request`)
//! - Resolution of titles and content from literal values or files (`source`)
//! - A high-level generation interface (`Generator`)

/// Prompt encoding and raw sample decoding.
///
/// The markers are a fixed contract with the engine: a fine-tuned model
/// only produces decodable output for prompts in exactly this layout.
pub mod codec;

/// High-level interface validating requests, calling the engine and
/// fanning samples out to the console and files.
pub mod generator;

/// Validated requests, decoded samples and output destinations.
pub mod request;

/// Precedence rules between combined files, title/content files and
/// literal values.
pub mod source;
