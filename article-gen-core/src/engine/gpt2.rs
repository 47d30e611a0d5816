use std::path::Path;

use rust_bert::gpt2::GPT2Generator;
use rust_bert::pipelines::common::{ModelResource, ModelType};
use rust_bert::pipelines::generation_utils::{GenerateConfig, GenerateOptions, LanguageGenerator};
use rust_bert::resources::LocalResource;

use super::{Engine, EngineError, InitOnce, new_token_budget, truncate_sample};
use crate::config::EngineConfig;
use crate::model::codec::START_MARKER;

static LOADED: InitOnce = InitOnce::new();

const WEIGHTS_FILE: &str = "rust_model.ot";
const CONFIG_FILE: &str = "config.json";
const VOCAB_FILE: &str = "vocab.json";
const MERGES_FILE: &str = "merges.txt";

/// Fine-tuned GPT-2 loaded from a local checkpoint directory.
///
/// The directory `<checkpoint_dir>/<run_name>` must hold the converted
/// weights (`rust_model.ot`) next to `config.json`, `vocab.json` and
/// `merges.txt`.
pub struct Gpt2Engine {
	model: GPT2Generator,
	truncate: String,
}

impl Gpt2Engine {
	/// Loads the model. Only one engine may be loaded per process.
	///
	/// # Errors
	/// - [`EngineError::AlreadyInitialized`] on a second call
	/// - [`EngineError::Unavailable`] if a model file is missing or fails to load
	pub fn load(config: &EngineConfig) -> Result<Self, EngineError> {
		LOADED.claim()?;

		let run_directory = config.run_directory();
		for file in [WEIGHTS_FILE, CONFIG_FILE, VOCAB_FILE, MERGES_FILE] {
			if !run_directory.join(file).is_file() {
				return Err(EngineError::Unavailable(format!(
					"model is missing: place '{}' in '{}' and try again (no {file})",
					config.run_name,
					config.checkpoint_dir.display()
				)));
			}
		}

		let generate_config = GenerateConfig {
			model_type: ModelType::GPT2,
			model_resource: ModelResource::Torch(Box::new(local(&run_directory, WEIGHTS_FILE))),
			config_resource: Box::new(local(&run_directory, CONFIG_FILE)),
			vocab_resource: Box::new(local(&run_directory, VOCAB_FILE)),
			merges_resource: Some(Box::new(local(&run_directory, MERGES_FILE))),
			do_sample: true,
			num_beams: 1,
			top_k: config.top_k,
			top_p: if config.top_p > 0.0 { config.top_p } else { 1.0 },
			temperature: config.temperature,
			..Default::default()
		};

		log::info!("loading {} ({}) from {}", config.run_name, config.model_name, run_directory.display());
		let model = GPT2Generator::new(generate_config).map_err(|e| EngineError::Unavailable(e.to_string()))?;

		Ok(Self { model, truncate: config.truncate.clone() })
	}
}

fn local(directory: &Path, file: &str) -> LocalResource {
	LocalResource { local_path: directory.join(file) }
}

impl Engine for Gpt2Engine {
	fn generate(&self, prompt: &str, sample_count: usize, max_length: usize) -> Result<Vec<String>, EngineError> {
		let prompt_tokens = self.model.get_tokenizer().tokenize(prompt).len();
		let max_new_tokens = new_token_budget(max_length, prompt_tokens, self.context_limit())?;

		let options = GenerateOptions {
			max_new_tokens: Some(max_new_tokens as i64),
			num_return_sequences: Some(sample_count as i64),
			..Default::default()
		};

		let outputs = self
			.model
			.generate(Some([prompt].as_slice()), Some(options))
			.map_err(|e| EngineError::Generation(e.to_string()))?;

		// Samples may run into a following article; keep the first one only.
		Ok(outputs
			.into_iter()
			.map(|output| {
				let text = truncate_sample(&output.text, &self.truncate, prompt.len());
				truncate_sample(text, START_MARKER, prompt.len()).to_owned()
			})
			.collect())
	}
}
