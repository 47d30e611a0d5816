use std::process::ExitCode;

use clap::Parser;
use thiserror::Error;

use article_gen_core::{EngineConfig, Generator, load_engine};

mod cli;

use cli::{Cli, Mode};

#[derive(Debug, Error)]
enum AppError {
    #[error(transparent)]
    Generation(#[from] article_gen_core::Error),

    #[error("the window could not be opened: {0}")]
    Gui(#[from] article_gen_ui::GuiError),
}

impl AppError {
    fn exit_code(&self) -> ExitCode {
        match self {
            AppError::Generation(e) if e.is_configuration() => ExitCode::from(2),
            _ => ExitCode::FAILURE,
        }
    }
}

fn run(cli: Cli) -> Result<(), AppError> {
    // Options are checked before the model is loaded, which can take a while.
    let mode = cli.into_mode()?;

    let config = EngineConfig::load()?;
    let engine = load_engine(&config).map_err(article_gen_core::Error::from)?;
    let generator = Generator::new(engine);

    match mode {
        Mode::Interactive => {
            log::info!("no options given, opening the window");
            article_gen_ui::run(generator)?;
        }
        Mode::Batch(plan) => {
            generator.generate_from_source(&plan.source, plan.sample_count, &plan.output, plan.max_words)?;
        }
    }
    Ok(())
}

/// Application entry point.
fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::debug!("{e:?}");
            eprintln!("error: {e}");
            e.exit_code()
        }
    }
}
