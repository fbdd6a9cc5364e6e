//! Top-level run and error reporting for the `builder` binary

use anyhow::{Context, Result};
use tracing::info;

use crate::application::pipeline;
use crate::error::{BuilderError, EXIT_FATAL};
use crate::infrastructure::{resolve_config_path, JsonConfigRepository};

use super::cli::Cli;
use super::{factory, show};

/// Load, run the selected phases, show, then save.
///
/// The config is written back even when a phase fails, so an artifact
/// recorded by a successful build survives a failed install. It is never
/// written when it could not be loaded.
pub fn run(cli: &Cli) -> Result<()> {
    if cli.experimental {
        info!("experimental mode requested; nothing is gated on it in this release");
    }

    let repo = JsonConfigRepository::new(resolve_config_path(cli.config.as_deref()));
    let mut config = repo.load()?;
    info!(path = %repo.path().display(), targets = config.install_targets.len(), "config loaded");

    let events = factory::create_event_sink(cli.json);
    let executor = factory::create_executor();
    let outcome = pipeline::run(&executor, events.as_ref(), &mut config, &cli.run_plan());

    if outcome.is_ok() && cli.show {
        print!("{}", show::render_config(&config));
    }

    let saved = repo
        .save(&config)
        .with_context(|| format!("failed to save {}", repo.path().display()));

    let summary = outcome?;
    saved?;
    info!(?summary, "run complete");
    Ok(())
}

/// Process exit status for a failed run
pub fn exit_status(err: &anyhow::Error) -> u8 {
    let code = err
        .downcast_ref::<BuilderError>()
        .map(BuilderError::exit_code)
        .unwrap_or(EXIT_FATAL);
    u8::try_from(code).unwrap_or(1)
}

/// Remote stderr the event stream has not already shown
fn unreported_stderr(err: &anyhow::Error) -> Option<&str> {
    match err.downcast_ref::<BuilderError>()? {
        BuilderError::Install(_) => None,
        other => other.remote_stderr().filter(|s| !s.trim().is_empty()),
    }
}

/// Print a failed run for the operator; `full` dumps the whole error chain
pub fn report_error(err: &anyhow::Error, full: bool) {
    if full {
        eprintln!("Error: {:?}", err);
        if let Some(inner) = err.downcast_ref::<BuilderError>() {
            eprintln!("{:#?}", inner);
        }
    } else {
        eprintln!("Error: {:#}", err);
    }
    if let Some(stderr) = unreported_stderr(err) {
        eprintln!("{}", stderr.trim_end());
    }
}
