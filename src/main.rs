// Allow panic/unwrap/expect in tests (denied globally via Cargo.toml lints)
#![cfg_attr(
    test,
    allow(
        clippy::panic,
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::panic_in_result_fn,
        clippy::unwrap_in_result,
        clippy::indexing_slicing
    )
)]

mod app;
mod commands;

use app::Args;
use clap::Parser;
use color_eyre::eyre::Result;
use commands::Context;
use crowdfund::logging::{init_logging, parse_level, parse_rotation, LogConfig};
use crowdfund::{load_config, Store};
use std::process::ExitCode;
use tracing::{debug, info};

fn main() -> Result<ExitCode> {
    // Install color-eyre error hooks for colored error output
    color_eyre::install()?;

    // Parse CLI arguments first (before logging, so we can use log config)
    let args = Args::parse();

    let config = load_config(args.config.as_deref(), args.data_dir.as_deref())?;

    let log_dir = args.log_dir.unwrap_or_else(|| config.logging.dir.clone());
    let log_config = LogConfig {
        log_dir,
        log_level: parse_level(&config.logging.level),
        json_format: args.log_json || config.logging.json,
        rotation: parse_rotation(
            args.log_rotation
                .as_deref()
                .unwrap_or(&config.logging.rotation),
        ),
        ..Default::default()
    };

    if let Err(e) = init_logging(log_config) {
        eprintln!("Warning: logging could not be set up ({e}); continuing without a log file");
    }

    let store = Store::from_config(&config.storage);
    debug!(
        "Using {} and {}",
        store.users_path().display(),
        store.projects_path().display()
    );
    let mut ctx = Context::open(&store);

    match commands::run(&mut ctx, args.command) {
        Ok(()) => Ok(ExitCode::SUCCESS),
        Err(e) => {
            info!("Command failed: {e}");
            eprintln!("Error: {e}");
            Ok(ExitCode::FAILURE)
        }
    }
}
