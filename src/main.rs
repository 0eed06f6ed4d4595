use clap::Parser;

use codebuddy::EXIT_RUNTIME_ERROR;
use codebuddy::cli::Cli;
use codebuddy::commands::{apply_cli_overrides, load_config, resolve_repository_dir, run_review};
use codebuddy::config::Config;
use codebuddy::logging::init_logging;

fn main() {
    let cli = Cli::parse();
    let exit_code = run(&cli);
    std::process::exit(exit_code);
}

/// Runs with logging installed; the log guard is dropped before exiting.
fn run(cli: &Cli) -> i32 {
    let loaded = resolve_repository_dir(&cli.repository_dir)
        .and_then(|root| load_config(cli, &root).map(|config| (root, config)));

    // Logging still needs a configuration when loading failed.
    let mut config = loaded
        .as_ref()
        .map_or_else(|_| Config::default(), |(_, config)| config.clone());
    apply_cli_overrides(&mut config, cli);

    let guard = match init_logging(&config.logging) {
        Ok(guard) => Some(guard),
        Err(e) => {
            eprintln!("Error: {e}");
            None
        }
    };

    let exit_code = match loaded {
        Ok((root, _)) => run_review(cli, &config, &root),
        Err(e) => {
            if guard.is_some() {
                tracing::error!(error = %e, error_type = e.error_type(), "An error occurred");
            } else {
                eprintln!("Error: {e}");
            }
            EXIT_RUNTIME_ERROR
        }
    };

    drop(guard);
    exit_code
}
