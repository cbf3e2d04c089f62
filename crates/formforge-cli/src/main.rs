//! formforge - shorten a beta-tested exam form while keeping it reliable.

use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use owo_colors::OwoColorize;

use formforge::console::{render_json, render_summary, NarrativeListener};
use formforge::{FormForgeError, Result};

mod cli;

use cli::{base_config, Cli, Commands, OutputFormat};

fn main() -> ExitCode {
    let cli = Cli::parse();
    if !cli.quiet {
        formforge::console::init();
    }

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {e}", "error:".bright_red().bold());
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    let config = base_config(cli.config.as_deref())?;

    match &cli.command {
        Commands::Run(args) => {
            let config = args.apply(config)?;
            match args.format {
                OutputFormat::Text => {
                    // steps print as they are committed
                    let narrative = Arc::new(NarrativeListener::stdout());
                    let result = formforge::run_with_listener(&config, narrative)?;
                    print!("{}", render_summary(&result));
                }
                OutputFormat::Json => {
                    let result = formforge::run(&config)?;
                    let json = render_json(&result)
                        .map_err(|e| FormForgeError::Internal(e.to_string()))?;
                    println!("{json}");
                }
            }
        }
        Commands::Alpha(inputs) => {
            let config = inputs.apply(config);
            let alpha = formforge::form_reliability(&config)?;
            println!("Alpha for the full form is {alpha:.5}");
        }
    }
    Ok(())
}
