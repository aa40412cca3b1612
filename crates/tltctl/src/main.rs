//! Typing Level Tracker control - CLI front end and editor bridge.

use clap::Parser;
use tlt_common::TrackerError;
use tltctl::cli::{Cli, Commands};
use tltctl::commands::{self, Invocation};
use tltctl::errors::{EXIT_CONFIG_ERROR, EXIT_GENERAL_ERROR, EXIT_STORAGE_ERROR, EXIT_SUCCESS};
use tltctl::logging;
use tracing::error;

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let ctx = match Invocation::resolve(cli.config.as_deref(), cli.state.as_deref()) {
        Ok(ctx) => ctx,
        Err(e) => {
            error!("{:#}", e);
            eprintln!("[ERROR] {:#}", e);
            std::process::exit(EXIT_CONFIG_ERROR);
        }
    };

    let result = match &cli.command {
        Commands::Feed { machine } => commands::feed(&ctx, *machine),
        Commands::Status { json } => commands::status(&ctx, *json),
        Commands::Details => commands::details(&ctx),
        Commands::Langs => commands::langs(&ctx),
        Commands::Config { action } => commands::config(&ctx, action),
    };

    let code = match result {
        Ok(()) => EXIT_SUCCESS,
        Err(e) => {
            error!("{:#}", e);
            eprintln!("[ERROR] {:#}", e);
            if e.downcast_ref::<TrackerError>().is_some() {
                EXIT_STORAGE_ERROR
            } else {
                EXIT_GENERAL_ERROR
            }
        }
    };
    std::process::exit(code);
}
