// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

//! # Stalkr CLI Entry Point
//!
//! The binary entry point for Stalkr.
//!
//! This module bootstraps the application runtime and manages the global
//! lifecycle of the process, isolating the command-line layer from the
//! core library logic.
//!
//! ## Responsibilities
//!
//! 1.  **Runtime Initialization**: The `#[tokio::main]` attribute brings up
//!     the asynchronous runtime the probe fan-out runs on.
//! 2.  **Global State Setup**: Initializes the `tracing` subscriber for
//!     logging and configures terminal output modes (verbosity, quiet
//!     mode, banners).
//! 3.  **Configuration Mapping**: Converts raw command-line arguments
//!     (parsed via `clap`) into the internal `Config` struct used by the
//!     core libraries.
//! 4.  **Command Dispatch**: Routes execution to the appropriate module in
//!     `commands/`.
//! 5.  **Error Boundary**: Any error propagated up from a subcommand is
//!     caught here, logged, and converted into a non-zero `ExitCode`.

mod commands;
mod terminal;

use std::process::ExitCode;

use stalkr_common::{config::Config, error};

use crate::{
    commands::{CommandLine, Commands, history, lan, track},
    terminal::{print::Print, spinner},
};

#[tokio::main]
async fn main() -> ExitCode {
    let commands = CommandLine::parse_args();
    spinner::init_logging(commands.verbosity);

    let cfg = Config::from(&commands);

    let _ = Print::init(&cfg);
    Print::banner();

    let result = match &commands.command {
        Commands::Track { target } => track::track(target.as_deref(), &cfg).await,
        Commands::Lan => lan::lan(&cfg),
        Commands::History => history::history(&cfg),
    };

    let exit_code = match result {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Critical failure: {e}");
            ExitCode::FAILURE
        }
    };

    Print::end_of_program();

    exit_code
}
