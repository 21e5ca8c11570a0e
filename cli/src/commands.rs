// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

//! # Command Line Interface Definitions
//!
//! This module defines the strict schema for user input.
//!
//! The *execution* logic for each command lives in its own submodule
//! (`track`, `lan`, `history`); the *definition* of arguments, flags and
//! help text is centralized here.
//!
//! Via the `From<&CommandLine> for Config` implementation, the external
//! interface (CLI flags) stays decoupled from the internal application
//! state (`Config`), so the core libraries remain agnostic of the user
//! interface layer.

pub mod history;
pub mod lan;
pub mod track;

use std::path::PathBuf;
use std::time::Duration;

use clap::{ArgAction, Parser, Subcommand};
use stalkr_common::config::{Config, DEFAULT_PROBE_TIMEOUT_MS, DEFAULT_STORE_FILE};

#[derive(Parser)]
#[command(name = "stalkr")]
#[command(about = "IP intelligence gathering and tracking tool.")]
pub struct CommandLine {
    #[command(subcommand)]
    pub command: Commands,

    /// Keep logs and colors but hide the ASCII art
    #[arg(long = "no-banner", global = true)]
    pub no_banner: bool,

    /// Reduce UI visual density (-q: plain log lines, no trees)
    #[arg(short = 'q', long = "quiet", action = ArgAction::Count, global = true)]
    pub quiet: u8,

    /// Increase logging detail (-v: debug logs)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count, global = true)]
    pub verbosity: u8,

    /// Time budget per probe, in milliseconds
    #[arg(long = "timeout-ms", global = true, default_value_t = DEFAULT_PROBE_TIMEOUT_MS)]
    pub timeout_ms: u64,

    /// Location of the investigation history file
    #[arg(long = "store", global = true, default_value = DEFAULT_STORE_FILE)]
    pub store: PathBuf,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Investigate an IP address (your own public one if omitted)
    #[command(alias = "t")]
    Track {
        #[arg(value_name = "TARGET")]
        target: Option<String>,
    },

    /// Snapshot the devices visible on the local network segment
    #[command(alias = "l")]
    Lan,

    /// List every investigation on record
    #[command(alias = "hist")]
    History,
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

impl From<&CommandLine> for Config {
    fn from(cmd: &CommandLine) -> Self {
        Self {
            no_banner: cmd.no_banner,
            quiet: cmd.quiet,
            probe_timeout: Duration::from_millis(cmd.timeout_ms),
            store_path: cmd.store.clone(),
            ..Config::default()
        }
    }
}
