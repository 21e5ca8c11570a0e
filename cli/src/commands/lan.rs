// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

use colored::*;

use stalkr_common::{config::Config, error, success, warn};
use stalkr_core::lan;

use crate::sprint;
use crate::terminal::{
    colors,
    print::{self, Print},
};

pub fn lan(cfg: &Config) -> anyhow::Result<()> {
    Print::header("local network snapshot");

    // An unreadable neighbor table is reported, never fatal.
    let devices = match lan::discover() {
        Ok(devices) => devices,
        Err(e) => {
            error!("LAN discovery unavailable: {e}");
            return Ok(());
        }
    };

    if devices.is_empty() {
        warn!("The neighbor table has no usable entries");
        return Ok(());
    }

    Print::devices(&devices);
    print_summary(devices.len(), cfg);
    Ok(())
}

fn print_summary(count: usize, cfg: &Config) {
    let unit: &str = if count == 1 { "device" } else { "devices" };
    let counted: ColoredString = format!("{count} {unit}").bold().green();
    let output: ColoredString =
        format!("Snapshot complete: {counted} in the neighbor cache").color(colors::TEXT_DEFAULT);

    match cfg.quiet {
        0 => {
            print::divider();
            print::centerln(&output);
        }
        _ => {
            sprint!();
            success!("{output}")
        }
    }
}
