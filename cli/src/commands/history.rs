// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

use colored::*;

use stalkr_common::{config::Config, info, success};
use stalkr_core::store::TrackedStore;

use crate::sprint;
use crate::terminal::{
    colors,
    print::{self, Print},
};

pub fn history(cfg: &Config) -> anyhow::Result<()> {
    Print::header("investigation history");

    let store: TrackedStore = TrackedStore::open(&cfg.store_path)?;
    let records = store.list_all()?;

    if records.is_empty() {
        info!("No investigations on record yet");
        return Ok(());
    }

    for (idx, record) in records.iter().enumerate() {
        Print::record_tree(record, idx);
        if idx + 1 != records.len() {
            sprint!();
        }
    }

    print_summary(records.len(), cfg);
    Ok(())
}

fn print_summary(count: usize, cfg: &Config) {
    let unit: &str = if count == 1 { "investigation" } else { "investigations" };
    let counted: ColoredString = format!("{count} {unit}").bold().green();
    let output: ColoredString =
        format!("History read: {counted} on record").color(colors::TEXT_DEFAULT);

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
