// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

use std::time::{Duration, Instant};

use colored::*;
use tracing::info_span;

use stalkr_common::{config::Config, info, success, warn};
use stalkr_core::store::TrackedStore;
use stalkr_core::tracker::{self, InvestigationOutcome};

use crate::sprint;
use crate::terminal::spinner::SpinnerGuard;
use crate::terminal::{
    colors,
    print::{self, Print},
};

pub async fn track(target: Option<&str>, cfg: &Config) -> anyhow::Result<()> {
    Print::header("starting investigation");

    let _guard: SpinnerGuard = run_spinner();

    let store: TrackedStore = TrackedStore::open(&cfg.store_path)?;

    let raw: String = match target {
        Some(raw) => raw.to_owned(),
        None => {
            info!("No target given, detecting own public address");
            tracker::detect_public_address(cfg).await?.to_string()
        }
    };

    let start_time: Instant = Instant::now();
    let outcome: InvestigationOutcome = tracker::investigate(&raw, cfg, &store).await?;
    let total_time: Duration = start_time.elapsed();

    investigation_ends(&outcome, total_time, cfg)
}

fn run_spinner() -> SpinnerGuard {
    let span = info_span!("track", indicatif.pb_show = true);
    let _enter = span.enter();

    SpinnerGuard::with_status(span.clone(), || {
        let settled = tracker::get_settled_count();
        let settled_str = settled.to_string().green().bold();
        format!("Settled {} of 4 probes so far...", settled_str)
            .color(colors::TEXT_DEFAULT)
            .italic()
    })
}

fn investigation_ends(
    outcome: &InvestigationOutcome,
    total_time: Duration,
    cfg: &Config,
) -> anyhow::Result<()> {
    if cfg.quiet > 0 {
        sprint!();
    }

    Print::header("Investigation Report");
    Print::record_tree(&outcome.record, 0);

    if let Err(e) = &outcome.persistence {
        warn!("Record computed but not persisted: {e}");
    }

    print_summary(outcome, total_time, cfg);
    Ok(())
}

fn print_summary(outcome: &InvestigationOutcome, total_time: Duration, cfg: &Config) {
    let slots: usize = outcome.record.results().len();
    let answered: usize = slots - outcome.record.failed_slots();

    let answered_str: ColoredString =
        format!("{answered} of {slots} probes answered").bold().green();
    let total_time: ColoredString = format!("{:.2}s", total_time.as_secs_f64()).bold().yellow();
    let output: ColoredString =
        format!("Investigation complete: {answered_str} in {total_time}")
            .color(colors::TEXT_DEFAULT);

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
