// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

use std::sync::OnceLock;

use anyhow::bail;
use colored::*;
use stalkr_common::config::Config;
use stalkr_common::models::device::Device;
use stalkr_common::models::record::InvestigationRecord;
use unicode_width::UnicodeWidthStr;

use crate::terminal::{banner, colors, format};

pub const TOTAL_WIDTH: usize = 64;

static PRINT: OnceLock<Print> = OnceLock::new();

type Detail = (String, ColoredString);

#[macro_export]
macro_rules! sprint {
    () => {
        $crate::sprint!("");
    };
    ($($arg:tt)*) => {
        tracing::info!(
            target: "stalkr::print",
            raw_msg = %format_args!($($arg)*)
        );
    };
}

pub struct Print {
    no_banner: bool,
    q_level: u8,
}

impl Print {
    fn new(cfg: &Config) -> Self {
        Self {
            no_banner: cfg.no_banner,
            q_level: cfg.quiet,
        }
    }

    pub fn init(cfg: &Config) -> anyhow::Result<()> {
        let term = Self::new(cfg);
        if PRINT.set(term).is_err() {
            bail!("terminal has already been initialized")
        }
        Ok(())
    }

    fn get() -> &'static Self {
        PRINT.get().expect("terminal has not been initialized")
    }

    pub fn banner() {
        let p = Self::get();
        if p.no_banner || p.q_level > 0 {
            return;
        }

        let text_content: String = format!("⟦ STALKR v{} ⟧ ", env!("CARGO_PKG_VERSION"));
        let text_width: usize = UnicodeWidthStr::width(text_content.as_str());
        let text: ColoredString = text_content.bright_green().bold();
        let sep: ColoredString = "═"
            .repeat(TOTAL_WIDTH.saturating_sub(text_width) / 2)
            .bright_black();
        let output: String = format!("{}{}{}", sep, text, sep);

        sprint!("{}", output);
        banner::print();
    }

    pub fn header(msg: &str) {
        let p = Self::get();
        if p.q_level > 0 {
            sprint!();
            return;
        }

        let formatted: String = format!("⟦ {} ⟧", msg);
        let msg_len: usize = formatted.chars().count();

        let dash_count: usize = TOTAL_WIDTH.saturating_sub(msg_len);
        let left: usize = dash_count / 2;
        let right: usize = dash_count - left;

        let line: ColoredString = format!(
            "{}{}{}",
            "─".repeat(left),
            formatted.to_uppercase().bright_green(),
            "─".repeat(right)
        )
        .bright_black();

        sprint!("{}", line);
    }

    /// One investigation as an indexed tree: head line with target and
    /// start time, one branch per intelligence detail.
    pub fn record_tree(record: &InvestigationRecord, idx: usize) {
        Self::record_head(idx, record);
        as_tree(format::record_to_details(record));
    }

    fn record_head(idx: usize, record: &InvestigationRecord) {
        let stamp: String = record
            .started_at
            .format("%Y-%m-%d %H:%M:%S UTC")
            .to_string();
        let stamp_width: usize = stamp.width();

        let block_width: usize = 26;
        let local_pad: usize = block_width.saturating_sub(stamp_width);
        let right_part: String = format!("{}{}", " ".repeat(local_pad), stamp);

        let left_part: String = format!("[{}] {}", idx, record.target);

        let used_width: usize = left_part.width() + block_width;

        let padding_len: usize = TOTAL_WIDTH.saturating_sub(used_width + 1);
        let padding: String = " ".repeat(padding_len);

        sprint!(
            "{} {}{}{}",
            format!("[{}]", idx.to_string().color(colors::ACCENT)).color(colors::SEPARATOR),
            record.target.to_string().color(colors::IPV4_ADDR),
            padding,
            right_part.color(colors::SECONDARY)
        );
    }

    pub fn devices(devices: &[Device]) {
        for (idx, device) in devices.iter().enumerate() {
            tree_head(idx, &device.ip.to_string());
            as_tree(format::device_to_details(device));
            if idx + 1 != devices.len() {
                sprint!();
            }
        }
    }

    pub fn end_of_program() {
        let p = Self::get();
        if p.q_level > 0 {
            return;
        }
        sprint!("{}", "═".repeat(TOTAL_WIDTH).color(colors::SEPARATOR));
    }
}

pub fn divider() {
    let sep: ColoredString = "═".repeat(TOTAL_WIDTH).bright_black();
    sprint!("{}", sep);
}

pub fn tree_head(idx: usize, name: &str) {
    let idx_str: String = format!("[{}]", idx.to_string().color(colors::ACCENT));
    sprint!(
        "{} {}",
        idx_str.color(colors::SEPARATOR),
        name.color(colors::PRIMARY)
    );
}

pub fn as_tree(details: Vec<Detail>) {
    let padding_width: usize = details
        .iter()
        .map(|(key, _)| key.width())
        .max()
        .unwrap_or(0);

    for (i, (key, value)) in details.iter().enumerate() {
        let last: bool = i + 1 == details.len();
        let branch: ColoredString = if !last { "├─" } else { "└─" }.bright_black();

        let dots_count: usize = padding_width.saturating_sub(key.width());
        let dots: ColoredString = ".".repeat(dots_count).color(colors::SEPARATOR);

        sprint!(
            " {} {}{}{} {}",
            branch,
            key.color(colors::TEXT_DEFAULT),
            dots,
            ":".color(colors::SEPARATOR),
            value
        );
    }
}

pub fn centerln(msg: &ColoredString) {
    let rendered: String = msg.to_string();
    let width: usize = console::measure_text_width(&rendered);
    let space: String = " ".repeat(TOTAL_WIDTH.saturating_sub(width) / 2);
    sprint!("{}{}", space, rendered);
}
