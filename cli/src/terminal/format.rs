use colored::*;
use stalkr_common::models::device::Device;
use stalkr_common::models::record::{InvestigationRecord, ProbeKind, ProbeResult};

use crate::terminal::colors;

type Detail = (String, ColoredString);

/// Flattens a record into tree rows, one slot after another in
/// canonical probe order. Failed slots render as their error text.
pub fn record_to_details(record: &InvestigationRecord) -> Vec<Detail> {
    let mut details: Vec<Detail> = Vec::new();

    for kind in ProbeKind::ALL {
        match record.result_for(kind) {
            Some(ProbeResult::Geolocation(info)) => {
                details.push((String::from("Country"), optional_field(&info.country)));
                details.push((String::from("Region"), optional_field(&info.region)));
                details.push((String::from("City"), optional_field(&info.city)));
                details.push((String::from("ISP"), optional_field(&info.isp)));
            }
            Some(ProbeResult::ReverseDns(info)) => {
                let value: ColoredString = match &info.hostname {
                    Some(hostname) => hostname.as_str().color(colors::HOSTNAME),
                    None => "no PTR record".dimmed(),
                };
                details.push((String::from("Hostname"), value));
            }
            Some(ProbeResult::Reputation(report)) => {
                let value: ColoredString = format!("{} byte report cached", report.document.len())
                    .color(colors::SECONDARY);
                details.push((String::from("Abuse"), value));
            }
            Some(ProbeResult::PortReachability(report)) => {
                let value: ColoredString = if report.reachable.is_empty() {
                    "none reachable".dimmed()
                } else {
                    report
                        .reachable
                        .iter()
                        .map(u16::to_string)
                        .collect::<Vec<String>>()
                        .join(", ")
                        .color(colors::PORT_LIST)
                };
                details.push((String::from("Ports"), value));
            }
            Some(ProbeResult::Failure { error, .. }) => {
                details.push((slot_label(kind).to_string(), error.to_string().red()));
            }
            // Only reachable through hand-edited history files.
            None => {
                details.push((slot_label(kind).to_string(), "missing from record".dimmed()));
            }
        }
    }

    details
}

pub fn device_to_details(device: &Device) -> Vec<Detail> {
    let hostname: ColoredString = match &device.hostname {
        Some(name) => name.as_str().color(colors::HOSTNAME),
        None => "unknown".dimmed(),
    };

    vec![
        (String::from("MAC"), device.mac.as_str().color(colors::MAC_ADDR)),
        (String::from("Hostname"), hostname),
    ]
}

fn slot_label(kind: ProbeKind) -> &'static str {
    match kind {
        ProbeKind::Geolocation => "Location",
        ProbeKind::ReverseDns => "Hostname",
        ProbeKind::Reputation => "Abuse",
        ProbeKind::PortReachability => "Ports",
    }
}

fn optional_field(value: &Option<String>) -> ColoredString {
    match value {
        Some(v) => v.as_str().color(colors::GEO_FIELD),
        None => "unknown".dimmed(),
    }
}
