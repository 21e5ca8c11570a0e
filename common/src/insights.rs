// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

use rand::seq::SliceRandom;
use rand::{Rng, rng};

/// Internal tool-specific operational guidance.
const TRACKER_TIPS: &[&str] = &[
    "Run 'track' with no target to investigate your own public IP",
    "One slow probe never delays the others past its own budget",
    "Tune per-probe deadlines with --timeout-ms",
    "Your history lives in tracked_ips.json next to where you run",
    "'lan' reads the neighbor cache only, it sends no packets",
    "A record with every probe failed is still worth keeping",
];

/// Technical facts and networking trivia.
const TECH_TRIVIA: &[&str] = &[
    "PTR records live under the in-addr.arpa zone, spelled backwards",
    "1.1.1.1 is actually owned by APNIC, not Cloudflare",
    "Port 23 is telnet, and yes, things still listen on it",
    "RFC 1149: Standard for Avian IP (actual pigeons)",
];

/// Industry jokes and developer humor.
const DEV_HUMOR: &[&str] = &[
    "UDP: I'd tell you a joke, but you might not get it",
    "TCP: I'll tell you a joke. Do you want to hear a joke?",
    "The geolocation says my server is in the ocean",
    "The 'S' in IoT stands for Security",
];

/// Generates a randomized list of UI messages.
///
/// Every slot in the resulting list has a 50% probability of being an
/// operational tip and a 50% probability of being flavor text
/// (trivia/humor), provided both pools still have remaining items.
pub fn get_shuffled_insights() -> Vec<&'static str> {
    let mut rng = rng();

    let mut tips = TRACKER_TIPS.to_vec();
    tips.shuffle(&mut rng);

    let mut flavor: Vec<&str> = TECH_TRIVIA
        .iter()
        .chain(DEV_HUMOR.iter())
        .copied()
        .collect();
    flavor.shuffle(&mut rng);

    let total_len = tips.len() + flavor.len();
    let mut output = Vec::with_capacity(total_len);

    while !tips.is_empty() && !flavor.is_empty() {
        let pick_tip = rng.random_bool(0.5);
        if pick_tip {
            output.push(tips.remove(0));
        } else {
            output.push(flavor.remove(0));
        }
    }

    output.extend(tips);
    output.extend(flavor);
    output
}
