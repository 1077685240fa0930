//! Shared test support for core service tests
//!
//! Each integration test binary includes this module; not every binary
//! uses every helper.
#![allow(dead_code)]

pub mod repositories;

use chronicle_domain::ActivityPayload;
use chrono::{DateTime, TimeZone, Utc};
use serde_json::Map;

/// Base timestamp used by payload builders (2023-11-14 22:13:20 UTC).
pub const BASE_TS: i64 = 1_700_000_000;

/// Build a payload for a ten-minute interval starting at `BASE_TS + offset`.
pub fn sample_payload(executable: &str, offset_secs: i64) -> ActivityPayload {
    ActivityPayload {
        start_time: ts(BASE_TS + offset_secs),
        end_time: ts(BASE_TS + offset_secs + 600),
        executable_name: executable.to_string(),
        browser_url: None,
        browser_title: None,
        ip_address: "10.0.0.7".to_string(),
        mac_address: "aa:bb:cc:dd:ee:ff".to_string(),
        idle_activity: false,
        activity_type: Some("os".to_string()),
        extra: Map::new(),
    }
}

/// Convert unix seconds to a UTC datetime, panicking on out-of-range input.
pub fn ts(secs: i64) -> DateTime<Utc> {
    Utc.timestamp_opt(secs, 0).single().expect("timestamp in range")
}
