//! Embedded event-payload decoding.
//!
//! Match pages serialize their metadata as JSON inside the `data`
//! attribute of the event header element. The blob's shape is owned by the
//! site and changes without notice, so this module is the only place that
//! knows it. Every field is optional; absent fields decode to None rather
//! than failing the whole match.

use chrono::{Local, TimeZone};
use serde::Deserialize;

use crate::error::Result;

/// Decoded event-header blob.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventPayload {
    #[serde(default)]
    pub event_data: EventData,
    #[serde(default)]
    pub event_body: EventBody,
}

#[derive(Debug, Default, Deserialize)]
pub struct EventData {
    #[serde(default)]
    pub home: Option<String>,
    #[serde(default)]
    pub away: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventBody {
    /// Kick-off as a Unix timestamp in seconds.
    #[serde(default)]
    pub start_date: Option<i64>,
}

/// Decode the raw attribute value. Unknown fields are ignored.
pub fn decode(blob: &str) -> Result<EventPayload> {
    Ok(serde_json::from_str(blob)?)
}

/// Kick-off timestamp rendered as `DD.MM.YYYY HH:MM` in local time, the
/// form the export uses. None for timestamps outside the representable
/// range.
pub fn format_kickoff(timestamp: i64) -> Option<String> {
    Local
        .timestamp_opt(timestamp, 0)
        .single()
        .map(|kickoff| kickoff.format("%d.%m.%Y %H:%M").to_string())
}
