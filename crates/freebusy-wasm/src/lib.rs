//! WASM bindings for freebusy-engine.
//!
//! Exposes timeline normalization, point lookup, and free-slot computation to
//! JavaScript via `wasm-bindgen`. All complex types are passed as JSON strings.
//!
//! ## Build process
//!
//! ```sh
//! cargo build -p freebusy-wasm --target wasm32-unknown-unknown --release
//! wasm-bindgen --target web --out-dir packages/freebusy-js/wasm/ \
//!   target/wasm32-unknown-unknown/release/freebusy_wasm.wasm
//! ```

use chrono::{DateTime, NaiveDateTime, Utc};
use freebusy_engine::{BusyStatus, Interval, ParticipantTimeline, RawInterval};
use serde::{Deserialize, Serialize};
use wasm_bindgen::prelude::*;

// ---------------------------------------------------------------------------
// Serde-friendly DTOs for crossing the WASM boundary as JSON
// ---------------------------------------------------------------------------

/// Input format for a query passed from JavaScript.
#[derive(Deserialize)]
struct QueryInput {
    participant: String,
    from: String,
    until: String,
    #[serde(default)]
    intervals: Vec<IntervalInput>,
}

#[derive(Deserialize)]
struct IntervalInput {
    start: String,
    end: String,
    status: String,
    #[serde(default)]
    origin: Option<String>,
}

#[derive(Serialize)]
struct IntervalDto {
    start: String,
    end: String,
    status: BusyStatus,
    #[serde(skip_serializing_if = "String::is_empty")]
    origin: String,
}

impl From<&Interval> for IntervalDto {
    fn from(i: &Interval) -> Self {
        Self {
            start: i.start().to_rfc3339(),
            end: i.end().to_rfc3339(),
            status: i.status(),
            origin: i.origin().to_string(),
        }
    }
}

#[derive(Serialize)]
struct TimelineDto {
    participant: String,
    from: String,
    until: String,
    intervals: Vec<IntervalDto>,
    /// Number of input records dropped as invalid.
    skipped: usize,
}

#[derive(Serialize)]
struct FreeSlotDto {
    start: String,
    end: String,
    duration_minutes: i64,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Parse an ISO 8601 datetime string into `DateTime<Utc>`.
///
/// Accepts both RFC 3339 (with timezone offset, e.g., "2026-02-17T14:00:00+00:00")
/// and naive local time (e.g., "2026-02-17T14:00:00"), which is interpreted as UTC.
fn parse_datetime(s: &str) -> Result<DateTime<Utc>, String> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S")
        .map(|ndt| ndt.and_utc())
        .map_err(|e| format!("Invalid datetime '{}': {}", s, e))
}

/// Build and normalize a timeline from a query JSON string.
///
/// Records with an empty range or unknown status are skipped; unparseable
/// datetimes or an invalid window fail the whole query.
fn load_timeline(query_json: &str) -> Result<(ParticipantTimeline, usize), String> {
    let query: QueryInput =
        serde_json::from_str(query_json).map_err(|e| format!("Invalid query JSON: {}", e))?;

    let from = parse_datetime(&query.from)?;
    let until = parse_datetime(&query.until)?;
    let mut timeline =
        ParticipantTimeline::new(query.participant, from, until).map_err(|e| e.to_string())?;

    let records = query
        .intervals
        .into_iter()
        .map(|input| {
            Ok(RawInterval {
                start: parse_datetime(&input.start)?,
                end: parse_datetime(&input.end)?,
                status: input.status,
                origin: input.origin,
            })
        })
        .collect::<Result<Vec<_>, String>>()?;

    let report = timeline.ingest(records);
    timeline.normalize();
    Ok((timeline, report.rejected.len()))
}

fn to_json<T: Serialize>(value: &T) -> Result<String, String> {
    serde_json::to_string(value).map_err(|e| format!("Serialization error: {}", e))
}

fn normalize_json(query_json: &str) -> Result<String, String> {
    let (timeline, skipped) = load_timeline(query_json)?;
    to_json(&TimelineDto {
        participant: timeline.participant().to_string(),
        from: timeline.window().from().to_rfc3339(),
        until: timeline.window().until().to_rfc3339(),
        intervals: timeline.intervals().iter().map(IntervalDto::from).collect(),
        skipped,
    })
}

fn status_at_str(query_json: &str, instant: &str) -> Result<String, String> {
    let t = parse_datetime(instant)?;
    let (timeline, _) = load_timeline(query_json)?;
    Ok(timeline
        .status_at(t)
        .unwrap_or(BusyStatus::Free)
        .to_string())
}

fn free_slots_json(query_json: &str) -> Result<String, String> {
    let (timeline, _) = load_timeline(query_json)?;
    let dtos: Vec<FreeSlotDto> = timeline
        .free_slots()
        .iter()
        .map(|s| FreeSlotDto {
            start: s.start.to_rfc3339(),
            end: s.end.to_rfc3339(),
            duration_minutes: s.duration_minutes,
        })
        .collect();
    to_json(&dtos)
}

// ---------------------------------------------------------------------------
// WASM exports
// ---------------------------------------------------------------------------

/// Normalize a participant's raw free/busy intervals.
///
/// `query_json` is `{participant, from, until, intervals: [{start, end, status, origin?}]}`.
/// Returns a JSON string `{participant, from, until, intervals, skipped}` where
/// `intervals` is the canonical, non-overlapping timeline.
#[wasm_bindgen(js_name = "normalizeTimeline")]
pub fn normalize_timeline(query_json: &str) -> Result<String, JsValue> {
    normalize_json(query_json).map_err(|e| JsValue::from_str(&e))
}

/// Busy status at a single instant (`"FREE"` when nothing covers it).
#[wasm_bindgen(js_name = "statusAt")]
pub fn status_at(query_json: &str, instant: &str) -> Result<String, JsValue> {
    status_at_str(query_json, instant).map_err(|e| JsValue::from_str(&e))
}

/// Free slots within the query window, as a JSON array of
/// `{start, end, duration_minutes}` objects.
#[wasm_bindgen(js_name = "freeSlots")]
pub fn free_slots(query_json: &str) -> Result<String, JsValue> {
    free_slots_json(query_json).map_err(|e| JsValue::from_str(&e))
}

#[cfg(test)]
mod tests {
    use super::*;

    const QUERY: &str = r#"{
        "participant": "dana",
        "from": "2026-03-16T08:00:00Z",
        "until": "2026-03-16T18:00:00",
        "intervals": [
            {"start": "2026-03-16T09:00:00Z", "end": "2026-03-16T10:00:00Z", "status": "BUSY", "origin": "a"},
            {"start": "2026-03-16T09:00:00Z", "end": "2026-03-16T10:00:00Z", "status": "TENTATIVE"},
            {"start": "2026-03-16T12:00:00Z", "end": "2026-03-16T11:00:00Z", "status": "BUSY"}
        ]
    }"#;

    #[test]
    fn normalize_reports_skipped_records() {
        let value: serde_json::Value = serde_json::from_str(&normalize_json(QUERY).unwrap()).unwrap();
        assert_eq!(value["skipped"], 1);
        let intervals = value["intervals"].as_array().unwrap();
        assert_eq!(intervals.len(), 1);
        assert_eq!(intervals[0]["status"], "BUSY");
        assert_eq!(intervals[0]["origin"], "a");
    }

    #[test]
    fn missing_origin_is_omitted() {
        let q = r#"{
            "participant": "dana",
            "from": "2026-03-16T08:00:00Z",
            "until": "2026-03-16T18:00:00Z",
            "intervals": [
                {"start": "2026-03-16T09:00:00Z", "end": "2026-03-16T10:00:00Z", "status": "TENTATIVE"}
            ]
        }"#;
        let value: serde_json::Value = serde_json::from_str(&normalize_json(q).unwrap()).unwrap();
        let interval = &value["intervals"][0];
        assert_eq!(interval["status"], "TENTATIVE");
        assert!(interval.get("origin").is_none(), "got: {}", interval);
    }

    #[test]
    fn status_lookup_defaults_to_free() {
        assert_eq!(status_at_str(QUERY, "2026-03-16T09:30:00Z").unwrap(), "BUSY");
        assert_eq!(status_at_str(QUERY, "2026-03-16T10:00:00").unwrap(), "FREE");
    }

    #[test]
    fn free_slots_surround_busy_block() {
        let value: serde_json::Value = serde_json::from_str(&free_slots_json(QUERY).unwrap()).unwrap();
        let slots = value.as_array().unwrap();
        assert_eq!(slots.len(), 2);
        assert_eq!(slots[0]["duration_minutes"], 60);
        assert_eq!(slots[1]["duration_minutes"], 480);
    }

    #[test]
    fn inverted_window_is_an_error() {
        let q = r#"{"participant":"x","from":"2026-03-16T18:00:00Z","until":"2026-03-16T08:00:00Z"}"#;
        let err = normalize_json(q).unwrap_err();
        assert!(err.starts_with("Invalid window"), "got: {}", err);
    }

    #[test]
    fn bad_datetime_is_an_error() {
        let q = r#"{"participant":"x","from":"yesterday","until":"2026-03-16T08:00:00Z"}"#;
        assert!(normalize_json(q).unwrap_err().contains("Invalid datetime"));
    }
}
