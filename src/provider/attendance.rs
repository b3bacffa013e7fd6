use crate::attendance::{AttendanceDay, AttendanceEvent, AttendanceIssue, Status};
use crate::utils::time::parse_date_prefix;
use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaffInfo {
    pub staff_id: i64,
    pub staff_name: String,
    pub status: String,
}

/// Strictly typed view of an attendance response.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttendanceFeed {
    pub staff: Option<StaffInfo>,
    pub days: Vec<AttendanceDay>,
    pub diagnostics: Vec<AttendanceIssue>,
}

#[derive(Debug, Deserialize)]
struct RawAttendanceResponse {
    #[serde(default)]
    staff: Option<Value>,
    #[serde(default)]
    attendance: Vec<Value>,
}

#[derive(Debug, Deserialize)]
struct RawAttendanceEntry {
    #[serde(default)]
    time: Option<Value>,
    #[serde(default)]
    created_at: Option<Value>,
}

/// Maps a single-day or range attendance response into per-day event lists.
///
/// The `time` object keeps its document order. Entries that share a date are
/// merged in the order they appear. A malformed entry is skipped with a
/// warning; only a body that is not an attendance object at all fails.
pub fn parse_attendance_response(body: &str) -> Result<AttendanceFeed> {
    let raw: RawAttendanceResponse =
        serde_json::from_str(body).context("Failed to parse attendance response")?;

    let staff = match raw.staff {
        None | Some(Value::Null) => None,
        Some(value) => serde_json::from_value::<StaffInfo>(value)
            .map_err(|e| tracing::warn!("Ignoring unreadable staff details: {}", e))
            .ok(),
    };

    let mut feed = AttendanceFeed {
        staff,
        ..Default::default()
    };

    for value in raw.attendance {
        let (date, time_map) = match entry_parts(value) {
            Ok(parts) => parts,
            Err(e) => {
                tracing::warn!("Skipping attendance entry: {}", e);
                continue;
            }
        };

        let mut events = Vec::with_capacity(time_map.len());
        for (time, value) in time_map {
            match value.as_str().map(str::parse::<Status>) {
                Some(Ok(status)) => events.push(AttendanceEvent::new(time, status)),
                _ => {
                    let raw = value.as_str().map_or_else(|| value.to_string(), str::to_string);
                    tracing::warn!("Unknown attendance status {:?} at {}", raw, time);
                    feed.diagnostics.push(AttendanceIssue::UnknownStatus { time, raw });
                }
            }
        }

        match feed.days.iter_mut().find(|day| day.date == date) {
            Some(day) => day.events.extend(events),
            None => feed.days.push(AttendanceDay { date, events }),
        }
    }

    feed.days.sort_by_key(|day| day.date);
    tracing::debug!("Parsed attendance for {} day(s)", feed.days.len());

    Ok(feed)
}

fn entry_parts(value: Value) -> Result<(NaiveDate, Map<String, Value>)> {
    let entry: RawAttendanceEntry = serde_json::from_value(value)?;

    let created_at = entry
        .created_at
        .as_ref()
        .and_then(Value::as_str)
        .ok_or_else(|| anyhow::anyhow!("missing created_at"))?;
    let date = parse_date_prefix(created_at)?;

    let time_map = match entry.time {
        None | Some(Value::Null) => Map::new(),
        Some(Value::Object(map)) => map,
        Some(other) => return Err(anyhow::anyhow!("time is not an object: {}", other)),
    };

    Ok((date, time_map))
}
