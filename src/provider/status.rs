use crate::attendance::Status;
use crate::utils::validation::{validate_coordinates, validate_staff_id};
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;

/// Body of the attendance status PUT sent on check-in, check-out and the
/// periodic location refresh.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusUpdateRequest {
    pub staff_id: i64,
    pub lat: f64,
    pub long: f64,
}

impl StatusUpdateRequest {
    pub fn new(staff_id: i64, lat: f64, long: f64) -> Result<Self> {
        validate_staff_id(staff_id)?;
        validate_coordinates(lat, long)?;
        Ok(Self { staff_id, lat, long })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusOutcome {
    /// The latest entry is a check-in at this time.
    CheckedIn { time: String },
    /// The backend answered with an "out" entry: the staff member is not at
    /// the workplace location.
    OutsideOffice { time: String },
    /// The backend answered with a bare time string.
    Recorded { time: String },
}

#[derive(Debug, Deserialize)]
struct RawStatusResponse {
    time: Value,
    #[serde(default)]
    message: Option<String>,
}

pub fn interpret_status_response(body: &str) -> Result<StatusOutcome> {
    let raw: RawStatusResponse =
        serde_json::from_str(body).context("Failed to parse attendance status response")?;

    if let Some(message) = &raw.message {
        tracing::info!("Attendance status: {}", message);
    }

    match raw.time {
        Value::Object(entries) => {
            let (time, value) = entries
                .into_iter()
                .last()
                .ok_or_else(|| anyhow::anyhow!("Attendance status response has no entries"))?;
            let status: Status = value
                .as_str()
                .ok_or_else(|| anyhow::anyhow!("Status at {} is not a string", time))?
                .parse()?;
            Ok(match status {
                Status::In => StatusOutcome::CheckedIn { time },
                Status::Out => StatusOutcome::OutsideOffice { time },
            })
        }
        Value::String(time) => Ok(StatusOutcome::Recorded { time }),
        other => Err(anyhow::anyhow!("Unexpected time value in status response: {}", other)),
    }
}

/// Decides when the next location refresh is due while a session is open.
#[derive(Debug, Clone)]
pub struct LocationThrottle {
    interval: Duration,
    last_push: Option<DateTime<Utc>>,
}

impl LocationThrottle {
    pub fn new(interval_secs: u64) -> Self {
        Self {
            interval: Duration::from_secs(interval_secs),
            last_push: None,
        }
    }

    pub fn is_due(&self, now: DateTime<Utc>) -> bool {
        match self.last_push {
            None => true,
            Some(last) => now
                .signed_duration_since(last)
                .to_std()
                .is_ok_and(|elapsed| elapsed >= self.interval),
        }
    }

    pub fn mark_pushed(&mut self, now: DateTime<Utc>) {
        self.last_push = Some(now);
    }

    pub fn reset(&mut self) {
        self.last_push = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeDelta;
    use pretty_assertions::assert_eq;

    #[test]
    fn request_serializes_backend_field_names() {
        let request = StatusUpdateRequest::new(7, 12.97, 77.59).unwrap();
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json, serde_json::json!({ "staff_id": 7, "lat": 12.97, "long": 77.59 }));
    }

    #[test]
    fn request_rejects_bad_input() {
        assert!(StatusUpdateRequest::new(0, 12.0, 77.0).is_err());
        assert!(StatusUpdateRequest::new(7, 120.0, 77.0).is_err());
    }

    #[test]
    fn last_map_entry_decides_outcome() {
        let checked_in = r#"{ "message": "Checked in", "time": { "09:00": "in", "12:00": "out", "13:10": "in" } }"#;
        assert_eq!(
            interpret_status_response(checked_in).unwrap(),
            StatusOutcome::CheckedIn {
                time: "13:10".to_string()
            }
        );

        let outside = r#"{ "time": { "09:00": "in", "09:05": "out" } }"#;
        assert_eq!(
            interpret_status_response(outside).unwrap(),
            StatusOutcome::OutsideOffice {
                time: "09:05".to_string()
            }
        );
    }

    #[test]
    fn bare_time_string_is_recorded() {
        assert_eq!(
            interpret_status_response(r#"{ "time": "17:45" }"#).unwrap(),
            StatusOutcome::Recorded {
                time: "17:45".to_string()
            }
        );
    }

    #[test]
    fn empty_or_odd_responses_fail() {
        assert!(interpret_status_response(r#"{ "time": {} }"#).is_err());
        assert!(interpret_status_response(r#"{ "time": 5 }"#).is_err());
        assert!(interpret_status_response(r#"{ "time": { "09:00": "lunch" } }"#).is_err());
    }

    #[test]
    fn throttle_waits_for_interval() {
        let start = Utc::now();
        let mut throttle = LocationThrottle::new(600);

        assert!(throttle.is_due(start));
        throttle.mark_pushed(start);
        assert!(!throttle.is_due(start + TimeDelta::seconds(599)));
        assert!(throttle.is_due(start + TimeDelta::seconds(600)));

        throttle.reset();
        assert!(throttle.is_due(start));
    }
}
