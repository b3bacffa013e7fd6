use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    In,
    Out,
}

impl Status {
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::In => "in",
            Status::Out => "out",
        }
    }
}

impl FromStr for Status {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "in" => Ok(Status::In),
            "out" => Ok(Status::Out),
            other => Err(anyhow::anyhow!("Invalid attendance status: {}", other)),
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One raw entry of a day's `time -> status` map. The time is kept as
/// received and parsed during reconstruction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceEvent {
    pub time: String,
    pub status: Status,
}

impl AttendanceEvent {
    pub fn new(time: impl Into<String>, status: Status) -> Self {
        Self {
            time: time.into(),
            status,
        }
    }
}

/// All events recorded for one calendar day, in the order the provider sent them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceDay {
    pub date: NaiveDate,
    pub events: Vec<AttendanceEvent>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkSession {
    pub check_in: NaiveTime,
    pub check_out: Option<NaiveTime>,
    pub duration_minutes: Option<i64>,
}

impl WorkSession {
    pub fn open(check_in: NaiveTime) -> Self {
        Self {
            check_in,
            check_out: None,
            duration_minutes: None,
        }
    }

    pub fn is_open(&self) -> bool {
        self.check_out.is_none()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyAttendanceSummary {
    pub total_duration_minutes: i64,
    pub session_count: usize,
    pub is_complete: bool,
    /// Closed sessions whose duration could not be computed.
    pub invalid_sessions: usize,
}

/// Where a staff member's day stands after its events so far.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DayState {
    NoRecord,
    OpenSession,
    ClosedSession,
    Complete,
}

/// Calendar marker for one day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayMark {
    pub has_check_in: bool,
    pub last_status: Option<Status>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RangeSummary {
    pub total_minutes: i64,
    pub days_worked: usize,
    pub open_days: usize,
}
