use super::duration::duration;
use super::models::{
    AttendanceDay, DailyAttendanceSummary, DayMark, DayState, RangeSummary, Status, WorkSession,
};
use crate::utils::time::parse_time_string;
use chrono::NaiveDate;
use std::collections::BTreeMap;

pub fn aggregate(sessions: &[WorkSession]) -> DailyAttendanceSummary {
    let mut summary = DailyAttendanceSummary {
        session_count: sessions.len(),
        is_complete: true,
        ..Default::default()
    };

    for session in sessions {
        match duration(session) {
            Ok(Some(minutes)) => summary.total_duration_minutes += minutes,
            Ok(None) => summary.is_complete = false,
            Err(issue) => {
                tracing::warn!("Excluding session from daily total: {}", issue);
                summary.invalid_sessions += 1;
            }
        }
    }

    summary
}

/// The session the check-in screen shows: the day's latest one.
pub fn today_session(sessions: &[WorkSession]) -> Option<&WorkSession> {
    sessions.last()
}

impl DayState {
    /// `day_over` picks `Complete` over `ClosedSession` when a check-out
    /// closes the last session of a day that has already ended.
    pub fn advance(self, status: Status, day_over: bool) -> DayState {
        match (self, status) {
            (_, Status::In) => DayState::OpenSession,
            (DayState::OpenSession, Status::Out) if day_over => DayState::Complete,
            (DayState::OpenSession, Status::Out) => DayState::ClosedSession,
            (state, Status::Out) => state,
        }
    }

    pub fn from_sessions(sessions: &[WorkSession], day_over: bool) -> DayState {
        match sessions.last() {
            None => DayState::NoRecord,
            Some(last) if last.is_open() => DayState::OpenSession,
            Some(_) if day_over => DayState::Complete,
            Some(_) => DayState::ClosedSession,
        }
    }
}

/// Totals over the days in `[start, end]`, both ends inclusive.
pub fn summarize_range(
    days: &BTreeMap<NaiveDate, Vec<WorkSession>>,
    start: NaiveDate,
    end: NaiveDate,
) -> RangeSummary {
    let mut summary = RangeSummary::default();
    if start > end {
        return summary;
    }

    for sessions in days.range(start..=end).map(|(_, sessions)| sessions) {
        if sessions.is_empty() {
            continue;
        }
        let daily = aggregate(sessions);
        summary.total_minutes += daily.total_duration_minutes;
        summary.days_worked += 1;
        if !daily.is_complete {
            summary.open_days += 1;
        }
    }

    summary
}

/// Calendar markers: a day counts as present when any check-in was recorded.
/// The last status is the latest by time, ties going to the later event, so it
/// agrees with the sessions `reconstruct` builds.
pub fn mark_days(days: &[AttendanceDay]) -> BTreeMap<NaiveDate, DayMark> {
    days.iter()
        .map(|day| {
            let last_status = day
                .events
                .iter()
                .filter_map(|e| parse_time_string(&e.time).ok().map(|time| (time, e.status)))
                .max_by_key(|(time, _)| *time)
                .map(|(_, status)| status);
            let mark = DayMark {
                has_check_in: day.events.iter().any(|e| e.status == Status::In),
                last_status,
            };
            (day.date, mark)
        })
        .collect()
}
