use super::duration::duration;
use super::error::AttendanceIssue;
use super::models::{AttendanceEvent, Status, WorkSession};
use crate::utils::time::parse_time_string;
use chrono::NaiveTime;

/// Sessions rebuilt from one day's events, with whatever was discarded on the way.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Reconstruction {
    pub sessions: Vec<WorkSession>,
    pub diagnostics: Vec<AttendanceIssue>,
}

impl Reconstruction {
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }
}

/// Pairs each check-in with the next check-out.
///
/// Events are stable-sorted by time first, so chronological input keeps its
/// order and equal times keep insertion order. A second check-in while one is
/// open replaces it; a check-out with nothing open is dropped. A check-in left
/// open at the end becomes the day's last, open session.
pub fn reconstruct(events: &[AttendanceEvent]) -> Reconstruction {
    let mut diagnostics = Vec::new();
    let mut timeline: Vec<(NaiveTime, Status)> = Vec::with_capacity(events.len());

    for event in events {
        match parse_time_string(&event.time) {
            Ok(time) => timeline.push((time, event.status)),
            Err(_) => {
                tracing::warn!("Discarding attendance event with malformed time: {:?}", event.time);
                diagnostics.push(AttendanceIssue::MalformedTimeFormat {
                    raw: event.time.clone(),
                });
            }
        }
    }

    timeline.sort_by_key(|(time, _)| *time);

    let mut sessions = Vec::new();
    let mut current_in: Option<NaiveTime> = None;

    for (time, status) in timeline {
        match status {
            Status::In => {
                if let Some(previous) = current_in.replace(time) {
                    tracing::warn!("Check-in at {} superseded by check-in at {}", previous, time);
                    diagnostics.push(AttendanceIssue::SupersededCheckIn { time: previous });
                }
            }
            Status::Out => {
                if let Some(check_in) = current_in.take() {
                    let mut session = WorkSession {
                        check_in,
                        check_out: Some(time),
                        duration_minutes: None,
                    };
                    // sorted input keeps check_out >= check_in
                    session.duration_minutes = duration(&session).ok().flatten();
                    sessions.push(session);
                } else {
                    tracing::warn!("Check-out at {} without a check-in", time);
                    diagnostics.push(AttendanceIssue::OrphanedOutEvent { time });
                }
            }
        }
    }

    if let Some(check_in) = current_in {
        sessions.push(WorkSession::open(check_in));
    }

    Reconstruction {
        sessions,
        diagnostics,
    }
}
