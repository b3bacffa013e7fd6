use chrono::NaiveTime;
use thiserror::Error;

/// Recoverable data problems found while rebuilding a day's sessions.
///
/// None of these abort processing; they travel next to the best-effort
/// result so the caller can surface them.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AttendanceIssue {
    #[error("malformed time '{raw}', event discarded")]
    MalformedTimeFormat { raw: String },

    #[error("unknown status '{raw}' at {time}, event discarded")]
    UnknownStatus { time: String, raw: String },

    #[error("check-out at {time} has no open check-in, event discarded")]
    OrphanedOutEvent { time: NaiveTime },

    #[error("check-in at {time} superseded by a later check-in")]
    SupersededCheckIn { time: NaiveTime },

    #[error("check-out {check_out} is earlier than check-in {check_in}")]
    NegativeDurationDetected {
        check_in: NaiveTime,
        check_out: NaiveTime,
    },
}
