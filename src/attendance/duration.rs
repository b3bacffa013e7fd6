use super::error::AttendanceIssue;
use super::models::WorkSession;

/// Whole minutes worked in `session`.
///
/// `Ok(None)` means the session is still open. Both ends are wall-clock times
/// of the same calendar day; seconds are truncated.
pub fn duration(session: &WorkSession) -> Result<Option<i64>, AttendanceIssue> {
    let Some(check_out) = session.check_out else {
        return Ok(None);
    };

    if check_out < session.check_in {
        return Err(AttendanceIssue::NegativeDurationDetected {
            check_in: session.check_in,
            check_out,
        });
    }

    Ok(Some(
        check_out.signed_duration_since(session.check_in).num_minutes(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;
    use pretty_assertions::assert_eq;

    fn t(h: u32, m: u32, s: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, s).unwrap()
    }

    fn closed(check_in: NaiveTime, check_out: NaiveTime) -> WorkSession {
        WorkSession {
            check_in,
            check_out: Some(check_out),
            duration_minutes: None,
        }
    }

    #[test]
    fn open_session_is_in_progress() {
        assert_eq!(duration(&WorkSession::open(t(9, 0, 0))), Ok(None));
    }

    #[test]
    fn counts_whole_minutes() {
        assert_eq!(duration(&closed(t(9, 0, 0), t(13, 0, 0))), Ok(Some(240)));
        assert_eq!(duration(&closed(t(9, 0, 10), t(9, 2, 5))), Ok(Some(1)));
        assert_eq!(duration(&closed(t(9, 0, 0), t(9, 0, 0))), Ok(Some(0)));
    }

    #[test]
    fn reversed_times_are_an_error_not_a_clamp() {
        assert_eq!(
            duration(&closed(t(13, 0, 0), t(9, 0, 0))),
            Err(AttendanceIssue::NegativeDurationDetected {
                check_in: t(13, 0, 0),
                check_out: t(9, 0, 0),
            })
        );
    }
}
