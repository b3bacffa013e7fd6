use anyhow::Result;
use chrono::{Datelike, Days, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, Utc};

pub fn local_offset(offset_minutes: i32) -> Result<FixedOffset> {
    FixedOffset::east_opt(offset_minutes * 60)
        .ok_or_else(|| anyhow::anyhow!("UTC offset out of range: {} minutes", offset_minutes))
}

/// Current wall-clock time in the staff member's local offset.
pub fn now_local(offset: FixedOffset) -> NaiveDateTime {
    Utc::now().with_timezone(&offset).naive_local()
}

pub fn parse_time_string(time_str: &str) -> Result<NaiveTime> {
    let time_str = time_str.trim();

    if let Ok(time) = NaiveTime::parse_from_str(time_str, "%H:%M") {
        return Ok(time);
    }

    if let Ok(time) = NaiveTime::parse_from_str(time_str, "%H:%M:%S") {
        return Ok(time);
    }

    Err(anyhow::anyhow!("Invalid time format. Use HH:MM or HH:MM:SS"))
}

/// Parses the date part of a backend timestamp such as `2024-05-02T08:15:00.000000Z`.
pub fn parse_date_prefix(raw: &str) -> Result<NaiveDate> {
    let date_part = raw.trim().split(['T', ' ']).next().unwrap_or_default();
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d")
        .map_err(|e| anyhow::anyhow!("Invalid date '{}': {}", raw, e))
}

/// Accepts `YYYY-MM-DD`, `YYYY-MM-DD HH:MM[:SS]` and RFC 3339 timestamps.
/// RFC 3339 values keep their own wall-clock time; no zone conversion happens.
pub fn parse_local_datetime(raw: &str) -> Result<NaiveDateTime> {
    let raw = raw.trim();

    if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(raw) {
        return Ok(dt.naive_local());
    }

    for format in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M", "%Y-%m-%dT%H:%M:%S"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, format) {
            return Ok(dt);
        }
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map(|date| date.and_time(NaiveTime::MIN))
        .map_err(|_| anyhow::anyhow!("Invalid date/time '{}'", raw))
}

pub fn start_of_day(moment: NaiveDateTime) -> NaiveDateTime {
    moment.date().and_time(NaiveTime::MIN)
}

/// Sunday 00:00 of the week containing `moment`; on a Sunday this is the same day.
pub fn start_of_week_sunday(moment: NaiveDateTime) -> NaiveDateTime {
    let date = moment.date();
    let days_since_sunday = date.weekday().num_days_from_sunday() as u64;
    let sunday = date
        .checked_sub_days(Days::new(days_since_sunday))
        .unwrap_or(date);
    sunday.and_time(NaiveTime::MIN)
}

/// The backend's `date` query parameter format.
pub fn format_api_date(date: NaiveDate) -> String {
    date.format("%d-%m-%Y").to_string()
}

pub fn format_duration_minutes(minutes: i64) -> String {
    let hours = minutes / 60;
    let mins = minutes % 60;

    if hours > 0 {
        format!("{}h {}m", hours, mins)
    } else {
        format!("{}m", mins)
    }
}

pub fn format_time(time: NaiveTime) -> String {
    time.format("%H:%M").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, 0)
            .unwrap()
    }

    #[test]
    fn parses_minutes_and_seconds_forms() {
        assert_eq!(
            parse_time_string("09:30").unwrap(),
            NaiveTime::from_hms_opt(9, 30, 0).unwrap()
        );
        assert_eq!(
            parse_time_string(" 17:05:42 ").unwrap(),
            NaiveTime::from_hms_opt(17, 5, 42).unwrap()
        );
        assert!(parse_time_string("9h30").is_err());
        assert!(parse_time_string("25:00").is_err());
    }

    #[test]
    fn week_starts_on_most_recent_sunday() {
        // 2024-05-08 is a Wednesday
        assert_eq!(start_of_week_sunday(at(2024, 5, 8, 14, 0)), at(2024, 5, 5, 0, 0));
        // a Sunday maps to its own midnight
        assert_eq!(start_of_week_sunday(at(2024, 5, 5, 10, 0)), at(2024, 5, 5, 0, 0));
        // Saturday goes back six days
        assert_eq!(start_of_week_sunday(at(2024, 5, 11, 23, 59)), at(2024, 5, 5, 0, 0));
    }

    #[test]
    fn parses_backend_dates() {
        assert_eq!(
            parse_date_prefix("2024-05-02T08:15:00.000000Z").unwrap(),
            NaiveDate::from_ymd_opt(2024, 5, 2).unwrap()
        );
        assert_eq!(parse_local_datetime("2024-05-02").unwrap(), at(2024, 5, 2, 0, 0));
        assert_eq!(
            parse_local_datetime("2024-05-02 13:45").unwrap(),
            at(2024, 5, 2, 13, 45)
        );
        assert_eq!(
            parse_local_datetime("2024-05-02T13:45:00+05:30").unwrap(),
            at(2024, 5, 2, 13, 45)
        );
        assert!(parse_local_datetime("02/05/2024").is_err());
    }

    #[test]
    fn formats_for_api_and_display() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 7).unwrap();
        assert_eq!(format_api_date(date), "07-01-2024");
        assert_eq!(format_duration_minutes(240), "4h 0m");
        assert_eq!(format_duration_minutes(45), "45m");
        assert_eq!(format_duration_minutes(135), "2h 15m");
    }

    #[test]
    fn rejects_impossible_offsets() {
        assert!(local_offset(330).is_ok());
        assert!(local_offset(24 * 60).is_err());
    }
}
