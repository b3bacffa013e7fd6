use crate::utils::time::{start_of_day, start_of_week_sunday};
use chrono::NaiveDateTime;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommissionWindow {
    Today,
    Week,
    AllTime,
}

impl CommissionWindow {
    pub fn label(&self) -> &'static str {
        match self {
            CommissionWindow::Today => "Today",
            CommissionWindow::Week => "This week",
            CommissionWindow::AllTime => "All time",
        }
    }

    /// Inclusive `[start, end]` bounds. Today and Week end at `now`;
    /// AllTime is unbounded on both sides, so future-dated records count too.
    pub fn bounds(&self, now: NaiveDateTime) -> (NaiveDateTime, NaiveDateTime) {
        match self {
            CommissionWindow::Today => (start_of_day(now), now),
            CommissionWindow::Week => (start_of_week_sunday(now), now),
            CommissionWindow::AllTime => (NaiveDateTime::MIN, NaiveDateTime::MAX),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    #[test]
    fn windows_end_now() {
        // Thursday afternoon
        let now = NaiveDate::from_ymd_opt(2024, 5, 9)
            .unwrap()
            .and_hms_opt(15, 20, 0)
            .unwrap();

        let (today_start, today_end) = CommissionWindow::Today.bounds(now);
        assert_eq!(today_start, now.date().and_hms_opt(0, 0, 0).unwrap());
        assert_eq!(today_end, now);

        let (week_start, _) = CommissionWindow::Week.bounds(now);
        assert_eq!(
            week_start,
            NaiveDate::from_ymd_opt(2024, 5, 5)
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap()
        );

        let (all_start, all_end) = CommissionWindow::AllTime.bounds(now);
        assert_eq!(all_start, NaiveDateTime::MIN);
        assert_eq!(all_end, NaiveDateTime::MAX);
    }
}
