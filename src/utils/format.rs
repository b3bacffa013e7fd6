use crate::attendance::{AttendanceIssue, DailyAttendanceSummary, DayState, RangeSummary, WorkSession, duration};
use crate::sales::{AppointmentSummary, CommissionTotals, CommissionWindow};
use crate::utils::time::{format_duration_minutes, format_time};
use bigdecimal::BigDecimal;
use chrono::NaiveDate;
use std::collections::BTreeMap;

pub fn format_session_duration(session: &WorkSession) -> String {
    match duration(session) {
        Ok(Some(minutes)) => format_duration_minutes(minutes),
        Ok(None) => "Still Working".to_string(),
        Err(_) => "Invalid time range".to_string(),
    }
}

pub fn format_day_state(state: DayState) -> &'static str {
    match state {
        DayState::NoRecord => "No record",
        DayState::OpenSession => "Checked in",
        DayState::ClosedSession => "Checked out",
        DayState::Complete => "Complete",
    }
}

pub fn format_daily_report(
    date: NaiveDate,
    sessions: &[WorkSession],
    summary: &DailyAttendanceSummary,
    state: DayState,
) -> String {
    if sessions.is_empty() {
        return format!("{}: no attendance records", date.format("%Y-%m-%d (%a)"));
    }

    let mut report = format!(
        "{} [{}]\n",
        date.format("%Y-%m-%d (%a)"),
        format_day_state(state)
    );

    for (i, session) in sessions.iter().enumerate() {
        let check_out = session
            .check_out
            .map(format_time)
            .unwrap_or_else(|| "--:--".to_string());
        report.push_str(&format!(
            "  #{} in {} -> out {} ({})\n",
            i + 1,
            format_time(session.check_in),
            check_out,
            format_session_duration(session)
        ));
    }

    report.push_str(&format!(
        "  Total: {}",
        format_duration_minutes(summary.total_duration_minutes)
    ));
    if !summary.is_complete {
        report.push_str(" (in progress)");
    }
    if summary.invalid_sessions > 0 {
        report.push_str(&format!(", {} invalid session(s)", summary.invalid_sessions));
    }

    report
}

pub fn format_range_summary(label: &str, summary: &RangeSummary) -> String {
    format!(
        "{}: {} over {} day(s){}",
        label,
        format_duration_minutes(summary.total_minutes),
        summary.days_worked,
        if summary.open_days > 0 {
            format!(", {} still open", summary.open_days)
        } else {
            String::new()
        }
    )
}

pub fn format_commission_summary(window: CommissionWindow, totals: &CommissionTotals) -> String {
    format!(
        "{}: business ₹{} / commission ₹{}",
        window.label(),
        totals.total_business.with_scale(2),
        totals.total_commission.with_scale(2)
    )
}

pub fn format_monthly_commission(months: &BTreeMap<(i32, u32), BigDecimal>) -> String {
    if months.is_empty() {
        return "No sales data available".to_string();
    }

    months
        .iter()
        .map(|((year, month), amount)| format!("{:04}-{:02}: ₹{}", year, month, amount.with_scale(2)))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn format_appointment_summary(date: NaiveDate, summary: &AppointmentSummary) -> String {
    format!(
        "Appointments {}: {} booked, {} cancelled, total ₹{}",
        date.format("%Y-%m-%d"),
        summary.count - summary.cancelled,
        summary.cancelled,
        summary.booked_total.with_scale(2)
    )
}

pub fn format_issue(issue: &AttendanceIssue) -> String {
    format!("warning: {}", issue)
}
