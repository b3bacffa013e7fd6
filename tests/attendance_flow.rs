use bigdecimal::BigDecimal;
use chrono::{NaiveDate, NaiveDateTime};
use pretty_assertions::assert_eq;
use staff_attendance::attendance::{self, AttendanceIssue, DayState};
use staff_attendance::provider;
use staff_attendance::sales::{self, CommissionWindow};
use std::collections::BTreeMap;
use std::str::FromStr;

fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .unwrap()
        .and_hms_opt(h, min, 0)
        .unwrap()
}

#[test]
fn attendance_response_to_weekly_totals() {
    let body = r#"{
        "staff": { "staff_id": 3, "staff_name": "Ana", "status": "active" },
        "attendance": [
            { "time": { "09:00": "in", "13:00": "out", "14:00": "in", "18:30": "out" }, "created_at": "2024-05-06T03:30:00Z" },
            { "time": { "08:00": "out", "09:15": "in" }, "created_at": "2024-05-07T03:45:00Z" }
        ]
    }"#;
    let feed = provider::parse_attendance_response(body).unwrap();
    let today = NaiveDate::from_ymd_opt(2024, 5, 7).unwrap();

    let mut by_day = BTreeMap::new();
    let mut issues = Vec::new();
    for day in &feed.days {
        let result = attendance::reconstruct(&day.events);
        issues.extend(result.diagnostics);
        by_day.insert(day.date, result.sessions);
    }

    let monday = &by_day[&NaiveDate::from_ymd_opt(2024, 5, 6).unwrap()];
    let monday_summary = attendance::aggregate(monday);
    assert_eq!(monday_summary.total_duration_minutes, 510);
    assert!(monday_summary.is_complete);
    assert_eq!(DayState::from_sessions(monday, true), DayState::Complete);

    let tuesday = &by_day[&today];
    assert_eq!(DayState::from_sessions(tuesday, false), DayState::OpenSession);
    assert!(!attendance::aggregate(tuesday).is_complete);

    assert_eq!(issues.len(), 1);
    assert!(matches!(issues[0], AttendanceIssue::OrphanedOutEvent { .. }));

    let week = attendance::summarize_range(&by_day, NaiveDate::from_ymd_opt(2024, 5, 5).unwrap(), today);
    assert_eq!(week.total_minutes, 510);
    assert_eq!(week.days_worked, 2);
    assert_eq!(week.open_days, 1);
}

#[test]
fn paged_orders_to_commission_windows() {
    let first_page = r#"{ "data": [
        { "order_id": "A", "appointment_date": "2024-05-06 10:00:00", "commission": "10", "cart_total": "100" },
        { "order_id": "B", "appointment_date": "2024-05-08 09:00:00", "commission": "20", "cart_total": "200" }
    ] }"#;
    let second_page = r#"{ "data": [
        { "order_id": "B", "appointment_date": "2024-05-08 09:00:00", "commission": "20", "cart_total": "200" },
        { "order_id": "C", "appointment_date": "2024-04-29 12:00:00", "commission": "5", "cart_total": "50" }
    ] }"#;

    let records = sales::merge_order_pages(vec![
        provider::parse_completed_orders(first_page).unwrap(),
        provider::parse_completed_orders(second_page).unwrap(),
    ]);
    let now = at(2024, 5, 8, 17, 0);

    let (start, end) = CommissionWindow::Week.bounds(now);
    let week = sales::aggregate_commission(&records, start, end);
    assert_eq!(week.total_commission, BigDecimal::from_str("30").unwrap());
    assert_eq!(week.total_business, BigDecimal::from_str("300").unwrap());

    let (start, end) = CommissionWindow::Today.bounds(now);
    let today = sales::aggregate_commission(&records, start, end);
    assert_eq!(today.total_commission, BigDecimal::from_str("20").unwrap());

    let (start, end) = CommissionWindow::AllTime.bounds(now);
    let all = sales::aggregate_commission(&records, start, end);
    assert_eq!(all.total_commission, BigDecimal::from_str("35").unwrap());
}
