use super::models::{Appointment, AppointmentStatus, AppointmentSummary, CommissionRecord, CommissionTotals};
use bigdecimal::BigDecimal;
use chrono::{Datelike, NaiveDate, NaiveDateTime};
use std::collections::{BTreeMap, HashSet};

/// Sums records dated within `[window_start, window_end]`, inclusive on both ends.
pub fn aggregate_commission(
    records: &[CommissionRecord],
    window_start: NaiveDateTime,
    window_end: NaiveDateTime,
) -> CommissionTotals {
    records
        .iter()
        .filter(|r| window_start <= r.date && r.date <= window_end)
        .fold(CommissionTotals::default(), |mut totals, r| {
            totals.total_business += &r.total;
            totals.total_commission += &r.amount;
            totals
        })
}

/// Commission per calendar month, keyed by `(year, month)`.
pub fn monthly_commission(records: &[CommissionRecord]) -> BTreeMap<(i32, u32), BigDecimal> {
    let mut months: BTreeMap<(i32, u32), BigDecimal> = BTreeMap::new();
    for record in records {
        *months
            .entry((record.date.year(), record.date.month()))
            .or_default() += &record.amount;
    }
    months
}

/// Flattens fetched pages into one list. A record whose order id already
/// appeared earlier in the merged list, on the same page or a previous one,
/// is dropped; records without an order id are always kept.
pub fn merge_order_pages(pages: Vec<Vec<CommissionRecord>>) -> Vec<CommissionRecord> {
    let mut seen = HashSet::new();
    let mut merged = Vec::new();

    for record in pages.into_iter().flatten() {
        if let Some(order_id) = &record.order_id {
            if !seen.insert(order_id.clone()) {
                tracing::debug!("Skipping repeated order {}", order_id);
                continue;
            }
        }
        merged.push(record);
    }

    merged
}

pub fn summarize_appointments(appointments: &[Appointment], date: NaiveDate) -> AppointmentSummary {
    let mut summary = AppointmentSummary::default();

    for appointment in appointments.iter().filter(|a| a.date == date) {
        summary.count += 1;
        if appointment.status == AppointmentStatus::Cancelled {
            summary.cancelled += 1;
        } else {
            summary.booked_total += &appointment.grand_total;
        }
    }

    summary
}
