use bigdecimal::BigDecimal;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommissionRecord {
    pub order_id: Option<String>,
    pub date: NaiveDateTime,
    /// Commission earned by the staff member.
    pub amount: BigDecimal,
    /// Gross cart total of the order.
    pub total: BigDecimal,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CommissionTotals {
    pub total_business: BigDecimal,
    pub total_commission: BigDecimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppointmentStatus {
    Pending,
    Confirmed,
    Completed,
    Cancelled,
    Other(String),
}

impl From<&str> for AppointmentStatus {
    fn from(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "pending" => AppointmentStatus::Pending,
            "confirmed" => AppointmentStatus::Confirmed,
            "completed" => AppointmentStatus::Completed,
            "cancelled" | "canceled" => AppointmentStatus::Cancelled,
            other => AppointmentStatus::Other(other.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppointmentItem {
    pub service_name: String,
    pub duration: String,
    pub price: Option<BigDecimal>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Appointment {
    pub appointment_id: i64,
    pub order_id: String,
    pub date: NaiveDate,
    pub time: Option<NaiveTime>,
    pub status: AppointmentStatus,
    pub grand_total: BigDecimal,
    pub customer_name: String,
    pub items: Vec<AppointmentItem>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppointmentSummary {
    pub count: usize,
    pub cancelled: usize,
    /// Grand total of appointments that were not cancelled.
    pub booked_total: BigDecimal,
}
