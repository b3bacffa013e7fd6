pub mod aggregate;
pub mod models;
pub mod window;

pub use aggregate::{aggregate_commission, merge_order_pages, monthly_commission, summarize_appointments};
pub use models::{
    Appointment, AppointmentItem, AppointmentStatus, AppointmentSummary, CommissionRecord,
    CommissionTotals,
};
pub use window::CommissionWindow;
