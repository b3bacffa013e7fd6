//! Boundary between backend JSON and the strictly typed core.

pub mod attendance;
pub mod orders;
pub mod status;

pub use attendance::{AttendanceFeed, StaffInfo, parse_attendance_response};
pub use orders::{parse_appointments, parse_completed_orders};
pub use status::{LocationThrottle, StatusOutcome, StatusUpdateRequest, interpret_status_response};
