pub mod duration;
pub mod error;
pub mod models;
pub mod reconstruct;
pub mod summary;

pub use duration::duration;
pub use error::AttendanceIssue;
pub use models::{
    AttendanceDay, AttendanceEvent, DailyAttendanceSummary, DayMark, DayState, RangeSummary,
    Status, WorkSession,
};
pub use reconstruct::{Reconstruction, reconstruct};
pub use summary::{aggregate, mark_days, summarize_range, today_session};
