pub mod aggregate;
pub mod view;

pub use aggregate::{AttendanceDto, AttendanceForm, AttendanceRecord, AttendanceStatus};
pub use view::{build_attendance_view, AttendanceRow, AttendanceSummary, AttendanceView};
