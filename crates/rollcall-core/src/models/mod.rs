//! Data models for the attendance service.
//!
//! - `Student`, `Branch`: the roster and its partition
//! - `Event`, `AttendanceRecord`, `AttendanceBatch`: events and presence marks
//! - `DepartmentWorkEntry`, `Department`: non-event work credit
//! - `StudentReport`, `StudentRecord`: per-student summaries
//!
//! These are domain types; the wire shapes live in `api::wire` and are
//! narrowed into these at the boundary.

pub mod department;
pub mod event;
pub mod report;
pub mod student;

pub use department::{Department, DepartmentWorkEntry, NewDepartmentWork};
pub use event::{AttendanceBatch, AttendanceRecord, Event, NewEvent};
pub use report::{SessionStudent, StudentRecord, StudentReport};
pub use student::{Branch, Student};
