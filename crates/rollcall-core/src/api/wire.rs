//! Response and request shapes exactly as the server sends them.
//!
//! Every endpoint response is parsed into one of these loosely-typed structs
//! first and then narrowed into a domain model. Records that cannot be
//! narrowed (unknown department label, missing id) are dropped with a warning
//! instead of failing the whole response. Students with an unknown branch are
//! kept under `Branch::Other`.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::models::{
    Branch, Department, DepartmentWorkEntry, Event, SessionStudent, Student, StudentRecord,
    StudentReport,
};

#[derive(Debug, Clone, Deserialize)]
pub struct StudentWire {
    #[serde(rename = "_id", default)]
    pub id: String,
    #[serde(rename = "studentId", default)]
    pub student_id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub branch: String,
}

impl StudentWire {
    pub fn into_student(self) -> Option<Student> {
        if self.id.is_empty() {
            warn!(name = %self.name, "Dropping student without id");
            return None;
        }
        let branch = Branch::from_label(&self.branch).unwrap_or_else(|| {
            warn!(id = %self.id, branch = %self.branch, "Unknown branch, listing student under Other");
            Branch::Other
        });
        Some(Student {
            id: self.id,
            student_id: self.student_id,
            name: self.name,
            branch,
        })
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct EventWire {
    #[serde(rename = "_id", default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub date: String,
    #[serde(rename = "workingHours", default)]
    pub working_hours: Option<f64>,
}

impl EventWire {
    pub fn into_event(self) -> Option<Event> {
        if self.id.is_empty() {
            warn!(name = %self.name, "Dropping event without id");
            return None;
        }
        Some(Event {
            working_hours: sanitize_hours(self.working_hours, &self.id),
            id: self.id,
            name: self.name,
            location: self.location,
            date: self.date,
        })
    }
}

/// `GET /admin/getevents` wraps the list in an object.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EventsEnvelope {
    #[serde(default)]
    pub events: Vec<EventWire>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DepartmentWorkWire {
    #[serde(rename = "_id", default)]
    pub id: String,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub department: String,
    #[serde(rename = "workDescription", default)]
    pub work_description: String,
    #[serde(rename = "workingHours", default)]
    pub working_hours: Option<f64>,
    #[serde(rename = "studentId", default)]
    pub student_id: String,
    #[serde(rename = "studentName", default)]
    pub student_name: String,
}

impl DepartmentWorkWire {
    pub fn into_entry(self) -> Option<DepartmentWorkEntry> {
        if self.id.is_empty() {
            warn!(student = %self.student_id, "Dropping department work without id");
            return None;
        }
        let Some(department) = Department::from_label(&self.department) else {
            warn!(id = %self.id, department = %self.department, "Dropping work with unknown department");
            return None;
        };
        Some(DepartmentWorkEntry {
            working_hours: sanitize_hours(self.working_hours, &self.id),
            id: self.id,
            date: self.date,
            department,
            work_description: self.work_description,
            student_id: self.student_id,
            student_name: self.student_name,
        })
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct StudentReportWire {
    pub student: Option<StudentWire>,
    #[serde(default)]
    pub events: Vec<EventWire>,
    #[serde(rename = "departmentWork", default)]
    pub department_work: Vec<DepartmentWorkWire>,
}

impl StudentReportWire {
    /// `None` when the student itself is missing or cannot be narrowed.
    pub fn into_report(self) -> Option<StudentReport> {
        let student = self.student?.into_student()?;
        Some(StudentReport {
            student,
            events: narrow_all(self.events, EventWire::into_event),
            department_work: narrow_all(self.department_work, DepartmentWorkWire::into_entry),
        })
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct StudentRecordWire {
    #[serde(default)]
    pub events: Vec<EventWire>,
    #[serde(rename = "departmentWork", default)]
    pub department_work: Vec<DepartmentWorkWire>,
}

impl StudentRecordWire {
    pub fn into_record(self) -> StudentRecord {
        StudentRecord {
            events: narrow_all(self.events, EventWire::into_event),
            department_work: narrow_all(self.department_work, DepartmentWorkWire::into_entry),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SessionCheckWire {
    #[serde(default)]
    pub success: bool,
    pub student: Option<SessionStudentWire>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SessionStudentWire {
    #[serde(alias = "_id", default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(rename = "studentId")]
    pub student_id: Option<String>,
    pub branch: Option<String>,
}

impl SessionStudentWire {
    pub fn into_session_student(self) -> Option<SessionStudent> {
        if self.id.is_empty() {
            return None;
        }
        Some(SessionStudent {
            id: self.id,
            name: self.name,
            student_id: self.student_id,
            branch: self.branch,
        })
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct VisibilityWire {
    #[serde(default)]
    pub visible: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct VisibilityRequest {
    pub visible: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct OwnRecordRequest<'a> {
    pub id: &'a str,
}

#[derive(Debug, Clone, Serialize)]
pub struct AdminLoginRequest<'a> {
    #[serde(rename = "adminId")]
    pub admin_id: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Clone, Serialize)]
pub struct StudentLoginRequest<'a> {
    #[serde(rename = "studentId")]
    pub student_id: &'a str,
    pub password: &'a str,
}

/// Reply to either login endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoginResponse {
    #[serde(default)]
    pub success: bool,
    pub message: Option<String>,
}

/// Error bodies carry an optional human-readable message.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MessageBody {
    pub message: Option<String>,
}

/// Narrow a list, dropping the records that fail to narrow.
pub fn narrow_all<W, T>(items: Vec<W>, narrow: impl Fn(W) -> Option<T>) -> Vec<T> {
    items.into_iter().filter_map(narrow).collect()
}

/// Working hours must be a finite, non-negative number; anything else counts as zero.
fn sanitize_hours(hours: Option<f64>, id: &str) -> f64 {
    match hours {
        Some(h) if h.is_finite() && h >= 0.0 => h,
        Some(h) => {
            warn!(id = %id, hours = h, "Invalid working hours, counting as zero");
            0.0
        }
        None => 0.0,
    }
}
