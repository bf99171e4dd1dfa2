use serde::{Deserialize, Serialize};

use super::{DepartmentWorkEntry, Event, Student};
use crate::aggregate::total_working_hours;

/// Everything the admin report shows for one student.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudentReport {
    pub student: Student,
    pub events: Vec<Event>,
    pub department_work: Vec<DepartmentWorkEntry>,
}

impl StudentReport {
    pub fn total_working_hours(&self) -> f64 {
        total_working_hours(&self.events, &self.department_work)
    }
}

/// The logged-in student's own attendance and work.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StudentRecord {
    pub events: Vec<Event>,
    pub department_work: Vec<DepartmentWorkEntry>,
}

impl StudentRecord {
    pub fn total_working_hours(&self) -> f64 {
        total_working_hours(&self.events, &self.department_work)
    }
}

/// Identity of the logged-in student as reported by the session check.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionStudent {
    pub id: String,
    pub name: String,
    pub student_id: Option<String>,
    pub branch: Option<String>,
}
