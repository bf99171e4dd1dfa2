//! In-memory `Backend` and fixtures shared by the unit tests.

use std::sync::{Mutex, MutexGuard};

use anyhow::Result;
use async_trait::async_trait;

use crate::api::{ApiError, Backend};
use crate::auth::{Role, SessionCheck};
use crate::models::{
    AttendanceBatch, AttendanceRecord, Branch, Department, DepartmentWorkEntry, Event,
    NewDepartmentWork, NewEvent, SessionStudent, Student, StudentRecord, StudentReport,
};

#[derive(Default)]
pub struct FakeState {
    pub admin_session: bool,
    pub student_session: bool,
    pub fail_session_check: bool,
    pub students: Vec<Student>,
    pub events: Vec<Event>,
    pub attendance: Vec<AttendanceRecord>,
    pub work: Vec<DepartmentWorkEntry>,
    pub visible: bool,
    pub fail_roster: bool,
    pub fail_submit: bool,
    pub fail_delete: bool,
    pub fail_visibility: bool,
    pub submitted_attendance: Vec<AttendanceBatch>,
    pub submitted_work: Vec<Vec<NewDepartmentWork>>,
    pub created_events: Vec<NewEvent>,
    pub deleted: Vec<String>,
    next_work_id: usize,
}

#[derive(Default)]
pub struct FakeBackend {
    state: Mutex<FakeState>,
}

impl FakeBackend {
    pub fn with_roster(students: Vec<Student>) -> Self {
        let backend = Self::default();
        backend.state().students = students;
        backend
    }

    pub fn state(&self) -> MutexGuard<'_, FakeState> {
        self.state.lock().unwrap()
    }
}

fn rejected(what: &str) -> anyhow::Error {
    ApiError::ServerError(format!("{} failed", what)).into()
}

#[async_trait]
impl Backend for FakeBackend {
    async fn verify_session(&self, role: Role) -> Result<SessionCheck> {
        let state = self.state();
        if state.fail_session_check {
            return Err(anyhow::anyhow!("connection refused"));
        }
        Ok(match role {
            Role::Admin => SessionCheck { success: state.admin_session, student: None },
            Role::Student => SessionCheck {
                success: state.student_session,
                student: state.student_session.then(|| SessionStudent {
                    id: "s1".to_string(),
                    name: "Asha".to_string(),
                    student_id: Some("22CSE01".to_string()),
                    branch: Some("CSE".to_string()),
                }),
            },
        })
    }

    async fn fetch_students(&self) -> Result<Vec<Student>> {
        let state = self.state();
        if state.fail_roster {
            return Err(rejected("roster"));
        }
        Ok(state.students.clone())
    }

    async fn fetch_events(&self) -> Result<Vec<Event>> {
        Ok(self.state().events.clone())
    }

    async fn fetch_event(&self, event_id: &str) -> Result<Event> {
        self.state()
            .events
            .iter()
            .find(|e| e.id == event_id)
            .cloned()
            .ok_or_else(|| ApiError::NotFound(event_id.to_string()).into())
    }

    async fn create_event(&self, event: &NewEvent) -> Result<()> {
        let mut state = self.state();
        if state.fail_submit {
            return Err(ApiError::Rejected("Event already exists".to_string()).into());
        }
        state.created_events.push(event.clone());
        Ok(())
    }

    async fn delete_event(&self, event_id: &str) -> Result<()> {
        let mut state = self.state();
        if state.fail_delete {
            return Err(rejected("delete"));
        }
        state.events.retain(|e| e.id != event_id);
        state.deleted.push(event_id.to_string());
        Ok(())
    }

    async fn fetch_attendance(&self, event_id: &str) -> Result<Vec<AttendanceRecord>> {
        Ok(self
            .state()
            .attendance
            .iter()
            .filter(|r| r.event_id == event_id)
            .cloned()
            .collect())
    }

    async fn submit_attendance(&self, batch: &AttendanceBatch) -> Result<()> {
        let mut state = self.state();
        if state.fail_submit {
            return Err(rejected("attendance"));
        }
        state.submitted_attendance.push(batch.clone());
        Ok(())
    }

    async fn fetch_department_work(&self) -> Result<Vec<DepartmentWorkEntry>> {
        Ok(self.state().work.clone())
    }

    async fn submit_department_work(&self, entries: &[NewDepartmentWork]) -> Result<()> {
        let mut state = self.state();
        if state.fail_submit {
            return Err(rejected("department work"));
        }
        for entry in entries {
            state.next_work_id += 1;
            let id = format!("w{}", state.next_work_id);
            state.work.push(DepartmentWorkEntry {
                id,
                date: entry.date.clone(),
                department: entry.department,
                work_description: entry.work_description.clone(),
                working_hours: entry.working_hours,
                student_id: entry.student_id.clone(),
                student_name: entry.student_name.clone(),
            });
        }
        state.submitted_work.push(entries.to_vec());
        Ok(())
    }

    async fn delete_department_work(&self, work_id: &str) -> Result<()> {
        let mut state = self.state();
        if state.fail_delete {
            return Err(rejected("delete"));
        }
        state.work.retain(|w| w.id != work_id);
        state.deleted.push(work_id.to_string());
        Ok(())
    }

    async fn fetch_student_report(&self, student_id: &str) -> Result<StudentReport> {
        let state = self.state();
        let student = state
            .students
            .iter()
            .find(|s| s.id == student_id)
            .cloned()
            .ok_or_else(|| anyhow::Error::from(ApiError::NotFound(student_id.to_string())))?;
        let events = state
            .events
            .iter()
            .filter(|e| {
                state
                    .attendance
                    .iter()
                    .any(|r| r.event_id == e.id && r.student_id == student_id)
            })
            .cloned()
            .collect();
        let department_work = state
            .work
            .iter()
            .filter(|w| w.student_id == student_id)
            .cloned()
            .collect();
        Ok(StudentReport { student, events, department_work })
    }

    async fn fetch_own_record(&self, student_id: &str) -> Result<StudentRecord> {
        let report = self.fetch_student_report(student_id).await?;
        Ok(StudentRecord {
            events: report.events,
            department_work: report.department_work,
        })
    }

    async fn working_hours_visibility(&self, _role: Role) -> Result<bool> {
        let state = self.state();
        if state.fail_visibility {
            return Err(rejected("visibility"));
        }
        Ok(state.visible)
    }

    async fn set_working_hours_visibility(&self, visible: bool) -> Result<()> {
        let mut state = self.state();
        if state.fail_visibility {
            return Err(rejected("visibility"));
        }
        state.visible = visible;
        Ok(())
    }
}

pub fn student(id: &str, name: &str, branch: Branch) -> Student {
    Student {
        id: id.to_string(),
        student_id: format!("22{}{}", branch.label(), id),
        name: name.to_string(),
        branch,
    }
}

/// s1 and s2 in CSE, s3 in ECE.
pub fn sample_roster() -> Vec<Student> {
    vec![
        student("s1", "Asha", Branch::Cse),
        student("s2", "Bilal", Branch::Cse),
        student("s3", "Chitra", Branch::Ece),
    ]
}

pub fn event(id: &str, name: &str, hours: f64) -> Event {
    Event {
        id: id.to_string(),
        name: name.to_string(),
        location: "Main Hall".to_string(),
        date: "2025-03-01".to_string(),
        working_hours: hours,
    }
}

pub fn work(id: &str, student_id: &str, hours: f64) -> DepartmentWorkEntry {
    DepartmentWorkEntry {
        id: id.to_string(),
        date: "2025-03-02T10:00:00.000Z".to_string(),
        department: Department::Tech,
        work_description: "Stage setup".to_string(),
        working_hours: hours,
        student_id: student_id.to_string(),
        student_name: "Asha".to_string(),
    }
}

pub fn mark(student_id: &str, event_id: &str) -> AttendanceRecord {
    AttendanceRecord {
        student_id: student_id.to_string(),
        event_id: event_id.to_string(),
        date: "2025-03-01T10:00:00.000Z".to_string(),
    }
}
