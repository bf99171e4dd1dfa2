//! Mark attendance for one event.

use anyhow::Result;
use chrono::{DateTime, Utc};
use tracing::{info, warn};

use super::Outcome;
use crate::aggregate::{self, BranchCount};
use crate::loader::AttendanceData;
use crate::models::{AttendanceBatch, Branch, Event, Student};
use crate::notify::{describe_error, Notice};
use crate::page::PageStatus;
use crate::route::Route;
use crate::selection::{BranchToggle, SelectionState};
use crate::submit;

#[derive(Debug)]
pub struct MarkAttendancePage {
    event_id: String,
    status: PageStatus,
    event: Option<Event>,
    roster: Vec<Student>,
    selection: SelectionState,
    /// Branches that already had marks when the page loaded.
    completed: Vec<Branch>,
    /// No branch chosen means no students are listed.
    pub branch: Option<Branch>,
    pub query: String,
}

impl MarkAttendancePage {
    pub fn new(event_id: &str) -> Self {
        Self {
            event_id: event_id.trim().to_string(),
            status: PageStatus::for_route_id(event_id),
            event: None,
            roster: Vec::new(),
            selection: SelectionState::default(),
            completed: Vec::new(),
            branch: None,
            query: String::new(),
        }
    }

    pub fn event_id(&self) -> &str {
        &self.event_id
    }

    pub fn status(&self) -> PageStatus {
        self.status
    }

    pub fn event(&self) -> Option<&Event> {
        self.event.as_ref()
    }

    pub fn roster(&self) -> &[Student] {
        &self.roster
    }

    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    pub fn completed_branches(&self) -> &[Branch] {
        &self.completed
    }

    /// Seed the selection from the records already on the server. A failed
    /// load leaves the page loading.
    pub fn on_loaded(&mut self, result: Result<AttendanceData>) -> Outcome {
        if self.status != PageStatus::Loading {
            return Outcome::none();
        }
        match result {
            Ok(data) => {
                let marked = data
                    .records
                    .iter()
                    .filter(|r| r.event_id.is_empty() || r.event_id == self.event_id)
                    .map(|r| r.student_id.as_str());
                self.selection = SelectionState::seeded(&data.roster, marked);
                self.completed = aggregate::marked_branches(&data.roster, &self.selection);
                self.roster = data.roster;
                self.event = Some(data.event);
                self.status = PageStatus::Ready;
                Outcome::none()
            }
            Err(e) => {
                warn!(event_id = %self.event_id, error = %e, "Attendance page failed to load");
                Outcome::notice(Notice::error("Error", describe_error(&e, "Failed to load event data")))
            }
        }
    }

    pub fn select_branch(&mut self, branch: Branch) {
        self.branch = Some(branch);
    }

    /// Students of the chosen branch matching the search query.
    pub fn visible_students(&self) -> Vec<&Student> {
        match self.branch {
            Some(branch) => aggregate::filter_students(&self.roster, branch, &self.query),
            None => Vec::new(),
        }
    }

    pub fn toggle(&mut self, student_id: &str) -> Option<bool> {
        if !self.status.is_ready() {
            return None;
        }
        self.selection.toggle(student_id)
    }

    /// Select or deselect every student of the chosen branch.
    pub fn toggle_branch(&mut self) -> BranchToggle {
        match self.branch {
            Some(branch) if self.status.is_ready() => self.selection.toggle_branch(&self.roster, branch),
            _ => BranchToggle::Empty,
        }
    }

    pub fn branch_count(&self, branch: Branch) -> BranchCount {
        aggregate::branch_count(&self.roster, &self.selection, branch)
    }

    pub fn branch_summary(&self) -> Vec<(Branch, BranchCount)> {
        aggregate::branch_summary(&self.roster, &self.selection)
    }

    pub fn total_selected(&self) -> usize {
        aggregate::total_selected(&self.selection)
    }

    /// An empty batch is valid: it records that nobody attended.
    pub fn can_submit(&self) -> bool {
        self.status.is_ready()
    }

    /// Build the batch and move to `Submitting`. `None` while the page is
    /// loading or busy.
    pub fn begin_submit(&mut self, now: DateTime<Utc>) -> Option<AttendanceBatch> {
        if !self.can_submit() {
            return None;
        }
        let event = self.event.as_ref()?;
        let batch = submit::attendance_batch(event, &self.roster, &self.selection, now);
        self.status = PageStatus::Submitting;
        Some(batch)
    }

    /// On success confirm and head back to the events list. On failure the
    /// selection is left exactly as it was.
    pub fn on_submitted(&mut self, result: Result<usize>) -> Outcome {
        if self.status != PageStatus::Submitting {
            return Outcome::none();
        }
        self.status = PageStatus::Ready;
        match result {
            Ok(count) => {
                let name = self.event.as_ref().map(|e| e.name.as_str()).unwrap_or_default();
                info!(event_id = %self.event_id, count, "Attendance submitted");
                Outcome::notice(Notice::info(
                    "Attendance Saved",
                    format!("Marked {} students as present for {}", count, name),
                ))
                .then_navigate(Route::ManageEvents)
            }
            Err(e) => {
                warn!(event_id = %self.event_id, error = %e, "Attendance submission failed");
                Outcome::notice(Notice::error("Error", "Failed to save attendance"))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::load_attendance;
    use crate::submit::submit_attendance;
    use crate::testing::{event, mark, sample_roster, student, FakeBackend};

    fn backend() -> FakeBackend {
        let backend = FakeBackend::with_roster(sample_roster());
        backend.state().events.push(event("e1", "Orientation", 2.0));
        backend
    }

    async fn loaded(backend: &FakeBackend) -> MarkAttendancePage {
        let mut page = MarkAttendancePage::new("e1");
        let outcome = page.on_loaded(load_attendance(backend, "e1").await);
        assert_eq!(outcome, Outcome::none());
        page
    }

    #[test]
    fn test_empty_event_id_is_not_found() {
        let page = MarkAttendancePage::new("");
        assert_eq!(page.status(), PageStatus::NotFound);
    }

    #[tokio::test]
    async fn test_load_seeds_existing_marks() {
        let backend = backend();
        backend.state().attendance.push(mark("s3", "e1"));
        backend.state().attendance.push(mark("ghost", "e1"));

        let page = loaded(&backend).await;
        assert_eq!(page.status(), PageStatus::Ready);
        assert!(page.selection().is_selected("s3"));
        assert!(!page.selection().contains("ghost"));
        assert_eq!(page.completed_branches(), &[Branch::Ece]);
        assert_eq!(page.total_selected(), 1);
    }

    #[tokio::test]
    async fn test_roster_failure_stays_loading() {
        let backend = backend();
        backend.state().fail_roster = true;

        let mut page = MarkAttendancePage::new("e1");
        let outcome = page.on_loaded(load_attendance(&backend, "e1").await);
        assert_eq!(page.status(), PageStatus::Loading);
        assert!(outcome.notice.unwrap().is_error());
        assert!(page.begin_submit(Utc::now()).is_none());
    }

    #[tokio::test]
    async fn test_submit_success_confirms_and_navigates() {
        let backend = backend();
        let mut page = loaded(&backend).await;

        page.select_branch(Branch::Cse);
        assert_eq!(page.visible_students().len(), 2);
        page.toggle("s1");
        page.toggle("s2");
        assert_eq!(page.branch_count(Branch::Cse), BranchCount { selected: 2, total: 2 });
        assert_eq!(page.total_selected(), 2);

        let batch = page.begin_submit(Utc::now()).unwrap();
        assert_eq!(page.status(), PageStatus::Submitting);
        assert!(page.begin_submit(Utc::now()).is_none());

        let outcome = page.on_submitted(submit_attendance(&backend, &batch).await);
        let notice = outcome.notice.unwrap();
        assert!(!notice.is_error());
        assert_eq!(notice.message, "Marked 2 students as present for Orientation");
        assert_eq!(outcome.navigate, Some(Route::ManageEvents));
        assert_eq!(page.status(), PageStatus::Ready);
        assert_eq!(backend.state().submitted_attendance.len(), 1);
    }

    #[tokio::test]
    async fn test_submit_failure_keeps_selection() {
        let backend = backend();
        let mut page = loaded(&backend).await;
        page.toggle("s1");
        page.toggle("s3");
        let before = page.selection().clone();

        backend.state().fail_submit = true;
        let batch = page.begin_submit(Utc::now()).unwrap();
        let outcome = page.on_submitted(submit_attendance(&backend, &batch).await);

        assert_eq!(page.status(), PageStatus::Ready);
        assert_eq!(page.selection(), &before);
        assert_eq!(outcome.navigate, None);
        let notice = outcome.notice.unwrap();
        assert!(notice.is_error());
        assert_eq!(notice.message, "Failed to save attendance");
    }

    #[tokio::test]
    async fn test_unmarking_everyone_submits_empty_batch() {
        let backend = backend();
        backend.state().attendance.push(mark("s1", "e1"));
        let mut page = loaded(&backend).await;
        assert_eq!(page.total_selected(), 1);

        page.toggle("s1");
        assert_eq!(page.total_selected(), 0);
        assert!(page.can_submit());

        let batch = page.begin_submit(Utc::now()).unwrap();
        assert_eq!(batch.event_id, "e1");
        assert!(batch.records.is_empty());

        let outcome = page.on_submitted(submit_attendance(&backend, &batch).await);
        let notice = outcome.notice.unwrap();
        assert!(!notice.is_error());
        assert_eq!(notice.message, "Marked 0 students as present for Orientation");
        assert_eq!(outcome.navigate, Some(Route::ManageEvents));
        assert_eq!(backend.state().submitted_attendance.len(), 1);
    }

    #[tokio::test]
    async fn test_other_branch_marks_are_resubmitted() {
        let backend = backend();
        backend.state().students.push(student("s9", "Ravi", Branch::Other));
        backend.state().attendance.push(mark("s9", "e1"));
        let mut page = loaded(&backend).await;

        assert!(page.selection().is_selected("s9"));
        assert_eq!(page.completed_branches(), &[Branch::Other]);
        page.select_branch(Branch::Other);
        assert_eq!(page.visible_students().len(), 1);

        let batch = page.begin_submit(Utc::now()).unwrap();
        let ids: Vec<&str> = batch.records.iter().map(|r| r.student_id.as_str()).collect();
        assert_eq!(ids, vec!["s9"]);
    }

    #[tokio::test]
    async fn test_branch_toggle_and_search() {
        let backend = backend();
        let mut page = loaded(&backend).await;

        assert_eq!(page.toggle_branch(), BranchToggle::Empty);
        page.select_branch(Branch::Cse);
        assert_eq!(page.toggle_branch(), BranchToggle::Selected(2));
        page.query = "bil".to_string();
        let names: Vec<&str> = page.visible_students().iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Bilal"]);
        assert_eq!(page.toggle_branch(), BranchToggle::Deselected(2));
    }
}
