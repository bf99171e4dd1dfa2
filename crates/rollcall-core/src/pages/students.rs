//! Students by branch, leading into per-student reports.

use anyhow::Result;
use tracing::warn;

use super::Outcome;
use crate::aggregate;
use crate::models::{Branch, Student};
use crate::notify::{describe_error, Notice};
use crate::page::PageStatus;
use crate::route::Route;

#[derive(Debug)]
pub struct StudentsPage {
    status: PageStatus,
    roster: Vec<Student>,
    pub branch: Option<Branch>,
    pub query: String,
}

impl Default for StudentsPage {
    fn default() -> Self {
        Self::new()
    }
}

impl StudentsPage {
    pub fn new() -> Self {
        Self {
            status: PageStatus::Loading,
            roster: Vec::new(),
            branch: None,
            query: String::new(),
        }
    }

    pub fn status(&self) -> PageStatus {
        self.status
    }

    pub fn on_loaded(&mut self, result: Result<Vec<Student>>) -> Outcome {
        match result {
            Ok(roster) => {
                self.roster = roster;
                self.status = PageStatus::Ready;
                Outcome::none()
            }
            Err(e) => {
                warn!(error = %e, "Failed to load students");
                Outcome::notice(Notice::error("Error", describe_error(&e, "Failed to load students")))
            }
        }
    }

    pub fn select_branch(&mut self, branch: Branch) {
        self.branch = Some(branch);
    }

    pub fn branch_total(&self, branch: Branch) -> usize {
        self.roster.iter().filter(|s| s.branch == branch).count()
    }

    pub fn visible_students(&self) -> Vec<&Student> {
        match self.branch {
            Some(branch) => aggregate::filter_students(&self.roster, branch, &self.query),
            None => Vec::new(),
        }
    }

    /// Route to the report of the visible student at `index`.
    pub fn open(&self, index: usize) -> Option<Route> {
        self.visible_students()
            .get(index)
            .map(|s| Route::StudentReport(s.id.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::sample_roster;

    #[test]
    fn test_no_branch_lists_nobody() {
        let mut page = StudentsPage::new();
        page.on_loaded(Ok(sample_roster()));
        assert!(page.visible_students().is_empty());
        assert_eq!(page.open(0), None);
    }

    #[test]
    fn test_branch_listing_and_open() {
        let mut page = StudentsPage::new();
        page.on_loaded(Ok(sample_roster()));
        page.select_branch(Branch::Ece);
        assert_eq!(page.branch_total(Branch::Cse), 2);
        assert_eq!(page.visible_students().len(), 1);
        assert_eq!(page.open(0), Some(Route::StudentReport("s3".to_string())));
    }

    #[test]
    fn test_load_failure_stays_loading() {
        let mut page = StudentsPage::new();
        let outcome = page.on_loaded(Err(anyhow::anyhow!("offline")));
        assert_eq!(page.status(), PageStatus::Loading);
        assert!(outcome.notice.unwrap().is_error());
    }
}
