//! Derived values computed from the roster and selection state.
//!
//! Nothing here is stored; pages call these on every render so the numbers
//! cannot drift from their inputs.

use crate::models::{Branch, DepartmentWorkEntry, Event, Student};
use crate::selection::SelectionState;

/// Selected and total students within one branch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BranchCount {
    pub selected: usize,
    pub total: usize,
}

impl BranchCount {
    /// Every student of a non-empty branch is selected.
    pub fn is_complete(&self) -> bool {
        self.total > 0 && self.selected == self.total
    }
}

pub fn total_selected(selection: &SelectionState) -> usize {
    selection.count_selected()
}

pub fn branch_count(roster: &[Student], selection: &SelectionState, branch: Branch) -> BranchCount {
    roster
        .iter()
        .filter(|s| s.branch == branch)
        .fold(BranchCount::default(), |mut acc, s| {
            acc.total += 1;
            if selection.is_selected(&s.id) {
                acc.selected += 1;
            }
            acc
        })
}

/// Counts for every branch, in display order.
pub fn branch_summary(roster: &[Student], selection: &SelectionState) -> Vec<(Branch, BranchCount)> {
    Branch::ALL
        .iter()
        .map(|&b| (b, branch_count(roster, selection, b)))
        .collect()
}

/// Branches with at least one selected student.
pub fn marked_branches(roster: &[Student], selection: &SelectionState) -> Vec<Branch> {
    branch_summary(roster, selection)
        .into_iter()
        .filter(|(_, count)| count.selected > 0)
        .map(|(b, _)| b)
        .collect()
}

/// Hours from attended events plus department work.
///
/// Summed in fixed-point hundredths of an hour, so the total does not depend
/// on the order of either list.
pub fn total_working_hours(events: &[Event], work: &[DepartmentWorkEntry]) -> f64 {
    let hundredths: i64 = events
        .iter()
        .map(|e| e.working_hours)
        .chain(work.iter().map(|w| w.working_hours))
        .map(to_hundredths)
        .sum();
    hundredths as f64 / 100.0
}

fn to_hundredths(hours: f64) -> i64 {
    if hours.is_finite() && hours > 0.0 {
        (hours * 100.0).round() as i64
    } else {
        0
    }
}

/// Students of `branch` whose name or code matches `query`, in roster order.
pub fn filter_students<'a>(roster: &'a [Student], branch: Branch, query: &str) -> Vec<&'a Student> {
    let query = query.trim();
    roster
        .iter()
        .filter(|s| s.branch == branch && s.matches_query(query))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{event, sample_roster, student, work};

    #[test]
    fn test_cse_scenario() {
        let roster = sample_roster();
        let mut selection = SelectionState::new(&roster);
        selection.toggle("s1");
        selection.toggle("s2");

        assert_eq!(branch_count(&roster, &selection, Branch::Cse), BranchCount { selected: 2, total: 2 });
        assert_eq!(branch_count(&roster, &selection, Branch::Ece), BranchCount { selected: 0, total: 1 });
        assert_eq!(total_selected(&selection), 2);
        assert!(branch_count(&roster, &selection, Branch::Cse).is_complete());
    }

    #[test]
    fn test_total_selected_tracks_toggle_sequences() {
        let roster = sample_roster();
        let mut selection = SelectionState::new(&roster);
        let sequence = ["s1", "s3", "s1", "s2", "ghost", "s3", "s3", "s2", "s1"];

        for id in sequence {
            selection.toggle(id);
            let expected = roster.iter().filter(|s| selection.is_selected(&s.id)).count();
            assert_eq!(total_selected(&selection), expected);
        }
        assert_eq!(total_selected(&selection), 2);
    }

    #[test]
    fn test_branch_summary_covers_every_branch() {
        let roster = sample_roster();
        let selection = SelectionState::seeded(&roster, ["s3"]);
        let summary = branch_summary(&roster, &selection);
        assert_eq!(summary.len(), Branch::ALL.len());
        assert_eq!(summary[0].0, Branch::Csai);
        assert_eq!(marked_branches(&roster, &selection), vec![Branch::Ece]);
    }

    #[test]
    fn test_empty_branch_is_never_complete() {
        let count = BranchCount::default();
        assert!(!count.is_complete());
    }

    #[test]
    fn test_total_working_hours_is_order_independent() {
        let events = vec![event("e1", "A", 0.1), event("e2", "B", 0.2), event("e3", "C", 2.5)];
        let entries = vec![work("w1", "s1", 0.3), work("w2", "s1", 1.5)];

        let forward = total_working_hours(&events, &entries);

        let mut rev_events = events.clone();
        rev_events.reverse();
        let mut rev_entries = entries.clone();
        rev_entries.reverse();
        let backward = total_working_hours(&rev_events, &rev_entries);

        assert_eq!(forward, backward);
        assert_eq!(forward, 4.6);
    }

    #[test]
    fn test_total_working_hours_empty() {
        assert_eq!(total_working_hours(&[], &[]), 0.0);
    }

    #[test]
    fn test_filter_students_by_branch_and_query() {
        let mut roster = sample_roster();
        roster.push(student("s4", "Ashwin", Branch::Cse));

        let all_cse: Vec<&str> = filter_students(&roster, Branch::Cse, "").iter().map(|s| s.id.as_str()).collect();
        assert_eq!(all_cse, vec!["s1", "s2", "s4"]);

        let ash: Vec<&str> = filter_students(&roster, Branch::Cse, " ash ").iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ash, vec!["s1", "s4"]);

        assert!(filter_students(&roster, Branch::Mba, "").is_empty());
    }
}
