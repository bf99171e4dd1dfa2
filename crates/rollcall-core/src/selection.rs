//! Per-page selection state: which students are marked present, or picked
//! for a department-work batch.
//!
//! The state is scoped to the roster it was seeded from. Every roster id has
//! an entry once seeded, and ids outside the roster are never stored, so
//! toggling an unknown id is a no-op.

use std::collections::HashMap;

use crate::models::{Branch, Student};

/// Result of a bulk branch toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BranchToggle {
    /// Every student in the branch is now selected.
    Selected(usize),
    /// Every student in the branch was selected and is now deselected.
    Deselected(usize),
    /// No loaded student belongs to the branch.
    Empty,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SelectionState {
    marks: HashMap<String, bool>,
}

impl SelectionState {
    /// Every roster student starts unselected.
    pub fn new(roster: &[Student]) -> Self {
        Self {
            marks: roster.iter().map(|s| (s.id.clone(), false)).collect(),
        }
    }

    /// Seed from the roster, marking the given ids selected. Ids that are not
    /// in the roster are ignored.
    pub fn seeded<'a, I>(roster: &[Student], marked: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut state = Self::new(roster);
        for id in marked {
            state.set(id, true);
        }
        state
    }

    pub fn is_selected(&self, id: &str) -> bool {
        self.marks.get(id).copied().unwrap_or(false)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.marks.contains_key(id)
    }

    /// Flip one student's flag. Returns the new value, or `None` for an id
    /// outside the roster.
    pub fn toggle(&mut self, id: &str) -> Option<bool> {
        let mark = self.marks.get_mut(id)?;
        *mark = !*mark;
        Some(*mark)
    }

    /// Set one student's flag. Returns false for an id outside the roster.
    pub fn set(&mut self, id: &str, selected: bool) -> bool {
        match self.marks.get_mut(id) {
            Some(mark) => {
                *mark = selected;
                true
            }
            None => false,
        }
    }

    /// Select every student of `branch`, or deselect them all if every one of
    /// them is already selected.
    pub fn toggle_branch(&mut self, roster: &[Student], branch: Branch) -> BranchToggle {
        let ids: Vec<&str> = roster
            .iter()
            .filter(|s| s.branch == branch && self.contains(&s.id))
            .map(|s| s.id.as_str())
            .collect();

        if ids.is_empty() {
            return BranchToggle::Empty;
        }

        let all_selected = ids.iter().all(|id| self.is_selected(id));
        for id in &ids {
            self.set(id, !all_selected);
        }

        if all_selected {
            BranchToggle::Deselected(ids.len())
        } else {
            BranchToggle::Selected(ids.len())
        }
    }

    /// Reset every entry to unselected.
    pub fn clear(&mut self) {
        self.marks.values_mut().for_each(|m| *m = false);
    }

    /// Number of true entries.
    pub fn count_selected(&self) -> usize {
        self.marks.values().filter(|m| **m).count()
    }

    /// Selected students in roster order.
    pub fn selected_students<'a>(&self, roster: &'a [Student]) -> Vec<&'a Student> {
        roster.iter().filter(|s| self.is_selected(&s.id)).collect()
    }

    pub fn len(&self) -> usize {
        self.marks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.marks.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::sample_roster;

    #[test]
    fn test_new_has_entry_for_every_student() {
        let roster = sample_roster();
        let state = SelectionState::new(&roster);
        assert_eq!(state.len(), 3);
        assert!(roster.iter().all(|s| state.contains(&s.id) && !state.is_selected(&s.id)));
    }

    #[test]
    fn test_double_toggle_restores_value() {
        let roster = sample_roster();
        let mut state = SelectionState::seeded(&roster, ["s2"]);

        for id in ["s1", "s2", "s3"] {
            let before = state.is_selected(id);
            state.toggle(id);
            assert_ne!(state.is_selected(id), before);
            state.toggle(id);
            assert_eq!(state.is_selected(id), before);
        }
    }

    #[test]
    fn test_unknown_ids_are_ignored() {
        let roster = sample_roster();
        let mut state = SelectionState::seeded(&roster, ["s1", "ghost"]);
        assert!(!state.contains("ghost"));
        assert_eq!(state.toggle("ghost"), None);
        assert!(!state.set("ghost", true));
        assert_eq!(state.len(), 3);
        assert_eq!(state.count_selected(), 1);
    }

    #[test]
    fn test_toggle_branch_selects_then_deselects() {
        let roster = sample_roster();
        let mut state = SelectionState::new(&roster);

        assert_eq!(state.toggle_branch(&roster, Branch::Cse), BranchToggle::Selected(2));
        assert!(state.is_selected("s1") && state.is_selected("s2"));
        assert!(!state.is_selected("s3"));

        assert_eq!(state.toggle_branch(&roster, Branch::Cse), BranchToggle::Deselected(2));
        assert!(!state.is_selected("s1") && !state.is_selected("s2"));
    }

    #[test]
    fn test_partially_selected_branch_selects_all() {
        let roster = sample_roster();
        let mut state = SelectionState::seeded(&roster, ["s1"]);
        assert_eq!(state.toggle_branch(&roster, Branch::Cse), BranchToggle::Selected(2));
        assert!(state.is_selected("s2"));
    }

    #[test]
    fn test_toggle_empty_branch_is_noop() {
        let roster = sample_roster();
        let mut state = SelectionState::seeded(&roster, ["s3"]);
        let before = state.clone();
        assert_eq!(state.toggle_branch(&roster, Branch::Mba), BranchToggle::Empty);
        assert_eq!(state, before);
    }

    #[test]
    fn test_toggle_branch_before_seeding_is_noop() {
        let roster = sample_roster();
        let mut state = SelectionState::default();
        assert_eq!(state.toggle_branch(&roster, Branch::Cse), BranchToggle::Empty);
        assert!(state.is_empty());
    }

    #[test]
    fn test_selected_students_follow_roster_order() {
        let roster = sample_roster();
        let state = SelectionState::seeded(&roster, ["s3", "s1"]);
        let ids: Vec<&str> = state.selected_students(&roster).iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["s1", "s3"]);
    }

    #[test]
    fn test_clear_keeps_entries() {
        let roster = sample_roster();
        let mut state = SelectionState::seeded(&roster, ["s1", "s2", "s3"]);
        state.clear();
        assert_eq!(state.len(), 3);
        assert_eq!(state.count_selected(), 0);
    }
}
