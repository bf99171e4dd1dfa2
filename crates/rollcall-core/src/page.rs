//! Page lifecycle and the tickets that tie background results to the page
//! instance that asked for them.

/// Identifies one mounted page instance. Results from background tasks carry
/// the ticket they were issued with and are dropped if it is no longer
/// current.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PageTicket(u64);

/// Hands out page tickets. Every navigation enters a new scope, which makes
/// all earlier tickets stale.
#[derive(Debug, Default)]
pub struct PageScope {
    generation: u64,
}

impl PageScope {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new page instance and return its ticket.
    pub fn enter(&mut self) -> PageTicket {
        self.generation = self.generation.wrapping_add(1);
        PageTicket(self.generation)
    }

    pub fn current(&self) -> PageTicket {
        PageTicket(self.generation)
    }

    pub fn is_current(&self, ticket: PageTicket) -> bool {
        ticket.0 == self.generation
    }
}

/// Where a data page is in its lifecycle.
///
/// `Loading -> Ready -> Submitting -> Ready`. A page whose route identifier
/// is missing is `NotFound` and never loads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageStatus {
    Loading,
    Ready,
    Submitting,
    NotFound,
}

impl PageStatus {
    pub fn is_ready(&self) -> bool {
        *self == PageStatus::Ready
    }

    pub fn is_busy(&self) -> bool {
        matches!(self, PageStatus::Loading | PageStatus::Submitting)
    }

    /// Status for a page keyed by a route identifier.
    pub fn for_route_id(id: &str) -> Self {
        if id.trim().is_empty() {
            PageStatus::NotFound
        } else {
            PageStatus::Loading
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stale_tickets_are_rejected() {
        let mut scope = PageScope::new();
        let first = scope.enter();
        assert!(scope.is_current(first));

        let second = scope.enter();
        assert!(!scope.is_current(first));
        assert!(scope.is_current(second));
        assert_eq!(scope.current(), second);
    }

    #[test]
    fn test_status_for_route_id() {
        assert_eq!(PageStatus::for_route_id(""), PageStatus::NotFound);
        assert_eq!(PageStatus::for_route_id("  "), PageStatus::NotFound);
        assert_eq!(PageStatus::for_route_id("e1"), PageStatus::Loading);
    }

    #[test]
    fn test_busy_states() {
        assert!(PageStatus::Loading.is_busy());
        assert!(PageStatus::Submitting.is_busy());
        assert!(!PageStatus::Ready.is_busy());
        assert!(!PageStatus::NotFound.is_busy());
    }
}
