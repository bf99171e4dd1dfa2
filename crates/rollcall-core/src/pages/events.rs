//! Event listing and creation.

use anyhow::Result;
use chrono::{DateTime, Utc};
use tracing::{info, warn};

use super::Outcome;
use crate::models::{Event, NewEvent};
use crate::notify::{describe_error, Notice};
use crate::page::PageStatus;
use crate::route::Route;
use crate::submit::EventForm;

#[derive(Debug)]
pub struct EventsPage {
    status: PageStatus,
    events: Vec<Event>,
}

impl Default for EventsPage {
    fn default() -> Self {
        Self::new()
    }
}

impl EventsPage {
    pub fn new() -> Self {
        Self {
            status: PageStatus::Loading,
            events: Vec::new(),
        }
    }

    pub fn status(&self) -> PageStatus {
        self.status
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn on_loaded(&mut self, result: Result<Vec<Event>>) -> Outcome {
        match result {
            Ok(events) => {
                self.events = events;
                self.status = PageStatus::Ready;
                Outcome::none()
            }
            Err(e) => {
                warn!(error = %e, "Failed to load events");
                Outcome::notice(Notice::error(
                    "Failed to load events",
                    "Please check your connection or try again later.",
                ))
            }
        }
    }

    /// Route to mark attendance for the event at `index`.
    pub fn open(&self, index: usize) -> Option<Route> {
        self.events.get(index).map(|e| Route::MarkAttendance(e.id.clone()))
    }

    pub fn on_deleted(&mut self, event_id: &str, result: Result<()>) -> Outcome {
        match result {
            Ok(()) => {
                let name = self
                    .events
                    .iter()
                    .find(|e| e.id == event_id)
                    .map(|e| e.name.clone())
                    .unwrap_or_else(|| "Event".to_string());
                self.events.retain(|e| e.id != event_id);
                info!(event_id, "Event deleted");
                Outcome::notice(Notice::info("Event Deleted", format!("{} has been removed successfully.", name)))
            }
            Err(e) => {
                warn!(event_id, error = %e, "Failed to delete event");
                Outcome::notice(Notice::error("Failed to delete event", "Please try again later."))
            }
        }
    }
}

#[derive(Debug, Default)]
pub struct CreateEventPage {
    pub form: EventForm,
    pending: Option<String>,
}

impl CreateEventPage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_submitting(&self) -> bool {
        self.pending.is_some()
    }

    pub fn begin_submit(&mut self, now: DateTime<Utc>) -> Result<NewEvent, Notice> {
        if self.is_submitting() {
            return Err(Notice::error("Please Wait", "The event is still being created"));
        }
        let event = self
            .form
            .to_new_event(now)
            .map_err(|e| Notice::error("Missing Information", e.to_string()))?;
        self.pending = Some(event.name.clone());
        Ok(event)
    }

    /// Success resets the form; failure keeps what was typed.
    pub fn on_submitted(&mut self, result: Result<()>) -> Outcome {
        let Some(name) = self.pending.take() else {
            return Outcome::none();
        };
        match result {
            Ok(()) => {
                info!(name = %name, "Event created");
                self.form.clear();
                Outcome::notice(Notice::info(
                    "Event Created Successfully",
                    format!("{} has been added to the system.", name),
                ))
            }
            Err(e) => {
                warn!(error = %e, "Failed to create event");
                Outcome::notice(Notice::error("Error", describe_error(&e, "Failed to create event")))
            }
        }
    }
}
