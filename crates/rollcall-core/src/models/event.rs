use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Serialize};

/// An event students attend for working-hour credit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: String,
    pub name: String,
    pub location: String,
    pub date: String,
    pub working_hours: f64,
}

impl Event {
    /// Date for list views: "Mar 01, 2025", or the raw value if unparseable
    pub fn formatted_date(&self) -> String {
        if let Ok(dt) = DateTime::parse_from_rfc3339(&self.date) {
            dt.format("%b %d, %Y").to_string()
        } else if let Ok(date) = NaiveDate::parse_from_str(self.date.get(..10).unwrap_or(""), "%Y-%m-%d") {
            date.format("%b %d, %Y").to_string()
        } else if self.date.is_empty() {
            "TBD".to_string()
        } else {
            self.date.chars().take(10).collect()
        }
    }
}

/// Body of the create-event request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewEvent {
    pub name: String,
    pub location: String,
    /// Calendar date as `YYYY-MM-DD`
    pub date: String,
    #[serde(rename = "workingHours")]
    pub working_hours: f64,
    #[serde(rename = "createdAt")]
    pub created_at: String,
}

/// Presence of one student at one event. There is no absent record; a
/// student without a record was not present.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttendanceRecord {
    #[serde(rename = "studentId")]
    pub student_id: String,
    #[serde(rename = "eventId", default)]
    pub event_id: String,
    #[serde(default)]
    pub date: String,
}

/// Body of the mark-attendance request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AttendanceBatch {
    #[serde(rename = "eventId")]
    pub event_id: String,
    pub records: Vec<AttendanceRecord>,
}
