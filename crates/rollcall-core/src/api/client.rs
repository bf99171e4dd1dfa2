//! API client for the attendance service.
//!
//! This module provides the `ApiClient` struct for making requests against the
//! remote JSON API. Authentication is cookie based: the login endpoints set a
//! session cookie which the client's cookie store replays on every later
//! request.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde::{de::DeserializeOwned, Serialize};
use tracing::debug;

use crate::auth::{Role, SessionCheck};
use crate::models::{
    AttendanceBatch, AttendanceRecord, DepartmentWorkEntry, Event, NewDepartmentWork, NewEvent,
    Student, StudentRecord, StudentReport,
};

use super::wire::{
    narrow_all, AdminLoginRequest, DepartmentWorkWire, EventWire, EventsEnvelope, LoginResponse,
    OwnRecordRequest, SessionCheckWire, StudentLoginRequest, StudentRecordWire, StudentReportWire,
    StudentWire, VisibilityRequest, VisibilityWire,
};
use super::{ApiError, Backend};

// ============================================================================
// Constants
// ============================================================================

/// HTTP request timeout in seconds.
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Login requests fail faster so a dead server is reported promptly.
const LOGIN_TIMEOUT_SECS: u64 = 6;

/// API client for the attendance service.
/// Clone is cheap - reqwest::Client uses Arc internally for connection pooling
/// and the cookie store is shared between clones.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: Arc<str>,
}

impl ApiClient {
    /// Create a new API client for the given base URL
    pub fn new(base_url: &str) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .cookie_store(true)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            base_url: Arc::from(base_url.trim_end_matches('/')),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Check if response is successful, returning an error with body if not.
    async fn check_response(response: Response) -> Result<Response> {
        if response.status().is_success() {
            Ok(response)
        } else {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            Err(ApiError::from_status(status, &body).into())
        }
    }

    /// Path with one percent-encoded id segment appended.
    fn id_path(prefix: &str, id: &str) -> String {
        format!("{}/{}", prefix, urlencoding::encode(id))
    }

    fn get_request(&self, path: &str, query: &[(&str, &str)]) -> RequestBuilder {
        let request = self.client.get(self.url(path));
        if query.is_empty() {
            request
        } else {
            request.query(query)
        }
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.get_with_query(path, &[]).await
    }

    async fn get_with_query<T: DeserializeOwned>(&self, path: &str, query: &[(&str, &str)]) -> Result<T> {
        let response = self
            .get_request(path, query)
            .send()
            .await
            .map_err(ApiError::from)
            .with_context(|| format!("Failed to send GET request to {}", path))?;

        let response = Self::check_response(response).await?;
        response
            .json()
            .await
            .with_context(|| format!("Failed to parse JSON response from {}", path))
    }

    async fn post<B: Serialize + ?Sized, T: DeserializeOwned>(&self, path: &str, body: &B) -> Result<T> {
        let response = self.send_post(path, body).await?;
        response
            .json()
            .await
            .with_context(|| format!("Failed to parse JSON response from {}", path))
    }

    /// POST where only the status matters; the response body is ignored.
    async fn post_ack<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<()> {
        self.send_post(path, body).await?;
        Ok(())
    }

    async fn send_post<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<Response> {
        let url = self.url(path);
        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(ApiError::from)
            .with_context(|| format!("Failed to send POST request to {}", path))?;

        Self::check_response(response).await
    }

    async fn delete(&self, path: &str) -> Result<()> {
        let url = self.url(path);
        let response = self
            .client
            .delete(&url)
            .send()
            .await
            .map_err(ApiError::from)
            .with_context(|| format!("Failed to send DELETE request to {}", path))?;

        Self::check_response(response).await?;
        Ok(())
    }

    // ===== Login / Logout =====

    /// Log in as an administrator. On success the session cookie is stored.
    pub async fn login_admin(&self, admin_id: &str, password: &str) -> Result<LoginResponse> {
        let body = AdminLoginRequest { admin_id, password };
        self.login("/loginadmin", &body).await
    }

    /// Log in as a student. On success the session cookie is stored.
    pub async fn login_student(&self, student_id: &str, password: &str) -> Result<LoginResponse> {
        let body = StudentLoginRequest { student_id, password };
        self.login("/loginstudent", &body).await
    }

    async fn login<B: Serialize>(&self, path: &str, body: &B) -> Result<LoginResponse> {
        let response = self
            .client
            .post(self.url(path))
            .timeout(Duration::from_secs(LOGIN_TIMEOUT_SECS))
            .json(body)
            .send()
            .await
            .map_err(ApiError::from)
            .context("Failed to send login request")?;

        let response = Self::check_response(response).await?;
        response.json().await.context("Failed to parse login response")
    }

    pub async fn logout(&self, role: Role) -> Result<()> {
        let path = match role {
            Role::Admin => "/logoutadmin",
            Role::Student => "/logoutstudent",
        };
        let url = self.url(path);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(ApiError::from)
            .context("Failed to send logout request")?;
        Self::check_response(response).await?;
        Ok(())
    }
}

#[async_trait]
impl Backend for ApiClient {
    async fn verify_session(&self, role: Role) -> Result<SessionCheck> {
        let path = match role {
            Role::Admin => "/verifyadminToken",
            Role::Student => "/verifystudentToken",
        };
        let wire: SessionCheckWire = self.get(path).await?;
        Ok(SessionCheck {
            success: wire.success,
            student: wire.student.and_then(|s| s.into_session_student()),
        })
    }

    async fn fetch_students(&self) -> Result<Vec<Student>> {
        let wire: Vec<StudentWire> = self
            .get("/admin/createuser")
            .await
            .context("Failed to fetch student roster")?;
        let total = wire.len();
        let roster = narrow_all(wire, StudentWire::into_student);
        debug!(total, kept = roster.len(), "Roster fetched");
        Ok(roster)
    }

    async fn fetch_events(&self) -> Result<Vec<Event>> {
        let envelope: EventsEnvelope = self
            .get("/admin/getevents")
            .await
            .context("Failed to fetch events")?;
        Ok(narrow_all(envelope.events, EventWire::into_event))
    }

    async fn fetch_event(&self, event_id: &str) -> Result<Event> {
        let path = Self::id_path("/admin/getoneevent", event_id);
        let wire: EventWire = self.get(&path).await.context("Failed to fetch event")?;
        wire.into_event()
            .ok_or_else(|| ApiError::InvalidResponse(format!("event {} has no id", event_id)).into())
    }

    async fn create_event(&self, event: &NewEvent) -> Result<()> {
        self.post_ack("/admin/createevent", event)
            .await
            .context("Failed to create event")
    }

    async fn delete_event(&self, event_id: &str) -> Result<()> {
        let path = Self::id_path("/admin/deleteevent", event_id);
        self.delete(&path).await.context("Failed to delete event")
    }

    async fn fetch_attendance(&self, event_id: &str) -> Result<Vec<AttendanceRecord>> {
        self.get_with_query("/admin/attendance", &[("eventId", event_id)])
            .await
            .context("Failed to fetch attendance records")
    }

    async fn submit_attendance(&self, batch: &AttendanceBatch) -> Result<()> {
        debug!(event = %batch.event_id, count = batch.records.len(), "Submitting attendance");
        self.post_ack("/admin/markattendance", batch)
            .await
            .context("Failed to save attendance")
    }

    async fn fetch_department_work(&self) -> Result<Vec<DepartmentWorkEntry>> {
        let wire: Vec<DepartmentWorkWire> = self
            .get("/admin/departmentwork")
            .await
            .context("Failed to fetch department work")?;
        Ok(narrow_all(wire, DepartmentWorkWire::into_entry))
    }

    async fn submit_department_work(&self, entries: &[NewDepartmentWork]) -> Result<()> {
        debug!(count = entries.len(), "Submitting department work");
        self.post_ack("/admin/departmentwork", entries)
            .await
            .context("Failed to save department work")
    }

    async fn delete_department_work(&self, work_id: &str) -> Result<()> {
        let path = Self::id_path("/admin/deletedepartwork", work_id);
        self.delete(&path)
            .await
            .context("Failed to delete department work")
    }

    async fn fetch_student_report(&self, student_id: &str) -> Result<StudentReport> {
        let path = Self::id_path("/admin/student", student_id);
        let wire: StudentReportWire = self
            .get(&path)
            .await
            .context("Failed to fetch student report")?;
        wire.into_report().ok_or_else(|| {
            ApiError::InvalidResponse(format!("report for {} has no valid student", student_id)).into()
        })
    }

    async fn fetch_own_record(&self, student_id: &str) -> Result<StudentRecord> {
        let wire: StudentRecordWire = self
            .post("/loggedinuserrecord", &OwnRecordRequest { id: student_id })
            .await
            .context("Failed to fetch attendance record")?;
        Ok(wire.into_record())
    }

    async fn working_hours_visibility(&self, role: Role) -> Result<bool> {
        let path = match role {
            Role::Admin => "/api/student/working-hours",
            Role::Student => "/checkvisibility",
        };
        let wire: VisibilityWire = self
            .get(path)
            .await
            .context("Failed to fetch working hours visibility")?;
        Ok(wire.visible)
    }

    async fn set_working_hours_visibility(&self, visible: bool) -> Result<()> {
        self.post_ack("/admin/setting", &VisibilityRequest { visible })
            .await
            .context("Failed to update working hours visibility")
    }
}
