//! Application state management for rollcall.
//!
//! This module contains the core `App` struct: the current route and its page
//! state, UI focus, and the channel background tasks report back through.
//! Every fetch and submission runs as a spawned task; results are applied on
//! the UI loop, and only if they belong to the page that is still shown.

use std::future::Future;

use anyhow::Result;
use chrono::Utc;
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

use rollcall_core::api::{ApiClient, Backend, LoginResponse};
use rollcall_core::auth::{check_session, GuardOutcome, Role};
use rollcall_core::config::Config;
use rollcall_core::loader::{self, AttendanceData, DepartmentData, StudentDashboardData};
use rollcall_core::models::{Branch, Department, DepartmentWorkEntry, Event, SessionStudent, Student, StudentReport};
use rollcall_core::notify::Notice;
use rollcall_core::page::{PageScope, PageStatus, PageTicket};
use rollcall_core::pages::{
    AdminDashboardPage, AdminMenuItem, CreateEventPage, DepartmentWorkPage, EventsPage, LoginForm,
    MarkAttendancePage, Outcome, StudentDashboardPage, StudentReportPage, StudentsPage,
};
use rollcall_core::route::Route;
use rollcall_core::submit;

// ============================================================================
// Constants
// ============================================================================

/// Buffer size for the background task message channel.
const CHANNEL_BUFFER_SIZE: usize = 32;

/// Maximum length for free-text form fields.
const MAX_FIELD_LENGTH: usize = 100;

/// Number of items to scroll on page up/down.
pub const PAGE_SCROLL_SIZE: usize = 10;

/// Entries on the home screen.
pub const HOME_ITEMS: [(&str, Route); 2] = [
    ("Admin Login", Route::AdminLogin),
    ("Student Login", Route::StudentLogin),
];

// ============================================================================
// UI State Enums
// ============================================================================

/// Overall application state
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppState {
    Normal,
    Searching,
    ShowingHelp,
    ConfirmingDelete(PendingDelete),
    ConfirmingQuit,
    Quitting,
}

/// Something the user asked to delete, waiting for confirmation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingDelete {
    pub id: String,
    pub label: String,
}

/// Which part of the screen receives keys
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    List,
    Form,
    Branches,
    Students,
    History,
}

/// Page state for the current route.
pub enum Screen {
    Home,
    Login(LoginForm),
    AdminDashboard(AdminDashboardPage),
    /// Empty until the session check has identified the student.
    StudentDashboard(Option<StudentDashboardPage>),
    CreateEvent(CreateEventPage),
    ManageEvents(EventsPage),
    MarkAttendance(MarkAttendancePage),
    DepartmentWork(DepartmentWorkPage),
    Students(StudentsPage),
    StudentReport(StudentReportPage),
}

// ============================================================================
// Background Task Results
// ============================================================================

/// Results sent back from spawned tasks.
enum TaskResult {
    Guard(GuardOutcome),
    Login(Result<LoginResponse>),
    Visibility(Result<bool>),
    VisibilitySaved(Result<()>),
    StudentDashboard(Result<StudentDashboardData>),
    Events(Result<Vec<Event>>),
    EventCreated(Result<()>),
    EventDeleted(String, Result<()>),
    Attendance(Result<AttendanceData>),
    AttendanceSaved(Result<usize>),
    Department(Result<DepartmentData>),
    DepartmentSaved(Result<Vec<DepartmentWorkEntry>>),
    WorkDeleted(String, Result<()>),
    Roster(Result<Vec<Student>>),
    Report(Result<StudentReport>),
    ReportWorkDeleted(String, Result<()>),
}

/// A task result tagged with the page it was issued for.
struct TaskMessage {
    ticket: PageTicket,
    result: TaskResult,
}

// ============================================================================
// Main Application Struct
// ============================================================================

/// Main application state container
pub struct App {
    pub config: Config,
    api: ApiClient,

    pub route: Route,
    pub screen: Screen,
    scope: PageScope,

    // UI State
    pub state: AppState,
    pub focus: Focus,
    pub selection: usize,
    pub branch_selection: usize,
    pub form_field: usize,
    pub notice: Option<Notice>,

    // Background task channel
    task_rx: mpsc::Receiver<TaskMessage>,
    task_tx: mpsc::Sender<TaskMessage>,
}

impl App {
    /// Create a new application instance
    pub fn new() -> Result<Self> {
        let config = match Config::load() {
            Ok(c) => c,
            Err(e) => {
                warn!(error = %e, "Failed to load config, using defaults");
                Config::default()
            }
        };
        let base_url = config.backend_url()?;
        debug!(%base_url, "Backend configured");
        let api = ApiClient::new(&base_url)?;
        Ok(Self::with_client(config, api))
    }

    fn with_client(config: Config, api: ApiClient) -> Self {
        let (tx, rx) = mpsc::channel(CHANNEL_BUFFER_SIZE);
        Self {
            config,
            api,
            route: Route::Home,
            screen: Screen::Home,
            scope: PageScope::new(),
            state: AppState::Normal,
            focus: Focus::List,
            selection: 0,
            branch_selection: 0,
            form_field: 0,
            notice: None,
            task_rx: rx,
            task_tx: tx,
        }
    }

    // =========================================================================
    // Navigation
    // =========================================================================

    /// Show `route`. Any result still in flight for the previous page is
    /// dropped when it arrives.
    pub fn navigate(&mut self, route: Route) {
        info!(route = ?route, "Navigating");
        self.scope.enter();
        self.state = AppState::Normal;
        self.focus = default_focus(&route);
        self.selection = 0;
        self.branch_selection = 0;
        self.form_field = 0;
        self.screen = self.screen_for(&route);
        self.route = route;

        if let Some(role) = self.route.required_role() {
            let api = self.api.clone();
            self.spawn(async move { TaskResult::Guard(check_session(&api, role).await) });
        }
    }

    pub fn go_back(&mut self) {
        let parent = self.route.parent();
        if parent != self.route {
            self.navigate(parent);
        }
    }

    fn screen_for(&self, route: &Route) -> Screen {
        match route {
            Route::Home => Screen::Home,
            Route::AdminLogin => Screen::Login(LoginForm::new(Role::Admin, self.config.login_prefill(Role::Admin))),
            Route::StudentLogin => {
                Screen::Login(LoginForm::new(Role::Student, self.config.login_prefill(Role::Student)))
            }
            Route::AdminDashboard => Screen::AdminDashboard(AdminDashboardPage::new()),
            Route::StudentDashboard => Screen::StudentDashboard(None),
            Route::CreateEvent => Screen::CreateEvent(CreateEventPage::new()),
            Route::ManageEvents => Screen::ManageEvents(EventsPage::new()),
            Route::MarkAttendance(id) => Screen::MarkAttendance(MarkAttendancePage::new(id)),
            Route::DepartmentWork => Screen::DepartmentWork(DepartmentWorkPage::new()),
            Route::Students => Screen::Students(StudentsPage::new()),
            Route::StudentReport(id) => Screen::StudentReport(StudentReportPage::new(id)),
        }
    }

    /// Start the fetches for the current page once its session is confirmed.
    fn load_current_page(&mut self, student: Option<SessionStudent>) {
        if let Screen::StudentDashboard(slot) = &mut self.screen {
            match student {
                Some(student) => {
                    *slot = Some(StudentDashboardPage::new(student.clone()));
                    let api = self.api.clone();
                    self.spawn(async move {
                        TaskResult::StudentDashboard(loader::load_student_dashboard(&api, &student).await)
                    });
                }
                None => self.navigate(Route::StudentLogin),
            }
            return;
        }

        let api = self.api.clone();
        match &self.screen {
            Screen::AdminDashboard(_) => {
                self.spawn(async move { TaskResult::Visibility(loader::load_visibility(&api).await) });
            }
            Screen::ManageEvents(_) => {
                self.spawn(async move { TaskResult::Events(loader::load_events(&api).await) });
            }
            Screen::MarkAttendance(page) if page.status() != PageStatus::NotFound => {
                let event_id = page.event_id().to_string();
                self.spawn(async move { TaskResult::Attendance(loader::load_attendance(&api, &event_id).await) });
            }
            Screen::DepartmentWork(_) => {
                self.spawn(async move { TaskResult::Department(loader::load_department(&api).await) });
            }
            Screen::Students(_) => {
                self.spawn(async move { TaskResult::Roster(loader::load_roster(&api).await) });
            }
            Screen::StudentReport(page) if page.status() != PageStatus::NotFound => {
                let student_id = page.student_id().to_string();
                self.spawn(async move { TaskResult::Report(loader::load_report(&api, &student_id).await) });
            }
            _ => {}
        }
    }

    // =========================================================================
    // Background Tasks
    // =========================================================================

    /// Run `task` in the background, tagged with the current page ticket.
    fn spawn<F>(&self, task: F)
    where
        F: Future<Output = TaskResult> + Send + 'static,
    {
        let tx = self.task_tx.clone();
        let ticket = self.scope.current();
        tokio::spawn(async move {
            let result = task.await;
            if tx.send(TaskMessage { ticket, result }).await.is_err() {
                error!("Task result channel closed");
            }
        });
    }

    /// Check for completed background tasks and process results
    pub fn check_background_tasks(&mut self) {
        let mut messages = Vec::new();
        while let Ok(message) = self.task_rx.try_recv() {
            messages.push(message);
        }
        for message in messages {
            self.process_message(message);
        }
    }

    fn process_message(&mut self, message: TaskMessage) {
        if !self.scope.is_current(message.ticket) {
            debug!("Dropping result for a page that is no longer shown");
            return;
        }

        let result = match message.result {
            TaskResult::Guard(GuardOutcome::Allowed(student)) => {
                self.load_current_page(student);
                return;
            }
            TaskResult::Guard(GuardOutcome::RedirectToLogin(role)) => {
                self.navigate(Route::login_for(role));
                return;
            }
            other => other,
        };

        let outcome = match (result, &mut self.screen) {
            (TaskResult::Login(result), Screen::Login(form)) => {
                let outcome = form.on_response(result);
                if outcome.navigate.is_some() {
                    self.config.remember_login(form.role, form.id.trim());
                    if let Err(e) = self.config.save() {
                        warn!(error = %e, "Failed to save config");
                    }
                }
                outcome
            }
            (TaskResult::Visibility(result), Screen::AdminDashboard(page)) => page.on_visibility_loaded(result),
            (TaskResult::VisibilitySaved(result), Screen::AdminDashboard(page)) => page.on_visibility_saved(result),
            (TaskResult::StudentDashboard(result), Screen::StudentDashboard(Some(page))) => page.on_loaded(result),
            (TaskResult::Events(result), Screen::ManageEvents(page)) => page.on_loaded(result),
            (TaskResult::EventDeleted(id, result), Screen::ManageEvents(page)) => page.on_deleted(&id, result),
            (TaskResult::EventCreated(result), Screen::CreateEvent(page)) => page.on_submitted(result),
            (TaskResult::Attendance(result), Screen::MarkAttendance(page)) => page.on_loaded(result),
            (TaskResult::AttendanceSaved(result), Screen::MarkAttendance(page)) => page.on_submitted(result),
            (TaskResult::Department(result), Screen::DepartmentWork(page)) => page.on_loaded(result),
            (TaskResult::DepartmentSaved(result), Screen::DepartmentWork(page)) => page.on_submitted(result),
            (TaskResult::WorkDeleted(id, result), Screen::DepartmentWork(page)) => page.on_deleted(&id, result),
            (TaskResult::Roster(result), Screen::Students(page)) => page.on_loaded(result),
            (TaskResult::Report(result), Screen::StudentReport(page)) => page.on_loaded(result),
            (TaskResult::ReportWorkDeleted(description, result), Screen::StudentReport(page)) => {
                page.on_deleted(&description, result)
            }
            _ => {
                warn!("Task result does not match the current screen");
                return;
            }
        };

        self.apply(outcome);
    }

    fn apply(&mut self, outcome: Outcome) {
        if let Some(notice) = outcome.notice {
            self.notice = Some(notice);
        }
        if outcome.reload {
            self.load_current_page(None);
        }
        if let Some(route) = outcome.navigate {
            self.navigate(route);
        }
        self.clamp_selection();
    }

    // =========================================================================
    // Actions
    // =========================================================================

    pub fn submit_login(&mut self) {
        let request = match &mut self.screen {
            Screen::Login(form) => form.begin_submit().map(|creds| (form.role, creds)),
            _ => None,
        };
        let Some((role, (id, password))) = request else {
            return;
        };

        let api = self.api.clone();
        self.spawn(async move {
            let result = match role {
                Role::Admin => api.login_admin(&id, &password).await,
                Role::Student => api.login_student(&id, &password).await,
            };
            TaskResult::Login(result)
        });
    }

    /// Log out in the background and return to the home screen.
    pub fn logout(&mut self, role: Role) {
        let api = self.api.clone();
        tokio::spawn(async move {
            if let Err(e) = api.logout(role).await {
                warn!(role = role.title(), error = %e, "Logout request failed");
            }
        });
        self.notice = None;
        self.navigate(Route::Home);
    }

    pub fn toggle_visibility(&mut self) {
        let next = match &mut self.screen {
            Screen::AdminDashboard(page) => page.toggle_visibility(),
            _ => None,
        };
        if let Some(visible) = next {
            let api = self.api.clone();
            self.spawn(async move { TaskResult::VisibilitySaved(api.set_working_hours_visibility(visible).await) });
        }
    }

    /// Submit whatever the current page submits.
    pub fn submit(&mut self) {
        let api = self.api.clone();
        let now = Utc::now();
        match &mut self.screen {
            Screen::Login(_) => self.submit_login(),
            Screen::MarkAttendance(page) => {
                if let Some(batch) = page.begin_submit(now) {
                    self.spawn(async move {
                        TaskResult::AttendanceSaved(submit::submit_attendance(&api, &batch).await)
                    });
                }
            }
            Screen::DepartmentWork(page) => match page.begin_submit(now) {
                Ok(entries) => self.spawn(async move {
                    TaskResult::DepartmentSaved(submit::submit_department_work(&api, &entries).await)
                }),
                Err(notice) => self.notice = Some(notice),
            },
            Screen::CreateEvent(page) => match page.begin_submit(now) {
                Ok(event) => self.spawn(async move { TaskResult::EventCreated(api.create_event(&event).await) }),
                Err(notice) => self.notice = Some(notice),
            },
            _ => {}
        }
    }

    /// Ask for confirmation before deleting the selected item.
    pub fn request_delete(&mut self) {
        let pending = match &self.screen {
            Screen::ManageEvents(page) if self.focus == Focus::List => page
                .events()
                .get(self.selection)
                .map(|e| PendingDelete { id: e.id.clone(), label: e.name.clone() }),
            Screen::DepartmentWork(page) if self.focus == Focus::History => page
                .recent_history()
                .get(self.selection)
                .map(|w| PendingDelete { id: w.id.clone(), label: w.work_description.clone() }),
            Screen::StudentReport(page) => page
                .report()
                .and_then(|r| r.department_work.get(self.selection))
                .map(|w| PendingDelete { id: w.id.clone(), label: w.work_description.clone() }),
            _ => None,
        };
        if let Some(pending) = pending {
            self.state = AppState::ConfirmingDelete(pending);
        }
    }

    pub fn confirm_delete(&mut self) {
        let AppState::ConfirmingDelete(pending) = std::mem::replace(&mut self.state, AppState::Normal) else {
            return;
        };
        let api = self.api.clone();
        let PendingDelete { id, label } = pending;
        match &self.screen {
            Screen::ManageEvents(_) => self.spawn(async move {
                let result = api.delete_event(&id).await;
                TaskResult::EventDeleted(id, result)
            }),
            Screen::DepartmentWork(_) => self.spawn(async move {
                let result = api.delete_department_work(&id).await;
                TaskResult::WorkDeleted(id, result)
            }),
            Screen::StudentReport(_) => self.spawn(async move {
                let result = api.delete_department_work(&id).await;
                TaskResult::ReportWorkDeleted(label, result)
            }),
            _ => {}
        }
    }

    /// Enter on a list item.
    pub fn activate(&mut self) {
        let target = match &self.screen {
            Screen::Home => HOME_ITEMS.get(self.selection).map(|(_, route)| route.clone()),
            Screen::AdminDashboard(_) => AdminMenuItem::ALL.get(self.selection).map(|m| m.route()),
            Screen::ManageEvents(page) => page.open(self.selection),
            Screen::Students(page) if self.focus == Focus::Students => page.open(self.selection),
            _ => None,
        };
        if let Some(route) = target {
            self.navigate(route);
            return;
        }

        if self.focus == Focus::Branches {
            self.choose_branch();
        }
    }

    fn choose_branch(&mut self) {
        let Some(&branch) = Branch::ALL.get(self.branch_selection) else {
            return;
        };
        match &mut self.screen {
            Screen::MarkAttendance(page) => page.select_branch(branch),
            Screen::DepartmentWork(page) => page.select_branch(branch),
            Screen::Students(page) => page.select_branch(branch),
            _ => return,
        }
        self.focus = Focus::Students;
        self.selection = 0;
    }

    /// Space on a student row.
    pub fn toggle_selected_student(&mut self) {
        let index = self.selection;
        match &mut self.screen {
            Screen::MarkAttendance(page) => {
                let id = page.visible_students().get(index).map(|s| s.id.clone());
                if let Some(id) = id {
                    page.toggle(&id);
                }
            }
            Screen::DepartmentWork(page) => {
                let id = page.visible_students().get(index).map(|s| s.id.clone());
                if let Some(id) = id {
                    page.toggle(&id);
                }
            }
            _ => {}
        }
    }

    pub fn toggle_branch(&mut self) {
        match &mut self.screen {
            Screen::MarkAttendance(page) => {
                page.toggle_branch();
            }
            Screen::DepartmentWork(page) => {
                page.toggle_branch();
            }
            _ => {}
        }
    }

    // =========================================================================
    // Focus and Selection
    // =========================================================================

    fn focus_order(&self) -> &'static [Focus] {
        match self.screen {
            Screen::MarkAttendance(_) | Screen::Students(_) => &[Focus::Branches, Focus::Students],
            Screen::DepartmentWork(_) => &[Focus::Form, Focus::Branches, Focus::Students, Focus::History],
            Screen::Login(_) | Screen::CreateEvent(_) => &[Focus::Form],
            _ => &[Focus::List],
        }
    }

    pub fn cycle_focus(&mut self) {
        let order = self.focus_order();
        let idx = order.iter().position(|f| *f == self.focus).unwrap_or(0);
        self.focus = order[(idx + 1) % order.len()];
        self.selection = 0;
    }

    /// Length of the list that currently has focus.
    pub fn list_len(&self) -> usize {
        match (self.focus, &self.screen) {
            (Focus::Branches, _) => Branch::ALL.len(),
            (Focus::Students, Screen::MarkAttendance(page)) => page.visible_students().len(),
            (Focus::Students, Screen::DepartmentWork(page)) => page.visible_students().len(),
            (Focus::Students, Screen::Students(page)) => page.visible_students().len(),
            (Focus::History, Screen::DepartmentWork(page)) => page.recent_history().len(),
            (Focus::List, Screen::Home) => HOME_ITEMS.len(),
            (Focus::List, Screen::AdminDashboard(_)) => AdminMenuItem::ALL.len(),
            (Focus::List, Screen::ManageEvents(page)) => page.events().len(),
            (Focus::List, Screen::StudentReport(page)) => {
                page.report().map(|r| r.department_work.len()).unwrap_or(0)
            }
            (Focus::Form, _) => self.form_len(),
            _ => 0,
        }
    }

    fn form_len(&self) -> usize {
        match self.screen {
            Screen::CreateEvent(_) => 4,
            Screen::DepartmentWork(_) => 3,
            _ => 0,
        }
    }

    /// Move the cursor of the focused list by `delta`, clamped to its bounds.
    pub fn move_selection(&mut self, delta: isize) {
        let len = self.list_len();
        if len == 0 {
            return;
        }
        let cursor = match self.focus {
            Focus::Branches => &mut self.branch_selection,
            Focus::Form => &mut self.form_field,
            _ => &mut self.selection,
        };
        *cursor = step(*cursor, delta, len);
    }

    fn clamp_selection(&mut self) {
        if self.focus == Focus::Form || self.focus == Focus::Branches {
            return;
        }
        let len = self.list_len();
        if self.selection >= len {
            self.selection = len.saturating_sub(1);
        }
    }

    // =========================================================================
    // Text Entry
    // =========================================================================

    /// The text field that currently receives typed characters.
    fn text_field_mut(&mut self) -> Option<&mut String> {
        if self.state == AppState::Searching {
            return match &mut self.screen {
                Screen::MarkAttendance(page) => Some(&mut page.query),
                Screen::DepartmentWork(page) => Some(&mut page.query),
                Screen::Students(page) => Some(&mut page.query),
                _ => None,
            };
        }
        if self.focus != Focus::Form {
            return None;
        }
        match (&mut self.screen, self.form_field) {
            (Screen::CreateEvent(page), 0) => Some(&mut page.form.name),
            (Screen::CreateEvent(page), 1) => Some(&mut page.form.location),
            (Screen::CreateEvent(page), 2) => Some(&mut page.form.date),
            (Screen::CreateEvent(page), 3) => Some(&mut page.form.hours),
            (Screen::DepartmentWork(page), 0) => Some(&mut page.form.description),
            (Screen::DepartmentWork(page), 2) => Some(&mut page.form.hours),
            _ => None,
        }
    }

    /// Whether typed characters go into a field rather than being shortcuts.
    pub fn is_typing(&self) -> bool {
        if self.state == AppState::Searching {
            return true;
        }
        match (&self.screen, self.focus) {
            (Screen::Login(_), _) => true,
            (Screen::CreateEvent(_), Focus::Form) => true,
            (Screen::DepartmentWork(_), Focus::Form) => self.form_field != 1,
            _ => false,
        }
    }

    pub fn type_char(&mut self, c: char) {
        if let Screen::Login(form) = &mut self.screen {
            form.push_char(c);
            return;
        }
        if let Some(field) = self.text_field_mut() {
            if can_add_field_char(field.chars().count(), c) {
                field.push(c);
            }
        }
        if self.state == AppState::Searching {
            self.selection = 0;
        }
    }

    pub fn backspace(&mut self) {
        if let Screen::Login(form) = &mut self.screen {
            form.pop_char();
            return;
        }
        if let Some(field) = self.text_field_mut() {
            field.pop();
        }
    }

    /// Left/right on the department picker.
    pub fn cycle_department(&mut self, forward: bool) {
        if let (Screen::DepartmentWork(page), Focus::Form, 1) = (&mut self.screen, self.focus, self.form_field) {
            page.form.department = Some(match (page.form.department, forward) {
                (None, _) => Department::ALL[0],
                (Some(d), true) => d.next(),
                (Some(d), false) => d.prev(),
            });
        }
    }

    pub fn start_search(&mut self) {
        if matches!(self.screen, Screen::MarkAttendance(_) | Screen::DepartmentWork(_) | Screen::Students(_)) {
            self.state = AppState::Searching;
            self.focus = Focus::Students;
            self.selection = 0;
        }
    }

    pub fn clear_search(&mut self) {
        if let Some(query) = self.text_field_mut() {
            query.clear();
        }
        self.state = AppState::Normal;
        self.selection = 0;
    }

    /// Role whose logout applies to the current screen.
    pub fn logged_in_role(&self) -> Option<Role> {
        self.route.required_role()
    }
}

fn default_focus(route: &Route) -> Focus {
    match route {
        Route::AdminLogin | Route::StudentLogin | Route::CreateEvent | Route::DepartmentWork => Focus::Form,
        Route::MarkAttendance(_) | Route::Students => Focus::Branches,
        _ => Focus::List,
    }
}

fn step(cursor: usize, delta: isize, len: usize) -> usize {
    let max = len.saturating_sub(1) as isize;
    (cursor as isize + delta).clamp(0, max) as usize
}

// ============================================================================
// Input validation helpers (exported for use in input.rs)
// ============================================================================

/// Check if a form character should be accepted
pub fn can_add_field_char(current_len: usize, c: char) -> bool {
    current_len < MAX_FIELD_LENGTH && !c.is_control()
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn app() -> App {
        let api = ApiClient::new("http://127.0.0.1:9").unwrap();
        App::with_client(Config::default(), api)
    }

    #[test]
    fn test_can_add_field_char() {
        assert!(can_add_field_char(0, 'a'));
        assert!(can_add_field_char(99, '.'));
        assert!(!can_add_field_char(100, 'a'));
        assert!(!can_add_field_char(0, '\n'));
    }

    #[test]
    fn test_step_clamps() {
        assert_eq!(step(0, -1, 5), 0);
        assert_eq!(step(3, 1, 5), 4);
        assert_eq!(step(4, 1, 5), 4);
        assert_eq!(step(2, 10, 5), 4);
    }

    #[tokio::test]
    async fn test_stale_results_are_dropped() {
        let mut app = app();
        app.navigate(Route::Students);
        let stale = app.scope.current();

        app.navigate(Route::ManageEvents);
        app.process_message(TaskMessage {
            ticket: stale,
            result: TaskResult::Guard(GuardOutcome::RedirectToLogin(Role::Admin)),
        });

        assert_eq!(app.route, Route::ManageEvents);
    }

    #[tokio::test]
    async fn test_current_results_are_applied() {
        let mut app = app();
        app.navigate(Route::ManageEvents);
        let ticket = app.scope.current();

        app.process_message(TaskMessage {
            ticket,
            result: TaskResult::Events(Ok(vec![Event {
                id: "e1".to_string(),
                name: "Orientation".to_string(),
                location: "Hall A".to_string(),
                date: "2025-03-01".to_string(),
                working_hours: 2.0,
            }])),
        });

        assert_eq!(app.list_len(), 1);
        app.activate();
        assert_eq!(app.route, Route::MarkAttendance("e1".to_string()));
    }

    #[tokio::test]
    async fn test_attendance_submits_with_nobody_selected() {
        let mut app = app();
        app.navigate(Route::MarkAttendance("e1".to_string()));
        let ticket = app.scope.current();
        let event = Event {
            id: "e1".to_string(),
            name: "Orientation".to_string(),
            location: "Hall A".to_string(),
            date: "2025-03-01".to_string(),
            working_hours: 2.0,
        };
        let roster = vec![Student {
            id: "s1".to_string(),
            student_id: "CSE001".to_string(),
            name: "Asha".to_string(),
            branch: Branch::Cse,
        }];
        app.process_message(TaskMessage {
            ticket,
            result: TaskResult::Attendance(Ok(AttendanceData { event, roster, records: Vec::new() })),
        });

        app.submit();
        assert!(app.notice.is_none());
        match &app.screen {
            Screen::MarkAttendance(page) => assert_eq!(page.status(), PageStatus::Submitting),
            _ => panic!("expected attendance screen"),
        }
    }

    #[tokio::test]
    async fn test_failed_guard_redirects_to_login() {
        let mut app = app();
        app.navigate(Route::DepartmentWork);
        let ticket = app.scope.current();
        app.process_message(TaskMessage {
            ticket,
            result: TaskResult::Guard(GuardOutcome::RedirectToLogin(Role::Admin)),
        });
        assert_eq!(app.route, Route::AdminLogin);
        assert!(matches!(app.screen, Screen::Login(_)));
    }

    #[tokio::test]
    async fn test_focus_cycles_on_department_page() {
        let mut app = app();
        app.navigate(Route::DepartmentWork);
        assert_eq!(app.focus, Focus::Form);
        app.cycle_focus();
        assert_eq!(app.focus, Focus::Branches);
        app.cycle_focus();
        app.cycle_focus();
        assert_eq!(app.focus, Focus::History);
        app.cycle_focus();
        assert_eq!(app.focus, Focus::Form);
    }

    #[tokio::test]
    async fn test_department_picker_cycles() {
        let mut app = app();
        app.navigate(Route::DepartmentWork);
        app.form_field = 1;
        app.cycle_department(true);
        app.cycle_department(true);
        if let Screen::DepartmentWork(page) = &app.screen {
            assert_eq!(page.form.department, Some(Department::SocialMedia));
        } else {
            panic!("expected department screen");
        }
    }
}
