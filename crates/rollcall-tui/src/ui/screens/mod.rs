//! Per-route content rendering, plus the branch and student widgets shared
//! by the attendance, department and students screens.

mod admin;
mod attendance;
mod department;
mod home;
mod student;
mod students;

use ratatui::{
    layout::{Alignment, Constraint, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, List, ListItem, ListState, Paragraph, Row, Table, TableState},
    Frame,
};

use rollcall_core::models::{Branch, Student};
use rollcall_core::page::PageStatus;
use rollcall_core::selection::SelectionState;
use rollcall_core::utils::truncate_string;

use crate::app::{App, AppState, Focus, Screen};
use crate::ui::styles;

/// Render the content area for the current screen.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    match &app.screen {
        Screen::Home => home::render_home(frame, app, area),
        Screen::Login(form) => home::render_login(frame, form, area),
        Screen::AdminDashboard(page) => admin::render_dashboard(frame, app, page, area),
        Screen::CreateEvent(page) => admin::render_create_event(frame, app, page, area),
        Screen::ManageEvents(page) => admin::render_events(frame, app, page, area),
        Screen::MarkAttendance(page) => attendance::render(frame, app, page, area),
        Screen::DepartmentWork(page) => department::render(frame, app, page, area),
        Screen::Students(page) => students::render_students(frame, app, page, area),
        Screen::StudentReport(page) => students::render_report(frame, app, page, area),
        Screen::StudentDashboard(page) => student::render(frame, page.as_ref(), area),
    }
}

/// Placeholder shown while a page is loading or when its id is missing.
/// Returns false once the page is ready and should draw its real content.
fn render_status_placeholder(frame: &mut Frame, status: PageStatus, what: &str, area: Rect) -> bool {
    let text = match status {
        PageStatus::Loading => format!("Loading {}...", what),
        PageStatus::NotFound => format!("No {} selected.", what),
        PageStatus::Ready | PageStatus::Submitting => return false,
    };
    let paragraph = Paragraph::new(Line::from(Span::styled(text, styles::muted_style())))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).border_style(styles::muted_style()));
    frame.render_widget(paragraph, area);
    true
}

/// Branch picker. `label` renders the per-branch count column.
fn render_branch_list<F>(
    frame: &mut Frame,
    app: &App,
    area: Rect,
    active: Option<Branch>,
    label: F,
) where
    F: Fn(Branch) -> (String, bool),
{
    let focused = app.focus == Focus::Branches;

    let items: Vec<ListItem> = Branch::ALL
        .iter()
        .map(|&branch| {
            let (count, complete) = label(branch);
            let marker = if Some(branch) == active { "▸ " } else { "  " };
            let count_style = if complete {
                styles::success_style()
            } else {
                styles::muted_style()
            };
            ListItem::new(Line::from(vec![
                Span::styled(marker, styles::highlight_style()),
                Span::styled(format!("{:<24}", branch.label()), styles::list_item_style()),
                Span::styled(count, count_style),
            ]))
        })
        .collect();

    let list = List::new(items)
        .block(
            Block::default()
                .title(" Branches ")
                .title_style(styles::muted_style())
                .borders(Borders::ALL)
                .border_style(styles::border_style(focused)),
        )
        .highlight_style(styles::selected_style());

    let mut state = ListState::default();
    if focused {
        state.select(Some(app.branch_selection));
    }
    frame.render_stateful_widget(list, area, &mut state);
}

/// Student table. With a selection, each row gets a checkbox.
fn render_student_table(
    frame: &mut Frame,
    app: &App,
    area: Rect,
    title: String,
    students: &[&Student],
    selection: Option<&SelectionState>,
) {
    let focused = app.focus == Focus::Students;

    let rows: Vec<Row> = students
        .iter()
        .map(|student| {
            let checked = selection.map(|s| s.is_selected(&student.id));
            let (mark, style) = match checked {
                Some(true) => ("[x]", styles::checked_style()),
                Some(false) => ("[ ]", styles::list_item_style()),
                None => ("", styles::list_item_style()),
            };
            Row::new(vec![
                Cell::from(mark),
                Cell::from(truncate_string(&student.name, 32)),
                Cell::from(student.student_id.clone()),
                Cell::from(student.branch.label()),
            ])
            .style(style)
        })
        .collect();

    let header = Row::new(vec!["", "Name", "Student ID", "Branch"])
        .style(styles::title_style())
        .height(1);

    let widths = [
        Constraint::Length(if selection.is_some() { 4 } else { 0 }),
        Constraint::Fill(3),
        Constraint::Fill(2),
        Constraint::Fill(2),
    ];

    let title = match (&app.state, search_query(app)) {
        (AppState::Searching, Some(q)) => format!(" {} - /{}▌ ", title, q),
        (_, Some(q)) if !q.is_empty() => format!(" {} - \"{}\" ", title, q),
        _ => format!(" {} ", title),
    };
    let title_style = if app.state == AppState::Searching {
        styles::search_style()
    } else {
        styles::muted_style()
    };

    let table = Table::new(rows, widths)
        .header(header)
        .block(
            Block::default()
                .title(title)
                .title_style(title_style)
                .borders(Borders::ALL)
                .border_style(styles::border_style(focused)),
        )
        .row_highlight_style(styles::selected_style());

    let mut state = TableState::default();
    if focused && !students.is_empty() {
        state.select(Some(app.selection));
    }
    frame.render_stateful_widget(table, area, &mut state);
}

/// Search text of the current screen, if it has one.
fn search_query(app: &App) -> Option<&str> {
    match &app.screen {
        Screen::MarkAttendance(page) => Some(&page.query),
        Screen::DepartmentWork(page) => Some(&page.query),
        Screen::Students(page) => Some(&page.query),
        _ => None,
    }
}

/// One labelled input line of a form.
fn form_line(label: &str, value: String, focused: bool) -> Line<'static> {
    let cursor = if focused { "▌" } else { "" };
    let style = if focused {
        styles::selected_style()
    } else {
        styles::list_item_style()
    };
    Line::from(vec![
        Span::styled(format!("  {:<14}", label), styles::muted_style()),
        Span::styled(format!("{}{}", value, cursor), style),
    ])
}
