use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
    Frame,
};

use rollcall_core::models::{DepartmentWorkEntry, Event};
use rollcall_core::pages::{StudentReportPage, StudentsPage};
use rollcall_core::utils::{format_date, format_hours, truncate_string};

use super::{render_branch_list, render_status_placeholder, render_student_table};
use crate::app::App;
use crate::ui::styles;

/// Roster by branch; Enter opens a student's report.
pub fn render_students(frame: &mut Frame, app: &App, page: &StudentsPage, area: Rect) {
    if render_status_placeholder(frame, page.status(), "students", area) {
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(36), Constraint::Min(30)])
        .split(area);

    render_branch_list(frame, app, chunks[0], page.branch, |branch| {
        (format!("{:>4}", page.branch_total(branch)), false)
    });

    let students = page.visible_students();
    let title = match page.branch {
        Some(branch) => format!("{} ({}) - [Enter] report", branch, students.len()),
        None => "Choose a branch".to_string(),
    };
    render_student_table(frame, app, chunks[1], title, &students, None);
}

pub fn render_report(frame: &mut Frame, app: &App, page: &StudentReportPage, area: Rect) {
    let Some(report) = page.report() else {
        render_status_placeholder(frame, page.status(), "student", area);
        return;
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(4), Constraint::Min(8)])
        .split(area);

    let student = &report.student;
    let lines = vec![
        Line::from(vec![
            Span::styled(format!(" {}", student.name), styles::title_style()),
            Span::styled(
                format!("  {} · {}", student.student_id, student.branch),
                styles::muted_style(),
            ),
        ]),
        Line::from(vec![
            Span::styled(" Total working hours: ", styles::muted_style()),
            Span::styled(format_hours(page.total_working_hours()), styles::highlight_style()),
            Span::styled(
                format!(
                    "   ({} events, {} department entries)",
                    report.events.len(),
                    report.department_work.len()
                ),
                styles::muted_style(),
            ),
        ]),
    ];
    let block = Block::default()
        .title(" Student Report ")
        .title_style(styles::muted_style())
        .borders(Borders::ALL)
        .border_style(styles::muted_style());
    frame.render_widget(Paragraph::new(lines).block(block), chunks[0]);

    render_record(
        frame,
        chunks[1],
        &report.events,
        &report.department_work,
        Some(app.selection),
    );
}

/// Attended events beside department work. With `selected`, the work table
/// has a cursor for deleting entries.
pub(super) fn render_record(
    frame: &mut Frame,
    area: Rect,
    events: &[Event],
    work: &[DepartmentWorkEntry],
    selected: Option<usize>,
) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    let event_rows: Vec<Row> = events
        .iter()
        .map(|event| {
            Row::new(vec![
                Cell::from(truncate_string(&event.name, 30)),
                Cell::from(event.formatted_date()),
                Cell::from(format!("{:>5}", format_hours(event.working_hours))),
            ])
            .style(styles::list_item_style())
        })
        .collect();

    let events_table = Table::new(
        event_rows,
        [Constraint::Fill(1), Constraint::Length(13), Constraint::Length(5)],
    )
    .header(Row::new(vec!["Event", "Date", "Hours"]).style(styles::title_style()))
    .block(
        Block::default()
            .title(format!(" Events Attended ({}) ", events.len()))
            .title_style(styles::muted_style())
            .borders(Borders::ALL)
            .border_style(styles::muted_style()),
    );
    frame.render_widget(events_table, chunks[0]);

    let work_rows: Vec<Row> = work
        .iter()
        .map(|entry| {
            Row::new(vec![
                Cell::from(format_date(&entry.date)),
                Cell::from(entry.department.label()),
                Cell::from(truncate_string(&entry.work_description, 28)),
                Cell::from(format!("{:>5}", format_hours(entry.working_hours))),
            ])
            .style(styles::list_item_style())
        })
        .collect();

    let title = if selected.is_some() {
        format!(" Department Work ({}) - [d]elete ", work.len())
    } else {
        format!(" Department Work ({}) ", work.len())
    };

    let work_table = Table::new(
        work_rows,
        [
            Constraint::Length(10),
            Constraint::Length(13),
            Constraint::Fill(1),
            Constraint::Length(5),
        ],
    )
    .header(Row::new(vec!["Date", "Department", "Work", "Hours"]).style(styles::title_style()))
    .block(
        Block::default()
            .title(title)
            .title_style(styles::muted_style())
            .borders(Borders::ALL)
            .border_style(styles::border_style(selected.is_some())),
    )
    .row_highlight_style(styles::selected_style());

    let mut state = TableState::default();
    if !work.is_empty() {
        state.select(selected);
    }
    frame.render_stateful_widget(work_table, chunks[1], &mut state);
}
