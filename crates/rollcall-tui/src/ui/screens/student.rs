use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use rollcall_core::page::PageStatus;
use rollcall_core::pages::StudentDashboardPage;
use rollcall_core::utils::format_hours;

use super::render_status_placeholder;
use super::students::render_record;
use crate::ui::styles;

/// The logged-in student's own view. Empty until the session check returns.
pub fn render(frame: &mut Frame, page: Option<&StudentDashboardPage>, area: Rect) {
    let Some(page) = page else {
        render_status_placeholder(frame, PageStatus::Loading, "your session", area);
        return;
    };
    if render_status_placeholder(frame, page.status(), "your attendance", area) {
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(4), Constraint::Min(8)])
        .split(area);

    let student = page.student();
    let mut details = Vec::new();
    if let Some(ref id) = student.student_id {
        details.push(id.clone());
    }
    if let Some(ref branch) = student.branch {
        details.push(branch.clone());
    }

    let hours = match page.visible_total_hours() {
        Some(total) => Span::styled(format_hours(total), styles::highlight_style()),
        None => Span::styled("hidden", styles::muted_style()),
    };

    let lines = vec![
        Line::from(vec![
            Span::styled(format!(" Welcome, {}", student.name), styles::title_style()),
            Span::styled(format!("  {}", details.join(" · ")), styles::muted_style()),
        ]),
        Line::from(vec![
            Span::styled(" Total working hours: ", styles::muted_style()),
            hours,
            Span::styled("   [l] logout", styles::muted_style()),
        ]),
    ];
    let block = Block::default()
        .title(" My Attendance ")
        .title_style(styles::muted_style())
        .borders(Borders::ALL)
        .border_style(styles::muted_style());
    frame.render_widget(Paragraph::new(lines).block(block), chunks[0]);

    let record = page.record();
    render_record(frame, chunks[1], &record.events, &record.department_work, None);
}
