use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use rollcall_core::page::PageStatus;
use rollcall_core::pages::MarkAttendancePage;
use rollcall_core::utils::format_hours;

use super::{render_branch_list, render_status_placeholder, render_student_table};
use crate::app::App;
use crate::ui::styles;

pub fn render(frame: &mut Frame, app: &App, page: &MarkAttendancePage, area: Rect) {
    if render_status_placeholder(frame, page.status(), "event", area) {
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(4), Constraint::Min(8)])
        .split(area);

    render_header(frame, page, chunks[0]);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(36), Constraint::Min(30)])
        .split(chunks[1]);

    render_branch_list(frame, app, body[0], page.branch, |branch| {
        let count = page.branch_count(branch);
        let done = if page.completed_branches().contains(&branch) { " ✓" } else { "" };
        (format!("{:>3}/{:<3}{}", count.selected, count.total, done), count.is_complete())
    });

    let students = page.visible_students();
    let title = match page.branch {
        Some(branch) => format!("{} ({} of {} present)", branch, page.branch_count(branch).selected, page.branch_count(branch).total),
        None => "Choose a branch".to_string(),
    };
    render_student_table(frame, app, body[1], title, &students, Some(page.selection()));
}

fn render_header(frame: &mut Frame, page: &MarkAttendancePage, area: Rect) {
    let mut lines = Vec::new();
    if let Some(event) = page.event() {
        lines.push(Line::from(vec![
            Span::styled(format!(" {}", event.name), styles::title_style()),
            Span::styled(
                format!(
                    "  {} · {} · {}h",
                    event.formatted_date(),
                    event.location,
                    format_hours(event.working_hours)
                ),
                styles::muted_style(),
            ),
        ]));
    }

    let action = match page.status() {
        PageStatus::Submitting => Span::styled("Saving attendance...", styles::highlight_style()),
        _ => Span::styled("[s] submit", styles::help_key_style()),
    };
    lines.push(Line::from(vec![
        Span::styled(format!(" Selected: {}  ", page.total_selected()), styles::list_item_style()),
        action,
        Span::styled("   [space] toggle [a] whole branch [/] search", styles::muted_style()),
    ]));

    let block = Block::default()
        .title(" Mark Attendance ")
        .title_style(styles::muted_style())
        .borders(Borders::ALL)
        .border_style(styles::muted_style());
    frame.render_widget(Paragraph::new(lines).block(block), area);
}
