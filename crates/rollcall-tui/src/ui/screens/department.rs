use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
    Frame,
};

use rollcall_core::page::PageStatus;
use rollcall_core::pages::{DepartmentWorkPage, HISTORY_LIMIT};
use rollcall_core::utils::{format_date, format_hours, truncate_string};

use super::{form_line, render_branch_list, render_status_placeholder, render_student_table};
use crate::app::{App, Focus};
use crate::ui::styles;

pub fn render(frame: &mut Frame, app: &App, page: &DepartmentWorkPage, area: Rect) {
    if render_status_placeholder(frame, page.status(), "department data", area) {
        return;
    }

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(9), Constraint::Min(8)])
        .split(area);

    let top = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
        .split(rows[0]);

    render_form(frame, app, page, top[0]);
    render_history(frame, app, page, top[1]);

    let bottom = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(36), Constraint::Min(30)])
        .split(rows[1]);

    render_branch_list(frame, app, bottom[0], page.branch, |branch| {
        let count = page.branch_count(branch);
        (format!("{:>3}/{:<3}", count.selected, count.total), count.is_complete())
    });

    let students = page.visible_students();
    let title = match page.branch {
        Some(branch) => format!("{} - {} selected in total", branch, page.total_selected()),
        None => "Choose a branch".to_string(),
    };
    render_student_table(frame, app, bottom[1], title, &students, Some(page.selection()));
}

fn render_form(frame: &mut Frame, app: &App, page: &DepartmentWorkPage, area: Rect) {
    let focused = app.focus == Focus::Form;
    let form = &page.form;
    let department = match form.department {
        Some(d) => format!("◀ {} ▶", d.label()),
        None => "◀ choose ▶".to_string(),
    };

    let mut lines = vec![
        form_line("Description", form.description.clone(), focused && app.form_field == 0),
        form_line("Department", department, focused && app.form_field == 1),
        form_line("Hours", form.hours.clone(), focused && app.form_field == 2),
        Line::from(""),
    ];

    let status = match page.status() {
        PageStatus::Submitting => Span::styled("  Saving...", styles::highlight_style()),
        _ => Span::styled(
            format!("  {} students selected  [Enter] submit", page.total_selected()),
            styles::muted_style(),
        ),
    };
    lines.push(Line::from(status));

    let block = Block::default()
        .title(" Record Department Work ")
        .title_style(styles::muted_style())
        .borders(Borders::ALL)
        .border_style(styles::border_style(focused));
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_history(frame: &mut Frame, app: &App, page: &DepartmentWorkPage, area: Rect) {
    let focused = app.focus == Focus::History;
    let history = page.recent_history();

    let rows: Vec<Row> = history
        .iter()
        .map(|work| {
            Row::new(vec![
                Cell::from(format_date(&work.date)),
                Cell::from(work.department.label()),
                Cell::from(truncate_string(&work.work_description, 28)),
                Cell::from(truncate_string(&work.student_name, 20)),
                Cell::from(format!("{:>5}", format_hours(work.working_hours))),
            ])
            .style(styles::list_item_style())
        })
        .collect();

    let widths = [
        Constraint::Length(10),
        Constraint::Length(13),
        Constraint::Fill(3),
        Constraint::Fill(2),
        Constraint::Length(5),
    ];

    let title = format!(
        " Recent ({} of {}, last {}) - [d]elete ",
        history.len(),
        page.history_len(),
        HISTORY_LIMIT
    );

    let table = Table::new(rows, widths)
        .block(
            Block::default()
                .title(title)
                .title_style(styles::muted_style())
                .borders(Borders::ALL)
                .border_style(styles::border_style(focused)),
        )
        .row_highlight_style(styles::selected_style());

    let mut state = TableState::default();
    if focused && !history.is_empty() {
        state.select(Some(app.selection));
    }
    frame.render_stateful_widget(table, area, &mut state);
}
