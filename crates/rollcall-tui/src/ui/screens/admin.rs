use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, List, ListItem, ListState, Paragraph, Row, Table, TableState},
    Frame,
};

use rollcall_core::pages::{AdminDashboardPage, AdminMenuItem, CreateEventPage, EventsPage};
use rollcall_core::utils::{format_hours, truncate_string};

use super::{form_line, render_status_placeholder};
use crate::app::{App, Focus};
use crate::ui::styles;

/// Admin menu with the working-hours visibility switch underneath.
pub fn render_dashboard(frame: &mut Frame, app: &App, page: &AdminDashboardPage, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(6), Constraint::Length(4)])
        .split(area);

    let items: Vec<ListItem> = AdminMenuItem::ALL
        .iter()
        .map(|item| ListItem::new(format!("  {}", item.title())).style(styles::list_item_style()))
        .collect();

    let list = List::new(items)
        .block(
            Block::default()
                .title(" Admin Dashboard ")
                .title_style(styles::muted_style())
                .borders(Borders::ALL)
                .border_style(styles::border_style(app.focus == Focus::List)),
        )
        .highlight_style(styles::selected_style())
        .highlight_symbol("▶");

    let mut state = ListState::default();
    state.select(Some(app.selection));
    frame.render_stateful_widget(list, chunks[0], &mut state);

    let (value, style) = match page.hours_visible() {
        Some(true) => ("VISIBLE", styles::success_style()),
        Some(false) => ("HIDDEN", styles::error_style()),
        None => ("...", styles::muted_style()),
    };
    let saving = if page.is_saving() { "  (saving)" } else { "" };
    let lines = vec![
        Line::from(vec![
            Span::styled("  Working hours for students: ", styles::muted_style()),
            Span::styled(value, style),
            Span::styled(saving, styles::muted_style()),
        ]),
        Line::from(Span::styled("  [v] toggle  [l] logout", styles::muted_style())),
    ];
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(styles::muted_style());
    frame.render_widget(Paragraph::new(lines).block(block), chunks[1]);
}

pub fn render_create_event(frame: &mut Frame, app: &App, page: &CreateEventPage, area: Rect) {
    let form = &page.form;
    let fields = [
        ("Event name", form.name.clone()),
        ("Location", form.location.clone()),
        ("Date", form.date.clone()),
        ("Working hours", form.hours.clone()),
    ];

    let mut lines = vec![Line::from("")];
    for (i, (label, value)) in fields.into_iter().enumerate() {
        lines.push(form_line(label, value, app.focus == Focus::Form && app.form_field == i));
        lines.push(Line::from(""));
    }
    lines.push(Line::from(Span::styled(
        "  Date format: YYYY-MM-DD",
        styles::muted_style(),
    )));
    lines.push(Line::from(""));
    if page.is_submitting() {
        lines.push(Line::from(Span::styled("  Creating event...", styles::muted_style())));
    } else {
        lines.push(Line::from(Span::styled(
            "  [Enter] create  [↑/↓] field  [Esc] back",
            styles::muted_style(),
        )));
    }

    let block = Block::default()
        .title(" Create Event ")
        .title_style(styles::muted_style())
        .borders(Borders::ALL)
        .border_style(styles::border_style(true));
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

/// Event list; Enter opens attendance marking for the selected event.
pub fn render_events(frame: &mut Frame, app: &App, page: &EventsPage, area: Rect) {
    if render_status_placeholder(frame, page.status(), "events", area) {
        return;
    }

    let rows: Vec<Row> = page
        .events()
        .iter()
        .map(|event| {
            Row::new(vec![
                Cell::from(truncate_string(&event.name, 40)),
                Cell::from(truncate_string(&event.location, 24)),
                Cell::from(event.formatted_date()),
                Cell::from(format!("{:>6}", format_hours(event.working_hours))),
            ])
            .style(styles::list_item_style())
        })
        .collect();

    let header = Row::new(vec!["Event", "Location", "Date", " Hours"])
        .style(styles::title_style())
        .height(1);

    let widths = [
        Constraint::Fill(3),
        Constraint::Fill(2),
        Constraint::Length(14),
        Constraint::Length(7),
    ];

    let title = format!(
        " Events ({}) - [Enter] mark attendance [n]ew [d]elete ",
        page.events().len()
    );

    let table = Table::new(rows, widths)
        .header(header)
        .block(
            Block::default()
                .title(title)
                .title_style(styles::muted_style())
                .borders(Borders::ALL)
                .border_style(styles::border_style(true)),
        )
        .row_highlight_style(styles::selected_style());

    let mut state = TableState::default();
    if !page.events().is_empty() {
        state.select(Some(app.selection));
    }
    frame.render_stateful_widget(table, area, &mut state);
}
