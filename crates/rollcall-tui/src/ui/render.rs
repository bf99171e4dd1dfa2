use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::app::{App, AppState, Screen};

use super::screens;
use super::styles;

pub fn render(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title bar
            Constraint::Min(10),   // Main content
            Constraint::Length(2), // Status bar
        ])
        .split(frame.area());

    render_title_bar(frame, app, chunks[0]);
    screens::render(frame, app, chunks[1]);
    render_status_bar(frame, app, chunks[2]);

    // Render overlays
    match &app.state {
        AppState::ShowingHelp => render_help_overlay(frame),
        AppState::ConfirmingQuit => render_quit_overlay(frame),
        AppState::ConfirmingDelete(pending) => render_delete_overlay(frame, &pending.label),
        _ => {}
    }
}

fn render_title_bar(frame: &mut Frame, app: &App, area: Rect) {
    let title = format!("  Rollcall · {}", app.route.title());
    let help_hint = "[?] Help";

    let title_line = Line::from(vec![
        Span::styled(title.clone(), styles::title_style()),
        Span::raw(" ".repeat(
            (area.width as usize)
                .saturating_sub(title.chars().count() + help_hint.len() + 4),
        )),
        Span::styled(help_hint, styles::muted_style()),
    ]);

    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(styles::muted_style());

    let paragraph = Paragraph::new(title_line).block(block);
    frame.render_widget(paragraph, area);
}

/// Key hints for the current screen.
fn shortcuts(app: &App) -> &'static str {
    match &app.screen {
        Screen::Home => "[Enter] select | [q]uit",
        Screen::Login(_) => "[Tab] field | [Enter] login | [Esc] back",
        Screen::AdminDashboard(_) => "[Enter] open | [v]isibility | [l]ogout | [q]uit",
        Screen::StudentDashboard(_) => "[l]ogout | [q]uit",
        Screen::CreateEvent(_) => "[Enter] create | [Esc] back",
        Screen::ManageEvents(_) => "[Enter] attendance | [n]ew | [d]elete | [Esc] back",
        Screen::MarkAttendance(_) => "[Tab] focus | [space] toggle | [a]ll | [s]ubmit | [Esc] back",
        Screen::DepartmentWork(_) => "[Tab] focus | [←/→] department | [s]ubmit | [d]elete | [Esc] back",
        Screen::Students(_) => "[Tab] focus | [/] search | [Enter] report | [Esc] back",
        Screen::StudentReport(_) => "[d]elete work | [Esc] back",
    }
}

fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let width = area.width as usize;
    let right_text = format!(" {} ", shortcuts(app));

    let line = if let Some(ref notice) = app.notice {
        let title = format!(" {}: ", notice.title);
        Line::from(vec![
            Span::styled(title, styles::notice_style(notice)),
            Span::styled(notice.message.clone(), styles::list_item_style()),
        ])
    } else if app.state == AppState::Searching {
        Line::from(Span::styled(
            " Searching: type to filter, [Enter] keep, [Esc] clear",
            styles::search_style(),
        ))
    } else {
        let left_text = " Ready ";
        let padding_len = width
            .saturating_sub(left_text.len())
            .saturating_sub(right_text.chars().count());
        Line::from(vec![
            Span::styled(left_text, styles::muted_style()),
            Span::raw(" ".repeat(padding_len)),
            Span::styled(right_text, styles::muted_style()),
        ])
    };

    let paragraph = Paragraph::new(line).style(styles::status_bar_style());
    frame.render_widget(paragraph, area);
}

fn help_line(key: &'static str, desc: &'static str) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("  {:<10}", key), styles::help_key_style()),
        Span::styled(desc, styles::help_desc_style()),
    ])
}

fn render_help_overlay(frame: &mut Frame) {
    let area = centered_rect_fixed(56, 26, frame.area());

    // Clear the area
    frame.render_widget(Clear, area);

    let version = env!("CARGO_PKG_VERSION");

    let help_text = vec![
        Line::from(Span::styled(
            format!("  Rollcall  version {}", version),
            styles::title_style(),
        )),
        Line::from(""),
        Line::from(Span::styled(" Navigation", styles::highlight_style())),
        help_line("↑/↓ j/k", "Move in the focused list"),
        help_line("PgUp/PgDn", "Move by a page"),
        help_line("Tab", "Switch focus between panels"),
        help_line("Enter", "Open / choose branch / submit form"),
        help_line("Esc", "Go back"),
        Line::from(""),
        Line::from(Span::styled(" Attendance and Department Work", styles::highlight_style())),
        help_line("Space", "Toggle the highlighted student"),
        help_line("a", "Select or clear the whole branch"),
        help_line("/", "Search students by name or id"),
        help_line("←/→", "Change department"),
        help_line("s", "Submit"),
        help_line("d", "Delete the highlighted entry"),
        Line::from(""),
        Line::from(Span::styled(" General", styles::highlight_style())),
        help_line("n", "New event (events list)"),
        help_line("v", "Toggle working-hours visibility"),
        help_line("l", "Log out"),
        help_line("q", "Quit"),
        Line::from(""),
        Line::from(vec![
            Span::styled("       Press ", styles::muted_style()),
            Span::styled("?", styles::help_key_style()),
            Span::styled(" or ", styles::muted_style()),
            Span::styled("Esc", styles::help_key_style()),
            Span::styled(" to close", styles::muted_style()),
        ]),
    ];

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(styles::border_style(true))
        .style(Style::default());

    let paragraph = Paragraph::new(help_text).block(block);

    frame.render_widget(paragraph, area);
}

/// Create a centered rectangle with fixed dimensions
pub fn centered_rect_fixed(width: u16, height: u16, r: Rect) -> Rect {
    let x = r.x + (r.width.saturating_sub(width)) / 2;
    let y = r.y + (r.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width.min(r.width), height.min(r.height))
}

fn render_confirm(frame: &mut Frame, question: Vec<Line<'static>>, confirm: &'static str) {
    let area = centered_rect_fixed(50, 8, frame.area());

    // Clear the area
    frame.render_widget(Clear, area);

    let mut lines = vec![Line::from("")];
    lines.extend(question);
    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::styled("   Press ", styles::muted_style()),
        Span::styled("[Y]", styles::help_key_style()),
        Span::styled(confirm, styles::muted_style()),
        Span::styled("[N]", styles::help_key_style()),
        Span::styled(" to cancel", styles::muted_style()),
    ]));

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(styles::border_style(true))
        .style(Style::default());

    let paragraph = Paragraph::new(lines).block(block).wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}

fn render_quit_overlay(frame: &mut Frame) {
    render_confirm(
        frame,
        vec![Line::from(Span::styled(
            "   Are you sure you want to quit?",
            styles::highlight_style(),
        ))],
        " to quit, ",
    );
}

fn render_delete_overlay(frame: &mut Frame, label: &str) {
    render_confirm(
        frame,
        vec![
            Line::from(Span::styled("   Delete this entry?", styles::highlight_style())),
            Line::from(Span::styled(format!("   {}", label), styles::list_item_style())),
        ],
        " to delete, ",
    );
}
