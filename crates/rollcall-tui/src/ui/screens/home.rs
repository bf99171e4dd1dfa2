use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use rollcall_core::pages::{LoginField, LoginForm};

use crate::app::{App, HOME_ITEMS};
use crate::ui::render::centered_rect_fixed;
use crate::ui::styles;

const LOGO: [&str; 3] = [
    "   ╦═╗╔═╗╦  ╦  ╔═╗╔═╗╦  ╦  ",
    "   ╠╦╝║ ║║  ║  ║  ╠═╣║  ║  ",
    "   ╩╚═╚═╝╩═╝╩═╝╚═╝╩ ╩╩═╝╩═╝",
];

fn logo_lines() -> Vec<Line<'static>> {
    LOGO.iter()
        .map(|row| Line::from(Span::styled(format!("      {}", row), styles::title_style())))
        .collect()
}

/// Landing screen: choose how to log in.
pub fn render_home(frame: &mut Frame, app: &App, area: Rect) {
    let dialog = centered_rect_fixed(46, 11, area);
    frame.render_widget(Clear, dialog);

    let mut lines = logo_lines();
    lines.push(Line::from(""));
    for (i, (label, _)) in HOME_ITEMS.iter().enumerate() {
        let selected = i == app.selection;
        let (marker, style) = if selected {
            ("▶ ", styles::selected_style())
        } else {
            ("  ", styles::list_item_style())
        };
        lines.push(Line::from(vec![
            Span::raw("            "),
            Span::styled(marker, styles::highlight_style()),
            Span::styled(format!("{:<16}", label), style),
        ]));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "       ↑/↓ to choose, Enter to continue",
        styles::muted_style(),
    )));

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(styles::border_style(true))
        .style(Style::default());
    frame.render_widget(Paragraph::new(lines).block(block), dialog);
}

/// Login dialog for either role.
pub fn render_login(frame: &mut Frame, form: &LoginForm, area: Rect) {
    let height = if form.error.is_some() { 14 } else { 12 };
    let dialog = centered_rect_fixed(50, height, area);
    frame.render_widget(Clear, dialog);

    let mut lines = logo_lines();
    lines.push(Line::from(""));

    let id_focused = form.focus == LoginField::Id;
    lines.push(field_line(
        &format!("{:>10}: [", form.id_label()),
        format!("{:<18}", form.id),
        id_focused,
    ));

    let password_focused = form.focus == LoginField::Password;
    let masked = "*".repeat(form.password.chars().count().min(18));
    lines.push(field_line(
        &format!("{:>10}: [", "Password"),
        format!("{:<18}", masked),
        password_focused,
    ));

    lines.push(Line::from(""));
    if form.is_submitting() {
        lines.push(Line::from(Span::styled(
            "               Logging in...",
            styles::muted_style(),
        )));
    } else {
        lines.push(Line::from(vec![
            Span::raw("              ["),
            Span::styled(" Login (Enter) ", styles::selected_style()),
            Span::raw("]"),
        ]));
    }

    if let Some(ref error) = form.error {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(format!(" {}", error), styles::error_style())));
    }

    let block = Block::default()
        .title(format!(" {} Login ", form.role.title()))
        .title_style(styles::title_style())
        .borders(Borders::ALL)
        .border_style(styles::border_style(true))
        .style(Style::default());
    frame.render_widget(Paragraph::new(lines).block(block), dialog);
}

fn field_line(label: &str, value: String, focused: bool) -> Line<'static> {
    let style = if focused {
        styles::selected_style()
    } else {
        styles::list_item_style()
    };
    let cursor = if focused { "▌" } else { "" };
    Line::from(vec![
        Span::raw("  "),
        Span::styled(label.to_string(), styles::muted_style()),
        Span::styled(format!("{}{}", value, cursor), style),
        Span::styled("]", styles::muted_style()),
    ])
}
