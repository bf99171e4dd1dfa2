//! Keyboard input handling for the TUI.
//!
//! This module handles all keyboard events and translates them into
//! application state changes.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use rollcall_core::route::Route;

use crate::app::{App, AppState, Focus, Screen, PAGE_SCROLL_SIZE};

/// Handle keyboard input. Returns true if the app should quit.
pub fn handle_input(app: &mut App, key: KeyEvent) -> bool {
    // Any key dismisses the current notice
    app.notice = None;

    match app.state {
        AppState::ShowingHelp => {
            if matches!(key.code, KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q')) {
                app.state = AppState::Normal;
            }
            return false;
        }
        AppState::ConfirmingQuit => {
            match key.code {
                KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => {
                    app.state = AppState::Quitting;
                    return true;
                }
                KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                    app.state = AppState::Normal;
                }
                _ => {}
            }
            return false;
        }
        AppState::ConfirmingDelete(_) => {
            match key.code {
                KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => app.confirm_delete(),
                KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => app.state = AppState::Normal,
                _ => {}
            }
            return false;
        }
        AppState::Searching => {
            handle_search_input(app, key);
            return false;
        }
        AppState::Normal | AppState::Quitting => {}
    }

    if matches!(app.screen, Screen::Login(_)) {
        handle_login_input(app, key);
        return false;
    }

    if app.is_typing() && handle_form_input(app, key) {
        return false;
    }

    handle_normal_input(app, key)
}

fn handle_search_input(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => app.clear_search(),
        KeyCode::Enter => app.state = AppState::Normal,
        KeyCode::Backspace => app.backspace(),
        KeyCode::Char(c) => app.type_char(c),
        _ => {}
    }
}

fn handle_login_input(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => app.go_back(),
        KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down => {
            if let Screen::Login(form) = &mut app.screen {
                form.next_field();
            }
        }
        KeyCode::Enter => app.submit_login(),
        KeyCode::Backspace => app.backspace(),
        KeyCode::Char(c) => app.type_char(c),
        _ => {}
    }
}

/// Keys for a focused text field or picker. Returns true if the key was used.
fn handle_form_input(app: &mut App, key: KeyEvent) -> bool {
    match key.code {
        KeyCode::Char('s') if key.modifiers.contains(KeyModifiers::CONTROL) => app.submit(),
        KeyCode::Char(c) => app.type_char(c),
        KeyCode::Backspace => app.backspace(),
        KeyCode::Enter => app.submit(),
        KeyCode::Up => app.move_selection(-1),
        KeyCode::Down => app.move_selection(1),
        _ => return false,
    }
    true
}

fn handle_normal_input(app: &mut App, key: KeyEvent) -> bool {
    match key.code {
        KeyCode::Char('q') => {
            app.state = AppState::ConfirmingQuit;
        }
        KeyCode::Char('?') => {
            app.state = AppState::ShowingHelp;
        }
        KeyCode::Esc => {
            if app.route == Route::Home {
                app.state = AppState::ConfirmingQuit;
            } else {
                app.go_back();
            }
        }
        KeyCode::Tab | KeyCode::BackTab => app.cycle_focus(),
        KeyCode::Up | KeyCode::Char('k') => app.move_selection(-1),
        KeyCode::Down | KeyCode::Char('j') => app.move_selection(1),
        KeyCode::PageUp => app.move_selection(-(PAGE_SCROLL_SIZE as isize)),
        KeyCode::PageDown => app.move_selection(PAGE_SCROLL_SIZE as isize),
        KeyCode::Left => app.cycle_department(false),
        KeyCode::Right => app.cycle_department(true),
        KeyCode::Enter => {
            if app.focus == Focus::Form {
                app.submit();
            } else {
                app.activate();
            }
        }
        KeyCode::Char(' ') if app.focus == Focus::Students => app.toggle_selected_student(),
        KeyCode::Char('a') => app.toggle_branch(),
        KeyCode::Char('/') => app.start_search(),
        KeyCode::Char('s') => app.submit(),
        KeyCode::Char('d') => app.request_delete(),
        KeyCode::Char('v') => app.toggle_visibility(),
        KeyCode::Char('n') if app.route == Route::ManageEvents => app.navigate(Route::CreateEvent),
        KeyCode::Char('l') => {
            if let Some(role) = app.logged_in_role() {
                app.logout(role);
            }
        }
        _ => {}
    }
    false
}
