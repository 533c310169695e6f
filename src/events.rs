use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};

use crate::app::{App, View};
use crate::ui::common::tab_at;

/// File written by the `e` key.
pub const EXPORT_FILE: &str = "dashboard_export.json";

/// Poll for events with a timeout
pub fn poll_event(timeout: Duration) -> Result<Option<Event>> {
    if event::poll(timeout)? {
        Ok(Some(event::read()?))
    } else {
        Ok(None)
    }
}

/// Handle a key event
pub fn handle_key_event(app: &mut App, key: KeyEvent) {
    // If help is shown, any key closes it
    if app.show_help {
        app.show_help = false;
        return;
    }

    match key.code {
        // Quit
        KeyCode::Char('q') | KeyCode::Esc => app.quit(),
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => app.quit(),

        // View switching
        KeyCode::Tab => {
            if key.modifiers.contains(KeyModifiers::SHIFT) {
                app.prev_view();
            } else {
                app.next_view();
            }
        }
        KeyCode::BackTab => app.prev_view(),
        KeyCode::Char('1') => app.set_view(View::Overview),
        KeyCode::Char('2') => app.set_view(View::Projects),
        KeyCode::Left | KeyCode::Char('h') => app.prev_view(),
        KeyCode::Right | KeyCode::Char('l') => app.next_view(),

        // Table navigation
        KeyCode::Up | KeyCode::Char('k') => app.select_prev(),
        KeyCode::Down | KeyCode::Char('j') => app.select_next(),
        KeyCode::PageUp => app.select_prev_n(10),
        KeyCode::PageDown => app.select_next_n(10),
        KeyCode::Home => app.select_first(),
        KeyCode::End => app.select_last(),

        // Reload
        KeyCode::Char('r') => {
            app.reload_data();
            let msg = match app.outcome.as_ref().and_then(|o| o.error()) {
                Some(err) => format!("Reload failed: {}", err),
                None => "Reloaded".to_string(),
            };
            app.set_status_message(msg);
        }

        // Help
        KeyCode::Char('?') => app.toggle_help(),

        // Sorting (Projects view)
        KeyCode::Char('s') if app.current_view == View::Projects => app.cycle_sort(),
        KeyCode::Char('S') if app.current_view == View::Projects => app.toggle_sort_direction(),

        // Export
        KeyCode::Char('e') => {
            let export_path = PathBuf::from(EXPORT_FILE);
            match app.export_state(&export_path) {
                Ok(()) => {
                    app.set_status_message(format!("Exported to {}", export_path.display()));
                }
                Err(e) => {
                    app.set_status_message(format!("Export failed: {}", e));
                }
            }
        }

        _ => {}
    }
}

/// Handle mouse events
pub fn handle_mouse_event(app: &mut App, mouse: MouseEvent) {
    match mouse.kind {
        MouseEventKind::ScrollUp => app.select_prev(),
        MouseEventKind::ScrollDown => app.select_next(),

        // Tab clicks (row 1, after the title bar)
        MouseEventKind::Down(MouseButton::Left) if mouse.row == 1 => {
            if let Some(view) = tab_at(mouse.column) {
                app.set_view(view);
            }
        }

        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DashboardConfig;
    use crate::pipeline::tests::{one_project_body, StaticSource};
    use crate::ui::{SortColumn, Theme};
    use crossterm::event::{KeyEventKind, KeyEventState};

    fn test_app() -> App {
        App::with_theme(
            Box::new(StaticSource::ok(one_project_body())),
            DashboardConfig::default(),
            Theme::dark(),
        )
    }

    fn press(app: &mut App, code: KeyCode) {
        handle_key_event(app, KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    #[test]
    fn test_quit_keys() {
        let mut app = test_app();
        press(&mut app, KeyCode::Char('q'));
        assert!(!app.running);

        let mut app = test_app();
        handle_key_event(
            &mut app,
            KeyEvent {
                code: KeyCode::Char('c'),
                modifiers: KeyModifiers::CONTROL,
                kind: KeyEventKind::Press,
                state: KeyEventState::NONE,
            },
        );
        assert!(!app.running);
    }

    #[test]
    fn test_view_keys() {
        let mut app = test_app();
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.current_view, View::Projects);
        press(&mut app, KeyCode::Left);
        assert_eq!(app.current_view, View::Overview);
        press(&mut app, KeyCode::Char('2'));
        assert_eq!(app.current_view, View::Projects);
        press(&mut app, KeyCode::Char('1'));
        assert_eq!(app.current_view, View::Overview);
    }

    #[test]
    fn test_reload_key_loads_outcome() {
        let mut app = test_app();
        press(&mut app, KeyCode::Char('r'));
        assert!(app.outcome.is_some());
        assert_eq!(app.get_status_message(), Some("Reloaded"));
    }

    #[test]
    fn test_help_swallows_next_key() {
        let mut app = test_app();
        press(&mut app, KeyCode::Char('?'));
        assert!(app.show_help);
        press(&mut app, KeyCode::Char('q'));
        assert!(!app.show_help);
        assert!(app.running);
    }

    #[test]
    fn test_sort_keys_only_on_projects() {
        let mut app = test_app();
        press(&mut app, KeyCode::Char('s'));
        assert_eq!(app.sort_column, SortColumn::Name);

        app.set_view(View::Projects);
        press(&mut app, KeyCode::Char('s'));
        assert_eq!(app.sort_column, SortColumn::Status);
        press(&mut app, KeyCode::Char('S'));
        assert!(!app.sort_ascending);
    }

    #[test]
    fn test_export_without_outcome_reports_failure() {
        let mut app = test_app();
        press(&mut app, KeyCode::Char('e'));
        let msg = app.get_status_message().unwrap();
        assert!(msg.starts_with("Export failed"));
    }

    #[test]
    fn test_mouse_tab_click() {
        let mut app = test_app();
        let click = |column| mouse(MouseEventKind::Down(MouseButton::Left), column, 1);

        handle_mouse_event(&mut app, click(15));
        assert_eq!(app.current_view, View::Projects);
        handle_mouse_event(&mut app, click(3));
        assert_eq!(app.current_view, View::Overview);

        // Trailing padding of each tab belongs to that tab
        handle_mouse_event(&mut app, click(28));
        assert_eq!(app.current_view, View::Projects);
        handle_mouse_event(&mut app, click(13));
        assert_eq!(app.current_view, View::Overview);

        // Past the last tab
        handle_mouse_event(&mut app, click(40));
        assert_eq!(app.current_view, View::Overview);
    }
}
