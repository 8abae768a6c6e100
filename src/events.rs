use std::time::Duration;

use anyhow::Result;
use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyModifiers, MouseEvent, MouseEventKind,
};

use crate::app::{App, FormField, View};

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

    // The submit form captures keystrokes; everything else is navigation
    if app.current_view == View::Submit {
        handle_form_input(app, key);
        return;
    }

    match key.code {
        // Quit
        KeyCode::Char('q') => app.quit(),

        // View switching
        KeyCode::Tab => {
            if key.modifiers.contains(KeyModifiers::SHIFT) {
                app.prev_view();
            } else {
                app.next_view();
            }
        }
        KeyCode::BackTab => app.prev_view(),
        KeyCode::Left | KeyCode::Char('h') => app.prev_view(),
        KeyCode::Right | KeyCode::Char('l') => app.next_view(),

        // Direct view access
        KeyCode::Char('1') => app.set_view(View::Dashboard),
        KeyCode::Char('2') => app.set_view(View::Submit),
        KeyCode::Char('3') => app.set_view(View::History),

        // Fetch the latest report (manual, never automatic)
        KeyCode::Char('f') | KeyCode::Char('r') => app.start_fetch(),

        // Scrolling: summary panel on the dashboard, rows in history
        KeyCode::Up | KeyCode::Char('k') => match app.current_view {
            View::Dashboard => app.scroll_summary(-1),
            View::History => app.select_prev_n(1),
            View::Submit => {}
        },
        KeyCode::Down | KeyCode::Char('j') => match app.current_view {
            View::Dashboard => app.scroll_summary(1),
            View::History => app.select_next_n(1),
            View::Submit => {}
        },
        KeyCode::PageUp => {
            if app.current_view == View::History {
                app.select_prev_n(10);
            }
        }
        KeyCode::PageDown => {
            if app.current_view == View::History {
                app.select_next_n(10);
            }
        }
        KeyCode::Home => {
            if app.current_view == View::History {
                app.select_first();
            }
        }
        KeyCode::End => {
            if app.current_view == View::History {
                app.select_last();
            }
        }

        // Help
        KeyCode::Char('?') => app.toggle_help(),

        _ => {}
    }
}

/// Handle key input while the submit form has focus.
///
/// Characters go into the focused field (the batch line accepts anything,
/// including pasted JSON); Enter dispatches; Esc returns to the dashboard.
fn handle_form_input(app: &mut App, key: KeyEvent) {
    match key.code {
        // Dispatch: the batch line submits the batch, the numeric fields
        // submit a single reading
        KeyCode::Enter => {
            if app.form.focus == FormField::Batch {
                app.start_submit_batch();
            } else {
                app.start_submit();
            }
        }

        // Leave the form
        KeyCode::Esc => app.set_view(View::Dashboard),

        // Field focus
        KeyCode::Tab | KeyCode::Down => app.form.focus = app.form.focus.next(),
        KeyCode::BackTab | KeyCode::Up => app.form.focus = app.form.focus.prev(),

        // Editing
        KeyCode::Backspace => {
            app.form.focused_mut().pop();
        }
        KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.form.focused_mut().clear();
        }
        KeyCode::Char(c) => {
            app.form.focused_mut().push(c);
        }

        _ => {}
    }
}

/// Handle mouse events
pub fn handle_mouse_event(app: &mut App, mouse: MouseEvent) {
    match mouse.kind {
        // Scroll wheel mirrors the arrow keys
        MouseEventKind::ScrollUp => match app.current_view {
            View::Dashboard => app.scroll_summary(-1),
            View::History => app.select_prev_n(1),
            View::Submit => {}
        },
        MouseEventKind::ScrollDown => match app.current_view {
            View::Dashboard => app.scroll_summary(1),
            View::History => app.select_next_n(1),
            View::Submit => {}
        },

        // Click on the tab row switches views
        MouseEventKind::Down(_) if mouse.row == 1 => {
            // Approximate tab positions: Dashboard (0-12), Submit (13-23),
            // History (24-34)
            let col = mouse.column;
            if col < 13 {
                app.set_view(View::Dashboard);
            } else if col < 24 {
                app.set_view(View::Submit);
            } else if col < 35 {
                app.set_view(View::History);
            }
        }

        _ => {}
    }
}
