use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::app::App;

/// Routes one key press. Sets `app.should_quit` when the user leaves.
pub fn handle_key_event(app: &mut App, key: KeyEvent) {
    tracing::debug!("Key event: {:?} with modifiers: {:?}", key.code, key.modifiers);

    match (key.modifiers, key.code) {
        (KeyModifiers::CONTROL, KeyCode::Char('c')) => app.should_quit = true,
        (_, KeyCode::Esc) => {
            if app.sidebar_open {
                app.sidebar_open = false;
            } else {
                app.should_quit = true;
            }
        }
        (KeyModifiers::CONTROL, KeyCode::Char('n')) => app.new_chat(),
        (KeyModifiers::CONTROL, KeyCode::Char('b')) => app.toggle_sidebar(),
        (KeyModifiers::CONTROL, KeyCode::Char('t')) => app.toggle_theme(),
        (KeyModifiers::CONTROL, KeyCode::Char('x')) => app.clear_conversations(),
        (_, KeyCode::PageUp) => app.scroll_up(5),
        (_, KeyCode::PageDown) => app.scroll_down(5),
        (_, KeyCode::F(n @ 1..=4)) => {
            app.send_sample(usize::from(n - 1));
        }
        (_, KeyCode::Up) if app.sidebar_open => app.sidebar_previous(),
        (_, KeyCode::Down) if app.sidebar_open => app.sidebar_next(),
        (_, KeyCode::Enter) if app.sidebar_open => app.open_selected_thread(),
        (KeyModifiers::SHIFT, KeyCode::Enter) => {
            if !app.is_busy() {
                app.textarea.insert_newline();
            }
        }
        (_, KeyCode::Enter) => app.submit_input(),
        _ => {
            // Typing is disabled while a reply is pending.
            if !app.is_busy() && !app.sidebar_open {
                app.textarea.input(key);
            }
        }
    }
}

pub fn handle_paste(app: &mut App, data: &str) {
    if app.is_busy() || app.sidebar_open {
        return;
    }
    tracing::debug!("Paste event detected with {} characters", data.len());
    app.textarea.insert_str(data);
}
