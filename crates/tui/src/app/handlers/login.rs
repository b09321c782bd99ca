use crate::app::handlers::Outcome;
use crate::app::runtime::Action;
use crate::app::state::{InputState, LoginFocus};
use crate::app::AppState;
use crossterm::event::{KeyCode, KeyModifiers};

/// Line-editing keys for a single-line field. `None` when the key is not an edit.
fn edit_for_key(key: KeyCode, modifiers: KeyModifiers) -> Option<fn(&mut InputState)> {
    let ctrl = modifiers.contains(KeyModifiers::CONTROL);
    let edit: fn(&mut InputState) = match key {
        KeyCode::Char('u') if ctrl => InputState::clear,
        KeyCode::Char('k') if ctrl => InputState::kill_to_end,
        KeyCode::Char('w') if ctrl => InputState::delete_word_back,
        KeyCode::Char('a') if ctrl => InputState::move_home,
        KeyCode::Char('e') if ctrl => InputState::move_end,
        KeyCode::Left => InputState::move_left,
        KeyCode::Right => InputState::move_right,
        KeyCode::Home => InputState::move_home,
        KeyCode::End => InputState::move_end,
        KeyCode::Delete => InputState::delete,
        KeyCode::Backspace => InputState::backspace,
        _ => return None,
    };
    Some(edit)
}

pub(super) fn handle_login_key(
    app: &mut AppState,
    key: KeyCode,
    modifiers: KeyModifiers,
) -> Outcome {
    let form = &mut app.login;
    match key {
        KeyCode::Tab | KeyCode::Down => {
            form.focus_next();
            Outcome::redraw(true)
        }
        KeyCode::BackTab | KeyCode::Up => {
            form.focus_prev();
            Outcome::redraw(true)
        }
        KeyCode::Char(' ') if form.focus == LoginFocus::Tls => {
            form.toggle_tls();
            Outcome::redraw(true)
        }
        KeyCode::Enter => match form.submit() {
            Some(request) => Outcome::dispatch(Action::Login(request)),
            // Either a submit is already running or required fields are missing.
            None => Outcome::redraw(true),
        },
        KeyCode::Char(ch)
            if !modifiers.contains(KeyModifiers::CONTROL)
                && !modifiers.contains(KeyModifiers::ALT) =>
        {
            Outcome::redraw(form.edit_focused(|input| input.insert_char(ch)))
        }
        _ => match edit_for_key(key, modifiers) {
            Some(edit) => Outcome::redraw(form.edit_focused(edit)),
            None => Outcome::default(),
        },
    }
}

#[cfg(test)]
mod tests {
    use crate::app::handlers::handle_key;
    use crate::app::handlers::test_support::{app, key};
    use crate::app::runtime::{Action, LoginField, LoginRequest};
    use crate::app::state::LoginFocus;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    fn type_text(app: &mut crate::app::AppState, text: &str) {
        for ch in text.chars() {
            handle_key(app, key(KeyCode::Char(ch)));
        }
    }

    #[test]
    fn typing_then_enter_submits_login() {
        let mut app = app();
        type_text(&mut app, "pop.example.org:995");
        handle_key(&mut app, key(KeyCode::Tab));
        type_text(&mut app, "alice");
        handle_key(&mut app, key(KeyCode::Tab));
        type_text(&mut app, "hunter2");

        let outcome = handle_key(&mut app, key(KeyCode::Enter));
        assert_eq!(
            outcome.action,
            Some(Action::Login(LoginRequest {
                server_address: "pop.example.org:995".to_string(),
                username: "alice".to_string(),
                password: "hunter2".to_string(),
                use_tls: false,
            }))
        );
        assert!(app.login.submitting);

        // A second Enter while the attempt runs does nothing.
        assert_eq!(handle_key(&mut app, key(KeyCode::Enter)).action, None);
    }

    #[test]
    fn enter_with_missing_fields_reports_errors() {
        let mut app = app();
        let outcome = handle_key(&mut app, key(KeyCode::Enter));
        assert_eq!(outcome.action, None);
        assert!(outcome.redraw);
        assert_eq!(
            app.login.error(LoginField::Address),
            Some("Server address is required")
        );
    }

    #[test]
    fn space_on_checkbox_toggles_tls() {
        let mut app = app();
        app.login.focus = LoginFocus::Tls;
        handle_key(&mut app, key(KeyCode::Char(' ')));
        assert!(app.login.use_tls);
        assert!(app.login.address.is_empty());
    }

    #[test]
    fn editing_keys_reach_focused_field() {
        let mut app = app();
        type_text(&mut app, "pop example");
        handle_key(
            &mut app,
            KeyEvent::new(KeyCode::Char('w'), KeyModifiers::CONTROL),
        );
        assert_eq!(app.login.address.current(), "pop ");

        handle_key(&mut app, key(KeyCode::Backspace));
        handle_key(&mut app, key(KeyCode::Home));
        type_text(&mut app, "x");
        assert_eq!(app.login.address.current(), "xpop");
    }

    #[test]
    fn focus_wraps_around() {
        let mut app = app();
        handle_key(&mut app, key(KeyCode::BackTab));
        assert_eq!(app.login.focus, LoginFocus::Submit);
        handle_key(&mut app, key(KeyCode::Down));
        assert_eq!(app.login.focus, LoginFocus::Address);
    }
}
