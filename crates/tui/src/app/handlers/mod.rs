mod console;
mod login;
mod mailbox;

use crate::app::runtime::Action;
use crate::app::{AppState, Screen};
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEvent};
use std::time::Instant;

/// What the event loop should do after an input event.
#[derive(Debug, Default, PartialEq, Eq)]
pub(crate) struct Outcome {
    pub redraw: bool,
    pub action: Option<Action>,
    pub quit: bool,
}

impl Outcome {
    pub fn redraw(redraw: bool) -> Self {
        Self {
            redraw,
            ..Self::default()
        }
    }

    pub fn dispatch(action: Action) -> Self {
        Self {
            redraw: true,
            action: Some(action),
            quit: false,
        }
    }

    fn quit() -> Self {
        Self {
            quit: true,
            ..Self::default()
        }
    }
}

pub(crate) fn handle_key(app: &mut AppState, key: KeyEvent) -> Outcome {
    if key.kind == KeyEventKind::Release {
        return Outcome::default();
    }
    match (key.code, key.modifiers) {
        (KeyCode::Char('c'), mods) if mods.contains(KeyModifiers::CONTROL) => Outcome::quit(),
        (KeyCode::F(2), _) => {
            app.console.toggle();
            Outcome::redraw(true)
        }
        (KeyCode::Esc, _) => {
            let mut notifications = app.notifications.lock();
            let visible = notifications.is_visible();
            notifications.close();
            Outcome::redraw(visible)
        }
        (KeyCode::PageUp, mods) if mods.contains(KeyModifiers::SHIFT) => {
            app.console.scroll_up(console::SCROLL_STEP);
            Outcome::redraw(true)
        }
        (KeyCode::PageDown, mods) if mods.contains(KeyModifiers::SHIFT) => {
            app.console.scroll_down(console::SCROLL_STEP);
            Outcome::redraw(true)
        }
        (code, mods) => match app.screen {
            Screen::Login => login::handle_login_key(app, code, mods),
            Screen::Mailbox => mailbox::handle_mailbox_key(app, code),
        },
    }
}

/// Bracketed paste goes to the focused login field; the mailbox has nothing to paste into.
pub(crate) fn handle_paste(app: &mut AppState, text: &str) -> bool {
    if app.screen != Screen::Login {
        return false;
    }
    let text = crate::app::util::sanitize_paste(text);
    app.login.edit_focused(|input| input.insert_str(&text))
}

pub(crate) fn handle_mouse(app: &mut AppState, mouse: MouseEvent, now: Instant) -> bool {
    console::handle_mouse_event(app, mouse, now)
}

#[cfg(test)]
pub(crate) mod test_support {
    use crate::app::AppState;
    use crate::config::Config;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    pub(crate) fn app() -> AppState {
        AppState::new(&Config::from_sources(Vec::<String>::new(), |_| None))
    }

    pub(crate) fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }
}
