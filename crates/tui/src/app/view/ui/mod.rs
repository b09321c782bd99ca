mod console;
mod constants;
mod layout;
mod login;
mod mailbox;
mod notification;
mod style;
mod text;
mod transcript;

use crate::app::{AppState, Screen};
use ratatui::widgets::Clear;
use ratatui::Frame;

use self::console::{render_console, render_divider};
use self::layout::split_screen;
use self::login::render_login;
use self::mailbox::render_mailbox;
use self::notification::render_notification;

pub fn draw_ui(f: &mut Frame, app: &mut AppState) {
    let size = f.area();
    if size.width == 0 || size.height == 0 {
        return;
    }

    // Paragraphs only paint the cells they cover; clear so shorter rows leave nothing behind.
    f.render_widget(Clear, size);

    app.layout = split_screen(size, &app.console);
    let body = app.layout.body;
    match app.screen {
        Screen::Login => render_login(f, &app.login, body),
        Screen::Mailbox => {
            let session = app.session.lock().clone();
            let fetching = app.fetching.is_raised();
            render_mailbox(f, &session, &mut app.mailbox, fetching, body);
        }
    }

    render_divider(f, app);
    let console = app.layout.console;
    render_console(f, app, console);

    let notification = app.notifications.lock();
    render_notification(f, &notification, size);
}
