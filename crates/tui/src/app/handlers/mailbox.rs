use crate::app::handlers::Outcome;
use crate::app::runtime::Action;
use crate::app::AppState;
use crossterm::event::KeyCode;

const PAGE: u16 = 10;

pub(super) fn handle_mailbox_key(app: &mut AppState, key: KeyCode) -> Outcome {
    let view = &mut app.mailbox;
    match key {
        KeyCode::Up | KeyCode::Char('k') => {
            view.select_prev();
            Outcome::redraw(true)
        }
        KeyCode::Down | KeyCode::Char('j') => {
            view.select_next();
            Outcome::redraw(true)
        }
        KeyCode::Enter => match view.selected_listing() {
            Some(listing) => {
                view.begin_fetch(listing.index);
                Outcome::dispatch(Action::Fetch(listing.index))
            }
            None => Outcome::default(),
        },
        KeyCode::Char(']') | KeyCode::Right => {
            view.next_tab();
            Outcome::redraw(true)
        }
        KeyCode::Char('[') | KeyCode::Left => {
            view.prev_tab();
            Outcome::redraw(true)
        }
        KeyCode::PageDown => {
            view.scroll_down(PAGE);
            Outcome::redraw(true)
        }
        KeyCode::PageUp => {
            view.scroll_up(PAGE);
            Outcome::redraw(true)
        }
        KeyCode::Char('r') => Outcome::dispatch(Action::Refresh),
        KeyCode::Char('x') => Outcome::dispatch(Action::Logout),
        _ => Outcome::default(),
    }
}

#[cfg(test)]
mod tests {
    use crate::app::handlers::handle_key;
    use crate::app::handlers::test_support::{app, key};
    use crate::app::runtime::{Action, AppEvent, MailListing};
    use crate::app::AppState;
    use crossterm::event::KeyCode;

    fn mailbox_app() -> AppState {
        let mut app = app();
        app.session.lock().establish("pop.example.org:110", "alice");
        app.sync_screen();
        let generation = app.session.lock().generation();
        app.apply_event(AppEvent::MailListLoaded {
            generation,
            listings: vec![
                MailListing {
                    index: 1,
                    size_bytes: 120,
                },
                MailListing {
                    index: 2,
                    size_bytes: 200,
                },
            ],
        });
        app
    }

    #[test]
    fn enter_fetches_selected_mail() {
        let mut app = mailbox_app();
        handle_key(&mut app, key(KeyCode::Down));
        let outcome = handle_key(&mut app, key(KeyCode::Enter));

        assert_eq!(outcome.action, Some(Action::Fetch(2)));
        assert_eq!(app.mailbox.pending_fetch, Some(2));
    }

    #[test]
    fn selection_stays_inside_list() {
        let mut app = mailbox_app();
        handle_key(&mut app, key(KeyCode::Up));
        assert_eq!(app.mailbox.selected, 0);
        for _ in 0..5 {
            handle_key(&mut app, key(KeyCode::Char('j')));
        }
        assert_eq!(app.mailbox.selected, 1);
    }

    #[test]
    fn refresh_and_logout_keys_dispatch() {
        let mut app = mailbox_app();
        assert_eq!(
            handle_key(&mut app, key(KeyCode::Char('r'))).action,
            Some(Action::Refresh)
        );
        assert_eq!(
            handle_key(&mut app, key(KeyCode::Char('x'))).action,
            Some(Action::Logout)
        );
    }

    #[test]
    fn enter_on_empty_list_does_nothing() {
        let mut app = app();
        app.session.lock().establish("pop.example.org:110", "alice");
        app.sync_screen();
        assert_eq!(handle_key(&mut app, key(KeyCode::Enter)).action, None);
    }
}
