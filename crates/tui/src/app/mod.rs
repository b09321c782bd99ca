pub(crate) mod handlers;
pub(crate) mod runtime;
pub(crate) mod state;
pub(crate) mod util;
pub(crate) mod view;

use crate::app::runtime::{Action, AppEvent};
use crate::app::state::{
    ActivityFlag, Channel, ConsolePanel, LoginForm, MailboxView, Severity, SharedNotification,
    SharedSession, SharedTranscript, TranscriptMessage, WrappedLogCache,
};
use crate::config::Config;
use ratatui::layout::Rect;
use std::time::Instant;
use tracing::debug;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Screen {
    Login,
    Mailbox,
}

/// Regions of the last drawn frame, kept for mouse hit testing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ScreenLayout {
    pub body: Rect,
    pub toggle_label: Rect,
    pub resize_bar: Rect,
    pub console: Rect,
}

pub struct AppState {
    pub transcript: SharedTranscript,
    pub session: SharedSession,
    pub notifications: SharedNotification,
    pub fetching: ActivityFlag,
    pub console: ConsolePanel,
    pub wrapped_log_cache: Option<WrappedLogCache>,
    pub login: LoginForm,
    pub mailbox: MailboxView,
    pub screen: Screen,
    pub layout: ScreenLayout,
}

impl AppState {
    pub fn new(config: &Config) -> Self {
        let transcript = SharedTranscript::default();
        {
            let mut log = transcript.lock();
            for warning in &config.warnings {
                log.append(TranscriptMessage::new(
                    Channel::Other,
                    Severity::Warning,
                    warning.as_str(),
                ));
            }
        }
        Self {
            transcript,
            session: SharedSession::default(),
            notifications: SharedNotification::default(),
            fetching: ActivityFlag::default(),
            console: ConsolePanel::new(config.console_height, config.console_collapsed),
            wrapped_log_cache: None,
            login: LoginForm::new(config.use_tls),
            mailbox: MailboxView::default(),
            screen: Screen::Login,
            layout: ScreenLayout::default(),
        }
    }

    /// Picks the screen from the session. Entering the mailbox asks for a listing; leaving it
    /// drops the mailbox view.
    pub fn sync_screen(&mut self) -> Option<Action> {
        let authenticated = self.session.lock().is_authenticated();
        match (self.screen, authenticated) {
            (Screen::Login, true) => {
                debug!("entering mailbox");
                self.screen = Screen::Mailbox;
                Some(Action::Refresh)
            }
            (Screen::Mailbox, false) => {
                debug!("back to login");
                self.screen = Screen::Login;
                self.mailbox.reset();
                None
            }
            _ => None,
        }
    }

    /// Mailbox results from an earlier session, or arriving after the mailbox was left, are
    /// dropped so they never show up under the next login.
    pub fn apply_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::LoginFinished(result) => self.login.finish(result),
            AppEvent::MailListLoaded {
                generation,
                listings,
            } => {
                if self.is_current(generation) {
                    self.mailbox.set_listings(listings);
                } else {
                    debug!(generation, "dropping stale mail list");
                }
            }
            AppEvent::MailFetched {
                generation,
                index,
                mail,
            } => {
                if self.is_current(generation) {
                    self.mailbox.finish_fetch(index, mail);
                } else {
                    debug!(generation, index, "dropping stale mail");
                }
            }
            AppEvent::LogoutFinished => {}
        }
    }

    fn is_current(&self, generation: u64) -> bool {
        self.screen == Screen::Mailbox && self.session.lock().generation() == generation
    }

    /// Timers and background changes. Returns true when something visible changed.
    pub fn tick(&mut self, now: Instant) -> bool {
        let mut changed = self.notifications.lock().tick(now);
        changed |= self.console.tick(now);
        let version = self.transcript.lock().version();
        changed |= self.console.follow_transcript(version);
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::{AppState, Screen};
    use crate::app::runtime::{Action, AppEvent, MailListing, MailRecord};
    use crate::app::state::NotificationSeverity;
    use crate::config::Config;
    use std::time::{Duration, Instant};

    fn app() -> AppState {
        AppState::new(&Config::from_sources(Vec::<String>::new(), |_| None))
    }

    #[test]
    fn config_warnings_land_in_transcript() {
        let config = Config::from_sources(["--console-height", "x"], |_| None);
        let app = AppState::new(&config);
        assert_eq!(app.transcript.lock().len(), 1);
    }

    #[test]
    fn screen_follows_session_and_requests_refresh_once() {
        let mut app = app();
        assert_eq!(app.sync_screen(), None);

        app.session.lock().establish("pop.example.org:995", "alice");
        assert_eq!(app.sync_screen(), Some(Action::Refresh));
        assert_eq!(app.screen, Screen::Mailbox);
        assert_eq!(app.sync_screen(), None);

        let generation = app.session.lock().generation();
        app.apply_event(AppEvent::MailListLoaded {
            generation,
            listings: vec![MailListing {
                index: 1,
                size_bytes: 10,
            }],
        });
        assert_eq!(app.mailbox.listings.len(), 1);
        app.session.lock().sign_out();
        assert_eq!(app.sync_screen(), None);
        assert_eq!(app.screen, Screen::Login);
        assert!(app.mailbox.listings.is_empty());
    }

    #[test]
    fn late_results_from_previous_session_are_dropped() {
        let mut app = app();
        app.session.lock().establish("a.example.org:995", "alice");
        app.sync_screen();
        let alice = app.session.lock().generation();
        app.mailbox.begin_fetch(1);

        app.session.lock().sign_out();
        app.sync_screen();
        let listing = || {
            vec![MailListing {
                index: 1,
                size_bytes: 10,
            }]
        };
        let secret = || {
            Some(MailRecord {
                subject: "alice secret".to_string(),
                ..MailRecord::default()
            })
        };
        app.apply_event(AppEvent::MailListLoaded {
            generation: alice,
            listings: listing(),
        });
        app.apply_event(AppEvent::MailFetched {
            generation: alice,
            index: 1,
            mail: secret(),
        });

        app.session.lock().establish("b.example.org:995", "bob");
        assert_eq!(app.sync_screen(), Some(Action::Refresh));
        // Alice's requests can still land after bob is in.
        app.apply_event(AppEvent::MailListLoaded {
            generation: alice,
            listings: listing(),
        });
        app.apply_event(AppEvent::MailFetched {
            generation: alice,
            index: 1,
            mail: secret(),
        });

        assert!(app.mailbox.listings.is_empty());
        assert!(app.mailbox.mail.is_none());
        assert_eq!(app.mailbox.pending_fetch, None);

        let bob = app.session.lock().generation();
        app.apply_event(AppEvent::MailListLoaded {
            generation: bob,
            listings: listing(),
        });
        assert_eq!(app.mailbox.listings.len(), 1);
    }

    #[test]
    fn tick_dismisses_expired_notification() {
        let mut app = app();
        let shown = Instant::now();
        app.notifications
            .lock()
            .show("saved", NotificationSeverity::Success, shown);

        assert!(!app.tick(shown + Duration::from_millis(100)));
        assert!(app.tick(shown + Duration::from_millis(6000)));
        assert!(!app.notifications.lock().is_visible());
    }
}
