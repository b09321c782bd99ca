use crate::app::runtime::gateway::{MailListing, MailRecord};
use crate::app::runtime::orchestrator::{LoginFailure, LoginRequest, SessionOrchestrator};
use crate::app::state::session::ActivityFlag;
use std::sync::mpsc::Sender;
use tokio::runtime::Handle;
use tracing::debug;

/// User-initiated work that runs off the UI thread.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Action {
    Login(LoginRequest),
    Refresh,
    Fetch(u64),
    Logout,
}

/// Completion of an [`Action`], drained by the UI loop every tick. Mailbox results carry the
/// session generation they were requested under.
#[derive(Debug)]
pub enum AppEvent {
    LoginFinished(Result<(), LoginFailure>),
    MailListLoaded {
        generation: u64,
        listings: Vec<MailListing>,
    },
    MailFetched {
        generation: u64,
        index: u64,
        mail: Option<MailRecord>,
    },
    LogoutFinished,
}

pub struct Dispatcher {
    handle: Handle,
    orchestrator: SessionOrchestrator,
    fetching: ActivityFlag,
    tx: Sender<AppEvent>,
}

impl Dispatcher {
    pub fn new(
        handle: Handle,
        orchestrator: SessionOrchestrator,
        fetching: ActivityFlag,
        tx: Sender<AppEvent>,
    ) -> Self {
        Self {
            handle,
            orchestrator,
            fetching,
            tx,
        }
    }

    /// Spawns the orchestration for `action`. Overlapping actions are not coordinated.
    pub fn dispatch(&self, action: Action) {
        debug!(?action, "dispatch");
        let orchestrator = self.orchestrator.clone();
        let tx = self.tx.clone();
        match action {
            Action::Login(request) => {
                self.handle.spawn(async move {
                    let result = orchestrator.login(&request).await;
                    let _ = tx.send(AppEvent::LoginFinished(result));
                });
            }
            Action::Refresh => {
                self.fetching.raise();
                let fetching = self.fetching.clone();
                let generation = orchestrator.session_generation();
                self.handle.spawn(async move {
                    let listings = orchestrator.refresh_mail_list(&fetching).await;
                    let _ = tx.send(AppEvent::MailListLoaded {
                        generation,
                        listings,
                    });
                });
            }
            Action::Fetch(index) => {
                let generation = orchestrator.session_generation();
                self.handle.spawn(async move {
                    let mail = orchestrator.fetch_mail(index).await.ok();
                    let _ = tx.send(AppEvent::MailFetched {
                        generation,
                        index,
                        mail,
                    });
                });
            }
            Action::Logout => {
                self.handle.spawn(async move {
                    orchestrator.logout().await;
                    let _ = tx.send(AppEvent::LogoutFinished);
                });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Action, AppEvent, Dispatcher};
    use crate::app::runtime::gateway::GatewayError;
    use crate::app::runtime::orchestrator::SessionOrchestrator;
    use crate::app::runtime::testing::ScriptedGateway;
    use crate::app::state::session::{ActivityFlag, SharedSession};
    use serde_json::json;
    use std::sync::mpsc;
    use std::sync::Arc;
    use std::time::Duration;

    fn runtime() -> tokio::runtime::Runtime {
        tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .enable_all()
            .build()
            .expect("runtime")
    }

    fn dispatcher(
        runtime: &tokio::runtime::Runtime,
        gateway: ScriptedGateway,
        session: SharedSession,
        fetching: ActivityFlag,
    ) -> (Dispatcher, mpsc::Receiver<AppEvent>) {
        let (tx, rx) = mpsc::channel();
        let orchestrator = SessionOrchestrator::new(
            Arc::new(gateway),
            Default::default(),
            session,
            Default::default(),
        );
        (
            Dispatcher::new(runtime.handle().clone(), orchestrator, fetching, tx),
            rx,
        )
    }

    #[test]
    fn refresh_reports_listing_and_resolves_fetching() {
        let runtime = runtime();
        let fetching = ActivityFlag::default();
        let session = SharedSession::default();
        session.lock().establish("pop.example.org:110", "alice");
        let (dispatcher, rx) = dispatcher(
            &runtime,
            ScriptedGateway::default(),
            session.clone(),
            fetching.clone(),
        );

        dispatcher.dispatch(Action::Refresh);

        match rx.recv_timeout(Duration::from_secs(5)).expect("event") {
            AppEvent::MailListLoaded {
                generation,
                listings,
            } => {
                assert_eq!(listings.len(), 2);
                assert_eq!(generation, session.lock().generation());
            }
            other => panic!("unexpected {other:?}"),
        }
        assert!(!fetching.is_raised());
    }

    #[test]
    fn failed_fetch_reports_no_mail() {
        let runtime = runtime();
        let gateway = ScriptedGateway::default()
            .failing("fetch", GatewayError::Payload(json!({ "msg": "no such message" })));
        let (dispatcher, rx) = dispatcher(
            &runtime,
            gateway,
            SharedSession::default(),
            ActivityFlag::default(),
        );

        dispatcher.dispatch(Action::Fetch(9));

        match rx.recv_timeout(Duration::from_secs(5)).expect("event") {
            AppEvent::MailFetched { index, mail, .. } => {
                assert_eq!(index, 9);
                assert!(mail.is_none());
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn logout_finishes_with_session_cleared() {
        let runtime = runtime();
        let session = SharedSession::default();
        session.lock().establish("pop.example.org:110", "alice");
        let (dispatcher, rx) = dispatcher(
            &runtime,
            ScriptedGateway::default(),
            session.clone(),
            ActivityFlag::default(),
        );

        dispatcher.dispatch(Action::Logout);

        assert!(matches!(
            rx.recv_timeout(Duration::from_secs(5)).expect("event"),
            AppEvent::LogoutFinished
        ));
        assert!(!session.lock().is_authenticated());
    }
}
