use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Client-side view of the login. Address and username may hold stale values while
/// `authenticated` is false.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SessionState {
    authenticated: bool,
    server_address: String,
    username: String,
    generation: u64,
}

impl SessionState {
    pub fn is_authenticated(&self) -> bool {
        self.authenticated
    }

    pub fn server_address(&self) -> &str {
        &self.server_address
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    /// Bumped on every login and every sign-out. Background results tagged with an older
    /// value belong to a session that is gone.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Commits a completed login in one step.
    pub fn establish(&mut self, server_address: impl Into<String>, username: impl Into<String>) {
        self.server_address = server_address.into();
        self.username = username.into();
        self.authenticated = true;
        self.generation += 1;
    }

    /// Drops the login but keeps address and username around for the next attempt.
    pub fn sign_out(&mut self) {
        if self.authenticated {
            self.authenticated = false;
            self.generation += 1;
        }
    }
}

pub type SharedSession = Arc<Mutex<SessionState>>;

/// Loading indicator shared between a background operation and the view.
#[derive(Clone, Debug, Default)]
pub struct ActivityFlag(Arc<AtomicBool>);

impl ActivityFlag {
    pub fn raise(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn clear(&self) {
        self.0.store(false, Ordering::SeqCst);
    }

    pub fn is_raised(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}
