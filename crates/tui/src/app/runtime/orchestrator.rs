use crate::app::runtime::gateway::{
    check_error, CommandGateway, FetchedMail, GatewayError, Listing, MailListing, MailRecord,
    MailboxStats,
};
use crate::app::state::notification::{NotificationSeverity, SharedNotification};
use crate::app::state::session::{ActivityFlag, SharedSession};
use crate::app::state::transcript::{Channel, SharedTranscript, TranscriptMessage};
use std::fmt;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Error text the backend reports when the server hung up on us.
pub const FORCED_DISCONNECT_SENTINEL: &str = "connection closed by remote";
pub const FORCED_DISCONNECT_NOTICE: &str = "Connection to the server was lost, please log in again";

const SECRET_MASK: char = '*';

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoginField {
    Address,
    Username,
    Password,
}

impl fmt::Display for LoginField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LoginField::Address => "address",
            LoginField::Username => "username",
            LoginField::Password => "password",
        };
        f.write_str(name)
    }
}

/// A login attempt that stopped at `field`. `reason` is only present when the backend gave a
/// readable message.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoginFailure {
    pub field: LoginField,
    pub reason: Option<String>,
}

#[derive(Clone, PartialEq, Eq)]
pub struct LoginRequest {
    pub server_address: String,
    pub username: String,
    pub password: String,
    pub use_tls: bool,
}

impl fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginRequest")
            .field("server_address", &self.server_address)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("use_tls", &self.use_tls)
            .finish()
    }
}

/// Runs the user-facing mail operations against the gateway and records every step in the
/// transcript.
///
/// Steps of one operation run strictly in order. Nothing here serialises separate operations;
/// callers that spawn several at once get interleaved transcript entries.
#[derive(Clone)]
pub struct SessionOrchestrator {
    gateway: Arc<dyn CommandGateway>,
    transcript: SharedTranscript,
    session: SharedSession,
    notifications: SharedNotification,
}

impl SessionOrchestrator {
    pub fn new(
        gateway: Arc<dyn CommandGateway>,
        transcript: SharedTranscript,
        session: SharedSession,
        notifications: SharedNotification,
    ) -> Self {
        Self {
            gateway,
            transcript,
            session,
            notifications,
        }
    }

    pub fn session_generation(&self) -> u64 {
        self.session.lock().generation()
    }

    pub async fn login(&self, request: &LoginRequest) -> Result<(), LoginFailure> {
        debug!(address = %request.server_address, tls = request.use_tls, "connect");
        if let Err(error) = self
            .gateway
            .connect(&request.server_address, request.use_tls)
            .await
        {
            return Err(self.fail_step(LoginField::Address, Channel::Network, error));
        }
        self.log_info(
            Channel::Network,
            format!("Connected to {}", request.server_address),
        );

        match self.request_identify(&request.username).await {
            Ok(status) => self.log_info(Channel::Response, status),
            Err(error) => {
                return Err(self.fail_step(LoginField::Username, Channel::Response, error));
            }
        }

        let masked: String = std::iter::repeat(SECRET_MASK)
            .take(request.password.chars().count())
            .collect();
        self.log_info(Channel::Command, masked);
        debug!("submit secret");
        match self.gateway.submit_secret(&request.password).await {
            Ok(status) => self.log_info(Channel::Response, status),
            Err(error) => {
                return Err(self.fail_step(LoginField::Password, Channel::Response, error));
            }
        }

        self.session
            .lock()
            .establish(&request.server_address, &request.username);
        info!(address = %request.server_address, user = %request.username, "logged in");
        Ok(())
    }

    /// Runs the statistics and listing phases side by side. The listing phase always clears
    /// `fetching`, whatever either phase returns.
    pub async fn refresh_mail_list(&self, fetching: &ActivityFlag) -> Vec<MailListing> {
        let ((), listings) = tokio::join!(self.stats_phase(), self.listing_phase(fetching));
        listings
    }

    /// Retrieves one message. On failure nothing but the transcript changes.
    pub async fn fetch_mail(&self, index: u64) -> Result<MailRecord, GatewayError> {
        match self.request_fetch(index).await {
            Ok(FetchedMail { mail, status }) => {
                self.log_info(Channel::Response, format!("{status}\r\n{}.\r\n", mail.raw));
                Ok(mail)
            }
            Err(error) => {
                self.log_error(Channel::Response, &error);
                Err(error)
            }
        }
    }

    /// Ends the session. A failed quit leaves the client logged in.
    pub async fn logout(&self) {
        match self.request_logout().await {
            Ok(status) => {
                self.log_info(Channel::Response, status);
                self.session.lock().sign_out();
                info!("logged out");
            }
            Err(error) => self.log_error(Channel::Response, &error),
        }
    }

    async fn request_identify(&self, username: &str) -> Result<String, GatewayError> {
        let command = self.gateway.identify_echo(username).await?;
        self.log_info(Channel::Command, command);
        debug!(%username, "identify");
        self.gateway.identify(username).await
    }

    async fn request_stats(&self) -> Result<MailboxStats, GatewayError> {
        let command = self.gateway.mailbox_stats_echo().await?;
        self.log_info(Channel::Command, command);
        debug!("mailbox stats");
        self.gateway.mailbox_stats().await
    }

    async fn request_listing(&self) -> Result<Listing, GatewayError> {
        let command = self.gateway.listing_echo().await?;
        self.log_info(Channel::Command, command);
        debug!("listing");
        self.gateway.listing().await
    }

    async fn request_fetch(&self, index: u64) -> Result<FetchedMail, GatewayError> {
        let command = self.gateway.fetch_echo(index).await?;
        self.log_info(Channel::Command, command);
        debug!(index, "fetch");
        self.gateway.fetch(index).await
    }

    async fn request_logout(&self) -> Result<String, GatewayError> {
        let command = self.gateway.logout_echo().await?;
        self.log_info(Channel::Command, command);
        debug!("logout");
        self.gateway.logout().await
    }

    async fn stats_phase(&self) {
        match self.request_stats().await {
            Ok(stats) => self.log_info(
                Channel::Response,
                format!("{} {} {}", stats.count, stats.total_bytes, stats.status),
            ),
            Err(error) => self.log_error(Channel::Response, &error),
        }
    }

    async fn listing_phase(&self, fetching: &ActivityFlag) -> Vec<MailListing> {
        let listings = match self.request_listing().await {
            Ok(listing) => {
                self.log_info(Channel::Response, listing_text(&listing));
                listing.entries
            }
            Err(error) => {
                self.log_error(Channel::Response, &error);
                Vec::new()
            }
        };
        fetching.clear();
        listings
    }

    fn fail_step(&self, field: LoginField, channel: Channel, error: GatewayError) -> LoginFailure {
        let reason = check_error(&error).map(str::to_string);
        self.log_error(channel, &error);
        debug!(%field, "login step failed");
        LoginFailure { field, reason }
    }

    fn log_info(&self, channel: Channel, text: impl Into<String>) {
        self.transcript
            .lock()
            .append(TranscriptMessage::info(channel, text));
    }

    fn log_error(&self, channel: Channel, error: &GatewayError) {
        let text = error_text(error);
        if text == FORCED_DISCONNECT_SENTINEL {
            self.force_disconnect(text);
            return;
        }
        self.transcript
            .lock()
            .append(TranscriptMessage::error(channel, text));
    }

    fn force_disconnect(&self, text: String) {
        warn!("server closed the connection, signing out");
        self.transcript
            .lock()
            .append(TranscriptMessage::error(Channel::Network, text));
        self.session.lock().sign_out();
        self.notifications.lock().show(
            FORCED_DISCONNECT_NOTICE,
            NotificationSeverity::Error,
            Instant::now(),
        );
    }
}

fn error_text(error: &GatewayError) -> String {
    match error {
        GatewayError::Payload(value) => match check_error(error) {
            Some(message) => message.to_string(),
            None => {
                warn!(payload = %value, "error payload without a readable message");
                format!("unrecognized error: {value}")
            }
        },
        other => other.to_string(),
    }
}

fn listing_text(listing: &Listing) -> String {
    let mut lines = Vec::with_capacity(listing.entries.len() + 2);
    lines.push(listing.status.clone());
    lines.extend(
        listing
            .entries
            .iter()
            .map(|entry| format!("{} {}", entry.index, entry.size_bytes)),
    );
    lines.push(".".to_string());
    lines.join("\r\n") + "\r\n"
}
