use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MailListing {
    pub index: u64,
    pub size_bytes: u64,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MailboxStats {
    pub count: u64,
    pub total_bytes: u64,
    pub status: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Listing {
    pub entries: Vec<MailListing>,
    pub status: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub enum MailPart {
    Text(String),
    Html(String),
    #[serde(rename = "Bin")]
    Binary(Vec<u8>),
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct MailRecord {
    pub raw: String,
    pub subject: String,
    pub from: String,
    pub to: String,
    pub time: String,
    pub parts: Vec<MailPart>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FetchedMail {
    pub mail: MailRecord,
    pub status: String,
}

#[derive(Clone, Debug, thiserror::Error)]
pub enum GatewayError {
    /// Bare string error from the backend.
    #[error("{0}")]
    Text(String),
    /// Structured error object; may carry a human-readable message.
    #[error("{}", describe_payload(.0))]
    Payload(Value),
    #[error("backend unavailable: {0}")]
    Transport(String),
    #[error("unexpected backend result: {0}")]
    Decode(String),
}

fn describe_payload(value: &Value) -> String {
    payload_message(value)
        .map(str::to_string)
        .unwrap_or_else(|| value.to_string())
}

fn payload_message(value: &Value) -> Option<&str> {
    value
        .get("message")
        .and_then(Value::as_str)
        .or_else(|| value.get("msg").and_then(Value::as_str))
}

/// The single decoding rule for gateway errors: only a structured payload carrying a string
/// message is attributable. Everything else is a diagnostic.
pub fn check_error(error: &GatewayError) -> Option<&str> {
    match error {
        GatewayError::Payload(value) => payload_message(value),
        GatewayError::Text(_) | GatewayError::Transport(_) | GatewayError::Decode(_) => None,
    }
}

/// Remote mail operations as seen by the session orchestrator. The `*_echo` calls are
/// side-effect free and return the literal command text the following call will send.
#[async_trait]
pub trait CommandGateway: Send + Sync {
    async fn connect(&self, address: &str, use_tls: bool) -> Result<(), GatewayError>;

    async fn identify_echo(&self, username: &str) -> Result<String, GatewayError>;

    async fn identify(&self, username: &str) -> Result<String, GatewayError>;

    async fn submit_secret(&self, secret: &str) -> Result<String, GatewayError>;

    async fn mailbox_stats_echo(&self) -> Result<String, GatewayError>;

    async fn mailbox_stats(&self) -> Result<MailboxStats, GatewayError>;

    async fn listing_echo(&self) -> Result<String, GatewayError>;

    async fn listing(&self) -> Result<Listing, GatewayError>;

    async fn fetch_echo(&self, index: u64) -> Result<String, GatewayError>;

    async fn fetch(&self, index: u64) -> Result<FetchedMail, GatewayError>;

    async fn logout_echo(&self) -> Result<String, GatewayError>;

    async fn logout(&self) -> Result<String, GatewayError>;
}
