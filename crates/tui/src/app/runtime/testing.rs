//! In-memory gateway for exercising orchestration without a backend process.

use crate::app::runtime::gateway::{
    CommandGateway, FetchedMail, GatewayError, Listing, MailListing, MailRecord, MailboxStats,
};
use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::HashMap;

/// Answers every call with canned data unless a failure was scripted for that operation.
#[derive(Default)]
pub(crate) struct ScriptedGateway {
    failures: HashMap<&'static str, GatewayError>,
    calls: Mutex<Vec<&'static str>>,
}

impl ScriptedGateway {
    pub(crate) fn failing(mut self, op: &'static str, error: GatewayError) -> Self {
        self.failures.insert(op, error);
        self
    }

    fn outcome<T>(&self, op: &'static str, value: T) -> Result<T, GatewayError> {
        self.calls.lock().push(op);
        match self.failures.get(op) {
            Some(error) => Err(error.clone()),
            None => Ok(value),
        }
    }

    pub(crate) fn calls(&self) -> Vec<&'static str> {
        self.calls.lock().clone()
    }
}

#[async_trait]
impl CommandGateway for ScriptedGateway {
    async fn connect(&self, _address: &str, _use_tls: bool) -> Result<(), GatewayError> {
        self.outcome("connect", ())
    }

    async fn identify_echo(&self, username: &str) -> Result<String, GatewayError> {
        self.outcome("identify_echo", format!("USER {username}"))
    }

    async fn identify(&self, _username: &str) -> Result<String, GatewayError> {
        self.outcome("identify", "user accepted".to_string())
    }

    async fn submit_secret(&self, _secret: &str) -> Result<String, GatewayError> {
        self.outcome("submit_secret", "mailbox ready".to_string())
    }

    async fn mailbox_stats_echo(&self) -> Result<String, GatewayError> {
        self.outcome("mailbox_stats_echo", "STAT".to_string())
    }

    async fn mailbox_stats(&self) -> Result<MailboxStats, GatewayError> {
        self.outcome(
            "mailbox_stats",
            MailboxStats {
                count: 2,
                total_bytes: 320,
                status: "maildrop has 2 messages".to_string(),
            },
        )
    }

    async fn listing_echo(&self) -> Result<String, GatewayError> {
        self.outcome("listing_echo", "LIST".to_string())
    }

    async fn listing(&self) -> Result<Listing, GatewayError> {
        self.outcome(
            "listing",
            Listing {
                entries: vec![
                    MailListing {
                        index: 1,
                        size_bytes: 120,
                    },
                    MailListing {
                        index: 2,
                        size_bytes: 200,
                    },
                ],
                status: "scan listing follows".to_string(),
            },
        )
    }

    async fn fetch_echo(&self, index: u64) -> Result<String, GatewayError> {
        self.outcome("fetch_echo", format!("RETR {index}"))
    }

    async fn fetch(&self, _index: u64) -> Result<FetchedMail, GatewayError> {
        self.outcome(
            "fetch",
            FetchedMail {
                mail: MailRecord {
                    raw: "Subject: hi\r\n\r\nbody\r\n".to_string(),
                    subject: "hi".to_string(),
                    ..MailRecord::default()
                },
                status: "message follows".to_string(),
            },
        )
    }

    async fn logout_echo(&self) -> Result<String, GatewayError> {
        self.outcome("logout_echo", "QUIT".to_string())
    }

    async fn logout(&self) -> Result<String, GatewayError> {
        self.outcome("logout", "bye".to_string())
    }
}
