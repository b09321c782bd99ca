use crate::app::runtime::gateway::{
    CommandGateway, FetchedMail, GatewayError, Listing, MailboxStats,
};
use crate::app::runtime::parser::{
    decode_fetched, decode_listing, decode_stats, decode_text, parse_backend_line, request_line,
    BackendLine,
};
use crate::config::BackendCommand;
use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::process::Stdio;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWriteExt, BufReader, BufWriter};
use tokio::process::{Child, ChildStdin, Command};
use tokio::sync::oneshot;
use tracing::{debug, warn};

type Reply = Result<Value, GatewayError>;

/// Requests awaiting a response. Once the backend's stdout closes no new request is accepted.
#[derive(Default)]
struct PendingRequests {
    closed: bool,
    waiters: HashMap<String, oneshot::Sender<Reply>>,
}

type PendingMap = Arc<Mutex<PendingRequests>>;

/// Command gateway backed by a child process speaking newline-delimited JSON over stdio.
pub struct ProcessGateway {
    writer: tokio::sync::Mutex<BufWriter<ChildStdin>>,
    pending: PendingMap,
    next_id: AtomicU64,
    _child: Child,
}

impl ProcessGateway {
    /// Spawns the backend. Must be called from within a tokio runtime.
    pub fn spawn(command: &BackendCommand) -> Result<Self, GatewayError> {
        let mut child = Command::new(&command.program)
            .args(&command.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|error| {
                GatewayError::Transport(format!("failed to start {}: {error}", command.program))
            })?;

        let stdin = child
            .stdin
            .take()
            .ok_or_else(|| GatewayError::Transport("backend stdin missing".to_string()))?;
        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| GatewayError::Transport("backend stdout missing".to_string()))?;
        let stderr = child
            .stderr
            .take()
            .ok_or_else(|| GatewayError::Transport("backend stderr missing".to_string()))?;

        let pending = PendingMap::default();
        tokio::spawn(read_responses(BufReader::new(stdout), pending.clone()));
        tokio::spawn(forward_stderr(BufReader::new(stderr)));
        debug!(program = %command.program, args = ?command.args, "backend started");

        Ok(Self {
            writer: tokio::sync::Mutex::new(BufWriter::new(stdin)),
            pending,
            next_id: AtomicU64::new(0),
            _child: child,
        })
    }

    async fn call(&self, method: &str, params: Value) -> Reply {
        let id = (self.next_id.fetch_add(1, Ordering::Relaxed) + 1).to_string();
        let (tx, rx) = oneshot::channel();
        {
            let mut pending = self.pending.lock();
            if pending.closed {
                return Err(GatewayError::Transport("backend exited".to_string()));
            }
            pending.waiters.insert(id.clone(), tx);
        }

        debug!(%id, method, "gateway request");
        let line = request_line(&id, method, params);
        let written = {
            let mut writer = self.writer.lock().await;
            match writer.write_all(line.as_bytes()).await {
                Ok(()) => writer.flush().await,
                Err(error) => Err(error),
            }
        };
        if let Err(error) = written {
            self.pending.lock().waiters.remove(&id);
            return Err(GatewayError::Transport(error.to_string()));
        }

        rx.await
            .unwrap_or_else(|_| Err(GatewayError::Transport("backend exited".to_string())))
    }

    async fn call_text(&self, method: &str, params: Value) -> Result<String, GatewayError> {
        decode_text(self.call(method, params).await?)
    }
}

#[async_trait]
impl CommandGateway for ProcessGateway {
    async fn connect(&self, address: &str, use_tls: bool) -> Result<(), GatewayError> {
        self.call("connect", json!({ "addr": address, "with_tls": use_tls }))
            .await
            .map(|_| ())
    }

    async fn identify_echo(&self, username: &str) -> Result<String, GatewayError> {
        self.call_text("user_msg", json!({ "name": username })).await
    }

    async fn identify(&self, username: &str) -> Result<String, GatewayError> {
        self.call_text("user", json!({ "name": username })).await
    }

    async fn submit_secret(&self, secret: &str) -> Result<String, GatewayError> {
        self.call_text("pass", json!({ "secret": secret })).await
    }

    async fn mailbox_stats_echo(&self) -> Result<String, GatewayError> {
        self.call_text("stat_msg", json!({})).await
    }

    async fn mailbox_stats(&self) -> Result<MailboxStats, GatewayError> {
        decode_stats(self.call("stat", json!({})).await?)
    }

    async fn listing_echo(&self) -> Result<String, GatewayError> {
        self.call_text("list_msg", json!({})).await
    }

    async fn listing(&self) -> Result<Listing, GatewayError> {
        decode_listing(self.call("list", json!({})).await?)
    }

    async fn fetch_echo(&self, index: u64) -> Result<String, GatewayError> {
        self.call_text("retr_msg", json!({ "id": index })).await
    }

    async fn fetch(&self, index: u64) -> Result<FetchedMail, GatewayError> {
        decode_fetched(self.call("retr", json!({ "id": index })).await?)
    }

    async fn logout_echo(&self) -> Result<String, GatewayError> {
        self.call_text("quit_msg", json!({})).await
    }

    async fn logout(&self) -> Result<String, GatewayError> {
        self.call_text("quit", json!({})).await
    }
}

fn dispatch_line(line: &str, pending: &PendingMap) {
    match parse_backend_line(line) {
        BackendLine::Empty => {}
        BackendLine::Response(response) => {
            let waiter = pending.lock().waiters.remove(&response.id);
            match waiter {
                Some(tx) => {
                    let _ = tx.send(response.into_result());
                }
                None => warn!(id = %response.id, "response for unknown request"),
            }
        }
        BackendLine::Unparsed(text) => warn!(line = %text, "unparseable backend output"),
    }
}

fn close_pending(pending: &PendingMap, reason: &str) {
    let waiters = {
        let mut pending = pending.lock();
        pending.closed = true;
        std::mem::take(&mut pending.waiters)
    };
    for (_, tx) in waiters {
        let _ = tx.send(Err(GatewayError::Transport(reason.to_string())));
    }
}

async fn read_responses<R: AsyncBufRead + Unpin>(reader: R, pending: PendingMap) {
    let mut lines = reader.lines();
    loop {
        match lines.next_line().await {
            Ok(Some(line)) => dispatch_line(&line, &pending),
            Ok(None) => break,
            Err(error) => {
                warn!(%error, "backend stdout read failed");
                break;
            }
        }
    }
    debug!("backend stdout closed");
    close_pending(&pending, "backend exited");
}

async fn forward_stderr<R: AsyncBufRead + Unpin>(reader: R) {
    let mut lines = reader.lines();
    while let Ok(Some(line)) = lines.next_line().await {
        let trimmed = line.trim_end();
        if !trimmed.is_empty() {
            debug!(target: "popdesk_tui::backend", "{trimmed}");
        }
    }
}
