use crate::app::runtime::gateway::{
    FetchedMail, GatewayError, Listing, MailListing, MailRecord, MailboxStats,
};
use serde_json::Value;

pub struct RpcResponse {
    pub id: String,
    pub result: Option<Value>,
    pub error: Option<Value>,
}

impl RpcResponse {
    pub fn into_result(self) -> Result<Value, GatewayError> {
        if let Some(error) = self.error {
            return Err(error_from_value(error));
        }
        Ok(self.result.unwrap_or(Value::Null))
    }
}

pub enum BackendLine {
    Empty,
    Response(RpcResponse),
    Unparsed(String),
}

fn id_from_value(value: &Value) -> Option<String> {
    match value {
        Value::String(id) => Some(id.clone()),
        Value::Number(id) => Some(id.to_string()),
        _ => None,
    }
}

pub fn error_from_value(value: Value) -> GatewayError {
    match value {
        Value::String(text) => GatewayError::Text(text),
        other => GatewayError::Payload(other),
    }
}

pub fn parse_backend_line(raw: &str) -> BackendLine {
    let trimmed = raw.trim_end();
    if trimmed.is_empty() {
        return BackendLine::Empty;
    }

    let value: Value = match serde_json::from_str(trimmed) {
        Ok(value) => value,
        Err(_) => return BackendLine::Unparsed(trimmed.to_string()),
    };

    let Some(id) = value.get("id").and_then(id_from_value) else {
        return BackendLine::Unparsed(trimmed.to_string());
    };
    if value.get("result").is_none() && value.get("error").is_none() {
        return BackendLine::Unparsed(trimmed.to_string());
    }

    BackendLine::Response(RpcResponse {
        id,
        result: value.get("result").cloned(),
        error: value.get("error").filter(|error| !error.is_null()).cloned(),
    })
}

pub fn request_line(id: &str, method: &str, params: Value) -> String {
    let msg = serde_json::json!({
        "jsonrpc": "2.0",
        "id": id,
        "method": method,
        "params": params
    });
    msg.to_string() + "\n"
}

fn decode_error(what: &str, error: serde_json::Error) -> GatewayError {
    GatewayError::Decode(format!("{what}: {error}"))
}

pub fn decode_text(value: Value) -> Result<String, GatewayError> {
    match value {
        Value::String(text) => Ok(text),
        Value::Null => Ok(String::new()),
        other => Err(GatewayError::Decode(format!("expected text, got {other}"))),
    }
}

pub fn decode_stats(value: Value) -> Result<MailboxStats, GatewayError> {
    let (count, total_bytes, status): (u64, u64, String) =
        serde_json::from_value(value).map_err(|error| decode_error("stat", error))?;
    Ok(MailboxStats {
        count,
        total_bytes,
        status,
    })
}

pub fn decode_listing(value: Value) -> Result<Listing, GatewayError> {
    let (pairs, status): (Vec<(u64, u64)>, String) =
        serde_json::from_value(value).map_err(|error| decode_error("list", error))?;
    Ok(Listing {
        entries: pairs
            .into_iter()
            .map(|(index, size_bytes)| MailListing { index, size_bytes })
            .collect(),
        status,
    })
}

pub fn decode_fetched(value: Value) -> Result<FetchedMail, GatewayError> {
    let (mail, status): (MailRecord, String) =
        serde_json::from_value(value).map_err(|error| decode_error("retr", error))?;
    Ok(FetchedMail { mail, status })
}
