use crate::events::{Envelope, HostEvent, MessageRole, SessionStatus};
use anyhow::Context;
use serde_json::Value;

/// Parses one opencode bus event: `{"type": ..., "properties": {...}}`.
pub fn parse_event(payload: &str) -> anyhow::Result<Option<Envelope>> {
    let value: Value = serde_json::from_str(payload).context("parse opencode payload")?;
    let event_type = value.get("type").and_then(|v| v.as_str()).unwrap_or("");
    let props = value.get("properties").unwrap_or(&Value::Null);

    let event = match event_type {
        "session.created" => HostEvent::SessionCreated,
        "session.idle" => HostEvent::SessionIdle,
        "session.error" => HostEvent::SessionError,
        "permission.asked" | "permission.updated" => HostEvent::PermissionAsked,
        "session.status" => {
            let status = props
                .pointer("/status/type")
                .and_then(|v| v.as_str())
                .or_else(|| props.get("status").and_then(|v| v.as_str()))
                .unwrap_or("");
            HostEvent::SessionStatus(SessionStatus::parse(status))
        }
        "message.updated" => {
            let role = props
                .pointer("/info/role")
                .and_then(|v| v.as_str())
                .unwrap_or("");
            HostEvent::MessageUpdated(MessageRole::parse(role))
        }
        _ => return Ok(None),
    };

    let session_id = props
        .get("sessionID")
        .or_else(|| props.pointer("/info/sessionID"))
        .or_else(|| props.pointer("/info/id").filter(|_| event_type == "session.created"))
        .and_then(|v| v.as_str())
        .map(|s| s.to_string());

    Ok(Some(Envelope {
        event,
        session_id,
        directory: None,
    }))
}
