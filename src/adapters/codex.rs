use crate::events::{Envelope, HostEvent};
use anyhow::Context;
use serde_json::Value;

pub fn parse_event(payload: &str) -> anyhow::Result<Option<Envelope>> {
    let value: Value = serde_json::from_str(payload).context("parse codex payload")?;
    let event_type = value.get("type").and_then(|v| v.as_str()).unwrap_or("");

    match event_type {
        "agent-turn-complete" => {
            let mut envelope = Envelope::new(HostEvent::SessionIdle);
            envelope.session_id = value
                .get("thread-id")
                .and_then(|v| v.as_str())
                .map(|s| s.to_string());
            envelope.directory = value
                .get("cwd")
                .and_then(|v| v.as_str())
                .map(|s| s.to_string());
            Ok(Some(envelope))
        }
        _ => Ok(None),
    }
}
