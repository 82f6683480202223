use crate::events::{Envelope, HostEvent, SessionStatus};
use anyhow::Context;
use serde_json::Value;

pub fn parse_event(payload: &str) -> anyhow::Result<Option<Envelope>> {
    let value: Value = serde_json::from_str(payload).context("parse claude payload")?;
    let hook = value
        .get("hook_event_name")
        .and_then(|v| v.as_str())
        .unwrap_or("");

    let event = match hook {
        "SessionStart" => HostEvent::SessionCreated,
        "Stop" => HostEvent::SessionIdle,
        "PostToolUseFailure" => HostEvent::SessionError,
        "PermissionRequest" => HostEvent::PermissionAsked,
        // Each hook runs in its own process, so the burst window starts empty
        // every time: this only moves the status to working, and `user.spam`
        // can fire for Claude only with `spam_threshold = 1`.
        "UserPromptSubmit" => HostEvent::SessionStatus(SessionStatus::Busy),
        "Notification" => {
            let kind = value
                .get("notification_type")
                .and_then(|v| v.as_str())
                .unwrap_or("");
            if kind == "permission_prompt" {
                HostEvent::PermissionAsked
            } else {
                return Ok(None);
            }
        }
        "PreToolUse" => {
            let tool_name = value
                .get("tool_name")
                .and_then(|v| v.as_str())
                .or_else(|| value.pointer("/tool/name").and_then(|v| v.as_str()))
                .unwrap_or("");

            if tool_name == "AskUserQuestion" {
                HostEvent::PermissionAsked
            } else {
                return Ok(None);
            }
        }
        _ => return Ok(None),
    };

    Ok(Some(Envelope {
        event,
        session_id: string_at(&value, "/session_id"),
        directory: string_at(&value, "/cwd"),
    }))
}

fn string_at(value: &Value, pointer: &str) -> Option<String> {
    value
        .pointer(pointer)
        .and_then(|v| v.as_str())
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string())
}
