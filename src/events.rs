use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The closed set of sound categories a pack can provide.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ValueEnum,
)]
pub enum Category {
    #[serde(rename = "session.start")]
    #[value(name = "session.start")]
    SessionStart,
    #[serde(rename = "task.acknowledge")]
    #[value(name = "task.acknowledge")]
    TaskAcknowledge,
    #[serde(rename = "task.complete")]
    #[value(name = "task.complete")]
    TaskComplete,
    #[serde(rename = "task.error")]
    #[value(name = "task.error")]
    TaskError,
    #[serde(rename = "input.required")]
    #[value(name = "input.required")]
    InputRequired,
    #[serde(rename = "resource.limit")]
    #[value(name = "resource.limit")]
    ResourceLimit,
    #[serde(rename = "user.spam")]
    #[value(name = "user.spam")]
    UserSpam,
}

impl Category {
    pub const ALL: [Category; 7] = [
        Category::SessionStart,
        Category::TaskAcknowledge,
        Category::TaskComplete,
        Category::TaskError,
        Category::InputRequired,
        Category::ResourceLimit,
        Category::UserSpam,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Category::SessionStart => "session.start",
            Category::TaskAcknowledge => "task.acknowledge",
            Category::TaskComplete => "task.complete",
            Category::TaskError => "task.error",
            Category::InputRequired => "input.required",
            Category::ResourceLimit => "resource.limit",
            Category::UserSpam => "user.spam",
        }
    }

    /// Maps a legacy manifest key onto the canonical taxonomy.
    pub fn from_legacy(key: &str) -> Option<Self> {
        match key {
            "greeting" => Some(Category::SessionStart),
            "acknowledge" => Some(Category::TaskAcknowledge),
            "complete" => Some(Category::TaskComplete),
            "error" => Some(Category::TaskError),
            "permission" => Some(Category::InputRequired),
            "resource_limit" => Some(Category::ResourceLimit),
            "annoyed" => Some(Category::UserSpam),
            _ => None,
        }
    }

    pub fn notification_message(self) -> &'static str {
        match self {
            Category::SessionStart => "Session started",
            Category::TaskAcknowledge => "On it",
            Category::TaskComplete => "Task complete",
            Category::TaskError => "Something went wrong",
            Category::InputRequired => "Permission needed",
            Category::ResourceLimit => "Resource limit reached",
            Category::UserSpam => "Easy there",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown category: {0}")]
pub struct UnknownCategory(pub String);

impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|category| category.as_str() == s)
            .ok_or_else(|| UnknownCategory(s.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    Claude,
    Codex,
    #[value(name = "opencode", alias = "open-code")]
    OpenCode,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionStatus {
    Busy,
    Running,
    Other(String),
}

impl SessionStatus {
    pub fn parse(raw: &str) -> Self {
        match raw {
            "busy" => SessionStatus::Busy,
            "running" => SessionStatus::Running,
            other => SessionStatus::Other(other.to_string()),
        }
    }

    pub fn is_working(&self) -> bool {
        matches!(self, SessionStatus::Busy | SessionStatus::Running)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageRole {
    User,
    Assistant,
    Other,
}

impl MessageRole {
    pub fn parse(raw: &str) -> Self {
        match raw {
            "user" => MessageRole::User,
            "assistant" => MessageRole::Assistant,
            _ => MessageRole::Other,
        }
    }
}

/// Lifecycle events delivered by the host, already stripped of host-specific shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostEvent {
    /// Synthesized once when a long-lived listener starts.
    ProcessStart,
    SessionCreated,
    SessionIdle,
    SessionError,
    PermissionAsked,
    SessionStatus(SessionStatus),
    MessageUpdated(MessageRole),
}

/// A parsed host event plus the hints the host attached to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Envelope {
    pub event: HostEvent,
    pub session_id: Option<String>,
    pub directory: Option<String>,
}

impl Envelope {
    pub fn new(event: HostEvent) -> Self {
        Self {
            event,
            session_id: None,
            directory: None,
        }
    }
}
