use chrono::Utc;
use std::collections::VecDeque;
use std::path::Path;

/// Where the agent is in its work cycle, as last reported by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AgentStatus {
    #[default]
    Idle,
    /// Idle again after finishing a task.
    Done,
    Working,
    Error,
    WaitingForPermission,
}

impl AgentStatus {
    pub fn label(self) -> &'static str {
        match self {
            AgentStatus::Idle => "ready",
            AgentStatus::Done => "done",
            AgentStatus::Working => "working",
            AgentStatus::Error => "error",
            AgentStatus::WaitingForPermission => "needs approval",
        }
    }
}

/// In-memory, per-process session. Nothing here is persisted.
#[derive(Debug, Clone)]
pub struct Session {
    pub id: String,
    pub project: String,
    pub status: AgentStatus,
    pub prompt_timestamps: VecDeque<f64>,
}

impl Session {
    pub fn new(id: impl Into<String>, project: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            project: project.into(),
            status: AgentStatus::Idle,
            prompt_timestamps: VecDeque::new(),
        }
    }
}

pub fn generate_id() -> String {
    format!("{}-{}", std::process::id(), Utc::now().timestamp_millis())
}

pub fn project_name(directory: Option<&Path>) -> String {
    directory
        .and_then(|dir| dir.file_name())
        .and_then(|name| name.to_str())
        .filter(|name| !name.is_empty())
        .unwrap_or("agent")
        .to_string()
}

pub fn now_seconds() -> f64 {
    Utc::now().timestamp_millis() as f64 / 1000.0
}
