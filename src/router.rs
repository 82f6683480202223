use crate::config::Config;
use crate::events::{Category, HostEvent, MessageRole};
use crate::session::{AgentStatus, Session};
use crate::spam::SpamDetector;

/// What one host event resolves to, after gating.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Action {
    /// Category the event maps to, whether or not it ends up audible.
    pub category: Option<Category>,
    pub play_sound: bool,
    pub notify: bool,
    /// The event deserves the user's attention; drives the title marker
    /// and is unaffected by muting.
    pub attention: bool,
    pub status_label: &'static str,
}

/// Maps a host event to an [`Action`], advancing the session's status and
/// burst window along the way.
pub fn route(
    event: &HostEvent,
    config: &Config,
    paused: bool,
    detector: &SpamDetector,
    session: &mut Session,
    now: f64,
) -> Action {
    let (category, wants_notification, status_label) = match event {
        HostEvent::ProcessStart | HostEvent::SessionCreated => {
            session.status = AgentStatus::Idle;
            (Some(Category::SessionStart), false, AgentStatus::Idle.label())
        }
        HostEvent::SessionStatus(status) if status.is_working() => {
            session.status = AgentStatus::Working;
            let category = detector
                .observe(session, now)
                .then_some(Category::UserSpam);
            (category, false, AgentStatus::Working.label())
        }
        HostEvent::SessionIdle => {
            session.status = AgentStatus::Done;
            (Some(Category::TaskComplete), true, AgentStatus::Done.label())
        }
        HostEvent::SessionError => {
            session.status = AgentStatus::Error;
            (Some(Category::TaskError), true, AgentStatus::Error.label())
        }
        HostEvent::PermissionAsked => {
            session.status = AgentStatus::WaitingForPermission;
            (
                Some(Category::InputRequired),
                true,
                AgentStatus::WaitingForPermission.label(),
            )
        }
        HostEvent::MessageUpdated(MessageRole::User) => {
            detector.observe(session, now);
            (None, false, session.status.label())
        }
        HostEvent::SessionStatus(_) | HostEvent::MessageUpdated(_) => {
            (None, false, session.status.label())
        }
    };

    let audible = match category {
        Some(category) => {
            let allowed = config.is_category_enabled(category);
            if !allowed {
                tracing::debug!(category = %category, "category disabled");
            }
            allowed && config.enabled && !paused
        }
        None => false,
    };

    Action {
        category,
        play_sound: audible,
        notify: audible && wants_notification && config.desktop_notifications,
        attention: wants_notification,
        status_label,
    }
}

pub const ATTENTION_MARKER: &str = "\u{25cf} ";

pub fn title(project: &str, action: &Action) -> String {
    let marker = if action.attention { ATTENTION_MARKER } else { "" };
    format!("{marker}{project}: {}", action.status_label)
}
