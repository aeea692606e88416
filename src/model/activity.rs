//! Activity feed entries.
//!
//! On the wire an activity carries one of several optional payload fields.
//! Here that is folded into [`ActivityKind`] so consumers match exhaustively
//! instead of probing fields one by one.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanStep {
    #[serde(default, deserialize_with = "crate::model::null_as_default")]
    pub title: String,
}

/// The populated payload of an activity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActivityKind {
    UserMessaged { message: String },
    AgentMessaged { message: String },
    PlanGenerated { steps: Vec<PlanStep> },
    ProgressUpdated { title: String, description: String },
    SessionCompleted,
    SessionFailed { reason: String },
    /// No payload this client knows about.
    Unknown,
}

/// A single timestamped event in a session's history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "ActivityWire", into = "ActivityWire")]
pub struct Activity {
    pub name: String,
    pub id: String,
    pub description: String,
    /// `createTime` exactly as the server sent it.
    pub create_time: String,
    /// Parsed `createTime`; `None` when the server value is not RFC 3339.
    pub created_at: Option<DateTime<Utc>>,
    pub originator: String,
    pub kind: ActivityKind,
}

impl Activity {
    pub fn new(id: impl Into<String>, create_time: impl Into<String>, kind: ActivityKind) -> Self {
        let id = id.into();
        let create_time = create_time.into();
        Self {
            name: String::new(),
            created_at: parse_timestamp(&create_time),
            id,
            description: String::new(),
            create_time,
            originator: String::new(),
            kind,
        }
    }
}

fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|time| time.with_timezone(&Utc))
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ActivityWire {
    #[serde(default, deserialize_with = "crate::model::null_as_default")]
    name: String,
    #[serde(default, deserialize_with = "crate::model::null_as_default")]
    id: String,
    #[serde(default, deserialize_with = "crate::model::null_as_default")]
    description: String,
    #[serde(default, deserialize_with = "crate::model::null_as_default")]
    create_time: String,
    #[serde(default, deserialize_with = "crate::model::null_as_default")]
    originator: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    agent_messaged: Option<AgentMessaged>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    user_messaged: Option<UserMessaged>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    plan_generated: Option<PlanGenerated>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    progress_updated: Option<ProgressUpdated>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    session_completed: Option<SessionCompleted>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    session_failed: Option<SessionFailed>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AgentMessaged {
    #[serde(default, deserialize_with = "crate::model::null_as_default")]
    agent_message: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UserMessaged {
    #[serde(default, deserialize_with = "crate::model::null_as_default")]
    user_message: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct PlanGenerated {
    #[serde(default, deserialize_with = "crate::model::null_as_default")]
    plan: Plan,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct Plan {
    #[serde(default, deserialize_with = "crate::model::null_as_default")]
    steps: Vec<PlanStep>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct ProgressUpdated {
    #[serde(default, deserialize_with = "crate::model::null_as_default")]
    title: String,
    #[serde(default, deserialize_with = "crate::model::null_as_default")]
    description: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct SessionCompleted {}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct SessionFailed {
    #[serde(default, deserialize_with = "crate::model::null_as_default")]
    reason: String,
}

impl From<ActivityWire> for Activity {
    fn from(wire: ActivityWire) -> Self {
        // Precedence follows the order the payloads are checked in the feed.
        let kind = if let Some(user) = wire.user_messaged {
            ActivityKind::UserMessaged {
                message: user.user_message,
            }
        } else if let Some(agent) = wire.agent_messaged {
            ActivityKind::AgentMessaged {
                message: agent.agent_message,
            }
        } else if let Some(plan) = wire.plan_generated {
            ActivityKind::PlanGenerated {
                steps: plan.plan.steps,
            }
        } else if let Some(progress) = wire.progress_updated {
            ActivityKind::ProgressUpdated {
                title: progress.title,
                description: progress.description,
            }
        } else if wire.session_completed.is_some() {
            ActivityKind::SessionCompleted
        } else if let Some(failed) = wire.session_failed {
            ActivityKind::SessionFailed {
                reason: failed.reason,
            }
        } else {
            ActivityKind::Unknown
        };

        Activity {
            created_at: parse_timestamp(&wire.create_time),
            name: wire.name,
            id: wire.id,
            description: wire.description,
            create_time: wire.create_time,
            originator: wire.originator,
            kind,
        }
    }
}

impl From<Activity> for ActivityWire {
    fn from(activity: Activity) -> Self {
        let mut wire = ActivityWire {
            name: activity.name,
            id: activity.id,
            description: activity.description,
            create_time: activity.create_time,
            originator: activity.originator,
            ..Default::default()
        };
        match activity.kind {
            ActivityKind::UserMessaged { message } => {
                wire.user_messaged = Some(UserMessaged {
                    user_message: message,
                });
            }
            ActivityKind::AgentMessaged { message } => {
                wire.agent_messaged = Some(AgentMessaged {
                    agent_message: message,
                });
            }
            ActivityKind::PlanGenerated { steps } => {
                wire.plan_generated = Some(PlanGenerated {
                    plan: Plan { steps },
                });
            }
            ActivityKind::ProgressUpdated { title, description } => {
                wire.progress_updated = Some(ProgressUpdated { title, description });
            }
            ActivityKind::SessionCompleted => {
                wire.session_completed = Some(SessionCompleted {});
            }
            ActivityKind::SessionFailed { reason } => {
                wire.session_failed = Some(SessionFailed { reason });
            }
            ActivityKind::Unknown => {}
        }
        wire
    }
}
