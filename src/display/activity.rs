//! Activity presentation
//!
//! Maps each activity payload to the label, markdown body and clipboard text
//! shown in the feed.

use crate::model::{Activity, ActivityKind, PlanStep};

/// Rendered form of one activity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivityDetails {
    pub label: &'static str,
    pub markdown: String,
    pub copy_text: String,
}

/// Label, markdown and copy text for an activity. Total over all payloads.
pub fn activity_details(activity: &Activity) -> ActivityDetails {
    match &activity.kind {
        ActivityKind::UserMessaged { message } => ActivityDetails {
            label: "You",
            markdown: format!("**You:**\n\n{}", message),
            copy_text: message.clone(),
        },
        ActivityKind::AgentMessaged { message } => ActivityDetails {
            label: "Jules",
            markdown: format!("**Jules:**\n\n{}", message),
            copy_text: message.clone(),
        },
        ActivityKind::PlanGenerated { steps } => {
            let plan = numbered_steps(steps);
            ActivityDetails {
                label: "Plan Generated",
                markdown: format!("**Plan Generated:**\n\n{}", plan),
                copy_text: plan,
            }
        }
        ActivityKind::ProgressUpdated { title, description } => ActivityDetails {
            label: "Progress Update",
            markdown: format!("**Progress Update:**\n\n**{}**\n{}", title, description),
            copy_text: format!("{}\n{}", title, description),
        },
        ActivityKind::SessionCompleted => ActivityDetails {
            label: "Session Completed",
            markdown: "**Session Completed**".to_string(),
            copy_text: "Session Completed".to_string(),
        },
        ActivityKind::SessionFailed { reason } => ActivityDetails {
            label: "Session Failed",
            markdown: format!("**Session Failed:**\n\n{}", reason),
            copy_text: reason.clone(),
        },
        ActivityKind::Unknown => ActivityDetails {
            label: "Unknown Activity",
            markdown: String::new(),
            copy_text: String::new(),
        },
    }
}

/// `1. first\n2. second`, 1-indexed.
pub fn numbered_steps(steps: &[PlanStep]) -> String {
    steps
        .iter()
        .enumerate()
        .map(|(index, step)| format!("{}. {}", index + 1, step.title))
        .collect::<Vec<_>>()
        .join("\n")
}

/// One-line summary shown above the message prompt.
pub fn last_activity_summary(activity: &Activity) -> Option<String> {
    match &activity.kind {
        ActivityKind::UserMessaged { message } => Some(format!("You: {}", message)),
        ActivityKind::AgentMessaged { message } => Some(format!("Jules: {}", message)),
        ActivityKind::PlanGenerated { .. } => Some("Plan Generated".to_string()),
        ActivityKind::ProgressUpdated { title, .. } => Some(format!("Progress Update: {}", title)),
        ActivityKind::SessionCompleted => Some("Session Completed".to_string()),
        ActivityKind::SessionFailed { reason } => Some(format!("Session Failed: {}", reason)),
        ActivityKind::Unknown => None,
    }
}
