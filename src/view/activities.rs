//! Activity feed of a single session.

use parking_lot::Mutex;

use crate::api::ApiError;
use crate::core::services::{ActivityService, CommandService};
use crate::core::JulesCore;
use crate::display::{activity_details, last_activity_summary};
use crate::model::{Activity, Session};
use crate::view::request_slot::RequestSlot;

/// State behind the chat screen of one session.
///
/// Activities are kept newest first. All methods take `&self` so a front end
/// can refresh from several callbacks at once; the latest refresh wins.
pub struct ActivitiesView {
    core: JulesCore,
    session: Session,
    activities: Mutex<Vec<Activity>>,
    requests: RequestSlot,
}

impl ActivitiesView {
    pub fn new(core: JulesCore, session: Session) -> Self {
        Self {
            core,
            session,
            activities: Mutex::new(Vec::new()),
            requests: RequestSlot::new(),
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Heading for the feed, e.g. `Chat: Fix login`.
    pub fn title(&self) -> String {
        format!("Chat: {}", self.session.feed_title())
    }

    /// Refetch the feed. On failure the previous feed is kept.
    pub async fn refresh(&self) -> Result<(), ApiError> {
        let ticket = self.requests.begin();
        let activities = ActivityService::list_activities(&self.core, &self.session.id).await?;

        if self.requests.is_current(ticket) {
            *self.activities.lock() = activities;
        } else {
            tracing::debug!(
                session_id = %self.session.id,
                "Dropping activities from a superseded request"
            );
        }
        Ok(())
    }

    /// Current feed, newest first.
    pub fn activities(&self) -> Vec<Activity> {
        self.activities.lock().clone()
    }

    pub fn latest(&self) -> Option<Activity> {
        self.activities.lock().first().cloned()
    }

    /// Summary of the newest activity, shown when composing a reply.
    pub fn last_activity_summary(&self) -> Option<String> {
        self.latest().as_ref().and_then(last_activity_summary)
    }

    /// Copy text of the activity with this id.
    pub fn copy_text(&self, activity_id: &str) -> Option<String> {
        self.activities
            .lock()
            .iter()
            .find(|activity| activity.id == activity_id)
            .map(|activity| activity_details(activity).copy_text)
    }

    /// Send a reply, then refetch the feed.
    ///
    /// Only the send decides the result: a failed refetch has already been
    /// reported and leaves the previous feed in place.
    pub async fn send_message(&self, prompt: &str) -> Result<(), ApiError> {
        CommandService::send_message(&self.core, &self.session.id, prompt).await?;
        if let Err(err) = self.refresh().await {
            tracing::warn!(
                session_id = %self.session.id,
                error = %err,
                "Failed to refresh activities after sending a message"
            );
        }
        Ok(())
    }
}
