use std::cmp::Reverse;

use crate::api::ApiError;
use crate::core::JulesCore;
use crate::model::Activity;
use crate::notify::Toast;

pub struct ActivityService;

impl ActivityService {
    /// A session's activities, newest first.
    pub async fn list_activities(
        core: &JulesCore,
        session_id: &str,
    ) -> Result<Vec<Activity>, ApiError> {
        match core.api().list_activities(session_id).await {
            Ok(response) => {
                let mut activities = response.activities;
                tracing::debug!(
                    session_id,
                    count = activities.len(),
                    "Fetched activities"
                );
                Self::sort_newest_first(&mut activities);
                Ok(activities)
            }
            Err(err) => {
                core.notify(Toast::failure("Failed to fetch activities", err.to_string()));
                Err(err)
            }
        }
    }

    /// Stable sort by `createTime`, newest first. Unparseable timestamps go last.
    pub fn sort_newest_first(activities: &mut [Activity]) {
        activities.sort_by_key(|activity| Reverse(activity.created_at));
    }
}
