use crate::api::ApiError;
use crate::core::JulesCore;
use crate::model::Session;
use crate::notify::Toast;

pub struct SessionService;

impl SessionService {
    /// First page of sessions, in server order.
    pub async fn list_sessions(core: &JulesCore) -> Result<Vec<Session>, ApiError> {
        match core.api().list_sessions().await {
            Ok(response) => {
                tracing::debug!(count = response.sessions.len(), "Fetched sessions");
                Ok(response.sessions)
            }
            Err(err) => {
                core.notify(Toast::failure("Failed to fetch sessions", err.to_string()));
                Err(err)
            }
        }
    }

    /// Sessions started against `selected`, in their original order.
    ///
    /// With no selection nothing matches.
    pub fn filter_by_source(sessions: &[Session], selected: Option<&str>) -> Vec<Session> {
        let Some(selected) = selected.filter(|name| !name.is_empty()) else {
            return Vec::new();
        };
        sessions
            .iter()
            .filter(|session| session.source_name() == Some(selected))
            .cloned()
            .collect()
    }
}
