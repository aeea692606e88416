//! Session list with its source picker.

use parking_lot::Mutex;

use crate::api::ApiError;
use crate::core::services::{SessionService, SourceRegistry, SourceService};
use crate::core::JulesCore;
use crate::model::{Session, Source};
use crate::view::activities::ActivitiesView;
use crate::view::request_slot::RequestSlot;

#[derive(Default)]
struct SessionsState {
    registry: SourceRegistry,
    sessions: Vec<Session>,
}

/// State behind the session list screen.
pub struct SessionsView {
    core: JulesCore,
    state: Mutex<SessionsState>,
    source_requests: RequestSlot,
    session_requests: RequestSlot,
}

impl SessionsView {
    pub fn new(core: JulesCore) -> Self {
        Self {
            core,
            state: Mutex::new(SessionsState::default()),
            source_requests: RequestSlot::new(),
            session_requests: RequestSlot::new(),
        }
    }

    /// Fetch sources and sessions concurrently.
    ///
    /// Both fetches always run; the first failure is returned.
    pub async fn load(&self) -> Result<(), ApiError> {
        let (sources, sessions) = tokio::join!(self.refresh_sources(), self.refresh_sessions());
        sources.and(sessions)
    }

    pub async fn refresh_sources(&self) -> Result<(), ApiError> {
        let ticket = self.source_requests.begin();
        let sources = SourceService::list_sources(&self.core).await?;
        if self.source_requests.is_current(ticket) {
            self.state.lock().registry.set_sources(sources);
        }
        Ok(())
    }

    pub async fn refresh_sessions(&self) -> Result<(), ApiError> {
        let ticket = self.session_requests.begin();
        let sessions = SessionService::list_sessions(&self.core).await?;
        if self.session_requests.is_current(ticket) {
            self.state.lock().sessions = sessions;
        } else {
            tracing::debug!("Dropping sessions from a superseded request");
        }
        Ok(())
    }

    pub fn sources(&self) -> Vec<Source> {
        self.state.lock().registry.sources().to_vec()
    }

    pub fn selected_source(&self) -> Option<String> {
        self.state.lock().registry.selected().map(str::to_string)
    }

    /// Switch the source filter. Returns `false` for unknown sources.
    pub fn select_source(&self, name: &str) -> bool {
        self.state.lock().registry.select(name)
    }

    /// Every fetched session, in server order.
    pub fn sessions(&self) -> Vec<Session> {
        self.state.lock().sessions.clone()
    }

    /// Sessions of the selected source, in server order.
    pub fn filtered_sessions(&self) -> Vec<Session> {
        let state = self.state.lock();
        SessionService::filter_by_source(&state.sessions, state.registry.selected())
    }

    /// Activity feed view for one of the listed sessions.
    pub fn open_session(&self, session: Session) -> ActivitiesView {
        ActivitiesView::new(self.core.clone(), session)
    }
}
