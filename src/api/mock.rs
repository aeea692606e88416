//! In-memory Jules API for deterministic testing
//!
//! Implements [`JulesApi`] over canned data without touching the network.
//! Created sessions and sent messages are applied to the canned data so
//! refetches observe them, and every call is captured for verification.
//!
//! # Example
//! ```no_run
//! use jules::api::mock::{MockEndpoint, MockJulesApi};
//! use reqwest::StatusCode;
//!
//! let api = MockJulesApi::new()
//!     .with_sources(vec![])
//!     .failing(MockEndpoint::CreateSession, StatusCode::BAD_REQUEST, "prompt required");
//! ```

use std::collections::{HashMap, VecDeque};
use std::time::Duration as StdDuration;

use async_trait::async_trait;
use chrono::{Duration, Utc};
use parking_lot::Mutex;
use reqwest::StatusCode;

use crate::api::client::JulesApi;
use crate::api::error::ApiError;
use crate::model::{
    ActivitiesResponse, Activity, ActivityKind, CreateSessionRequest, Session, SessionsResponse,
    Source, SourceContext, SourcesResponse,
};

/// Endpoint selector for injected failures and captured calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MockEndpoint {
    ListSources,
    GetSource,
    ListSessions,
    CreateSession,
    ListActivities,
    SendMessage,
}

/// A captured call against the mock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockCall {
    ListSources,
    GetSource(String),
    ListSessions,
    CreateSession(CreateSessionRequest),
    ListActivities(String),
    SendMessage { session_id: String, prompt: String },
}

impl MockCall {
    pub fn endpoint(&self) -> MockEndpoint {
        match self {
            MockCall::ListSources => MockEndpoint::ListSources,
            MockCall::GetSource(_) => MockEndpoint::GetSource,
            MockCall::ListSessions => MockEndpoint::ListSessions,
            MockCall::CreateSession(_) => MockEndpoint::CreateSession,
            MockCall::ListActivities(_) => MockEndpoint::ListActivities,
            MockCall::SendMessage { .. } => MockEndpoint::SendMessage,
        }
    }
}

#[derive(Default)]
struct MockState {
    sources: Vec<Source>,
    source_details: HashMap<String, Source>,
    sessions: Vec<Session>,
    activities: HashMap<String, Vec<Activity>>,
    failures: HashMap<MockEndpoint, (StatusCode, String)>,
    delays: HashMap<MockEndpoint, VecDeque<StdDuration>>,
    calls: Vec<MockCall>,
    next_id: u64,
}

/// Mock Jules API for tests.
#[derive(Default)]
pub struct MockJulesApi {
    state: Mutex<MockState>,
}

impl MockJulesApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_sources(self, sources: Vec<Source>) -> Self {
        self.state.lock().sources = sources;
        self
    }

    /// Detail returned by `get_source` for this source's name.
    pub fn with_source_detail(self, source: Source) -> Self {
        self.state
            .lock()
            .source_details
            .insert(source.name.clone(), source);
        self
    }

    pub fn with_sessions(self, sessions: Vec<Session>) -> Self {
        self.state.lock().sessions = sessions;
        self
    }

    pub fn with_activities(self, session_id: impl Into<String>, activities: Vec<Activity>) -> Self {
        self.set_activities(session_id, activities);
        self
    }

    /// Replace a session's feed after construction.
    pub fn set_activities(&self, session_id: impl Into<String>, activities: Vec<Activity>) {
        self.state
            .lock()
            .activities
            .insert(session_id.into(), activities);
    }

    /// Delay successive calls to `endpoint` by these durations, one per call.
    ///
    /// The response is captured before the delay, so a delayed call returns
    /// the data as it was when the call was made.
    pub fn with_delays(self, endpoint: MockEndpoint, delays: Vec<StdDuration>) -> Self {
        self.state
            .lock()
            .delays
            .insert(endpoint, delays.into_iter().collect());
        self
    }

    /// Make every call to `endpoint` fail with the given status and body.
    pub fn failing(self, endpoint: MockEndpoint, status: StatusCode, body: impl Into<String>) -> Self {
        self.fail(endpoint, status, body);
        self
    }

    /// Like [`MockJulesApi::failing`] but usable after construction.
    pub fn fail(&self, endpoint: MockEndpoint, status: StatusCode, body: impl Into<String>) {
        self.state
            .lock()
            .failures
            .insert(endpoint, (status, body.into()));
    }

    /// Remove an injected failure.
    pub fn recover(&self, endpoint: MockEndpoint) {
        self.state.lock().failures.remove(&endpoint);
    }

    /// All captured calls, in order.
    pub fn calls(&self) -> Vec<MockCall> {
        self.state.lock().calls.clone()
    }

    /// Number of captured calls to `endpoint`.
    pub fn call_count(&self, endpoint: MockEndpoint) -> usize {
        self.state
            .lock()
            .calls
            .iter()
            .filter(|call| call.endpoint() == endpoint)
            .count()
    }

    async fn pause(&self, endpoint: MockEndpoint) {
        let delay = self
            .state
            .lock()
            .delays
            .get_mut(&endpoint)
            .and_then(|delays| delays.pop_front());
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
    }

    fn record(&self, call: MockCall) -> Result<(), ApiError> {
        let mut state = self.state.lock();
        let endpoint = call.endpoint();
        state.calls.push(call);
        match state.failures.get(&endpoint) {
            Some((status, body)) => Err(ApiError::http(*status, body.clone())),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl JulesApi for MockJulesApi {
    async fn list_sources(&self) -> Result<SourcesResponse, ApiError> {
        self.record(MockCall::ListSources)?;
        let sources = self.state.lock().sources.clone();
        self.pause(MockEndpoint::ListSources).await;
        Ok(SourcesResponse {
            sources,
            next_page_token: None,
        })
    }

    async fn get_source(&self, source_name: &str) -> Result<Source, ApiError> {
        self.record(MockCall::GetSource(source_name.to_string()))?;
        let state = self.state.lock();
        state
            .source_details
            .get(source_name)
            .or_else(|| state.sources.iter().find(|source| source.name == source_name))
            .cloned()
            .ok_or_else(|| ApiError::http(StatusCode::NOT_FOUND, "source not found"))
    }

    async fn list_sessions(&self) -> Result<SessionsResponse, ApiError> {
        self.record(MockCall::ListSessions)?;
        let sessions = self.state.lock().sessions.clone();
        self.pause(MockEndpoint::ListSessions).await;
        Ok(SessionsResponse {
            sessions,
            next_page_token: None,
        })
    }

    async fn create_session(&self, request: &CreateSessionRequest) -> Result<Session, ApiError> {
        self.record(MockCall::CreateSession(request.clone()))?;
        if request.prompt.trim().is_empty() {
            return Err(ApiError::http(
                StatusCode::BAD_REQUEST,
                "prompt must not be empty",
            ));
        }

        let mut state = self.state.lock();
        state.next_id += 1;
        let id = format!("mock-{}", state.next_id);
        let session = Session {
            name: format!("sessions/{}", id),
            id,
            title: String::new(),
            state: "QUEUED".to_string(),
            url: String::new(),
            prompt: request.prompt.clone(),
            source_context: Some(SourceContext {
                source: request.source_context.source.clone(),
            }),
        };
        state.sessions.insert(0, session.clone());
        Ok(session)
    }

    async fn list_activities(&self, session_id: &str) -> Result<ActivitiesResponse, ApiError> {
        self.record(MockCall::ListActivities(session_id.to_string()))?;
        let activities = self
            .state
            .lock()
            .activities
            .get(session_id)
            .cloned()
            .unwrap_or_default();
        self.pause(MockEndpoint::ListActivities).await;
        Ok(ActivitiesResponse {
            activities,
            next_page_token: None,
        })
    }

    async fn send_message(&self, session_id: &str, prompt: &str) -> Result<(), ApiError> {
        self.record(MockCall::SendMessage {
            session_id: session_id.to_string(),
            prompt: prompt.to_string(),
        })?;

        let mut state = self.state.lock();
        state.next_id += 1;
        let activity_id = format!("activity-{}", state.next_id);
        let feed = state.activities.entry(session_id.to_string()).or_default();
        // Land strictly after everything already in the feed.
        let created_at = feed
            .iter()
            .filter_map(|activity| activity.created_at)
            .max()
            .map(|latest| latest + Duration::seconds(1))
            .unwrap_or_else(Utc::now);
        let mut activity = Activity::new(
            activity_id,
            created_at.to_rfc3339(),
            ActivityKind::UserMessaged {
                message: prompt.to_string(),
            },
        );
        activity.originator = "user".to_string();
        feed.push(activity);
        Ok(())
    }
}
