//! Form for starting a new session.

use crate::api::ApiError;
use crate::core::services::{CommandService, SourceRegistry, SourceService};
use crate::core::JulesCore;
use crate::model::{CreateSessionRequest, Session, Source};

#[derive(Debug, thiserror::Error)]
pub enum FormError {
    #[error("Unknown source: {0}")]
    UnknownSource(String),

    #[error("No source selected")]
    NoSource,

    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Source picker, branch picker and prompt for `POST /sessions`.
///
/// Branches come from the selected source's details, which are refetched
/// whenever the selection changes. A successful [`NewSessionForm::submit`]
/// means the caller should return to the session list; a failed one leaves
/// every field as it was.
pub struct NewSessionForm {
    core: JulesCore,
    registry: SourceRegistry,
    details: Option<Source>,
    branch: Option<String>,
    prompt: String,
}

impl NewSessionForm {
    pub fn new(core: JulesCore) -> Self {
        Self {
            core,
            registry: SourceRegistry::new(),
            details: None,
            branch: None,
            prompt: String::new(),
        }
    }

    /// Fetch sources, then the details of the (possibly auto-) selected one.
    pub async fn load(&mut self) -> Result<(), ApiError> {
        self.load_sources().await?;
        self.load_source_details().await
    }

    /// Fetch sources only, auto-selecting the first.
    pub async fn load_sources(&mut self) -> Result<(), ApiError> {
        let sources = SourceService::list_sources(&self.core).await?;
        self.registry.set_sources(sources);
        Ok(())
    }

    /// Fetch branches of the selected source. Does nothing without a selection.
    pub async fn load_source_details(&mut self) -> Result<(), ApiError> {
        let Some(selected) = self.registry.selected().map(str::to_string) else {
            return Ok(());
        };
        let details = SourceService::get_source(&self.core, &selected).await?;
        // The selection may have moved while the request was in flight.
        if self.registry.selected() == Some(details.name.as_str()) {
            self.details = Some(details);
        }
        Ok(())
    }

    /// Change the source and reload its branches. Resets the branch choice.
    pub async fn select_source(&mut self, name: &str) -> Result<(), FormError> {
        if !self.registry.select(name) {
            return Err(FormError::UnknownSource(name.to_string()));
        }
        if self.details.as_ref().map(|details| details.name.as_str()) != Some(name) {
            self.details = None;
            self.branch = None;
            self.load_source_details().await?;
        }
        Ok(())
    }

    pub fn sources(&self) -> &[Source] {
        self.registry.sources()
    }

    pub fn selected_source(&self) -> Option<&str> {
        self.registry.selected()
    }

    /// Detail of the selected source, once fetched.
    pub fn source_details(&self) -> Option<&Source> {
        self.details.as_ref()
    }

    /// Branch options for the selected source.
    pub fn branches(&self) -> Vec<&str> {
        self.details
            .as_ref()
            .map(Source::branch_names)
            .unwrap_or_default()
    }

    pub fn set_branch(&mut self, branch: impl Into<String>) {
        self.branch = Some(branch.into());
    }

    /// Explicit choice, falling back to the source's default branch.
    pub fn branch(&self) -> Option<&str> {
        self.branch
            .as_deref()
            .or_else(|| self.details.as_ref().and_then(Source::default_branch))
    }

    pub fn set_prompt(&mut self, prompt: impl Into<String>) {
        self.prompt = prompt.into();
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    /// Request body for the current field values.
    pub fn request(&self) -> Result<CreateSessionRequest, FormError> {
        let source = self.registry.selected().ok_or(FormError::NoSource)?;
        Ok(CreateSessionRequest::new(
            source,
            self.branch().unwrap_or_default(),
            self.prompt.clone(),
        ))
    }

    /// Create the session. The prompt is validated by the server, not here.
    pub async fn submit(&mut self) -> Result<Session, FormError> {
        let request = self.request()?;
        let session = CommandService::create_session(&self.core, &request).await?;
        Ok(session)
    }
}
