use crate::api::ApiError;
use crate::core::JulesCore;
use crate::model::Source;
use crate::notify::Toast;

/// Fetched sources plus the currently selected one.
///
/// The first source becomes the selection once sources arrive; after that the
/// selection only changes through [`SourceRegistry::select`].
#[derive(Debug, Clone, Default)]
pub struct SourceRegistry {
    sources: Vec<Source>,
    selected: Option<String>,
}

impl SourceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sources(&self) -> &[Source] {
        &self.sources
    }

    /// Name of the selected source, if any.
    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn selected_source(&self) -> Option<&Source> {
        let selected = self.selected.as_deref()?;
        self.sources.iter().find(|source| source.name == selected)
    }

    /// Replace the source list, auto-selecting the first source if nothing is
    /// selected yet.
    pub fn set_sources(&mut self, sources: Vec<Source>) {
        self.sources = sources;
        if self.selected.is_none() {
            self.selected = self.sources.first().map(|source| source.name.clone());
        }
    }

    /// Select a source by name. Returns `false` for names not in the list.
    pub fn select(&mut self, name: &str) -> bool {
        if self.sources.iter().any(|source| source.name == name) {
            self.selected = Some(name.to_string());
            true
        } else {
            false
        }
    }
}

pub struct SourceService;

impl SourceService {
    /// First page of sources.
    pub async fn list_sources(core: &JulesCore) -> Result<Vec<Source>, ApiError> {
        match core.api().list_sources().await {
            Ok(response) => {
                tracing::debug!(count = response.sources.len(), "Fetched sources");
                Ok(response.sources)
            }
            Err(err) => {
                core.notify(Toast::failure("Failed to fetch sources", err.to_string()));
                Err(err)
            }
        }
    }

    /// Single source including its branches.
    pub async fn get_source(core: &JulesCore, name: &str) -> Result<Source, ApiError> {
        core.api().get_source(name).await.map_err(|err| {
            core.notify(Toast::failure(
                "Failed to fetch source details",
                err.to_string(),
            ));
            err
        })
    }
}
