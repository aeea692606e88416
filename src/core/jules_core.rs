//! Context shared by every view and service.

use std::sync::Arc;

use crate::api::{JulesApi, JulesClient};
use crate::config::Config;
use crate::notify::{Notifier, Toast};

/// Owns the configuration, the API implementation and the notification sink.
///
/// Views receive this explicitly instead of reaching for global state, which
/// also lets tests swap in [`crate::api::mock::MockJulesApi`] and
/// [`crate::notify::RecordingNotifier`].
#[derive(Clone)]
pub struct JulesCore {
    config: Config,
    api: Arc<dyn JulesApi>,
    notifier: Arc<dyn Notifier>,
}

impl JulesCore {
    /// Core backed by the HTTP client described by `config`.
    pub fn new(config: Config, notifier: Arc<dyn Notifier>) -> Self {
        let client = JulesClient::with_base_url(config.api_key.clone(), config.base_url.clone());
        Self::with_api(config, Arc::new(client), notifier)
    }

    pub fn with_api(config: Config, api: Arc<dyn JulesApi>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            config,
            api,
            notifier,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn api(&self) -> &dyn JulesApi {
        self.api.as_ref()
    }

    pub fn notify(&self, toast: Toast) {
        self.notifier.notify(toast);
    }
}
