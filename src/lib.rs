pub mod api;
pub mod cli;
pub mod config;
pub mod core;
pub mod display;
pub mod model;
pub mod notify;
pub mod util;
pub mod view;

pub use api::{ApiError, JulesApi, JulesClient};
pub use config::{Config, ConfigError};
pub use crate::core::JulesCore;
pub use model::{Activity, ActivityKind, CreateSessionRequest, Session, Source};
pub use notify::{Notifier, TerminalNotifier, Toast, ToastStyle};
pub use view::{ActivitiesView, FormError, NewSessionForm, SessionsView};
