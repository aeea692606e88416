//! Fetch and command services.
//!
//! Every service call is a fetch boundary: failures are reported as toasts
//! before being returned, and nothing is retried.

pub mod activity_service;
pub mod command_service;
pub mod session_service;
pub mod source_service;

pub use activity_service::ActivityService;
pub use command_service::CommandService;
pub use session_service::SessionService;
pub use source_service::{SourceRegistry, SourceService};
