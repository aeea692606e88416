//! Jules API access.

mod client;
mod error;
pub mod mock;

pub use client::{JulesApi, JulesClient, API_BASE_URL, API_KEY_HEADER};
pub use error::ApiError;
