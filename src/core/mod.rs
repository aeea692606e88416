//! Core module containing the client logic behind every front end.
//!
//! - [`JulesCore`]: configuration, API access and notifications
//! - [`services`]: source registry, session listing, activity feed and commands

mod jules_core;
pub mod services;

pub use jules_core::JulesCore;
