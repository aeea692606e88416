//! Integration tests for the Jules client
//!
//! These run the real HTTP client, the views and the binary against a local
//! mock of the Jules API.

#[path = "../common/mod.rs"]
pub mod common;

pub mod cli;
