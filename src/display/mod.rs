//! Presentation helpers shared by every front end.

pub mod activity;
pub mod state;
pub mod terminal;

pub use activity::{activity_details, last_activity_summary, numbered_steps, ActivityDetails};
pub use state::{state_color, StateColor};
pub use terminal::TerminalRenderer;
