//! Screen state for the session list, the activity feed and the
//! new-session form. Front ends render from these and drive them.

pub mod activities;
pub mod new_session;
pub mod request_slot;
pub mod sessions;

pub use activities::ActivitiesView;
pub use new_session::{FormError, NewSessionForm};
pub use request_slot::{RequestSlot, Ticket};
pub use sessions::SessionsView;
