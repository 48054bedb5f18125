//! Derived display state shared by every list page: filtering, status
//! badges, time/number labels and rollups. Everything here is a pure function
//! of its inputs and is recomputed on each call.

pub mod aggregate;
pub mod filter;
pub mod format;
pub mod status;

pub use filter::{CONVERSATIONS, ListConfig, StatusFilter, USERS};
pub use format::relative_time;
pub use status::StatusBadge;
