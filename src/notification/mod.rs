//! Notification module for deskhint
//!
//! Provides a reusable notification queue for transient messages. The
//! assistant pushes into it on every error path; whatever front-end is
//! attached decides how to display and expire the messages.

mod state;

pub use state::{Notification, NotificationLevel, NotificationState};
