//! Notification state
//!
//! A FIFO of transient messages, decoupled from any rendering so the
//! assistant stays testable without a UI.

use std::collections::VecDeque;

use chrono::{DateTime, Local};

/// Severity of a notification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Info,
    Error,
}

/// A single transient message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub message: String,
    pub level: NotificationLevel,
    pub created_at: DateTime<Local>,
}

/// Queue of pending notifications
#[derive(Debug, Default)]
pub struct NotificationState {
    queue: VecDeque<Notification>,
}

impl NotificationState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue an informational message
    pub fn notify_info(&mut self, message: impl Into<String>) {
        self.push(message.into(), NotificationLevel::Info);
    }

    /// Queue an error message
    pub fn notify_error(&mut self, message: impl Into<String>) {
        self.push(message.into(), NotificationLevel::Error);
    }

    fn push(&mut self, message: String, level: NotificationLevel) {
        log::debug!("notification ({:?}): {}", level, message);
        self.queue.push_back(Notification {
            message,
            level,
            created_at: Local::now(),
        });
    }

    /// Take all pending notifications, oldest first
    pub fn drain(&mut self) -> Vec<Notification> {
        self.queue.drain(..).collect()
    }

    pub fn has_pending(&self) -> bool {
        !self.queue.is_empty()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}
