//! User-facing notifications.
//!
//! Every failure in the storefront ends in exactly one notice. Hosts
//! decide how to show it: the browser raises an alert, the terminal
//! prints a styled line.

use std::cell::RefCell;
use std::fmt;

/// The user actions that can fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    LoadProducts,
    LoadProduct,
    LoadCart,
    AddItem,
    UpdateItem,
    RemoveItem,
    ClearCart,
    PlaceOrder,
}

impl Action {
    /// Message shown when the action fails.
    pub fn failure_message(&self) -> &'static str {
        match self {
            Action::LoadProducts => "Failed to load products",
            Action::LoadProduct => "Failed to load product",
            Action::LoadCart => "Failed to load the cart",
            Action::AddItem => "Failed to add to cart",
            Action::UpdateItem => "Failed to update item",
            Action::RemoveItem => "Failed to remove item",
            Action::ClearCart => "Failed to clear the cart",
            Action::PlaceOrder => "Checkout failed, please contact customer service",
        }
    }
}

/// Severity of a notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Error,
}

/// One message for the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    /// A success notice.
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            message: message.into(),
        }
    }

    /// The failure notice for an action.
    pub fn failure(action: Action) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: action.failure_message().to_string(),
        }
    }

    /// Check if this reports a failure.
    pub fn is_error(&self) -> bool {
        self.level == NoticeLevel::Error
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Sink for user-facing notices.
pub trait Notifier {
    fn notify(&self, notice: Notice);
}

/// Collects notices in memory.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    notices: RefCell<Vec<Notice>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Notices received so far.
    pub fn notices(&self) -> Vec<Notice> {
        self.notices.borrow().clone()
    }

    /// Remove and return all notices.
    pub fn drain(&self) -> Vec<Notice> {
        std::mem::take(&mut *self.notices.borrow_mut())
    }

    /// Number of error notices received.
    pub fn error_count(&self) -> usize {
        self.notices.borrow().iter().filter(|n| n.is_error()).count()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notice: Notice) {
        self.notices.borrow_mut().push(notice);
    }
}
