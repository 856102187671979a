//! Browser notices.

use leptos::prelude::window;
use shop_state::{Notice, Notifier};

/// Shows each notice in a blocking `alert()` dialog.
pub struct AlertNotifier;

impl Notifier for AlertNotifier {
    fn notify(&self, notice: Notice) {
        if window().alert_with_message(&notice.message).is_err() {
            leptos::logging::warn!("alert failed: {}", notice.message);
        }
    }
}
