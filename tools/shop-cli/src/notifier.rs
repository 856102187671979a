//! Terminal notices.

use shop_state::{Notice, Notifier};

use crate::output::Output;

/// Prints storefront notices through the CLI output.
pub struct TerminalNotifier {
    output: Output,
}

impl TerminalNotifier {
    pub fn new(output: Output) -> Self {
        Self { output }
    }
}

impl Notifier for TerminalNotifier {
    fn notify(&self, notice: Notice) {
        tracing::debug!(error = notice.is_error(), message = %notice.message, "notice");
        self.output.notice(&notice);
    }
}
