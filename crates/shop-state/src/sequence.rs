//! Request sequencing.
//!
//! Overlapping fetches of the same resource may resolve in any order.
//! Each fetch takes a token when it starts; a response is applied only if
//! its token is newer than the last one applied, so an older response
//! can never overwrite a newer one.

use std::cell::Cell;

/// Sequence number taken by a request when it starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestToken(u64);

impl RequestToken {
    /// The raw sequence number.
    pub fn get(self) -> u64 {
        self.0
    }
}

/// Issues tokens and tracks the newest applied one.
#[derive(Debug, Default)]
pub struct RequestSequence {
    issued: Cell<u64>,
    applied: Cell<u64>,
}

impl RequestSequence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take the next token.
    pub fn issue(&self) -> RequestToken {
        let next = self.issued.get() + 1;
        self.issued.set(next);
        RequestToken(next)
    }

    /// Claim the right to apply a response. Returns `false` for stale tokens.
    pub fn try_apply(&self, token: RequestToken) -> bool {
        if token.0 <= self.applied.get() {
            return false;
        }
        self.applied.set(token.0);
        true
    }

    /// Whether a token is older than the newest applied one.
    pub fn is_stale(&self, token: RequestToken) -> bool {
        token.0 <= self.applied.get()
    }

    /// Number of requests still outstanding after the newest applied one.
    pub fn pending(&self) -> u64 {
        self.issued.get() - self.applied.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokens_increase() {
        let seq = RequestSequence::new();
        let a = seq.issue();
        let b = seq.issue();
        assert!(b > a);
        assert_eq!(seq.pending(), 2);
    }

    #[test]
    fn test_older_response_after_newer_is_discarded() {
        let seq = RequestSequence::new();
        let first = seq.issue();
        let second = seq.issue();

        assert!(seq.try_apply(second));
        assert!(seq.is_stale(first));
        assert!(!seq.try_apply(first));
        assert_eq!(seq.pending(), 0);
    }

    #[test]
    fn test_in_order_responses_both_apply() {
        let seq = RequestSequence::new();
        let first = seq.issue();
        let second = seq.issue();

        assert!(seq.try_apply(first));
        assert!(seq.try_apply(second));
    }
}
