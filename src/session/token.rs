//! Request correlation tokens
//!
//! Every network request the session cares about gets a token. Only the
//! latest token of a gate is current; replies carrying any other token are
//! stale and must be dropped.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RequestToken(u64);

impl fmt::Display for RequestToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Issues tokens for one kind of request and remembers the outstanding one
#[derive(Debug, Default)]
pub struct TokenGate {
    issued: u64,
    current: Option<RequestToken>,
}

impl TokenGate {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue a fresh token, superseding any outstanding one
    pub fn issue(&mut self) -> RequestToken {
        self.issued += 1;
        let token = RequestToken(self.issued);
        self.current = Some(token);
        token
    }

    #[must_use]
    pub fn is_current(&self, token: RequestToken) -> bool {
        self.current == Some(token)
    }

    /// True while a request is outstanding
    #[must_use]
    pub const fn is_pending(&self) -> bool {
        self.current.is_some()
    }

    /// Mark `token` as answered. Returns `false` if it was stale.
    pub fn settle(&mut self, token: RequestToken) -> bool {
        if self.is_current(token) {
            self.current = None;
            true
        } else {
            false
        }
    }

    /// Forget the outstanding request; its reply will be treated as stale
    pub fn invalidate(&mut self) {
        self.current = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn latest_token_wins() {
        let mut gate = TokenGate::new();
        let first = gate.issue();
        let second = gate.issue();

        assert_ne!(first, second);
        assert!(!gate.is_current(first));
        assert!(gate.is_current(second));
        assert!(!gate.settle(first));
        assert!(gate.settle(second));
        assert!(!gate.is_pending());
    }

    #[test]
    fn settle_is_single_use() {
        let mut gate = TokenGate::new();
        let token = gate.issue();
        assert!(gate.settle(token));
        assert!(!gate.settle(token));
    }

    #[test]
    fn invalidate_makes_outstanding_token_stale() {
        let mut gate = TokenGate::new();
        let token = gate.issue();
        gate.invalidate();
        assert!(!gate.is_pending());
        assert!(!gate.settle(token));

        // Tokens are never reused after invalidation
        assert_ne!(gate.issue(), token);
    }
}
