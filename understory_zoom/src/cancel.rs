// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Cancellation for deferred image loads.
//!
//! Each load the engine requests carries its own [`CancelToken`]. The engine
//! cancels it when the resource changes or the element is cleaned up, and a
//! completion is only applied while its token is still live. Everything runs
//! on one event loop, so the flag is a shared `Cell`.

use alloc::rc::Rc;
use core::cell::Cell;

use crate::source::ResourceLocator;

/// Shared cancellation flag.
#[derive(Clone, Debug, Default)]
pub struct CancelToken {
    cancelled: Rc<Cell<bool>>,
}

impl CancelToken {
    /// Creates a live token.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Cancels this token and every clone of it.
    pub fn cancel(&self) {
        self.cancelled.set(true);
    }

    /// Returns `true` once [`cancel`](Self::cancel) has been called on any clone.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.get()
    }

    /// Returns `true` if `other` is a clone of this token.
    #[must_use]
    pub fn same_as(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.cancelled, &other.cancelled)
    }
}

/// A pending full-resolution load handed to the host.
#[derive(Clone, Debug)]
pub struct LoadRequest {
    locator: ResourceLocator,
    token: CancelToken,
}

impl LoadRequest {
    pub(crate) fn new(locator: ResourceLocator, token: CancelToken) -> Self {
        Self { locator, token }
    }

    /// The resource to load.
    #[must_use]
    pub fn locator(&self) -> &ResourceLocator {
        &self.locator
    }

    /// The resource URL.
    #[must_use]
    pub fn url(&self) -> &str {
        self.locator.url()
    }

    /// Token to check before and after each suspension point.
    #[must_use]
    pub fn token(&self) -> &CancelToken {
        &self.token
    }

    /// Returns `true` once the engine no longer wants this result.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn cancel_is_shared_between_clones() {
        let token = CancelToken::new();
        let clone = token.clone();
        assert!(!clone.is_cancelled());
        token.cancel();
        assert!(clone.is_cancelled());
        assert!(token.same_as(&clone));
        assert!(!token.same_as(&CancelToken::new()));
    }

    #[test]
    fn request_reports_token_state() {
        let token = CancelToken::new();
        let req = LoadRequest::new(ResourceLocator::Source("a.png".to_string()), token.clone());
        assert_eq!(req.url(), "a.png");
        assert!(!req.is_cancelled());
        token.cancel();
        assert!(req.is_cancelled());
    }
}
