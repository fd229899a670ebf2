// Copyright 2025 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Token-keyed interval requests.

use futures::future::{AbortHandle, AbortRegistration};
use hashbrown::HashMap;
use strata_data::BoundaryPoint;

/// Identifies one issued request. Tokens only grow.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestToken(u64);

impl RequestToken {
    /// Raw token value.
    #[must_use]
    pub fn get(self) -> u64 {
        self.0
    }
}

/// Result of a completed interval fetch, to be handed to
/// [`Viewer::apply_intervals`](crate::Viewer::apply_intervals).
#[derive(Clone, Debug, PartialEq)]
pub struct IntervalResponse {
    /// Track the request was issued for.
    pub track: String,
    /// Token issued with the request.
    pub token: RequestToken,
    /// Fetched boundary points.
    pub points: Vec<BoundaryPoint>,
}

/// Latest issued token per track.
#[derive(Debug, Default)]
pub(crate) struct RequestLedger {
    next: u64,
    latest: HashMap<String, (RequestToken, AbortHandle)>,
}

impl RequestLedger {
    /// Issues a new token for `track`; any earlier token for it is superseded.
    pub(crate) fn issue(&mut self, track: &str) -> (RequestToken, AbortRegistration) {
        self.next += 1;
        let token = RequestToken(self.next);
        let (handle, registration) = AbortHandle::new_pair();
        self.latest.insert(track.to_owned(), (token, handle));
        (token, registration)
    }

    pub(crate) fn is_current(&self, track: &str, token: RequestToken) -> bool {
        self.latest.get(track).is_some_and(|(t, _)| *t == token)
    }

    /// Retires `token` if it is the latest for `track`.
    pub(crate) fn complete(&mut self, track: &str, token: RequestToken) -> bool {
        if self.is_current(track, token) {
            self.latest.remove(track);
            true
        } else {
            false
        }
    }

    /// Aborts and forgets the in-flight request of `track`, if any.
    pub(crate) fn cancel(&mut self, track: &str) -> bool {
        match self.latest.remove(track) {
            Some((_, handle)) => {
                handle.abort();
                true
            }
            None => false,
        }
    }

    pub(crate) fn in_flight(&self) -> usize {
        self.latest.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn later_tokens_supersede_earlier_ones() {
        let mut ledger = RequestLedger::default();
        let (first, _) = ledger.issue("lith");
        let (second, _) = ledger.issue("lith");
        assert!(second > first);
        assert!(!ledger.complete("lith", first));
        assert!(ledger.complete("lith", second));
        assert!(!ledger.complete("lith", second));
    }

    #[test]
    fn cancel_aborts_the_registration() {
        let mut ledger = RequestLedger::default();
        let (token, registration) = ledger.issue("lith");
        let fut = futures::future::Abortable::new(futures::future::pending::<()>(), registration);
        assert!(ledger.cancel("lith"));
        assert!(!ledger.is_current("lith", token));
        assert!(futures::executor::block_on(fut).is_err());
        assert_eq!(ledger.in_flight(), 0);
    }
}
