//! # SubscriberSet: ordered fan-out over subscribers.
//!
//! [`SubscriberSet`] delivers each [`Event`] to every subscriber, one after
//! the other, in registration order.
//!
//! Events are built lazily: when the set is empty the loop skips formatting
//! failure messages entirely.

use std::sync::Arc;

use crate::events::Event;

use super::Subscribe;

/// Ordered collection of subscribers.
#[derive(Clone, Default)]
pub struct SubscriberSet {
    subs: Vec<Arc<dyn Subscribe>>,
}

impl SubscriberSet {
    /// Creates a set from the given subscribers.
    #[must_use]
    pub fn new(subs: Vec<Arc<dyn Subscribe>>) -> Self {
        Self { subs }
    }

    /// Appends one subscriber.
    pub fn push(&mut self, sub: Arc<dyn Subscribe>) {
        self.subs.push(sub);
    }

    /// Builds the event with `make` and delivers it to every subscriber.
    ///
    /// `make` is not called when there are no subscribers.
    pub async fn emit_with(&self, make: impl FnOnce() -> Event) {
        if self.subs.is_empty() {
            return;
        }
        let event = make();
        for sub in &self.subs {
            sub.on_event(&event).await;
        }
    }

    /// True if there are no subscribers.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.subs.is_empty()
    }

    /// Number of subscribers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.subs.len()
    }

    /// Subscriber names, in delivery order.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.subs.iter().map(|s| s.name())
    }
}

impl std::fmt::Debug for SubscriberSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.names()).finish()
    }
}
