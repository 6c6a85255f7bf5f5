//! Update notification for completed builds

use std::panic::{AssertUnwindSafe, catch_unwind};

/// Handle returned by [`UpdateNotifier::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

type Listener = Box<dyn FnMut() + Send>;

/// Ordered list of zero-argument listeners fired after each build.
///
/// A panicking listener is logged and skipped; the others still run and the
/// panic never reaches the caller of [`UpdateNotifier::notify`].
pub struct UpdateNotifier {
    next_id: u64,
    listeners: Vec<(ListenerId, Listener)>,
}

impl std::fmt::Debug for UpdateNotifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UpdateNotifier")
            .field("listener_count", &self.listeners.len())
            .finish()
    }
}

impl UpdateNotifier {
    pub fn new() -> Self {
        UpdateNotifier {
            next_id: 0,
            listeners: Vec::new(),
        }
    }

    pub fn subscribe<F>(&mut self, listener: F) -> ListenerId
    where
        F: FnMut() + Send + 'static,
    {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Returns false if the listener was not subscribed.
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(existing, _)| *existing != id);
        self.listeners.len() != before
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    /// Invoke every listener once, in subscription order.
    pub fn notify(&mut self) {
        for (id, listener) in &mut self.listeners {
            if catch_unwind(AssertUnwindSafe(|| listener())).is_err() {
                tracing::error!("Update listener {:?} panicked", id);
            }
        }
    }
}

impl Default for UpdateNotifier {
    fn default() -> Self {
        Self::new()
    }
}
