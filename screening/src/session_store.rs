//! Per-process session store keyed by user identity.
//!
//! Each user owns a slot (`Arc<Mutex<Option<Session>>>`). A turn holds the slot's lock from
//! reading the session until the reply is final, so two messages from the same user never
//! interleave while different users proceed in parallel. An absent session is `None` inside the
//! slot; the slot itself is only dropped by [`SessionStore::prune_idle`].

use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::Mutex;
use tracing::debug;

use crate::step::Session;

pub(crate) type Slot = Arc<Mutex<Option<Session>>>;

#[derive(Default)]
pub struct SessionStore {
    slots: DashMap<String, Slot>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// The user's slot, created empty on first use.
    pub(crate) fn slot(&self, user_id: &str) -> Slot {
        if let Some(existing) = self.slots.get(user_id) {
            return Arc::clone(existing.value());
        }
        Arc::clone(self.slots.entry(user_id.to_string()).or_default().value())
    }

    /// Snapshot of the user's session; waits for an in-flight turn of that user.
    pub async fn get(&self, user_id: &str) -> Option<Session> {
        let slot = self
            .slots
            .get(user_id)
            .map(|entry| Arc::clone(entry.value()))?;
        let session = slot.lock().await;
        session.clone()
    }

    /// Number of users with a live session.
    pub async fn active_count(&self) -> usize {
        let slots: Vec<Slot> = self
            .slots
            .iter()
            .map(|entry| Arc::clone(entry.value()))
            .collect();
        let mut active = 0;
        for slot in slots {
            if slot.lock().await.is_some() {
                active += 1;
            }
        }
        active
    }

    /// Number of slots currently allocated, live or not.
    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    /// Drops slots that hold no session and that no turn is using. Returns how many were dropped.
    ///
    /// A slot referenced outside the map (a turn in progress or waiting for the lock) is kept,
    /// so a concurrent turn can never end up writing to a slot that is no longer in the map.
    pub fn prune_idle(&self) -> usize {
        let mut removed = 0;
        self.slots.retain(|_, slot| {
            let idle = Arc::strong_count(slot) == 1
                && slot.try_lock().map(|s| s.is_none()).unwrap_or(false);
            if idle {
                removed += 1;
            }
            !idle
        });
        if removed > 0 {
            debug!(removed, remaining = self.slots.len(), "Pruned idle session slots");
        }
        removed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::step::Step;

    #[tokio::test]
    async fn test_slot_is_shared_per_user() {
        let store = SessionStore::new();
        let a = store.slot("u1");
        let b = store.slot("u1");
        assert!(Arc::ptr_eq(&a, &b));
        assert!(!Arc::ptr_eq(&a, &store.slot("u2")));
    }

    #[tokio::test]
    async fn test_get_returns_snapshot() {
        let store = SessionStore::new();
        assert!(store.get("u1").await.is_none());

        *store.slot("u1").lock().await = Some(Session::at_first_question());

        let session = store.get("u1").await.unwrap();
        assert_eq!(session.step, Step::Question(0));
        assert_eq!(store.active_count().await, 1);
    }

    #[tokio::test]
    async fn test_prune_keeps_live_and_held_slots() {
        let store = SessionStore::new();
        *store.slot("live").lock().await = Some(Session::opt_in());
        let _ = store.slot("empty");
        let held = store.slot("held");

        let removed = store.prune_idle();

        assert_eq!(removed, 1);
        assert_eq!(store.slot_count(), 2);
        drop(held);
        assert_eq!(store.prune_idle(), 1);
        assert_eq!(store.slot_count(), 1);
    }
}
