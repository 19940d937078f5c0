// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Fan-out of [`StoreEvent`]s to observers of a store.

use tokio::sync::broadcast;

use super::StoreEvent;

/// Events kept for a slow observer before the oldest are overwritten.
pub(crate) const DEFAULT_CHANNEL_CAPACITY: usize = 256;

/// Delivers every [`StoreEvent`] to each current subscriber.
///
/// Events are a change log, not the state itself. An observer that stops
/// reading for longer than the capacity allows skips ahead: its next
/// `recv` reports how many events it missed as `RecvError::Lagged` and
/// resumes at the oldest one still buffered. Observers that only need
/// the current state should read
/// [`StateStore::watch`](crate::store::StateStore::watch) instead, which
/// cannot lag.
///
/// Clones share one channel.
///
/// # Examples
///
/// ```
/// use zinguo_lib::event::{EventBus, StoreEvent};
///
/// let bus = EventBus::with_capacity(16);
/// let mut rx = bus.subscribe();
///
/// bus.publish(StoreEvent::refresh_failed("timeout"));
/// assert!(rx.try_recv().unwrap().is_failure());
/// ```
#[derive(Debug, Clone)]
pub struct EventBus {
    sender: broadcast::Sender<StoreEvent>,
}

impl EventBus {
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CHANNEL_CAPACITY)
    }

    /// Creates a bus buffering up to `capacity` events per subscriber.
    /// A capacity of zero is raised to one.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    /// Sends `event` to every subscriber. With none, it is dropped.
    pub fn publish(&self, event: StoreEvent) {
        let _ = self.sender.send(event);
    }

    /// Returns a receiver for events published after this call.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<StoreEvent> {
        self.sender.subscribe()
    }

    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_bus_has_no_subscribers() {
        let bus = EventBus::new();
        assert_eq!(bus.subscriber_count(), 0);
    }

    #[test]
    fn drop_subscriber_decrements_count() {
        let bus = EventBus::new();

        let rx = bus.subscribe();
        assert_eq!(bus.subscriber_count(), 1);

        drop(rx);
        assert_eq!(bus.subscriber_count(), 0);
    }

    #[tokio::test]
    async fn publish_delivers_to_multiple_subscribers() {
        let bus = EventBus::new();
        let mut rx1 = bus.subscribe();
        let mut rx2 = bus.subscribe();

        bus.publish(StoreEvent::refresh_failed("timeout"));

        assert!(rx1.recv().await.unwrap().is_failure());
        assert!(rx2.recv().await.unwrap().is_failure());
    }

    #[test]
    fn publish_without_subscribers_is_silent() {
        let bus = EventBus::with_capacity(4);
        bus.publish(StoreEvent::refresh_failed("timeout"));
    }

    #[test]
    fn slow_subscriber_skips_to_oldest_buffered() {
        use tokio::sync::broadcast::error::TryRecvError;

        let bus = EventBus::with_capacity(2);
        let mut rx = bus.subscribe();

        for reason in ["first", "second", "third"] {
            bus.publish(StoreEvent::refresh_failed(reason));
        }

        assert_eq!(rx.try_recv().unwrap_err(), TryRecvError::Lagged(1));
        assert!(rx.try_recv().unwrap().is_failure());
        assert!(rx.try_recv().unwrap().is_failure());
        assert_eq!(rx.try_recv().unwrap_err(), TryRecvError::Empty);
    }

    #[test]
    fn zero_capacity_is_raised() {
        let bus = EventBus::with_capacity(0);
        let mut rx = bus.subscribe();
        bus.publish(StoreEvent::refresh_failed("timeout"));
        assert!(rx.try_recv().is_ok());
    }

    #[test]
    fn clone_shares_same_channel() {
        let bus1 = EventBus::new();
        let bus2 = bus1.clone();

        let _rx = bus1.subscribe();
        assert_eq!(bus2.subscriber_count(), 1);
    }
}
