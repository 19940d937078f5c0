// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Shared snapshot cache with authoritative refresh.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::Duration;

use chrono::Utc;
use parking_lot::{Mutex, RwLock};
use tokio::sync::{broadcast, watch};
use tokio::task::AbortHandle;
use tokio::time::MissedTickBehavior;

use crate::api::StateFetcher;
use crate::config::ZinguoConfig;
use crate::error::Error;
use crate::event::{EventBus, StoreEvent, UpdateOrigin};
use crate::state::{DeviceSnapshot, DeviceState, StateChange};

use super::refresh_job::{JobId, JobRegistry, RefreshJob};
use super::refresh_status::RefreshStatus;

/// Single source of truth for the state of every heater of an account.
///
/// The store publishes an immutable [`DeviceSnapshot`] behind an `Arc`.
/// Every update builds a complete new snapshot and swaps it in, so a reader
/// never observes a half-applied change and a snapshot it holds never
/// changes under it.
///
/// `StateStore` is a cheap handle; clones share the same snapshot, jobs and
/// event bus.
///
/// # Examples
///
/// ```no_run
/// use zinguo_lib::{StateStore, ZinguoConfig};
/// # use zinguo_lib::api::StateFetcher;
///
/// # async fn example(fetcher: impl StateFetcher) -> zinguo_lib::Result<()> {
/// let store = StateStore::new(fetcher, ZinguoConfig::default());
///
/// // Populate the snapshot before creating controls
/// store.refresh().await?;
/// store.start_polling();
///
/// let mut snapshots = store.watch();
/// tokio::spawn(async move {
///     while snapshots.changed().await.is_ok() {
///         let snapshot = snapshots.borrow_and_update().clone();
///         println!("{} heaters", snapshot.len());
///     }
/// });
/// # Ok(())
/// # }
/// ```
pub struct StateStore<F: StateFetcher> {
    inner: Arc<Inner<F>>,
}

struct Inner<F> {
    fetcher: F,
    config: ZinguoConfig,
    snapshot: watch::Sender<Arc<DeviceSnapshot>>,
    /// Serializes writers so read-modify-write predictions cannot interleave.
    write_lock: Mutex<()>,
    events: EventBus,
    /// Number of predictions published so far. A fetch that started before
    /// the latest prediction must not overwrite it.
    predictions: AtomicU64,
    refresh_in_flight: Arc<AtomicBool>,
    jobs: JobRegistry,
    poller: Mutex<Option<AbortHandle>>,
    status: RwLock<RefreshStatus>,
}

impl<F: StateFetcher> StateStore<F> {
    /// Creates a store with an empty snapshot.
    #[must_use]
    pub fn new(fetcher: F, config: ZinguoConfig) -> Self {
        let (snapshot, _) = watch::channel(Arc::new(DeviceSnapshot::new()));
        let events = EventBus::with_capacity(config.event_capacity());

        Self {
            inner: Arc::new(Inner {
                fetcher,
                config,
                snapshot,
                write_lock: Mutex::new(()),
                events,
                predictions: AtomicU64::new(0),
                refresh_in_flight: Arc::new(AtomicBool::new(false)),
                jobs: JobRegistry::new(),
                poller: Mutex::new(None),
                status: RwLock::new(RefreshStatus::default()),
            }),
        }
    }

    /// Returns the store configuration.
    #[must_use]
    pub fn config(&self) -> &ZinguoConfig {
        &self.inner.config
    }

    // =========================================================================
    // Snapshot access
    // =========================================================================

    /// Returns the latest published snapshot.
    ///
    /// Empty until the first successful refresh.
    #[must_use]
    pub fn current(&self) -> Arc<DeviceSnapshot> {
        self.inner.snapshot.borrow().clone()
    }

    /// Returns the latest state of one device.
    #[must_use]
    pub fn device(&self, device_id: &str) -> Option<DeviceState> {
        self.current().get(device_id).cloned()
    }

    /// Publishes `next` as the current snapshot and notifies observers.
    pub fn replace(&self, next: DeviceSnapshot) {
        let _guard = self.inner.write_lock.lock();
        self.publish(Arc::new(next), UpdateOrigin::Replace);
    }

    /// Publishes a copy of the current snapshot with `change` applied to
    /// one device, and returns it.
    ///
    /// Background refreshes requested before this call are discarded when
    /// they complete, so the prediction stays visible until a refresh
    /// started after it lands.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DeviceNotFound`] if the device is not in the current
    /// snapshot; nothing is published.
    pub fn update_device(
        &self,
        device_id: &str,
        change: &StateChange,
    ) -> Result<Arc<DeviceSnapshot>, Error> {
        let _guard = self.inner.write_lock.lock();
        let next = self
            .current()
            .with_change(device_id, change)
            .map(Arc::new)
            .ok_or_else(|| Error::DeviceNotFound(device_id.to_string()))?;

        tracing::debug!(device_id, ?change, "Publishing predicted state");
        self.inner.predictions.fetch_add(1, Ordering::AcqRel);

        self.publish(
            Arc::clone(&next),
            UpdateOrigin::Prediction {
                device_id: device_id.to_string(),
                change: change.clone(),
            },
        );
        Ok(next)
    }

    /// Swaps the snapshot in and broadcasts it. Callers hold `write_lock`.
    fn publish(&self, snapshot: Arc<DeviceSnapshot>, origin: UpdateOrigin) {
        self.inner.snapshot.send_replace(Arc::clone(&snapshot));
        self.inner
            .events
            .publish(StoreEvent::replaced(origin, snapshot));
    }

    // =========================================================================
    // Observers
    // =========================================================================

    /// Returns a receiver that always holds the latest snapshot.
    #[must_use]
    pub fn watch(&self) -> watch::Receiver<Arc<DeviceSnapshot>> {
        self.inner.snapshot.subscribe()
    }

    /// Subscribes to store events.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<StoreEvent> {
        self.inner.events.subscribe()
    }

    /// Returns the outcome history of authoritative refreshes.
    #[must_use]
    pub fn refresh_status(&self) -> RefreshStatus {
        self.inner.status.read().clone()
    }

    // =========================================================================
    // Authoritative refresh
    // =========================================================================

    /// Fetches the authoritative snapshot and publishes it.
    ///
    /// On failure the current snapshot is kept, the failure is logged and
    /// broadcast as [`StoreEvent::RefreshFailed`], and the error is returned.
    /// A successful fetch is not published if a prediction was published
    /// while it was pending.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Fetch`] if the fetcher fails.
    pub async fn refresh(&self) -> Result<(), Error> {
        let since = self.inner.predictions.load(Ordering::Acquire);
        self.refresh_since(since).await
    }

    /// Fetches and publishes unless a prediction was published after
    /// `since` was sampled.
    async fn refresh_since(&self, since: u64) -> Result<(), Error> {
        match self.inner.fetcher.fetch_snapshot().await {
            Ok(snapshot) => {
                tracing::debug!(devices = snapshot.len(), "Authoritative refresh completed");

                self.inner.status.write().record_success(Utc::now());
                let _guard = self.inner.write_lock.lock();
                if self.inner.predictions.load(Ordering::Acquire) != since {
                    tracing::debug!("Discarding refresh that started before the latest prediction");
                    return Ok(());
                }
                self.publish(Arc::new(snapshot), UpdateOrigin::Refresh);
                Ok(())
            }
            Err(e) => {
                tracing::warn!(error = %e, "Authoritative refresh failed, keeping last snapshot");

                self.inner
                    .status
                    .write()
                    .record_failure(Utc::now(), e.to_string());
                self.inner
                    .events
                    .publish(StoreEvent::refresh_failed(e.to_string()));
                Err(e.into())
            }
        }
    }

    /// Starts a refresh in the background without waiting for it.
    ///
    /// Requests made while a background refresh is running are folded into
    /// it. Failures are logged and never reach the caller. The result is
    /// dropped if a prediction is published before it arrives.
    pub fn request_refresh(&self) {
        if self
            .inner
            .refresh_in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            tracing::trace!("Refresh already in flight, coalescing request");
            return;
        }

        let in_flight = InFlight(Arc::clone(&self.inner.refresh_in_flight));
        let since = self.inner.predictions.load(Ordering::Acquire);
        let store = self.clone();
        tokio::spawn(async move {
            let _in_flight = in_flight;
            // Failures are logged and broadcast by refresh_since()
            let _ = store.refresh_since(since).await;
        });
    }

    /// Returns `true` while a background refresh is running.
    #[must_use]
    pub fn is_refreshing(&self) -> bool {
        self.inner.refresh_in_flight.load(Ordering::Acquire)
    }

    // =========================================================================
    // Deferred jobs
    // =========================================================================

    /// Schedules an authoritative refresh after `delay`.
    ///
    /// The job is owned by the store and runs even if the returned handle
    /// is dropped. It is aborted by [`RefreshJob::cancel`] or
    /// [`shutdown`](Self::shutdown).
    pub fn schedule_refresh(&self, delay: Duration) -> RefreshJob {
        let id = JobId::new();
        let store = self.clone();

        tracing::debug!(job = %id, ?delay, "Scheduling confirmation refresh");

        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            tracing::debug!(job = %id, "Running confirmation refresh");
            // Failures are logged and broadcast by refresh()
            let _ = store.refresh().await;
            store.inner.jobs.complete(id);
        });
        self.inner.jobs.insert(id, handle.abort_handle());

        // A zero delay on a multi-threaded runtime may finish before insert
        if handle.is_finished() {
            self.inner.jobs.complete(id);
        }

        RefreshJob::new(id, self.inner.jobs.clone())
    }

    /// Schedules the confirmation refresh that follows a command, using
    /// the configured delay.
    pub fn schedule_confirmation(&self) -> RefreshJob {
        self.schedule_refresh(self.inner.config.confirm_delay())
    }

    /// Returns the number of scheduled jobs that have not run yet.
    #[must_use]
    pub fn pending_jobs(&self) -> usize {
        self.inner.jobs.len()
    }

    // =========================================================================
    // Polling and teardown
    // =========================================================================

    /// Starts refreshing every [`poll_interval`](ZinguoConfig::poll_interval).
    ///
    /// The first poll happens one interval from now. Calling this while
    /// polling is already running has no effect.
    pub fn start_polling(&self) {
        let mut poller = self.inner.poller.lock();
        if poller.is_some() {
            return;
        }

        let period = self.inner.config.poll_interval();
        if period.is_zero() {
            tracing::warn!("Poll interval is zero, periodic refresh disabled");
            return;
        }
        let store = self.clone();

        tracing::debug!(?period, "Starting periodic refresh");

        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval_at(tokio::time::Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                store.request_refresh();
            }
        });
        *poller = Some(handle.abort_handle());
    }

    /// Stops periodic refreshes.
    pub fn stop_polling(&self) {
        if let Some(handle) = self.inner.poller.lock().take() {
            handle.abort();
            tracing::debug!("Stopped periodic refresh");
        }
    }

    /// Returns `true` while periodic refreshes are running.
    #[must_use]
    pub fn is_polling(&self) -> bool {
        self.inner.poller.lock().is_some()
    }

    /// Stops polling and cancels every pending job.
    ///
    /// The last snapshot stays readable.
    pub fn shutdown(&self) {
        self.stop_polling();
        let cancelled = self.inner.jobs.cancel_all();
        tracing::debug!(cancelled, "State store shut down");
    }
}

impl<F: StateFetcher> Clone for StateStore<F> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<F: StateFetcher> std::fmt::Debug for StateStore<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StateStore")
            .field("devices", &self.current().len())
            .field("pending_jobs", &self.pending_jobs())
            .field("polling", &self.is_polling())
            .finish_non_exhaustive()
    }
}

/// Clears the in-flight flag when a background refresh ends, including by
/// panic or abort.
struct InFlight(Arc<AtomicBool>);

impl Drop for InFlight {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}
