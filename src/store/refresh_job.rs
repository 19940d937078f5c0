// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Deferred refresh jobs.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use parking_lot::Mutex;
use tokio::task::AbortHandle;
use uuid::Uuid;

/// Identity of a deferred refresh job.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct JobId(Uuid);

impl JobId {
    /// Creates a new unique job identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Returns the underlying UUID.
    #[must_use]
    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for JobId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "JobId({})", self.0)
    }
}

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Short form for logs
        let s = self.0.to_string();
        write!(f, "{}", &s[..8])
    }
}

/// Pending jobs owned by a state store.
#[derive(Debug, Clone, Default)]
pub(crate) struct JobRegistry {
    jobs: Arc<Mutex<HashMap<JobId, AbortHandle>>>,
}

impl JobRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, id: JobId, handle: AbortHandle) {
        self.jobs.lock().insert(id, handle);
    }

    /// Unregisters a job that ran to completion.
    pub fn complete(&self, id: JobId) {
        self.jobs.lock().remove(&id);
    }

    /// Aborts a pending job. Returns `false` if it already ran or was
    /// cancelled.
    pub fn cancel(&self, id: JobId) -> bool {
        match self.jobs.lock().remove(&id) {
            Some(handle) => {
                handle.abort();
                true
            }
            None => false,
        }
    }

    /// Aborts every pending job and returns how many there were.
    pub fn cancel_all(&self) -> usize {
        let drained: Vec<_> = self.jobs.lock().drain().collect();
        for (_, handle) in &drained {
            handle.abort();
        }
        drained.len()
    }

    pub fn contains(&self, id: JobId) -> bool {
        self.jobs.lock().contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.jobs.lock().len()
    }
}

/// Handle to a refresh scheduled by
/// [`StateStore::schedule_refresh`](super::StateStore::schedule_refresh).
///
/// The job belongs to the store, not to this handle: dropping the handle
/// does not cancel it. Running a job only performs an authoritative
/// refresh, so a job that fires after newer state arrived is harmless.
#[derive(Debug, Clone)]
pub struct RefreshJob {
    id: JobId,
    registry: JobRegistry,
}

impl RefreshJob {
    pub(crate) fn new(id: JobId, registry: JobRegistry) -> Self {
        Self { id, registry }
    }

    /// Returns the job identity.
    #[must_use]
    pub fn id(&self) -> JobId {
        self.id
    }

    /// Returns `true` while the job has neither run nor been cancelled.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.registry.contains(self.id)
    }

    /// Cancels the job.
    ///
    /// Returns `false` if it already ran or was cancelled.
    pub fn cancel(&self) -> bool {
        self.registry.cancel(self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn job_ids_are_unique() {
        assert_ne!(JobId::new(), JobId::new());
    }

    #[test]
    fn display_is_short() {
        assert_eq!(JobId::new().to_string().len(), 8);
    }

    #[tokio::test]
    async fn cancel_aborts_and_unregisters() {
        let registry = JobRegistry::new();
        let task = tokio::spawn(tokio::time::sleep(Duration::from_secs(3600)));
        let id = JobId::new();
        registry.insert(id, task.abort_handle());

        let job = RefreshJob::new(id, registry.clone());
        assert!(job.is_pending());
        assert!(job.cancel());
        assert!(!job.is_pending());
        assert!(!job.cancel());
        assert!(task.await.unwrap_err().is_cancelled());
    }

    #[tokio::test]
    async fn cancel_all_drains_registry() {
        let registry = JobRegistry::new();
        for _ in 0..3 {
            let task = tokio::spawn(tokio::time::sleep(Duration::from_secs(3600)));
            registry.insert(JobId::new(), task.abort_handle());
        }

        assert_eq!(registry.len(), 3);
        assert_eq!(registry.cancel_all(), 3);
        assert_eq!(registry.len(), 0);
    }

    #[test]
    fn complete_unregisters_without_abort() {
        let registry = JobRegistry::new();
        let id = JobId::new();
        registry.complete(id);
        assert!(!registry.contains(id));
    }
}
