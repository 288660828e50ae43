//! Allocation Coordinator
//!
//! Hands out the locks that serialize mutating operations. Each subnet's
//! address pool is one unit of mutual exclusion: two concurrent allocations
//! against the same subnet take the same lock, so exactly one of them wins a
//! given free address. Subnet creation and CIDR suggestion serialize per
//! namespace for the same reason.
//!
//! The coordinator performs no background work and holds no long-lived
//! threads; a guard lives only for the duration of one read-modify-write.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

use crate::domain::models::namespace::NamespaceId;
use crate::domain::models::subnet::SubnetId;

/// Per-resource lock registry for allocation and registration
#[derive(Default)]
pub struct AllocationCoordinator {
    subnet_locks: Mutex<HashMap<SubnetId, Arc<AsyncMutex<()>>>>,
    namespace_locks: Mutex<HashMap<NamespaceId, Arc<AsyncMutex<()>>>>,
}

impl AllocationCoordinator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Acquire the lock serializing pool mutations for one subnet
    pub async fn lock_subnet(&self, id: &SubnetId) -> OwnedMutexGuard<()> {
        let lock = {
            let mut locks = self
                .subnet_locks
                .lock()
                .unwrap_or_else(PoisonError::into_inner);
            Arc::clone(locks.entry(*id).or_default())
        };
        lock.lock_owned().await
    }

    /// Acquire the lock serializing subnet registration for one namespace
    pub async fn lock_namespace(&self, id: &NamespaceId) -> OwnedMutexGuard<()> {
        let lock = {
            let mut locks = self
                .namespace_locks
                .lock()
                .unwrap_or_else(PoisonError::into_inner);
            Arc::clone(locks.entry(*id).or_default())
        };
        lock.lock_owned().await
    }
}
