use std::sync::{LockResult, RwLock, RwLockReadGuard, RwLockWriteGuard};

use tracing::warn;

/// Take the guard even if another thread panicked while holding the lock.
/// Cache state is advisory: a stale entry costs a refetch, never correctness.
fn recover<G>(
    result: LockResult<G>,
    target: &'static str,
    op: &'static str,
    lock_kind: &'static str,
) -> G {
    result.unwrap_or_else(|poisoned| {
        warn!(
            op,
            target_module = target,
            lock_kind,
            result = "poisoned_recovered",
            "Recovered from poisoned cache lock"
        );
        poisoned.into_inner()
    })
}

pub(crate) fn rw_read<'a, T>(
    lock: &'a RwLock<T>,
    target: &'static str,
    op: &'static str,
) -> RwLockReadGuard<'a, T> {
    recover(lock.read(), target, op, "rwlock.read")
}

pub(crate) fn rw_write<'a, T>(
    lock: &'a RwLock<T>,
    target: &'static str,
    op: &'static str,
) -> RwLockWriteGuard<'a, T> {
    recover(lock.write(), target, op, "rwlock.write")
}
