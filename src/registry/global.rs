//! The process-wide registry.
//!
//! Nothing is registered until [`init`] (or [`init_with`]) runs; the
//! accessors return `None` before that. Writers take the lock for the whole
//! read-then-rewrite of an update or merge, so lookups never see a list
//! halfway through a rebuild.

use crate::registry::Registry;
use std::sync::{OnceLock, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

static REGISTRY: OnceLock<RwLock<Registry>> = OnceLock::new();

/// Register the built-in lists. Later calls are no-ops.
pub fn init() -> &'static RwLock<Registry> {
    init_with(|_| {})
}

/// Register the built-ins, then let `extra` add more. `extra` only runs on
/// the call that actually initializes.
pub fn init_with(extra: impl FnOnce(&mut Registry)) -> &'static RwLock<Registry> {
    REGISTRY.get_or_init(|| {
        let mut registry = Registry::with_builtins();
        extra(&mut registry);
        tracing::debug!(lists = registry.len(), "global registry initialized");
        RwLock::new(registry)
    })
}

/// Install a registry built elsewhere (e.g. from configuration). Returns
/// false, dropping `registry`, when the global is already set.
pub fn install(registry: Registry) -> bool {
    let lists = registry.len();
    let installed = REGISTRY.set(RwLock::new(registry)).is_ok();
    if installed {
        tracing::debug!(lists, "global registry installed");
    }
    installed
}

pub fn is_initialized() -> bool {
    REGISTRY.get().is_some()
}

pub fn read() -> Option<RwLockReadGuard<'static, Registry>> {
    REGISTRY
        .get()
        .map(|lock| lock.read().unwrap_or_else(PoisonError::into_inner))
}

pub fn write() -> Option<RwLockWriteGuard<'static, Registry>> {
    REGISTRY
        .get()
        .map(|lock| lock.write().unwrap_or_else(PoisonError::into_inner))
}
