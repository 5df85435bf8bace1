//! Page liveness tracking for async work.
//!
//! A page spawns its fetches with a `MountFlag` clone and applies results only
//! while the flag is still set. Leaving the route flips it in `on_cleanup`.
//!
//! Pages that can start the same request again before the last one settles
//! use a `LoadSequence`: every start takes a `LoadTicket`, and only the newest
//! ticket of a still-mounted page may apply its result.

#[cfg(test)]
#[path = "lifecycle_test.rs"]
mod lifecycle_test;

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

#[derive(Clone, Debug)]
pub struct MountFlag(Arc<AtomicBool>);

impl MountFlag {
    pub fn new() -> Self {
        Self(Arc::new(AtomicBool::new(true)))
    }

    /// Create a flag released when the current reactive owner is disposed.
    pub fn install() -> Self {
        let flag = Self::new();
        let on_unmount = flag.clone();
        leptos::prelude::on_cleanup(move || on_unmount.release());
        flag
    }

    pub fn is_mounted(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }

    pub fn release(&self) {
        self.0.store(false, Ordering::Relaxed);
    }
}

impl Default for MountFlag {
    fn default() -> Self {
        Self::new()
    }
}

/// Generation counter for repeatable async work on one page.
#[derive(Clone, Debug, Default)]
pub struct LoadSequence {
    mounted: MountFlag,
    generation: Arc<AtomicU64>,
}

impl LoadSequence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a sequence whose tickets all go stale when the current reactive
    /// owner is disposed.
    pub fn install() -> Self {
        Self { mounted: MountFlag::install(), generation: Arc::default() }
    }

    /// Start a new load; every earlier ticket stops being current.
    pub fn begin(&self) -> LoadTicket {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        LoadTicket { sequence: self.clone(), generation }
    }

    /// Drop every outstanding ticket without starting a new load.
    pub fn invalidate(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
    }

    /// Mark the owning page as gone; no ticket is current afterwards.
    pub fn release(&self) {
        self.mounted.release();
    }
}

/// Permission for one async load to write its result.
#[derive(Clone, Debug)]
pub struct LoadTicket {
    sequence: LoadSequence,
    generation: u64,
}

impl LoadTicket {
    pub fn is_current(&self) -> bool {
        self.sequence.mounted.is_mounted()
            && self.sequence.generation.load(Ordering::SeqCst) == self.generation
    }
}
