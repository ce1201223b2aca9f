// This file is part of color-lens and is licenced under the GNU GPL v3.0.
// See LICENSE file for full text.
// Copyright © 2025 color-lens contributors

//! A single-producer/single-consumer latest-value cell.
//!
//! The capture loop only ever cares about the newest frame, so there is no
//! queue and no backpressure: each publish overwrites the previous snapshot
//! and the consumer clones out whatever is newest when it next ticks.

use std::sync::{Arc, Mutex};

pub struct LatestCell<T> {
    slot: Mutex<Option<Arc<T>>>,
}

impl<T> LatestCell<T> {
    pub fn new() -> LatestCell<T> {
        LatestCell { slot: Mutex::new(None) }
    }

    /// overwrite the stored snapshot; last writer wins
    pub fn publish(&self, value: Arc<T>) {
        *self.slot.lock().unwrap() = Some(value);
    }

    /// the newest snapshot, if any has been published yet
    pub fn latest(&self) -> Option<Arc<T>> {
        self.slot.lock().unwrap().clone()
    }
}

impl<T> Default for LatestCell<T> {
    fn default() -> Self {
        LatestCell::new()
    }
}

#[cfg(test)]
mod test_latest {
    use super::*;

    #[test]
    fn empty_cell_has_no_value() {
        let cell: LatestCell<u32> = LatestCell::new();
        assert!(cell.latest().is_none());
    }

    #[test]
    fn publish_overwrites() {
        let cell = LatestCell::new();
        cell.publish(Arc::new(1));
        cell.publish(Arc::new(2));
        assert_eq!(*cell.latest().unwrap(), 2);
    }

    #[test]
    fn latest_does_not_consume() {
        let cell = LatestCell::new();
        cell.publish(Arc::new(7));
        assert_eq!(*cell.latest().unwrap(), 7);
        assert_eq!(*cell.latest().unwrap(), 7);
    }

    #[test]
    fn snapshot_survives_overwrite() {
        let cell = LatestCell::new();
        cell.publish(Arc::new(1));
        let old = cell.latest().unwrap();
        cell.publish(Arc::new(2));
        assert_eq!(*old, 1);
    }
}
