//! Persistence overlay application

use super::ConfigStore;
use crate::tree::merge;

/// Merge `persistence` on top of `store`, returning the new store.
///
/// Names and instances present only in `persistence` are created. Applying
/// the same overlay twice yields the same store.
pub fn apply_overlay(mut store: ConfigStore, persistence: &ConfigStore) -> ConfigStore {
    for (name, instances) in persistence {
        let target = store.entry(name.clone()).or_default();
        for (instance, overlay) in instances {
            match target.get_mut(instance) {
                Some(slot) => {
                    let current = slot.take();
                    *slot = merge(current, overlay.clone());
                }
                None => {
                    target.insert(instance.clone(), overlay.clone());
                }
            }
        }
    }
    store
}
