//! State id registry
//!
//! Ids are issued monotonically and never reused while marked used, even
//! after the owning state is destroyed.

use ahash::AHashSet;
use serde::{Deserialize, Serialize};

use crate::core::types::StateId;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StateRegistry {
    next_id: u32,
    used: AHashSet<u32>,
}

impl StateRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue the smallest unused id at or above the counter and advance past it
    pub fn allocate(&mut self) -> StateId {
        while self.used.contains(&self.next_id) {
            self.next_id += 1;
        }
        let id = self.next_id;
        self.used.insert(id);
        self.next_id += 1;
        StateId(id)
    }

    /// Import a pre-existing id, e.g. on snapshot load
    pub fn register(&mut self, id: StateId) {
        self.used.insert(id.0);
        if id.0 >= self.next_id {
            self.next_id = id.0 + 1;
        }
    }

    pub fn is_used(&self, id: StateId) -> bool {
        self.used.contains(&id.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_allocate_is_sequential_from_empty() {
        let mut registry = StateRegistry::new();
        assert_eq!(registry.allocate(), StateId(0));
        assert_eq!(registry.allocate(), StateId(1));
        assert_eq!(registry.allocate(), StateId(2));
    }

    #[test]
    fn test_register_advances_counter() {
        let mut registry = StateRegistry::new();
        registry.register(StateId(5));
        assert_eq!(registry.allocate(), StateId(6));
    }

    #[test]
    fn test_allocate_skips_registered_ids() {
        let mut registry = StateRegistry::new();
        registry.register(StateId(0));
        registry.register(StateId(2));
        assert_eq!(registry.allocate(), StateId(3));
    }

    #[test]
    fn test_ids_survive_destruction() {
        // Destroying a state never frees its id; there is no revoke
        let mut registry = StateRegistry::new();
        let first = registry.allocate();
        let second = registry.allocate();
        assert!(registry.is_used(first));
        assert_ne!(registry.allocate(), first);
        assert_ne!(second, first);
    }

    proptest! {
        #[test]
        fn prop_allocations_never_collide(imports in proptest::collection::vec(0u32..64, 0..16), allocs in 1usize..32) {
            let mut registry = StateRegistry::new();
            let mut seen = AHashSet::new();
            for id in imports {
                registry.register(StateId(id));
                seen.insert(id);
            }
            for _ in 0..allocs {
                let id = registry.allocate();
                prop_assert!(!seen.contains(&id.0));
                seen.insert(id.0);
            }
        }
    }
}
