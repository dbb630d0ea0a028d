//! Merge-base search
//!
//! Finds the split point of two branch tips: breadth-first search from
//! each tip labels every reachable ancestor with the side(s) it was
//! reached from and its shortest distance from that tip. Among commits
//! reachable from both sides, the one with the smallest combined distance
//! wins; ties break on the smaller distance from the source tip and then
//! on the lexicographically smallest id, so the chosen base is fully
//! deterministic and merges are reproducible.
//!
//! The finder is generic over a parent-lookup closure so the graph can
//! come from the object database or from an in-memory map in tests.
//!
//! ## Debug logging
//!
//! Build with `--features debug_merge` to trace the traversal and the
//! candidate ranking on stderr.

use crate::artifacts::objects::object_id::ObjectId;
use bitflags::bitflags;
use std::collections::{HashMap, VecDeque};

macro_rules! debug_log {
    ($($arg:tt)*) => {
        #[cfg(feature = "debug_merge")]
        {
            eprintln!($($arg)*);
        }
    };
}

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    struct VisitState: u8 {
        const FROM_SOURCE = 0b01;
        const FROM_TARGET = 0b10;
        const FROM_BOTH = Self::FROM_SOURCE.bits() | Self::FROM_TARGET.bits();
    }
}

pub struct BaseFinder<F>
where
    F: Fn(&ObjectId) -> anyhow::Result<Vec<ObjectId>>,
{
    load_parents: F,
}

impl<F> BaseFinder<F>
where
    F: Fn(&ObjectId) -> anyhow::Result<Vec<ObjectId>>,
{
    pub fn new(load_parents: F) -> Self {
        BaseFinder { load_parents }
    }

    /// Lowest common ancestor of `source` and `target`
    ///
    /// Returns `None` only when the tips share no ancestor, which cannot
    /// happen in a repository with a single shared root.
    pub fn find_merge_base(
        &self,
        source: &ObjectId,
        target: &ObjectId,
    ) -> anyhow::Result<Option<ObjectId>> {
        let source_distances = self.distances_from(source)?;
        let target_distances = self.distances_from(target)?;

        let mut states: HashMap<&ObjectId, VisitState> = HashMap::new();
        for oid in source_distances.keys() {
            states.insert(oid, VisitState::FROM_SOURCE);
        }
        for oid in target_distances.keys() {
            states
                .entry(oid)
                .and_modify(|state| *state |= VisitState::FROM_TARGET)
                .or_insert(VisitState::FROM_TARGET);
        }

        let mut best: Option<(u32, u32, &ObjectId)> = None;
        for (oid, state) in &states {
            if *state != VisitState::FROM_BOTH {
                continue;
            }

            let source_distance = source_distances[*oid];
            let combined = source_distance + target_distances[*oid];
            debug_log!(
                "candidate {} source_distance={} combined={}",
                oid,
                source_distance,
                combined
            );

            let candidate = (combined, source_distance, *oid);
            best = match best {
                Some(current) if current <= candidate => Some(current),
                _ => Some(candidate),
            };
        }

        debug_log!("merge base: {:?}", best.map(|(_, _, oid)| oid));
        Ok(best.map(|(_, _, oid)| oid.clone()))
    }

    /// Shortest distance from `tip` to every reachable ancestor, `tip`
    /// itself included at distance zero
    fn distances_from(&self, tip: &ObjectId) -> anyhow::Result<HashMap<ObjectId, u32>> {
        let mut distances = HashMap::new();
        let mut queue = VecDeque::new();

        distances.insert(tip.clone(), 0);
        queue.push_back(tip.clone());

        while let Some(oid) = queue.pop_front() {
            let distance = distances[&oid];

            for parent in (self.load_parents)(&oid)? {
                if !distances.contains_key(&parent) {
                    distances.insert(parent.clone(), distance + 1);
                    queue.push_back(parent);
                }
            }
        }

        Ok(distances)
    }
}
