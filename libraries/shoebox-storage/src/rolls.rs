//! Import batches

use chrono::Utc;
use shoebox_core::{LibraryError, Result, Roll, RollId, RollStore};
use std::collections::BTreeMap;

/// Roll store backed by a `BTreeMap`
#[derive(Debug, Default)]
pub struct MemoryRollStore {
    rolls: BTreeMap<RollId, Roll>,
    next_id: RollId,
}

impl MemoryRollStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.rolls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rolls.is_empty()
    }

    pub fn all(&self) -> Vec<Roll> {
        self.rolls.values().cloned().collect()
    }
}

impl RollStore for MemoryRollStore {
    fn create(&mut self) -> Result<Roll> {
        self.next_id += 1;
        let roll = Roll {
            id: self.next_id,
            time: Utc::now(),
        };
        self.rolls.insert(roll.id, roll.clone());
        Ok(roll)
    }

    fn remove(&mut self, id: RollId) -> Result<()> {
        self.rolls
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| LibraryError::not_found("Roll", id))
    }

    fn get(&self, id: RollId) -> Result<Option<Roll>> {
        Ok(self.rolls.get(&id).cloned())
    }
}
