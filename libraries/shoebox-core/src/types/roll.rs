//! Roll types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub type RollId = i64;

/// A batch marker grouping every photo created by one import run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Roll {
    pub id: RollId,
    pub time: DateTime<Utc>,
}
