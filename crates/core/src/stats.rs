//! Catalog headline statistics.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::case::{CaseRecord, CASE_TYPE_MISSING_PERSON};

/// Shape of `GET /cases/stats`, also computed locally when that endpoint
/// is unavailable.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaseStats {
    pub total_cases: u64,
    pub unsolved_cases: u64,
    pub missing_persons: u64,
    pub states_covered: u64,
}

impl CaseStats {
    /// Recompute the headline numbers from the records already in memory.
    pub fn from_records(records: &[CaseRecord]) -> Self {
        let mut states = HashSet::new();
        let mut unsolved = 0u64;
        let mut missing = 0u64;

        for record in records {
            if record.is_unsolved() {
                unsolved += 1;
            }
            if record.case_type == CASE_TYPE_MISSING_PERSON {
                missing += 1;
            }
            if let Some(state) = record.state() {
                states.insert(state);
            }
        }

        Self {
            total_cases: records.len() as u64,
            unsolved_cases: unsolved,
            missing_persons: missing,
            states_covered: states.len() as u64,
        }
    }
}
