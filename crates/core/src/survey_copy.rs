//! Pure helpers for duplicating a survey or copying it to another environment.
//!
//! The database layer drives the actual inserts; this module holds the
//! naming rule, the positional pairing of attribute filters with their
//! resolved classes, and the bookkeeping of how many reference classes were
//! reused versus created.

use crate::error::CoreError;
use crate::labels::SurveyStatus;
use crate::types::DbId;

/// Suffix appended to the name of a duplicated or copied survey.
pub const COPY_SUFFIX: &str = " (copy)";

/// Status every duplicated or copied survey starts in.
pub const COPY_STATUS: SurveyStatus = SurveyStatus::Draft;

/// Name given to the copy of a survey called `name`.
pub fn copy_name(name: &str) -> String {
    format!("{name}{COPY_SUFFIX}")
}

/// Pair each item with the class id resolved for it at the same position.
///
/// Filter `i` of the source survey must end up pointing at resolved class
/// `i`; a length mismatch means resolution skipped or repeated an entry.
pub fn pair_positional<T>(items: Vec<T>, resolved: &[DbId]) -> Result<Vec<(T, DbId)>, CoreError> {
    if items.len() != resolved.len() {
        return Err(CoreError::Internal(format!(
            "Resolved {} class ids for {} attribute filters",
            resolved.len(),
            items.len()
        )));
    }
    Ok(items.into_iter().zip(resolved.iter().copied()).collect())
}

// ---------------------------------------------------------------------------
// Resolution bookkeeping
// ---------------------------------------------------------------------------

/// Outcome of resolving one reference class in the target environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolved {
    /// A class with the same name already existed.
    Reused(DbId),
    /// No class with that name existed, one was inserted.
    Created(DbId),
}

impl Resolved {
    pub fn id(self) -> DbId {
        match self {
            Resolved::Reused(id) | Resolved::Created(id) => id,
        }
    }
}

/// Ordered class ids resolved during one copy, plus reuse counters for logging.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedClasses {
    ids: Vec<DbId>,
    pub created: usize,
    pub reused: usize,
}

impl ResolvedClasses {
    pub fn push(&mut self, resolved: Resolved) {
        match resolved {
            Resolved::Reused(_) => self.reused += 1,
            Resolved::Created(_) => self.created += 1,
        }
        self.ids.push(resolved.id());
    }

    /// Resolved ids in source order.
    pub fn ids(&self) -> &[DbId] {
        &self.ids
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
