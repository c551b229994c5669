//! Command and solver error taxonomy.
//!
//! Nothing here is fatal: a rejected command leaves the core untouched and is
//! reported back as an event; a solver failure is a "no solution" state.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Why a queued command was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum CommandError {
    /// The referenced tracker, contact, or tube no longer exists. Benign:
    /// deletions race with in-flight UI commands.
    #[error("referenced id not found")]
    NotFound,
    /// A live tracker already targets the source contact.
    #[error("source already designated")]
    AlreadyDesignated,
    /// The command is not valid in the current state (load on a non-empty
    /// tube, fire without a lock, lock above the search ceiling, ...).
    #[error("command invalid in current state")]
    InvalidState,
    /// The tube is loading or already loaded.
    #[error("tube busy")]
    TubeBusy,
}

/// Why the TMA solver produced no solution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum SolveError {
    /// Fewer than two bearing observations; callers must display no solution.
    #[error("insufficient bearing history")]
    InsufficientData,
}
