//! Error types for engine transitions.
//!
//! Every variant is a local, recoverable condition: the engine remains in
//! its prior valid state after any of them, and no retry is attempted: the
//! caller re-issues the event to proceed. [`EngineError::is_guidance`]
//! separates corrective-instruction signals from true errors.

use assembly_types::PartId;
use thiserror::Error;

/// Result type for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;

/// Errors that can occur during engine transitions.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// The sequence failed catalog validation and cannot be loaded.
    #[error("invalid sequence: {reason}")]
    InvalidSequence {
        /// Validation summary.
        reason: String,
    },

    /// A navigation or pick event arrived with no sequence loaded.
    #[error("no sequence loaded")]
    NoSequenceLoaded,

    /// A pick event arrived before any step was entered.
    #[error("no active step")]
    NoActiveStep,

    /// Step or operation index outside `[0, len)`.
    #[error("index {index} out of range (len {len})")]
    IndexOutOfRange {
        /// The rejected index.
        index: usize,
        /// Number of elements in the indexed list.
        len: usize,
    },

    /// The part id was not found where it was required (table registry, or
    /// presence validation on step entry).
    #[error("part '{id}' not found on table")]
    PartNotFound {
        /// The missing part id.
        id: PartId,
    },

    /// The picked part does not match the current step's part.
    ///
    /// A guidance signal, not a failure: engine state is unchanged and the
    /// caller should display corrective instruction.
    #[error("picked part '{picked}' does not match expected part '{expected}'")]
    WrongPartForStep {
        /// The part that was picked.
        picked: PartId,
        /// The part the current step expects.
        expected: PartId,
    },

    /// Placement commit with no part picked.
    #[error("no part picked to place")]
    NothingPicked,

    /// Placement commit on an instance already placed.
    #[error("part '{id}' is already placed")]
    AlreadyPlaced {
        /// The already-placed part id.
        id: PartId,
    },
}

impl EngineError {
    /// Whether this is a user-guidance signal rather than a true error.
    ///
    /// Guidance signals call for corrective instruction (e.g. "pick the
    /// highlighted part instead"); true errors indicate a misuse of the
    /// engine API or missing setup.
    #[must_use]
    pub fn is_guidance(&self) -> bool {
        matches!(self, Self::WrongPartForStep { .. })
    }
}
