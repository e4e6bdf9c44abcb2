//! Engine output events.
//!
//! The engine is headless: instead of calling into rendering or physics,
//! it records each outbound effect as an [`EngineEvent`]. Integration
//! layers drain the queue after each transition and mirror the effects
//! (spawn/destroy preview visuals, swap meshes, freeze bodies, start
//! interaction affordances for triggered operations).

use assembly_types::{PartId, Pose};

use crate::table::DetailLevel;

/// An outbound effect recorded by the engine.
#[derive(Debug, Clone, PartialEq)]
pub enum EngineEvent {
    /// A sequence was loaded and the engine reset to idle.
    SequenceLoaded {
        /// Sequence name.
        name: String,
        /// Number of steps.
        steps: usize,
    },

    /// A step was entered.
    StepEntered {
        /// Step index.
        index: usize,
        /// The part the step places.
        part: PartId,
    },

    /// A ghost preview was spawned at the step's target pose.
    PreviewSpawned {
        /// The previewed part.
        part: PartId,
        /// Preview pose.
        pose: Pose,
    },

    /// The live ghost preview was destroyed.
    PreviewDestroyed {
        /// The previewed part.
        part: PartId,
    },

    /// A table instance changed detail level.
    DetailChanged {
        /// The instance's part id.
        part: PartId,
        /// New detail level.
        detail: DetailLevel,
    },

    /// The expected part was picked for the current step.
    PartPicked {
        /// The picked part.
        part: PartId,
        /// Step index awaiting placement.
        step: usize,
    },

    /// A picked instance was snapped into place. Freeze signal.
    PartPlaced {
        /// The placed part.
        part: PartId,
        /// Final pose.
        pose: Pose,
    },

    /// A step operation's execute trigger fired.
    OperationTriggered {
        /// Step index.
        step: usize,
        /// Operation index within the step.
        operation: usize,
        /// Operation kind name.
        kind: &'static str,
    },

    /// An operation's external completion acknowledgment was recorded.
    OperationCompleted {
        /// Step index.
        step: usize,
        /// Operation index within the step.
        operation: usize,
    },
}
