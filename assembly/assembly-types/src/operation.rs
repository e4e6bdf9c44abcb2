//! Step operations: post-placement actions with independent completion.
//!
//! An [`Operation`] pairs author-time configuration (the [`OperationKind`])
//! with a runtime completion flag. `execute()` is a fire-and-forget trigger
//! invoked by the engine; completion is acknowledged later by the
//! interaction layer via `mark_completed()`. The two are deliberately
//! decoupled: triggering never flips the flag.

use serde::{Deserialize, Serialize};

/// Minimum snap distance threshold, in meters.
pub const MIN_SNAP_THRESHOLD: f64 = 0.01;

/// Configuration for one step operation.
///
/// Closed set of variants; numeric configuration is clamped to a
/// non-negative floor when constructed or deserialized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum OperationKind {
    /// Snap the part onto one of its connection points.
    Snap {
        /// Index of the target connection point inside the part.
        connection_point: usize,
        /// Distance threshold to auto-snap, in meters.
        snap_threshold: f64,
    },
    /// Tighten a fastener to a target torque.
    Tighten {
        /// Target torque in newton-meters.
        torque_nm: f64,
        /// Required tool asset key, if any.
        tool: Option<String>,
    },
    /// Apply grease or oil.
    Grease {
        /// Amount to apply, in volume units.
        amount: f64,
        /// Applicator tool asset key, if any.
        tool: Option<String>,
    },
    /// Clean the part or joint surface.
    Clean {
        /// Cleaning tool asset key, if any.
        tool: Option<String>,
    },
}

impl OperationKind {
    /// Get a human-readable name for the operation kind.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Snap { .. } => "snap",
            Self::Tighten { .. } => "tighten",
            Self::Grease { .. } => "grease",
            Self::Clean { .. } => "clean",
        }
    }

    /// Clamp numeric configuration to its floor values.
    #[must_use]
    fn clamped(self) -> Self {
        match self {
            Self::Snap {
                connection_point,
                snap_threshold,
            } => Self::Snap {
                connection_point,
                snap_threshold: snap_threshold.max(MIN_SNAP_THRESHOLD),
            },
            Self::Tighten { torque_nm, tool } => Self::Tighten {
                torque_nm: torque_nm.max(0.0),
                tool,
            },
            Self::Grease { amount, tool } => Self::Grease {
                amount: amount.max(0.0),
                tool,
            },
            Self::Clean { tool } => Self::Clean { tool },
        }
    }
}

/// A step operation: configuration plus a once-only completion flag.
///
/// # Example
///
/// ```
/// use assembly_types::Operation;
///
/// let mut op = Operation::tighten(12.0, Some("torque_wrench"));
/// assert!(!op.is_completed());
///
/// op.execute(); // trigger only, does not complete
/// assert!(!op.is_completed());
///
/// op.mark_completed(); // external acknowledgment
/// assert!(op.is_completed());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "OperationKind", into = "OperationKind")]
pub struct Operation {
    /// Author-time configuration.
    kind: OperationKind,

    /// Runtime completion flag; flips false to true exactly once.
    completed: bool,
}

impl From<OperationKind> for Operation {
    fn from(kind: OperationKind) -> Self {
        Self::new(kind)
    }
}

impl From<Operation> for OperationKind {
    fn from(op: Operation) -> Self {
        op.kind
    }
}

impl Operation {
    /// Create an operation, clamping numeric configuration.
    #[must_use]
    pub fn new(kind: OperationKind) -> Self {
        Self {
            kind: kind.clamped(),
            completed: false,
        }
    }

    /// Create a snap operation.
    #[must_use]
    pub fn snap(connection_point: usize, snap_threshold: f64) -> Self {
        Self::new(OperationKind::Snap {
            connection_point,
            snap_threshold,
        })
    }

    /// Create a tighten operation.
    #[must_use]
    pub fn tighten(torque_nm: f64, tool: Option<&str>) -> Self {
        Self::new(OperationKind::Tighten {
            torque_nm,
            tool: tool.map(str::to_string),
        })
    }

    /// Create a grease operation.
    #[must_use]
    pub fn grease(amount: f64, tool: Option<&str>) -> Self {
        Self::new(OperationKind::Grease {
            amount,
            tool: tool.map(str::to_string),
        })
    }

    /// Create a clean operation.
    #[must_use]
    pub fn clean(tool: Option<&str>) -> Self {
        Self::new(OperationKind::Clean {
            tool: tool.map(str::to_string),
        })
    }

    /// Get the operation configuration.
    #[must_use]
    pub fn kind(&self) -> &OperationKind {
        &self.kind
    }

    /// Trigger the operation.
    ///
    /// Side-effecting entry point invoked by the engine; safe to call more
    /// than once. Completion is acknowledged separately through
    /// [`mark_completed`](Self::mark_completed).
    pub fn execute(&self) {
        tracing::debug!(kind = self.kind.as_str(), "operation triggered");
    }

    /// Whether the external acknowledgment has arrived.
    #[must_use]
    pub fn is_completed(&self) -> bool {
        self.completed
    }

    /// Record the external completion acknowledgment.
    ///
    /// Flips the flag irreversibly; repeated acknowledgments are ignored.
    pub fn mark_completed(&mut self) {
        if self.completed {
            tracing::debug!(kind = self.kind.as_str(), "operation already completed");
            return;
        }
        self.completed = true;
        tracing::debug!(kind = self.kind.as_str(), "operation completed");
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn test_tighten_clamps_negative_torque() {
        let op = Operation::tighten(-5.0, None);

        match op.kind() {
            OperationKind::Tighten { torque_nm, .. } => assert_eq!(*torque_nm, 0.0),
            other => panic!("unexpected kind: {other:?}"),
        }
    }

    #[test]
    fn test_grease_clamps_negative_amount() {
        let op = Operation::grease(-1.0, Some("gun"));

        match op.kind() {
            OperationKind::Grease { amount, tool } => {
                assert_eq!(*amount, 0.0);
                assert_eq!(tool.as_deref(), Some("gun"));
            }
            other => panic!("unexpected kind: {other:?}"),
        }
    }

    #[test]
    fn test_snap_threshold_floor() {
        let op = Operation::snap(0, 0.001);

        match op.kind() {
            OperationKind::Snap { snap_threshold, .. } => {
                assert_eq!(*snap_threshold, MIN_SNAP_THRESHOLD);
            }
            other => panic!("unexpected kind: {other:?}"),
        }
    }

    #[test]
    fn test_execute_does_not_complete() {
        let op = Operation::clean(None);

        op.execute();
        op.execute();
        assert!(!op.is_completed());
    }

    #[test]
    fn test_mark_completed_is_irreversible() {
        let mut op = Operation::tighten(8.0, None);

        op.mark_completed();
        assert!(op.is_completed());

        op.mark_completed();
        assert!(op.is_completed());
    }

    #[test]
    fn test_deserialize_clamps() {
        let op: Operation =
            serde_json::from_str(r#"{"type": "tighten", "torque_nm": -3.0, "tool": null}"#)
                .unwrap();

        assert!(!op.is_completed());
        match op.kind() {
            OperationKind::Tighten { torque_nm, .. } => assert_eq!(*torque_nm, 0.0),
            other => panic!("unexpected kind: {other:?}"),
        }
    }

    #[test]
    fn test_serialize_is_bare_config() {
        let op = Operation::snap(1, 0.05);
        let json = serde_json::to_value(&op).unwrap();

        assert_eq!(json["type"], "snap");
        assert_eq!(json["connection_point"], 1);
        assert!(json.get("completed").is_none());
    }
}
