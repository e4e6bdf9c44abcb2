//! Assembly steps: one ordered unit of a sequence.

use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

use crate::operation::Operation;
use crate::part::PartId;

/// A single step in an assembly sequence.
///
/// Binds exactly one part to an ordered list of post-placement operations,
/// plus guidance metadata for the preview and instruction display.
///
/// # Example
///
/// ```
/// use assembly_types::{AssemblyStep, Operation};
///
/// let step = AssemblyStep::new("Mount wheel", "wheel")
///     .with_instruction("Slide the wheel onto the front axle.")
///     .with_operation(Operation::tighten(25.0, Some("torque_wrench")));
///
/// assert_eq!(step.part().as_str(), "wheel");
/// assert_eq!(step.operations().len(), 1);
/// assert!(step.validate_part_presence());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssemblyStep {
    /// Step name for identification and logging.
    name: String,

    /// The part this step places. Required.
    part: PartId,

    /// Offset added to the ghost preview position.
    #[serde(default = "Vector3::zeros")]
    ghost_offset: Vector3<f64>,

    /// Guidance text shown to the user.
    #[serde(default)]
    instruction: String,

    /// Operations executed after placement, in order.
    #[serde(default)]
    operations: Vec<Operation>,

    /// Whether entering this step requires the part to be present on the
    /// table.
    #[serde(default = "default_true")]
    validate_part_presence: bool,
}

fn default_true() -> bool {
    true
}

impl AssemblyStep {
    /// Create a step for a part with no operations.
    #[must_use]
    pub fn new(name: impl Into<String>, part: impl Into<PartId>) -> Self {
        Self {
            name: name.into(),
            part: part.into(),
            ghost_offset: Vector3::zeros(),
            instruction: String::new(),
            operations: Vec::new(),
            validate_part_presence: true,
        }
    }

    /// Get the step name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the id of the part this step places.
    #[must_use]
    pub fn part(&self) -> &PartId {
        &self.part
    }

    /// Get the ghost preview offset.
    #[must_use]
    pub fn ghost_offset(&self) -> Vector3<f64> {
        self.ghost_offset
    }

    /// Get the guidance instruction text.
    #[must_use]
    pub fn instruction(&self) -> &str {
        &self.instruction
    }

    /// Get the step operations in execution order.
    #[must_use]
    pub fn operations(&self) -> &[Operation] {
        &self.operations
    }

    /// Get mutable access to the step operations.
    ///
    /// Used by the engine to record completion acknowledgments.
    pub fn operations_mut(&mut self) -> &mut [Operation] {
        &mut self.operations
    }

    /// Whether entering this step validates part presence on the table.
    #[must_use]
    pub fn validate_part_presence(&self) -> bool {
        self.validate_part_presence
    }

    /// Set the ghost preview offset (builder pattern).
    #[must_use]
    pub fn with_ghost_offset(mut self, offset: Vector3<f64>) -> Self {
        self.ghost_offset = offset;
        self
    }

    /// Set the guidance instruction text (builder pattern).
    #[must_use]
    pub fn with_instruction(mut self, instruction: impl Into<String>) -> Self {
        self.instruction = instruction.into();
        self
    }

    /// Append an operation (builder pattern).
    #[must_use]
    pub fn with_operation(mut self, operation: Operation) -> Self {
        self.operations.push(operation);
        self
    }

    /// Disable part-presence validation for this step (builder pattern).
    #[must_use]
    pub fn without_presence_validation(mut self) -> Self {
        self.validate_part_presence = false;
        self
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_step_new() {
        let step = AssemblyStep::new("Fit bearing", "bearing");

        assert_eq!(step.name(), "Fit bearing");
        assert_eq!(step.part().as_str(), "bearing");
        assert!(step.operations().is_empty());
        assert!(step.instruction().is_empty());
        assert!(step.validate_part_presence());
        assert_relative_eq!(step.ghost_offset().norm(), 0.0);
    }

    #[test]
    fn test_step_builder() {
        let step = AssemblyStep::new("Grease bearing", "bearing")
            .with_ghost_offset(Vector3::new(0.0, 0.1, 0.0))
            .with_instruction("Apply grease to the inner race.")
            .with_operation(Operation::grease(2.0, Some("gun")))
            .with_operation(Operation::clean(None))
            .without_presence_validation();

        assert_relative_eq!(step.ghost_offset().y, 0.1);
        assert_eq!(step.operations().len(), 2);
        assert!(!step.validate_part_presence());
    }

    #[test]
    fn test_deserialize_defaults() {
        let step: AssemblyStep =
            serde_json::from_str(r#"{"name": "s", "part": "p"}"#).unwrap();

        assert!(step.validate_part_presence());
        assert!(step.operations().is_empty());
        assert_relative_eq!(step.ghost_offset().norm(), 0.0);
    }
}
