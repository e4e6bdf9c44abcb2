//! Assembly sequences: ordered, named lists of steps.
//!
//! Step order is the only permitted traversal order; the engine walks a
//! sequence by index within `[0, step_count)` and never reorders steps at
//! runtime.

use hashbrown::HashSet;
use serde::{Deserialize, Serialize};

use crate::catalog::PartCatalog;
use crate::operation::OperationKind;
use crate::part::PartId;
use crate::step::AssemblyStep;

/// An ordered, named list of assembly steps.
///
/// # Example
///
/// ```
/// use assembly_types::{AssemblySequence, AssemblyStep};
///
/// let seq = AssemblySequence::new("wheel_mount")
///     .with_description("Front wheel mounting procedure")
///     .with_step(AssemblyStep::new("Fit hub", "hub"))
///     .with_step(AssemblyStep::new("Mount wheel", "wheel"));
///
/// assert_eq!(seq.step_count(), 2);
/// assert_eq!(seq.step(1).unwrap().part().as_str(), "wheel");
/// assert!(seq.step(2).is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssemblySequence {
    /// Sequence name.
    name: String,

    /// Optional description or notes.
    #[serde(default)]
    description: Option<String>,

    /// Ordered assembly steps.
    #[serde(default)]
    steps: Vec<AssemblyStep>,
}

impl AssemblySequence {
    /// Create an empty sequence.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            steps: Vec::new(),
        }
    }

    /// Get the sequence name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the description.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Get a step by index.
    #[must_use]
    pub fn step(&self, index: usize) -> Option<&AssemblyStep> {
        self.steps.get(index)
    }

    /// Get mutable access to a step by index.
    pub fn step_mut(&mut self, index: usize) -> Option<&mut AssemblyStep> {
        self.steps.get_mut(index)
    }

    /// Get all steps in order.
    #[must_use]
    pub fn steps(&self) -> &[AssemblyStep] {
        &self.steps
    }

    /// Get the number of steps.
    #[must_use]
    pub fn step_count(&self) -> usize {
        self.steps.len()
    }

    /// Check if the sequence has no steps.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Set the description (builder pattern).
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Append a step (builder pattern).
    #[must_use]
    pub fn with_step(mut self, step: AssemblyStep) -> Self {
        self.steps.push(step);
        self
    }

    /// Append a step.
    pub fn push_step(&mut self, step: AssemblyStep) {
        self.steps.push(step);
    }

    /// Validate this sequence against a part catalog.
    ///
    /// Checks that every step references a known part, that snap operations
    /// point at existing connection points, and recursively validates the
    /// subassembly sequences of referenced parts. A set of already-visited
    /// part ids guards against subassembly cycles.
    #[must_use]
    pub fn validate(&self, catalog: &PartCatalog) -> SequenceValidation {
        let mut result = SequenceValidation::new();
        result.empty = self.steps.is_empty();

        let mut visited = HashSet::new();
        self.validate_into(catalog, &mut result, &mut visited);
        result
    }

    fn validate_into(
        &self,
        catalog: &PartCatalog,
        result: &mut SequenceValidation,
        visited: &mut HashSet<PartId>,
    ) {
        for (index, step) in self.steps.iter().enumerate() {
            let Some(part) = catalog.get(step.part()) else {
                result.unknown_parts.push((index, step.part().clone()));
                continue;
            };

            for op in step.operations() {
                if let OperationKind::Snap {
                    connection_point, ..
                } = op.kind()
                    && *connection_point >= part.connection_points().len()
                {
                    result.missing_snap_points.push((
                        index,
                        step.part().clone(),
                        *connection_point,
                    ));
                }
            }

            if let Some(sub) = part.subassembly()
                && visited.insert(step.part().clone())
            {
                sub.validate_into(catalog, result, visited);
            }
        }
    }
}

/// Result of validating a sequence against a catalog.
///
/// Contains information about any issues found.
#[derive(Debug, Clone, Default)]
pub struct SequenceValidation {
    /// Steps referencing parts missing from the catalog
    /// (`step_index`, `part_id`).
    pub unknown_parts: Vec<(usize, PartId)>,

    /// Snap operations pointing at nonexistent connection points
    /// (`step_index`, `part_id`, `connection_point_index`).
    pub missing_snap_points: Vec<(usize, PartId, usize)>,

    /// Whether the sequence has no steps. A warning, not an error.
    pub empty: bool,
}

impl SequenceValidation {
    /// Create a new empty validation result.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if the sequence is valid (no issues found).
    ///
    /// An empty sequence is valid; it only warrants a warning.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.unknown_parts.is_empty() && self.missing_snap_points.is_empty()
    }

    /// Get the total number of issues found.
    #[must_use]
    pub fn issue_count(&self) -> usize {
        self.unknown_parts.len() + self.missing_snap_points.len()
    }

    /// Get a summary of validation issues as a string.
    #[must_use]
    pub fn summary(&self) -> String {
        if self.is_valid() {
            return "sequence is valid".to_string();
        }

        let mut issues = Vec::new();
        if !self.unknown_parts.is_empty() {
            issues.push(format!(
                "{} unknown part reference(s)",
                self.unknown_parts.len()
            ));
        }
        if !self.missing_snap_points.is_empty() {
            issues.push(format!(
                "{} snap operation(s) with missing connection points",
                self.missing_snap_points.len()
            ));
        }
        issues.join(", ")
    }
}
