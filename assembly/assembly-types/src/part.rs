//! Part definitions: immutable author-time descriptions of parts.
//!
//! A [`PartDefinition`] carries everything the engine needs to know about a
//! part before any instance exists: identity, attach geometry, tool/weight
//! metadata, visual asset keys, and an optional internal subassembly
//! sequence.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::connection::ConnectionPoint;
use crate::sequence::AssemblySequence;

/// Stable unique identifier of a part definition.
///
/// Assigned once at authoring time and never reassigned; table instances
/// and assembly steps reference parts through this id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PartId(String);

impl PartId {
    /// Create a part id.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PartId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PartId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for PartId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Immutable definition of a part or subassembly.
///
/// # Example
///
/// ```
/// use assembly_types::{ConnectionPoint, PartDefinition};
/// use nalgebra::Point3;
///
/// let wheel = PartDefinition::new("wheel", "Front Wheel")
///     .with_ghost_visual("wheel_ghost")
///     .with_weight(2.5)
///     .with_connection_point(ConnectionPoint::new("axle", Point3::new(0.0, 0.0, 0.3)));
///
/// assert_eq!(wheel.id().as_str(), "wheel");
/// assert_eq!(wheel.connection_points().len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PartDefinition {
    /// Unique identifier; immutable after creation.
    id: PartId,

    /// Display name.
    name: String,

    /// Asset key for the ghost preview visual. A part without one cannot
    /// show a placement preview; its steps remain navigable.
    #[serde(default)]
    ghost_visual: Option<String>,

    /// Asset key for the table instance visual.
    #[serde(default)]
    visual: Option<String>,

    /// Weight in kilograms.
    #[serde(default = "default_weight")]
    weight: f64,

    /// Whether this part is a tool rather than an assembled component.
    #[serde(default)]
    is_tool: bool,

    /// Named attach poses, ordered. May be empty; steps that snap require
    /// index 0 to exist.
    #[serde(default)]
    connection_points: Vec<ConnectionPoint>,

    /// Internal sequence to complete before this part becomes placeable.
    #[serde(default)]
    subassembly: Option<AssemblySequence>,
}

fn default_weight() -> f64 {
    1.0
}

impl PartDefinition {
    /// Create a part definition with no attach geometry or visuals.
    #[must_use]
    pub fn new(id: impl Into<PartId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            ghost_visual: None,
            visual: None,
            weight: default_weight(),
            is_tool: false,
            connection_points: Vec::new(),
            subassembly: None,
        }
    }

    /// Get the part id.
    #[must_use]
    pub fn id(&self) -> &PartId {
        &self.id
    }

    /// Get the display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the ghost preview asset key.
    #[must_use]
    pub fn ghost_visual(&self) -> Option<&str> {
        self.ghost_visual.as_deref()
    }

    /// Get the table visual asset key.
    #[must_use]
    pub fn visual(&self) -> Option<&str> {
        self.visual.as_deref()
    }

    /// Get the weight in kilograms.
    #[must_use]
    pub fn weight(&self) -> f64 {
        self.weight
    }

    /// Whether this part is a tool.
    #[must_use]
    pub fn is_tool(&self) -> bool {
        self.is_tool
    }

    /// Get the ordered connection points.
    #[must_use]
    pub fn connection_points(&self) -> &[ConnectionPoint] {
        &self.connection_points
    }

    /// Get the primary connection point (index 0), if any.
    ///
    /// Ghost placement and placement-commit snapping always use index 0;
    /// further points are metadata for downstream tooling.
    #[must_use]
    pub fn primary_connection_point(&self) -> Option<&ConnectionPoint> {
        self.connection_points.first()
    }

    /// Get the internal subassembly sequence, if this part has one.
    #[must_use]
    pub fn subassembly(&self) -> Option<&AssemblySequence> {
        self.subassembly.as_ref()
    }

    /// Set the ghost preview asset key (builder pattern).
    #[must_use]
    pub fn with_ghost_visual(mut self, asset: impl Into<String>) -> Self {
        self.ghost_visual = Some(asset.into());
        self
    }

    /// Set the table visual asset key (builder pattern).
    #[must_use]
    pub fn with_visual(mut self, asset: impl Into<String>) -> Self {
        self.visual = Some(asset.into());
        self
    }

    /// Set the weight (builder pattern). Clamped to be non-negative.
    #[must_use]
    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = weight.max(0.0);
        self
    }

    /// Mark this part as a tool (builder pattern).
    #[must_use]
    pub fn as_tool(mut self) -> Self {
        self.is_tool = true;
        self
    }

    /// Append a connection point (builder pattern).
    #[must_use]
    pub fn with_connection_point(mut self, point: ConnectionPoint) -> Self {
        self.connection_points.push(point);
        self
    }

    /// Set the internal subassembly sequence (builder pattern).
    #[must_use]
    pub fn with_subassembly(mut self, sequence: AssemblySequence) -> Self {
        self.subassembly = Some(sequence);
        self
    }
}
