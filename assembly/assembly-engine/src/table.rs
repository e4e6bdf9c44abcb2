//! Live table-part instances.
//!
//! A [`TablePart`] is the runtime counterpart of a [`PartDefinition`]: the
//! physical/virtual instance sitting on the table, available for picking.
//! It tracks a two-level visual detail state and a terminal "placed" flag.

use assembly_types::{PartDefinition, PartId, Pose};

/// Binary visual detail state of a table part.
///
/// Parts rest on the table at low detail and switch to high detail when
/// picked for placement. The actual mesh swap is the rendering layer's
/// concern; this is the opaque two-state toggle it mirrors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetailLevel {
    /// Table-resting representation.
    Low,
    /// Full representation for assembly.
    High,
}

impl DetailLevel {
    /// Get a human-readable name for the detail level.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::High => "high",
        }
    }
}

/// A live, mutable part instance on the table.
///
/// Created when a part enters the session and registered into the
/// [`TableRegistry`](crate::TableRegistry). Once placed, the instance is
/// terminal: it never returns to the table.
///
/// # Example
///
/// ```
/// use assembly_engine::{DetailLevel, TablePart};
/// use assembly_types::PartDefinition;
///
/// let mut part = TablePart::new(PartDefinition::new("hub", "Wheel Hub"));
/// assert_eq!(part.detail(), DetailLevel::Low);
/// assert!(!part.is_placed());
///
/// part.mark_placed();
/// assert!(part.is_placed());
/// ```
#[derive(Debug, Clone)]
pub struct TablePart {
    /// The definition this instance realizes.
    definition: PartDefinition,

    /// Current visual detail state.
    detail: DetailLevel,

    /// Terminal placement flag; set once, never cleared.
    placed: bool,

    /// Current pose of the instance.
    pose: Pose,
}

impl TablePart {
    /// Create an instance at low detail with identity pose.
    #[must_use]
    pub fn new(definition: PartDefinition) -> Self {
        Self {
            definition,
            detail: DetailLevel::Low,
            placed: false,
            pose: Pose::identity(),
        }
    }

    /// Get the part definition.
    #[must_use]
    pub fn definition(&self) -> &PartDefinition {
        &self.definition
    }

    /// Get the part id.
    #[must_use]
    pub fn part_id(&self) -> &PartId {
        self.definition.id()
    }

    /// Get the current detail level.
    #[must_use]
    pub fn detail(&self) -> DetailLevel {
        self.detail
    }

    /// Set the detail level. Always succeeds; pure visual side effect.
    pub fn set_detail(&mut self, detail: DetailLevel) {
        self.detail = detail;
    }

    /// Whether this instance has been placed.
    #[must_use]
    pub fn is_placed(&self) -> bool {
        self.placed
    }

    /// Mark this instance as placed.
    ///
    /// Terminal: the flag is never cleared. Downstream layers treat this as
    /// the freeze signal (disable interaction, pin the body).
    pub fn mark_placed(&mut self) {
        self.placed = true;
    }

    /// Get the current pose.
    #[must_use]
    pub fn pose(&self) -> Pose {
        self.pose
    }

    /// Set the current pose.
    pub fn set_pose(&mut self, pose: Pose) {
        self.pose = pose;
    }

    /// Set the initial pose (builder pattern).
    #[must_use]
    pub fn with_pose(mut self, pose: Pose) -> Self {
        self.pose = pose;
        self
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use nalgebra::Point3;

    #[test]
    fn test_new_starts_low_detail() {
        let part = TablePart::new(PartDefinition::new("a", "A"));

        assert_eq!(part.detail(), DetailLevel::Low);
        assert!(!part.is_placed());
        assert_eq!(part.part_id().as_str(), "a");
    }

    #[test]
    fn test_detail_toggle() {
        let mut part = TablePart::new(PartDefinition::new("a", "A"));

        part.set_detail(DetailLevel::High);
        assert_eq!(part.detail(), DetailLevel::High);

        part.set_detail(DetailLevel::Low);
        assert_eq!(part.detail(), DetailLevel::Low);
    }

    #[test]
    fn test_mark_placed_is_terminal() {
        let mut part = TablePart::new(PartDefinition::new("a", "A"));

        part.mark_placed();
        part.mark_placed();
        assert!(part.is_placed());
    }

    #[test]
    fn test_pose() {
        let mut part = TablePart::new(PartDefinition::new("a", "A"))
            .with_pose(Pose::from_position(Point3::new(1.0, 0.0, 0.0)));
        assert_relative_eq!(part.pose().position.x, 1.0);

        part.set_pose(Pose::identity());
        assert_relative_eq!(part.pose().position.x, 0.0);
    }

    #[test]
    fn test_detail_level_as_str() {
        assert_eq!(DetailLevel::Low.as_str(), "low");
        assert_eq!(DetailLevel::High.as_str(), "high");
    }
}
