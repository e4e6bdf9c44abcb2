//! Connection points: named local attach poses on a part.
//!
//! A connection point defines where a mating part attaches, as a pose
//! local to the owning part. Steps that snap a part into place use the
//! part's connection point at index 0 as the placement target.

use nalgebra::{Point3, UnitQuaternion};
use serde::{Deserialize, Serialize};

use crate::pose::Pose;

/// A named local attach pose on a part.
///
/// # Example
///
/// ```
/// use assembly_types::ConnectionPoint;
/// use nalgebra::Point3;
///
/// let cp = ConnectionPoint::new("hub", Point3::new(0.0, 0.1, 0.0));
/// assert_eq!(cp.id(), "hub");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConnectionPoint {
    /// Identifier, unique within the owning part.
    id: String,

    /// Position relative to the part origin.
    local_position: Point3<f64>,

    /// Rotation relative to the part origin.
    #[serde(default = "UnitQuaternion::identity")]
    local_rotation: UnitQuaternion<f64>,
}

impl ConnectionPoint {
    /// Create a connection point with identity rotation.
    #[must_use]
    pub fn new(id: impl Into<String>, local_position: Point3<f64>) -> Self {
        Self {
            id: id.into(),
            local_position,
            local_rotation: UnitQuaternion::identity(),
        }
    }

    /// Set the local rotation (builder pattern).
    #[must_use]
    pub fn with_rotation(mut self, rotation: UnitQuaternion<f64>) -> Self {
        self.local_rotation = rotation;
        self
    }

    /// Get the connection point id.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Get the position relative to the part origin.
    #[must_use]
    pub fn local_position(&self) -> Point3<f64> {
        self.local_position
    }

    /// Get the rotation relative to the part origin.
    #[must_use]
    pub fn local_rotation(&self) -> UnitQuaternion<f64> {
        self.local_rotation
    }

    /// The attach pose this point defines, in part-local coordinates.
    #[must_use]
    pub fn pose(&self) -> Pose {
        Pose::from_position_rotation(self.local_position, self.local_rotation)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use nalgebra::Vector3;
    use std::f64::consts::PI;

    #[test]
    fn test_new_has_identity_rotation() {
        let cp = ConnectionPoint::new("a", Point3::new(1.0, 2.0, 3.0));

        assert_eq!(cp.id(), "a");
        assert_relative_eq!(cp.local_position().y, 2.0);
        assert_relative_eq!(cp.local_rotation().angle(), 0.0);
    }

    #[test]
    fn test_with_rotation() {
        let rotation = UnitQuaternion::from_axis_angle(&Vector3::x_axis(), PI);
        let cp = ConnectionPoint::new("b", Point3::origin()).with_rotation(rotation);

        assert_relative_eq!(cp.local_rotation().angle(), PI, epsilon = 1e-12);
    }

    #[test]
    fn test_pose() {
        let cp = ConnectionPoint::new("c", Point3::new(0.5, 0.0, 0.0));
        let pose = cp.pose();

        assert_relative_eq!(pose.position.x, 0.5);
        assert_relative_eq!(pose.rotation.angle(), 0.0);
    }

    #[test]
    fn test_deserialize_defaults_rotation() {
        let cp: ConnectionPoint =
            serde_json::from_str(r#"{"id": "p", "local_position": [1.0, 0.0, 0.0]}"#).unwrap();

        assert_relative_eq!(cp.local_rotation().angle(), 0.0);
    }
}
