//! Author-time data model for guided assembly procedures.
//!
//! This crate provides the foundational types for describing an assembly
//! procedure before any session runs:
//!
//! - [`PartDefinition`] / [`PartCatalog`] - part identity, attach geometry,
//!   tool and weight metadata
//! - [`Operation`] - post-placement actions (snap, tighten, grease, clean)
//!   with independent completion tracking
//! - [`AssemblyStep`] / [`AssemblySequence`] - the ordered procedure itself
//! - [`Pose`] / [`ConnectionPoint`] - local attach poses
//! - [`loader`] - JSON asset loading
//!
//! # Design Philosophy
//!
//! These types are **pure data**. They carry no engine behavior and no
//! rendering concerns. They're the common language between:
//!
//! - The sequencing engine (assembly-engine)
//! - Authoring and validation tooling
//! - Interaction layers that display guidance text and previews
//!
//! # Layer 0 Crate
//!
//! This crate has zero GUI or engine dependencies. It can be used in:
//!
//! - Headless validation tools
//! - Servers
//! - Web applications (WASM)
//! - Test harnesses
//!
//! # Example
//!
//! ```
//! use assembly_types::{
//!     AssemblySequence, AssemblyStep, ConnectionPoint, Operation, PartCatalog,
//!     PartDefinition,
//! };
//! use nalgebra::Point3;
//!
//! let mut catalog = PartCatalog::new();
//! catalog.insert(
//!     PartDefinition::new("hub", "Wheel Hub")
//!         .with_ghost_visual("hub_ghost")
//!         .with_connection_point(ConnectionPoint::new("axle", Point3::new(0.0, 0.0, 0.1))),
//! ).unwrap();
//!
//! let sequence = AssemblySequence::new("wheel_mount").with_step(
//!     AssemblyStep::new("Mount hub", "hub")
//!         .with_operation(Operation::tighten(25.0, Some("torque_wrench"))),
//! );
//!
//! assert!(sequence.validate(&catalog).is_valid());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

mod catalog;
mod connection;
mod error;
pub mod loader;
mod operation;
mod part;
mod pose;
mod sequence;
mod step;

pub use catalog::PartCatalog;
pub use connection::ConnectionPoint;
pub use error::{DataError, DataResult};
pub use operation::{MIN_SNAP_THRESHOLD, Operation, OperationKind};
pub use part::{PartDefinition, PartId};
pub use pose::Pose;
pub use sequence::{AssemblySequence, SequenceValidation};
pub use step::AssemblyStep;

// Re-export commonly used math types for convenience
pub use nalgebra::{Point3, UnitQuaternion, Vector3};
