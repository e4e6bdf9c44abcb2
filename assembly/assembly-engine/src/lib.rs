//! Stateful sequencing engine for guided assembly procedures.
//!
//! Given an ordered [`AssemblySequence`](assembly_types::AssemblySequence),
//! the [`AssemblyEngine`] tracks progress, previews the next placement,
//! validates that the part picked by the user matches the expected step,
//! commits the placement, and triggers the step's operations.
//!
//! # Components
//!
//! - [`AssemblyEngine`] - the state machine: load, navigate, pick, place
//! - [`TableRegistry`] / [`TablePart`] - live pickable instances by part id
//! - [`EngineEvent`] - outbound effects for the integration layer to mirror
//! - [`EngineError`] - recoverable error taxonomy with guidance signals
//!
//! # Concurrency Model
//!
//! Single-threaded and event-driven. External subsystems deliver pick and
//! placement events into the engine's public operations; "asynchronous"
//! means temporally decoupled delivery, not multi-threaded execution. The
//! engine never holds a lock and never blocks inside a transition.
//!
//! # Layer 0 Crate
//!
//! Headless, with zero GUI or physics-engine dependencies: rendering,
//! gesture recognition, and physics are collaborators that consume
//! [`EngineEvent`]s and feed events back in.
//!
//! # Example
//!
//! ```
//! use assembly_engine::{AssemblyEngine, EngineState, TablePart, TableRegistry};
//! use assembly_types::{
//!     AssemblySequence, AssemblyStep, Operation, PartCatalog, PartDefinition,
//! };
//!
//! let mut catalog = PartCatalog::new();
//! catalog.insert(
//!     PartDefinition::new("hub", "Wheel Hub").with_ghost_visual("hub_ghost"),
//! ).unwrap();
//!
//! let mut registry = TableRegistry::new();
//! registry.register(TablePart::new(PartDefinition::new("hub", "Wheel Hub")));
//!
//! let mut engine = AssemblyEngine::new(catalog);
//! engine.load_sequence(
//!     AssemblySequence::new("wheel_mount").with_step(
//!         AssemblyStep::new("Mount hub", "hub")
//!             .with_operation(Operation::tighten(25.0, Some("torque_wrench"))),
//!     ),
//! ).unwrap();
//!
//! engine.next_step(&registry).unwrap();
//! engine.pick_part(&mut registry, &"hub".into()).unwrap();
//! engine.commit_placement(&mut registry).unwrap();
//! assert_eq!(engine.state(), EngineState::StepComplete(0));
//!
//! // The interaction layer acknowledges the torque application later.
//! engine.complete_operation(0, 0).unwrap();
//! assert!(engine.operations_completed(0).unwrap());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

mod engine;
mod error;
mod event;
mod registry;
mod table;

pub use engine::{AssemblyEngine, EngineState, GhostPreview, StepSignal};
pub use error::{EngineError, EngineResult};
pub use event::EngineEvent;
pub use registry::TableRegistry;
pub use table::{DetailLevel, TablePart};
