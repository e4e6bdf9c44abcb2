//! The assembly engine: sequence loading, step navigation, pick
//! validation, and placement commit.
//!
//! All transitions run on one control thread. External subsystems (pick
//! detection, sensors, rendering) deliver events into the public
//! operations and drain [`EngineEvent`]s back out; the engine never holds
//! a lock and never blocks inside a transition. A superseding
//! `load_sequence`/`set_step`/`next_step`/`previous_step` implicitly
//! cancels the in-flight step by discarding its preview and pick state.

use std::collections::VecDeque;

use assembly_types::{AssemblySequence, AssemblyStep, PartCatalog, PartDefinition, PartId, Pose};
use nalgebra::{Point3, Vector3};

use crate::error::{EngineError, EngineResult};
use crate::event::EngineEvent;
use crate::registry::TableRegistry;
use crate::table::DetailLevel;

/// Lifecycle state of the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineState {
    /// No step is active (no sequence, or sequence loaded but not started).
    Idle,
    /// A step is active: preview spawned, awaiting a pick.
    StepActive(usize),
    /// The expected part was picked, awaiting placement.
    PartPicked(usize),
    /// Placement committed and operations triggered; eligible to advance.
    StepComplete(usize),
}

/// Outcome of a step navigation call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepSignal {
    /// The step at this index was entered.
    Entered(usize),
    /// Navigation was a no-op: already at the first step.
    AtStart,
    /// Navigation was a no-op: already at the last step (or the sequence
    /// is empty).
    AtEnd,
}

/// The live ghost preview for the current step.
///
/// At most one exists at a time; it is owned by the engine, so engine drop
/// or sequence reload can never leave an orphaned preview behind.
#[derive(Debug, Clone, PartialEq)]
pub struct GhostPreview {
    part: PartId,
    pose: Pose,
}

impl GhostPreview {
    /// The part being previewed.
    #[must_use]
    pub fn part(&self) -> &PartId {
        &self.part
    }

    /// The preview pose.
    #[must_use]
    pub fn pose(&self) -> Pose {
        self.pose
    }
}

/// Orchestrates a guided assembly session.
///
/// Owns the part catalog and the active sequence; borrows the
/// [`TableRegistry`] per call. Outbound effects are recorded as
/// [`EngineEvent`]s and drained by the integration layer.
///
/// # Example
///
/// ```
/// use assembly_engine::{AssemblyEngine, TablePart, TableRegistry};
/// use assembly_types::{AssemblySequence, AssemblyStep, PartCatalog, PartDefinition};
///
/// let mut catalog = PartCatalog::new();
/// catalog.insert(PartDefinition::new("hub", "Hub").with_ghost_visual("hub_ghost")).unwrap();
///
/// let mut registry = TableRegistry::new();
/// registry.register(TablePart::new(PartDefinition::new("hub", "Hub")));
///
/// let mut engine = AssemblyEngine::new(catalog);
/// engine.load_sequence(
///     AssemblySequence::new("demo").with_step(AssemblyStep::new("Fit hub", "hub")),
/// ).unwrap();
///
/// engine.next_step(&registry).unwrap();
/// engine.pick_part(&mut registry, &"hub".into()).unwrap();
/// engine.commit_placement(&mut registry).unwrap();
/// ```
#[derive(Debug)]
pub struct AssemblyEngine {
    /// Part definitions, loaded once per session.
    catalog: PartCatalog,

    /// The active sequence, owned so operation completion flags live here.
    sequence: Option<AssemblySequence>,

    /// Current step index; `None` until the first step is entered.
    current: Option<usize>,

    /// At most one live ghost preview.
    preview: Option<GhostPreview>,

    /// At most one currently picked instance, by part id.
    picked: Option<PartId>,

    /// Lifecycle state.
    state: EngineState,

    /// Outbound effects awaiting drain.
    events: VecDeque<EngineEvent>,
}

impl AssemblyEngine {
    /// Create an engine over a part catalog, with no sequence loaded.
    #[must_use]
    pub fn new(catalog: PartCatalog) -> Self {
        Self {
            catalog,
            sequence: None,
            current: None,
            preview: None,
            picked: None,
            state: EngineState::Idle,
            events: VecDeque::new(),
        }
    }

    /// Get the part catalog.
    #[must_use]
    pub fn catalog(&self) -> &PartCatalog {
        &self.catalog
    }

    /// Get the active sequence.
    #[must_use]
    pub fn sequence(&self) -> Option<&AssemblySequence> {
        self.sequence.as_ref()
    }

    /// Get the current step index; `None` until a step is entered.
    #[must_use]
    pub fn current_step_index(&self) -> Option<usize> {
        self.current
    }

    /// Get the current step.
    #[must_use]
    pub fn current_step(&self) -> Option<&AssemblyStep> {
        let seq = self.sequence.as_ref()?;
        seq.step(self.current?)
    }

    /// Get the lifecycle state.
    #[must_use]
    pub fn state(&self) -> EngineState {
        self.state
    }

    /// Get the live ghost preview, if one exists.
    #[must_use]
    pub fn preview(&self) -> Option<&GhostPreview> {
        self.preview.as_ref()
    }

    /// Get the currently picked part id, if any.
    #[must_use]
    pub fn picked_part(&self) -> Option<&PartId> {
        self.picked.as_ref()
    }

    /// Drain pending outbound events.
    pub fn drain_events(&mut self) -> impl Iterator<Item = EngineEvent> + '_ {
        self.events.drain(..)
    }

    /// Load a sequence and reset progress.
    ///
    /// Any live preview is destroyed and any pick reference discarded (the
    /// picked physical instance itself is untouched). The engine ends up
    /// `Idle` at no step; the caller drives the first `next_step`.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidSequence`] if the sequence fails
    /// catalog validation. The previously active sequence, if any, stays
    /// loaded in that case.
    pub fn load_sequence(&mut self, sequence: AssemblySequence) -> EngineResult<()> {
        let validation = sequence.validate(&self.catalog);
        if !validation.is_valid() {
            tracing::error!(
                name = sequence.name(),
                issues = validation.issue_count(),
                "rejecting sequence: {}",
                validation.summary()
            );
            return Err(EngineError::InvalidSequence {
                reason: validation.summary(),
            });
        }
        if validation.empty {
            tracing::warn!(name = sequence.name(), "loading sequence with no steps");
        }

        self.clear_active_step();
        self.current = None;
        self.state = EngineState::Idle;

        tracing::info!(
            name = sequence.name(),
            steps = sequence.step_count(),
            "loaded sequence"
        );
        self.events.push_back(EngineEvent::SequenceLoaded {
            name: sequence.name().to_string(),
            steps: sequence.step_count(),
        });
        self.sequence = Some(sequence);
        Ok(())
    }

    /// Move to the next step.
    ///
    /// At the last step (or with an empty sequence) this is a no-op and
    /// returns [`StepSignal::AtEnd`].
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::NoSequenceLoaded`] without a sequence, or a
    /// step-entry error (see [`set_step`](Self::set_step)).
    pub fn next_step(&mut self, registry: &TableRegistry) -> EngineResult<StepSignal> {
        let count = self
            .sequence
            .as_ref()
            .ok_or(EngineError::NoSequenceLoaded)?
            .step_count();

        let next = self.current.map_or(0, |i| i + 1);
        if next >= count {
            tracing::debug!("already at end of sequence");
            return Ok(StepSignal::AtEnd);
        }
        self.enter_step(next, registry)
    }

    /// Move to the previous step.
    ///
    /// At the first step (or before any step) this is a no-op and returns
    /// [`StepSignal::AtStart`].
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::NoSequenceLoaded`] without a sequence, or a
    /// step-entry error (see [`set_step`](Self::set_step)).
    pub fn previous_step(&mut self, registry: &TableRegistry) -> EngineResult<StepSignal> {
        if self.sequence.is_none() {
            return Err(EngineError::NoSequenceLoaded);
        }

        match self.current {
            None | Some(0) => {
                tracing::debug!("already at start of sequence");
                Ok(StepSignal::AtStart)
            }
            Some(i) => self.enter_step(i - 1, registry),
        }
    }

    /// Jump directly to a step index.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::NoSequenceLoaded`] without a sequence,
    /// [`EngineError::IndexOutOfRange`] outside `[0, step_count)`, and
    /// [`EngineError::PartNotFound`] if the step validates part presence
    /// and its part is absent from the table. The engine stays in its
    /// prior state on every error.
    pub fn set_step(&mut self, index: usize, registry: &TableRegistry) -> EngineResult<StepSignal> {
        let count = self
            .sequence
            .as_ref()
            .ok_or(EngineError::NoSequenceLoaded)?
            .step_count();

        if index >= count {
            return Err(EngineError::IndexOutOfRange { index, len: count });
        }
        self.enter_step(index, registry)
    }

    /// Handle a pick event from the table.
    ///
    /// On a match: the instance switches to high detail, is recorded as
    /// picked, and the engine awaits [`commit_placement`](Self::commit_placement).
    ///
    /// # Errors
    ///
    /// - [`EngineError::NoSequenceLoaded`] / [`EngineError::NoActiveStep`]
    ///   if no step is awaiting a pick
    /// - [`EngineError::PartNotFound`] if the id is not on the table
    /// - [`EngineError::WrongPartForStep`] if the instance's definition is
    ///   not the step's part (a guidance signal); state is unchanged and a
    ///   corrected pick event retries
    pub fn pick_part(&mut self, registry: &mut TableRegistry, id: &PartId) -> EngineResult<()> {
        let seq = self.sequence.as_ref().ok_or(EngineError::NoSequenceLoaded)?;
        let index = self.current.ok_or(EngineError::NoActiveStep)?;
        let expected = seq
            .step(index)
            .ok_or(EngineError::IndexOutOfRange {
                index,
                len: seq.step_count(),
            })?
            .part()
            .clone();

        let instance = registry
            .lookup(id)
            .ok_or_else(|| EngineError::PartNotFound { id: id.clone() })?;

        if instance.definition().id() != &expected {
            tracing::warn!(picked = %id, expected = %expected, "wrong part for step");
            return Err(EngineError::WrongPartForStep {
                picked: id.clone(),
                expected,
            });
        }

        registry.switch_detail(id, DetailLevel::High);
        self.events.push_back(EngineEvent::DetailChanged {
            part: id.clone(),
            detail: DetailLevel::High,
        });

        self.picked = Some(id.clone());
        self.state = EngineState::PartPicked(index);
        self.events.push_back(EngineEvent::PartPicked {
            part: id.clone(),
            step: index,
        });
        tracing::info!(part = %id, step = index, "part picked");
        Ok(())
    }

    /// Commit the placement of the picked instance.
    ///
    /// Snaps the instance to the step part's primary connection-point pose
    /// as defined in the catalog (identity pose if the part has none),
    /// marks it placed (the freeze signal), destroys the preview, and
    /// triggers every step operation in order, fire and forget; completion
    /// acknowledgments arrive later via
    /// [`complete_operation`](Self::complete_operation).
    ///
    /// The catalog is the source of truth for placement geometry: the
    /// registered instance's own definition clone is never consulted, so a
    /// divergent clone cannot shift the placement pose.
    ///
    /// # Errors
    ///
    /// - [`EngineError::NothingPicked`] without a prior successful pick
    /// - [`EngineError::PartNotFound`] if the picked instance left the
    ///   table in the meantime
    /// - [`EngineError::AlreadyPlaced`] if the instance is already placed
    pub fn commit_placement(&mut self, registry: &mut TableRegistry) -> EngineResult<()> {
        let picked = self.picked.clone().ok_or(EngineError::NothingPicked)?;
        let index = self.current.ok_or(EngineError::NothingPicked)?;

        let instance = registry
            .lookup_mut(&picked)
            .ok_or_else(|| EngineError::PartNotFound { id: picked.clone() })?;

        if instance.is_placed() {
            return Err(EngineError::AlreadyPlaced { id: picked });
        }

        let pose = self
            .catalog
            .get(&picked)
            .and_then(PartDefinition::primary_connection_point)
            .map_or_else(Pose::identity, |cp| cp.pose());

        instance.set_pose(pose);
        instance.mark_placed();
        self.events.push_back(EngineEvent::PartPlaced {
            part: picked.clone(),
            pose,
        });

        if let Some(preview) = self.preview.take() {
            self.events.push_back(EngineEvent::PreviewDestroyed {
                part: preview.part,
            });
        }

        if let Some(seq) = &self.sequence
            && let Some(step) = seq.step(index)
        {
            for (i, op) in step.operations().iter().enumerate() {
                op.execute();
                self.events.push_back(EngineEvent::OperationTriggered {
                    step: index,
                    operation: i,
                    kind: op.kind().as_str(),
                });
            }
        }

        self.picked = None;
        self.state = EngineState::StepComplete(index);
        tracing::info!(part = %picked, step = index, "part placed and operations triggered");
        Ok(())
    }

    /// Record an operation's external completion acknowledgment.
    ///
    /// Acknowledgments for steps the sequence has already moved past are
    /// accepted (the flag flips) but have no further effect on engine
    /// state.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::NoSequenceLoaded`] without a sequence and
    /// [`EngineError::IndexOutOfRange`] for a step or operation index
    /// outside the sequence.
    pub fn complete_operation(&mut self, step: usize, operation: usize) -> EngineResult<()> {
        let seq = self.sequence.as_mut().ok_or(EngineError::NoSequenceLoaded)?;
        let len = seq.step_count();
        let step_data = seq
            .step_mut(step)
            .ok_or(EngineError::IndexOutOfRange { index: step, len })?;

        let ops = step_data.operations_mut();
        let ops_len = ops.len();
        let op = ops
            .get_mut(operation)
            .ok_or(EngineError::IndexOutOfRange {
                index: operation,
                len: ops_len,
            })?;

        op.mark_completed();
        self.events
            .push_back(EngineEvent::OperationCompleted { step, operation });
        Ok(())
    }

    /// Whether every operation of a step has been acknowledged complete.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::NoSequenceLoaded`] without a sequence and
    /// [`EngineError::IndexOutOfRange`] for a bad step index.
    pub fn operations_completed(&self, step: usize) -> EngineResult<bool> {
        let seq = self.sequence.as_ref().ok_or(EngineError::NoSequenceLoaded)?;
        let step_data = seq.step(step).ok_or(EngineError::IndexOutOfRange {
            index: step,
            len: seq.step_count(),
        })?;

        Ok(step_data.operations().iter().all(|op| op.is_completed()))
    }

    /// Enter a step whose index the caller has already bounds-checked.
    fn enter_step(&mut self, index: usize, registry: &TableRegistry) -> EngineResult<StepSignal> {
        let (part, ghost_offset, validate_presence) = {
            let seq = self.sequence.as_ref().ok_or(EngineError::NoSequenceLoaded)?;
            let step = seq.step(index).ok_or(EngineError::IndexOutOfRange {
                index,
                len: seq.step_count(),
            })?;
            (
                step.part().clone(),
                step.ghost_offset(),
                step.validate_part_presence(),
            )
        };

        // Presence validation happens before any state is touched so the
        // engine stays in its prior valid state on rejection.
        if validate_presence && !registry.contains(&part) {
            tracing::warn!(part = %part, step = index, "step part absent from table");
            return Err(EngineError::PartNotFound { id: part });
        }

        self.clear_active_step();
        self.current = Some(index);
        self.events.push_back(EngineEvent::StepEntered {
            index,
            part: part.clone(),
        });
        tracing::info!(step = index, part = %part, "entering step");

        self.spawn_preview(&part, ghost_offset);
        self.state = EngineState::StepActive(index);
        Ok(StepSignal::Entered(index))
    }

    /// Spawn the ghost preview for a step's part.
    ///
    /// Position is the primary connection point plus the step's ghost
    /// offset, or the offset alone when the part has no attach geometry.
    /// A part with no ghost visual gets no preview; the step stays
    /// navigable.
    fn spawn_preview(&mut self, part: &PartId, ghost_offset: Vector3<f64>) {
        let Some(definition) = self.catalog.get(part) else {
            tracing::warn!(part = %part, "part missing from catalog; no preview");
            return;
        };
        if definition.ghost_visual().is_none() {
            tracing::warn!(part = %part, "part has no ghost visual; no preview");
            return;
        }

        let pose = match definition.primary_connection_point() {
            Some(cp) => Pose::from_position_rotation(
                cp.local_position() + ghost_offset,
                cp.local_rotation(),
            ),
            None => Pose::from_position(Point3::from(ghost_offset)),
        };

        self.preview = Some(GhostPreview {
            part: part.clone(),
            pose,
        });
        self.events.push_back(EngineEvent::PreviewSpawned {
            part: part.clone(),
            pose,
        });
    }

    /// Tear down preview and pick state for the current step.
    ///
    /// The picked physical instance is not destroyed; only the engine's
    /// reference to it is discarded.
    fn clear_active_step(&mut self) {
        if let Some(preview) = self.preview.take() {
            self.events.push_back(EngineEvent::PreviewDestroyed {
                part: preview.part,
            });
        }
        self.picked = None;
    }
}
