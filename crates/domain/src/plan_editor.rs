//! Cascading selection of exercises while editing a plan.
//!
//! The editor is a finite state machine. [`transition`] computes the next
//! state for an event without side effects; [`PlanEditor`] applies the
//! transitions and appends every resolved variant to the plan it owns.
//!
//! ```text
//! Idle ──Begin──> PickingMachine ──SelectMachine──> PickingVariant
//!  ^                 │      ^                          │
//!  │                 │      └──────────Back────────────┤
//!  └──(resolved)─────┴─────────────────────────────────┘
//!                    └──Cancel──> Cancelled <──Cancel──┘
//! ```

use std::fmt;

use log::debug;

use crate::{
    Attachment, AttachmentID, Catalog, ExerciseVariant, Grip, Location, Machine, MachineID, Name,
    Plan, PlannedExercise, PlannedExerciseID, Resolution, resolve_variant,
};

#[derive(Debug, Clone, PartialEq)]
pub enum EditorState {
    Idle,
    PickingMachine(MachineFilter),
    PickingVariant {
        filter: MachineFilter,
        machine_id: MachineID,
        attachment: Option<AttachmentID>,
        grip: Option<Grip>,
    },
    Cancelled,
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct MachineFilter {
    pub location: Option<Location>,
    pub search: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    Begin,
    Filter(MachineFilter),
    SelectMachine(MachineID),
    SelectAttachment(AttachmentID),
    SelectGrip(Grip),
    Confirm,
    Back,
    Cancel,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    pub state: EditorState,
    /// Variant resolved by the transition, to be appended to the plan.
    pub resolved: Option<ExerciseVariant>,
}

impl Transition {
    fn to(state: EditorState) -> Self {
        Self {
            state,
            resolved: None,
        }
    }

    fn resolved(variant: ExerciseVariant) -> Self {
        Self {
            state: EditorState::Idle,
            resolved: Some(variant),
        }
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum EditorError {
    #[error("Incomplete selection: {0} required")]
    IncompleteSelection(Missing),
    #[error("Unknown machine: {0}")]
    UnknownMachine(MachineID),
    #[error("Machine {machine} has no attachment {attachment}")]
    UnknownAttachment {
        machine: MachineID,
        attachment: AttachmentID,
    },
    #[error("Grip not offered: {0}")]
    UnavailableGrip(Grip),
    #[error("{event:?} not possible in state {state:?}")]
    InvalidEvent { state: EditorState, event: Event },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Missing {
    Attachment,
    Grip,
}

impl fmt::Display for Missing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Missing::Attachment => write!(f, "attachment"),
            Missing::Grip => write!(f, "grip"),
        }
    }
}

/// Compute the state following `state` on `event`.
///
/// On error the caller keeps the current state.
pub fn transition(
    state: &EditorState,
    event: Event,
    catalog: &Catalog,
) -> Result<Transition, EditorError> {
    match (state, event) {
        (EditorState::Idle | EditorState::Cancelled, Event::Begin) => Ok(Transition::to(
            EditorState::PickingMachine(MachineFilter::default()),
        )),
        (EditorState::PickingMachine(_), Event::Filter(filter)) => {
            Ok(Transition::to(EditorState::PickingMachine(filter)))
        }
        (EditorState::PickingMachine(filter), Event::SelectMachine(machine_id)) => {
            let machine = lookup_machine(catalog, &machine_id)?;
            Ok(match resolve_variant(machine, None, None) {
                Resolution::Resolved(variant) => Transition::resolved(variant),
                Resolution::NeedsAttachment | Resolution::NeedsGrip => {
                    Transition::to(EditorState::PickingVariant {
                        filter: filter.clone(),
                        machine_id,
                        attachment: None,
                        grip: None,
                    })
                }
            })
        }
        (
            EditorState::PickingVariant {
                filter, machine_id, ..
            },
            Event::SelectAttachment(attachment_id),
        ) => {
            let machine = lookup_machine(catalog, machine_id)?;
            if machine.attachment(&attachment_id).is_none() {
                return Err(EditorError::UnknownAttachment {
                    machine: machine_id.clone(),
                    attachment: attachment_id,
                });
            }
            Ok(
                match resolve_variant(machine, Some(&attachment_id), None) {
                    Resolution::Resolved(variant) => Transition::resolved(variant),
                    Resolution::NeedsAttachment | Resolution::NeedsGrip => {
                        Transition::to(EditorState::PickingVariant {
                            filter: filter.clone(),
                            machine_id: machine_id.clone(),
                            attachment: Some(attachment_id),
                            grip: None,
                        })
                    }
                },
            )
        }
        (
            EditorState::PickingVariant {
                filter,
                machine_id,
                attachment,
                ..
            },
            Event::SelectGrip(grip),
        ) => {
            let machine = lookup_machine(catalog, machine_id)?;
            let Some(selected) = selected_attachment(machine, attachment.as_ref()) else {
                return Err(EditorError::IncompleteSelection(Missing::Attachment));
            };
            if !selected.grips.contains(&grip) {
                return Err(EditorError::UnavailableGrip(grip));
            }
            Ok(
                match resolve_variant(machine, attachment.as_ref(), Some(grip)) {
                    Resolution::Resolved(variant) => Transition::resolved(variant),
                    Resolution::NeedsAttachment | Resolution::NeedsGrip => {
                        Transition::to(EditorState::PickingVariant {
                            filter: filter.clone(),
                            machine_id: machine_id.clone(),
                            attachment: attachment.clone(),
                            grip: Some(grip),
                        })
                    }
                },
            )
        }
        (
            EditorState::PickingVariant {
                machine_id,
                attachment,
                grip,
                ..
            },
            Event::Confirm,
        ) => {
            let machine = lookup_machine(catalog, machine_id)?;
            match resolve_variant(machine, attachment.as_ref(), *grip) {
                Resolution::Resolved(variant) => Ok(Transition::resolved(variant)),
                Resolution::NeedsAttachment => {
                    Err(EditorError::IncompleteSelection(Missing::Attachment))
                }
                Resolution::NeedsGrip => Err(EditorError::IncompleteSelection(Missing::Grip)),
            }
        }
        (EditorState::PickingVariant { filter, .. }, Event::Back) => {
            Ok(Transition::to(EditorState::PickingMachine(filter.clone())))
        }
        (
            EditorState::PickingMachine(_) | EditorState::PickingVariant { .. },
            Event::Cancel,
        ) => Ok(Transition::to(EditorState::Cancelled)),
        (state, event) => Err(EditorError::InvalidEvent {
            state: state.clone(),
            event,
        }),
    }
}

fn lookup_machine<'a>(catalog: &'a Catalog, id: &MachineID) -> Result<&'a Machine, EditorError> {
    catalog
        .machine(id)
        .ok_or_else(|| EditorError::UnknownMachine(id.clone()))
}

fn selected_attachment<'a>(
    machine: &'a Machine,
    attachment: Option<&AttachmentID>,
) -> Option<&'a Attachment> {
    match machine.attachments.as_slice() {
        [only] => Some(only),
        _ => attachment.and_then(|id| machine.attachment(id)),
    }
}

/// Editing session of a single plan.
///
/// The editor owns the plan exclusively until [`PlanEditor::into_plan`] is called.
pub struct PlanEditor<'a> {
    catalog: &'a Catalog,
    plan: Plan,
    state: EditorState,
}

impl<'a> PlanEditor<'a> {
    #[must_use]
    pub fn new(catalog: &'a Catalog, plan: Plan) -> Self {
        Self {
            catalog,
            plan,
            state: EditorState::Idle,
        }
    }

    #[must_use]
    pub fn state(&self) -> &EditorState {
        &self.state
    }

    #[must_use]
    pub fn plan(&self) -> &Plan {
        &self.plan
    }

    /// Apply an event. Returns the planned exercise appended by the event, if any.
    pub fn apply(&mut self, event: Event) -> Result<Option<PlannedExercise>, EditorError> {
        let Transition { state, resolved } = transition(&self.state, event, self.catalog)?;
        debug!("plan editor: {:?} -> {state:?}", self.state);
        self.state = state;
        Ok(resolved.map(|variant| {
            self.plan
                .append(PlannedExerciseID::random(), variant)
                .clone()
        }))
    }

    /// Machines to choose from in the current state.
    #[must_use]
    pub fn machines(&self) -> Vec<&'a Machine> {
        match &self.state {
            EditorState::PickingMachine(filter) => {
                self.catalog.filter(filter.location, &filter.search)
            }
            _ => vec![],
        }
    }

    /// Machine whose variant is currently being disambiguated.
    #[must_use]
    pub fn pending_machine(&self) -> Option<&'a Machine> {
        match &self.state {
            EditorState::PickingVariant { machine_id, .. } => self.catalog.machine(machine_id),
            _ => None,
        }
    }

    /// Grips to choose from once the attachment is known.
    #[must_use]
    pub fn grips(&self) -> &'a [Grip] {
        match &self.state {
            EditorState::PickingVariant { attachment, .. } => self
                .pending_machine()
                .and_then(|m| selected_attachment(m, attachment.as_ref()))
                .map(|a| a.grips.as_slice())
                .unwrap_or(&[]),
            _ => &[],
        }
    }

    pub fn remove(&mut self, position: usize) -> Option<PlannedExercise> {
        self.plan.remove(position)
    }

    pub fn move_up(&mut self, position: usize) -> bool {
        self.plan.move_up(position)
    }

    pub fn move_down(&mut self, position: usize) -> bool {
        self.plan.move_down(position)
    }

    pub fn rename(&mut self, name: Name) {
        self.plan.name = name;
    }

    #[must_use]
    pub fn into_plan(self) -> Plan {
        self.plan
    }
}
