use std::{collections::HashSet, fmt, slice::Iter};

use derive_more::{AsRef, Deref, Display};

pub trait Property: Sized + Copy + 'static {
    fn iter() -> Iter<'static, Self>;
    fn name(self) -> &'static str;
}

/// Reference data of all machines in the gym.
///
/// The catalog is read-only at runtime. A catalog constructed with
/// [`Catalog::new`] is guaranteed to satisfy the invariants checked by
/// [`Catalog::validate`].
#[derive(Debug, Clone, PartialEq)]
pub struct Catalog {
    machines: Vec<Machine>,
}

impl Catalog {
    pub fn new(machines: Vec<Machine>) -> Result<Self, CatalogError> {
        let catalog = Self { machines };
        catalog.validate()?;
        Ok(catalog)
    }

    pub fn validate(&self) -> Result<(), CatalogError> {
        let mut machine_ids = HashSet::new();

        for machine in &self.machines {
            if !machine_ids.insert(&machine.id) {
                return Err(CatalogError::DuplicateMachine(machine.id.clone()));
            }
            machine.validate()?;
        }

        Ok(())
    }

    #[must_use]
    pub fn machines(&self) -> &[Machine] {
        &self.machines
    }

    #[must_use]
    pub fn machine(&self, id: &MachineID) -> Option<&Machine> {
        self.machines.iter().find(|m| m.id == *id)
    }

    /// Machines located in the given room area whose name contains the search term.
    ///
    /// The search is case-insensitive and ignores surrounding whitespace. An
    /// empty search term matches every machine.
    #[must_use]
    pub fn filter(&self, location: Option<Location>, search: &str) -> Vec<&Machine> {
        let search = search.trim().to_lowercase();
        self.machines
            .iter()
            .filter(|m| location.is_none_or(|l| m.location == l))
            .filter(|m| search.is_empty() || m.name.to_lowercase().contains(&search))
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Machine {
    pub id: MachineID,
    pub name: String,
    pub location: Location,
    pub muscles: Vec<MuscleGroup>,
    pub weight_type: WeightType,
    pub attachments: Vec<Attachment>,
    pub default_rest_period: Option<u32>,
    pub weight_increment: f32,
    pub min_weight: Option<f32>,
    pub max_weight: Option<f32>,
}

impl Machine {
    fn validate(&self) -> Result<(), CatalogError> {
        if self.muscles.is_empty() {
            return Err(CatalogError::NoMuscles(self.id.clone()));
        }

        if self.default_rest_period == Some(0) {
            return Err(CatalogError::InvalidRestPeriod(self.id.clone()));
        }

        if self.weight_increment.is_nan() || self.weight_increment <= 0.0 {
            return Err(CatalogError::InvalidWeightIncrement(self.id.clone()));
        }

        if let (Some(min), Some(max)) = (self.min_weight, self.max_weight) {
            if min > max {
                return Err(CatalogError::InvalidWeightRange(self.id.clone()));
            }
        }

        let mut attachment_ids = HashSet::new();

        for attachment in &self.attachments {
            if !attachment_ids.insert(&attachment.id) {
                return Err(CatalogError::DuplicateAttachment {
                    machine: self.id.clone(),
                    attachment: attachment.id.clone(),
                });
            }
            if attachment.grips.is_empty() {
                return Err(CatalogError::NoGrips {
                    machine: self.id.clone(),
                    attachment: attachment.id.clone(),
                });
            }
        }

        Ok(())
    }

    #[must_use]
    pub fn attachment(&self, id: &AttachmentID) -> Option<&Attachment> {
        self.attachments.iter().find(|a| a.id == *id)
    }
}

#[derive(AsRef, Deref, Display, Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MachineID(String);

impl From<&str> for MachineID {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for MachineID {
    fn from(value: String) -> Self {
        Self(value)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Attachment {
    pub id: AttachmentID,
    pub name: String,
    pub grips: Vec<Grip>,
}

#[derive(AsRef, Deref, Display, Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AttachmentID(String);

impl From<&str> for AttachmentID {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for AttachmentID {
    fn from(value: String) -> Self {
        Self(value)
    }
}

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Location {
    FreeWeights,
    CableArea,
    MachineArea,
    CardioArea,
    FunctionalArea,
}

impl Property for Location {
    fn iter() -> Iter<'static, Location> {
        static LOCATIONS: [Location; 5] = [
            Location::FreeWeights,
            Location::CableArea,
            Location::MachineArea,
            Location::CardioArea,
            Location::FunctionalArea,
        ];
        LOCATIONS.iter()
    }

    fn name(self) -> &'static str {
        match self {
            Location::FreeWeights => "Free Weights",
            Location::CableArea => "Cable Area",
            Location::MachineArea => "Machine Area",
            Location::CardioArea => "Cardio Area",
            Location::FunctionalArea => "Functional Area",
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, PartialOrd, Ord)]
pub enum MuscleGroup {
    Chest,
    Back,
    Shoulders,
    Biceps,
    Triceps,
    Forearms,
    Core,
    Quads,
    Hamstrings,
    Glutes,
    Calves,
}

impl Property for MuscleGroup {
    fn iter() -> Iter<'static, MuscleGroup> {
        static MUSCLES: [MuscleGroup; 11] = [
            MuscleGroup::Chest,
            MuscleGroup::Back,
            MuscleGroup::Shoulders,
            MuscleGroup::Biceps,
            MuscleGroup::Triceps,
            MuscleGroup::Forearms,
            MuscleGroup::Core,
            MuscleGroup::Quads,
            MuscleGroup::Hamstrings,
            MuscleGroup::Glutes,
            MuscleGroup::Calves,
        ];
        MUSCLES.iter()
    }

    fn name(self) -> &'static str {
        match self {
            MuscleGroup::Chest => "Chest",
            MuscleGroup::Back => "Back",
            MuscleGroup::Shoulders => "Shoulders",
            MuscleGroup::Biceps => "Biceps",
            MuscleGroup::Triceps => "Triceps",
            MuscleGroup::Forearms => "Forearms",
            MuscleGroup::Core => "Core",
            MuscleGroup::Quads => "Quads",
            MuscleGroup::Hamstrings => "Hamstrings",
            MuscleGroup::Glutes => "Glutes",
            MuscleGroup::Calves => "Calves",
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum WeightType {
    Stack,
    Plates,
    Bodyweight,
    Cable,
}

impl Property for WeightType {
    fn iter() -> Iter<'static, WeightType> {
        static WEIGHT_TYPES: [WeightType; 4] = [
            WeightType::Stack,
            WeightType::Plates,
            WeightType::Bodyweight,
            WeightType::Cable,
        ];
        WEIGHT_TYPES.iter()
    }

    fn name(self) -> &'static str {
        match self {
            WeightType::Stack => "Stack",
            WeightType::Plates => "Plates",
            WeightType::Bodyweight => "Bodyweight",
            WeightType::Cable => "Cable",
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Grip {
    Pronated,
    Supinated,
    Neutral,
    Mixed,
}

impl Property for Grip {
    fn iter() -> Iter<'static, Grip> {
        static GRIPS: [Grip; 4] = [Grip::Pronated, Grip::Supinated, Grip::Neutral, Grip::Mixed];
        GRIPS.iter()
    }

    fn name(self) -> &'static str {
        match self {
            Grip::Pronated => "Pronated",
            Grip::Supinated => "Supinated",
            Grip::Neutral => "Neutral",
            Grip::Mixed => "Mixed",
        }
    }
}

impl fmt::Display for Grip {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum CatalogError {
    #[error("Duplicate machine ID: {0}")]
    DuplicateMachine(MachineID),
    #[error("Duplicate attachment ID {attachment} on machine {machine}")]
    DuplicateAttachment {
        machine: MachineID,
        attachment: AttachmentID,
    },
    #[error("Machine {0} must target at least one muscle group")]
    NoMuscles(MachineID),
    #[error("Attachment {attachment} on machine {machine} must offer at least one grip")]
    NoGrips {
        machine: MachineID,
        attachment: AttachmentID,
    },
    #[error("Default rest period of machine {0} must be greater than zero")]
    InvalidRestPeriod(MachineID),
    #[error("Weight increment of machine {0} must be greater than zero")]
    InvalidWeightIncrement(MachineID),
    #[error("Minimum weight of machine {0} exceeds its maximum weight")]
    InvalidWeightRange(MachineID),
}

pub static CATALOG: std::sync::LazyLock<Catalog> = std::sync::LazyLock::new(|| Catalog {
    machines: vec![
        Machine {
            id: "bench-press".into(),
            name: "Bench Press".to_string(),
            location: Location::FreeWeights,
            muscles: vec![
                MuscleGroup::Chest,
                MuscleGroup::Triceps,
                MuscleGroup::Shoulders,
            ],
            weight_type: WeightType::Plates,
            attachments: vec![],
            default_rest_period: Some(180),
            weight_increment: 2.5,
            min_weight: Some(20.0),
            max_weight: None,
        },
        Machine {
            id: "chest-press".into(),
            name: "Chest Press".to_string(),
            location: Location::MachineArea,
            muscles: vec![
                MuscleGroup::Chest,
                MuscleGroup::Shoulders,
                MuscleGroup::Triceps,
            ],
            weight_type: WeightType::Stack,
            attachments: vec![],
            default_rest_period: Some(90),
            weight_increment: 5.0,
            min_weight: Some(5.0),
            max_weight: Some(150.0),
        },
        Machine {
            id: "leg-press".into(),
            name: "Leg Press".to_string(),
            location: Location::MachineArea,
            muscles: vec![
                MuscleGroup::Quads,
                MuscleGroup::Glutes,
                MuscleGroup::Hamstrings,
            ],
            weight_type: WeightType::Plates,
            attachments: vec![],
            default_rest_period: Some(120),
            weight_increment: 10.0,
            min_weight: Some(0.0),
            max_weight: None,
        },
        Machine {
            id: "leg-curl".into(),
            name: "Leg Curl".to_string(),
            location: Location::MachineArea,
            muscles: vec![MuscleGroup::Hamstrings],
            weight_type: WeightType::Stack,
            attachments: vec![],
            default_rest_period: Some(90),
            weight_increment: 5.0,
            min_weight: Some(5.0),
            max_weight: Some(100.0),
        },
        Machine {
            id: "calf-raise".into(),
            name: "Standing Calf Raise".to_string(),
            location: Location::MachineArea,
            muscles: vec![MuscleGroup::Calves],
            weight_type: WeightType::Stack,
            attachments: vec![],
            default_rest_period: Some(60),
            weight_increment: 5.0,
            min_weight: Some(10.0),
            max_weight: Some(200.0),
        },
        Machine {
            id: "tricep-pushdown".into(),
            name: "Tricep Pushdown".to_string(),
            location: Location::CableArea,
            muscles: vec![MuscleGroup::Triceps],
            weight_type: WeightType::Cable,
            attachments: vec![
                Attachment {
                    id: "rope".into(),
                    name: "Rope".to_string(),
                    grips: vec![Grip::Neutral],
                },
                Attachment {
                    id: "straight-bar".into(),
                    name: "Straight Bar".to_string(),
                    grips: vec![Grip::Pronated, Grip::Supinated],
                },
                Attachment {
                    id: "v-bar".into(),
                    name: "V-Bar".to_string(),
                    grips: vec![Grip::Neutral],
                },
            ],
            default_rest_period: Some(60),
            weight_increment: 2.5,
            min_weight: Some(2.5),
            max_weight: Some(100.0),
        },
        Machine {
            id: "lat-pulldown".into(),
            name: "Lat Pulldown".to_string(),
            location: Location::CableArea,
            muscles: vec![MuscleGroup::Back, MuscleGroup::Biceps],
            weight_type: WeightType::Cable,
            attachments: vec![
                Attachment {
                    id: "wide-bar".into(),
                    name: "Wide Bar".to_string(),
                    grips: vec![Grip::Pronated, Grip::Supinated],
                },
                Attachment {
                    id: "close-grip-handle".into(),
                    name: "Close Grip Handle".to_string(),
                    grips: vec![Grip::Neutral],
                },
            ],
            default_rest_period: Some(90),
            weight_increment: 5.0,
            min_weight: Some(5.0),
            max_weight: Some(120.0),
        },
        Machine {
            id: "seated-row".into(),
            name: "Seated Cable Row".to_string(),
            location: Location::CableArea,
            muscles: vec![MuscleGroup::Back, MuscleGroup::Biceps],
            weight_type: WeightType::Cable,
            attachments: vec![Attachment {
                id: "v-handle".into(),
                name: "V-Handle".to_string(),
                grips: vec![Grip::Neutral],
            }],
            default_rest_period: Some(90),
            weight_increment: 5.0,
            min_weight: Some(5.0),
            max_weight: Some(120.0),
        },
        Machine {
            id: "cable-curl".into(),
            name: "Cable Curl".to_string(),
            location: Location::CableArea,
            muscles: vec![MuscleGroup::Biceps, MuscleGroup::Forearms],
            weight_type: WeightType::Cable,
            attachments: vec![Attachment {
                id: "ez-bar".into(),
                name: "EZ Bar".to_string(),
                grips: vec![Grip::Supinated, Grip::Pronated],
            }],
            default_rest_period: Some(60),
            weight_increment: 2.5,
            min_weight: Some(2.5),
            max_weight: Some(80.0),
        },
        Machine {
            id: "pull-up-station".into(),
            name: "Pull-Up Station".to_string(),
            location: Location::FunctionalArea,
            muscles: vec![MuscleGroup::Back, MuscleGroup::Biceps, MuscleGroup::Core],
            weight_type: WeightType::Bodyweight,
            attachments: vec![
                Attachment {
                    id: "straight-bar".into(),
                    name: "Straight Bar".to_string(),
                    grips: vec![Grip::Pronated, Grip::Supinated, Grip::Mixed],
                },
                Attachment {
                    id: "parallel-handles".into(),
                    name: "Parallel Handles".to_string(),
                    grips: vec![Grip::Neutral],
                },
            ],
            default_rest_period: None,
            weight_increment: 2.5,
            min_weight: None,
            max_weight: None,
        },
    ],
});
