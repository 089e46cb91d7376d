use liftbook_domain as domain;
use serde::Deserialize;

use crate::dto;

/// Parse and validate a machine catalog of the form `{ "machines": [...] }`.
pub fn parse_catalog(json: &str) -> Result<domain::Catalog, CatalogParseError> {
    let catalog: Catalog = serde_json::from_str(json)?;
    Ok(domain::Catalog::new(
        catalog.machines.into_iter().map(domain::Machine::from).collect(),
    )?)
}

#[derive(thiserror::Error, Debug)]
pub enum CatalogParseError {
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Invalid(#[from] domain::CatalogError),
}

#[derive(Deserialize, Debug)]
struct Catalog {
    machines: Vec<Machine>,
}

#[derive(Deserialize, Debug)]
struct Machine {
    id: String,
    name: String,
    location: Location,
    muscles: Vec<MuscleGroup>,
    weight_type: WeightType,
    #[serde(default)]
    attachments: Vec<Attachment>,
    default_rest_period: Option<u32>,
    weight_increment: f32,
    min_weight: Option<f32>,
    max_weight: Option<f32>,
}

impl From<Machine> for domain::Machine {
    fn from(value: Machine) -> Self {
        Self {
            id: value.id.into(),
            name: value.name,
            location: value.location.into(),
            muscles: value.muscles.into_iter().map(From::from).collect(),
            weight_type: value.weight_type.into(),
            attachments: value
                .attachments
                .into_iter()
                .map(domain::Attachment::from)
                .collect(),
            default_rest_period: value.default_rest_period,
            weight_increment: value.weight_increment,
            min_weight: value.min_weight,
            max_weight: value.max_weight,
        }
    }
}

#[derive(Deserialize, Debug)]
struct Attachment {
    id: String,
    name: String,
    grips: Vec<dto::Grip>,
}

impl From<Attachment> for domain::Attachment {
    fn from(value: Attachment) -> Self {
        Self {
            id: value.id.into(),
            name: value.name,
            grips: value.grips.into_iter().map(domain::Grip::from).collect(),
        }
    }
}

#[derive(Deserialize, Debug, Clone, Copy)]
#[serde(rename_all = "snake_case")]
enum Location {
    FreeWeights,
    CableArea,
    MachineArea,
    CardioArea,
    FunctionalArea,
}

impl From<Location> for domain::Location {
    fn from(value: Location) -> Self {
        match value {
            Location::FreeWeights => domain::Location::FreeWeights,
            Location::CableArea => domain::Location::CableArea,
            Location::MachineArea => domain::Location::MachineArea,
            Location::CardioArea => domain::Location::CardioArea,
            Location::FunctionalArea => domain::Location::FunctionalArea,
        }
    }
}

#[derive(Deserialize, Debug, Clone, Copy)]
#[serde(rename_all = "snake_case")]
enum MuscleGroup {
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

impl From<MuscleGroup> for domain::MuscleGroup {
    fn from(value: MuscleGroup) -> Self {
        match value {
            MuscleGroup::Chest => domain::MuscleGroup::Chest,
            MuscleGroup::Back => domain::MuscleGroup::Back,
            MuscleGroup::Shoulders => domain::MuscleGroup::Shoulders,
            MuscleGroup::Biceps => domain::MuscleGroup::Biceps,
            MuscleGroup::Triceps => domain::MuscleGroup::Triceps,
            MuscleGroup::Forearms => domain::MuscleGroup::Forearms,
            MuscleGroup::Core => domain::MuscleGroup::Core,
            MuscleGroup::Quads => domain::MuscleGroup::Quads,
            MuscleGroup::Hamstrings => domain::MuscleGroup::Hamstrings,
            MuscleGroup::Glutes => domain::MuscleGroup::Glutes,
            MuscleGroup::Calves => domain::MuscleGroup::Calves,
        }
    }
}

#[derive(Deserialize, Debug, Clone, Copy)]
#[serde(rename_all = "snake_case")]
enum WeightType {
    Stack,
    Plates,
    Bodyweight,
    Cable,
}

impl From<WeightType> for domain::WeightType {
    fn from(value: WeightType) -> Self {
        match value {
            WeightType::Stack => domain::WeightType::Stack,
            WeightType::Plates => domain::WeightType::Plates,
            WeightType::Bodyweight => domain::WeightType::Bodyweight,
            WeightType::Cable => domain::WeightType::Cable,
        }
    }
}
