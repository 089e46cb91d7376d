use chrono::{DateTime, NaiveDate, Utc};
use liftbook_domain as domain;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Workout {
    pub id: Uuid,
    pub date: NaiveDate,
    pub start_time: DateTime<Utc>,
    pub end_time: Option<DateTime<Utc>>,
    pub exercises: Vec<Exercise>,
}

impl From<&domain::Workout> for Workout {
    fn from(value: &domain::Workout) -> Self {
        Self {
            id: *value.id,
            date: value.date,
            start_time: value.start_time,
            end_time: value.end_time,
            exercises: value.exercises.iter().map(Exercise::from).collect(),
        }
    }
}

impl TryFrom<Workout> for domain::Workout {
    type Error = DtoError;

    fn try_from(value: Workout) -> Result<Self, Self::Error> {
        Ok(Self {
            id: value.id.into(),
            date: value.date,
            start_time: value.start_time,
            end_time: value.end_time,
            exercises: value
                .exercises
                .into_iter()
                .map(domain::Exercise::try_from)
                .collect::<Result<Vec<_>, _>>()?,
        })
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Exercise {
    pub id: Uuid,
    pub machine_id: String,
    pub machine_name: String,
    pub sets: Vec<SetRecord>,
}

impl From<&domain::Exercise> for Exercise {
    fn from(value: &domain::Exercise) -> Self {
        Self {
            id: *value.id,
            machine_id: value.machine_id.to_string(),
            machine_name: value.machine_name.clone(),
            sets: value.sets.iter().map(SetRecord::from).collect(),
        }
    }
}

impl TryFrom<Exercise> for domain::Exercise {
    type Error = DtoError;

    fn try_from(value: Exercise) -> Result<Self, Self::Error> {
        Ok(Self {
            id: value.id.into(),
            machine_id: value.machine_id.into(),
            machine_name: value.machine_name,
            sets: value
                .sets
                .into_iter()
                .map(domain::SetRecord::try_from)
                .collect::<Result<Vec<_>, _>>()?,
        })
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SetRecord {
    pub id: Uuid,
    pub weight: f32,
    pub reps: u32,
    pub weight_unit: WeightUnit,
    pub rest_period: u32,
    pub is_completed: bool,
}

impl From<&domain::SetRecord> for SetRecord {
    fn from(value: &domain::SetRecord) -> Self {
        Self {
            id: *value.id,
            weight: value.weight.into(),
            reps: value.reps.into(),
            weight_unit: value.weight_unit.into(),
            rest_period: value.rest_period,
            is_completed: value.is_completed,
        }
    }
}

impl TryFrom<SetRecord> for domain::SetRecord {
    type Error = DtoError;

    fn try_from(value: SetRecord) -> Result<Self, Self::Error> {
        Ok(Self {
            id: value.id.into(),
            weight: domain::Weight::new(value.weight)?,
            reps: domain::Reps::new(value.reps)?,
            weight_unit: value.weight_unit.into(),
            rest_period: value.rest_period,
            is_completed: value.is_completed,
        })
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum WeightUnit {
    Kg,
    Lbs,
}

impl From<domain::WeightUnit> for WeightUnit {
    fn from(value: domain::WeightUnit) -> Self {
        match value {
            domain::WeightUnit::Kg => WeightUnit::Kg,
            domain::WeightUnit::Lbs => WeightUnit::Lbs,
        }
    }
}

impl From<WeightUnit> for domain::WeightUnit {
    fn from(value: WeightUnit) -> Self {
        match value {
            WeightUnit::Kg => domain::WeightUnit::Kg,
            WeightUnit::Lbs => domain::WeightUnit::Lbs,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Plan {
    pub id: Uuid,
    pub name: String,
    pub exercises: Vec<PlannedExercise>,
}

impl From<&domain::Plan> for Plan {
    fn from(value: &domain::Plan) -> Self {
        Self {
            id: *value.id,
            name: value.name.to_string(),
            exercises: value.exercises.iter().map(PlannedExercise::from).collect(),
        }
    }
}

impl TryFrom<Plan> for domain::Plan {
    type Error = DtoError;

    fn try_from(value: Plan) -> Result<Self, Self::Error> {
        Ok(Self {
            id: value.id.into(),
            name: domain::Name::new(&value.name)?,
            exercises: value
                .exercises
                .into_iter()
                .map(domain::PlannedExercise::from)
                .collect(),
        })
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct PlannedExercise {
    pub id: Uuid,
    pub machine_id: String,
    pub machine_name: String,
    pub attachment: Option<Attachment>,
    pub grip: Option<Grip>,
}

impl From<&domain::PlannedExercise> for PlannedExercise {
    fn from(value: &domain::PlannedExercise) -> Self {
        Self {
            id: *value.id,
            machine_id: value.variant.machine_id.to_string(),
            machine_name: value.variant.machine_name.clone(),
            attachment: value.variant.attachment.as_ref().map(|a| Attachment {
                id: a.id.to_string(),
                name: a.name.clone(),
            }),
            grip: value.variant.grip.map(Grip::from),
        }
    }
}

impl From<PlannedExercise> for domain::PlannedExercise {
    fn from(value: PlannedExercise) -> Self {
        Self {
            id: value.id.into(),
            variant: domain::ExerciseVariant {
                machine_id: value.machine_id.into(),
                machine_name: value.machine_name,
                attachment: value.attachment.map(|a| domain::VariantAttachment {
                    id: a.id.into(),
                    name: a.name,
                }),
                grip: value.grip.map(domain::Grip::from),
            },
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    pub id: String,
    pub name: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Grip {
    Pronated,
    Supinated,
    Neutral,
    Mixed,
}

impl From<domain::Grip> for Grip {
    fn from(value: domain::Grip) -> Self {
        match value {
            domain::Grip::Pronated => Grip::Pronated,
            domain::Grip::Supinated => Grip::Supinated,
            domain::Grip::Neutral => Grip::Neutral,
            domain::Grip::Mixed => Grip::Mixed,
        }
    }
}

impl From<Grip> for domain::Grip {
    fn from(value: Grip) -> Self {
        match value {
            Grip::Pronated => domain::Grip::Pronated,
            Grip::Supinated => domain::Grip::Supinated,
            Grip::Neutral => domain::Grip::Neutral,
            Grip::Mixed => domain::Grip::Mixed,
        }
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum DtoError {
    #[error(transparent)]
    InvalidName(#[from] domain::NameError),
    #[error(transparent)]
    InvalidWeight(#[from] domain::WeightError),
    #[error(transparent)]
    InvalidReps(#[from] domain::RepsError),
}
