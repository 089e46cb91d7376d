use chrono::{DateTime, NaiveDate, Utc};

use crate::{
    DeleteError, E1RMFormula, MachineID, ProgressEntry, ReadError, Reps, UpdateError, Weight,
    WeightUnit,
};

#[allow(async_fn_in_trait)]
pub trait WorkoutRepository {
    async fn read_workouts(&self) -> Result<Vec<Workout>, ReadError>;
    async fn save_workout(&self, workout: Workout) -> Result<Workout, UpdateError>;
    async fn delete_workout(&self, id: WorkoutID) -> Result<WorkoutID, DeleteError>;
}

#[allow(async_fn_in_trait)]
pub trait WorkoutService {
    /// All stored workouts, oldest first.
    async fn get_workouts(&self) -> Result<Vec<Workout>, ReadError>;
    async fn get_workout(&self, id: WorkoutID) -> Result<Option<Workout>, ReadError> {
        Ok(self
            .get_workouts()
            .await?
            .into_iter()
            .find(|w| w.id == id))
    }
    async fn save_workout(&self, workout: Workout) -> Result<Workout, UpdateError>;
    async fn delete_workout(&self, id: WorkoutID) -> Result<WorkoutID, DeleteError>;
    async fn get_exercise_progress(
        &self,
        machine_id: &MachineID,
        formula: E1RMFormula,
    ) -> Result<Vec<ProgressEntry>, ReadError>;
    /// Sets logged on the machine in the latest workout preceding the given one.
    ///
    /// If that workout contains several exercises on the machine, their sets
    /// are concatenated in workout order. All workouts are considered if the
    /// given workout is not stored yet.
    async fn get_previous_sets(
        &self,
        machine_id: &MachineID,
        before: WorkoutID,
    ) -> Result<Vec<SetRecord>, ReadError> {
        let workouts = self.get_workouts().await?;
        let earlier = workouts
            .iter()
            .position(|w| w.id == before)
            .map_or(workouts.as_slice(), |position| &workouts[..position]);
        Ok(earlier
            .iter()
            .rev()
            .find(|w| w.exercises.iter().any(|e| e.machine_id == *machine_id))
            .map(|w| {
                w.exercises
                    .iter()
                    .filter(|e| e.machine_id == *machine_id)
                    .flat_map(|e| e.sets.iter().cloned())
                    .collect()
            })
            .unwrap_or_default())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Workout {
    pub id: WorkoutID,
    pub date: NaiveDate,
    pub start_time: DateTime<Utc>,
    pub end_time: Option<DateTime<Utc>>,
    pub exercises: Vec<Exercise>,
}

impl Workout {
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.end_time.is_some()
    }

    pub fn sets(&self) -> impl Iterator<Item = &SetRecord> {
        self.exercises.iter().flat_map(|e| e.sets.iter())
    }
}

id_type!(WorkoutID);

/// Exercise logged during a workout.
///
/// Several exercises of the same workout may refer to the same machine.
#[derive(Debug, Clone, PartialEq)]
pub struct Exercise {
    pub id: ExerciseID,
    pub machine_id: MachineID,
    pub machine_name: String,
    pub sets: Vec<SetRecord>,
}

impl Exercise {
    pub fn completed_sets(&self) -> impl Iterator<Item = &SetRecord> {
        self.sets.iter().filter(|s| s.is_completed)
    }
}

id_type!(ExerciseID);

#[derive(Debug, Clone, PartialEq)]
pub struct SetRecord {
    pub id: SetID,
    pub weight: Weight,
    pub reps: Reps,
    pub weight_unit: WeightUnit,
    pub rest_period: u32,
    pub is_completed: bool,
}

id_type!(SetID);
