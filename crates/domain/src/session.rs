use chrono::{DateTime, NaiveDate, Utc};

use crate::{
    Catalog, E1RMFormula, Exercise, ExerciseID, Machine, Plan, Reps, SetID, SetRecord, Weight,
    WeightUnit, Workout, WorkoutID, calculate_total_volume, calculate_workout_duration,
    count_completed_sets, format_duration, get_max_weight, get_workout_best_e1rm,
};

/// Values used for sets which are added without explicit input.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SetDefaults {
    pub weight_unit: WeightUnit,
    pub rest_period: u32,
}

impl Default for SetDefaults {
    fn default() -> Self {
        Self {
            weight_unit: WeightUnit::Kg,
            rest_period: 90,
        }
    }
}

/// Start a workout, either from a plan or empty.
///
/// Every planned exercise becomes a logged exercise in plan order, seeded
/// with one incomplete set at the machine's minimum weight.
#[must_use]
pub fn start_workout(
    plan: Option<&Plan>,
    catalog: &Catalog,
    date: NaiveDate,
    start_time: DateTime<Utc>,
    defaults: SetDefaults,
) -> Workout {
    let exercises = plan
        .map(|plan| {
            plan.exercises
                .iter()
                .map(|planned| {
                    let machine = catalog.machine(&planned.variant.machine_id);
                    Exercise {
                        id: ExerciseID::random(),
                        machine_id: planned.variant.machine_id.clone(),
                        machine_name: planned.label(),
                        sets: vec![seed_set(machine, defaults)],
                    }
                })
                .collect()
        })
        .unwrap_or_default();

    Workout {
        id: WorkoutID::random(),
        date,
        start_time,
        end_time: None,
        exercises,
    }
}

fn seed_set(machine: Option<&Machine>, defaults: SetDefaults) -> SetRecord {
    SetRecord {
        id: SetID::random(),
        weight: machine
            .and_then(|m| m.min_weight)
            .and_then(|w| Weight::new(w).ok())
            .unwrap_or(Weight::ZERO),
        reps: Reps::default(),
        weight_unit: defaults.weight_unit,
        rest_period: machine
            .and_then(|m| m.default_rest_period)
            .unwrap_or(defaults.rest_period),
        is_completed: false,
    }
}

impl Workout {
    pub fn add_exercise(
        &mut self,
        machine: &Machine,
        defaults: SetDefaults,
    ) -> Result<ExerciseID, SessionError> {
        self.ensure_unfinished()?;
        let id = ExerciseID::random();
        self.exercises.push(Exercise {
            id,
            machine_id: machine.id.clone(),
            machine_name: machine.name.clone(),
            sets: vec![seed_set(Some(machine), defaults)],
        });
        Ok(id)
    }

    pub fn remove_exercise(&mut self, exercise_id: ExerciseID) -> Result<Exercise, SessionError> {
        self.ensure_unfinished()?;
        let position = self
            .exercises
            .iter()
            .position(|e| e.id == exercise_id)
            .ok_or(SessionError::UnknownExercise(exercise_id))?;
        Ok(self.exercises.remove(position))
    }

    /// Append a set which repeats the last set of the exercise.
    pub fn add_set(&mut self, exercise_id: ExerciseID) -> Result<SetID, SessionError> {
        self.ensure_unfinished()?;
        let exercise = self.exercise_mut(exercise_id)?;
        let id = SetID::random();
        let set = match exercise.sets.last() {
            Some(last) => SetRecord {
                id,
                is_completed: false,
                ..last.clone()
            },
            None => SetRecord {
                id,
                ..seed_set(None, SetDefaults::default())
            },
        };
        exercise.sets.push(set);
        Ok(id)
    }

    pub fn remove_set(&mut self, exercise_id: ExerciseID, set_id: SetID) -> Result<(), SessionError> {
        self.ensure_unfinished()?;
        let exercise = self.exercise_mut(exercise_id)?;
        let position = exercise
            .sets
            .iter()
            .position(|s| s.id == set_id)
            .ok_or(SessionError::UnknownSet(set_id))?;
        exercise.sets.remove(position);
        Ok(())
    }

    /// Record the performed weight and reps of a set and mark it as completed.
    pub fn complete_set(
        &mut self,
        exercise_id: ExerciseID,
        set_id: SetID,
        weight: Weight,
        reps: Reps,
    ) -> Result<(), SessionError> {
        self.ensure_unfinished()?;
        let set = self
            .exercise_mut(exercise_id)?
            .sets
            .iter_mut()
            .find(|s| s.id == set_id)
            .ok_or(SessionError::UnknownSet(set_id))?;
        set.weight = weight;
        set.reps = reps;
        set.is_completed = true;
        Ok(())
    }

    pub fn finish(&mut self, end_time: DateTime<Utc>) -> Result<(), SessionError> {
        self.ensure_unfinished()?;
        if end_time < self.start_time {
            return Err(SessionError::EndBeforeStart);
        }
        self.end_time = Some(end_time);
        Ok(())
    }

    fn ensure_unfinished(&self) -> Result<(), SessionError> {
        if self.is_finished() {
            return Err(SessionError::AlreadyFinished);
        }
        Ok(())
    }

    fn exercise_mut(&mut self, exercise_id: ExerciseID) -> Result<&mut Exercise, SessionError> {
        self.exercises
            .iter_mut()
            .find(|e| e.id == exercise_id)
            .ok_or(SessionError::UnknownExercise(exercise_id))
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum SessionError {
    #[error("Unknown exercise: {0}")]
    UnknownExercise(ExerciseID),
    #[error("Unknown set: {0}")]
    UnknownSet(SetID),
    #[error("Workout is already finished")]
    AlreadyFinished,
    #[error("Workout must not end before it started")]
    EndBeforeStart,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WorkoutSummary {
    pub duration: u32,
    pub formatted_duration: String,
    pub total_volume: f32,
    pub max_weight: f32,
    pub completed_sets: u32,
    pub best_e1rm: f32,
}

impl WorkoutSummary {
    #[must_use]
    pub fn from_workout(workout: &Workout, formula: E1RMFormula) -> Self {
        let duration = calculate_workout_duration(workout);
        Self {
            duration,
            formatted_duration: format_duration(duration),
            total_volume: calculate_total_volume(&workout.exercises),
            max_weight: get_max_weight(&workout.exercises),
            completed_sets: count_completed_sets(&workout.exercises),
            best_e1rm: get_workout_best_e1rm(workout, formula),
        }
    }
}
