//! Training statistics derived from logged workouts.
//!
//! All functions are pure. Sets which are not marked as completed never
//! contribute to volume, maximum weight or estimated one-rep max. Degenerate
//! input (zero weight, zero reps, missing end time) yields a defined fallback
//! value instead of an error.

use std::fmt;

use crate::{Exercise, SetRecord, Workout};

/// Formula used to estimate the one-rep max from a submaximal set.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum E1RMFormula {
    #[default]
    Brzycki,
    Epley,
}

impl E1RMFormula {
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            E1RMFormula::Brzycki => "brzycki",
            E1RMFormula::Epley => "epley",
        }
    }

    #[must_use]
    pub fn estimate(self, weight: f32, reps: u32) -> f32 {
        match self {
            E1RMFormula::Brzycki => calculate_brzycki(weight, reps),
            E1RMFormula::Epley => calculate_epley(weight, reps),
        }
    }
}

impl fmt::Display for E1RMFormula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl TryFrom<&str> for E1RMFormula {
    type Error = E1RMFormulaError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_lowercase().as_str() {
            "brzycki" => Ok(E1RMFormula::Brzycki),
            "epley" => Ok(E1RMFormula::Epley),
            _ => Err(E1RMFormulaError::Unknown(value.to_string())),
        }
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum E1RMFormulaError {
    #[error("Unknown E1RM formula: {0}")]
    Unknown(String),
}

/// Sum of weight × reps over the completed sets of an exercise.
#[must_use]
pub fn calculate_exercise_volume(exercise: &Exercise) -> f32 {
    exercise
        .completed_sets()
        .map(|s| f32::from(s.weight) * reps_as_f32(s))
        .sum()
}

#[must_use]
pub fn calculate_total_volume(exercises: &[Exercise]) -> f32 {
    exercises.iter().map(calculate_exercise_volume).sum()
}

/// Heaviest completed set of an exercise, 0 if there is none.
#[must_use]
pub fn get_exercise_max_weight(exercise: &Exercise) -> f32 {
    exercise
        .completed_sets()
        .map(|s| f32::from(s.weight))
        .fold(0.0, f32::max)
}

#[must_use]
pub fn get_max_weight(exercises: &[Exercise]) -> f32 {
    exercises
        .iter()
        .map(get_exercise_max_weight)
        .fold(0.0, f32::max)
}

/// Brzycki estimate, `weight × 36 / (37 − reps)`.
///
/// The denominator approaches zero near 37 reps, so outside of `1 < reps < 37`
/// the weight itself is returned.
#[must_use]
pub fn calculate_brzycki(weight: f32, reps: u32) -> f32 {
    if reps <= 1 || reps >= 37 {
        return weight;
    }
    #[allow(clippy::cast_precision_loss)]
    let reps = reps as f32;
    weight * (36.0 / (37.0 - reps))
}

/// Epley estimate, `weight × (1 + reps / 30)`, or the weight itself for a single rep.
#[must_use]
pub fn calculate_epley(weight: f32, reps: u32) -> f32 {
    if reps <= 1 {
        return weight;
    }
    #[allow(clippy::cast_precision_loss)]
    let reps = reps as f32;
    weight * (1.0 + reps / 30.0)
}

/// Estimated one-rep max rounded to one decimal place.
///
/// Returns 0 if no weight was moved or no rep was performed.
#[must_use]
pub fn calculate_e1rm(weight: f32, reps: u32, formula: E1RMFormula) -> f32 {
    if weight <= 0.0 || reps == 0 {
        return 0.0;
    }
    (formula.estimate(weight, reps) * 10.0).round() / 10.0
}

/// Highest estimated one-rep max of the given sets, regardless of completion.
#[must_use]
pub fn get_best_e1rm(sets: &[SetRecord], formula: E1RMFormula) -> f32 {
    best_e1rm_of(sets, formula)
}

#[must_use]
pub fn get_exercise_best_e1rm(exercise: &Exercise, formula: E1RMFormula) -> f32 {
    best_e1rm_of(exercise.completed_sets(), formula)
}

#[must_use]
pub fn get_workout_best_e1rm(workout: &Workout, formula: E1RMFormula) -> f32 {
    best_e1rm_of(workout.sets().filter(|s| s.is_completed), formula)
}

fn best_e1rm_of<'a>(sets: impl IntoIterator<Item = &'a SetRecord>, formula: E1RMFormula) -> f32 {
    sets.into_iter()
        .map(|s| calculate_e1rm(f32::from(s.weight), u32::from(s.reps), formula))
        .fold(0.0, f32::max)
}

#[must_use]
pub fn count_completed_sets(exercises: &[Exercise]) -> u32 {
    #[allow(clippy::cast_possible_truncation)]
    let count = exercises
        .iter()
        .map(|e| e.completed_sets().count())
        .sum::<usize>() as u32;
    count
}

/// Workout duration in whole minutes, rounded half up.
///
/// An unfinished workout has a duration of 0, as has a workout whose end
/// time precedes its start time.
#[must_use]
pub fn calculate_workout_duration(workout: &Workout) -> u32 {
    let Some(end_time) = workout.end_time else {
        return 0;
    };
    let milliseconds = (end_time - workout.start_time).num_milliseconds();
    if milliseconds <= 0 {
        return 0;
    }
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_precision_loss,
        clippy::cast_sign_loss
    )]
    let minutes = (milliseconds as f64 / 60_000.0).round() as u32;
    minutes
}

#[must_use]
pub fn format_duration(minutes: u32) -> String {
    if minutes < 60 {
        return format!("{minutes} min");
    }
    let hours = minutes / 60;
    let remainder = minutes % 60;
    if remainder == 0 {
        format!("{hours}h")
    } else {
        format!("{hours}h {remainder}min")
    }
}

fn reps_as_f32(set: &SetRecord) -> f32 {
    #[allow(clippy::cast_precision_loss)]
    let reps = u32::from(set.reps) as f32;
    reps
}
