use std::{iter::FusedIterator, slice};

use chrono::NaiveDate;

use crate::{
    E1RMFormula, MachineID, Workout, calculate_exercise_volume, get_exercise_best_e1rm,
    get_exercise_max_weight,
};

/// Aggregate of all exercises on one machine within a single workout.
#[derive(Debug, Clone, PartialEq)]
pub struct ProgressEntry {
    pub date: NaiveDate,
    pub volume: f32,
    pub max_weight: f32,
    pub best_e1rm: f32,
    /// Number of logged sets, including sets not marked as completed.
    pub total_sets: u32,
    /// Number of logged reps, including reps of sets not marked as completed.
    pub total_reps: u32,
}

/// Progress series of a machine, one entry per workout containing the machine.
///
/// The entries follow the order of the given workouts; callers pass the
/// workouts in chronological order. Workouts without the machine are skipped,
/// so an unknown machine yields an empty series. The series is computed
/// lazily and can be restarted by cloning it before iteration.
#[must_use]
pub fn get_exercise_progress_metrics<'a>(
    workouts: &'a [Workout],
    machine_id: &'a MachineID,
    formula: E1RMFormula,
) -> ExerciseProgress<'a> {
    ExerciseProgress {
        workouts: workouts.iter(),
        machine_id,
        formula,
    }
}

#[derive(Debug, Clone)]
pub struct ExerciseProgress<'a> {
    workouts: slice::Iter<'a, Workout>,
    machine_id: &'a MachineID,
    formula: E1RMFormula,
}

impl Iterator for ExerciseProgress<'_> {
    type Item = ProgressEntry;

    fn next(&mut self) -> Option<Self::Item> {
        let machine_id = self.machine_id;
        let formula = self.formula;
        self.workouts
            .by_ref()
            .find_map(|workout| progress_entry(workout, machine_id, formula))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, self.workouts.size_hint().1)
    }
}

impl FusedIterator for ExerciseProgress<'_> {}

fn progress_entry(
    workout: &Workout,
    machine_id: &MachineID,
    formula: E1RMFormula,
) -> Option<ProgressEntry> {
    let mut exercises = workout
        .exercises
        .iter()
        .filter(|e| e.machine_id == *machine_id)
        .peekable();

    exercises.peek()?;

    let mut entry = ProgressEntry {
        date: workout.date,
        volume: 0.0,
        max_weight: 0.0,
        best_e1rm: 0.0,
        total_sets: 0,
        total_reps: 0,
    };

    for exercise in exercises {
        entry.volume += calculate_exercise_volume(exercise);
        entry.max_weight = entry.max_weight.max(get_exercise_max_weight(exercise));
        entry.best_e1rm = entry
            .best_e1rm
            .max(get_exercise_best_e1rm(exercise, formula));
        #[allow(clippy::cast_possible_truncation)]
        let sets = exercise.sets.len() as u32;
        entry.total_sets += sets;
        entry.total_reps += exercise.sets.iter().map(|s| u32::from(s.reps)).sum::<u32>();
    }

    Some(entry)
}

#[cfg(test)]
mod tests {
    use assert_approx_eq::assert_approx_eq;
    use chrono::{DateTime, Days};
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{Exercise, Reps, SetRecord, Weight, WeightUnit};

    fn set(weight: f32, reps: u32, is_completed: bool) -> SetRecord {
        SetRecord {
            id: crate::SetID::nil(),
            weight: Weight::new(weight).unwrap(),
            reps: Reps::new(reps).unwrap(),
            weight_unit: WeightUnit::Kg,
            rest_period: 90,
            is_completed,
        }
    }

    fn exercise(machine_id: &str, sets: Vec<SetRecord>) -> Exercise {
        Exercise {
            id: crate::ExerciseID::nil(),
            machine_id: machine_id.into(),
            machine_name: machine_id.to_uppercase(),
            sets,
        }
    }

    fn workout(day: u64, exercises: Vec<Exercise>) -> Workout {
        Workout {
            id: u128::from(day).into(),
            date: date(day),
            start_time: DateTime::from_timestamp(1_700_000_000, 0).unwrap(),
            end_time: None,
            exercises,
        }
    }

    fn date(day: u64) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .checked_add_days(Days::new(day))
            .unwrap()
    }

    #[test]
    fn test_get_exercise_progress_metrics_no_workouts() {
        assert!(
            get_exercise_progress_metrics(&[], &"bench-press".into(), E1RMFormula::Brzycki)
                .next()
                .is_none()
        );
    }

    #[test]
    fn test_get_exercise_progress_metrics_unknown_machine() {
        let workouts = vec![workout(0, vec![exercise("leg-press", vec![set(100.0, 10, true)])])];
        assert_eq!(
            get_exercise_progress_metrics(&workouts, &"bench-press".into(), E1RMFormula::Brzycki)
                .count(),
            0
        );
    }

    #[test]
    fn test_get_exercise_progress_metrics_skips_workouts_without_machine() {
        let workouts = vec![
            workout(0, vec![exercise("bench-press", vec![set(60.0, 10, true)])]),
            workout(2, vec![exercise("leg-press", vec![set(100.0, 10, true)])]),
            workout(4, vec![]),
            workout(
                6,
                vec![
                    exercise("leg-press", vec![set(110.0, 10, true)]),
                    exercise("bench-press", vec![set(65.0, 8, true)]),
                ],
            ),
        ];
        let machine_id = MachineID::from("bench-press");
        let progress = get_exercise_progress_metrics(&workouts, &machine_id, E1RMFormula::Brzycki)
            .collect::<Vec<_>>();
        assert_eq!(progress.len(), 2);
        assert_eq!(
            progress.iter().map(|e| e.date).collect::<Vec<_>>(),
            vec![date(0), date(6)]
        );
    }

    #[test]
    fn test_get_exercise_progress_metrics_merges_exercises_on_same_machine() {
        let workouts = vec![workout(
            0,
            vec![
                exercise("bench-press", vec![set(60.0, 10, true), set(80.0, 5, true)]),
                exercise("cable-curl", vec![set(20.0, 12, true)]),
                exercise(
                    "bench-press",
                    vec![set(100.0, 2, true), set(120.0, 1, false), set(50.0, 15, true)],
                ),
            ],
        )];
        let machine_id = MachineID::from("bench-press");
        let progress = get_exercise_progress_metrics(&workouts, &machine_id, E1RMFormula::Brzycki)
            .collect::<Vec<_>>();
        assert_eq!(progress.len(), 1);
        let entry = &progress[0];
        assert_eq!(entry.date, date(0));
        assert_approx_eq!(entry.volume, 600.0 + 400.0 + 200.0 + 750.0);
        assert_approx_eq!(entry.max_weight, 100.0);
        assert_approx_eq!(entry.best_e1rm, 102.9);
        assert_eq!(entry.total_sets, 5);
        assert_eq!(entry.total_reps, 33);
    }

    #[test]
    fn test_get_exercise_progress_metrics_counts_incomplete_sets_and_reps() {
        let workouts = vec![workout(
            0,
            vec![exercise(
                "bench-press",
                vec![set(60.0, 10, true), set(80.0, 6, false)],
            )],
        )];
        let machine_id = MachineID::from("bench-press");
        let entry = get_exercise_progress_metrics(&workouts, &machine_id, E1RMFormula::Epley)
            .next()
            .unwrap();
        assert_approx_eq!(entry.volume, 600.0);
        assert_approx_eq!(entry.max_weight, 60.0);
        assert_approx_eq!(entry.best_e1rm, 80.0);
        assert_eq!(entry.total_sets, 2);
        assert_eq!(entry.total_reps, 16);
    }

    #[test]
    fn test_get_exercise_progress_metrics_preserves_input_order() {
        let workouts = vec![
            workout(5, vec![exercise("a", vec![set(10.0, 1, true)])]),
            workout(1, vec![exercise("a", vec![set(20.0, 1, true)])]),
            workout(3, vec![exercise("a", vec![set(30.0, 1, true)])]),
        ];
        let machine_id = MachineID::from("a");
        assert_eq!(
            get_exercise_progress_metrics(&workouts, &machine_id, E1RMFormula::Brzycki)
                .map(|e| e.date)
                .collect::<Vec<_>>(),
            vec![date(5), date(1), date(3)]
        );
    }

    #[test]
    fn test_get_exercise_progress_metrics_is_restartable() {
        let workouts = vec![
            workout(0, vec![exercise("a", vec![set(10.0, 5, true)])]),
            workout(1, vec![exercise("a", vec![set(12.5, 5, true)])]),
        ];
        let machine_id = MachineID::from("a");
        let progress = get_exercise_progress_metrics(&workouts, &machine_id, E1RMFormula::Brzycki);
        let first = progress.clone().collect::<Vec<_>>();
        let second = progress.collect::<Vec<_>>();
        assert_eq!(first, second);
        assert_eq!(first.len(), 2);
    }
}
