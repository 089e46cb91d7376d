use std::{
    collections::VecDeque,
    sync::{Mutex, MutexGuard},
};

use liftbook_app as app;
use liftbook_domain as domain;

/// Volatile store which keeps all records for the lifetime of the value.
#[derive(Default)]
pub struct MemoryStorage {
    workouts: Mutex<Vec<domain::Workout>>,
    plans: Mutex<Vec<domain::Plan>>,
    settings: Mutex<Option<app::Settings>>,
    ongoing_workout: Mutex<Option<app::OngoingWorkout>>,
    log: Mutex<VecDeque<app::log::Entry>>,
}

impl MemoryStorage {
    #[must_use]
    pub fn new(workouts: Vec<domain::Workout>, plans: Vec<domain::Plan>) -> Self {
        Self {
            workouts: Mutex::new(workouts),
            plans: Mutex::new(plans),
            ..Self::default()
        }
    }
}

fn lock<T>(mutex: &Mutex<T>) -> Result<MutexGuard<'_, T>, domain::StorageError> {
    mutex
        .lock()
        .map_err(|err| domain::StorageError::Other(err.to_string().into()))
}

impl domain::WorkoutRepository for MemoryStorage {
    async fn read_workouts(&self) -> Result<Vec<domain::Workout>, domain::ReadError> {
        Ok(lock(&self.workouts)?.clone())
    }

    async fn save_workout(
        &self,
        workout: domain::Workout,
    ) -> Result<domain::Workout, domain::UpdateError> {
        let mut workouts = lock(&self.workouts)?;
        match workouts.iter_mut().find(|w| w.id == workout.id) {
            Some(stored) => *stored = workout.clone(),
            None => workouts.push(workout.clone()),
        }
        Ok(workout)
    }

    async fn delete_workout(
        &self,
        id: domain::WorkoutID,
    ) -> Result<domain::WorkoutID, domain::DeleteError> {
        lock(&self.workouts)?.retain(|w| w.id != id);
        Ok(id)
    }
}

impl domain::PlanRepository for MemoryStorage {
    async fn read_plans(&self) -> Result<Vec<domain::Plan>, domain::ReadError> {
        Ok(lock(&self.plans)?.clone())
    }

    async fn save_plan(&self, plan: domain::Plan) -> Result<domain::Plan, domain::UpdateError> {
        let mut plans = lock(&self.plans)?;
        match plans.iter_mut().find(|p| p.id == plan.id) {
            Some(stored) => *stored = plan.clone(),
            None => plans.push(plan.clone()),
        }
        Ok(plan)
    }

    async fn delete_plan(&self, id: domain::PlanID) -> Result<domain::PlanID, domain::DeleteError> {
        lock(&self.plans)?.retain(|p| p.id != id);
        Ok(id)
    }
}

impl app::SettingsRepository for MemoryStorage {
    async fn read_settings(&self) -> Result<app::Settings, domain::ReadError> {
        Ok(lock(&self.settings)?.unwrap_or_default())
    }

    async fn write_settings(&self, settings: app::Settings) -> Result<(), domain::UpdateError> {
        *lock(&self.settings)? = Some(settings);
        Ok(())
    }
}

impl app::OngoingWorkoutRepository for MemoryStorage {
    async fn read_ongoing_workout(
        &self,
    ) -> Result<Option<app::OngoingWorkout>, domain::ReadError> {
        Ok(lock(&self.ongoing_workout)?.clone())
    }

    async fn write_ongoing_workout(
        &self,
        ongoing_workout: Option<app::OngoingWorkout>,
    ) -> Result<(), domain::UpdateError> {
        *lock(&self.ongoing_workout)? = ongoing_workout;
        Ok(())
    }
}

impl app::log::Repository for MemoryStorage {
    fn read_entries(&self) -> Result<VecDeque<app::log::Entry>, app::log::Error> {
        self.log
            .lock()
            .map(|entries| entries.clone())
            .map_err(|err| app::log::Error::Unknown(err.to_string()))
    }

    fn write_entry(&self, entry: app::log::Entry) -> Result<(), app::log::Error> {
        let mut entries = self
            .log
            .lock()
            .map_err(|err| app::log::Error::Unknown(err.to_string()))?;
        entries.push_front(entry);
        entries.truncate(app::log::MAX_ENTRIES);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use app::log::{Entry, MAX_ENTRIES, Repository};
    use futures_util::FutureExt;
    use liftbook_domain::{PlanRepository, WorkoutRepository};
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::tests::data::{PLAN, PLAN_2, PLANS, WORKOUT, WORKOUT_2, WORKOUTS};
    use app::{
        OngoingWorkoutRepository, OngoingWorkoutService as _, SettingsRepository,
        SettingsService as _,
    };
    use log::Level;

    #[test]
    fn test_read_workouts_empty() {
        assert!(
            MemoryStorage::default()
                .read_workouts()
                .now_or_never()
                .unwrap()
                .unwrap()
                .is_empty()
        );
    }

    #[test]
    fn test_save_workout() {
        let storage = MemoryStorage::new(vec![WORKOUT.clone()], vec![]);

        let mut workout = WORKOUT.clone();
        workout.end_time = WORKOUT_2.end_time;
        storage
            .save_workout(workout.clone())
            .now_or_never()
            .unwrap()
            .unwrap();
        storage
            .save_workout(WORKOUT_2.clone())
            .now_or_never()
            .unwrap()
            .unwrap();

        assert_eq!(
            storage.read_workouts().now_or_never().unwrap().unwrap(),
            vec![workout, WORKOUT_2.clone()]
        );
    }

    #[test]
    fn test_delete_workout() {
        let storage = MemoryStorage::new(WORKOUTS.clone(), vec![]);
        assert_eq!(
            storage
                .delete_workout(WORKOUT.id)
                .now_or_never()
                .unwrap()
                .unwrap(),
            WORKOUT.id
        );
        assert_eq!(
            storage.read_workouts().now_or_never().unwrap().unwrap(),
            vec![WORKOUT_2.clone()]
        );
    }

    #[test]
    fn test_plans() {
        let storage = MemoryStorage::new(vec![], PLANS.clone());

        let mut plan = PLAN.clone();
        plan.exercises.reverse();
        storage.save_plan(plan.clone()).now_or_never().unwrap().unwrap();
        storage
            .delete_plan(PLAN_2.id)
            .now_or_never()
            .unwrap()
            .unwrap();
        storage
            .delete_plan(PLAN_2.id)
            .now_or_never()
            .unwrap()
            .unwrap();

        assert_eq!(
            storage.read_plans().now_or_never().unwrap().unwrap(),
            vec![plan]
        );
    }

    #[test]
    fn test_settings() {
        let storage = MemoryStorage::default();
        assert_eq!(
            storage.read_settings().now_or_never().unwrap().unwrap(),
            app::Settings::default()
        );

        let settings = app::Settings {
            default_rest_period: 120,
            ..app::Settings::default()
        };
        storage
            .write_settings(settings)
            .now_or_never()
            .unwrap()
            .unwrap();
        assert_eq!(
            storage.read_settings().now_or_never().unwrap().unwrap(),
            settings
        );
    }

    #[test]
    fn test_ongoing_workout() {
        let storage = MemoryStorage::default();
        assert_eq!(
            storage.read_ongoing_workout().now_or_never().unwrap().unwrap(),
            None
        );

        let ongoing_workout = app::OngoingWorkout::new(WORKOUT.id, WORKOUT.start_time);
        storage
            .write_ongoing_workout(Some(ongoing_workout.clone()))
            .now_or_never()
            .unwrap()
            .unwrap();
        assert_eq!(
            storage.read_ongoing_workout().now_or_never().unwrap().unwrap(),
            Some(ongoing_workout)
        );

        storage
            .write_ongoing_workout(None)
            .now_or_never()
            .unwrap()
            .unwrap();
        assert_eq!(
            storage.read_ongoing_workout().now_or_never().unwrap().unwrap(),
            None
        );
    }

    #[test]
    fn test_app_service() {
        let service = app::Service::new(MemoryStorage::default());
        assert_eq!(
            service.get_settings().now_or_never().unwrap().unwrap(),
            app::Settings::default()
        );

        service
            .set_ongoing_workout(Some(app::OngoingWorkout::new(WORKOUT.id, WORKOUT.start_time)))
            .now_or_never()
            .unwrap()
            .unwrap();
        let ongoing_workout = service
            .start_rest_timer(None, WORKOUT.start_time)
            .now_or_never()
            .unwrap()
            .unwrap()
            .unwrap();
        assert_eq!(ongoing_workout.workout_id(), WORKOUT.id);
        assert_eq!(
            service.get_ongoing_workout().now_or_never().unwrap().unwrap(),
            Some(ongoing_workout)
        );
    }

    #[test]
    fn test_log_keeps_latest_entries() {
        let storage = MemoryStorage::default();
        for i in 0..=MAX_ENTRIES {
            storage
                .write_entry(Entry {
                    time: String::new(),
                    level: Level::Info,
                    message: i.to_string(),
                })
                .unwrap();
        }
        let entries = storage.read_entries().unwrap();
        assert_eq!(entries.len(), MAX_ENTRIES);
        assert_eq!(entries[0].message, MAX_ENTRIES.to_string());
        assert_eq!(entries[MAX_ENTRIES - 1].message, "1");
    }
}
