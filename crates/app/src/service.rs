use std::collections::VecDeque;

use ::log::{debug, error};
use chrono::{DateTime, Utc};
use liftbook_domain::{ReadError, SetDefaults, StorageError, UpdateError};

use crate::{
    OngoingWorkout, OngoingWorkoutRepository, OngoingWorkoutService, Settings, SettingsRepository,
    SettingsService, TimerState, log,
};

/// Application state service on top of a repository for settings, the
/// ongoing workout and log entries.
pub struct Service<R> {
    repository: R,
}

impl<R> Service<R> {
    pub fn new(repository: R) -> Self {
        Self { repository }
    }
}

macro_rules! log_failure {
    ($func: expr, $error: ident, $action: literal, $entity: literal) => {{
        let result = $func.await;
        if let Err(ref err) = result {
            if let $error::Storage(StorageError::NoConnection) = err {
                debug!("failed to {} {}: {err}", $action, $entity);
            } else {
                error!("failed to {} {}: {err}", $action, $entity);
            }
        }
        result
    }};
}

impl<R: log::Repository> log::Service for Service<R> {
    fn get_log_entries(&self) -> Result<VecDeque<log::Entry>, log::Error> {
        self.repository.read_entries()
    }

    fn add_log_entry(&self, entry: log::Entry) -> Result<(), log::Error> {
        self.repository.write_entry(entry)
    }
}

impl<R: SettingsRepository> SettingsService for Service<R> {
    async fn get_settings(&self) -> Result<Settings, ReadError> {
        log_failure!(self.repository.read_settings(), ReadError, "get", "settings")
    }

    async fn set_settings(&self, settings: Settings) -> Result<(), UpdateError> {
        log_failure!(
            self.repository.write_settings(settings),
            UpdateError,
            "set",
            "settings"
        )
    }
}

impl<R: OngoingWorkoutRepository> OngoingWorkoutService for Service<R> {
    async fn get_ongoing_workout(&self) -> Result<Option<OngoingWorkout>, ReadError> {
        log_failure!(
            self.repository.read_ongoing_workout(),
            ReadError,
            "get",
            "ongoing workout"
        )
    }

    async fn set_ongoing_workout(
        &self,
        ongoing_workout: Option<OngoingWorkout>,
    ) -> Result<(), UpdateError> {
        log_failure!(
            self.repository.write_ongoing_workout(ongoing_workout),
            UpdateError,
            "set",
            "ongoing workout"
        )
    }
}

impl<R: SettingsRepository + OngoingWorkoutRepository> Service<R> {
    /// Start the rest timer of the ongoing workout.
    ///
    /// Returns `None` if no workout is ongoing.
    pub async fn start_rest_timer(
        &self,
        rest_period: Option<u32>,
        now: DateTime<Utc>,
    ) -> Result<Option<OngoingWorkout>, UpdateError> {
        let Some(mut ongoing_workout) = self.get_ongoing_workout().await? else {
            return Ok(None);
        };
        let rest_period = match rest_period {
            Some(rest_period) => rest_period,
            None => self.get_set_defaults().await?.rest_period,
        };
        ongoing_workout.timer_state = TimerState::start(rest_period, now);
        self.set_ongoing_workout(Some(ongoing_workout.clone())).await?;
        Ok(Some(ongoing_workout))
    }

    async fn get_set_defaults(&self) -> Result<SetDefaults, ReadError> {
        Ok(self.get_settings().await?.set_defaults())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use chrono::Duration;
    use futures_util::FutureExt;
    use liftbook_domain::WorkoutID;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::log::Service as _;

    #[derive(Default)]
    struct Repository {
        settings: Mutex<Option<Settings>>,
        ongoing_workout: Mutex<Option<OngoingWorkout>>,
        entries: Mutex<VecDeque<log::Entry>>,
        offline: bool,
    }

    impl Repository {
        fn check_connection(&self) -> Result<(), StorageError> {
            if self.offline {
                Err(StorageError::NoConnection)
            } else {
                Ok(())
            }
        }
    }

    impl SettingsRepository for Repository {
        async fn read_settings(&self) -> Result<Settings, ReadError> {
            self.check_connection()?;
            Ok(self.settings.lock().unwrap().unwrap_or_default())
        }

        async fn write_settings(&self, settings: Settings) -> Result<(), UpdateError> {
            self.check_connection()?;
            *self.settings.lock().unwrap() = Some(settings);
            Ok(())
        }
    }

    impl OngoingWorkoutRepository for Repository {
        async fn read_ongoing_workout(&self) -> Result<Option<OngoingWorkout>, ReadError> {
            self.check_connection()?;
            Ok(self.ongoing_workout.lock().unwrap().clone())
        }

        async fn write_ongoing_workout(
            &self,
            ongoing_workout: Option<OngoingWorkout>,
        ) -> Result<(), UpdateError> {
            self.check_connection()?;
            *self.ongoing_workout.lock().unwrap() = ongoing_workout;
            Ok(())
        }
    }

    impl log::Repository for Repository {
        fn read_entries(&self) -> Result<VecDeque<log::Entry>, log::Error> {
            Ok(self.entries.lock().unwrap().clone())
        }

        fn write_entry(&self, entry: log::Entry) -> Result<(), log::Error> {
            self.entries.lock().unwrap().push_front(entry);
            Ok(())
        }
    }

    fn start_time() -> DateTime<Utc> {
        DateTime::from_timestamp(1_718_000_000, 0).unwrap()
    }

    #[test]
    fn test_settings() {
        let service = Service::new(Repository::default());
        assert_eq!(
            service.get_settings().now_or_never().unwrap().unwrap(),
            Settings::default()
        );

        let settings = Settings {
            default_rest_period: 150,
            show_e1rm: false,
            ..Settings::default()
        };
        service
            .set_settings(settings)
            .now_or_never()
            .unwrap()
            .unwrap();
        assert_eq!(
            service.get_settings().now_or_never().unwrap().unwrap(),
            settings
        );
    }

    #[test]
    fn test_ongoing_workout() {
        let service = Service::new(Repository::default());
        assert_eq!(
            service.get_ongoing_workout().now_or_never().unwrap().unwrap(),
            None
        );

        let ongoing_workout = OngoingWorkout::new(WorkoutID::from(7), start_time());
        service
            .set_ongoing_workout(Some(ongoing_workout.clone()))
            .now_or_never()
            .unwrap()
            .unwrap();
        assert_eq!(
            service.get_ongoing_workout().now_or_never().unwrap().unwrap(),
            Some(ongoing_workout)
        );
    }

    #[test]
    fn test_start_rest_timer() {
        let service = Service::new(Repository::default());
        let now = start_time() + Duration::minutes(5);
        assert_eq!(
            service
                .start_rest_timer(None, now)
                .now_or_never()
                .unwrap()
                .unwrap(),
            None
        );

        service
            .set_ongoing_workout(Some(OngoingWorkout::new(WorkoutID::from(7), start_time())))
            .now_or_never()
            .unwrap()
            .unwrap();
        service
            .start_rest_timer(None, now)
            .now_or_never()
            .unwrap()
            .unwrap();
        assert_eq!(
            service
                .get_ongoing_workout()
                .now_or_never()
                .unwrap()
                .unwrap()
                .map(|o| o.timer_state),
            Some(TimerState::Active {
                target_time: now + Duration::seconds(90)
            })
        );

        let ongoing_workout = service
            .start_rest_timer(Some(45), now)
            .now_or_never()
            .unwrap()
            .unwrap()
            .unwrap();
        assert_eq!(
            ongoing_workout.timer_state,
            TimerState::Active {
                target_time: now + Duration::seconds(45)
            }
        );
    }

    #[test]
    fn test_storage_failure() {
        let service = Service::new(Repository {
            offline: true,
            ..Repository::default()
        });
        assert!(matches!(
            service.get_settings().now_or_never().unwrap(),
            Err(ReadError::Storage(StorageError::NoConnection))
        ));
        assert!(matches!(
            service.set_ongoing_workout(None).now_or_never().unwrap(),
            Err(UpdateError::Storage(StorageError::NoConnection))
        ));
        assert!(matches!(
            service.start_rest_timer(None, start_time()).now_or_never().unwrap(),
            Err(UpdateError::Storage(StorageError::NoConnection))
        ));
    }

    #[test]
    fn test_log_entries() {
        let service = Service::new(Repository::default());
        for message in ["first", "second"] {
            service
                .add_log_entry(log::Entry {
                    time: String::new(),
                    level: ::log::Level::Info,
                    message: message.to_string(),
                })
                .unwrap();
        }
        assert_eq!(
            service
                .get_log_entries()
                .unwrap()
                .iter()
                .map(|e| e.message.as_str())
                .collect::<Vec<_>>(),
            vec!["second", "first"]
        );
    }
}
