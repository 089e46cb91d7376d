use std::{
    collections::VecDeque,
    fs, io,
    path::PathBuf,
    sync::{Arc, Mutex, MutexGuard},
};

use liftbook_app::{self as app, log::Repository as _};
use liftbook_domain as domain;
use log::debug;
use serde::{Serialize, de::DeserializeOwned};
use strum::AsRefStr;

use crate::dto;

/// Store which keeps every kind of record in its own JSON file.
///
/// A file which does not exist yet reads back as empty. Files are replaced
/// atomically on every write.
///
/// Saving and deleting read the whole file, modify it and write it back.
/// These updates are serialized within one value and its clones, but not
/// across processes or separately created values for the same directory.
#[derive(Debug, Clone)]
pub struct JsonFileStorage {
    dir: PathBuf,
    records: Arc<Mutex<()>>,
    log: Arc<Mutex<()>>,
}

impl JsonFileStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            records: Arc::default(),
            log: Arc::default(),
        }
    }

    fn path(&self, store: &Store) -> PathBuf {
        self.dir.join(format!("{}.json", store.as_ref()))
    }

    fn read<V: DeserializeOwned>(&self, store: &Store) -> Result<Option<V>, JsonFileError> {
        let value = self.read_silently(store)?;
        if value.is_none() {
            debug!("{} does not exist", self.path(store).display());
        }
        Ok(value)
    }

    /// Read without emitting log records, as required on the path of the log store.
    fn read_silently<V: DeserializeOwned>(
        &self,
        store: &Store,
    ) -> Result<Option<V>, JsonFileError> {
        match fs::read(self.path(store)) {
            Ok(content) => Ok(Some(serde_json::from_slice(&content)?)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn write<V: Serialize>(&self, store: &Store, value: &V) -> Result<(), JsonFileError> {
        fs::create_dir_all(&self.dir)?;
        let path = self.path(store);
        let tmp_path = path.with_extension("json.tmp");
        fs::write(&tmp_path, serde_json::to_vec_pretty(value)?)?;
        fs::rename(&tmp_path, &path)?;
        Ok(())
    }

    fn read_all<R, V>(&self, store: &Store) -> Result<Vec<R>, JsonFileError>
    where
        V: DeserializeOwned,
        R: TryFrom<V>,
        <R as TryFrom<V>>::Error: std::error::Error + Send + Sync + 'static,
    {
        self.read::<Vec<V>>(store)?
            .unwrap_or_default()
            .into_iter()
            .map(|v| R::try_from(v).map_err(|err| JsonFileError::Other(err.into())))
            .collect()
    }

    /// Read all records of a store, modify them and write them back while
    /// holding the lock for workout and plan updates.
    fn update<R, V>(
        &self,
        store: &Store,
        modify: impl FnOnce(&mut Vec<R>),
    ) -> Result<(), JsonFileError>
    where
        V: DeserializeOwned + Serialize + for<'a> From<&'a R>,
        R: TryFrom<V>,
        <R as TryFrom<V>>::Error: std::error::Error + Send + Sync + 'static,
    {
        let _guard = lock(&self.records)?;
        let mut records = self.read_all::<R, V>(store)?;
        modify(&mut records);
        self.write(store, &records.iter().map(V::from).collect::<Vec<_>>())
    }
}

fn lock(mutex: &Mutex<()>) -> Result<MutexGuard<'_, ()>, JsonFileError> {
    mutex
        .lock()
        .map_err(|err| JsonFileError::Other(anyhow::anyhow!("{err}")))
}

#[derive(AsRefStr)]
enum Store {
    #[strum(serialize = "workouts")]
    Workouts,
    #[strum(serialize = "plans")]
    Plans,
    #[strum(serialize = "settings")]
    Settings,
    #[strum(serialize = "ongoing_workout")]
    OngoingWorkout,
    #[strum(serialize = "log")]
    Log,
}

#[derive(thiserror::Error, Debug)]
pub enum JsonFileError {
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<JsonFileError> for domain::StorageError {
    fn from(value: JsonFileError) -> Self {
        domain::StorageError::Other(Box::new(value))
    }
}

impl domain::WorkoutRepository for JsonFileStorage {
    async fn read_workouts(&self) -> Result<Vec<domain::Workout>, domain::ReadError> {
        Ok(self
            .read_all::<domain::Workout, dto::Workout>(&Store::Workouts)
            .map_err(domain::StorageError::from)?)
    }

    async fn save_workout(
        &self,
        workout: domain::Workout,
    ) -> Result<domain::Workout, domain::UpdateError> {
        self.update::<domain::Workout, dto::Workout>(&Store::Workouts, |workouts| {
            match workouts.iter_mut().find(|w| w.id == workout.id) {
                Some(stored) => *stored = workout.clone(),
                None => workouts.push(workout.clone()),
            }
        })
        .map_err(domain::StorageError::from)?;
        Ok(workout)
    }

    async fn delete_workout(
        &self,
        id: domain::WorkoutID,
    ) -> Result<domain::WorkoutID, domain::DeleteError> {
        self.update::<domain::Workout, dto::Workout>(&Store::Workouts, |workouts| {
            workouts.retain(|w| w.id != id);
        })
        .map_err(domain::StorageError::from)?;
        Ok(id)
    }
}

impl domain::PlanRepository for JsonFileStorage {
    async fn read_plans(&self) -> Result<Vec<domain::Plan>, domain::ReadError> {
        Ok(self
            .read_all::<domain::Plan, dto::Plan>(&Store::Plans)
            .map_err(domain::StorageError::from)?)
    }

    async fn save_plan(&self, plan: domain::Plan) -> Result<domain::Plan, domain::UpdateError> {
        self.update::<domain::Plan, dto::Plan>(&Store::Plans, |plans| {
            match plans.iter_mut().find(|p| p.id == plan.id) {
                Some(stored) => *stored = plan.clone(),
                None => plans.push(plan.clone()),
            }
        })
        .map_err(domain::StorageError::from)?;
        Ok(plan)
    }

    async fn delete_plan(&self, id: domain::PlanID) -> Result<domain::PlanID, domain::DeleteError> {
        self.update::<domain::Plan, dto::Plan>(&Store::Plans, |plans| {
            plans.retain(|p| p.id != id);
        })
        .map_err(domain::StorageError::from)?;
        Ok(id)
    }
}

impl app::SettingsRepository for JsonFileStorage {
    async fn read_settings(&self) -> Result<app::Settings, domain::ReadError> {
        Ok(self
            .read(&Store::Settings)
            .map_err(domain::StorageError::from)?
            .unwrap_or_default())
    }

    async fn write_settings(&self, settings: app::Settings) -> Result<(), domain::UpdateError> {
        Ok(self
            .write(&Store::Settings, &settings)
            .map_err(domain::StorageError::from)?)
    }
}

impl app::OngoingWorkoutRepository for JsonFileStorage {
    async fn read_ongoing_workout(
        &self,
    ) -> Result<Option<app::OngoingWorkout>, domain::ReadError> {
        Ok(self
            .read::<Option<app::OngoingWorkout>>(&Store::OngoingWorkout)
            .map_err(domain::StorageError::from)?
            .flatten())
    }

    async fn write_ongoing_workout(
        &self,
        ongoing_workout: Option<app::OngoingWorkout>,
    ) -> Result<(), domain::UpdateError> {
        Ok(self
            .write(&Store::OngoingWorkout, &ongoing_workout)
            .map_err(domain::StorageError::from)?)
    }
}

impl app::log::Repository for JsonFileStorage {
    fn read_entries(&self) -> Result<VecDeque<app::log::Entry>, app::log::Error> {
        self.read_silently(&Store::Log)
            .map(Option::unwrap_or_default)
            .map_err(|err| app::log::Error::Unknown(err.to_string()))
    }

    fn write_entry(&self, entry: app::log::Entry) -> Result<(), app::log::Error> {
        let _guard = lock(&self.log).map_err(|err| app::log::Error::Unknown(err.to_string()))?;
        let mut entries = self.read_entries()?;
        entries.push_front(entry);
        entries.truncate(app::log::MAX_ENTRIES);
        self.write(&Store::Log, &entries)
            .map_err(|err| app::log::Error::Unknown(err.to_string()))
    }
}
