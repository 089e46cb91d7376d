use log::{debug, error};

use crate::{
    DeleteError, E1RMFormula, MachineID, Plan, PlanID, PlanRepository, PlanService,
    ProgressEntry, ReadError, UpdateError, Workout, WorkoutID, WorkoutRepository, WorkoutService,
    get_exercise_progress_metrics,
};

pub struct Service<R> {
    repository: R,
}

impl<R> Service<R> {
    pub fn new(repository: R) -> Self {
        Self { repository }
    }
}

macro_rules! log_on_error {
    ($func: expr, $error: ident, $action: literal, $entity: literal) => {{
        let result = $func.await;
        match result {
            Ok(_) => {}
            Err(ref err) => match err {
                $error::Storage(crate::StorageError::NoConnection) => {
                    debug!("failed to {} {}: {err}", $action, $entity);
                }
                _ => {
                    error!("failed to {} {}: {err}", $action, $entity);
                }
            },
        }
        result
    }};
}

impl<R: WorkoutRepository> WorkoutService for Service<R> {
    async fn get_workouts(&self) -> Result<Vec<Workout>, ReadError> {
        let mut workouts = log_on_error!(
            self.repository.read_workouts(),
            ReadError,
            "get",
            "workouts"
        )?;
        workouts.sort_by(|a, b| (a.date, a.start_time).cmp(&(b.date, b.start_time)));
        Ok(workouts)
    }

    async fn save_workout(&self, workout: Workout) -> Result<Workout, UpdateError> {
        log_on_error!(
            self.repository.save_workout(workout),
            UpdateError,
            "save",
            "workout"
        )
    }

    async fn delete_workout(&self, id: WorkoutID) -> Result<WorkoutID, DeleteError> {
        log_on_error!(
            self.repository.delete_workout(id),
            DeleteError,
            "delete",
            "workout"
        )
    }

    async fn get_exercise_progress(
        &self,
        machine_id: &MachineID,
        formula: E1RMFormula,
    ) -> Result<Vec<ProgressEntry>, ReadError> {
        let workouts = self.get_workouts().await?;
        Ok(get_exercise_progress_metrics(&workouts, machine_id, formula).collect())
    }
}

impl<R: PlanRepository> PlanService for Service<R> {
    async fn get_plans(&self) -> Result<Vec<Plan>, ReadError> {
        let mut plans = log_on_error!(self.repository.read_plans(), ReadError, "get", "plans")?;
        plans.sort_by_key(|p| p.name.as_str().to_lowercase());
        Ok(plans)
    }

    async fn save_plan(&self, plan: Plan) -> Result<Plan, UpdateError> {
        log_on_error!(self.repository.save_plan(plan), UpdateError, "save", "plan")
    }

    async fn delete_plan(&self, id: PlanID) -> Result<PlanID, DeleteError> {
        log_on_error!(
            self.repository.delete_plan(id),
            DeleteError,
            "delete",
            "plan"
        )
    }
}
