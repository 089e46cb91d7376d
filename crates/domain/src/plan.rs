use crate::{DeleteError, ExerciseVariant, MachineID, Name, ReadError, UpdateError};

#[allow(async_fn_in_trait)]
pub trait PlanRepository {
    async fn read_plans(&self) -> Result<Vec<Plan>, ReadError>;
    async fn save_plan(&self, plan: Plan) -> Result<Plan, UpdateError>;
    /// Remove a plan together with all of its planned exercises.
    async fn delete_plan(&self, id: PlanID) -> Result<PlanID, DeleteError>;
}

#[allow(async_fn_in_trait)]
pub trait PlanService {
    /// All stored plans ordered by name.
    async fn get_plans(&self) -> Result<Vec<Plan>, ReadError>;
    async fn get_plan(&self, id: PlanID) -> Result<Option<Plan>, ReadError> {
        Ok(self.get_plans().await?.into_iter().find(|p| p.id == id))
    }
    async fn save_plan(&self, plan: Plan) -> Result<Plan, UpdateError>;
    async fn delete_plan(&self, id: PlanID) -> Result<PlanID, DeleteError>;
}

/// Named, ordered template of exercises a workout can be started from.
#[derive(Debug, Clone, PartialEq)]
pub struct Plan {
    pub id: PlanID,
    pub name: Name,
    pub exercises: Vec<PlannedExercise>,
}

impl Plan {
    #[must_use]
    pub fn new(id: PlanID, name: Name) -> Self {
        Self {
            id,
            name,
            exercises: vec![],
        }
    }

    pub fn append(&mut self, id: PlannedExerciseID, variant: ExerciseVariant) -> &PlannedExercise {
        self.exercises.push(PlannedExercise { id, variant });
        &self.exercises[self.exercises.len() - 1]
    }

    /// Remove the exercise at the given position. Subsequent exercises move up by one.
    pub fn remove(&mut self, position: usize) -> Option<PlannedExercise> {
        if position < self.exercises.len() {
            Some(self.exercises.remove(position))
        } else {
            None
        }
    }

    /// Swap the exercise with its predecessor. Returns false if nothing was moved.
    pub fn move_up(&mut self, position: usize) -> bool {
        if position == 0 || position >= self.exercises.len() {
            return false;
        }
        self.exercises.swap(position - 1, position);
        true
    }

    /// Swap the exercise with its successor. Returns false if nothing was moved.
    pub fn move_down(&mut self, position: usize) -> bool {
        if position + 1 >= self.exercises.len() {
            return false;
        }
        self.exercises.swap(position, position + 1);
        true
    }

    pub fn machines(&self) -> impl Iterator<Item = &MachineID> {
        self.exercises.iter().map(|e| &e.variant.machine_id)
    }
}

id_type!(PlanID);

#[derive(Debug, Clone, PartialEq)]
pub struct PlannedExercise {
    pub id: PlannedExerciseID,
    pub variant: ExerciseVariant,
}

impl PlannedExercise {
    #[must_use]
    pub fn label(&self) -> String {
        self.variant.label()
    }
}

id_type!(PlannedExerciseID);
