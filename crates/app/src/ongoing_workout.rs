use chrono::{DateTime, Duration, Utc};
use liftbook_domain::{ReadError, UpdateError, WorkoutID};

#[allow(async_fn_in_trait)]
pub trait OngoingWorkoutService {
    async fn get_ongoing_workout(&self) -> Result<Option<OngoingWorkout>, ReadError>;
    async fn set_ongoing_workout(
        &self,
        ongoing_workout: Option<OngoingWorkout>,
    ) -> Result<(), UpdateError>;
}

#[allow(async_fn_in_trait)]
pub trait OngoingWorkoutRepository {
    async fn read_ongoing_workout(&self) -> Result<Option<OngoingWorkout>, ReadError>;
    async fn write_ongoing_workout(
        &self,
        ongoing_workout: Option<OngoingWorkout>,
    ) -> Result<(), UpdateError>;
}

/// Workout which is currently being logged.
#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq)]
pub struct OngoingWorkout {
    pub workout_id: u128,
    pub start_time: DateTime<Utc>,
    pub exercise_idx: usize,
    pub timer_state: TimerState,
}

impl OngoingWorkout {
    #[must_use]
    pub fn new(workout_id: WorkoutID, start_time: DateTime<Utc>) -> Self {
        Self {
            workout_id: workout_id.as_u128(),
            start_time,
            exercise_idx: 0,
            timer_state: TimerState::Unset,
        }
    }

    #[must_use]
    pub fn workout_id(&self) -> WorkoutID {
        WorkoutID::from(self.workout_id)
    }

    /// Move to the next exercise and reset the rest timer.
    pub fn next_exercise(&mut self) {
        self.exercise_idx += 1;
        self.timer_state = TimerState::Unset;
    }
}

/// Rest timer between two sets.
#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, Copy, PartialEq)]
pub enum TimerState {
    Unset,
    Active { target_time: DateTime<Utc> },
    /// Remaining milliseconds.
    Paused { time: i64 },
}

impl TimerState {
    #[must_use]
    pub fn start(rest_period: u32, now: DateTime<Utc>) -> Self {
        TimerState::Active {
            target_time: now + Duration::seconds(i64::from(rest_period)),
        }
    }

    #[must_use]
    pub fn pause(self, now: DateTime<Utc>) -> Self {
        match self {
            TimerState::Active { target_time } => TimerState::Paused {
                time: (target_time - now).num_milliseconds(),
            },
            TimerState::Unset | TimerState::Paused { .. } => self,
        }
    }

    #[must_use]
    pub fn resume(self, now: DateTime<Utc>) -> Self {
        match self {
            TimerState::Paused { time } => TimerState::Active {
                target_time: now + Duration::milliseconds(time),
            },
            TimerState::Unset | TimerState::Active { .. } => self,
        }
    }

    /// Remaining rest time in whole seconds, negative once the rest period is exceeded.
    #[must_use]
    pub fn remaining(&self, now: DateTime<Utc>) -> Option<i64> {
        match self {
            TimerState::Unset => None,
            TimerState::Active { target_time } => Some((*target_time - now).num_seconds()),
            TimerState::Paused { time } => Some(time / 1000),
        }
    }
}
