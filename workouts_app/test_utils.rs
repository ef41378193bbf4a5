#[cfg(not(tarpaulin_include))]
pub mod tests {
    use async_trait::async_trait;
    use chrono::{DateTime, Utc};
    use std::{
        collections::HashMap,
        sync::{Arc, Mutex},
    };
    use uuid::Uuid;

    use workouts_domain::models::{hour::Hour, training::Training};
    use workouts_types::{
        common::User,
        errors::{ApplicationError, DbError},
    };

    use crate::{
        context::Context,
        metrics_client::MetricsClient,
        repository::{HourRepository, TrainingRepository, UpdateFn},
        services::{TrainerService, UserService},
    };

    #[derive(Default, Clone)]
    pub struct MockHourRepository {
        hours: Arc<Mutex<HashMap<DateTime<Utc>, Hour>>>,
    }

    impl MockHourRepository {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn add_hour(&self, hour: Hour) {
            self.hours.lock().unwrap().insert(hour.time(), hour);
        }

        pub fn stored_hour(&self, time: DateTime<Utc>) -> Option<Hour> {
            self.hours.lock().unwrap().get(&time).cloned()
        }
    }

    #[async_trait]
    impl HourRepository for MockHourRepository {
        async fn get_hour(&self, time: DateTime<Utc>) -> Result<Hour, ApplicationError> {
            Ok(self
                .hours
                .lock()
                .unwrap()
                .get(&time)
                .cloned()
                .unwrap_or_else(|| Hour::from_database(time, false, false)))
        }

        async fn update_hour<'a>(
            &self,
            time: DateTime<Utc>,
            update_fn: UpdateFn<'a, Hour>,
        ) -> Result<(), ApplicationError> {
            let mut hours = self.hours.lock().unwrap();
            let current = hours
                .get(&time)
                .cloned()
                .unwrap_or_else(|| Hour::from_database(time, false, false));

            let updated = update_fn(current)?;
            hours.insert(time, updated);
            Ok(())
        }

        async fn find_hours(
            &self,
            from: DateTime<Utc>,
            to: DateTime<Utc>,
        ) -> Result<Vec<Hour>, ApplicationError> {
            let mut hours: Vec<Hour> = self
                .hours
                .lock()
                .unwrap()
                .values()
                .filter(|h| h.time() >= from && h.time() <= to)
                .cloned()
                .collect();
            hours.sort_by_key(|h| h.time());
            Ok(hours)
        }
    }

    #[derive(Default, Clone)]
    pub struct MockTrainingRepository {
        trainings: Arc<Mutex<HashMap<Uuid, Training>>>,
    }

    impl MockTrainingRepository {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn add(&self, training: Training) {
            self.trainings
                .lock()
                .unwrap()
                .insert(training.id(), training);
        }

        pub fn stored_training(&self, id: Uuid) -> Option<Training> {
            self.trainings.lock().unwrap().get(&id).cloned()
        }
    }

    #[async_trait]
    impl TrainingRepository for MockTrainingRepository {
        async fn add_training(&self, training: &Training) -> Result<(), ApplicationError> {
            let mut trainings = self.trainings.lock().unwrap();
            if trainings.contains_key(&training.id()) {
                return Err(DbError::TrainingAlreadyExists(training.id()).into());
            }
            trainings.insert(training.id(), training.clone());
            Ok(())
        }

        async fn get_training(&self, id: Uuid, user: &User) -> Result<Training, ApplicationError> {
            let training = self
                .trainings
                .lock()
                .unwrap()
                .get(&id)
                .cloned()
                .ok_or(ApplicationError::Db(DbError::TrainingNotFound(id)))?;

            training.can_user_see(user)?;
            Ok(training)
        }

        async fn update_training<'a>(
            &self,
            id: Uuid,
            user: &User,
            update_fn: UpdateFn<'a, Training>,
        ) -> Result<(), ApplicationError> {
            let mut trainings = self.trainings.lock().unwrap();
            let current = trainings
                .get(&id)
                .cloned()
                .ok_or(ApplicationError::Db(DbError::TrainingNotFound(id)))?;
            current.can_user_see(user)?;

            let updated = update_fn(current)?;
            trainings.insert(id, updated);
            Ok(())
        }

        async fn find_trainings_for_user(
            &self,
            user_id: &str,
        ) -> Result<Vec<Training>, ApplicationError> {
            let mut trainings: Vec<Training> = self
                .trainings
                .lock()
                .unwrap()
                .values()
                .filter(|t| t.user_id() == user_id && !t.is_cancelled())
                .cloned()
                .collect();
            trainings.sort_by_key(|t| t.time());
            Ok(trainings)
        }

        async fn all_trainings(&self) -> Result<Vec<Training>, ApplicationError> {
            let mut trainings: Vec<Training> = self
                .trainings
                .lock()
                .unwrap()
                .values()
                .filter(|t| !t.is_cancelled())
                .cloned()
                .collect();
            trainings.sort_by_key(|t| t.time());
            Ok(trainings)
        }
    }

    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct BalanceUpdate {
        pub user_id: String,
        pub amount_change: i32,
    }

    #[derive(Default, Clone)]
    pub struct MockUserService {
        balance_updates: Arc<Mutex<Vec<BalanceUpdate>>>,
        fail: bool,
    }

    impl MockUserService {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn failing() -> Self {
            Self {
                fail: true,
                ..Default::default()
            }
        }

        pub fn balance_updates(&self) -> Vec<BalanceUpdate> {
            self.balance_updates.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl UserService for MockUserService {
        async fn update_training_balance(
            &self,
            _ctx: &Context,
            user_id: &str,
            amount_change: i32,
        ) -> Result<(), ApplicationError> {
            if self.fail {
                return Err(ApplicationError::Service {
                    service: "users",
                    message: "unavailable".to_string(),
                });
            }

            self.balance_updates.lock().unwrap().push(BalanceUpdate {
                user_id: user_id.to_string(),
                amount_change,
            });
            Ok(())
        }
    }

    #[derive(Default, Clone)]
    pub struct MockTrainerService {
        scheduled: Arc<Mutex<Vec<DateTime<Utc>>>>,
        cancelled: Arc<Mutex<Vec<DateTime<Utc>>>>,
        moved: Arc<Mutex<Vec<(DateTime<Utc>, DateTime<Utc>)>>>,
        fail: bool,
    }

    impl MockTrainerService {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn failing() -> Self {
            Self {
                fail: true,
                ..Default::default()
            }
        }

        pub fn scheduled(&self) -> Vec<DateTime<Utc>> {
            self.scheduled.lock().unwrap().clone()
        }

        pub fn cancelled(&self) -> Vec<DateTime<Utc>> {
            self.cancelled.lock().unwrap().clone()
        }

        pub fn moved(&self) -> Vec<(DateTime<Utc>, DateTime<Utc>)> {
            self.moved.lock().unwrap().clone()
        }

        fn check(&self) -> Result<(), ApplicationError> {
            if self.fail {
                return Err(ApplicationError::Service {
                    service: "trainer",
                    message: "unavailable".to_string(),
                });
            }
            Ok(())
        }
    }

    #[async_trait]
    impl TrainerService for MockTrainerService {
        async fn schedule_training(
            &self,
            _ctx: &Context,
            training_time: DateTime<Utc>,
        ) -> Result<(), ApplicationError> {
            self.check()?;
            self.scheduled.lock().unwrap().push(training_time);
            Ok(())
        }

        async fn cancel_training(
            &self,
            _ctx: &Context,
            training_time: DateTime<Utc>,
        ) -> Result<(), ApplicationError> {
            self.check()?;
            self.cancelled.lock().unwrap().push(training_time);
            Ok(())
        }

        async fn move_training(
            &self,
            _ctx: &Context,
            new_time: DateTime<Utc>,
            original_training_time: DateTime<Utc>,
        ) -> Result<(), ApplicationError> {
            self.check()?;
            self.moved
                .lock()
                .unwrap()
                .push((new_time, original_training_time));
            Ok(())
        }
    }

    /// Metrics sink keeping every sample in memory.
    #[derive(Default)]
    pub struct InMemoryMetrics {
        counters: Mutex<HashMap<String, u64>>,
        histograms: Mutex<HashMap<String, Vec<f64>>>,
    }

    impl InMemoryMetrics {
        pub fn counter(&self, name: &str) -> u64 {
            self.counters
                .lock()
                .unwrap()
                .get(name)
                .copied()
                .unwrap_or_default()
        }

        pub fn histogram_samples(&self, name: &str) -> usize {
            self.histograms
                .lock()
                .unwrap()
                .get(name)
                .map(Vec::len)
                .unwrap_or_default()
        }
    }

    impl MetricsClient for InMemoryMetrics {
        fn increment_counter(&self, name: &str, _tags: &[(&str, &str)], delta: u64) {
            *self
                .counters
                .lock()
                .unwrap()
                .entry(name.to_string())
                .or_default() += delta;
        }

        fn record_histogram(&self, name: &str, _tags: &[(&str, &str)], value: f64) {
            self.histograms
                .lock()
                .unwrap()
                .entry(name.to_string())
                .or_default()
                .push(value);
        }
    }
}
