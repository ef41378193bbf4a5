use dashmap::{DashMap, mapref::entry::Entry};
use std::sync::Arc;
use tokio::sync::Mutex;
use uuid::Uuid;

use workouts_app::repository::{TrainingRepository, UpdateFn};
use workouts_domain::models::training::Training;
use workouts_types::{
    common::User,
    errors::{ApplicationError, DbError},
};

type TrainingCell = Arc<Mutex<Training>>;

#[derive(Default)]
pub struct InMemoryTrainingRepository {
    trainings: DashMap<Uuid, TrainingCell>,
}

impl InMemoryTrainingRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn cell(&self, id: Uuid) -> Result<TrainingCell, ApplicationError> {
        self.trainings
            .get(&id)
            .map(|cell| cell.value().clone())
            .ok_or(ApplicationError::Db(DbError::TrainingNotFound(id)))
    }

    async fn scheduled<P>(&self, predicate: P) -> Vec<Training>
    where
        P: Fn(&Training) -> bool,
    {
        let cells: Vec<TrainingCell> = self
            .trainings
            .iter()
            .map(|entry| entry.value().clone())
            .collect();

        let mut trainings = Vec::new();
        for cell in cells {
            let training = cell.lock().await;
            if !training.is_cancelled() && predicate(&training) {
                trainings.push(training.clone());
            }
        }

        trainings.sort_by_key(|t| t.time());
        trainings
    }
}

#[async_trait::async_trait]
impl TrainingRepository for InMemoryTrainingRepository {
    async fn add_training(&self, training: &Training) -> Result<(), ApplicationError> {
        match self.trainings.entry(training.id()) {
            Entry::Occupied(_) => Err(DbError::TrainingAlreadyExists(training.id()).into()),
            Entry::Vacant(entry) => {
                entry.insert(Arc::new(Mutex::new(training.clone())));
                Ok(())
            }
        }
    }

    async fn get_training(&self, id: Uuid, user: &User) -> Result<Training, ApplicationError> {
        let cell = self.cell(id)?;
        let training = cell.lock().await.clone();

        training.can_user_see(user)?;
        Ok(training)
    }

    async fn update_training<'a>(
        &self,
        id: Uuid,
        user: &User,
        update_fn: UpdateFn<'a, Training>,
    ) -> Result<(), ApplicationError> {
        let cell = self.cell(id)?;
        let mut stored = cell.lock().await;
        stored.can_user_see(user)?;

        let updated = update_fn(stored.clone())?;
        *stored = updated;

        tracing::debug!(training_id = %id, "training updated");
        Ok(())
    }

    async fn find_trainings_for_user(
        &self,
        user_id: &str,
    ) -> Result<Vec<Training>, ApplicationError> {
        Ok(self.scheduled(|t| t.user_id() == user_id).await)
    }

    async fn all_trainings(&self) -> Result<Vec<Training>, ApplicationError> {
        Ok(self.scheduled(|_| true).await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};
    use workouts_domain::test_utils::{
        TrainingFactoryOptions, attendee, relative_date, trainer, training_factory,
    };
    use workouts_types::errors::DomainError;

    fn training_of(user_id: &str, days: i64) -> Training {
        training_factory(TrainingFactoryOptions {
            user_id: Some(user_id.to_string()),
            time: Some(relative_date(days, 13)),
            ..Default::default()
        })
    }

    #[tokio::test]
    async fn test_add_and_get() -> Result<(), ApplicationError> {
        let repo = InMemoryTrainingRepository::new();
        let training = training_of("attendee-1", 3);

        repo.add_training(&training).await?;

        assert_eq!(
            repo.get_training(training.id(), &attendee("attendee-1")).await?,
            training
        );
        assert_eq!(
            repo.get_training(training.id(), &trainer("trainer-1")).await?,
            training
        );

        let result = repo.add_training(&training).await;
        assert!(matches!(
            result,
            Err(ApplicationError::Db(DbError::TrainingAlreadyExists(_)))
        ));
        Ok(())
    }

    #[tokio::test]
    async fn test_get_by_other_attendee() -> Result<(), ApplicationError> {
        let repo = InMemoryTrainingRepository::new();
        let training = training_of("attendee-1", 3);
        repo.add_training(&training).await?;

        let result = repo
            .get_training(training.id(), &attendee("attendee-2"))
            .await;

        assert!(matches!(
            result,
            Err(ApplicationError::Domain(DomainError::ForbiddenToSeeTraining { .. }))
        ));
        Ok(())
    }

    #[tokio::test]
    async fn test_update_missing_training_skips_update_fn() {
        let repo = InMemoryTrainingRepository::new();
        let called = AtomicBool::new(false);

        let result = repo
            .update_training(
                Uuid::new_v4(),
                &trainer("trainer-1"),
                Box::new(|training: Training| -> Result<Training, ApplicationError> {
                    called.store(true, Ordering::SeqCst);
                    Ok(training)
                }),
            )
            .await;

        assert!(matches!(
            result,
            Err(ApplicationError::Db(DbError::TrainingNotFound(_)))
        ));
        assert!(!called.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn test_concurrent_cancellations() -> Result<(), ApplicationError> {
        let repo = Arc::new(InMemoryTrainingRepository::new());
        let training = training_of("attendee-1", 3);
        repo.add_training(&training).await?;

        let attempts = (0..10).map(|_| {
            let repo = repo.clone();
            let id = training.id();
            tokio::spawn(async move {
                let user = attendee("attendee-1");
                repo.update_training(
                    id,
                    &user,
                    Box::new(|mut training: Training| -> Result<Training, ApplicationError> {
                        training.cancel(&user)?;
                        Ok(training)
                    }),
                )
                .await
            })
        });

        let results: Vec<_> = futures::future::join_all(attempts)
            .await
            .into_iter()
            .map(|r| r.unwrap())
            .collect();

        let successes = results.iter().filter(|r| r.is_ok()).count();
        let already_cancelled = results
            .iter()
            .filter(|r| {
                matches!(
                    r,
                    Err(ApplicationError::Domain(DomainError::TrainingAlreadyCancelled(_)))
                )
            })
            .count();

        assert_eq!(successes, 1);
        assert_eq!(already_cancelled, 9);
        Ok(())
    }

    #[tokio::test]
    async fn test_concurrent_note_updates_are_not_lost() -> Result<(), ApplicationError> {
        let repo = Arc::new(InMemoryTrainingRepository::new());
        let training = training_of("attendee-1", 3);
        repo.add_training(&training).await?;

        let writers = (0..25).map(|i| {
            let repo = repo.clone();
            let id = training.id();
            tokio::spawn(async move {
                repo.update_training(
                    id,
                    &trainer("trainer-1"),
                    Box::new(move |mut training: Training| -> Result<Training, ApplicationError> {
                        let notes = format!("{}{}", training.notes(), i % 10);
                        training.update_notes(notes)?;
                        Ok(training)
                    }),
                )
                .await
            })
        });

        for result in futures::future::join_all(writers).await {
            result.unwrap()?;
        }

        let stored = repo
            .get_training(training.id(), &trainer("trainer-1"))
            .await?;
        assert_eq!(stored.notes().len(), 25);
        Ok(())
    }

    #[tokio::test]
    async fn test_listings_skip_cancelled() -> Result<(), ApplicationError> {
        let repo = InMemoryTrainingRepository::new();
        let later = training_of("attendee-1", 5);
        let sooner = training_of("attendee-1", 2);
        let other = training_of("attendee-2", 3);
        let cancelled = training_factory(TrainingFactoryOptions {
            user_id: Some("attendee-1".to_string()),
            cancelled: Some(true),
            ..Default::default()
        });
        for training in [&later, &sooner, &other, &cancelled] {
            repo.add_training(training).await?;
        }

        let mine: Vec<_> = repo
            .find_trainings_for_user("attendee-1")
            .await?
            .iter()
            .map(Training::id)
            .collect();
        assert_eq!(mine, vec![sooner.id(), later.id()]);

        let all: Vec<_> = repo.all_trainings().await?.iter().map(Training::id).collect();
        assert_eq!(all, vec![sooner.id(), other.id(), later.id()]);
        Ok(())
    }
}
