use chrono::{DateTime, Utc};
use dashmap::DashMap;
use std::sync::Arc;
use tokio::sync::Mutex;

use workouts_app::repository::{HourRepository, UpdateFn};
use workouts_domain::models::hour::{Hour, HourFactory};
use workouts_types::errors::ApplicationError;

type HourCell = Arc<Mutex<Option<Hour>>>;

/// Hours kept in memory. Each slot has its own lock, so updates of the same
/// hour are serialized while different hours proceed in parallel.
pub struct InMemoryHourRepository {
    hours: DashMap<DateTime<Utc>, HourCell>,
    factory: HourFactory,
}

impl InMemoryHourRepository {
    pub fn new(factory: HourFactory) -> Self {
        Self {
            hours: DashMap::new(),
            factory,
        }
    }

    fn cell(&self, time: DateTime<Utc>) -> HourCell {
        self.hours.entry(time).or_default().value().clone()
    }

    fn existing_cell(&self, time: DateTime<Utc>) -> Option<HourCell> {
        self.hours.get(&time).map(|cell| cell.value().clone())
    }

    fn default_hour(&self, time: DateTime<Utc>) -> Result<Hour, ApplicationError> {
        Ok(self.factory.new_not_available_hour(time)?)
    }
}

#[async_trait::async_trait]
impl HourRepository for InMemoryHourRepository {
    async fn get_hour(&self, time: DateTime<Utc>) -> Result<Hour, ApplicationError> {
        if let Some(cell) = self.existing_cell(time) {
            if let Some(hour) = cell.lock().await.as_ref() {
                return Ok(hour.clone());
            }
        }

        self.default_hour(time)
    }

    async fn update_hour<'a>(
        &self,
        time: DateTime<Utc>,
        update_fn: UpdateFn<'a, Hour>,
    ) -> Result<(), ApplicationError> {
        let cell = match self.existing_cell(time) {
            Some(cell) => cell,
            None => {
                // rejected times must not leave an empty slot behind
                self.factory.validate_time(time)?;
                self.cell(time)
            }
        };
        let mut stored = cell.lock().await;

        let current = match stored.as_ref() {
            Some(hour) => hour.clone(),
            None => self.default_hour(time)?,
        };

        let updated = update_fn(current)?;
        *stored = Some(updated);

        tracing::debug!(hour = %time, "hour updated");
        Ok(())
    }

    async fn find_hours(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<Hour>, ApplicationError> {
        let cells: Vec<HourCell> = self
            .hours
            .iter()
            .filter(|entry| *entry.key() >= from && *entry.key() <= to)
            .map(|entry| entry.value().clone())
            .collect();

        let mut hours = Vec::with_capacity(cells.len());
        for cell in cells {
            if let Some(hour) = cell.lock().await.as_ref() {
                hours.push(hour.clone());
            }
        }

        hours.sort_by_key(|h| h.time());
        Ok(hours)
    }
}
