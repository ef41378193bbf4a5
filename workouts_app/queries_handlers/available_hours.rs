use async_trait::async_trait;
use chrono::{Duration, NaiveDate, NaiveTime, Utc};
use std::{collections::HashMap, sync::Arc};

use workouts_domain::models::hour::{Hour, HourFactoryConfig};
use workouts_types::errors::{ApplicationError, ValidationError};

use crate::{
    context::Context,
    cqrs::{
        Query, QueryHandler,
        queries::{AvailableHours, Date, HourView},
    },
    repository::HourRepository,
};

/// Longest range, in days, a single calendar query may span.
pub const MAX_CALENDAR_DAYS: i64 = 100;

pub struct AvailableHoursHandler {
    hour_repo: Arc<dyn HourRepository>,
    config: HourFactoryConfig,
}

impl AvailableHoursHandler {
    pub fn new(hour_repo: Arc<dyn HourRepository>, config: HourFactoryConfig) -> Self {
        Self { hour_repo, config }
    }

    fn working_hours(&self) -> impl Iterator<Item = u32> {
        (self.config.min_utc_hour..=self.config.max_utc_hour).filter(|h| *h < 24)
    }

    fn build_date(&self, date: NaiveDate, stored: &HashMap<chrono::DateTime<Utc>, Hour>) -> Date {
        let hours: Vec<HourView> = self
            .working_hours()
            .filter_map(|h| NaiveTime::from_hms_opt(h, 0, 0))
            .map(|time| {
                let time = date.and_time(time).and_utc();
                stored
                    .get(&time)
                    .map(HourView::from)
                    .unwrap_or(HourView {
                        hour: time,
                        available: false,
                        has_training_scheduled: false,
                    })
            })
            .collect();

        Date {
            date,
            has_free_hours: hours.iter().any(|h| h.available),
            hours,
        }
    }
}

#[async_trait]
impl QueryHandler<AvailableHours> for AvailableHoursHandler {
    async fn handle(
        &self,
        _ctx: &Context,
        query: AvailableHours,
    ) -> Result<<AvailableHours as Query>::Output, ApplicationError> {
        if query.from > query.to {
            return Err(ValidationError::DateFromAfterDateTo {
                from: query.from,
                to: query.to,
            }
            .into());
        }

        let first_day = query.from.date_naive();
        let last_day = query.to.date_naive();
        let days = (last_day - first_day).num_days() + 1;
        if days > MAX_CALENDAR_DAYS {
            return Err(ValidationError::DateRangeTooLong {
                days,
                max: MAX_CALENDAR_DAYS,
            }
            .into());
        }

        let range_end = last_day.and_time(NaiveTime::MIN).and_utc() + Duration::days(1);
        let stored: HashMap<_, _> = self
            .hour_repo
            .find_hours(first_day.and_time(NaiveTime::MIN).and_utc(), range_end)
            .await?
            .into_iter()
            .map(|hour| (hour.time(), hour))
            .collect();

        Ok(first_day
            .iter_days()
            .take_while(|day| *day <= last_day)
            .map(|day| self.build_date(day, &stored))
            .collect())
    }
}
