//! Shared fixtures for reservation service tests.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, TimeDelta, Utc};

use tablehub_core::config::BookingConfig;
use tablehub_core::result::AppResult;
use tablehub_core::types::{PageRequest, PageResponse, ReservationId, UserId};
use tablehub_database::repositories::MemoryReservationRepository;
use tablehub_database::{InsertError, ReservationFilter, ReservationStore};
use tablehub_entity::reservation::{
    BookingWindow, NewReservation, RecordChange, Reservation, ReservationStats,
    ReservationStatus,
};
use tablehub_entity::user::UserRole;

use super::input::CreateReservation;
use super::number::{RandomNumberGenerator, ReservationNumberGenerator};
use super::service::ReservationService;
use crate::context::RequestContext;

pub(crate) fn store() -> Arc<MemoryReservationRepository> {
    Arc::new(MemoryReservationRepository::new())
}

/// `days_ahead` days from today at `hour:minute` UTC.
pub(crate) fn evening(days_ahead: i64, hour: u32, minute: u32) -> DateTime<Utc> {
    (Utc::now().date_naive() + TimeDelta::days(days_ahead))
        .and_hms_opt(hour, minute, 0)
        .expect("valid time")
        .and_utc()
}

/// Insert a pending reservation directly, bypassing the service.
pub(crate) async fn seed(
    store: &Arc<MemoryReservationRepository>,
    restaurant_id: &str,
    table_number: i32,
    date: DateTime<Utc>,
) -> Reservation {
    store
        .insert(NewReservation {
            reservation_number: RandomNumberGenerator.generate(),
            restaurant_id: restaurant_id.to_string(),
            restaurant_name: None,
            user_id: UserId::new(),
            date,
            guest_count: 2,
            table_number,
            special_requests: None,
            contact_phone: None,
            contact_name: None,
        })
        .await
        .expect("seed insert")
}

pub(crate) fn service(store: Arc<MemoryReservationRepository>) -> ReservationService {
    ReservationService::new(store, BookingConfig::default())
}

pub(crate) fn guest() -> RequestContext {
    RequestContext::new(UserId::new(), UserRole::Customer, None)
}

pub(crate) fn staff() -> RequestContext {
    RequestContext::new(UserId::new(), UserRole::Staff, None)
}

pub(crate) fn booking(restaurant_id: &str, table_number: i32, date: DateTime<Utc>) -> CreateReservation {
    CreateReservation {
        restaurant_id: restaurant_id.to_string(),
        restaurant_name: Some("Sakura".to_string()),
        date,
        guest_count: 4,
        table_number,
        special_requests: None,
        contact_phone: Some(" +7 900 000 00 00 ".to_string()),
        contact_name: Some("Anna".to_string()),
    }
}

/// What another writer does to a record just before our write lands.
#[derive(Debug, Clone, Copy)]
pub(crate) enum Interference {
    Complete,
    Confirm,
    Purge,
}

/// Memory store where a competing writer always gets to a record first.
#[derive(Debug)]
pub(crate) struct RacingStore {
    pub(crate) inner: Arc<MemoryReservationRepository>,
    pub(crate) interference: Interference,
}

#[async_trait]
impl ReservationStore for RacingStore {
    async fn insert(&self, data: NewReservation) -> Result<Reservation, InsertError> {
        self.inner.insert(data).await
    }

    async fn find_by_id(&self, id: ReservationId) -> AppResult<Option<Reservation>> {
        self.inner.find_by_id(id).await
    }

    async fn find_by_number(&self, number: &str) -> AppResult<Option<Reservation>> {
        self.inner.find_by_number(number).await
    }

    async fn find_page(
        &self,
        filter: &ReservationFilter,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Reservation>> {
        self.inner.find_page(filter, page).await
    }

    async fn find_live_in_window(
        &self,
        restaurant_id: &str,
        table_number: Option<i32>,
        window: &BookingWindow,
    ) -> AppResult<Vec<Reservation>> {
        self.inner
            .find_live_in_window(restaurant_id, table_number, window)
            .await
    }

    async fn apply_change(
        &self,
        id: ReservationId,
        expected: ReservationStatus,
        change: &RecordChange,
    ) -> AppResult<Option<Reservation>> {
        match self.interference {
            Interference::Complete => {
                self.inner
                    .apply_change(id, expected, &RecordChange::status(ReservationStatus::Completed))
                    .await?;
            }
            Interference::Confirm => {
                self.inner
                    .apply_change(id, expected, &RecordChange::status(ReservationStatus::Confirmed))
                    .await?;
            }
            Interference::Purge => {
                self.inner.delete(id).await?;
            }
        }
        self.inner.apply_change(id, expected, change).await
    }

    async fn delete(&self, id: ReservationId) -> AppResult<bool> {
        self.inner.delete(id).await
    }

    async fn stats(&self, created_since: DateTime<Utc>) -> AppResult<ReservationStats> {
        self.inner.stats(created_since).await
    }

    async fn health_check(&self) -> AppResult<bool> {
        self.inner.health_check().await
    }
}
