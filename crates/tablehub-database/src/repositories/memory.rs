//! In-memory reservation repository using a Tokio mutex for single-node
//! deployments and tests.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::Mutex;
use tracing::debug;

use tablehub_core::result::AppResult;
use tablehub_core::types::{PageRequest, PageResponse, ReservationId};
use tablehub_entity::reservation::{
    BookingWindow, NewReservation, RecordChange, Reservation, ReservationStats, ReservationStatus,
};

use crate::store::{InsertError, ReservationFilter, ReservationStore};

/// Internal state for the memory-based store.
#[derive(Debug, Default)]
struct InnerState {
    /// Records keyed by id.
    records: HashMap<ReservationId, Reservation>,
    /// Reservation number index.
    numbers: HashMap<String, ReservationId>,
    /// Records per `(restaurant_id, table_number)`.
    tables: HashMap<(String, i32), Vec<ReservationId>>,
}

impl InnerState {
    fn on_table<'a>(
        &'a self,
        restaurant_id: &str,
        table_number: i32,
    ) -> impl Iterator<Item = &'a Reservation> + 'a {
        self.tables
            .get(&(restaurant_id.to_string(), table_number))
            .into_iter()
            .flatten()
            .filter_map(|id| self.records.get(id))
    }
}

/// In-memory reservation store.
///
/// Constraint checks and the write happen under one lock, which gives the
/// same atomicity as the PostgreSQL constraints. Not durable.
#[derive(Debug, Clone, Default)]
pub struct MemoryReservationRepository {
    /// Protected inner state.
    state: Arc<Mutex<InnerState>>,
}

impl MemoryReservationRepository {
    /// Creates a new, empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of records held (any status).
    pub async fn len(&self) -> usize {
        self.state.lock().await.records.len()
    }

    /// Whether the store holds no records.
    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    /// Overwrite `created_at` of a record. Lets tests place records in the past.
    pub async fn backdate(&self, id: ReservationId, created_at: DateTime<Utc>) -> bool {
        let mut state = self.state.lock().await;
        match state.records.get_mut(&id) {
            Some(record) => {
                record.created_at = created_at;
                true
            }
            None => false,
        }
    }
}

#[async_trait]
impl ReservationStore for MemoryReservationRepository {
    async fn insert(&self, data: NewReservation) -> Result<Reservation, InsertError> {
        let mut state = self.state.lock().await;

        if state.numbers.contains_key(&data.reservation_number) {
            return Err(InsertError::DuplicateNumber(data.reservation_number));
        }

        let window = BookingWindow::around(data.date)?;
        if state
            .on_table(&data.restaurant_id, data.table_number)
            .any(|r| r.occupies(&data.restaurant_id, data.table_number, &window))
        {
            return Err(InsertError::BookingConflict);
        }

        let now = Utc::now();
        let record = Reservation {
            id: ReservationId::new(),
            reservation_number: data.reservation_number,
            restaurant_id: data.restaurant_id,
            restaurant_name: data.restaurant_name,
            user_id: data.user_id,
            date: data.date,
            guest_count: data.guest_count,
            table_number: data.table_number,
            status: ReservationStatus::Pending,
            special_requests: data.special_requests,
            contact_phone: data.contact_phone,
            contact_name: data.contact_name,
            created_at: now,
            updated_at: now,
        };

        state
            .numbers
            .insert(record.reservation_number.clone(), record.id);
        state
            .tables
            .entry((record.restaurant_id.clone(), record.table_number))
            .or_default()
            .push(record.id);
        state.records.insert(record.id, record.clone());
        debug!(reservation_id = %record.id, total = state.records.len(), "Reservation stored");

        Ok(record)
    }

    async fn find_by_id(&self, id: ReservationId) -> AppResult<Option<Reservation>> {
        Ok(self.state.lock().await.records.get(&id).cloned())
    }

    async fn find_by_number(&self, number: &str) -> AppResult<Option<Reservation>> {
        let state = self.state.lock().await;
        Ok(state
            .numbers
            .get(number)
            .and_then(|id| state.records.get(id))
            .cloned())
    }

    async fn find_page(
        &self,
        filter: &ReservationFilter,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Reservation>> {
        let state = self.state.lock().await;
        let mut matching: Vec<&Reservation> = state
            .records
            .values()
            .filter(|r| filter.matches(r))
            .collect();
        matching.sort_by(|a, b| {
            b.date
                .cmp(&a.date)
                .then_with(|| b.created_at.cmp(&a.created_at))
        });

        let total = matching.len() as u64;
        let items = matching
            .into_iter()
            .skip(page.offset() as usize)
            .take(page.limit() as usize)
            .cloned()
            .collect();

        Ok(PageResponse::new(items, *page, total))
    }

    async fn find_live_in_window(
        &self,
        restaurant_id: &str,
        table_number: Option<i32>,
        window: &BookingWindow,
    ) -> AppResult<Vec<Reservation>> {
        let state = self.state.lock().await;
        let live_in_window =
            |r: &&Reservation| r.status.is_live() && window.contains(r.date);
        let mut found: Vec<Reservation> = match table_number {
            Some(table) => state
                .on_table(restaurant_id, table)
                .filter(live_in_window)
                .cloned()
                .collect(),
            None => state
                .records
                .values()
                .filter(|r| r.restaurant_id == restaurant_id)
                .filter(live_in_window)
                .cloned()
                .collect(),
        };
        found.sort_by_key(|r| (r.table_number, r.date));
        Ok(found)
    }

    async fn apply_change(
        &self,
        id: ReservationId,
        expected: ReservationStatus,
        change: &RecordChange,
    ) -> AppResult<Option<Reservation>> {
        let mut state = self.state.lock().await;
        let Some(record) = state.records.get_mut(&id) else {
            return Ok(None);
        };
        if record.status != expected {
            return Ok(None);
        }

        if let Some(status) = change.status {
            record.status = status;
        }
        change.fields.apply_to(record);
        record.updated_at = Utc::now();

        Ok(Some(record.clone()))
    }

    async fn delete(&self, id: ReservationId) -> AppResult<bool> {
        let mut state = self.state.lock().await;
        match state.records.remove(&id) {
            Some(record) => {
                state.numbers.remove(&record.reservation_number);
                if let Some(ids) = state
                    .tables
                    .get_mut(&(record.restaurant_id, record.table_number))
                {
                    ids.retain(|other| *other != id);
                }
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn stats(&self, created_since: DateTime<Utc>) -> AppResult<ReservationStats> {
        let state = self.state.lock().await;
        let mut stats = ReservationStats::default();
        for record in state.records.values() {
            stats.total += 1;
            match record.status {
                ReservationStatus::Pending => stats.pending += 1,
                ReservationStatus::Confirmed => stats.confirmed += 1,
                ReservationStatus::Completed => stats.completed += 1,
                ReservationStatus::Cancelled => stats.cancelled += 1,
            }
            if record.created_at >= created_since {
                stats.recent += 1;
            }
        }
        Ok(stats)
    }

    async fn health_check(&self) -> AppResult<bool> {
        Ok(true)
    }
}
