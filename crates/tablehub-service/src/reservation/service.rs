//! Reservation service: the owner (self-service) profile and the shared
//! core used by the staff profile.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{info, warn};

use tablehub_core::config::BookingConfig;
use tablehub_core::error::AppError;
use tablehub_core::result::AppResult;
use tablehub_core::traits::Service;
use tablehub_core::types::{PageRequest, PageResponse, ReservationId};
use tablehub_database::{InsertError, ReservationFilter, ReservationStore};
use tablehub_entity::reservation::{
    NewReservation, RecordChange, Reservation, ReservationFields, ReservationStatus, TableOption,
};

use super::availability::AvailabilityCalculator;
use super::conflict::ConflictDetector;
use super::input::{
    CreateReservation, ReservationUpdate, check_note_length, normalize_edit, normalize_text,
};
use super::lifecycle::ReservationLifecycle;
use super::number::{RandomNumberGenerator, ReservationNumberGenerator, is_well_formed};
use super::policy::{AuthorizationPolicy, OwnerPolicy};
use super::table_pool::{FixedTablePool, TablePool};
use crate::context::RequestContext;

/// Orchestrates reservation reads and writes.
///
/// The public methods are the guest profile, always scoped to the caller.
/// [`super::AdminReservationService`] reuses the same `*_with` core under a
/// staff policy, so both profiles share one detector, one availability
/// calculator, and one lifecycle.
#[derive(Debug, Clone)]
pub struct ReservationService {
    store: Arc<dyn ReservationStore>,
    numbers: Arc<dyn ReservationNumberGenerator>,
    detector: ConflictDetector,
    availability: AvailabilityCalculator,
    lifecycle: ReservationLifecycle,
    config: BookingConfig,
}

impl Service for ReservationService {}

impl ReservationService {
    /// Creates a service with the fixed table pool and random numbers.
    pub fn new(store: Arc<dyn ReservationStore>, config: BookingConfig) -> Self {
        let pool: Arc<dyn TablePool> = Arc::new(FixedTablePool::from_config(&config));
        Self::with_components(store, Arc::new(RandomNumberGenerator), pool, config)
    }

    /// Creates a service from explicit components.
    pub fn with_components(
        store: Arc<dyn ReservationStore>,
        numbers: Arc<dyn ReservationNumberGenerator>,
        pool: Arc<dyn TablePool>,
        config: BookingConfig,
    ) -> Self {
        let detector = ConflictDetector::new(Arc::clone(&store));
        let availability =
            AvailabilityCalculator::new(detector.clone(), pool, config.time_slots.clone());
        Self {
            store,
            numbers,
            detector,
            availability,
            lifecycle: ReservationLifecycle,
            config,
        }
    }

    /// Booking policy in effect.
    pub fn config(&self) -> &BookingConfig {
        &self.config
    }

    /// The underlying store.
    pub fn store(&self) -> &Arc<dyn ReservationStore> {
        &self.store
    }

    // ── Owner profile ─────────────────────────────────────────────

    /// Book a table for the caller. The new reservation is `pending`.
    pub async fn create(
        &self,
        ctx: &RequestContext,
        input: CreateReservation,
    ) -> AppResult<Reservation> {
        let restaurant_id = input.restaurant_id.trim().to_string();
        if restaurant_id.is_empty() {
            return Err(AppError::validation("Restaurant is required"));
        }
        self.check_guest_count(input.guest_count)?;
        if !self
            .availability
            .pool()
            .contains(&restaurant_id, input.table_number)
        {
            return Err(AppError::validation(format!(
                "Table {} does not exist at this restaurant",
                input.table_number
            )));
        }
        if input.date < Utc::now() {
            return Err(AppError::validation("Reservation date cannot be in the past"));
        }
        let special_requests = normalize_text(input.special_requests);
        check_note_length(
            special_requests.as_deref(),
            self.config.special_requests_max_len,
        )?;

        if self
            .detector
            .has_conflict(&restaurant_id, input.table_number, input.date)
            .await?
        {
            return Err(table_taken());
        }

        let template = NewReservation {
            reservation_number: String::new(),
            restaurant_id,
            restaurant_name: normalize_text(input.restaurant_name),
            user_id: ctx.user_id,
            date: input.date,
            guest_count: input.guest_count,
            table_number: input.table_number,
            special_requests,
            contact_phone: normalize_text(input.contact_phone),
            contact_name: normalize_text(input.contact_name),
        };

        let record = self.insert_with_fresh_number(template).await?;
        info!(
            reservation_id = %record.id,
            reservation_number = %record.reservation_number,
            user_id = %ctx.user_id,
            restaurant_id = %record.restaurant_id,
            table_number = record.table_number,
            date = %record.date,
            "Reservation created"
        );
        Ok(record)
    }

    /// The caller's reservations, newest seating date first.
    pub async fn list_mine(
        &self,
        ctx: &RequestContext,
        status: Option<ReservationStatus>,
        page: PageRequest,
    ) -> AppResult<PageResponse<Reservation>> {
        let filter = ReservationFilter {
            status,
            ..Default::default()
        };
        self.list_with(&OwnerPolicy::new(ctx.user_id), filter, page)
            .await
    }

    /// One of the caller's reservations.
    pub async fn get_mine(&self, ctx: &RequestContext, id: ReservationId) -> AppResult<Reservation> {
        self.get_with(&OwnerPolicy::new(ctx.user_id), id).await
    }

    /// One of the caller's reservations, by reservation number.
    pub async fn get_mine_by_number(
        &self,
        ctx: &RequestContext,
        number: &str,
    ) -> AppResult<Reservation> {
        self.get_by_number_with(&OwnerPolicy::new(ctx.user_id), number)
            .await
    }

    /// Change status or free-text fields of one of the caller's reservations.
    pub async fn update_mine(
        &self,
        ctx: &RequestContext,
        id: ReservationId,
        update: ReservationUpdate,
    ) -> AppResult<Reservation> {
        self.update_with(&OwnerPolicy::new(ctx.user_id), ctx, id, update)
            .await
    }

    /// Cancel one of the caller's reservations, optionally recording why.
    pub async fn cancel_mine(
        &self,
        ctx: &RequestContext,
        id: ReservationId,
        reason: Option<String>,
    ) -> AppResult<Reservation> {
        self.cancel_with(&OwnerPolicy::new(ctx.user_id), ctx, id, reason)
            .await
    }

    /// Tables free at `restaurant_id` around `date` for `guest_count` guests.
    pub async fn list_available_tables(
        &self,
        restaurant_id: &str,
        date: DateTime<Utc>,
        guest_count: Option<i32>,
    ) -> AppResult<Vec<TableOption>> {
        let restaurant_id = restaurant_id.trim();
        if restaurant_id.is_empty() {
            return Err(AppError::validation("Restaurant is required"));
        }
        if let Some(count) = guest_count {
            self.check_guest_count(count)?;
        }
        self.availability
            .list_available(restaurant_id, date, guest_count)
            .await
    }

    // ── Shared core ───────────────────────────────────────────────

    pub(crate) async fn list_with(
        &self,
        policy: &dyn AuthorizationPolicy,
        filter: ReservationFilter,
        page: PageRequest,
    ) -> AppResult<PageResponse<Reservation>> {
        self.store.find_page(&policy.scope(filter), &page).await
    }

    pub(crate) async fn get_with(
        &self,
        policy: &dyn AuthorizationPolicy,
        id: ReservationId,
    ) -> AppResult<Reservation> {
        self.store
            .find_by_id(id)
            .await?
            .filter(|r| policy.can_access(r))
            .ok_or_else(|| not_found(id))
    }

    pub(crate) async fn get_by_number_with(
        &self,
        policy: &dyn AuthorizationPolicy,
        number: &str,
    ) -> AppResult<Reservation> {
        let number = number.trim();
        if !is_well_formed(number) {
            return Err(AppError::validation(format!(
                "Invalid reservation number: '{number}'"
            )));
        }
        self.store
            .find_by_number(number)
            .await?
            .filter(|r| policy.can_access(r))
            .ok_or_else(|| AppError::not_found(format!("Reservation {number} not found")))
    }

    pub(crate) async fn update_with(
        &self,
        policy: &dyn AuthorizationPolicy,
        ctx: &RequestContext,
        id: ReservationId,
        update: ReservationUpdate,
    ) -> AppResult<Reservation> {
        let record = self.get_with(policy, id).await?;

        let change = match update {
            ReservationUpdate::SetStatus(to) => {
                self.lifecycle
                    .transition(record.status, to, policy.actor())?;
                RecordChange::status(to)
            }
            ReservationUpdate::SetFields(fields) => {
                self.lifecycle.ensure_editable(record.status)?;
                let fields = ReservationFields {
                    special_requests: normalize_edit(fields.special_requests),
                    contact_phone: normalize_edit(fields.contact_phone),
                    contact_name: normalize_edit(fields.contact_name),
                };
                if fields.is_empty() {
                    return Err(AppError::validation("Nothing to update"));
                }
                check_note_length(
                    fields.special_requests.as_deref(),
                    self.config.special_requests_max_len,
                )?;
                RecordChange::fields(fields)
            }
        };

        let updated = self.commit(policy, &record, &change).await?;
        info!(
            reservation_id = %updated.id,
            user_id = %ctx.user_id,
            from = %record.status,
            to = %updated.status,
            "Reservation updated"
        );
        Ok(updated)
    }

    pub(crate) async fn cancel_with(
        &self,
        policy: &dyn AuthorizationPolicy,
        ctx: &RequestContext,
        id: ReservationId,
        reason: Option<String>,
    ) -> AppResult<Reservation> {
        let record = self.get_with(policy, id).await?;
        self.lifecycle
            .transition(record.status, ReservationStatus::Cancelled, policy.actor())?;

        let reason = normalize_text(reason);
        check_note_length(reason.as_deref(), self.config.special_requests_max_len)?;
        let change = RecordChange {
            status: Some(ReservationStatus::Cancelled),
            fields: ReservationFields {
                special_requests: reason,
                ..Default::default()
            },
        };

        let cancelled = self.commit(policy, &record, &change).await?;
        info!(
            reservation_id = %cancelled.id,
            user_id = %ctx.user_id,
            from = %record.status,
            "Reservation cancelled"
        );
        Ok(cancelled)
    }

    // ── Internals ─────────────────────────────────────────────────

    fn check_guest_count(&self, guest_count: i32) -> AppResult<()> {
        if !(1..=self.config.max_guests).contains(&guest_count) {
            return Err(AppError::validation(format!(
                "Guest count must be between 1 and {}",
                self.config.max_guests
            )));
        }
        Ok(())
    }

    /// Insert with a new reservation number, regenerating on collision.
    async fn insert_with_fresh_number(&self, template: NewReservation) -> AppResult<Reservation> {
        let attempts = self.config.number_attempts.max(1);
        for attempt in 1..=attempts {
            let data = NewReservation {
                reservation_number: self.numbers.generate(),
                ..template.clone()
            };
            match self.store.insert(data).await {
                Ok(record) => return Ok(record),
                Err(InsertError::DuplicateNumber(number)) => {
                    warn!(attempt, number = %number, "Reservation number collision, regenerating");
                }
                Err(InsertError::BookingConflict) => return Err(table_taken()),
                Err(InsertError::Store(e)) => return Err(e),
            }
        }
        Err(AppError::internal(format!(
            "Could not allocate a unique reservation number after {attempts} attempts"
        )))
    }

    /// Persist `change` only if `record` still has the status it was
    /// validated against.
    async fn commit(
        &self,
        policy: &dyn AuthorizationPolicy,
        record: &Reservation,
        change: &RecordChange,
    ) -> AppResult<Reservation> {
        if let Some(updated) = self
            .store
            .apply_change(record.id, record.status, change)
            .await?
        {
            return Ok(updated);
        }

        // Lost a race: report what the record looks like now.
        let current = self.get_with(policy, record.id).await?;
        if current.status.is_terminal() {
            return Err(AppError::terminal_state(format!(
                "Reservation is {} and can no longer change",
                current.status
            )));
        }
        Err(AppError::conflict(
            "Reservation was modified concurrently, please retry",
        ))
    }
}

fn table_taken() -> AppError {
    AppError::conflict("This table is already booked within two hours of the requested time")
}

fn not_found(id: ReservationId) -> AppError {
    AppError::not_found(format!("Reservation {id} not found"))
}
