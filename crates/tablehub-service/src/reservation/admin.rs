//! Staff reservation management: unscoped list, get, update, cancel, plus
//! stats and hard delete.

use std::sync::Arc;

use chrono::{TimeDelta, Utc};
use tracing::info;

use tablehub_core::error::AppError;
use tablehub_core::result::AppResult;
use tablehub_core::traits::Service;
use tablehub_core::types::{PageRequest, PageResponse, ReservationId};
use tablehub_database::ReservationFilter;
use tablehub_entity::reservation::{Reservation, ReservationStats};

use super::input::ReservationUpdate;
use super::policy::StaffPolicy;
use super::service::ReservationService;
use crate::context::RequestContext;

/// Handles reservation operations for staff and administrators.
#[derive(Debug, Clone)]
pub struct AdminReservationService {
    /// Shared reservation core.
    reservations: Arc<ReservationService>,
}

impl Service for AdminReservationService {}

impl AdminReservationService {
    /// Creates a new admin reservation service.
    pub fn new(reservations: Arc<ReservationService>) -> Self {
        Self { reservations }
    }

    /// Lists reservations across all guests.
    pub async fn list(
        &self,
        ctx: &RequestContext,
        filter: ReservationFilter,
        page: PageRequest,
    ) -> AppResult<PageResponse<Reservation>> {
        require_staff(ctx)?;
        self.reservations
            .list_with(&StaffPolicy, filter, page)
            .await
    }

    /// Gets any reservation by id.
    pub async fn get(&self, ctx: &RequestContext, id: ReservationId) -> AppResult<Reservation> {
        require_staff(ctx)?;
        self.reservations.get_with(&StaffPolicy, id).await
    }

    /// Gets any reservation by reservation number.
    pub async fn get_by_number(&self, ctx: &RequestContext, number: &str) -> AppResult<Reservation> {
        require_staff(ctx)?;
        self.reservations
            .get_by_number_with(&StaffPolicy, number)
            .await
    }

    /// Updates any reservation. Staff may also mark reservations completed.
    pub async fn update(
        &self,
        ctx: &RequestContext,
        id: ReservationId,
        update: ReservationUpdate,
    ) -> AppResult<Reservation> {
        require_staff(ctx)?;
        self.reservations
            .update_with(&StaffPolicy, ctx, id, update)
            .await
    }

    /// Cancels any reservation.
    pub async fn cancel(
        &self,
        ctx: &RequestContext,
        id: ReservationId,
        reason: Option<String>,
    ) -> AppResult<Reservation> {
        require_staff(ctx)?;
        self.reservations
            .cancel_with(&StaffPolicy, ctx, id, reason)
            .await
    }

    /// Counts by status plus reservations created in the look-back window.
    pub async fn stats(&self, ctx: &RequestContext) -> AppResult<ReservationStats> {
        require_staff(ctx)?;
        let since = Utc::now() - TimeDelta::days(self.reservations.config().stats_recent_days);
        self.reservations.store().stats(since).await
    }

    /// Physically removes a reservation, whatever its status.
    pub async fn purge(&self, ctx: &RequestContext, id: ReservationId) -> AppResult<()> {
        require_staff(ctx)?;
        if !self.reservations.store().delete(id).await? {
            return Err(AppError::not_found(format!("Reservation {id} not found")));
        }
        info!(reservation_id = %id, user_id = %ctx.user_id, "Reservation purged");
        Ok(())
    }
}

fn require_staff(ctx: &RequestContext) -> AppResult<()> {
    if ctx.is_staff() {
        Ok(())
    } else {
        Err(AppError::forbidden("Staff access required"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tablehub_core::error::ErrorKind;
    use tablehub_entity::reservation::{ReservationFields, ReservationStatus};

    use crate::reservation::test_support::{booking, evening, guest, service, staff, store};

    fn admin(reservations: ReservationService) -> (Arc<ReservationService>, AdminReservationService) {
        let shared = Arc::new(reservations);
        (shared.clone(), AdminReservationService::new(shared))
    }

    #[tokio::test]
    async fn test_staff_sees_every_guest() {
        let (svc, admin) = admin(service(store()));
        let (anna, boris) = (guest(), guest());
        svc.create(&anna, booking("R1", 1, evening(3, 19, 0))).await.unwrap();
        svc.create(&boris, booking("R1", 2, evening(3, 19, 0))).await.unwrap();
        svc.create(&boris, booking("R2", 2, evening(3, 19, 0))).await.unwrap();

        let all = admin
            .list(&staff(), ReservationFilter::default(), PageRequest::new(1, 50))
            .await
            .unwrap();
        assert_eq!(all.total, 3);

        let by_restaurant = admin
            .list(
                &staff(),
                ReservationFilter {
                    restaurant_id: Some("R1".into()),
                    ..Default::default()
                },
                PageRequest::new(1, 50),
            )
            .await
            .unwrap();
        assert_eq!(by_restaurant.total, 2);

        let by_user = admin
            .list(
                &staff(),
                ReservationFilter {
                    user_id: Some(boris.user_id),
                    ..Default::default()
                },
                PageRequest::new(1, 50),
            )
            .await
            .unwrap();
        assert_eq!(by_user.total, 2);
    }

    #[tokio::test]
    async fn test_guests_cannot_use_admin_profile() {
        let (_, admin) = admin(service(store()));
        let err = admin.stats(&guest()).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Forbidden);
    }

    #[tokio::test]
    async fn test_completion_then_owner_update_is_terminal() {
        let (svc, admin) = admin(service(store()));
        let anna = guest();
        let record = svc
            .create(&anna, booking("R1", 5, evening(3, 19, 0)))
            .await
            .unwrap();

        let completed = admin
            .update(
                &staff(),
                record.id,
                ReservationUpdate::SetStatus(ReservationStatus::Completed),
            )
            .await
            .unwrap();
        assert_eq!(completed.status, ReservationStatus::Completed);

        let err = svc
            .update_mine(
                &anna,
                record.id,
                ReservationUpdate::SetFields(ReservationFields {
                    contact_name: Some("Anna K.".into()),
                    ..Default::default()
                }),
            )
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::TerminalState);

        let err = admin.cancel(&staff(), record.id, None).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::TerminalState);
    }

    #[tokio::test]
    async fn test_stats_and_purge() {
        let reservations = store();
        let (svc, admin) = admin(service(reservations.clone()));
        let anna = guest();
        let first = svc.create(&anna, booking("R1", 1, evening(3, 19, 0))).await.unwrap();
        let second = svc.create(&anna, booking("R1", 2, evening(3, 19, 0))).await.unwrap();
        let third = svc.create(&anna, booking("R1", 3, evening(3, 19, 0))).await.unwrap();
        admin
            .update(&staff(), second.id, ReservationUpdate::SetStatus(ReservationStatus::Confirmed))
            .await
            .unwrap();
        admin.cancel(&staff(), third.id, Some("closed".into())).await.unwrap();
        reservations
            .backdate(first.id, Utc::now() - TimeDelta::days(40))
            .await;

        let stats = admin.stats(&staff()).await.unwrap();
        assert_eq!(
            stats,
            ReservationStats {
                total: 3,
                pending: 1,
                confirmed: 1,
                completed: 0,
                cancelled: 1,
                recent: 2,
            }
        );

        admin.purge(&staff(), third.id).await.unwrap();
        assert_eq!(admin.stats(&staff()).await.unwrap().total, 2);
        let err = admin.purge(&staff(), third.id).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);
    }
}
