//! Shared application state passed to all handlers.

use std::sync::Arc;

use tablehub_auth::jwt::JwtDecoder;
use tablehub_core::config::AppConfig;
use tablehub_database::ReservationStore;
use tablehub_service::{AdminReservationService, ReservationService};

/// Application state shared across all request handlers via `State`.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<AppConfig>,
    /// Reservation store, used directly by the health check.
    pub store: Arc<dyn ReservationStore>,
    /// Bearer token verification.
    pub jwt_decoder: Arc<JwtDecoder>,
    /// Guest-facing reservation operations.
    pub reservation_service: Arc<ReservationService>,
    /// Staff-facing reservation operations.
    pub admin_reservation_service: Arc<AdminReservationService>,
}

impl AppState {
    /// Wires the services on top of an opened store.
    pub fn new(config: AppConfig, store: Arc<dyn ReservationStore>) -> Self {
        let reservation_service = Arc::new(ReservationService::new(
            Arc::clone(&store),
            config.booking.clone(),
        ));
        let admin_reservation_service = Arc::new(AdminReservationService::new(Arc::clone(
            &reservation_service,
        )));
        let jwt_decoder = Arc::new(JwtDecoder::new(&config.auth));

        Self {
            config: Arc::new(config),
            store,
            jwt_decoder,
            reservation_service,
            admin_reservation_service,
        }
    }
}
