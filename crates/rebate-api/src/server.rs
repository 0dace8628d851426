use axum::{
    routing::{get, post, put},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::handlers;
use crate::state::AppState;

/// Create the API application router
pub fn create_app(state: AppState) -> Router {
    Router::new()
        // Health
        .route("/health", get(handlers::health))

        // Epochs
        .route("/v1/epochs/current", get(handlers::current_epoch))
        .route("/v1/epochs/:epoch_id", get(handlers::get_epoch))
        .route("/v1/epochs/:epoch_id/report", get(handlers::epoch_report))
        .route("/v1/epochs/:epoch_id/allocations", post(handlers::record_allocation))
        .route("/v1/epochs/:epoch_id/fund", post(handlers::fund_epoch))

        // Claims and recipient queries
        .route("/v1/claims", post(handlers::claim))
        .route("/v1/recipients/:account/fees", get(handlers::recipient_fees))
        .route(
            "/v1/recipients/:account/epochs/:epoch_id/status",
            get(handlers::claim_status),
        )

        // Roles
        .route("/v1/roles", get(handlers::get_roles))
        .route("/v1/roles/operator", put(handlers::assign_operator))
        .route("/v1/roles/payer", put(handlers::assign_payer))

        // Settlement asset
        .route("/v1/token/approve", post(handlers::approve))
        .route("/v1/token/balances/:account", get(handlers::token_balance))

        // Audit
        .route("/v1/events", get(handlers::list_events))
        .route("/v1/state", get(handlers::get_state))

        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
