use axum::{
    Router,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use toolhub_core::health::{healthz, readyz, status};
use toolhub_core::middleware::{propagate_request_id_layer, request_id_layer};

use crate::handlers::{
    deletion::{confirm_deletion, request_deletion},
    moderation::{approve_tool, list_submissions, reject_tool},
    reference::{list_categories, list_roles, list_tags},
    session::{current_user, login, logout},
    tool::{count_tools, get_tool, list_tools},
};
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Health
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        .route("/status", get(status))
        // Session
        .route("/login", post(login))
        .route("/logout", post(logout))
        .route("/user", get(current_user))
        // Reference data
        .route("/roles", get(list_roles))
        .route("/categories", get(list_categories))
        .route("/tags", get(list_tags))
        // Tools
        .route("/tools", get(list_tools))
        .route("/tools/count", get(count_tools))
        .route("/tools/{id}", get(get_tool))
        // Deletion confirmation
        .route("/tools/{id}/delete-request", post(request_deletion))
        .route("/tools/{id}/delete-confirm", post(confirm_deletion))
        // Moderation (owner only)
        .route("/admin/tools", get(list_submissions))
        .route("/admin/tools/{id}/approve", post(approve_tool))
        .route("/admin/tools/{id}/reject", post(reject_tool))
        .layer(TraceLayer::new_for_http())
        .layer(propagate_request_id_layer())
        .layer(request_id_layer())
        .with_state(state)
}
