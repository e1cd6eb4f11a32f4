use axum::{
    Router,
    routing::{delete, get, post, put},
};
use tower_http::trace::TraceLayer;

use kontor_core::health::{healthz, readyz};
use kontor_core::middleware::request_id_layer;

use crate::handlers::{
    auth::{login, logout, register, verify},
    contact::list_contacts,
    customer::{create_customer, delete_customer, get_customer, list_customers, update_customer},
    dashboard::dashboard,
    order::list_orders,
};
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Health
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        // Auth
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
        .route("/auth/verify", post(verify))
        .route("/auth/logout", post(logout))
        // Dashboard
        .route("/", get(dashboard))
        // Customers
        .route("/customers", get(list_customers))
        .route("/customers", post(create_customer))
        .route("/customers/{customer_id}", get(get_customer))
        .route("/customers/{customer_id}", put(update_customer))
        .route("/customers/{customer_id}", delete(delete_customer))
        // Orders
        .route("/orders", get(list_orders))
        // Contacts
        .route("/contacts", get(list_contacts))
        .layer(TraceLayer::new_for_http())
        .layer(request_id_layer())
        .with_state(state)
}
