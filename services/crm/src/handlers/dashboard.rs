use axum::{
    Json,
    extract::{Query, State},
};
use serde::{Deserialize, Serialize};

use kontor_session::identity::Identity;

use crate::error::CrmServiceError;
use crate::handlers::contact::{ContactListResponse, parse_channel_filter};
use crate::handlers::customer::CustomerResponse;
use crate::handlers::order::OrderListResponse;
use crate::state::AppState;
use crate::usecase::dashboard::{DashboardInput, DashboardUseCase};

#[derive(Serialize)]
pub struct CustomerActivityResponse {
    #[serde(flatten)]
    pub customer: CustomerResponse,
    pub days_since_last_contact: Option<i64>,
}

#[derive(Serialize)]
pub struct DashboardResponse {
    pub customers: Vec<CustomerActivityResponse>,
    pub orders: Vec<OrderListResponse>,
    pub contacts: Vec<ContactListResponse>,
}

#[derive(Deserialize)]
pub struct DashboardQuery {
    pub q: Option<String>,
    pub q_orders: Option<String>,
    pub channel: Option<String>,
}

// ── GET / ────────────────────────────────────────────────────────────────────

pub async fn dashboard(
    _identity: Identity,
    State(state): State<AppState>,
    Query(query): Query<DashboardQuery>,
) -> Result<Json<DashboardResponse>, CrmServiceError> {
    let channel = parse_channel_filter(query.channel.as_deref())?;
    let usecase = DashboardUseCase {
        customers: state.customer_repo(),
        orders: state.order_repo(),
        contacts: state.contact_repo(),
    };
    let dashboard = usecase
        .execute(DashboardInput {
            q: query.q,
            q_orders: query.q_orders,
            channel,
        })
        .await?;

    Ok(Json(DashboardResponse {
        customers: dashboard
            .customers
            .into_iter()
            .map(|row| CustomerActivityResponse {
                customer: row.customer.into(),
                days_since_last_contact: row.days_since_last_contact,
            })
            .collect(),
        orders: dashboard.orders.into_iter().map(Into::into).collect(),
        contacts: dashboard.contacts.into_iter().map(Into::into).collect(),
    }))
}
