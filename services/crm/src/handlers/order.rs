use axum::{
    Json,
    extract::{Query, State},
};
use serde::{Deserialize, Serialize};

use kontor_session::identity::Identity;

use crate::domain::types::OrderListItem;
use crate::error::CrmServiceError;
use crate::state::AppState;
use crate::usecase::order::ListOrdersUseCase;

#[derive(Serialize)]
pub struct OrderListResponse {
    pub id: String,
    pub order_number: String,
    pub company: String,
    #[serde(serialize_with = "kontor_core::serde::to_rfc3339_ms")]
    pub order_date: chrono::DateTime<chrono::Utc>,
    pub status: kontor_domain::order::OrderStatus,
    pub total_amount: rust_decimal::Decimal,
    pub currency: String,
}

impl From<OrderListItem> for OrderListResponse {
    fn from(item: OrderListItem) -> Self {
        Self {
            id: item.order.id.to_string(),
            order_number: item.order.order_number,
            company: item.company,
            order_date: item.order.order_date,
            status: item.order.status,
            total_amount: item.order.total_amount,
            currency: item.order.currency,
        }
    }
}

#[derive(Deserialize)]
pub struct OrderListQuery {
    pub q: Option<String>,
    #[serde(default = "default_page")]
    pub page: u32,
}

fn default_page() -> u32 {
    1
}

// ── GET /orders ──────────────────────────────────────────────────────────────

pub async fn list_orders(
    _identity: Identity,
    State(state): State<AppState>,
    Query(query): Query<OrderListQuery>,
) -> Result<Json<Vec<OrderListResponse>>, CrmServiceError> {
    let usecase = ListOrdersUseCase {
        orders: state.order_repo(),
    };
    let orders = usecase.execute(query.q, query.page).await?;
    Ok(Json(orders.into_iter().map(Into::into).collect()))
}
