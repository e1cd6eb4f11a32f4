use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use kontor_session::identity::Identity;

use crate::domain::types::{Contact, Customer, CustomerDetail, CustomerFields, Order};
use crate::error::CrmServiceError;
use crate::state::AppState;
use crate::usecase::customer::{
    CreateCustomerUseCase, DeleteCustomerUseCase, GetCustomerDetailUseCase, ListCustomersUseCase,
    UpdateCustomerUseCase, parse_date_range,
};

// ── Response types ───────────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct CustomerResponse {
    pub id: String,
    pub company: String,
    pub contact_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub notes: Option<String>,
    pub street: Option<String>,
    pub zip_code: Option<String>,
    pub city: Option<String>,
    #[serde(serialize_with = "kontor_core::serde::to_rfc3339_ms")]
    pub created_at: chrono::DateTime<chrono::Utc>,
    #[serde(serialize_with = "kontor_core::serde::to_rfc3339_ms")]
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl From<Customer> for CustomerResponse {
    fn from(customer: Customer) -> Self {
        Self {
            id: customer.id.to_string(),
            company: customer.company,
            contact_name: customer.contact_name,
            email: customer.email,
            phone: customer.phone,
            notes: customer.notes,
            street: customer.street,
            zip_code: customer.zip_code,
            city: customer.city,
            created_at: customer.created_at,
            updated_at: customer.updated_at,
        }
    }
}

#[derive(Serialize)]
pub struct CustomerOrderResponse {
    pub id: String,
    pub order_number: String,
    #[serde(serialize_with = "kontor_core::serde::to_rfc3339_ms")]
    pub order_date: chrono::DateTime<chrono::Utc>,
    pub status: kontor_domain::order::OrderStatus,
    pub total_amount: rust_decimal::Decimal,
    pub currency: String,
}

impl From<Order> for CustomerOrderResponse {
    fn from(order: Order) -> Self {
        Self {
            id: order.id.to_string(),
            order_number: order.order_number,
            order_date: order.order_date,
            status: order.status,
            total_amount: order.total_amount,
            currency: order.currency,
        }
    }
}

#[derive(Serialize)]
pub struct CustomerContactResponse {
    pub id: String,
    pub channel: kontor_domain::contact::ContactChannel,
    pub subject: String,
    pub notes: Option<String>,
    pub rating: Option<u8>,
    #[serde(serialize_with = "kontor_core::serde::to_rfc3339_ms")]
    pub contact_at: chrono::DateTime<chrono::Utc>,
}

impl From<Contact> for CustomerContactResponse {
    fn from(contact: Contact) -> Self {
        Self {
            id: contact.id.to_string(),
            channel: contact.channel,
            subject: contact.subject,
            notes: contact.notes,
            rating: contact.rating,
            contact_at: contact.contact_at,
        }
    }
}

#[derive(Serialize)]
pub struct CustomerDetailResponse {
    #[serde(flatten)]
    pub customer: CustomerResponse,
    #[serde(serialize_with = "kontor_core::serde::opt_to_rfc3339_ms")]
    pub last_contact_at: Option<chrono::DateTime<chrono::Utc>>,
    pub days_since_last_contact: Option<i64>,
    pub revenue_total: rust_decimal::Decimal,
    pub revenue_prior_year: rust_decimal::Decimal,
    pub prior_year: i32,
    pub orders: Vec<CustomerOrderResponse>,
    pub contacts: Vec<CustomerContactResponse>,
}

impl From<CustomerDetail> for CustomerDetailResponse {
    fn from(detail: CustomerDetail) -> Self {
        Self {
            customer: detail.customer.into(),
            last_contact_at: detail.last_contact_at,
            days_since_last_contact: detail.days_since_last_contact,
            revenue_total: detail.revenue_total,
            revenue_prior_year: detail.revenue_prior_year,
            prior_year: detail.prior_year,
            orders: detail.orders.into_iter().map(Into::into).collect(),
            contacts: detail.contacts.into_iter().map(Into::into).collect(),
        }
    }
}

// ── Request types ────────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct CustomerListQuery {
    pub q: Option<String>,
    #[serde(default = "default_page")]
    pub page: u32,
}

fn default_page() -> u32 {
    1
}

#[derive(Deserialize)]
pub struct CustomerDetailQuery {
    pub from: Option<String>,
    pub to: Option<String>,
}

#[derive(Deserialize)]
pub struct CustomerPayload {
    pub company: String,
    pub contact_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub notes: Option<String>,
    pub street: Option<String>,
    pub zip_code: Option<String>,
    pub city: Option<String>,
}

impl From<CustomerPayload> for CustomerFields {
    fn from(payload: CustomerPayload) -> Self {
        Self {
            company: payload.company,
            contact_name: payload.contact_name,
            email: payload.email,
            phone: payload.phone,
            notes: payload.notes,
            street: payload.street,
            zip_code: payload.zip_code,
            city: payload.city,
        }
    }
}

// ── GET /customers ───────────────────────────────────────────────────────────

pub async fn list_customers(
    _identity: Identity,
    State(state): State<AppState>,
    Query(query): Query<CustomerListQuery>,
) -> Result<Json<Vec<CustomerResponse>>, CrmServiceError> {
    let usecase = ListCustomersUseCase {
        customers: state.customer_repo(),
    };
    let customers = usecase.execute(query.q, query.page).await?;
    Ok(Json(customers.into_iter().map(Into::into).collect()))
}

// ── GET /customers/{customer_id} ─────────────────────────────────────────────

pub async fn get_customer(
    _identity: Identity,
    State(state): State<AppState>,
    Path(customer_id): Path<Uuid>,
    Query(query): Query<CustomerDetailQuery>,
) -> Result<Json<CustomerDetailResponse>, CrmServiceError> {
    let usecase = GetCustomerDetailUseCase {
        customers: state.customer_repo(),
        orders: state.order_repo(),
        contacts: state.contact_repo(),
    };
    let range = parse_date_range(query.from.as_deref(), query.to.as_deref());
    let detail = usecase.execute(customer_id, range).await?;
    Ok(Json(detail.into()))
}

// ── POST /customers ──────────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct CustomerCreatedResponse {
    pub id: String,
}

pub async fn create_customer(
    _identity: Identity,
    State(state): State<AppState>,
    Json(body): Json<CustomerPayload>,
) -> Result<(StatusCode, Json<CustomerCreatedResponse>), CrmServiceError> {
    let usecase = CreateCustomerUseCase {
        customers: state.customer_repo(),
    };
    let id = usecase.execute(body.into()).await?;
    Ok((
        StatusCode::CREATED,
        Json(CustomerCreatedResponse { id: id.to_string() }),
    ))
}

// ── PUT /customers/{customer_id} ─────────────────────────────────────────────

pub async fn update_customer(
    _identity: Identity,
    State(state): State<AppState>,
    Path(customer_id): Path<Uuid>,
    Json(body): Json<CustomerPayload>,
) -> Result<StatusCode, CrmServiceError> {
    let usecase = UpdateCustomerUseCase {
        customers: state.customer_repo(),
    };
    usecase.execute(customer_id, body.into()).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ── DELETE /customers/{customer_id} ──────────────────────────────────────────

pub async fn delete_customer(
    _identity: Identity,
    State(state): State<AppState>,
    Path(customer_id): Path<Uuid>,
) -> Result<StatusCode, CrmServiceError> {
    let usecase = DeleteCustomerUseCase {
        customers: state.customer_repo(),
    };
    usecase.execute(customer_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
