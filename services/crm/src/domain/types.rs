use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use kontor_domain::contact::ContactChannel;
use kontor_domain::order::OrderStatus;
use kontor_domain::user::UserRole;

/// Login code length in decimal digits.
pub const LOGIN_CODE_LEN: usize = 5;

/// Login code time-to-live in seconds.
pub const LOGIN_CODE_TTL_SECS: i64 = 300;

/// Minimum accepted password length at registration.
pub const MIN_PASSWORD_LEN: usize = 6;

/// Landing page after login when no redirect target was saved.
pub const DEFAULT_LANDING: &str = "/customers";

/// Fixed page sizes per listing type.
pub const CUSTOMERS_PER_PAGE: u32 = 10;
pub const ORDERS_PER_PAGE: u32 = 20;
pub const CONTACTS_PER_PAGE: u32 = 20;

/// Row caps for the dashboard sections and the customer-detail sublists.
pub const DASHBOARD_SECTION_ROWS: u32 = 10;
pub const DETAIL_SUBLIST_ROWS: u64 = 10;

/// User account.
#[derive(Debug, Clone)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub password_hash: String,
    pub role: UserRole,
    pub created_at: DateTime<Utc>,
}

/// One-time login code, the second authentication factor.
#[derive(Debug, Clone)]
pub struct LoginCode {
    pub id: Uuid,
    pub user_id: Uuid,
    /// Exactly five decimal digits, leading zeros preserved.
    pub code: String,
    pub expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl LoginCode {
    /// A code is valid only while its expiry is strictly in the future.
    pub fn is_valid(&self) -> bool {
        self.expires_at > Utc::now()
    }
}

/// Customer master record.
#[derive(Debug, Clone)]
pub struct Customer {
    pub id: Uuid,
    pub company: String,
    pub contact_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub notes: Option<String>,
    pub street: Option<String>,
    pub zip_code: Option<String>,
    pub city: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Editable customer fields, shared by create and update.
#[derive(Debug, Clone, Default)]
pub struct CustomerFields {
    pub company: String,
    pub contact_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub notes: Option<String>,
    pub street: Option<String>,
    pub zip_code: Option<String>,
    pub city: Option<String>,
}

/// Catalog product.
#[derive(Debug, Clone)]
pub struct Product {
    pub id: Uuid,
    pub sku: String,
    pub name: String,
    pub unit_price: Decimal,
    pub created_at: DateTime<Utc>,
}

/// Customer order with its denormalized total.
#[derive(Debug, Clone)]
pub struct Order {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub order_number: String,
    pub order_date: DateTime<Utc>,
    pub status: OrderStatus,
    pub total_amount: Decimal,
    pub currency: String,
    pub created_at: DateTime<Utc>,
}

/// Order line item with the price snapshot taken at creation.
#[derive(Debug, Clone)]
pub struct OrderItem {
    pub id: Uuid,
    pub order_id: Uuid,
    pub product_id: Uuid,
    pub quantity: i32,
    pub unit_price: Decimal,
}

/// Customer contact log entry.
#[derive(Debug, Clone)]
pub struct Contact {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub user_id: Option<Uuid>,
    pub channel: ContactChannel,
    pub subject: String,
    pub notes: Option<String>,
    pub rating: Option<u8>,
    pub contact_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

/// Order row joined with its customer's company name for listings.
#[derive(Debug, Clone)]
pub struct OrderListItem {
    pub order: Order,
    pub company: String,
}

/// Contact row joined with its customer's company name for listings.
#[derive(Debug, Clone)]
pub struct ContactListItem {
    pub contact: Contact,
    pub company: String,
}

/// Optional inclusive date window for the customer-detail sublists.
#[derive(Debug, Clone, Copy, Default)]
pub struct DateRange {
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
}

impl DateRange {
    pub fn unbounded() -> Self {
        Self::default()
    }
}

/// Customer detail view: KPIs plus the date-filtered sublists. The revenue
/// aggregates always use the all-time / prior-calendar-year windows, never
/// the display range.
#[derive(Debug, Clone)]
pub struct CustomerDetail {
    pub customer: Customer,
    pub last_contact_at: Option<DateTime<Utc>>,
    pub days_since_last_contact: Option<i64>,
    pub revenue_total: Decimal,
    pub revenue_prior_year: Decimal,
    pub prior_year: i32,
    pub orders: Vec<Order>,
    pub contacts: Vec<Contact>,
}

/// Minimal shape check for registration emails: one `@` with a non-empty
/// local part and a dotted domain, no whitespace.
pub fn validate_email(email: &str) -> bool {
    if email.is_empty() || email.len() > 120 || email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
}

/// Canonical form for stored emails: trimmed and lowercased.
pub fn normalize_email(raw: &str) -> String {
    raw.trim().to_lowercase()
}
