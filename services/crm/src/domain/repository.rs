#![allow(async_fn_in_trait)]

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use kontor_domain::contact::ContactChannel;
use kontor_domain::pagination::PageRequest;

use crate::domain::types::{
    Contact, ContactListItem, Customer, CustomerFields, DateRange, LoginCode, Order, OrderItem,
    OrderListItem, Product, User,
};
use crate::error::CrmServiceError;

/// Repository for user accounts.
pub trait UserRepository: Send + Sync {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, CrmServiceError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, CrmServiceError>;
    async fn create(&self, user: &User) -> Result<(), CrmServiceError>;
}

/// Repository for one-time login codes.
pub trait LoginCodeRepository: Send + Sync {
    /// Delete every code belonging to a user. Returns the number of rows
    /// removed. Issuing a new code always starts with this, so at most one
    /// code is active per user.
    async fn delete_for_user(&self, user_id: Uuid) -> Result<u64, CrmServiceError>;

    async fn create(&self, code: &LoginCode) -> Result<(), CrmServiceError>;

    /// Find the most recently issued code for the user matching the submitted
    /// string exactly (leading zeros preserved). Expiry is checked by the
    /// caller, not here.
    async fn find_latest(
        &self,
        user_id: Uuid,
        code: &str,
    ) -> Result<Option<LoginCode>, CrmServiceError>;

    /// Delete a code by id (single use). Returns `true` if a row was removed.
    async fn delete(&self, id: Uuid) -> Result<bool, CrmServiceError>;
}

/// Repository for customers.
pub trait CustomerRepository: Send + Sync {
    /// List customers ordered by company ascending. `filter` is matched
    /// case-insensitively as a substring against company, contact name,
    /// email, phone, and notes.
    async fn list(
        &self,
        filter: Option<&str>,
        page: PageRequest,
    ) -> Result<Vec<Customer>, CrmServiceError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Customer>, CrmServiceError>;
    async fn create(&self, customer: &Customer) -> Result<(), CrmServiceError>;
    async fn update(&self, id: Uuid, fields: &CustomerFields) -> Result<(), CrmServiceError>;

    /// Delete a customer. Dependent orders, order items, and contacts go with
    /// it (enforced by the schema's ON DELETE CASCADE). Returns `true` if a
    /// row was removed.
    async fn delete(&self, id: Uuid) -> Result<bool, CrmServiceError>;
}

/// Repository for orders and their line items.
pub trait OrderRepository: Send + Sync {
    /// List orders ordered by order date descending, joined with the customer
    /// company. `filter` matches order number or company.
    async fn list(
        &self,
        filter: Option<&str>,
        page: PageRequest,
    ) -> Result<Vec<OrderListItem>, CrmServiceError>;

    /// Newest orders of one customer, optionally narrowed to a date window.
    async fn list_for_customer(
        &self,
        customer_id: Uuid,
        range: DateRange,
        limit: u64,
    ) -> Result<Vec<Order>, CrmServiceError>;

    /// Insert an order together with its items in one transaction — a
    /// partially applied order must never be observable.
    async fn create_with_items(
        &self,
        order: &Order,
        items: &[OrderItem],
    ) -> Result<(), CrmServiceError>;

    /// Sum of `total_amount` over the customer's non-cancelled orders,
    /// optionally restricted to an order-date window.
    async fn revenue(
        &self,
        customer_id: Uuid,
        window: Option<(DateTime<Utc>, DateTime<Utc>)>,
    ) -> Result<Decimal, CrmServiceError>;
}

/// Repository for catalog products.
pub trait ProductRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Product>, CrmServiceError>;
    async fn create(&self, product: &Product) -> Result<(), CrmServiceError>;
}

/// Repository for customer contact logs.
pub trait ContactRepository: Send + Sync {
    /// List contacts ordered by contact time descending, joined with the
    /// customer company, optionally filtered by channel.
    async fn list(
        &self,
        channel: Option<ContactChannel>,
        page: PageRequest,
    ) -> Result<Vec<ContactListItem>, CrmServiceError>;

    /// Newest contacts of one customer, optionally narrowed to a date window.
    async fn list_for_customer(
        &self,
        customer_id: Uuid,
        range: DateRange,
        limit: u64,
    ) -> Result<Vec<Contact>, CrmServiceError>;

    /// Timestamp of the customer's most recent contact, if any.
    async fn last_contact_at(
        &self,
        customer_id: Uuid,
    ) -> Result<Option<DateTime<Utc>>, CrmServiceError>;

    async fn create(&self, contact: &Contact) -> Result<(), CrmServiceError>;
}

/// Port for outbound mail. Delivery is best-effort: the login flow treats a
/// failure as the signal to log the code locally instead.
pub trait Mailer: Send + Sync {
    async fn send(&self, to: &str, subject: &str, body: &str) -> Result<(), CrmServiceError>;
}
