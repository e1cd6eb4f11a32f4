use chrono::{DateTime, Datelike, NaiveDate, Utc};
use uuid::Uuid;

use kontor_domain::pagination::PageRequest;

use crate::domain::repository::{ContactRepository, CustomerRepository, OrderRepository};
use crate::domain::types::{
    CUSTOMERS_PER_PAGE, Customer, CustomerDetail, CustomerFields, DETAIL_SUBLIST_ROWS, DateRange,
};
use crate::error::CrmServiceError;

/// Parse the `from`/`to` query values (`YYYY-MM-DD`). An unparsable value is
/// discarded silently and the listing proceeds without that bound; `to` is
/// extended to the end of its day so the range is inclusive.
pub fn parse_date_range(from: Option<&str>, to: Option<&str>) -> DateRange {
    let from = from
        .and_then(|s| NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").ok())
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc());
    let to = to
        .and_then(|s| NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").ok())
        .and_then(|d| d.and_hms_opt(23, 59, 59))
        .map(|dt| dt.and_utc());
    DateRange { from, to }
}

/// Calendar-year window Jan 1 00:00:00 .. Dec 31 23:59:59 (inclusive).
pub(crate) fn calendar_year_window(year: i32) -> (DateTime<Utc>, DateTime<Utc>) {
    let jan1 = NaiveDate::from_ymd_opt(year, 1, 1)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .expect("valid calendar date")
        .and_utc();
    let dec31 = NaiveDate::from_ymd_opt(year, 12, 31)
        .and_then(|d| d.and_hms_opt(23, 59, 59))
        .expect("valid calendar date")
        .and_utc();
    (jan1, dec31)
}

// ── ListCustomers ────────────────────────────────────────────────────────────

pub struct ListCustomersUseCase<C: CustomerRepository> {
    pub customers: C,
}

impl<C: CustomerRepository> ListCustomersUseCase<C> {
    pub async fn execute(
        &self,
        q: Option<String>,
        page: u32,
    ) -> Result<Vec<Customer>, CrmServiceError> {
        let filter = q.as_deref().map(str::trim).filter(|s| !s.is_empty());
        self.customers
            .list(
                filter,
                PageRequest {
                    per_page: CUSTOMERS_PER_PAGE,
                    page,
                },
            )
            .await
    }
}

// ── GetCustomerDetail ────────────────────────────────────────────────────────

pub struct GetCustomerDetailUseCase<C, O, K>
where
    C: CustomerRepository,
    O: OrderRepository,
    K: ContactRepository,
{
    pub customers: C,
    pub orders: O,
    pub contacts: K,
}

impl<C, O, K> GetCustomerDetailUseCase<C, O, K>
where
    C: CustomerRepository,
    O: OrderRepository,
    K: ContactRepository,
{
    /// The revenue aggregates always use the all-time and prior-calendar-year
    /// windows; the `range` only narrows the order and contact sublists.
    pub async fn execute(
        &self,
        customer_id: Uuid,
        range: DateRange,
    ) -> Result<CustomerDetail, CrmServiceError> {
        let customer = self
            .customers
            .find_by_id(customer_id)
            .await?
            .ok_or(CrmServiceError::CustomerNotFound)?;

        let now = Utc::now();
        let last_contact_at = self.contacts.last_contact_at(customer_id).await?;
        let days_since_last_contact = last_contact_at.map(|at| (now - at).num_days());

        let revenue_total = self.orders.revenue(customer_id, None).await?;
        let prior_year = now.year() - 1;
        let revenue_prior_year = self
            .orders
            .revenue(customer_id, Some(calendar_year_window(prior_year)))
            .await?;

        let orders = self
            .orders
            .list_for_customer(customer_id, range, DETAIL_SUBLIST_ROWS)
            .await?;
        let contacts = self
            .contacts
            .list_for_customer(customer_id, range, DETAIL_SUBLIST_ROWS)
            .await?;

        Ok(CustomerDetail {
            customer,
            last_contact_at,
            days_since_last_contact,
            revenue_total,
            revenue_prior_year,
            prior_year,
            orders,
            contacts,
        })
    }
}

// ── CreateCustomer ───────────────────────────────────────────────────────────

pub struct CreateCustomerUseCase<C: CustomerRepository> {
    pub customers: C,
}

impl<C: CustomerRepository> CreateCustomerUseCase<C> {
    pub async fn execute(&self, fields: CustomerFields) -> Result<Uuid, CrmServiceError> {
        if fields.company.trim().is_empty() {
            return Err(CrmServiceError::MissingData);
        }
        let now = Utc::now();
        let customer = Customer {
            id: Uuid::now_v7(),
            company: fields.company,
            contact_name: fields.contact_name,
            email: fields.email,
            phone: fields.phone,
            notes: fields.notes,
            street: fields.street,
            zip_code: fields.zip_code,
            city: fields.city,
            created_at: now,
            updated_at: now,
        };
        self.customers.create(&customer).await?;
        Ok(customer.id)
    }
}

// ── UpdateCustomer ───────────────────────────────────────────────────────────

pub struct UpdateCustomerUseCase<C: CustomerRepository> {
    pub customers: C,
}

impl<C: CustomerRepository> UpdateCustomerUseCase<C> {
    pub async fn execute(
        &self,
        customer_id: Uuid,
        fields: CustomerFields,
    ) -> Result<(), CrmServiceError> {
        if fields.company.trim().is_empty() {
            return Err(CrmServiceError::MissingData);
        }
        self.customers
            .find_by_id(customer_id)
            .await?
            .ok_or(CrmServiceError::CustomerNotFound)?;
        self.customers.update(customer_id, &fields).await
    }
}

// ── DeleteCustomer ───────────────────────────────────────────────────────────

pub struct DeleteCustomerUseCase<C: CustomerRepository> {
    pub customers: C,
}

impl<C: CustomerRepository> DeleteCustomerUseCase<C> {
    pub async fn execute(&self, customer_id: Uuid) -> Result<(), CrmServiceError> {
        let deleted = self.customers.delete(customer_id).await?;
        if !deleted {
            return Err(CrmServiceError::CustomerNotFound);
        }
        Ok(())
    }
}
