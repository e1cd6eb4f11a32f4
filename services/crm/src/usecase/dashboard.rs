use chrono::Utc;

use kontor_domain::contact::ContactChannel;
use kontor_domain::pagination::PageRequest;

use crate::domain::repository::{ContactRepository, CustomerRepository, OrderRepository};
use crate::domain::types::{
    Customer, ContactListItem, DASHBOARD_SECTION_ROWS, OrderListItem,
};
use crate::error::CrmServiceError;

pub struct DashboardInput {
    /// Customer section filter.
    pub q: Option<String>,
    /// Order section filter.
    pub q_orders: Option<String>,
    /// Contact section channel filter.
    pub channel: Option<ContactChannel>,
}

/// Customer row with its activity indicator.
#[derive(Debug, Clone)]
pub struct CustomerActivityRow {
    pub customer: Customer,
    pub days_since_last_contact: Option<i64>,
}

#[derive(Debug)]
pub struct Dashboard {
    pub customers: Vec<CustomerActivityRow>,
    pub orders: Vec<OrderListItem>,
    pub contacts: Vec<ContactListItem>,
}

/// Landing view: the first page of each listing, each section with its own
/// independent filter.
pub struct DashboardUseCase<C, O, K>
where
    C: CustomerRepository,
    O: OrderRepository,
    K: ContactRepository,
{
    pub customers: C,
    pub orders: O,
    pub contacts: K,
}

impl<C, O, K> DashboardUseCase<C, O, K>
where
    C: CustomerRepository,
    O: OrderRepository,
    K: ContactRepository,
{
    pub async fn execute(&self, input: DashboardInput) -> Result<Dashboard, CrmServiceError> {
        let now = Utc::now();
        let section = PageRequest::first(DASHBOARD_SECTION_ROWS);

        let filter = input.q.as_deref().map(str::trim).filter(|s| !s.is_empty());
        let customer_list = self.customers.list(filter, section).await?;

        let mut customers = Vec::with_capacity(customer_list.len());
        for customer in customer_list {
            let days = self
                .contacts
                .last_contact_at(customer.id)
                .await?
                .map(|at| (now - at).num_days());
            customers.push(CustomerActivityRow {
                customer,
                days_since_last_contact: days,
            });
        }

        let order_filter = input
            .q_orders
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty());
        let orders = self.orders.list(order_filter, section).await?;
        let contacts = self.contacts.list(input.channel, section).await?;

        Ok(Dashboard {
            customers,
            orders,
            contacts,
        })
    }
}
