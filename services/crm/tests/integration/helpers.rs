#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use chrono::{DateTime, Duration, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use kontor_domain::contact::ContactChannel;
use kontor_domain::order::OrderStatus;
use kontor_domain::pagination::PageRequest;
use kontor_domain::user::UserRole;

use kontor_crm::domain::repository::{
    ContactRepository, CustomerRepository, LoginCodeRepository, Mailer, OrderRepository,
    ProductRepository, UserRepository,
};
use kontor_crm::domain::types::{
    Contact, ContactListItem, Customer, CustomerFields, DateRange, LoginCode, Order, OrderItem,
    OrderListItem, Product, User,
};
use kontor_crm::error::CrmServiceError;
use kontor_crm::usecase::password::hash_password;

fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

fn page_slice<T: Clone>(items: Vec<T>, page: PageRequest) -> Vec<T> {
    let page = page.clamped();
    items
        .into_iter()
        .skip(page.offset() as usize)
        .take(page.per_page as usize)
        .collect()
}

fn within(range: DateRange, at: DateTime<Utc>) -> bool {
    range.from.is_none_or(|from| at >= from) && range.to.is_none_or(|to| at <= to)
}

// ── MockUserRepo ─────────────────────────────────────────────────────────────

pub struct MockUserRepo {
    pub users: Arc<Mutex<Vec<User>>>,
}

impl MockUserRepo {
    pub fn new(users: Vec<User>) -> Self {
        Self {
            users: Arc::new(Mutex::new(users)),
        }
    }

    pub fn empty() -> Self {
        Self::new(vec![])
    }

    pub fn users_handle(&self) -> Arc<Mutex<Vec<User>>> {
        Arc::clone(&self.users)
    }
}

impl UserRepository for MockUserRepo {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, CrmServiceError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.email == email)
            .cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, CrmServiceError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.id == id)
            .cloned())
    }

    async fn create(&self, user: &User) -> Result<(), CrmServiceError> {
        self.users.lock().unwrap().push(user.clone());
        Ok(())
    }
}

// ── MockLoginCodeRepo ────────────────────────────────────────────────────────

pub struct MockLoginCodeRepo {
    pub codes: Arc<Mutex<Vec<LoginCode>>>,
}

impl MockLoginCodeRepo {
    pub fn new(codes: Vec<LoginCode>) -> Self {
        Self {
            codes: Arc::new(Mutex::new(codes)),
        }
    }

    pub fn empty() -> Self {
        Self::new(vec![])
    }

    /// Shared handle to the stored codes for post-execution inspection.
    pub fn codes_handle(&self) -> Arc<Mutex<Vec<LoginCode>>> {
        Arc::clone(&self.codes)
    }
}

impl LoginCodeRepository for MockLoginCodeRepo {
    async fn delete_for_user(&self, user_id: Uuid) -> Result<u64, CrmServiceError> {
        let mut codes = self.codes.lock().unwrap();
        let before = codes.len();
        codes.retain(|c| c.user_id != user_id);
        Ok((before - codes.len()) as u64)
    }

    async fn create(&self, code: &LoginCode) -> Result<(), CrmServiceError> {
        self.codes.lock().unwrap().push(code.clone());
        Ok(())
    }

    async fn find_latest(
        &self,
        user_id: Uuid,
        code: &str,
    ) -> Result<Option<LoginCode>, CrmServiceError> {
        Ok(self
            .codes
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.user_id == user_id && c.code == code)
            .max_by_key(|c| c.created_at)
            .cloned())
    }

    async fn delete(&self, id: Uuid) -> Result<bool, CrmServiceError> {
        let mut codes = self.codes.lock().unwrap();
        let before = codes.len();
        codes.retain(|c| c.id != id);
        Ok(codes.len() < before)
    }
}

// ── MockMailer ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct SentMail {
    pub to: String,
    pub subject: String,
    pub body: String,
}

pub struct MockMailer {
    pub fail: bool,
    pub sent: Arc<Mutex<Vec<SentMail>>>,
}

impl MockMailer {
    pub fn working() -> Self {
        Self {
            fail: false,
            sent: Arc::new(Mutex::new(vec![])),
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            sent: Arc::new(Mutex::new(vec![])),
        }
    }

    pub fn sent_handle(&self) -> Arc<Mutex<Vec<SentMail>>> {
        Arc::clone(&self.sent)
    }
}

impl Mailer for MockMailer {
    async fn send(&self, to: &str, subject: &str, body: &str) -> Result<(), CrmServiceError> {
        if self.fail {
            return Err(anyhow::anyhow!("smtp unreachable").into());
        }
        self.sent.lock().unwrap().push(SentMail {
            to: to.to_owned(),
            subject: subject.to_owned(),
            body: body.to_owned(),
        });
        Ok(())
    }
}

// ── MockCustomerRepo ─────────────────────────────────────────────────────────

pub struct MockCustomerRepo {
    pub customers: Arc<Mutex<Vec<Customer>>>,
}

impl MockCustomerRepo {
    pub fn new(customers: Vec<Customer>) -> Self {
        Self {
            customers: Arc::new(Mutex::new(customers)),
        }
    }

    pub fn empty() -> Self {
        Self::new(vec![])
    }

    pub fn customers_handle(&self) -> Arc<Mutex<Vec<Customer>>> {
        Arc::clone(&self.customers)
    }
}

impl CustomerRepository for MockCustomerRepo {
    async fn list(
        &self,
        filter: Option<&str>,
        page: PageRequest,
    ) -> Result<Vec<Customer>, CrmServiceError> {
        let mut matches: Vec<Customer> = self
            .customers
            .lock()
            .unwrap()
            .iter()
            .filter(|c| {
                let Some(q) = filter else { return true };
                contains_ci(&c.company, q)
                    || c.contact_name.as_deref().is_some_and(|v| contains_ci(v, q))
                    || c.email.as_deref().is_some_and(|v| contains_ci(v, q))
                    || c.phone.as_deref().is_some_and(|v| contains_ci(v, q))
                    || c.notes.as_deref().is_some_and(|v| contains_ci(v, q))
            })
            .cloned()
            .collect();
        matches.sort_by(|a, b| a.company.cmp(&b.company));
        Ok(page_slice(matches, page))
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Customer>, CrmServiceError> {
        Ok(self
            .customers
            .lock()
            .unwrap()
            .iter()
            .find(|c| c.id == id)
            .cloned())
    }

    async fn create(&self, customer: &Customer) -> Result<(), CrmServiceError> {
        self.customers.lock().unwrap().push(customer.clone());
        Ok(())
    }

    async fn update(&self, id: Uuid, fields: &CustomerFields) -> Result<(), CrmServiceError> {
        let mut customers = self.customers.lock().unwrap();
        if let Some(c) = customers.iter_mut().find(|c| c.id == id) {
            c.company = fields.company.clone();
            c.contact_name = fields.contact_name.clone();
            c.email = fields.email.clone();
            c.phone = fields.phone.clone();
            c.notes = fields.notes.clone();
            c.street = fields.street.clone();
            c.zip_code = fields.zip_code.clone();
            c.city = fields.city.clone();
            c.updated_at = Utc::now();
        }
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<bool, CrmServiceError> {
        let mut customers = self.customers.lock().unwrap();
        let before = customers.len();
        customers.retain(|c| c.id != id);
        Ok(customers.len() < before)
    }
}

// ── MockOrderRepo ────────────────────────────────────────────────────────────

pub struct MockOrderRepo {
    pub orders: Arc<Mutex<Vec<Order>>>,
    pub items: Arc<Mutex<Vec<OrderItem>>>,
    /// Company name attached to every list row.
    pub company: String,
}

impl MockOrderRepo {
    pub fn new(orders: Vec<Order>) -> Self {
        Self {
            orders: Arc::new(Mutex::new(orders)),
            items: Arc::new(Mutex::new(vec![])),
            company: "Acme GmbH".to_owned(),
        }
    }

    pub fn empty() -> Self {
        Self::new(vec![])
    }

    pub fn orders_handle(&self) -> Arc<Mutex<Vec<Order>>> {
        Arc::clone(&self.orders)
    }

    pub fn items_handle(&self) -> Arc<Mutex<Vec<OrderItem>>> {
        Arc::clone(&self.items)
    }
}

impl OrderRepository for MockOrderRepo {
    async fn list(
        &self,
        filter: Option<&str>,
        page: PageRequest,
    ) -> Result<Vec<OrderListItem>, CrmServiceError> {
        let mut matches: Vec<Order> = self
            .orders
            .lock()
            .unwrap()
            .iter()
            .filter(|o| {
                let Some(q) = filter else { return true };
                contains_ci(&o.order_number, q) || contains_ci(&self.company, q)
            })
            .cloned()
            .collect();
        matches.sort_by(|a, b| b.order_date.cmp(&a.order_date));
        Ok(page_slice(matches, page)
            .into_iter()
            .map(|order| OrderListItem {
                order,
                company: self.company.clone(),
            })
            .collect())
    }

    async fn list_for_customer(
        &self,
        customer_id: Uuid,
        range: DateRange,
        limit: u64,
    ) -> Result<Vec<Order>, CrmServiceError> {
        let mut matches: Vec<Order> = self
            .orders
            .lock()
            .unwrap()
            .iter()
            .filter(|o| o.customer_id == customer_id && within(range, o.order_date))
            .cloned()
            .collect();
        matches.sort_by(|a, b| b.order_date.cmp(&a.order_date));
        matches.truncate(limit as usize);
        Ok(matches)
    }

    async fn create_with_items(
        &self,
        order: &Order,
        items: &[OrderItem],
    ) -> Result<(), CrmServiceError> {
        self.orders.lock().unwrap().push(order.clone());
        self.items.lock().unwrap().extend_from_slice(items);
        Ok(())
    }

    async fn revenue(
        &self,
        customer_id: Uuid,
        window: Option<(DateTime<Utc>, DateTime<Utc>)>,
    ) -> Result<Decimal, CrmServiceError> {
        Ok(self
            .orders
            .lock()
            .unwrap()
            .iter()
            .filter(|o| o.customer_id == customer_id && o.status != OrderStatus::Cancelled)
            .filter(|o| {
                window.is_none_or(|(from, to)| o.order_date >= from && o.order_date <= to)
            })
            .map(|o| o.total_amount)
            .sum())
    }
}

// ── MockProductRepo ──────────────────────────────────────────────────────────

pub struct MockProductRepo {
    pub products: Arc<Mutex<Vec<Product>>>,
}

impl MockProductRepo {
    pub fn new(products: Vec<Product>) -> Self {
        Self {
            products: Arc::new(Mutex::new(products)),
        }
    }

    /// Simulate a catalog price change after orders were created.
    pub fn set_price(&self, product_id: Uuid, unit_price: Decimal) {
        let mut products = self.products.lock().unwrap();
        if let Some(p) = products.iter_mut().find(|p| p.id == product_id) {
            p.unit_price = unit_price;
        }
    }
}

impl ProductRepository for MockProductRepo {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Product>, CrmServiceError> {
        Ok(self
            .products
            .lock()
            .unwrap()
            .iter()
            .find(|p| p.id == id)
            .cloned())
    }

    async fn create(&self, product: &Product) -> Result<(), CrmServiceError> {
        self.products.lock().unwrap().push(product.clone());
        Ok(())
    }
}

// ── MockContactRepo ──────────────────────────────────────────────────────────

pub struct MockContactRepo {
    pub contacts: Arc<Mutex<Vec<Contact>>>,
    pub company: String,
}

impl MockContactRepo {
    pub fn new(contacts: Vec<Contact>) -> Self {
        Self {
            contacts: Arc::new(Mutex::new(contacts)),
            company: "Acme GmbH".to_owned(),
        }
    }

    pub fn empty() -> Self {
        Self::new(vec![])
    }

    pub fn contacts_handle(&self) -> Arc<Mutex<Vec<Contact>>> {
        Arc::clone(&self.contacts)
    }
}

impl ContactRepository for MockContactRepo {
    async fn list(
        &self,
        channel: Option<ContactChannel>,
        page: PageRequest,
    ) -> Result<Vec<ContactListItem>, CrmServiceError> {
        let mut matches: Vec<Contact> = self
            .contacts
            .lock()
            .unwrap()
            .iter()
            .filter(|c| channel.is_none_or(|ch| c.channel == ch))
            .cloned()
            .collect();
        matches.sort_by(|a, b| b.contact_at.cmp(&a.contact_at));
        Ok(page_slice(matches, page)
            .into_iter()
            .map(|contact| ContactListItem {
                contact,
                company: self.company.clone(),
            })
            .collect())
    }

    async fn list_for_customer(
        &self,
        customer_id: Uuid,
        range: DateRange,
        limit: u64,
    ) -> Result<Vec<Contact>, CrmServiceError> {
        let mut matches: Vec<Contact> = self
            .contacts
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.customer_id == customer_id && within(range, c.contact_at))
            .cloned()
            .collect();
        matches.sort_by(|a, b| b.contact_at.cmp(&a.contact_at));
        matches.truncate(limit as usize);
        Ok(matches)
    }

    async fn last_contact_at(
        &self,
        customer_id: Uuid,
    ) -> Result<Option<DateTime<Utc>>, CrmServiceError> {
        Ok(self
            .contacts
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.customer_id == customer_id)
            .map(|c| c.contact_at)
            .max())
    }

    async fn create(&self, contact: &Contact) -> Result<(), CrmServiceError> {
        self.contacts.lock().unwrap().push(contact.clone());
        Ok(())
    }
}

// ── Fixtures ─────────────────────────────────────────────────────────────────

pub fn user_with_password(email: &str, password: &str) -> User {
    User {
        id: Uuid::now_v7(),
        email: email.to_owned(),
        password_hash: hash_password(password).unwrap(),
        role: UserRole::Staff,
        created_at: Utc::now(),
    }
}

pub fn login_code_for(user_id: Uuid, code: &str, expires_in_secs: i64) -> LoginCode {
    let now = Utc::now();
    LoginCode {
        id: Uuid::now_v7(),
        user_id,
        code: code.to_owned(),
        expires_at: now + Duration::seconds(expires_in_secs),
        created_at: now,
    }
}

pub fn test_customer(company: &str) -> Customer {
    let now = Utc::now();
    Customer {
        id: Uuid::now_v7(),
        company: company.to_owned(),
        contact_name: Some("Max Mustermann".to_owned()),
        email: Some("max@acme.example".to_owned()),
        phone: Some("+43 1 234567".to_owned()),
        notes: None,
        street: None,
        zip_code: None,
        city: None,
        created_at: now,
        updated_at: now,
    }
}

pub fn order_with(
    customer_id: Uuid,
    number: &str,
    status: OrderStatus,
    total: Decimal,
    order_date: DateTime<Utc>,
) -> Order {
    Order {
        id: Uuid::now_v7(),
        customer_id,
        order_number: number.to_owned(),
        order_date,
        status,
        total_amount: total,
        currency: "EUR".to_owned(),
        created_at: order_date,
    }
}

pub fn contact_at(customer_id: Uuid, channel: ContactChannel, at: DateTime<Utc>) -> Contact {
    Contact {
        id: Uuid::now_v7(),
        customer_id,
        user_id: None,
        channel,
        subject: "Status-Update".to_owned(),
        notes: None,
        rating: Some(3),
        contact_at: at,
        created_at: at,
    }
}

pub fn test_product(sku: &str, unit_price: Decimal) -> Product {
    Product {
        id: Uuid::now_v7(),
        sku: sku.to_owned(),
        name: format!("Product {sku}"),
        unit_price,
        created_at: Utc::now(),
    }
}
