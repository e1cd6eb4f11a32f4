use anyhow::Context as _;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sea_orm::sea_query::Expr;
use sea_orm::sea_query::extension::postgres::PgExpr;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, Condition, DatabaseConnection,
    DatabaseTransaction, EntityTrait, FromQueryResult, QueryFilter, QueryOrder, QuerySelect,
    TransactionTrait,
};
use uuid::Uuid;

use kontor_crm_schema::{contacts, customers, login_codes, order_items, orders, products, users};
use kontor_domain::contact::ContactChannel;
use kontor_domain::order::OrderStatus;
use kontor_domain::pagination::PageRequest;
use kontor_domain::user::UserRole;

use crate::domain::repository::{
    ContactRepository, CustomerRepository, LoginCodeRepository, OrderRepository,
    ProductRepository, UserRepository,
};
use crate::domain::types::{
    Contact, ContactListItem, Customer, CustomerFields, DateRange, LoginCode, Order, OrderItem,
    OrderListItem, Product, User,
};
use crate::error::CrmServiceError;

// ── User repository ──────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbUserRepository {
    pub db: DatabaseConnection,
}

impl UserRepository for DbUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, CrmServiceError> {
        let model = users::Entity::find()
            .filter(users::Column::Email.eq(email))
            .one(&self.db)
            .await
            .context("find user by email")?;
        model.map(user_from_model).transpose()
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, CrmServiceError> {
        let model = users::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find user by id")?;
        model.map(user_from_model).transpose()
    }

    async fn create(&self, user: &User) -> Result<(), CrmServiceError> {
        users::ActiveModel {
            id: Set(user.id),
            email: Set(user.email.clone()),
            password_hash: Set(user.password_hash.clone()),
            role: Set(user.role.as_u8() as i16),
            created_at: Set(user.created_at),
        }
        .insert(&self.db)
        .await
        .context("create user")?;
        Ok(())
    }
}

fn user_from_model(model: users::Model) -> Result<User, CrmServiceError> {
    let role = UserRole::from_u8(model.role as u8)
        .ok_or_else(|| anyhow::anyhow!("unknown user role {}", model.role))?;
    Ok(User {
        id: model.id,
        email: model.email,
        password_hash: model.password_hash,
        role,
        created_at: model.created_at,
    })
}

// ── LoginCode repository ─────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbLoginCodeRepository {
    pub db: DatabaseConnection,
}

impl LoginCodeRepository for DbLoginCodeRepository {
    async fn delete_for_user(&self, user_id: Uuid) -> Result<u64, CrmServiceError> {
        let result = login_codes::Entity::delete_many()
            .filter(login_codes::Column::UserId.eq(user_id))
            .exec(&self.db)
            .await
            .context("delete login codes for user")?;
        Ok(result.rows_affected)
    }

    async fn create(&self, code: &LoginCode) -> Result<(), CrmServiceError> {
        login_codes::ActiveModel {
            id: Set(code.id),
            user_id: Set(code.user_id),
            code: Set(code.code.clone()),
            expires_at: Set(code.expires_at),
            created_at: Set(code.created_at),
        }
        .insert(&self.db)
        .await
        .context("create login code")?;
        Ok(())
    }

    async fn find_latest(
        &self,
        user_id: Uuid,
        code: &str,
    ) -> Result<Option<LoginCode>, CrmServiceError> {
        let model = login_codes::Entity::find()
            .filter(login_codes::Column::UserId.eq(user_id))
            .filter(login_codes::Column::Code.eq(code))
            .order_by_desc(login_codes::Column::CreatedAt)
            .one(&self.db)
            .await
            .context("find latest login code")?;
        Ok(model.map(login_code_from_model))
    }

    async fn delete(&self, id: Uuid) -> Result<bool, CrmServiceError> {
        let result = login_codes::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .context("delete login code")?;
        Ok(result.rows_affected > 0)
    }
}

fn login_code_from_model(model: login_codes::Model) -> LoginCode {
    LoginCode {
        id: model.id,
        user_id: model.user_id,
        code: model.code,
        expires_at: model.expires_at,
        created_at: model.created_at,
    }
}

// ── Customer repository ──────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbCustomerRepository {
    pub db: DatabaseConnection,
}

impl CustomerRepository for DbCustomerRepository {
    async fn list(
        &self,
        filter: Option<&str>,
        page: PageRequest,
    ) -> Result<Vec<Customer>, CrmServiceError> {
        let page = page.clamped();
        let mut query = customers::Entity::find();
        if let Some(q) = filter {
            let pattern = format!("%{q}%");
            query = query.filter(
                Condition::any()
                    .add(Expr::col(customers::Column::Company).ilike(pattern.as_str()))
                    .add(Expr::col(customers::Column::ContactName).ilike(pattern.as_str()))
                    .add(Expr::col(customers::Column::Email).ilike(pattern.as_str()))
                    .add(Expr::col(customers::Column::Phone).ilike(pattern.as_str()))
                    .add(Expr::col(customers::Column::Notes).ilike(pattern.as_str())),
            );
        }
        let models = query
            .order_by_asc(customers::Column::Company)
            .offset(page.offset())
            .limit(page.per_page as u64)
            .all(&self.db)
            .await
            .context("list customers")?;
        Ok(models.into_iter().map(customer_from_model).collect())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Customer>, CrmServiceError> {
        let model = customers::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find customer by id")?;
        Ok(model.map(customer_from_model))
    }

    async fn create(&self, customer: &Customer) -> Result<(), CrmServiceError> {
        customers::ActiveModel {
            id: Set(customer.id),
            company: Set(customer.company.clone()),
            contact_name: Set(customer.contact_name.clone()),
            email: Set(customer.email.clone()),
            phone: Set(customer.phone.clone()),
            notes: Set(customer.notes.clone()),
            street: Set(customer.street.clone()),
            zip_code: Set(customer.zip_code.clone()),
            city: Set(customer.city.clone()),
            created_at: Set(customer.created_at),
            updated_at: Set(customer.updated_at),
        }
        .insert(&self.db)
        .await
        .context("create customer")?;
        Ok(())
    }

    async fn update(&self, id: Uuid, fields: &CustomerFields) -> Result<(), CrmServiceError> {
        customers::ActiveModel {
            id: Set(id),
            company: Set(fields.company.clone()),
            contact_name: Set(fields.contact_name.clone()),
            email: Set(fields.email.clone()),
            phone: Set(fields.phone.clone()),
            notes: Set(fields.notes.clone()),
            street: Set(fields.street.clone()),
            zip_code: Set(fields.zip_code.clone()),
            city: Set(fields.city.clone()),
            updated_at: Set(Utc::now()),
            ..Default::default()
        }
        .update(&self.db)
        .await
        .context("update customer")?;
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<bool, CrmServiceError> {
        let result = customers::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .context("delete customer")?;
        Ok(result.rows_affected > 0)
    }
}

fn customer_from_model(model: customers::Model) -> Customer {
    Customer {
        id: model.id,
        company: model.company,
        contact_name: model.contact_name,
        email: model.email,
        phone: model.phone,
        notes: model.notes,
        street: model.street,
        zip_code: model.zip_code,
        city: model.city,
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

// ── Order repository ─────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbOrderRepository {
    pub db: DatabaseConnection,
}

impl OrderRepository for DbOrderRepository {
    async fn list(
        &self,
        filter: Option<&str>,
        page: PageRequest,
    ) -> Result<Vec<OrderListItem>, CrmServiceError> {
        let page = page.clamped();
        let mut query = orders::Entity::find().find_also_related(customers::Entity);
        if let Some(q) = filter {
            let pattern = format!("%{q}%");
            query = query.filter(
                Condition::any()
                    .add(
                        Expr::col((orders::Entity, orders::Column::OrderNumber))
                            .ilike(pattern.as_str()),
                    )
                    .add(
                        Expr::col((customers::Entity, customers::Column::Company))
                            .ilike(pattern.as_str()),
                    ),
            );
        }
        let rows = query
            .order_by_desc(orders::Column::OrderDate)
            .offset(page.offset())
            .limit(page.per_page as u64)
            .all(&self.db)
            .await
            .context("list orders")?;

        rows.into_iter()
            .map(|(order, customer)| {
                Ok(OrderListItem {
                    order: order_from_model(order)?,
                    company: customer.map(|c| c.company).unwrap_or_default(),
                })
            })
            .collect()
    }

    async fn list_for_customer(
        &self,
        customer_id: Uuid,
        range: DateRange,
        limit: u64,
    ) -> Result<Vec<Order>, CrmServiceError> {
        let mut query = orders::Entity::find().filter(orders::Column::CustomerId.eq(customer_id));
        if let Some(from) = range.from {
            query = query.filter(orders::Column::OrderDate.gte(from));
        }
        if let Some(to) = range.to {
            query = query.filter(orders::Column::OrderDate.lte(to));
        }
        let models = query
            .order_by_desc(orders::Column::OrderDate)
            .limit(limit)
            .all(&self.db)
            .await
            .context("list orders for customer")?;
        models.into_iter().map(order_from_model).collect()
    }

    async fn create_with_items(
        &self,
        order: &Order,
        items: &[OrderItem],
    ) -> Result<(), CrmServiceError> {
        self.db
            .transaction::<_, (), sea_orm::DbErr>(|txn| {
                let order = order.clone();
                let items = items.to_vec();
                Box::pin(async move {
                    insert_order(txn, &order).await?;
                    for item in &items {
                        insert_order_item(txn, item).await?;
                    }
                    Ok(())
                })
            })
            .await
            .context("create order with items")?;
        Ok(())
    }

    async fn revenue(
        &self,
        customer_id: Uuid,
        window: Option<(DateTime<Utc>, DateTime<Utc>)>,
    ) -> Result<Decimal, CrmServiceError> {
        #[derive(Debug, FromQueryResult)]
        struct RevenueRow {
            total: Option<Decimal>,
        }

        let mut query = orders::Entity::find()
            .select_only()
            .column_as(orders::Column::TotalAmount.sum(), "total")
            .filter(orders::Column::CustomerId.eq(customer_id))
            .filter(orders::Column::Status.ne(OrderStatus::Cancelled.as_str()));
        if let Some((from, to)) = window {
            query = query
                .filter(orders::Column::OrderDate.gte(from))
                .filter(orders::Column::OrderDate.lte(to));
        }

        let row = query
            .into_model::<RevenueRow>()
            .one(&self.db)
            .await
            .context("sum customer revenue")?;
        Ok(row.and_then(|r| r.total).unwrap_or_default())
    }
}

async fn insert_order(txn: &DatabaseTransaction, order: &Order) -> Result<(), sea_orm::DbErr> {
    orders::ActiveModel {
        id: Set(order.id),
        customer_id: Set(order.customer_id),
        order_number: Set(order.order_number.clone()),
        order_date: Set(order.order_date),
        status: Set(order.status.as_str().to_owned()),
        total_amount: Set(order.total_amount),
        currency: Set(order.currency.clone()),
        created_at: Set(order.created_at),
    }
    .insert(txn)
    .await?;
    Ok(())
}

async fn insert_order_item(
    txn: &DatabaseTransaction,
    item: &OrderItem,
) -> Result<(), sea_orm::DbErr> {
    order_items::ActiveModel {
        id: Set(item.id),
        order_id: Set(item.order_id),
        product_id: Set(item.product_id),
        quantity: Set(item.quantity),
        unit_price: Set(item.unit_price),
    }
    .insert(txn)
    .await?;
    Ok(())
}

fn order_from_model(model: orders::Model) -> Result<Order, CrmServiceError> {
    let status = OrderStatus::parse(&model.status)
        .ok_or_else(|| anyhow::anyhow!("unknown order status {:?}", model.status))?;
    Ok(Order {
        id: model.id,
        customer_id: model.customer_id,
        order_number: model.order_number,
        order_date: model.order_date,
        status,
        total_amount: model.total_amount,
        currency: model.currency,
        created_at: model.created_at,
    })
}

// ── Product repository ───────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbProductRepository {
    pub db: DatabaseConnection,
}

impl ProductRepository for DbProductRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Product>, CrmServiceError> {
        let model = products::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find product by id")?;
        Ok(model.map(product_from_model))
    }

    async fn create(&self, product: &Product) -> Result<(), CrmServiceError> {
        products::ActiveModel {
            id: Set(product.id),
            sku: Set(product.sku.clone()),
            name: Set(product.name.clone()),
            unit_price: Set(product.unit_price),
            created_at: Set(product.created_at),
        }
        .insert(&self.db)
        .await
        .context("create product")?;
        Ok(())
    }
}

fn product_from_model(model: products::Model) -> Product {
    Product {
        id: model.id,
        sku: model.sku,
        name: model.name,
        unit_price: model.unit_price,
        created_at: model.created_at,
    }
}

// ── Contact repository ───────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbContactRepository {
    pub db: DatabaseConnection,
}

impl ContactRepository for DbContactRepository {
    async fn list(
        &self,
        channel: Option<ContactChannel>,
        page: PageRequest,
    ) -> Result<Vec<ContactListItem>, CrmServiceError> {
        let page = page.clamped();
        let mut query = contacts::Entity::find().find_also_related(customers::Entity);
        if let Some(channel) = channel {
            query = query.filter(contacts::Column::Channel.eq(channel.as_str()));
        }
        let rows = query
            .order_by_desc(contacts::Column::ContactAt)
            .offset(page.offset())
            .limit(page.per_page as u64)
            .all(&self.db)
            .await
            .context("list contacts")?;

        rows.into_iter()
            .map(|(contact, customer)| {
                Ok(ContactListItem {
                    contact: contact_from_model(contact)?,
                    company: customer.map(|c| c.company).unwrap_or_default(),
                })
            })
            .collect()
    }

    async fn list_for_customer(
        &self,
        customer_id: Uuid,
        range: DateRange,
        limit: u64,
    ) -> Result<Vec<Contact>, CrmServiceError> {
        let mut query =
            contacts::Entity::find().filter(contacts::Column::CustomerId.eq(customer_id));
        if let Some(from) = range.from {
            query = query.filter(contacts::Column::ContactAt.gte(from));
        }
        if let Some(to) = range.to {
            query = query.filter(contacts::Column::ContactAt.lte(to));
        }
        let models = query
            .order_by_desc(contacts::Column::ContactAt)
            .limit(limit)
            .all(&self.db)
            .await
            .context("list contacts for customer")?;
        models.into_iter().map(contact_from_model).collect()
    }

    async fn last_contact_at(
        &self,
        customer_id: Uuid,
    ) -> Result<Option<DateTime<Utc>>, CrmServiceError> {
        let model = contacts::Entity::find()
            .filter(contacts::Column::CustomerId.eq(customer_id))
            .order_by_desc(contacts::Column::ContactAt)
            .one(&self.db)
            .await
            .context("find last contact")?;
        Ok(model.map(|m| m.contact_at))
    }

    async fn create(&self, contact: &Contact) -> Result<(), CrmServiceError> {
        contacts::ActiveModel {
            id: Set(contact.id),
            customer_id: Set(contact.customer_id),
            user_id: Set(contact.user_id),
            channel: Set(contact.channel.as_str().to_owned()),
            subject: Set(contact.subject.clone()),
            notes: Set(contact.notes.clone()),
            rating: Set(contact.rating.map(|r| r as i16)),
            contact_at: Set(contact.contact_at),
            created_at: Set(contact.created_at),
        }
        .insert(&self.db)
        .await
        .context("create contact")?;
        Ok(())
    }
}

fn contact_from_model(model: contacts::Model) -> Result<Contact, CrmServiceError> {
    let channel = ContactChannel::parse(&model.channel)
        .ok_or_else(|| anyhow::anyhow!("unknown contact channel {:?}", model.channel))?;
    Ok(Contact {
        id: model.id,
        customer_id: model.customer_id,
        user_id: model.user_id,
        channel,
        subject: model.subject,
        notes: model.notes,
        rating: model.rating.map(|r| r as u8),
        contact_at: model.contact_at,
        created_at: model.created_at,
    })
}
