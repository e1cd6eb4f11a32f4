use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use kontor_domain::order::OrderStatus;
use kontor_domain::pagination::PageRequest;

use crate::domain::repository::{CustomerRepository, OrderRepository, ProductRepository};
use crate::domain::types::{ORDERS_PER_PAGE, Order, OrderItem, OrderListItem};
use crate::error::CrmServiceError;

// ── ListOrders ───────────────────────────────────────────────────────────────

pub struct ListOrdersUseCase<O: OrderRepository> {
    pub orders: O,
}

impl<O: OrderRepository> ListOrdersUseCase<O> {
    pub async fn execute(
        &self,
        q: Option<String>,
        page: u32,
    ) -> Result<Vec<OrderListItem>, CrmServiceError> {
        let filter = q.as_deref().map(str::trim).filter(|s| !s.is_empty());
        self.orders
            .list(
                filter,
                PageRequest {
                    per_page: ORDERS_PER_PAGE,
                    page,
                },
            )
            .await
    }
}

// ── CreateOrder ──────────────────────────────────────────────────────────────

pub struct OrderItemInput {
    pub product_id: Uuid,
    pub quantity: i32,
}

pub struct CreateOrderInput {
    pub customer_id: Uuid,
    pub order_number: String,
    pub order_date: Option<DateTime<Utc>>,
    pub status: OrderStatus,
    pub currency: String,
    pub items: Vec<OrderItemInput>,
}

/// Create an order with its items. The unit price of every item is a snapshot
/// of the product's current price, and the order total is computed here once
/// and stored — it is never recomputed from the items afterwards.
pub struct CreateOrderUseCase<O, P, C>
where
    O: OrderRepository,
    P: ProductRepository,
    C: CustomerRepository,
{
    pub orders: O,
    pub products: P,
    pub customers: C,
}

impl<O, P, C> CreateOrderUseCase<O, P, C>
where
    O: OrderRepository,
    P: ProductRepository,
    C: CustomerRepository,
{
    pub async fn execute(&self, input: CreateOrderInput) -> Result<Order, CrmServiceError> {
        if input.order_number.trim().is_empty() || input.items.is_empty() {
            return Err(CrmServiceError::MissingData);
        }
        self.customers
            .find_by_id(input.customer_id)
            .await?
            .ok_or(CrmServiceError::CustomerNotFound)?;

        let now = Utc::now();
        let order_id = Uuid::now_v7();

        let mut items = Vec::with_capacity(input.items.len());
        let mut total = Decimal::ZERO;
        for item in &input.items {
            if item.quantity <= 0 {
                return Err(CrmServiceError::InvalidQuantity);
            }
            let product = self
                .products
                .find_by_id(item.product_id)
                .await?
                .ok_or(CrmServiceError::ProductNotFound)?;

            total += product.unit_price * Decimal::from(item.quantity);
            items.push(OrderItem {
                id: Uuid::now_v7(),
                order_id,
                product_id: product.id,
                quantity: item.quantity,
                unit_price: product.unit_price,
            });
        }

        let order = Order {
            id: order_id,
            customer_id: input.customer_id,
            order_number: input.order_number,
            order_date: input.order_date.unwrap_or(now),
            status: input.status,
            total_amount: total,
            currency: input.currency,
            created_at: now,
        };

        self.orders.create_with_items(&order, &items).await?;
        Ok(order)
    }
}
