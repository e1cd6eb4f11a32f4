use chrono::{Duration, Utc};
use rust_decimal_macros::dec;
use uuid::Uuid;

use kontor_domain::contact::ContactChannel;
use kontor_domain::order::OrderStatus;

use kontor_crm::usecase::dashboard::{DashboardInput, DashboardUseCase};

use crate::helpers::{
    MockContactRepo, MockCustomerRepo, MockOrderRepo, contact_at, order_with, test_customer,
};

fn input() -> DashboardInput {
    DashboardInput {
        q: None,
        q_orders: None,
        channel: None,
    }
}

#[tokio::test]
async fn should_cap_every_section_at_ten_rows() {
    let now = Utc::now();
    let customer_id = Uuid::now_v7();
    let customers: Vec<_> = (0..15).map(|i| test_customer(&format!("Customer {i:02}"))).collect();
    let orders: Vec<_> = (0..15)
        .map(|i| {
            order_with(
                customer_id,
                &format!("ORD-001-{i:03}"),
                OrderStatus::Open,
                dec!(10.00),
                now - Duration::days(i),
            )
        })
        .collect();
    let contacts: Vec<_> = (0..15)
        .map(|i| contact_at(customer_id, ContactChannel::Email, now - Duration::hours(i)))
        .collect();

    let uc = DashboardUseCase {
        customers: MockCustomerRepo::new(customers),
        orders: MockOrderRepo::new(orders),
        contacts: MockContactRepo::new(contacts),
    };

    let dashboard = uc.execute(input()).await.unwrap();

    assert_eq!(dashboard.customers.len(), 10);
    assert_eq!(dashboard.orders.len(), 10);
    assert_eq!(dashboard.contacts.len(), 10);
}

#[tokio::test]
async fn should_attach_days_since_last_contact_per_customer() {
    let active = test_customer("Acme GmbH");
    let dormant = test_customer("Blue Widgets OG");
    let contacts = vec![contact_at(
        active.id,
        ContactChannel::Phone,
        Utc::now() - Duration::days(3),
    )];

    let uc = DashboardUseCase {
        customers: MockCustomerRepo::new(vec![active.clone(), dormant.clone()]),
        orders: MockOrderRepo::empty(),
        contacts: MockContactRepo::new(contacts),
    };

    let dashboard = uc.execute(input()).await.unwrap();

    let row = |id: Uuid| {
        dashboard
            .customers
            .iter()
            .find(|r| r.customer.id == id)
            .unwrap()
    };
    assert_eq!(row(active.id).days_since_last_contact, Some(3));
    assert_eq!(row(dormant.id).days_since_last_contact, None);
}

#[tokio::test]
async fn should_apply_section_filters_independently() {
    let now = Utc::now();
    let acme = test_customer("Acme GmbH");
    let blue = test_customer("Blue Widgets OG");
    let orders = vec![
        order_with(acme.id, "ORD-001-001", OrderStatus::Paid, dec!(10.00), now),
        order_with(acme.id, "ORD-002-001", OrderStatus::Open, dec!(20.00), now),
    ];
    let contacts = vec![
        contact_at(acme.id, ContactChannel::Phone, now),
        contact_at(acme.id, ContactChannel::Meeting, now),
    ];

    let uc = DashboardUseCase {
        customers: MockCustomerRepo::new(vec![acme.clone(), blue]),
        orders: MockOrderRepo::new(orders),
        contacts: MockContactRepo::new(contacts),
    };

    let dashboard = uc
        .execute(DashboardInput {
            q: Some("blue".to_owned()),
            q_orders: Some("ORD-002".to_owned()),
            channel: Some(ContactChannel::Meeting),
        })
        .await
        .unwrap();

    assert_eq!(dashboard.customers.len(), 1);
    assert_eq!(dashboard.customers[0].customer.company, "Blue Widgets OG");
    assert_eq!(dashboard.orders.len(), 1);
    assert_eq!(dashboard.orders[0].order.order_number, "ORD-002-001");
    assert_eq!(dashboard.contacts.len(), 1);
    assert_eq!(dashboard.contacts[0].contact.channel, ContactChannel::Meeting);
}

#[tokio::test]
async fn should_return_empty_sections_on_fresh_database() {
    let uc = DashboardUseCase {
        customers: MockCustomerRepo::empty(),
        orders: MockOrderRepo::empty(),
        contacts: MockContactRepo::empty(),
    };

    let dashboard = uc.execute(input()).await.unwrap();

    assert!(dashboard.customers.is_empty());
    assert!(dashboard.orders.is_empty());
    assert!(dashboard.contacts.is_empty());
}
