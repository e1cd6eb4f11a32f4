use chrono::{Duration, Utc};
use uuid::Uuid;

use kontor_domain::contact::ContactChannel;

use kontor_crm::error::CrmServiceError;
use kontor_crm::usecase::contact::{ListContactsUseCase, LogContactInput, LogContactUseCase};

use crate::helpers::{MockContactRepo, MockCustomerRepo, contact_at, test_customer};

fn log_input(customer_id: Uuid, subject: &str, rating: Option<u8>) -> LogContactInput {
    LogContactInput {
        customer_id,
        user_id: None,
        channel: ContactChannel::Phone,
        subject: subject.to_owned(),
        notes: None,
        rating,
        contact_at: None,
    }
}

#[tokio::test]
async fn should_log_contact_with_default_timestamp() {
    let customer = test_customer("Acme GmbH");
    let repo = MockContactRepo::empty();
    let contacts = repo.contacts_handle();

    let uc = LogContactUseCase {
        contacts: repo,
        customers: MockCustomerRepo::new(vec![customer.clone()]),
    };

    let before = Utc::now();
    uc.execute(log_input(customer.id, "Kickoff Meeting", Some(4)))
        .await
        .unwrap();

    let contacts = contacts.lock().unwrap();
    assert_eq!(contacts.len(), 1);
    let contact = &contacts[0];
    assert_eq!(contact.customer_id, customer.id);
    assert_eq!(contact.subject, "Kickoff Meeting");
    assert_eq!(contact.rating, Some(4));
    assert!(contact.contact_at >= before, "defaults to now");
}

#[tokio::test]
async fn should_log_contact_backdated() {
    let customer = test_customer("Acme GmbH");
    let repo = MockContactRepo::empty();
    let contacts = repo.contacts_handle();

    let uc = LogContactUseCase {
        contacts: repo,
        customers: MockCustomerRepo::new(vec![customer.clone()]),
    };

    let last_week = Utc::now() - Duration::days(7);
    uc.execute(LogContactInput {
        contact_at: Some(last_week),
        ..log_input(customer.id, "Quartalsgespräch", None)
    })
    .await
    .unwrap();

    let contacts = contacts.lock().unwrap();
    assert_eq!(contacts[0].contact_at, last_week);
    assert!(
        contacts[0].contact_at < contacts[0].created_at,
        "the contact event may predate its log entry"
    );
}

#[tokio::test]
async fn should_reject_rating_outside_1_to_5() {
    let customer = test_customer("Acme GmbH");

    for rating in [0u8, 6] {
        let uc = LogContactUseCase {
            contacts: MockContactRepo::empty(),
            customers: MockCustomerRepo::new(vec![customer.clone()]),
        };
        let result = uc
            .execute(log_input(customer.id, "Support-Anfrage", Some(rating)))
            .await;
        assert!(
            matches!(result, Err(CrmServiceError::InvalidRating)),
            "rating {rating} must be rejected"
        );
    }
}

#[tokio::test]
async fn should_reject_empty_subject() {
    let customer = test_customer("Acme GmbH");
    let uc = LogContactUseCase {
        contacts: MockContactRepo::empty(),
        customers: MockCustomerRepo::new(vec![customer.clone()]),
    };

    let result = uc.execute(log_input(customer.id, "   ", None)).await;

    assert!(matches!(result, Err(CrmServiceError::MissingData)));
}

#[tokio::test]
async fn should_reject_contact_for_unknown_customer() {
    let uc = LogContactUseCase {
        contacts: MockContactRepo::empty(),
        customers: MockCustomerRepo::empty(),
    };

    let result = uc.execute(log_input(Uuid::now_v7(), "Status-Update", None)).await;

    assert!(matches!(result, Err(CrmServiceError::CustomerNotFound)));
}

#[tokio::test]
async fn should_list_contacts_newest_first() {
    let customer_id = Uuid::now_v7();
    let now = Utc::now();
    let repo = MockContactRepo::new(vec![
        contact_at(customer_id, ContactChannel::Phone, now - Duration::days(2)),
        contact_at(customer_id, ContactChannel::Email, now),
        contact_at(customer_id, ContactChannel::Chat, now - Duration::days(1)),
    ]);

    let uc = ListContactsUseCase { contacts: repo };
    let rows = uc.execute(None, 1).await.unwrap();

    let channels: Vec<ContactChannel> = rows.iter().map(|r| r.contact.channel).collect();
    assert_eq!(
        channels,
        vec![ContactChannel::Email, ContactChannel::Chat, ContactChannel::Phone]
    );
}

#[tokio::test]
async fn should_filter_contacts_by_channel() {
    let customer_id = Uuid::now_v7();
    let now = Utc::now();
    let repo = MockContactRepo::new(vec![
        contact_at(customer_id, ContactChannel::Phone, now),
        contact_at(customer_id, ContactChannel::Meeting, now),
        contact_at(customer_id, ContactChannel::Phone, now - Duration::days(1)),
    ]);

    let uc = ListContactsUseCase { contacts: repo };
    let rows = uc.execute(Some(ContactChannel::Phone), 1).await.unwrap();

    assert_eq!(rows.len(), 2);
    assert!(rows.iter().all(|r| r.contact.channel == ContactChannel::Phone));
}

#[tokio::test]
async fn should_paginate_contacts_without_overlap() {
    let customer_id = Uuid::now_v7();
    let now = Utc::now();
    let seed: Vec<_> = (0..45)
        .map(|i| contact_at(customer_id, ContactChannel::Email, now - Duration::hours(i)))
        .collect();
    let repo = MockContactRepo::new(seed);
    let uc = ListContactsUseCase { contacts: repo };

    let page1 = uc.execute(None, 1).await.unwrap();
    let page2 = uc.execute(None, 2).await.unwrap();
    let page3 = uc.execute(None, 3).await.unwrap();

    assert_eq!(page1.len(), 20);
    assert_eq!(page2.len(), 20);
    assert_eq!(page3.len(), 5);

    let mut seen: Vec<Uuid> = Vec::new();
    for row in page1.iter().chain(&page2).chain(&page3) {
        assert!(!seen.contains(&row.contact.id), "no duplicates across pages");
        seen.push(row.contact.id);
    }
    assert_eq!(seen.len(), 45);
}
