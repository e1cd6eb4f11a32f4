use chrono::{DateTime, Utc};
use uuid::Uuid;

use kontor_domain::contact::ContactChannel;
use kontor_domain::pagination::PageRequest;

use crate::domain::repository::{ContactRepository, CustomerRepository};
use crate::domain::types::{CONTACTS_PER_PAGE, Contact, ContactListItem};
use crate::error::CrmServiceError;

// ── ListContacts ─────────────────────────────────────────────────────────────

pub struct ListContactsUseCase<K: ContactRepository> {
    pub contacts: K,
}

impl<K: ContactRepository> ListContactsUseCase<K> {
    pub async fn execute(
        &self,
        channel: Option<ContactChannel>,
        page: u32,
    ) -> Result<Vec<ContactListItem>, CrmServiceError> {
        self.contacts
            .list(
                channel,
                PageRequest {
                    per_page: CONTACTS_PER_PAGE,
                    page,
                },
            )
            .await
    }
}

// ── LogContact ───────────────────────────────────────────────────────────────

pub struct LogContactInput {
    pub customer_id: Uuid,
    /// Authoring user, when known.
    pub user_id: Option<Uuid>,
    pub channel: ContactChannel,
    pub subject: String,
    pub notes: Option<String>,
    pub rating: Option<u8>,
    /// When the contact actually happened; defaults to now. May lie in the
    /// past — contacts can be logged after the fact.
    pub contact_at: Option<DateTime<Utc>>,
}

pub struct LogContactUseCase<K, C>
where
    K: ContactRepository,
    C: CustomerRepository,
{
    pub contacts: K,
    pub customers: C,
}

impl<K, C> LogContactUseCase<K, C>
where
    K: ContactRepository,
    C: CustomerRepository,
{
    pub async fn execute(&self, input: LogContactInput) -> Result<(), CrmServiceError> {
        if input.subject.trim().is_empty() {
            return Err(CrmServiceError::MissingData);
        }
        if let Some(rating) = input.rating {
            if !(1..=5).contains(&rating) {
                return Err(CrmServiceError::InvalidRating);
            }
        }
        self.customers
            .find_by_id(input.customer_id)
            .await?
            .ok_or(CrmServiceError::CustomerNotFound)?;

        let now = Utc::now();
        let contact = Contact {
            id: Uuid::now_v7(),
            customer_id: input.customer_id,
            user_id: input.user_id,
            channel: input.channel,
            subject: input.subject,
            notes: input.notes,
            rating: input.rating,
            contact_at: input.contact_at.unwrap_or(now),
            created_at: now,
        };
        self.contacts.create(&contact).await
    }
}
