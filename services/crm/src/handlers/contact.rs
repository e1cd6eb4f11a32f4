use axum::{
    Json,
    extract::{Query, State},
};
use serde::{Deserialize, Serialize};

use kontor_domain::contact::ContactChannel;
use kontor_session::identity::Identity;

use crate::domain::types::ContactListItem;
use crate::error::CrmServiceError;
use crate::state::AppState;
use crate::usecase::contact::ListContactsUseCase;

#[derive(Serialize)]
pub struct ContactListResponse {
    pub id: String,
    pub company: String,
    pub channel: ContactChannel,
    pub subject: String,
    pub notes: Option<String>,
    pub rating: Option<u8>,
    #[serde(serialize_with = "kontor_core::serde::to_rfc3339_ms")]
    pub contact_at: chrono::DateTime<chrono::Utc>,
}

impl From<ContactListItem> for ContactListResponse {
    fn from(item: ContactListItem) -> Self {
        Self {
            id: item.contact.id.to_string(),
            company: item.company,
            channel: item.contact.channel,
            subject: item.contact.subject,
            notes: item.contact.notes,
            rating: item.contact.rating,
            contact_at: item.contact.contact_at,
        }
    }
}

#[derive(Deserialize)]
pub struct ContactListQuery {
    pub channel: Option<String>,
    #[serde(default = "default_page")]
    pub page: u32,
}

fn default_page() -> u32 {
    1
}

/// `all`, empty, or absent means no channel filter; anything else must be a
/// known channel.
pub(crate) fn parse_channel_filter(
    raw: Option<&str>,
) -> Result<Option<ContactChannel>, CrmServiceError> {
    match raw.map(str::trim).filter(|s| !s.is_empty()) {
        None => Ok(None),
        Some(s) if s.eq_ignore_ascii_case("all") => Ok(None),
        Some(s) => ContactChannel::parse(&s.to_lowercase())
            .map(Some)
            .ok_or(CrmServiceError::InvalidChannel),
    }
}

// ── GET /contacts ────────────────────────────────────────────────────────────

pub async fn list_contacts(
    _identity: Identity,
    State(state): State<AppState>,
    Query(query): Query<ContactListQuery>,
) -> Result<Json<Vec<ContactListResponse>>, CrmServiceError> {
    let channel = parse_channel_filter(query.channel.as_deref())?;
    let usecase = ListContactsUseCase {
        contacts: state.contact_repo(),
    };
    let contacts = usecase.execute(channel, query.page).await?;
    Ok(Json(contacts.into_iter().map(Into::into).collect()))
}
