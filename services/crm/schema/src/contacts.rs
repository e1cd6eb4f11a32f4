use sea_orm::entity::prelude::*;

/// Customer contact log entry. `contact_at` is when the contact happened,
/// which may predate `created_at` (events can be logged after the fact).
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "contacts")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub customer_id: Uuid,
    /// Authoring user; NULL once the author account is deleted.
    pub user_id: Option<Uuid>,
    /// One of `phone`, `email`, `meeting`, `chat`.
    pub channel: String,
    pub subject: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub notes: Option<String>,
    /// Optional 1–5 rating of the contact.
    pub rating: Option<i16>,
    pub contact_at: chrono::DateTime<chrono::Utc>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::customers::Entity",
        from = "Column::CustomerId",
        to = "super::customers::Column::Id"
    )]
    Customers,
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::UserId",
        to = "super::users::Column::Id"
    )]
    Users,
}

impl Related<super::customers::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Customers.def()
    }
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Users.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
