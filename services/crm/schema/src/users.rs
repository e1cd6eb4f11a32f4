use sea_orm::entity::prelude::*;

/// User account. The email doubles as the login name and is stored trimmed
/// and lowercased.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub email: String,
    /// argon2 PHC string; never the plaintext.
    pub password_hash: String,
    /// Wire value of `kontor_domain::user::UserRole` (0 = Staff, 1 = Chef).
    pub role: i16,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::login_codes::Entity")]
    LoginCodes,
    #[sea_orm(has_many = "super::contacts::Entity")]
    Contacts,
}

impl Related<super::login_codes::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::LoginCodes.def()
    }
}

impl Related<super::contacts::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Contacts.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
