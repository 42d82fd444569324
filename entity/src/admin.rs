use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "admin")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub admin_code: String,
    #[sea_orm(unique, nullable)]
    pub identity_uid: Option<String>,
    #[sea_orm(unique)]
    pub username: String,
    #[sea_orm(unique)]
    pub email: String,
    pub password_hash: Option<String>,
    pub phone_no: Option<String>,
    /// Either `Admin` or `SuperAdmin`.
    pub role: String,
    /// Administrative content (review queue, FAQs, feedback, blog posts) as one JSON object.
    pub content: Json,
    pub is_active: bool,
    pub last_login: Option<DateTimeUtc>,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::admin_permission::Entity")]
    AdminPermission,
}

impl Related<super::admin_permission::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AdminPermission.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
