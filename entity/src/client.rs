use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "client")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub client_code: String,
    #[sea_orm(unique, nullable)]
    pub identity_uid: Option<String>,
    #[sea_orm(unique)]
    pub username: String,
    #[sea_orm(unique)]
    pub email: String,
    pub password_hash: Option<String>,
    pub phone_no: String,
    pub profile_pic_url: Option<String>,
    pub street: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub country: Option<String>,
    pub zip_code: Option<String>,
    pub plan_type: String,
    pub plan_start: Option<DateTimeUtc>,
    pub plan_end: Option<DateTimeUtc>,
    /// Activity log entries serialized as a JSON array.
    pub activities: Json,
    pub is_active: bool,
    pub is_verified: bool,
    pub last_login: Option<DateTimeUtc>,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::order::Entity")]
    Order,
    #[sea_orm(has_many = "super::client_favourite_partner::Entity")]
    ClientFavouritePartner,
}

impl Related<super::order::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Order.def()
    }
}

impl Related<super::client_favourite_partner::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ClientFavouritePartner.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
