use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "partner")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub partner_code: String,
    #[sea_orm(unique, nullable)]
    pub identity_uid: Option<String>,
    #[sea_orm(unique)]
    pub username: String,
    pub company_name: String,
    #[sea_orm(unique)]
    pub email: String,
    pub password_hash: Option<String>,
    pub phone_no: String,
    pub profile_pic_url: Option<String>,
    pub banner_url: Option<String>,
    pub street: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub country: Option<String>,
    pub zip_code: Option<String>,
    pub years_of_experience: Option<i32>,
    pub plan_type: String,
    pub partner_type: String,
    pub price_per_day: Option<f64>,
    pub rating_average: f64,
    pub rating_total: i32,
    pub rating_five: i32,
    pub rating_four: i32,
    pub rating_three: i32,
    pub rating_two: i32,
    pub rating_one: i32,
    pub verified: bool,
    /// Weekly schedule serialized as a JSON array of day entries.
    pub availability_schedule: Json,
    pub timezone: Option<String>,
    pub total_revenue: f64,
    /// Revenue transactions serialized as a JSON array.
    pub transactions: Json,
    pub is_active: bool,
    pub last_login: Option<DateTimeUtc>,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::order::Entity")]
    Order,
    #[sea_orm(has_many = "super::partner_shoot_type::Entity")]
    PartnerShootType,
    #[sea_orm(has_many = "super::partner_specialization::Entity")]
    PartnerSpecialization,
    #[sea_orm(has_many = "super::partner_location::Entity")]
    PartnerLocation,
    #[sea_orm(has_many = "super::partner_package::Entity")]
    PartnerPackage,
    #[sea_orm(has_many = "super::partner_blackout_date::Entity")]
    PartnerBlackoutDate,
    #[sea_orm(has_many = "super::partner_review::Entity")]
    PartnerReview,
}

impl Related<super::order::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Order.def()
    }
}

impl Related<super::partner_shoot_type::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PartnerShootType.def()
    }
}

impl Related<super::partner_specialization::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PartnerSpecialization.def()
    }
}

impl Related<super::partner_location::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PartnerLocation.def()
    }
}

impl Related<super::partner_package::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PartnerPackage.def()
    }
}

impl Related<super::partner_blackout_date::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PartnerBlackoutDate.def()
    }
}

impl Related<super::partner_review::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PartnerReview.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
