use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "orders")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub order_code: String,
    pub order_name: String,
    pub client_id: i32,
    pub partner_id: i32,
    pub event_type: Option<String>,
    pub event_name: Option<String>,
    pub event_description: Option<String>,
    pub guest_count: Option<i32>,
    pub event_date_time: DateTimeUtc,
    pub booking_date_time: DateTimeUtc,
    pub venue: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub country: Option<String>,
    pub base_price: f64,
    /// Extra line items serialized as a JSON array of `{description, amount}`.
    pub additional_charges: Json,
    pub discount_amount: f64,
    pub discount_reason: Option<String>,
    pub tax_amount: f64,
    pub tax_percentage: Option<f64>,
    pub total_amount: f64,
    /// Lifecycle status, always written together with `current_stage` and
    /// `progress_percentage`.
    pub status: String,
    pub current_stage: Option<String>,
    pub progress_percentage: i32,
    pub payment_status: String,
    pub special_instructions: Option<String>,
    pub data_providing_method: String,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::client::Entity",
        from = "Column::ClientId",
        to = "super::client::Column::Id",
        on_update = "Cascade",
        on_delete = "Restrict"
    )]
    Client,
    #[sea_orm(
        belongs_to = "super::partner::Entity",
        from = "Column::PartnerId",
        to = "super::partner::Column::Id",
        on_update = "Cascade",
        on_delete = "Restrict"
    )]
    Partner,
}

impl Related<super::client::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Client.def()
    }
}

impl Related<super::partner::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Partner.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
