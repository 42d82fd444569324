//! Partner review repository.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter, QuerySelect,
};

use crate::server::model::partner::{CreateReviewParams, Review};

pub struct ReviewRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> ReviewRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn create(&self, params: &CreateReviewParams) -> Result<Review, DbErr> {
        let entity = entity::partner_review::ActiveModel {
            partner_id: ActiveValue::Set(params.partner_id),
            client_id: ActiveValue::Set(params.client_id),
            order_id: ActiveValue::Set(params.order_id),
            rating: ActiveValue::Set(params.rating),
            comment: ActiveValue::Set(params.comment.clone()),
            created_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Ok(Review::from_entity(entity))
    }

    /// Every rating a partner has received.
    pub async fn ratings_for_partner(&self, partner_id: i32) -> Result<Vec<i32>, DbErr> {
        entity::prelude::PartnerReview::find()
            .select_only()
            .column(entity::partner_review::Column::Rating)
            .filter(entity::partner_review::Column::PartnerId.eq(partner_id))
            .into_tuple()
            .all(self.db)
            .await
    }
}
