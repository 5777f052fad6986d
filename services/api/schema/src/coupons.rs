use sea_orm::entity::prelude::*;

/// Discount coupon, optionally scoped to a category, sub-category, or product.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "coupons")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub code: String,
    pub discount_type: String,
    #[sea_orm(column_type = "Double")]
    pub discount_amount: f64,
    #[sea_orm(column_type = "Double", nullable)]
    pub minimum_purchase_amount: Option<f64>,
    pub end_date: chrono::DateTime<chrono::Utc>,
    pub status: String,
    pub applicable_category_id: Option<Uuid>,
    pub applicable_sub_category_id: Option<Uuid>,
    pub applicable_product_id: Option<Uuid>,
    pub created_by: Uuid,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
