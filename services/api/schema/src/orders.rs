use sea_orm::entity::prelude::*;

/// Customer order. Line items live in `order_items`; the payment proof and
/// the order-total breakdown are flattened into nullable columns here so a
/// proof upload or verification is a single-row update.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "orders")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub customer_id: Uuid,
    pub order_status: String,
    #[sea_orm(column_type = "Double")]
    pub total_price: f64,
    pub ship_phone: Option<String>,
    pub ship_street: Option<String>,
    pub ship_city: Option<String>,
    pub ship_state: Option<String>,
    pub ship_postal_code: Option<String>,
    pub ship_country: Option<String>,
    pub payment_method: String,
    pub payment_status: String,
    pub proof_image_url: Option<String>,
    pub proof_uploaded_at: Option<chrono::DateTime<chrono::Utc>>,
    pub proof_verified: Option<bool>,
    pub proof_verified_at: Option<chrono::DateTime<chrono::Utc>>,
    pub coupon_id: Option<Uuid>,
    #[sea_orm(column_type = "Double")]
    pub subtotal: f64,
    #[sea_orm(column_type = "Double")]
    pub discount: f64,
    #[sea_orm(column_type = "Double")]
    pub total: f64,
    pub tracking_url: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::order_items::Entity")]
    OrderItems,
}

impl Related<super::order_items::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::OrderItems.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
