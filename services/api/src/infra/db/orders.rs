use std::collections::HashMap;

use anyhow::Context as _;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, TransactionTrait,
};
use uuid::Uuid;

use market_api_schema::{order_items, orders};

use crate::domain::repository::{NewOrder, OrderFilter, OrderPaymentUpdate, OrderRepository};
use crate::domain::types::{
    Order, OrderItem, OrderStatus, OrderTotals, PaymentMethod, PaymentProof, PaymentStatus,
    ShippingAddress,
};
use crate::error::ApiError;

#[derive(Clone)]
pub struct DbOrderRepository {
    pub db: DatabaseConnection,
}

fn order_from_model(model: orders::Model, items: Vec<OrderItem>) -> Result<Order, ApiError> {
    let order_status = OrderStatus::parse(&model.order_status)
        .ok_or_else(|| ApiError::Internal(anyhow::anyhow!("bad order_status in row")))?;
    let payment_method = PaymentMethod::parse(&model.payment_method)
        .ok_or_else(|| ApiError::Internal(anyhow::anyhow!("bad payment_method in row")))?;
    let payment_status = PaymentStatus::parse(&model.payment_status)
        .ok_or_else(|| ApiError::Internal(anyhow::anyhow!("bad payment_status in row")))?;

    let payment_proof = model.proof_image_url.map(|image_url| PaymentProof {
        image_url,
        uploaded_at: model.proof_uploaded_at,
        verified: model.proof_verified.unwrap_or(false),
        verified_at: model.proof_verified_at,
    });

    Ok(Order {
        id: model.id,
        customer_id: model.customer_id,
        order_status,
        items,
        total_price: model.total_price,
        shipping_address: ShippingAddress {
            phone: model.ship_phone,
            street: model.ship_street,
            city: model.ship_city,
            state: model.ship_state,
            postal_code: model.ship_postal_code,
            country: model.ship_country,
        },
        payment_method,
        payment_status,
        payment_proof,
        coupon_id: model.coupon_id,
        order_total: OrderTotals {
            subtotal: model.subtotal,
            discount: model.discount,
            total: model.total,
        },
        tracking_url: model.tracking_url,
        created_at: model.created_at,
        updated_at: model.updated_at,
    })
}

fn item_from_model(model: order_items::Model) -> OrderItem {
    OrderItem {
        id: model.id,
        product_id: model.product_id,
        product_name: model.product_name,
        quantity: model.quantity,
        price: model.price,
        variant: model.variant,
    }
}

impl DbOrderRepository {
    async fn assemble(&self, models: Vec<orders::Model>) -> Result<Vec<Order>, ApiError> {
        if models.is_empty() {
            return Ok(Vec::new());
        }
        let order_ids: Vec<Uuid> = models.iter().map(|m| m.id).collect();
        let item_rows = order_items::Entity::find()
            .filter(order_items::Column::OrderId.is_in(order_ids))
            .all(&self.db)
            .await
            .context("load order items")?;

        let mut items_by_order: HashMap<Uuid, Vec<OrderItem>> = HashMap::new();
        for row in item_rows {
            items_by_order
                .entry(row.order_id)
                .or_default()
                .push(item_from_model(row));
        }

        models
            .into_iter()
            .map(|model| {
                let items = items_by_order.remove(&model.id).unwrap_or_default();
                order_from_model(model, items)
            })
            .collect()
    }
}

impl OrderRepository for DbOrderRepository {
    async fn list(&self, filter: OrderFilter) -> Result<Vec<Order>, ApiError> {
        let mut query = orders::Entity::find().order_by_desc(orders::Column::CreatedAt);
        if let Some(customer_id) = filter.customer_id {
            query = query.filter(orders::Column::CustomerId.eq(customer_id));
        }
        if let Some(status) = filter.payment_status {
            query = query.filter(orders::Column::PaymentStatus.eq(status.as_str()));
        }
        if filter.pending_verification {
            query = query
                .filter(orders::Column::PaymentMethod.is_in([
                    PaymentMethod::Cbe.as_str(),
                    PaymentMethod::Telebirr.as_str(),
                ]))
                .filter(orders::Column::PaymentStatus.eq(PaymentStatus::Pending.as_str()))
                .filter(orders::Column::ProofImageUrl.is_not_null());
        }
        let models = query.all(&self.db).await.context("list orders")?;
        self.assemble(models).await
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Order>, ApiError> {
        let model = orders::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find order")?;
        let Some(model) = model else {
            return Ok(None);
        };
        Ok(self.assemble(vec![model]).await?.into_iter().next())
    }

    async fn insert(&self, new: NewOrder) -> Result<Order, ApiError> {
        let order_id = Uuid::now_v7();
        let now = Utc::now();

        self.db
            .transaction::<_, (), sea_orm::DbErr>(|txn| {
                Box::pin(async move {
                    orders::ActiveModel {
                        id: Set(order_id),
                        customer_id: Set(new.customer_id),
                        order_status: Set(new.order_status.as_str().to_owned()),
                        total_price: Set(new.total_price),
                        ship_phone: Set(new.shipping_address.phone),
                        ship_street: Set(new.shipping_address.street),
                        ship_city: Set(new.shipping_address.city),
                        ship_state: Set(new.shipping_address.state),
                        ship_postal_code: Set(new.shipping_address.postal_code),
                        ship_country: Set(new.shipping_address.country),
                        payment_method: Set(new.payment_method.as_str().to_owned()),
                        payment_status: Set(new.payment_status.as_str().to_owned()),
                        proof_image_url: Set(None),
                        proof_uploaded_at: Set(None),
                        proof_verified: Set(None),
                        proof_verified_at: Set(None),
                        coupon_id: Set(new.coupon_id),
                        subtotal: Set(new.order_total.subtotal),
                        discount: Set(new.order_total.discount),
                        total: Set(new.order_total.total),
                        tracking_url: Set(new.tracking_url),
                        created_at: Set(now),
                        updated_at: Set(now),
                    }
                    .insert(txn)
                    .await?;

                    for item in new.items {
                        order_items::ActiveModel {
                            id: Set(Uuid::now_v7()),
                            order_id: Set(order_id),
                            product_id: Set(item.product_id),
                            product_name: Set(item.product_name),
                            quantity: Set(item.quantity),
                            price: Set(item.price),
                            variant: Set(item.variant),
                        }
                        .insert(txn)
                        .await?;
                    }
                    Ok(())
                })
            })
            .await
            .context("insert order")?;

        self.find_by_id(order_id)
            .await?
            .ok_or_else(|| ApiError::Internal(anyhow::anyhow!("inserted order missing")))
    }

    async fn update_status(
        &self,
        id: Uuid,
        status: OrderStatus,
        tracking_url: Option<String>,
    ) -> Result<Option<Order>, ApiError> {
        let Some(existing) = orders::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find order for status update")?
        else {
            return Ok(None);
        };

        let mut active: orders::ActiveModel = existing.into();
        active.order_status = Set(status.as_str().to_owned());
        if let Some(url) = tracking_url {
            active.tracking_url = Set(Some(url));
        }
        active.updated_at = Set(Utc::now());
        active
            .update(&self.db)
            .await
            .context("update order status")?;

        self.find_by_id(id).await
    }

    async fn update_payment(
        &self,
        id: Uuid,
        update: OrderPaymentUpdate,
    ) -> Result<Option<Order>, ApiError> {
        let Some(existing) = orders::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find order for payment update")?
        else {
            return Ok(None);
        };

        let mut active: orders::ActiveModel = existing.into();
        active.order_status = Set(update.order_status.as_str().to_owned());
        active.payment_status = Set(update.payment_status.as_str().to_owned());
        if let Some(proof) = update.proof {
            active.proof_image_url = Set(Some(proof.image_url));
            active.proof_uploaded_at = Set(proof.uploaded_at);
            active.proof_verified = Set(Some(proof.verified));
            active.proof_verified_at = Set(proof.verified_at);
        }
        active.updated_at = Set(Utc::now());
        active
            .update(&self.db)
            .await
            .context("update order payment")?;

        self.find_by_id(id).await
    }

    async fn delete(&self, id: Uuid) -> Result<bool, ApiError> {
        // Line items go with the order via FK cascade.
        let res = orders::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .context("delete order")?;
        Ok(res.rows_affected > 0)
    }
}
