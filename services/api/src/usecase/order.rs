use chrono::Utc;
use uuid::Uuid;

use crate::domain::repository::{
    NewOrder, NewOrderItem, OrderFilter, OrderPaymentUpdate, OrderRepository,
};
use crate::domain::types::{
    Order, OrderStatus, OrderTotals, PaymentMethod, PaymentProof, PaymentStatus, ShippingAddress,
};
use crate::error::ApiError;

pub struct CreateOrderInput {
    pub customer_id: Uuid,
    pub items: Vec<NewOrderItem>,
    pub total_price: f64,
    pub shipping_address: ShippingAddress,
    pub payment_method: PaymentMethod,
    pub coupon_id: Option<Uuid>,
    pub order_total: OrderTotals,
}

pub struct CreateOrderUseCase<R: OrderRepository> {
    pub orders: R,
}

impl<R: OrderRepository> CreateOrderUseCase<R> {
    /// Cash-on-delivery orders start in the regular fulfilment flow; bank
    /// and wallet payments wait for a proof upload and admin verification.
    pub async fn execute(&self, input: CreateOrderInput) -> Result<Order, ApiError> {
        if input.items.is_empty() {
            return Err(ApiError::Validation("order must contain at least one item"));
        }
        if input.total_price <= 0.0 {
            return Err(ApiError::Validation("total price must be positive"));
        }
        for item in &input.items {
            if item.quantity <= 0 {
                return Err(ApiError::Validation("item quantity must be positive"));
            }
        }

        let order_status = match input.payment_method {
            PaymentMethod::Cod => OrderStatus::Pending,
            PaymentMethod::Cbe | PaymentMethod::Telebirr => OrderStatus::PaymentPending,
        };

        self.orders
            .insert(NewOrder {
                customer_id: input.customer_id,
                order_status,
                items: input.items,
                total_price: input.total_price,
                shipping_address: input.shipping_address,
                payment_method: input.payment_method,
                payment_status: PaymentStatus::Pending,
                coupon_id: input.coupon_id,
                order_total: input.order_total,
                tracking_url: None,
            })
            .await
    }
}

pub struct ListOrdersUseCase<R: OrderRepository> {
    pub orders: R,
}

impl<R: OrderRepository> ListOrdersUseCase<R> {
    pub async fn execute(&self, filter: OrderFilter) -> Result<Vec<Order>, ApiError> {
        self.orders.list(filter).await
    }
}

pub struct GetOrderUseCase<R: OrderRepository> {
    pub orders: R,
}

impl<R: OrderRepository> GetOrderUseCase<R> {
    pub async fn execute(&self, id: Uuid) -> Result<Order, ApiError> {
        self.orders
            .find_by_id(id)
            .await?
            .ok_or(ApiError::NotFound("order"))
    }
}

pub struct UpdateOrderStatusUseCase<R: OrderRepository> {
    pub orders: R,
}

impl<R: OrderRepository> UpdateOrderStatusUseCase<R> {
    /// Any status can be set from any other; the dashboard owns the flow.
    pub async fn execute(
        &self,
        id: Uuid,
        status: OrderStatus,
        tracking_url: Option<String>,
    ) -> Result<Order, ApiError> {
        self.orders
            .update_status(id, status, tracking_url)
            .await?
            .ok_or(ApiError::NotFound("order"))
    }
}

pub struct SubmitPaymentProofUseCase<R: OrderRepository> {
    pub orders: R,
}

impl<R: OrderRepository> SubmitPaymentProofUseCase<R> {
    /// Attach (or replace) a payment screenshot and put the order back in
    /// the verification queue.
    pub async fn execute(&self, id: Uuid, image_url: String) -> Result<Order, ApiError> {
        let order = self
            .orders
            .find_by_id(id)
            .await?
            .ok_or(ApiError::NotFound("order"))?;

        // Non-cod orders re-enter the verification queue; cod keeps its
        // fulfilment status and just records the attachment.
        let (order_status, payment_status) = if order.payment_method == PaymentMethod::Cod {
            (order.order_status, order.payment_status)
        } else {
            (OrderStatus::PaymentPending, PaymentStatus::Pending)
        };

        self.orders
            .update_payment(
                id,
                OrderPaymentUpdate {
                    order_status,
                    payment_status,
                    proof: Some(PaymentProof {
                        image_url,
                        uploaded_at: Some(Utc::now()),
                        verified: false,
                        verified_at: None,
                    }),
                },
            )
            .await?
            .ok_or(ApiError::NotFound("order"))
    }
}

pub struct VerifyPaymentUseCase<R: OrderRepository> {
    pub orders: R,
}

impl<R: OrderRepository> VerifyPaymentUseCase<R> {
    /// Approve moves the order into fulfilment; reject fails the payment
    /// and cancels the order.
    pub async fn execute(&self, id: Uuid, approve: bool) -> Result<Order, ApiError> {
        let order = self
            .orders
            .find_by_id(id)
            .await?
            .ok_or(ApiError::NotFound("order"))?;

        // The verdict stands on its own; the proof sub-record is only
        // annotated when one was uploaded.
        let update = if approve {
            OrderPaymentUpdate {
                order_status: OrderStatus::Processing,
                payment_status: PaymentStatus::Verified,
                proof: order.payment_proof.map(|proof| PaymentProof {
                    image_url: proof.image_url,
                    uploaded_at: proof.uploaded_at,
                    verified: true,
                    verified_at: Some(Utc::now()),
                }),
            }
        } else {
            OrderPaymentUpdate {
                order_status: OrderStatus::Cancelled,
                payment_status: PaymentStatus::Failed,
                proof: order.payment_proof.map(|proof| PaymentProof {
                    image_url: proof.image_url,
                    uploaded_at: proof.uploaded_at,
                    verified: false,
                    verified_at: None,
                }),
            }
        };

        self.orders
            .update_payment(id, update)
            .await?
            .ok_or(ApiError::NotFound("order"))
    }
}

pub struct DeleteOrderUseCase<R: OrderRepository> {
    pub orders: R,
}

impl<R: OrderRepository> DeleteOrderUseCase<R> {
    pub async fn execute(&self, id: Uuid) -> Result<(), ApiError> {
        if !self.orders.delete(id).await? {
            return Err(ApiError::NotFound("order"));
        }
        Ok(())
    }
}
