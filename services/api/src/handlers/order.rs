use axum::Json;
use axum::extract::{Path, State};
use serde::Deserialize;
use uuid::Uuid;

use market_core::response::Envelope;

use crate::domain::repository::{NewOrderItem, OrderFilter};
use crate::domain::types::{
    Order, OrderStatus, OrderTotals, PaymentMethod, PaymentStatus, ShippingAddress,
};
use crate::error::ApiError;
use crate::state::AppState;
use crate::usecase::order::{
    CreateOrderInput, CreateOrderUseCase, DeleteOrderUseCase, GetOrderUseCase, ListOrdersUseCase,
    SubmitPaymentProofUseCase, UpdateOrderStatusUseCase, VerifyPaymentUseCase,
};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItemBody {
    pub product_id: Uuid,
    pub product_name: String,
    pub quantity: i32,
    pub price: f64,
    pub variant: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderBody {
    pub user_id: Uuid,
    pub items: Vec<OrderItemBody>,
    pub total_price: f64,
    #[serde(default)]
    pub shipping_address: ShippingAddress,
    pub payment_method: String,
    pub coupon_id: Option<Uuid>,
    pub order_total: OrderTotals,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateStatusBody {
    pub order_status: String,
    pub tracking_url: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentProofBody {
    pub image_url: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyPaymentBody {
    pub approved: bool,
}

pub async fn list(State(state): State<AppState>) -> Result<Json<Envelope<Vec<Order>>>, ApiError> {
    let orders = ListOrdersUseCase {
        orders: state.order_repo(),
    }
    .execute(OrderFilter::default())
    .await?;
    Ok(Envelope::ok("Orders retrieved successfully.", orders))
}

pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Envelope<Order>>, ApiError> {
    let order = GetOrderUseCase {
        orders: state.order_repo(),
    }
    .execute(id)
    .await?;
    Ok(Envelope::ok("Order retrieved successfully.", order))
}

pub async fn list_by_customer(
    State(state): State<AppState>,
    Path(customer_id): Path<Uuid>,
) -> Result<Json<Envelope<Vec<Order>>>, ApiError> {
    let orders = ListOrdersUseCase {
        orders: state.order_repo(),
    }
    .execute(OrderFilter {
        customer_id: Some(customer_id),
        ..Default::default()
    })
    .await?;
    Ok(Envelope::ok("Orders retrieved successfully.", orders))
}

pub async fn list_by_payment_status(
    State(state): State<AppState>,
    Path(status): Path<String>,
) -> Result<Json<Envelope<Vec<Order>>>, ApiError> {
    let payment_status = PaymentStatus::parse(&status)
        .ok_or(ApiError::Validation("invalid payment status"))?;
    let orders = ListOrdersUseCase {
        orders: state.order_repo(),
    }
    .execute(OrderFilter {
        payment_status: Some(payment_status),
        ..Default::default()
    })
    .await?;
    Ok(Envelope::ok("Orders retrieved successfully.", orders))
}

/// Non-cod orders with a proof attached and payment still pending.
pub async fn list_pending_verification(
    State(state): State<AppState>,
) -> Result<Json<Envelope<Vec<Order>>>, ApiError> {
    let orders = ListOrdersUseCase {
        orders: state.order_repo(),
    }
    .execute(OrderFilter {
        pending_verification: true,
        ..Default::default()
    })
    .await?;
    Ok(Envelope::ok(
        "Orders pending verification retrieved successfully.",
        orders,
    ))
}

pub async fn create(
    State(state): State<AppState>,
    Json(body): Json<CreateOrderBody>,
) -> Result<Json<Envelope<Order>>, ApiError> {
    let payment_method = PaymentMethod::parse(&body.payment_method)
        .ok_or(ApiError::Validation("invalid payment method"))?;

    let order = CreateOrderUseCase {
        orders: state.order_repo(),
    }
    .execute(CreateOrderInput {
        customer_id: body.user_id,
        items: body
            .items
            .into_iter()
            .map(|item| NewOrderItem {
                product_id: item.product_id,
                product_name: item.product_name,
                quantity: item.quantity,
                price: item.price,
                variant: item.variant,
            })
            .collect(),
        total_price: body.total_price,
        shipping_address: body.shipping_address,
        payment_method,
        coupon_id: body.coupon_id,
        order_total: body.order_total,
    })
    .await?;
    Ok(Envelope::ok("Order created successfully.", order))
}

pub async fn update_status(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<UpdateStatusBody>,
) -> Result<Json<Envelope<Order>>, ApiError> {
    let status = OrderStatus::parse(&body.order_status)
        .ok_or(ApiError::Validation("invalid order status"))?;
    let order = UpdateOrderStatusUseCase {
        orders: state.order_repo(),
    }
    .execute(id, status, body.tracking_url)
    .await?;
    Ok(Envelope::ok("Order updated successfully.", order))
}

pub async fn submit_payment_proof(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<PaymentProofBody>,
) -> Result<Json<Envelope<Order>>, ApiError> {
    if body.image_url.trim().is_empty() {
        return Err(ApiError::Validation("image url is required"));
    }
    let order = SubmitPaymentProofUseCase {
        orders: state.order_repo(),
    }
    .execute(id, body.image_url)
    .await?;
    Ok(Envelope::ok("Payment proof submitted successfully.", order))
}

pub async fn verify_payment(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<VerifyPaymentBody>,
) -> Result<Json<Envelope<Order>>, ApiError> {
    let order = VerifyPaymentUseCase {
        orders: state.order_repo(),
    }
    .execute(id, body.approved)
    .await?;
    let message = if body.approved {
        "Payment verified successfully."
    } else {
        "Payment rejected."
    };
    Ok(Envelope::ok(message, order))
}

pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Envelope<()>>, ApiError> {
    DeleteOrderUseCase {
        orders: state.order_repo(),
    }
    .execute(id)
    .await?;
    Ok(Envelope::ok_empty("Order deleted successfully."))
}
