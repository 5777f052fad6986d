use axum::Json;
use axum::extract::{Multipart, Path, State};
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use serde::Deserialize;
use uuid::Uuid;

use market_core::response::Envelope;

use crate::domain::repository::ImageStorePort as _;
use crate::domain::types::Order;
use crate::error::ApiError;
use crate::state::AppState;
use crate::usecase::order::{SubmitPaymentProofUseCase, VerifyPaymentUseCase};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Base64ProofBody {
    pub order_id: Uuid,
    pub image: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyPaymentBody {
    pub approved: bool,
}

async fn attach_proof(state: &AppState, order_id: Uuid, payload: &str) -> Result<Order, ApiError> {
    let image_url = state.image_store().upload_base64(payload).await?;
    SubmitPaymentProofUseCase {
        orders: state.order_repo(),
    }
    .execute(order_id, image_url)
    .await
}

/// Multipart upload: an `orderId` text field plus a `paymentProof` file.
pub async fn upload_proof(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<Envelope<Order>>, ApiError> {
    let mut order_id: Option<Uuid> = None;
    let mut payload: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|_| ApiError::Validation("malformed multipart body"))?
    {
        match field.name() {
            Some("orderId") => {
                let text = field
                    .text()
                    .await
                    .map_err(|_| ApiError::Validation("malformed multipart body"))?;
                order_id =
                    Some(text.parse().map_err(|_| ApiError::Validation("invalid order id"))?);
            }
            Some("paymentProof") => {
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|_| ApiError::Validation("malformed multipart body"))?;
                payload = Some(BASE64.encode(&bytes));
            }
            _ => {}
        }
    }

    let order_id = order_id.ok_or(ApiError::Validation("orderId field is required"))?;
    let payload = payload.ok_or(ApiError::Validation("paymentProof file is required"))?;

    let order = attach_proof(&state, order_id, &payload).await?;
    Ok(Envelope::ok("Payment proof uploaded successfully.", order))
}

/// Same flow for clients that send the screenshot as base64 JSON.
pub async fn upload_proof_base64(
    State(state): State<AppState>,
    Json(body): Json<Base64ProofBody>,
) -> Result<Json<Envelope<Order>>, ApiError> {
    if body.image.trim().is_empty() {
        return Err(ApiError::Validation("image is required"));
    }
    let order = attach_proof(&state, body.order_id, &body.image).await?;
    Ok(Envelope::ok("Payment proof uploaded successfully.", order))
}

pub async fn verify_payment(
    State(state): State<AppState>,
    Path(order_id): Path<Uuid>,
    Json(body): Json<VerifyPaymentBody>,
) -> Result<Json<Envelope<Order>>, ApiError> {
    let order = VerifyPaymentUseCase {
        orders: state.order_repo(),
    }
    .execute(order_id, body.approved)
    .await?;
    let message = if body.approved {
        "Payment verified successfully."
    } else {
        "Payment rejected."
    };
    Ok(Envelope::ok(message, order))
}
