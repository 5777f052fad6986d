pub mod admin_user;
pub mod brand;
pub mod category;
pub mod coupon;
pub mod customer;
pub mod notification;
pub mod order;
pub mod payment;
pub mod poster;
pub mod product;
pub mod rating;
pub mod root;
pub mod sub_category;
pub mod variant;
pub mod variant_type;
pub mod verification;

use serde::Deserialize;
use uuid::Uuid;

use crate::auth::{AdminIdentity, BearerToken};
use crate::error::ApiError;
use crate::state::AppState;

/// `?adminId=` filter accepted by catalog list routes.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminFilter {
    pub admin_id: Option<Uuid>,
}

/// Resolve the acting admin from the bearer token.
pub async fn authorize(state: &AppState, token: &BearerToken) -> Result<AdminIdentity, ApiError> {
    state.authorizer().execute(&token.0).await
}
