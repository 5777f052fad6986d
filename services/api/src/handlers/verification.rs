use axum::Json;
use axum::extract::{Path, State};
use serde::Deserialize;
use uuid::Uuid;

use market_core::response::Envelope;

use crate::error::ApiError;
use crate::state::AppState;
use crate::usecase::customer::CustomerAccount;
use crate::usecase::verification::{
    ForgotPasswordUseCase, ResetPasswordUseCase, SendEmailVerificationUseCase, UpdateProfileInput,
    UpdateProfileUseCase, VerifyEmailUseCase,
};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmailBody {
    pub email: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyEmailBody {
    pub email: String,
    pub code: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResetPasswordBody {
    pub email: String,
    pub code: String,
    pub new_password: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileBody {
    pub name: String,
    pub email: Option<String>,
    pub current_password: Option<String>,
    pub new_password: Option<String>,
}

pub async fn send_email_verification(
    State(state): State<AppState>,
    Json(body): Json<EmailBody>,
) -> Result<Json<Envelope<()>>, ApiError> {
    SendEmailVerificationUseCase {
        customers: state.customer_repo(),
        mailer: state.mailer(),
    }
    .execute(&body.email)
    .await?;
    Ok(Envelope::ok_empty("Verification code sent."))
}

pub async fn verify_email(
    State(state): State<AppState>,
    Json(body): Json<VerifyEmailBody>,
) -> Result<Json<Envelope<()>>, ApiError> {
    VerifyEmailUseCase {
        customers: state.customer_repo(),
    }
    .execute(&body.email, &body.code)
    .await?;
    Ok(Envelope::ok_empty("Email verified successfully."))
}

pub async fn forgot_password(
    State(state): State<AppState>,
    Json(body): Json<EmailBody>,
) -> Result<Json<Envelope<()>>, ApiError> {
    ForgotPasswordUseCase {
        customers: state.customer_repo(),
        mailer: state.mailer(),
    }
    .execute(&body.email)
    .await?;
    Ok(Envelope::ok_empty("Password reset code sent."))
}

pub async fn reset_password(
    State(state): State<AppState>,
    Json(body): Json<ResetPasswordBody>,
) -> Result<Json<Envelope<()>>, ApiError> {
    ResetPasswordUseCase {
        customers: state.customer_repo(),
    }
    .execute(&body.email, &body.code, &body.new_password)
    .await?;
    Ok(Envelope::ok_empty("Password reset successfully."))
}

pub async fn update_profile(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<UpdateProfileBody>,
) -> Result<Json<Envelope<CustomerAccount>>, ApiError> {
    let account = UpdateProfileUseCase {
        customers: state.customer_repo(),
    }
    .execute(
        id,
        UpdateProfileInput {
            name: body.name,
            email: body.email,
            current_password: body.current_password,
            new_password: body.new_password,
        },
    )
    .await?;
    Ok(Envelope::ok("Profile updated successfully.", account))
}
