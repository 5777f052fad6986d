use axum::Json;
use axum::extract::{Path, State};
use serde::Deserialize;
use uuid::Uuid;

use market_core::response::Envelope;

use crate::auth::BearerToken;
use crate::domain::repository::{AdminUserPatch, CascadeReport};
use crate::domain::types::ClearanceLevel;
use crate::error::ApiError;
use crate::handlers::authorize;
use crate::state::AppState;
use crate::usecase::admin_user::{
    AdminAccount, AdminSession, CreateAdminInput, CreateAdminUseCase, DeactivateAdminUseCase,
    DeleteAdminUseCase, GetAdminProfileUseCase, ListAdminsUseCase, LoginAdminUseCase,
    UpdateAdminUseCase,
};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginBody {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAdminBody {
    pub username: String,
    pub name: String,
    pub email: String,
    pub password: String,
    pub clearance_level: Option<ClearanceLevel>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAdminBody {
    pub name: Option<String>,
    pub email: Option<String>,
    pub clearance_level: Option<ClearanceLevel>,
    pub is_active: Option<bool>,
}

pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginBody>,
) -> Result<Json<Envelope<AdminSession>>, ApiError> {
    let session = LoginAdminUseCase {
        admins: state.admin_repo(),
        jwt_secret: state.config.jwt_secret.clone(),
    }
    .execute(&body.username, &body.password)
    .await?;
    Ok(Envelope::ok("Login successful.", session))
}

pub async fn profile(
    State(state): State<AppState>,
    token: BearerToken,
) -> Result<Json<Envelope<AdminAccount>>, ApiError> {
    let acting = authorize(&state, &token).await?;
    let account = GetAdminProfileUseCase {
        admins: state.admin_repo(),
    }
    .execute(acting)
    .await?;
    Ok(Envelope::ok("Profile retrieved successfully.", account))
}

pub async fn list(
    State(state): State<AppState>,
    token: BearerToken,
) -> Result<Json<Envelope<Vec<AdminAccount>>>, ApiError> {
    let acting = authorize(&state, &token).await?;
    let admins = ListAdminsUseCase {
        admins: state.admin_repo(),
    }
    .execute(acting)
    .await?;
    Ok(Envelope::ok("Admins retrieved successfully.", admins))
}

pub async fn create(
    State(state): State<AppState>,
    token: BearerToken,
    Json(body): Json<CreateAdminBody>,
) -> Result<Json<Envelope<AdminAccount>>, ApiError> {
    let acting = authorize(&state, &token).await?;
    let account = CreateAdminUseCase {
        admins: state.admin_repo(),
    }
    .execute(
        acting,
        CreateAdminInput {
            username: body.username,
            name: body.name,
            email: body.email,
            password: body.password,
            clearance: body.clearance_level.unwrap_or(ClearanceLevel::Admin),
        },
    )
    .await?;
    Ok(Envelope::ok("Admin created successfully.", account))
}

pub async fn update(
    State(state): State<AppState>,
    token: BearerToken,
    Path(id): Path<Uuid>,
    Json(body): Json<UpdateAdminBody>,
) -> Result<Json<Envelope<AdminAccount>>, ApiError> {
    let acting = authorize(&state, &token).await?;
    let account = UpdateAdminUseCase {
        admins: state.admin_repo(),
    }
    .execute(
        acting,
        id,
        AdminUserPatch {
            name: body.name,
            email: body.email,
            clearance: body.clearance_level,
            is_active: body.is_active,
        },
    )
    .await?;
    Ok(Envelope::ok("Admin updated successfully.", account))
}

pub async fn deactivate(
    State(state): State<AppState>,
    token: BearerToken,
    Path(id): Path<Uuid>,
) -> Result<Json<Envelope<()>>, ApiError> {
    let acting = authorize(&state, &token).await?;
    DeactivateAdminUseCase {
        admins: state.admin_repo(),
    }
    .execute(acting, id)
    .await?;
    Ok(Envelope::ok_empty("Admin deactivated successfully."))
}

pub async fn delete(
    State(state): State<AppState>,
    token: BearerToken,
    Path(id): Path<Uuid>,
) -> Result<Json<Envelope<CascadeReport>>, ApiError> {
    let acting = authorize(&state, &token).await?;
    let report = DeleteAdminUseCase {
        admins: state.admin_repo(),
    }
    .execute(acting, id)
    .await?;
    Ok(Envelope::ok(
        "Admin and all associated data deleted successfully.",
        report,
    ))
}
