use axum::Json;
use axum::extract::{Path, Query, State};
use serde::Deserialize;
use uuid::Uuid;

use market_core::response::Envelope;

use crate::auth::BearerToken;
use crate::domain::repository::NewVariant;
use crate::domain::types::Variant;
use crate::error::ApiError;
use crate::handlers::{AdminFilter, authorize};
use crate::state::AppState;
use crate::usecase::catalog::{
    CreateEntityUseCase, DeleteEntityUseCase, GetEntityUseCase, ListEntitiesUseCase,
    UpdateEntityUseCase,
};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VariantBody {
    pub name: String,
    pub variant_type_id: Uuid,
}

impl VariantBody {
    fn validate(&self) -> Result<(), ApiError> {
        if self.name.trim().is_empty() {
            return Err(ApiError::Validation("name is required"));
        }
        Ok(())
    }

    fn into_new(self) -> NewVariant {
        NewVariant {
            name: self.name,
            variant_type_id: self.variant_type_id,
        }
    }
}

pub async fn list(
    State(state): State<AppState>,
    Query(filter): Query<AdminFilter>,
) -> Result<Json<Envelope<Vec<Variant>>>, ApiError> {
    let variants = ListEntitiesUseCase {
        repo: state.variant_repo(),
    }
    .execute(filter.admin_id)
    .await?;
    Ok(Envelope::ok("Variants retrieved successfully.", variants))
}

pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Envelope<Variant>>, ApiError> {
    let variant = GetEntityUseCase {
        repo: state.variant_repo(),
    }
    .execute(id)
    .await?;
    Ok(Envelope::ok("Variant retrieved successfully.", variant))
}

pub async fn create(
    State(state): State<AppState>,
    token: BearerToken,
    Json(body): Json<VariantBody>,
) -> Result<Json<Envelope<Variant>>, ApiError> {
    let admin = authorize(&state, &token).await?;
    body.validate()?;
    let variant = CreateEntityUseCase {
        repo: state.variant_repo(),
    }
    .execute(admin, body.into_new())
    .await?;
    Ok(Envelope::ok("Variant created successfully.", variant))
}

pub async fn update(
    State(state): State<AppState>,
    token: BearerToken,
    Path(id): Path<Uuid>,
    Json(body): Json<VariantBody>,
) -> Result<Json<Envelope<Variant>>, ApiError> {
    let admin = authorize(&state, &token).await?;
    body.validate()?;
    let variant = UpdateEntityUseCase {
        repo: state.variant_repo(),
    }
    .execute(admin, id, body.into_new())
    .await?;
    Ok(Envelope::ok("Variant updated successfully.", variant))
}

pub async fn delete(
    State(state): State<AppState>,
    token: BearerToken,
    Path(id): Path<Uuid>,
) -> Result<Json<Envelope<()>>, ApiError> {
    let admin = authorize(&state, &token).await?;
    DeleteEntityUseCase {
        repo: state.variant_repo(),
    }
    .execute(admin, id)
    .await?;
    Ok(Envelope::ok_empty("Variant deleted successfully."))
}
