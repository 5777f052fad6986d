use axum::Json;
use axum::extract::{Path, Query, State};
use serde::Deserialize;
use uuid::Uuid;

use market_core::response::Envelope;

use crate::auth::BearerToken;
use crate::domain::repository::NewVariantType;
use crate::domain::types::VariantType;
use crate::error::ApiError;
use crate::handlers::{AdminFilter, authorize};
use crate::state::AppState;
use crate::usecase::catalog::{
    CreateEntityUseCase, DeleteEntityUseCase, GetEntityUseCase, ListEntitiesUseCase,
    UpdateEntityUseCase,
};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VariantTypeBody {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
}

impl VariantTypeBody {
    fn validate(&self) -> Result<(), ApiError> {
        if self.name.trim().is_empty() {
            return Err(ApiError::Validation("name is required"));
        }
        if self.kind.trim().is_empty() {
            return Err(ApiError::Validation("type is required"));
        }
        Ok(())
    }

    fn into_new(self) -> NewVariantType {
        NewVariantType {
            name: self.name,
            kind: self.kind,
        }
    }
}

pub async fn list(
    State(state): State<AppState>,
    Query(filter): Query<AdminFilter>,
) -> Result<Json<Envelope<Vec<VariantType>>>, ApiError> {
    let variant_types = ListEntitiesUseCase {
        repo: state.variant_type_repo(),
    }
    .execute(filter.admin_id)
    .await?;
    Ok(Envelope::ok(
        "Variant types retrieved successfully.",
        variant_types,
    ))
}

pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Envelope<VariantType>>, ApiError> {
    let variant_type = GetEntityUseCase {
        repo: state.variant_type_repo(),
    }
    .execute(id)
    .await?;
    Ok(Envelope::ok(
        "Variant type retrieved successfully.",
        variant_type,
    ))
}

pub async fn create(
    State(state): State<AppState>,
    token: BearerToken,
    Json(body): Json<VariantTypeBody>,
) -> Result<Json<Envelope<VariantType>>, ApiError> {
    let admin = authorize(&state, &token).await?;
    body.validate()?;
    let variant_type = CreateEntityUseCase {
        repo: state.variant_type_repo(),
    }
    .execute(admin, body.into_new())
    .await?;
    Ok(Envelope::ok(
        "Variant type created successfully.",
        variant_type,
    ))
}

pub async fn update(
    State(state): State<AppState>,
    token: BearerToken,
    Path(id): Path<Uuid>,
    Json(body): Json<VariantTypeBody>,
) -> Result<Json<Envelope<VariantType>>, ApiError> {
    let admin = authorize(&state, &token).await?;
    body.validate()?;
    let variant_type = UpdateEntityUseCase {
        repo: state.variant_type_repo(),
    }
    .execute(admin, id, body.into_new())
    .await?;
    Ok(Envelope::ok(
        "Variant type updated successfully.",
        variant_type,
    ))
}

pub async fn delete(
    State(state): State<AppState>,
    token: BearerToken,
    Path(id): Path<Uuid>,
) -> Result<Json<Envelope<()>>, ApiError> {
    let admin = authorize(&state, &token).await?;
    DeleteEntityUseCase {
        repo: state.variant_type_repo(),
    }
    .execute(admin, id)
    .await?;
    Ok(Envelope::ok_empty("Variant type deleted successfully."))
}
