use axum::Json;
use axum::extract::{Path, Query, State};
use serde::Deserialize;
use uuid::Uuid;

use market_core::response::Envelope;

use crate::auth::BearerToken;
use crate::domain::repository::{NewPoster, PosterPatch};
use crate::domain::types::Poster;
use crate::error::ApiError;
use crate::handlers::{AdminFilter, authorize};
use crate::state::AppState;
use crate::usecase::catalog::{
    CreateEntityUseCase, DeleteEntityUseCase, GetEntityUseCase, ListEntitiesUseCase,
    UpdateEntityUseCase,
};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PosterBody {
    pub name: String,
    pub image_url: Option<String>,
}

pub async fn list(
    State(state): State<AppState>,
    Query(filter): Query<AdminFilter>,
) -> Result<Json<Envelope<Vec<Poster>>>, ApiError> {
    let posters = ListEntitiesUseCase {
        repo: state.poster_repo(),
    }
    .execute(filter.admin_id)
    .await?;
    Ok(Envelope::ok("Posters retrieved successfully.", posters))
}

pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Envelope<Poster>>, ApiError> {
    let poster = GetEntityUseCase {
        repo: state.poster_repo(),
    }
    .execute(id)
    .await?;
    Ok(Envelope::ok("Poster retrieved successfully.", poster))
}

pub async fn create(
    State(state): State<AppState>,
    token: BearerToken,
    Json(body): Json<PosterBody>,
) -> Result<Json<Envelope<Poster>>, ApiError> {
    let admin = authorize(&state, &token).await?;
    if body.name.trim().is_empty() {
        return Err(ApiError::Validation("name is required"));
    }
    let image_url = body
        .image_url
        .filter(|url| !url.is_empty())
        .ok_or(ApiError::Validation("image is required"))?;

    let poster = CreateEntityUseCase {
        repo: state.poster_repo(),
    }
    .execute(
        admin,
        NewPoster {
            name: body.name,
            image_url,
        },
    )
    .await?;
    Ok(Envelope::ok("Poster created successfully.", poster))
}

pub async fn update(
    State(state): State<AppState>,
    token: BearerToken,
    Path(id): Path<Uuid>,
    Json(body): Json<PosterBody>,
) -> Result<Json<Envelope<Poster>>, ApiError> {
    let admin = authorize(&state, &token).await?;
    if body.name.trim().is_empty() {
        return Err(ApiError::Validation("name is required"));
    }

    let poster = UpdateEntityUseCase {
        repo: state.poster_repo(),
    }
    .execute(
        admin,
        id,
        PosterPatch {
            name: body.name,
            image_url: body.image_url.filter(|url| !url.is_empty()),
        },
    )
    .await?;
    Ok(Envelope::ok("Poster updated successfully.", poster))
}

pub async fn delete(
    State(state): State<AppState>,
    token: BearerToken,
    Path(id): Path<Uuid>,
) -> Result<Json<Envelope<()>>, ApiError> {
    let admin = authorize(&state, &token).await?;
    DeleteEntityUseCase {
        repo: state.poster_repo(),
    }
    .execute(admin, id)
    .await?;
    Ok(Envelope::ok_empty("Poster deleted successfully."))
}
