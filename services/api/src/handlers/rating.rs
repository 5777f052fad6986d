use axum::Json;
use axum::extract::{Path, Query, State};
use serde::Deserialize;
use uuid::Uuid;

use market_core::pagination::PageRequest;
use market_core::response::Envelope;

use crate::domain::types::{Rating, RatingStats};
use crate::error::ApiError;
use crate::state::AppState;
use crate::usecase::rating::{
    DeleteRatingUseCase, GetCustomerRatingUseCase, GetRatingStatsUseCase,
    ListProductRatingsUseCase, RatingPage, UpdateRatingUseCase, UpsertRatingInput,
    UpsertRatingUseCase,
};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRatingBody {
    pub product_id: Uuid,
    pub user_id: Uuid,
    pub user_name: String,
    pub rating: i16,
    #[serde(default)]
    pub review: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRatingBody {
    pub rating: i16,
    #[serde(default)]
    pub review: String,
}

pub async fn create(
    State(state): State<AppState>,
    Json(body): Json<CreateRatingBody>,
) -> Result<Json<Envelope<Rating>>, ApiError> {
    let rating = UpsertRatingUseCase {
        ratings: state.rating_repo(),
        orders: state.order_repo(),
    }
    .execute(UpsertRatingInput {
        product_id: body.product_id,
        customer_id: body.user_id,
        customer_name: body.user_name,
        rating: body.rating,
        review: body.review,
    })
    .await?;
    Ok(Envelope::ok("Rating submitted successfully.", rating))
}

pub async fn list_by_product(
    State(state): State<AppState>,
    Path(product_id): Path<Uuid>,
    Query(page): Query<PageRequest>,
) -> Result<Json<Envelope<RatingPage>>, ApiError> {
    let ratings = ListProductRatingsUseCase {
        ratings: state.rating_repo(),
    }
    .execute(product_id, page)
    .await?;
    Ok(Envelope::ok("Ratings retrieved successfully.", ratings))
}

pub async fn stats(
    State(state): State<AppState>,
    Path(product_id): Path<Uuid>,
) -> Result<Json<Envelope<RatingStats>>, ApiError> {
    let stats = GetRatingStatsUseCase {
        ratings: state.rating_repo(),
    }
    .execute(product_id)
    .await?;
    Ok(Envelope::ok("Rating stats retrieved successfully.", stats))
}

/// Returns `data: null` with 200 when the customer has not rated yet.
pub async fn customer_rating(
    State(state): State<AppState>,
    Path((product_id, customer_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<Envelope<Rating>>, ApiError> {
    let rating = GetCustomerRatingUseCase {
        ratings: state.rating_repo(),
    }
    .execute(product_id, customer_id)
    .await?;
    Ok(match rating {
        Some(rating) => Envelope::ok("Rating retrieved successfully.", rating),
        None => Envelope::ok_none("No rating found."),
    })
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<UpdateRatingBody>,
) -> Result<Json<Envelope<Rating>>, ApiError> {
    let rating = UpdateRatingUseCase {
        ratings: state.rating_repo(),
    }
    .execute(id, body.rating, body.review)
    .await?;
    Ok(Envelope::ok("Rating updated successfully.", rating))
}

pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Envelope<()>>, ApiError> {
    DeleteRatingUseCase {
        ratings: state.rating_repo(),
    }
    .execute(id)
    .await?;
    Ok(Envelope::ok_empty("Rating deleted successfully."))
}
