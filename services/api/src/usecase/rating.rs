use serde::Serialize;
use uuid::Uuid;

use market_core::pagination::PageRequest;

use crate::domain::repository::{NewRating, OrderFilter, OrderRepository, RatingRepository};
use crate::domain::types::{Rating, RatingStats};
use crate::error::ApiError;

/// One page of a product's ratings plus paging metadata.
#[derive(Debug, Clone, Serialize)]
pub struct RatingPage {
    pub items: Vec<Rating>,
    pub total: u64,
    pub page: u32,
    pub total_pages: u64,
}

pub struct UpsertRatingInput {
    pub product_id: Uuid,
    pub customer_id: Uuid,
    pub customer_name: String,
    pub rating: i16,
    pub review: String,
}

/// Create or replace the customer's rating for a product. One rating per
/// (product, customer) pair.
pub struct UpsertRatingUseCase<R: RatingRepository, O: OrderRepository> {
    pub ratings: R,
    pub orders: O,
}

impl<R: RatingRepository, O: OrderRepository> UpsertRatingUseCase<R, O> {
    pub async fn execute(&self, input: UpsertRatingInput) -> Result<Rating, ApiError> {
        if !(1..=5).contains(&input.rating) {
            return Err(ApiError::Validation("rating must be between 1 and 5"));
        }

        if let Some(existing) = self
            .ratings
            .find_by_product_and_customer(input.product_id, input.customer_id)
            .await?
        {
            return self
                .ratings
                .update(existing.id, input.rating, input.review)
                .await?
                .ok_or(ApiError::NotFound("rating"));
        }

        let verified_purchase = self.has_purchased(input.customer_id, input.product_id).await?;
        self.ratings
            .insert(NewRating {
                product_id: input.product_id,
                customer_id: input.customer_id,
                customer_name: input.customer_name,
                rating: input.rating,
                review: input.review,
                verified_purchase,
            })
            .await
    }

    async fn has_purchased(&self, customer_id: Uuid, product_id: Uuid) -> Result<bool, ApiError> {
        let orders = self
            .orders
            .list(OrderFilter {
                customer_id: Some(customer_id),
                ..Default::default()
            })
            .await?;
        Ok(orders
            .iter()
            .flat_map(|o| &o.items)
            .any(|item| item.product_id == product_id))
    }
}

pub struct ListProductRatingsUseCase<R: RatingRepository> {
    pub ratings: R,
}

impl<R: RatingRepository> ListProductRatingsUseCase<R> {
    pub async fn execute(
        &self,
        product_id: Uuid,
        page: PageRequest,
    ) -> Result<RatingPage, ApiError> {
        let page = page.clamped();
        let (items, total) = self.ratings.list_by_product(product_id, page).await?;
        Ok(RatingPage {
            items,
            total,
            page: page.page,
            total_pages: page.total_pages(total),
        })
    }
}

pub struct GetRatingStatsUseCase<R: RatingRepository> {
    pub ratings: R,
}

impl<R: RatingRepository> GetRatingStatsUseCase<R> {
    pub async fn execute(&self, product_id: Uuid) -> Result<RatingStats, ApiError> {
        self.ratings.stats(product_id).await
    }
}

/// The storefront probes this before showing the review form; a missing
/// rating is a normal answer, not an error.
pub struct GetCustomerRatingUseCase<R: RatingRepository> {
    pub ratings: R,
}

impl<R: RatingRepository> GetCustomerRatingUseCase<R> {
    pub async fn execute(
        &self,
        product_id: Uuid,
        customer_id: Uuid,
    ) -> Result<Option<Rating>, ApiError> {
        self.ratings
            .find_by_product_and_customer(product_id, customer_id)
            .await
    }
}

pub struct UpdateRatingUseCase<R: RatingRepository> {
    pub ratings: R,
}

impl<R: RatingRepository> UpdateRatingUseCase<R> {
    pub async fn execute(&self, id: Uuid, rating: i16, review: String) -> Result<Rating, ApiError> {
        if !(1..=5).contains(&rating) {
            return Err(ApiError::Validation("rating must be between 1 and 5"));
        }
        self.ratings
            .update(id, rating, review)
            .await?
            .ok_or(ApiError::NotFound("rating"))
    }
}

pub struct DeleteRatingUseCase<R: RatingRepository> {
    pub ratings: R,
}

impl<R: RatingRepository> DeleteRatingUseCase<R> {
    pub async fn execute(&self, id: Uuid) -> Result<(), ApiError> {
        if !self.ratings.delete(id).await? {
            return Err(ApiError::NotFound("rating"));
        }
        Ok(())
    }
}
