use anyhow::Context as _;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect,
};
use uuid::Uuid;

use market_api_schema::ratings;
use market_core::pagination::PageRequest;

use crate::domain::repository::{NewRating, RatingRepository};
use crate::domain::types::{Rating, RatingStats};
use crate::error::ApiError;

#[derive(Clone)]
pub struct DbRatingRepository {
    pub db: DatabaseConnection,
}

fn rating_from_model(model: ratings::Model) -> Rating {
    Rating {
        id: model.id,
        product_id: model.product_id,
        customer_id: model.customer_id,
        customer_name: model.customer_name,
        rating: model.rating,
        review: model.review,
        verified_purchase: model.verified_purchase,
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

impl RatingRepository for DbRatingRepository {
    async fn insert(&self, new: NewRating) -> Result<Rating, ApiError> {
        let now = Utc::now();
        let model = ratings::ActiveModel {
            id: Set(Uuid::now_v7()),
            product_id: Set(new.product_id),
            customer_id: Set(new.customer_id),
            customer_name: Set(new.customer_name),
            rating: Set(new.rating),
            review: Set(new.review),
            verified_purchase: Set(new.verified_purchase),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&self.db)
        .await
        .map_err(|e| match e.sql_err() {
            // Concurrent double-submit lands on the unique (product, customer)
            // index; the loser sees a conflict, not a 500.
            Some(sea_orm::SqlErr::UniqueConstraintViolation(_)) => {
                ApiError::Conflict("you have already rated this product".into())
            }
            _ => ApiError::Internal(anyhow::Error::new(e).context("insert rating")),
        })?;
        Ok(rating_from_model(model))
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Rating>, ApiError> {
        let model = ratings::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find rating")?;
        Ok(model.map(rating_from_model))
    }

    async fn find_by_product_and_customer(
        &self,
        product_id: Uuid,
        customer_id: Uuid,
    ) -> Result<Option<Rating>, ApiError> {
        let model = ratings::Entity::find()
            .filter(ratings::Column::ProductId.eq(product_id))
            .filter(ratings::Column::CustomerId.eq(customer_id))
            .one(&self.db)
            .await
            .context("find rating by product and customer")?;
        Ok(model.map(rating_from_model))
    }

    async fn list_by_product(
        &self,
        product_id: Uuid,
        page: PageRequest,
    ) -> Result<(Vec<Rating>, u64), ApiError> {
        let base = ratings::Entity::find().filter(ratings::Column::ProductId.eq(product_id));

        let count = base
            .clone()
            .count(&self.db)
            .await
            .context("count product ratings")?;

        let models = base
            .order_by_desc(ratings::Column::CreatedAt)
            .offset(page.offset())
            .limit(page.limit as u64)
            .all(&self.db)
            .await
            .context("list product ratings")?;

        Ok((models.into_iter().map(rating_from_model).collect(), count))
    }

    async fn stats(&self, product_id: Uuid) -> Result<RatingStats, ApiError> {
        let values: Vec<i16> = ratings::Entity::find()
            .filter(ratings::Column::ProductId.eq(product_id))
            .select_only()
            .column(ratings::Column::Rating)
            .into_tuple()
            .all(&self.db)
            .await
            .context("load rating values")?;

        if values.is_empty() {
            return Ok(RatingStats::empty());
        }

        let mut distribution = [0u64; 5];
        let mut sum = 0u64;
        for value in &values {
            let star = (*value).clamp(1, 5) as usize;
            distribution[star - 1] += 1;
            sum += star as u64;
        }
        let total = values.len() as u64;
        // Average rounded to one decimal place.
        let average = ((sum as f64 / total as f64) * 10.0).round() / 10.0;

        Ok(RatingStats {
            average,
            total,
            distribution,
        })
    }

    async fn update(
        &self,
        id: Uuid,
        rating: i16,
        review: String,
    ) -> Result<Option<Rating>, ApiError> {
        let Some(existing) = ratings::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find rating for update")?
        else {
            return Ok(None);
        };

        let mut active: ratings::ActiveModel = existing.into();
        active.rating = Set(rating);
        active.review = Set(review);
        active.updated_at = Set(Utc::now());
        let model = active.update(&self.db).await.context("update rating")?;
        Ok(Some(rating_from_model(model)))
    }

    async fn delete(&self, id: Uuid) -> Result<bool, ApiError> {
        let res = ratings::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .context("delete rating")?;
        Ok(res.rows_affected > 0)
    }
}
