use anyhow::Context as _;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder,
};
use uuid::Uuid;

use market_api_schema::posters;

use crate::domain::repository::{CatalogRepository, NewPoster, PosterPatch};
use crate::domain::types::Poster;
use crate::error::ApiError;

#[derive(Clone)]
pub struct DbPosterRepository {
    pub db: DatabaseConnection,
}

fn poster_from_model(model: posters::Model) -> Poster {
    Poster {
        id: model.id,
        name: model.name,
        image_url: model.image_url,
        created_by: model.created_by,
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

impl CatalogRepository for DbPosterRepository {
    type Entity = Poster;
    type NewEntity = NewPoster;
    type Patch = PosterPatch;

    const KIND: &'static str = "poster";

    async fn list(&self, created_by: Option<Uuid>) -> Result<Vec<Poster>, ApiError> {
        let mut query = posters::Entity::find().order_by_desc(posters::Column::CreatedAt);
        if let Some(admin_id) = created_by {
            query = query.filter(posters::Column::CreatedBy.eq(admin_id));
        }
        let models = query.all(&self.db).await.context("list posters")?;
        Ok(models.into_iter().map(poster_from_model).collect())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Poster>, ApiError> {
        let model = posters::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find poster")?;
        Ok(model.map(poster_from_model))
    }

    async fn insert(&self, new: NewPoster, created_by: Uuid) -> Result<Poster, ApiError> {
        let now = Utc::now();
        let model = posters::ActiveModel {
            id: Set(Uuid::now_v7()),
            name: Set(new.name),
            image_url: Set(new.image_url),
            created_by: Set(created_by),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&self.db)
        .await
        .context("insert poster")?;
        Ok(poster_from_model(model))
    }

    async fn apply_patch(&self, id: Uuid, patch: PosterPatch) -> Result<Option<Poster>, ApiError> {
        let Some(existing) = posters::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find poster for update")?
        else {
            return Ok(None);
        };

        let mut active: posters::ActiveModel = existing.into();
        active.name = Set(patch.name);
        if let Some(image_url) = patch.image_url {
            active.image_url = Set(image_url);
        }
        active.updated_at = Set(Utc::now());
        let model = active.update(&self.db).await.context("update poster")?;
        Ok(Some(poster_from_model(model)))
    }

    async fn delete(&self, id: Uuid) -> Result<(), ApiError> {
        posters::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .context("delete poster")?;
        Ok(())
    }

    async fn dependent_count(&self, _id: Uuid) -> Result<u64, ApiError> {
        Ok(0)
    }
}
