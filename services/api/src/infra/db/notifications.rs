use anyhow::Context as _;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, DatabaseConnection, EntityTrait, QueryOrder,
};
use uuid::Uuid;

use market_api_schema::notifications;

use crate::domain::repository::NotificationRepository;
use crate::domain::types::NotificationRecord;
use crate::error::ApiError;

#[derive(Clone)]
pub struct DbNotificationRepository {
    pub db: DatabaseConnection,
}

fn record_from_model(model: notifications::Model) -> NotificationRecord {
    NotificationRecord {
        id: model.id,
        provider_id: model.provider_id,
        title: model.title,
        description: model.description,
        image_url: model.image_url,
        created_at: model.created_at,
    }
}

impl NotificationRepository for DbNotificationRepository {
    async fn insert(
        &self,
        provider_id: &str,
        title: &str,
        description: &str,
        image_url: Option<&str>,
    ) -> Result<NotificationRecord, ApiError> {
        let model = notifications::ActiveModel {
            id: Set(Uuid::now_v7()),
            provider_id: Set(provider_id.to_owned()),
            title: Set(title.to_owned()),
            description: Set(description.to_owned()),
            image_url: Set(image_url.map(str::to_owned)),
            created_at: Set(Utc::now()),
        }
        .insert(&self.db)
        .await
        .context("insert notification")?;
        Ok(record_from_model(model))
    }

    async fn list(&self) -> Result<Vec<NotificationRecord>, ApiError> {
        let models = notifications::Entity::find()
            .order_by_desc(notifications::Column::CreatedAt)
            .all(&self.db)
            .await
            .context("list notifications")?;
        Ok(models.into_iter().map(record_from_model).collect())
    }

    async fn delete(&self, id: Uuid) -> Result<bool, ApiError> {
        let res = notifications::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .context("delete notification")?;
        Ok(res.rows_affected > 0)
    }
}
