use uuid::Uuid;

use crate::domain::repository::{NotificationRepository, PushPort};
use crate::domain::types::{NotificationRecord, NotificationStats};
use crate::error::ApiError;

pub struct SendNotificationInput {
    pub title: String,
    pub description: String,
    pub image_url: Option<String>,
}

/// Broadcast a push notification and keep a record of it for tracking.
pub struct SendNotificationUseCase<R: NotificationRepository, P: PushPort> {
    pub notifications: R,
    pub push: P,
}

impl<R: NotificationRepository, P: PushPort> SendNotificationUseCase<R, P> {
    pub async fn execute(
        &self,
        input: SendNotificationInput,
    ) -> Result<NotificationRecord, ApiError> {
        if input.title.trim().is_empty() {
            return Err(ApiError::Validation("title is required"));
        }
        if input.description.trim().is_empty() {
            return Err(ApiError::Validation("description is required"));
        }

        let provider_id = self
            .push
            .send(&input.title, &input.description, input.image_url.as_deref())
            .await?;

        self.notifications
            .insert(
                &provider_id,
                &input.title,
                &input.description,
                input.image_url.as_deref(),
            )
            .await
    }
}

pub struct TrackNotificationUseCase<R: NotificationRepository, P: PushPort> {
    pub notifications: R,
    pub push: P,
}

impl<R: NotificationRepository, P: PushPort> TrackNotificationUseCase<R, P> {
    /// Delivery counters for a stored notification, straight from the
    /// provider.
    pub async fn execute(&self, id: Uuid) -> Result<NotificationStats, ApiError> {
        let record = self
            .notifications
            .list()
            .await?
            .into_iter()
            .find(|r| r.id == id)
            .ok_or(ApiError::NotFound("notification"))?;
        self.push.stats(&record.provider_id).await
    }
}

pub struct ListNotificationsUseCase<R: NotificationRepository> {
    pub notifications: R,
}

impl<R: NotificationRepository> ListNotificationsUseCase<R> {
    pub async fn execute(&self) -> Result<Vec<NotificationRecord>, ApiError> {
        self.notifications.list().await
    }
}

pub struct DeleteNotificationUseCase<R: NotificationRepository> {
    pub notifications: R,
}

impl<R: NotificationRepository> DeleteNotificationUseCase<R> {
    pub async fn execute(&self, id: Uuid) -> Result<(), ApiError> {
        if !self.notifications.delete(id).await? {
            return Err(ApiError::NotFound("notification"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use std::collections::HashMap;
    use std::sync::Mutex;

    #[derive(Default)]
    struct MockNotificationRepo {
        rows: Mutex<HashMap<Uuid, NotificationRecord>>,
    }

    impl NotificationRepository for &MockNotificationRepo {
        async fn insert(
            &self,
            provider_id: &str,
            title: &str,
            description: &str,
            image_url: Option<&str>,
        ) -> Result<NotificationRecord, ApiError> {
            let record = NotificationRecord {
                id: Uuid::now_v7(),
                provider_id: provider_id.to_owned(),
                title: title.to_owned(),
                description: description.to_owned(),
                image_url: image_url.map(str::to_owned),
                created_at: Utc::now(),
            };
            self.rows.lock().unwrap().insert(record.id, record.clone());
            Ok(record)
        }

        async fn list(&self) -> Result<Vec<NotificationRecord>, ApiError> {
            Ok(self.rows.lock().unwrap().values().cloned().collect())
        }

        async fn delete(&self, id: Uuid) -> Result<bool, ApiError> {
            Ok(self.rows.lock().unwrap().remove(&id).is_some())
        }
    }

    #[derive(Default)]
    struct MockPush {
        sent: Mutex<Vec<String>>,
        fail: bool,
    }

    impl PushPort for &MockPush {
        async fn send(
            &self,
            title: &str,
            _description: &str,
            _image_url: Option<&str>,
        ) -> Result<String, ApiError> {
            if self.fail {
                return Err(ApiError::Upstream("provider unavailable".into()));
            }
            self.sent.lock().unwrap().push(title.to_owned());
            Ok(format!("prov-{}", self.sent.lock().unwrap().len()))
        }

        async fn stats(&self, provider_id: &str) -> Result<NotificationStats, ApiError> {
            assert!(provider_id.starts_with("prov-"));
            Ok(NotificationStats {
                successful: 40,
                failed: 2,
                errored: 1,
                converted: 5,
            })
        }
    }

    #[tokio::test]
    async fn send_stores_record_with_provider_id() {
        let repo = MockNotificationRepo::default();
        let push = MockPush::default();

        let record = SendNotificationUseCase {
            notifications: &repo,
            push: &push,
        }
        .execute(SendNotificationInput {
            title: "Flash sale".into(),
            description: "40% off all boots today".into(),
            image_url: None,
        })
        .await
        .unwrap();

        assert_eq!(record.provider_id, "prov-1");
        assert_eq!(repo.rows.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn provider_failure_stores_nothing() {
        let repo = MockNotificationRepo::default();
        let push = MockPush {
            fail: true,
            ..Default::default()
        };

        let result = SendNotificationUseCase {
            notifications: &repo,
            push: &push,
        }
        .execute(SendNotificationInput {
            title: "Flash sale".into(),
            description: "40% off".into(),
            image_url: None,
        })
        .await;

        assert!(matches!(result, Err(ApiError::Upstream(_))));
        assert!(repo.rows.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn track_resolves_provider_stats() {
        let repo = MockNotificationRepo::default();
        let push = MockPush::default();

        let record = SendNotificationUseCase {
            notifications: &repo,
            push: &push,
        }
        .execute(SendNotificationInput {
            title: "Flash sale".into(),
            description: "40% off".into(),
            image_url: None,
        })
        .await
        .unwrap();

        let stats = TrackNotificationUseCase {
            notifications: &repo,
            push: &push,
        }
        .execute(record.id)
        .await
        .unwrap();
        assert_eq!(stats.successful, 40);
        assert_eq!(stats.converted, 5);
    }

    #[tokio::test]
    async fn blank_title_is_rejected() {
        let repo = MockNotificationRepo::default();
        let push = MockPush::default();
        let result = SendNotificationUseCase {
            notifications: &repo,
            push: &push,
        }
        .execute(SendNotificationInput {
            title: "  ".into(),
            description: "body".into(),
            image_url: None,
        })
        .await;
        assert!(matches!(result, Err(ApiError::Validation(_))));
    }
}
