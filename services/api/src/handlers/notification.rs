use axum::Json;
use axum::extract::{Path, State};
use serde::Deserialize;
use uuid::Uuid;

use market_core::response::Envelope;

use crate::auth::BearerToken;
use crate::domain::types::{NotificationRecord, NotificationStats};
use crate::error::ApiError;
use crate::handlers::authorize;
use crate::state::AppState;
use crate::usecase::notification::{
    DeleteNotificationUseCase, ListNotificationsUseCase, SendNotificationInput,
    SendNotificationUseCase, TrackNotificationUseCase,
};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendNotificationBody {
    pub title: String,
    pub description: String,
    pub image_url: Option<String>,
}

pub async fn send(
    State(state): State<AppState>,
    token: BearerToken,
    Json(body): Json<SendNotificationBody>,
) -> Result<Json<Envelope<NotificationRecord>>, ApiError> {
    authorize(&state, &token).await?;
    let record = SendNotificationUseCase {
        notifications: state.notification_repo(),
        push: state.push_port(),
    }
    .execute(SendNotificationInput {
        title: body.title,
        description: body.description,
        image_url: body.image_url,
    })
    .await?;
    Ok(Envelope::ok("Notification sent successfully.", record))
}

pub async fn track(
    State(state): State<AppState>,
    token: BearerToken,
    Path(id): Path<Uuid>,
) -> Result<Json<Envelope<NotificationStats>>, ApiError> {
    authorize(&state, &token).await?;
    let stats = TrackNotificationUseCase {
        notifications: state.notification_repo(),
        push: state.push_port(),
    }
    .execute(id)
    .await?;
    Ok(Envelope::ok(
        "Notification stats retrieved successfully.",
        stats,
    ))
}

pub async fn list(
    State(state): State<AppState>,
    token: BearerToken,
) -> Result<Json<Envelope<Vec<NotificationRecord>>>, ApiError> {
    authorize(&state, &token).await?;
    let records = ListNotificationsUseCase {
        notifications: state.notification_repo(),
    }
    .execute()
    .await?;
    Ok(Envelope::ok("Notifications retrieved successfully.", records))
}

pub async fn delete(
    State(state): State<AppState>,
    token: BearerToken,
    Path(id): Path<Uuid>,
) -> Result<Json<Envelope<()>>, ApiError> {
    authorize(&state, &token).await?;
    DeleteNotificationUseCase {
        notifications: state.notification_repo(),
    }
    .execute(id)
    .await?;
    Ok(Envelope::ok_empty("Notification deleted successfully."))
}
