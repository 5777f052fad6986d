use reqwest::header::AUTHORIZATION;
use serde::Deserialize;

use crate::domain::repository::PushPort;
use crate::domain::types::NotificationStats;
use crate::error::ApiError;

const ONESIGNAL_API: &str = "https://onesignal.com/api/v1";

/// OneSignal REST client. Broadcasts to the `All` segment.
#[derive(Clone)]
pub struct OneSignalPush {
    pub http: reqwest::Client,
    pub app_id: String,
    pub api_key: String,
}

#[derive(Deserialize)]
struct SendResponse {
    id: String,
}

#[derive(Deserialize, Default)]
struct PlatformStats {
    #[serde(default)]
    successful: u64,
    #[serde(default)]
    failed: u64,
    #[serde(default)]
    errored: u64,
    #[serde(default)]
    converted: u64,
}

#[derive(Deserialize, Default)]
struct DeliveryStats {
    #[serde(default)]
    android: PlatformStats,
}

#[derive(Deserialize)]
struct TrackResponse {
    #[serde(default)]
    platform_delivery_stats: DeliveryStats,
}

impl OneSignalPush {
    fn check_configured(&self) -> Result<(), ApiError> {
        if self.app_id.is_empty() || self.api_key.is_empty() {
            return Err(ApiError::Upstream("push provider not configured".into()));
        }
        Ok(())
    }
}

impl PushPort for OneSignalPush {
    async fn send(
        &self,
        title: &str,
        description: &str,
        image_url: Option<&str>,
    ) -> Result<String, ApiError> {
        self.check_configured()?;

        let mut body = serde_json::json!({
            "app_id": self.app_id,
            "headings": { "en": title },
            "contents": { "en": description },
            "included_segments": ["All"],
        });
        if let Some(url) = image_url {
            body["big_picture"] = serde_json::Value::String(url.to_owned());
        }

        let resp = self
            .http
            .post(format!("{ONESIGNAL_API}/notifications"))
            .header(AUTHORIZATION, format!("Basic {}", self.api_key))
            .json(&body)
            .send()
            .await
            .map_err(|e| ApiError::Upstream(format!("onesignal send: {e}")))?;

        if !resp.status().is_success() {
            return Err(ApiError::Upstream(format!(
                "onesignal send: status {}",
                resp.status()
            )));
        }

        let out: SendResponse = resp
            .json()
            .await
            .map_err(|e| ApiError::Upstream(format!("onesignal send: {e}")))?;
        Ok(out.id)
    }

    async fn stats(&self, provider_id: &str) -> Result<NotificationStats, ApiError> {
        self.check_configured()?;

        let resp = self
            .http
            .get(format!(
                "{ONESIGNAL_API}/notifications/{provider_id}?app_id={}",
                self.app_id
            ))
            .header(AUTHORIZATION, format!("Basic {}", self.api_key))
            .send()
            .await
            .map_err(|e| ApiError::Upstream(format!("onesignal track: {e}")))?;

        if !resp.status().is_success() {
            return Err(ApiError::Upstream(format!(
                "onesignal track: status {}",
                resp.status()
            )));
        }

        let out: TrackResponse = resp
            .json()
            .await
            .map_err(|e| ApiError::Upstream(format!("onesignal track: {e}")))?;

        let android = out.platform_delivery_stats.android;
        Ok(NotificationStats {
            successful: android.successful,
            failed: android.failed,
            errored: android.errored,
            converted: android.converted,
        })
    }
}
