use reqwest::header::AUTHORIZATION;

use crate::domain::repository::MailerPort;
use crate::error::ApiError;

/// Plain-text mail over an HTTP relay. When no relay is configured the
/// message is logged and dropped, so local setups work without SMTP.
#[derive(Clone)]
pub struct HttpMailer {
    pub http: reqwest::Client,
    pub api_url: String,
    pub api_key: String,
    pub from: String,
}

impl MailerPort for HttpMailer {
    async fn send(&self, to: &str, subject: &str, body: &str) -> Result<(), ApiError> {
        if self.api_url.is_empty() {
            tracing::warn!(to, subject, "mail relay not configured, dropping message");
            return Ok(());
        }

        let payload = serde_json::json!({
            "from": { "email": self.from },
            "to": [{ "email": to }],
            "subject": subject,
            "text": body,
        });

        let resp = self
            .http
            .post(&self.api_url)
            .header(AUTHORIZATION, format!("Bearer {}", self.api_key))
            .json(&payload)
            .send()
            .await
            .map_err(|e| ApiError::Upstream(format!("mail relay: {e}")))?;

        if !resp.status().is_success() {
            return Err(ApiError::Upstream(format!(
                "mail relay: status {}",
                resp.status()
            )));
        }
        Ok(())
    }
}
