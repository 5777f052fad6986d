use axum::Json;
use serde::Serialize;

/// Uniform `{success, message, data}` response body used by every route.
#[derive(Debug, Serialize)]
pub struct Envelope<T> {
    pub success: bool,
    pub message: String,
    pub data: Option<T>,
}

impl<T: Serialize> Envelope<T> {
    pub fn ok(message: impl Into<String>, data: T) -> Json<Self> {
        Json(Self {
            success: true,
            message: message.into(),
            data: Some(data),
        })
    }

    /// A `success: false` body delivered with HTTP 200. Some legacy client
    /// flows (coupon check) expect business rejections in-band.
    pub fn rejected(message: impl Into<String>) -> Json<Self> {
        Json(Self {
            success: false,
            message: message.into(),
            data: None,
        })
    }

    /// Success body with `data: null` for typed routes where an absent
    /// record is a normal answer.
    pub fn ok_none(message: impl Into<String>) -> Json<Self> {
        Json(Self {
            success: true,
            message: message.into(),
            data: None,
        })
    }
}

impl Envelope<()> {
    /// Success body with `data: null`.
    pub fn ok_empty(message: impl Into<String>) -> Json<Self> {
        Json(Self {
            success: true,
            message: message.into(),
            data: None,
        })
    }
}
