use axum::Json;

use market_core::response::Envelope;

pub async fn index() -> Json<Envelope<()>> {
    Envelope::ok_empty("Marketplace API is running.")
}

pub async fn health() -> Json<Envelope<()>> {
    Envelope::ok_empty("ok")
}
