/// API service configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// PostgreSQL connection URL.
    pub database_url: String,
    /// TCP port for the HTTP server (default 3000). Env var: `API_PORT`.
    pub api_port: u16,
    /// Secret for signing admin JWTs.
    pub jwt_secret: String,
    /// Username for the bootstrap super admin (default "superadmin").
    pub bootstrap_admin_username: String,
    /// Initial password for the bootstrap super admin. Only used when the
    /// admin table has no super admin yet.
    pub bootstrap_admin_password: String,
    /// OneSignal application id. Push dispatch is disabled when empty.
    pub onesignal_app_id: String,
    /// OneSignal REST API key.
    pub onesignal_api_key: String,
    /// HTTP mail relay endpoint (e.g. "https://api.mailersend.com/v1/email").
    /// Mail dispatch is disabled when empty.
    pub mail_api_url: String,
    /// Bearer token for the mail relay.
    pub mail_api_key: String,
    /// Sender address for verification and reset mail.
    pub mail_from: String,
    /// Cloudinary cloud name. Image upload is disabled when empty.
    pub cloudinary_cloud_name: String,
    /// Cloudinary unsigned upload preset.
    pub cloudinary_upload_preset: String,
}

fn optional(name: &str) -> String {
    std::env::var(name).unwrap_or_default()
}

impl ApiConfig {
    pub fn from_env() -> Self {
        Self {
            database_url: std::env::var("DATABASE_URL").expect("DATABASE_URL"),
            api_port: std::env::var("API_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3000),
            jwt_secret: std::env::var("JWT_SECRET").expect("JWT_SECRET"),
            bootstrap_admin_username: std::env::var("BOOTSTRAP_ADMIN_USERNAME")
                .unwrap_or_else(|_| "superadmin".to_owned()),
            bootstrap_admin_password: std::env::var("BOOTSTRAP_ADMIN_PASSWORD")
                .unwrap_or_else(|_| "admin123".to_owned()),
            onesignal_app_id: optional("ONESIGNAL_APP_ID"),
            onesignal_api_key: optional("ONESIGNAL_API_KEY"),
            mail_api_url: optional("MAIL_API_URL"),
            mail_api_key: optional("MAIL_API_KEY"),
            mail_from: optional("MAIL_FROM"),
            cloudinary_cloud_name: optional("CLOUDINARY_CLOUD_NAME"),
            cloudinary_upload_preset: optional("CLOUDINARY_UPLOAD_PRESET"),
        }
    }
}
