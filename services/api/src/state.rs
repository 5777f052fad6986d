use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::config::ApiConfig;
use crate::infra::db::{
    DbAdminUserRepository, DbBrandRepository, DbCategoryRepository, DbCouponRepository,
    DbCustomerRepository, DbNotificationRepository, DbOrderRepository, DbPosterRepository,
    DbProductRepository, DbRatingRepository, DbSubCategoryRepository, DbVariantRepository,
    DbVariantTypeRepository,
};
use crate::infra::images::CloudinaryImageStore;
use crate::infra::mail::HttpMailer;
use crate::infra::push::OneSignalPush;

/// Shared application state passed to every handler via axum `State`.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub http: reqwest::Client,
    pub config: Arc<ApiConfig>,
}

impl AppState {
    pub fn new(db: DatabaseConnection, config: ApiConfig) -> Self {
        Self {
            db,
            http: reqwest::Client::new(),
            config: Arc::new(config),
        }
    }

    pub fn category_repo(&self) -> DbCategoryRepository {
        DbCategoryRepository {
            db: self.db.clone(),
        }
    }

    pub fn sub_category_repo(&self) -> DbSubCategoryRepository {
        DbSubCategoryRepository {
            db: self.db.clone(),
        }
    }

    pub fn brand_repo(&self) -> DbBrandRepository {
        DbBrandRepository {
            db: self.db.clone(),
        }
    }

    pub fn variant_type_repo(&self) -> DbVariantTypeRepository {
        DbVariantTypeRepository {
            db: self.db.clone(),
        }
    }

    pub fn variant_repo(&self) -> DbVariantRepository {
        DbVariantRepository {
            db: self.db.clone(),
        }
    }

    pub fn product_repo(&self) -> DbProductRepository {
        DbProductRepository {
            db: self.db.clone(),
        }
    }

    pub fn coupon_repo(&self) -> DbCouponRepository {
        DbCouponRepository {
            db: self.db.clone(),
        }
    }

    pub fn poster_repo(&self) -> DbPosterRepository {
        DbPosterRepository {
            db: self.db.clone(),
        }
    }

    pub fn admin_repo(&self) -> DbAdminUserRepository {
        DbAdminUserRepository {
            db: self.db.clone(),
        }
    }

    pub fn customer_repo(&self) -> DbCustomerRepository {
        DbCustomerRepository {
            db: self.db.clone(),
        }
    }

    pub fn order_repo(&self) -> DbOrderRepository {
        DbOrderRepository {
            db: self.db.clone(),
        }
    }

    pub fn rating_repo(&self) -> DbRatingRepository {
        DbRatingRepository {
            db: self.db.clone(),
        }
    }

    pub fn notification_repo(&self) -> DbNotificationRepository {
        DbNotificationRepository {
            db: self.db.clone(),
        }
    }

    pub fn push_port(&self) -> OneSignalPush {
        OneSignalPush {
            http: self.http.clone(),
            app_id: self.config.onesignal_app_id.clone(),
            api_key: self.config.onesignal_api_key.clone(),
        }
    }

    pub fn mailer(&self) -> HttpMailer {
        HttpMailer {
            http: self.http.clone(),
            api_url: self.config.mail_api_url.clone(),
            api_key: self.config.mail_api_key.clone(),
            from: self.config.mail_from.clone(),
        }
    }

    pub fn image_store(&self) -> CloudinaryImageStore {
        CloudinaryImageStore {
            http: self.http.clone(),
            cloud_name: self.config.cloudinary_cloud_name.clone(),
            upload_preset: self.config.cloudinary_upload_preset.clone(),
        }
    }

    /// Guard for admin-protected routes.
    pub fn authorizer(&self) -> crate::auth::AuthorizeAdminUseCase<DbAdminUserRepository> {
        crate::auth::AuthorizeAdminUseCase {
            admins: self.admin_repo(),
            jwt_secret: self.config.jwt_secret.clone(),
        }
    }
}
