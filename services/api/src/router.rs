use axum::Router;
use axum::routing::{delete, get, post, put};
use tower_http::trace::TraceLayer;

use market_core::health::{healthz, readyz};
use market_core::middleware::request_id_layer;

use crate::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let categories = Router::new()
        .route("/", get(handlers::category::list).post(handlers::category::create))
        .route(
            "/{id}",
            get(handlers::category::get)
                .put(handlers::category::update)
                .delete(handlers::category::delete),
        );

    let sub_categories = Router::new()
        .route(
            "/",
            get(handlers::sub_category::list).post(handlers::sub_category::create),
        )
        .route(
            "/{id}",
            get(handlers::sub_category::get)
                .put(handlers::sub_category::update)
                .delete(handlers::sub_category::delete),
        );

    let brands = Router::new()
        .route("/", get(handlers::brand::list).post(handlers::brand::create))
        .route(
            "/{id}",
            get(handlers::brand::get)
                .put(handlers::brand::update)
                .delete(handlers::brand::delete),
        );

    let variant_types = Router::new()
        .route(
            "/",
            get(handlers::variant_type::list).post(handlers::variant_type::create),
        )
        .route(
            "/{id}",
            get(handlers::variant_type::get)
                .put(handlers::variant_type::update)
                .delete(handlers::variant_type::delete),
        );

    let variants = Router::new()
        .route("/", get(handlers::variant::list).post(handlers::variant::create))
        .route(
            "/{id}",
            get(handlers::variant::get)
                .put(handlers::variant::update)
                .delete(handlers::variant::delete),
        );

    let products = Router::new()
        .route("/", get(handlers::product::list).post(handlers::product::create))
        .route(
            "/{id}",
            get(handlers::product::get)
                .put(handlers::product::update)
                .delete(handlers::product::delete),
        );

    let posters = Router::new()
        .route("/", get(handlers::poster::list).post(handlers::poster::create))
        .route(
            "/{id}",
            get(handlers::poster::get)
                .put(handlers::poster::update)
                .delete(handlers::poster::delete),
        );

    let coupons = Router::new()
        .route("/", get(handlers::coupon::list).post(handlers::coupon::create))
        .route("/check-coupon", post(handlers::coupon::check))
        .route(
            "/{id}",
            get(handlers::coupon::get)
                .put(handlers::coupon::update)
                .delete(handlers::coupon::delete),
        );

    let orders = Router::new()
        .route("/", get(handlers::order::list).post(handlers::order::create))
        .route(
            "/admin/pending-verification",
            get(handlers::order::list_pending_verification),
        )
        .route(
            "/orderByUserId/{userId}",
            get(handlers::order::list_by_customer),
        )
        .route(
            "/payment-status/{status}",
            get(handlers::order::list_by_payment_status),
        )
        .route("/{id}/verify-payment", put(handlers::order::verify_payment))
        .route("/{id}/payment-proof", put(handlers::order::submit_payment_proof))
        .route(
            "/{id}",
            get(handlers::order::get)
                .put(handlers::order::update_status)
                .delete(handlers::order::delete),
        );

    let payment = Router::new()
        .route("/upload-proof", post(handlers::payment::upload_proof))
        .route(
            "/upload-proof-base64",
            post(handlers::payment::upload_proof_base64),
        )
        .route(
            "/verify-payment/{orderId}",
            post(handlers::payment::verify_payment),
        );

    let users = Router::new()
        .route("/", get(handlers::customer::list))
        .route("/register", post(handlers::customer::register))
        .route("/login", post(handlers::customer::login))
        .route(
            "/{id}",
            get(handlers::customer::get)
                .put(handlers::customer::update)
                .delete(handlers::customer::delete),
        );

    let admin_users = Router::new()
        .route("/", get(handlers::admin_user::list).post(handlers::admin_user::create))
        .route("/login", post(handlers::admin_user::login))
        .route("/profile", get(handlers::admin_user::profile))
        .route("/{id}/deactivate", put(handlers::admin_user::deactivate))
        .route(
            "/{id}",
            put(handlers::admin_user::update).delete(handlers::admin_user::delete),
        );

    let verification = Router::new()
        .route(
            "/send-email-verification",
            post(handlers::verification::send_email_verification),
        )
        .route("/verify-email", post(handlers::verification::verify_email))
        .route(
            "/forgot-password",
            post(handlers::verification::forgot_password),
        )
        .route(
            "/reset-password",
            post(handlers::verification::reset_password),
        )
        .route(
            "/update-profile/{id}",
            put(handlers::verification::update_profile),
        );

    let ratings = Router::new()
        .route("/", post(handlers::rating::create))
        .route("/product/{productId}", get(handlers::rating::list_by_product))
        .route("/product/{productId}/stats", get(handlers::rating::stats))
        .route(
            "/product/{productId}/user/{userId}",
            get(handlers::rating::customer_rating),
        )
        .route(
            "/{id}",
            put(handlers::rating::update).delete(handlers::rating::delete),
        );

    let notification = Router::new()
        .route("/send-notification", post(handlers::notification::send))
        .route("/track-notification/{id}", get(handlers::notification::track))
        .route("/all-notification", get(handlers::notification::list))
        .route("/delete-notification/{id}", delete(handlers::notification::delete));

    Router::new()
        .route("/", get(handlers::root::index))
        .route("/health", get(handlers::root::health))
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        .nest("/categories", categories)
        .nest("/subCategories", sub_categories)
        .nest("/brands", brands)
        .nest("/variantTypes", variant_types)
        .nest("/variants", variants)
        .nest("/products", products)
        .nest("/posters", posters)
        .nest("/couponCodes", coupons)
        .nest("/orders", orders)
        .nest("/payment", payment)
        .nest("/users", users)
        .nest("/admin-users", admin_users)
        .nest("/verification", verification)
        .nest("/ratings", ratings)
        .nest("/notification", notification)
        .layer(TraceLayer::new_for_http())
        .layer(request_id_layer())
        .with_state(state)
}
