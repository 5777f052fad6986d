use sea_orm::Database;

use market_api::config::ApiConfig;
use market_api::router::build_router;
use market_api::state::AppState;
use market_api::usecase::admin_user::BootstrapSuperAdminUseCase;

#[tokio::main]
async fn main() {
    market_core::tracing::init_tracing();

    let config = ApiConfig::from_env();
    let db = Database::connect(&config.database_url)
        .await
        .expect("database connection");

    let state = AppState::new(db, config);

    BootstrapSuperAdminUseCase {
        admins: state.admin_repo(),
    }
    .execute(
        &state.config.bootstrap_admin_username,
        &state.config.bootstrap_admin_password,
    )
    .await
    .expect("bootstrap super admin");

    let addr = format!("0.0.0.0:{}", state.config.api_port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("bind listener");
    tracing::info!(%addr, "marketplace api listening");

    axum::serve(listener, build_router(state))
        .await
        .expect("server");
}
