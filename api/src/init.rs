use std::sync::Arc;

use anyhow::Context;
use axum::Router;
use axum::http::{HeaderValue, Method, header};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use socketioxide::SocketIo;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use app::config::Config;
use app::core::{Notifier, SocketNotifier};
use app::state::AppState;

use crate::action::register_tournament_namespace;
use crate::middleware::extension::extension;
use crate::openapi::ApiDoc;
use crate::routers::create_router;

/// Full application router with socket.io mounted and broadcasting through it.
pub fn setup_router(config: Config, conn: DatabaseConnection) -> anyhow::Result<Router> {
    let (socket_layer, io) = SocketIo::new_layer();
    register_tournament_namespace(&io);

    let notifier = Arc::new(SocketNotifier::new(io));
    let router = setup_router_with_notifier(config, conn, notifier)?;

    Ok(router.layer(socket_layer))
}

/// Router without the socket layer; events go to `notifier`.
pub fn setup_router_with_notifier(
    config: Config,
    conn: DatabaseConnection,
    notifier: Arc<dyn Notifier>,
) -> anyhow::Result<Router> {
    let cors = CorsLayer::new()
        .allow_methods([Method::OPTIONS, Method::GET, Method::POST])
        .allow_headers([header::ACCEPT, header::AUTHORIZATION, header::CONTENT_TYPE])
        .allow_origin(
            config
                .allowed_origin
                .parse::<HeaderValue>()
                .context("Failed to parse allowed origin")?,
        )
        .allow_credentials(true);

    let state = AppState::new(conn, config, notifier);

    Ok(create_router(state.clone())
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(axum::middleware::from_fn_with_state(state, extension))
        .layer(TraceLayer::new_for_http())
        .layer(cors))
}

pub fn setup_config() -> anyhow::Result<Config> {
    dotenvy::dotenv().ok();
    Config::from_env()
}

pub async fn setup_db(db_url: &str) -> anyhow::Result<DatabaseConnection> {
    let mut opt = ConnectOptions::new(db_url);
    opt.max_lifetime(std::time::Duration::from_secs(60))
        .min_connections(1)
        .max_connections(20)
        .sqlx_logging(false);

    Database::connect(opt)
        .await
        .context("Database connection failed")
}
