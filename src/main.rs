use std::net::SocketAddr;
use worldvote::config::AppConfig;
use worldvote::db;
use worldvote::startup::{AppState, app};

#[macro_use]
extern crate tracing;

#[tokio::main]
async fn main() {
    if std::env::var("RUST_LOG").is_err() {
        unsafe {
            std::env::set_var("RUST_LOG", "INFO");
        }
    }
    // initialize tracing
    tracing_subscriber::fmt::init();

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("invalid configuration: {}", e);
            std::process::exit(1);
        }
    };

    let pool = match db::init_db(&config.database_url, config.max_connections).await {
        Ok(pool) => pool,
        Err(e) => {
            error!("failed to open database {}: {}", config.database_url, e);
            std::process::exit(1);
        }
    };
    info!("{}", db::get_pool_stats(&pool));

    let app = app(AppState::new(pool));

    let addr = config.bind_addr;
    info!("listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Unable to spawn tcp listener");

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await
    .expect("server error");
}
