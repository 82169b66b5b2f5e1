use std::net::SocketAddr;
use bookstore::catalog::controller::app;
use bookstore::core::controller::AppState;
use bookstore::core::domain::Configuration;
use bookstore::core::library::{LibraryError, LibraryResult};
use bookstore::utils::db::{build_pool, create_books_table};
use bookstore::utils::logs::setup_tracing;

fn test_mode() -> bool {
    ["BOOKSTORE_ENV", "NODE_ENV"].iter()
        .any(|key| std::env::var(key).map(|v| v == "test").unwrap_or(false))
}

#[tokio::main]
async fn main() -> LibraryResult<()> {
    let config = Configuration::from_env(test_mode());
    setup_tracing(config.log_level.as_str());

    let pool = build_pool(&config).await?;
    create_books_table(&pool).await?;

    let addr: SocketAddr = config.socket_addr().parse().map_err(|err| {
        LibraryError::runtime(format!("invalid listen address {}", err).as_str(), None)
    })?;
    let port = config.port;
    let router = app(AppState::new(config, pool));

    tracing::info!("Server starting on port {}", port);
    axum::Server::bind(&addr)
        .serve(router.into_make_service())
        .await
        .map_err(|err| LibraryError::runtime(format!("server error {}", err).as_str(), None))
}
