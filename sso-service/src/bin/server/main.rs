use std::sync::Arc;

use auth::PasswordHasher;
use sqlx::postgres::PgPoolOptions;
use sso_service::config::Config;
use sso_service::domain::auth::service::AuthService;
use sso_service::inbound::grpc::AuthGrpcService;
use sso_service::inbound::http::router::create_router;
use sso_service::outbound::repositories::PostgresApplicationRepository;
use sso_service::outbound::repositories::PostgresUserRepository;
use sso_service::proto::auth_server::AuthServer;
use sso_service::telemetry;
use tokio::sync::watch;
use tonic::transport::Server;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    let config = Config::load()?;
    telemetry::init_tracing(&config);

    tracing::info!(
        service = "sso-service",
        version = env!("CARGO_PKG_VERSION"),
        env = %config.env,
        "Service starting"
    );

    tracing::info!(
        http_port = config.server.http_port,
        grpc_port = config.server.grpc_port,
        token_ttl_seconds = config.token.ttl_seconds,
        applications = config.applications.len(),
        "Configuration loaded"
    );

    let pg_pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .connect(&config.database.url)
        .await?;
    tracing::info!(
        max_connections = config.database.max_connections,
        database = "postgresql",
        "Database connection pool created"
    );

    sqlx::migrate!("./migrations").run(&pg_pool).await?;
    tracing::info!(database = "postgresql", "Database migrations completed");

    let password_hasher = PasswordHasher::with_params(
        config.password.memory_kib,
        config.password.iterations,
        config.password.parallelism,
    )?;
    let user_repository = Arc::new(PostgresUserRepository::new(pg_pool.clone()));
    let application_repository = Arc::new(PostgresApplicationRepository::new(pg_pool.clone()));

    let auth_service = Arc::new(AuthService::new(
        user_repository,
        application_repository,
        password_hasher,
        config.token.ttl()?,
    )?);

    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    let http_application = create_router(
        Arc::clone(&auth_service),
        config.server.request_timeout(),
    );
    let mut http_shutdown = shutdown_rx.clone();
    let http_server = tokio::spawn(async move {
        axum::serve(http_listener, http_application)
            .with_graceful_shutdown(async move {
                let _ = http_shutdown.changed().await;
            })
            .await
    });

    let grpc_address = format!("0.0.0.0:{}", config.server.grpc_port).parse()?;
    let grpc_service = AuthGrpcService::new(Arc::clone(&auth_service));
    tracing::info!(
        address = %grpc_address,
        port = config.server.grpc_port,
        protocol = "grpc",
        "gRpc server listening"
    );

    let request_timeout = config.server.request_timeout();
    let mut grpc_shutdown = shutdown_rx;
    let grpc_server = tokio::spawn(async move {
        Server::builder()
            .timeout(request_timeout)
            .add_service(AuthServer::new(grpc_service))
            .serve_with_shutdown(grpc_address, async move {
                let _ = grpc_shutdown.changed().await;
            })
            .await
    });

    shutdown_signal().await;
    tracing::info!("Shutdown signal received, draining servers");
    let _ = shutdown_tx.send(true);

    let (http_result, grpc_result) = tokio::try_join!(http_server, grpc_server)?;
    if let Err(e) = http_result {
        tracing::error!(error = %e, protocol = "http", "Server error");
    }
    if let Err(e) = grpc_result {
        tracing::error!(error = %e, protocol = "grpc", "Server error");
    }

    pg_pool.close().await;
    tracing::info!("Servers exited, database pool closed");

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for ctrl-c");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
