use sqlx::postgres::PgPoolOptions;
use sso_service::config::Config;
use sso_service::outbound::repositories::PostgresApplicationRepository;
use sso_service::telemetry;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    let config = Config::load()?;
    telemetry::init_tracing(&config);

    let pg_pool = PgPoolOptions::new()
        .max_connections(1)
        .connect(&config.database.url)
        .await?;

    sqlx::migrate!("./migrations").run(&pg_pool).await?;
    tracing::info!(database = "postgresql", "Database migrations completed");

    let applications = PostgresApplicationRepository::new(pg_pool.clone());
    for application in &config.applications {
        applications.register(application).await?;
        tracing::info!(
            app_id = application.id,
            name = %application.name,
            "Application registered"
        );
    }

    pg_pool.close().await;
    tracing::info!(
        applications = config.applications.len(),
        "Migration finished"
    );

    Ok(())
}
