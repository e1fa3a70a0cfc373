use tally_app::{config::db::DatabaseConfig, database};

pub(crate) async fn run(config: &DatabaseConfig) -> Result<(), String> {
    let pool = database::connect(config)
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))?;

    database::migrate(&pool)
        .await
        .map_err(|error| format!("failed to apply migrations: {error}"))?;

    pool.close().await;

    Ok(())
}
