use sea_orm::DatabaseConnection;

use crate::server::{config::Config, error::AppError, seed};

/// Opens the SQLite pool and brings the schema up to date.
///
/// Every pending migration runs before the connection is handed back, so repositories can
/// assume all tables exist. A `sqlite://` URL with `?mode=rwc` creates the file on first run.
///
/// # Arguments
/// - `config` - Application configuration containing the database URL
///
/// # Returns
/// - `Ok(DatabaseConnection)` - Connected database with migrations applied
/// - `Err(AppError)` - Connecting or migrating failed
pub async fn connect_to_database(config: &Config) -> Result<DatabaseConnection, AppError> {
    use migration::{Migrator, MigratorTrait};
    use sea_orm::{ConnectOptions, Database};

    let mut opt = ConnectOptions::new(&config.database_url);
    opt.sqlx_logging(false);

    let db = Database::connect(opt).await?;

    Migrator::up(&db, None).await?;

    Ok(db)
}

/// Builds the shared outbound HTTP client.
///
/// Redirects are not followed; the Gemini API never answers with one.
pub fn setup_reqwest_client() -> Result<reqwest::Client, AppError> {
    reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .timeout(std::time::Duration::from_secs(30))
        .build()
        .map_err(|e| AppError::InternalError(format!("Failed to build HTTP client: {}", e)))
}

/// Inserts demo data when `SEED_DATA` is enabled and the database has no users yet.
pub async fn seed_demo_data(db: &DatabaseConnection, config: &Config) -> Result<(), AppError> {
    if !config.seed_data {
        return Ok(());
    }

    if !seed::seed_if_empty(db).await? {
        tracing::info!("Database already has users, skipping demo data");
    }

    Ok(())
}
