//! Database migration command.
//!
//! Migration files live in `crates/server/migrations/`:
//!
//! ```text
//! migrations/
//! ├── 20250301000001_create_productos.sql
//! ├── 20250301000002_create_usuarios.sql
//! └── 20250301000003_create_pedidos.sql
//! ```

use super::{CommandError, connect};

/// Run all pending migrations.
///
/// # Errors
///
/// Returns an error if `DATABASE_URL` is missing, the database is
/// unreachable, or a migration fails.
pub async fn run() -> Result<(), CommandError> {
    let pool = connect().await?;

    tracing::info!("Running migrations...");
    sqlx::migrate!("../server/migrations").run(&pool).await?;

    tracing::info!("Migrations complete!");
    Ok(())
}
