//! Seed the catalog with the house menu.

use tracing::info;

use cevicheria_server::catalog::fixtures;
use cevicheria_server::db::ProductRepository;

use super::{CommandError, connect};

/// Insert the menu fixtures into `productos`.
///
/// Skips when the table already has rows unless `force` is set. Returns
/// the number of products inserted.
///
/// # Errors
///
/// Returns an error if `DATABASE_URL` is missing or a database operation
/// fails.
pub async fn menu(force: bool) -> Result<usize, CommandError> {
    let pool = connect().await?;
    let repo = ProductRepository::new(&pool);

    let existing = repo.count().await?;
    if existing > 0 && !force {
        info!(existing, "Catalog already has products, skipping (use --force to seed anyway)");
        return Ok(0);
    }

    let menu = fixtures::menu();
    for draft in &menu {
        let product = repo.insert(draft).await?;
        info!(id = %product.id, name = %product.name, "Seeded product");
    }

    info!(count = menu.len(), "Seeding complete!");
    Ok(menu.len())
}
