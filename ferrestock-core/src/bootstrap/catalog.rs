//! Default product categories

use tracing::{debug, info};

use crate::{Database, Result};

/// Categories every fresh installation starts with
pub const DEFAULT_CATEGORIES: [&str; 5] = [
    "Herrajes",
    "Tuberías",
    "Eléctrico",
    "Herramientas",
    "Pinturas",
];

/// Insert each of [`DEFAULT_CATEGORIES`] that is not present yet
///
/// Matching is by `nombre`, so renamed or extra categories are kept and a
/// deleted default comes back on the next start. Returns how many rows were
/// inserted.
pub async fn ensure_default_categories(db: &Database) -> Result<u64> {
    let mut inserted = 0;

    for name in DEFAULT_CATEGORIES {
        let result = sqlx::query(
            r"
            INSERT INTO categorias (nombre)
            SELECT ? FROM DUAL
            WHERE NOT EXISTS (SELECT 1 FROM categorias WHERE nombre = ?)
            ",
        )
        .bind(name)
        .bind(name)
        .execute(db.pool())
        .await?;

        if result.rows_affected() > 0 {
            debug!(category = name, "Seeded category");
        }
        inserted += result.rows_affected();
    }

    info!(inserted, "Default categories ensured");

    Ok(inserted)
}
