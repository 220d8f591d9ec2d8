//! Profile repository for the `usuarios` table.

use sqlx::PgPool;

use cevicheria_core::Email;

use super::RepositoryError;
use crate::models::UserProfile;

const PROFILE_COLUMNS: &str = "email, nombre, direccion, telefono, metodo_pago";

#[derive(Debug, sqlx::FromRow)]
struct ProfileRow {
    email: String,
    nombre: String,
    direccion: String,
    telefono: String,
    metodo_pago: String,
}

impl TryFrom<ProfileRow> for UserProfile {
    type Error = RepositoryError;

    fn try_from(row: ProfileRow) -> Result<Self, Self::Error> {
        let email = Email::parse(&row.email).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid email in database: {e}"))
        })?;

        Ok(Self {
            email,
            name: row.nombre,
            address: row.direccion,
            phone: row.telefono,
            payment_method: row.metodo_pago,
        })
    }
}

/// Repository for profile database operations.
pub struct UserRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> UserRepository<'a> {
    /// Create a new user repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Get a profile by email.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if the stored email is invalid.
    pub async fn get(&self, email: &Email) -> Result<Option<UserProfile>, RepositoryError> {
        let sql = format!("SELECT {PROFILE_COLUMNS} FROM usuarios WHERE email = $1");

        let row: Option<ProfileRow> = sqlx::query_as(&sql)
            .bind(email)
            .fetch_optional(self.pool)
            .await?;

        row.map(UserProfile::try_from).transpose()
    }

    /// Insert a profile unless one already exists for its email.
    ///
    /// Returns `None` when the email was already taken.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn insert_if_absent(
        &self,
        profile: &UserProfile,
    ) -> Result<Option<UserProfile>, RepositoryError> {
        let sql = format!(
            "INSERT INTO usuarios ({PROFILE_COLUMNS}) \
             VALUES ($1, $2, $3, $4, $5) \
             ON CONFLICT (email) DO NOTHING \
             RETURNING {PROFILE_COLUMNS}"
        );

        let row: Option<ProfileRow> = sqlx::query_as(&sql)
            .bind(&profile.email)
            .bind(&profile.name)
            .bind(&profile.address)
            .bind(&profile.phone)
            .bind(&profile.payment_method)
            .fetch_optional(self.pool)
            .await?;

        row.map(UserProfile::try_from).transpose()
    }

    /// Insert or overwrite a profile.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the write fails.
    pub async fn save(&self, profile: &UserProfile) -> Result<UserProfile, RepositoryError> {
        let sql = format!(
            "INSERT INTO usuarios ({PROFILE_COLUMNS}) \
             VALUES ($1, $2, $3, $4, $5) \
             ON CONFLICT (email) DO UPDATE SET \
                 nombre = EXCLUDED.nombre, \
                 direccion = EXCLUDED.direccion, \
                 telefono = EXCLUDED.telefono, \
                 metodo_pago = EXCLUDED.metodo_pago, \
                 actualizado_en = now() \
             RETURNING {PROFILE_COLUMNS}"
        );

        let row: ProfileRow = sqlx::query_as(&sql)
            .bind(&profile.email)
            .bind(&profile.name)
            .bind(&profile.address)
            .bind(&profile.phone)
            .bind(&profile.payment_method)
            .fetch_one(self.pool)
            .await?;

        row.try_into()
    }
}
