//! User directory: profiles keyed by email.
//!
//! Reading an unknown email creates its profile with default values, so a
//! lookup never reports "not found".

use std::collections::HashMap;
use std::sync::Arc;

use sqlx::PgPool;
use tokio::sync::RwLock;
use tracing::{debug, instrument};

use cevicheria_core::Email;

use crate::db::UserRepository;
use crate::error::StoreError;
use crate::models::{NewProfile, ProfileUpdate, UserProfile};

/// Profiles held in process memory.
#[derive(Debug, Default)]
pub struct InMemoryDirectory {
    profiles: RwLock<HashMap<Email, UserProfile>>,
}

impl InMemoryDirectory {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

/// Handle to the directory. Cheap to clone.
#[derive(Clone)]
pub struct Directory {
    backend: Backend,
}

#[derive(Clone)]
enum Backend {
    InMemory(Arc<InMemoryDirectory>),
    Postgres(PgPool),
}

impl Directory {
    #[must_use]
    pub fn in_memory(directory: InMemoryDirectory) -> Self {
        Self {
            backend: Backend::InMemory(Arc::new(directory)),
        }
    }

    #[must_use]
    pub const fn postgres(pool: PgPool) -> Self {
        Self {
            backend: Backend::Postgres(pool),
        }
    }

    /// Return the stored profile, creating a default one on first access.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Repository` if the database fails.
    #[instrument(skip(self, email), fields(email = %email))]
    pub async fn get_or_create(&self, email: &Email) -> Result<UserProfile, StoreError> {
        match &self.backend {
            Backend::InMemory(directory) => {
                if let Some(profile) = directory.profiles.read().await.get(email) {
                    return Ok(profile.clone());
                }
                let mut profiles = directory.profiles.write().await;
                let profile = profiles.entry(email.clone()).or_insert_with(|| {
                    debug!("creating default profile");
                    UserProfile::with_defaults(email.clone())
                });
                Ok(profile.clone())
            }
            Backend::Postgres(pool) => {
                let repo = UserRepository::new(pool);
                if let Some(profile) = repo.get(email).await? {
                    return Ok(profile);
                }
                debug!("creating default profile");
                let defaults = UserProfile::with_defaults(email.clone());
                match repo.insert_if_absent(&defaults).await? {
                    Some(profile) => Ok(profile),
                    // Lost a race with a concurrent creator; theirs wins.
                    None => repo.get(email).await?.ok_or_else(|| {
                        StoreError::Conflict(format!("perfil de {email} no disponible"))
                    }),
                }
            }
        }
    }

    /// Register a new profile.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Validation` for a missing or blank email,
    /// `StoreError::Conflict` when the email is already registered, and
    /// `StoreError::Repository` if the database fails.
    #[instrument(skip(self, input))]
    pub async fn create(&self, input: NewProfile) -> Result<UserProfile, StoreError> {
        let profile = input.validate()?;
        let taken = || StoreError::Conflict(format!("El usuario {} ya existe", profile.email));

        match &self.backend {
            Backend::InMemory(directory) => {
                let mut profiles = directory.profiles.write().await;
                if profiles.contains_key(&profile.email) {
                    return Err(taken());
                }
                profiles.insert(profile.email.clone(), profile.clone());
                Ok(profile)
            }
            Backend::Postgres(pool) => UserRepository::new(pool)
                .insert_if_absent(&profile)
                .await?
                .ok_or_else(taken),
        }
    }

    /// Merge `update` over the stored (or default) profile and save it.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Repository` if the database fails.
    #[instrument(skip(self, email, update), fields(email = %email))]
    pub async fn upsert(
        &self,
        email: &Email,
        update: &ProfileUpdate,
    ) -> Result<UserProfile, StoreError> {
        match &self.backend {
            Backend::InMemory(directory) => {
                let mut profiles = directory.profiles.write().await;
                let profile = profiles
                    .entry(email.clone())
                    .or_insert_with(|| UserProfile::with_defaults(email.clone()));
                profile.merge(update);
                Ok(profile.clone())
            }
            Backend::Postgres(pool) => {
                let repo = UserRepository::new(pool);
                let mut profile = repo
                    .get(email)
                    .await?
                    .unwrap_or_else(|| UserProfile::with_defaults(email.clone()));
                profile.merge(update);
                Ok(repo.save(&profile).await?)
            }
        }
    }
}
