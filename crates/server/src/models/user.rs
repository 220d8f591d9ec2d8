//! User profile types.

use serde::{Deserialize, Serialize};

use cevicheria_core::Email;

use super::{ValidationError, non_empty};

/// Address stored until the user provides one.
pub const DEFAULT_ADDRESS: &str = "Sin dirección registrada";
/// Phone stored until the user provides one.
pub const DEFAULT_PHONE: &str = "Sin teléfono registrado";
/// Payment method stored until the user picks one.
pub const DEFAULT_PAYMENT_METHOD: &str = "Efectivo";

/// A customer profile, keyed by email.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub email: Email,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "direccion")]
    pub address: String,
    #[serde(rename = "telefono")]
    pub phone: String,
    #[serde(rename = "metodoPago")]
    pub payment_method: String,
}

impl UserProfile {
    /// Profile synthesized for an email seen for the first time.
    ///
    /// The name is the local part of the email; the rest are placeholders.
    #[must_use]
    pub fn with_defaults(email: Email) -> Self {
        Self {
            name: email.local_part().to_owned(),
            email,
            address: DEFAULT_ADDRESS.to_owned(),
            phone: DEFAULT_PHONE.to_owned(),
            payment_method: DEFAULT_PAYMENT_METHOD.to_owned(),
        }
    }

    /// Merge the non-empty fields of `update` over this profile.
    ///
    /// Absent and empty fields keep their current value, so a field can
    /// never be cleared through an update.
    pub fn merge(&mut self, update: &ProfileUpdate) {
        let fields = [
            (&mut self.name, &update.name),
            (&mut self.address, &update.address),
            (&mut self.phone, &update.phone),
            (&mut self.payment_method, &update.payment_method),
        ];
        for (current, supplied) in fields {
            if let Some(value) = supplied.as_deref().filter(|v| !v.is_empty()) {
                value.clone_into(current);
            }
        }
    }
}

/// Request body for a partial profile update.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProfileUpdate {
    #[serde(rename = "nombre")]
    pub name: Option<String>,
    #[serde(rename = "direccion")]
    pub address: Option<String>,
    #[serde(rename = "telefono")]
    pub phone: Option<String>,
    #[serde(rename = "metodoPago")]
    pub payment_method: Option<String>,
}

/// Request body for explicitly registering a user.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewProfile {
    pub email: Option<String>,
    #[serde(flatten)]
    pub fields: ProfileUpdate,
}

impl NewProfile {
    /// Check the email and build the profile to store.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::MissingFields`] when the email is absent
    /// and [`ValidationError::InvalidEmail`] when it is blank or too long.
    pub fn validate(self) -> Result<UserProfile, ValidationError> {
        let raw = non_empty(self.email).ok_or(ValidationError::MissingFields(vec!["email"]))?;
        let mut profile = UserProfile::with_defaults(Email::parse(&raw)?);
        profile.merge(&self.fields);
        Ok(profile)
    }
}
