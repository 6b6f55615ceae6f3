//! Error types for the RosterHub client.
//!
//! One enum covers transport failures (propagated from reqwest unchanged)
//! and the custom-field policy failures. All variants are terminal for the
//! call that raised them — nothing here is retried at this layer.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("HTTP: {0}")]
    Http(#[from] reqwest::Error),

    /// The server returned 401 — the bearer token is expired or revoked.
    #[error("Token expired or revoked")]
    AuthExpired,

    /// Any other non-2xx response, with the raw body for debugging.
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Invalid request URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Custom-field update attempted on an entity that was fetched without
    /// custom-field data. Re-fetch with `include_custom_fields` first.
    #[error("Entity has no custom field data; re-fetch with custom fields included")]
    CustomFieldsNotLoaded,

    /// A member-scoped update touched a field members may not edit.
    #[error("Custom field {id} is not editable by members")]
    FieldNotMemberEditable { id: u64 },

    /// Bundled fields must be written as a complete bundle, which this
    /// client does not compute. Rejected regardless of edit scope.
    #[error("Custom field {id} belongs to bundle {bundle}; bundled updates are not supported")]
    BundledFieldUpdate { id: u64, bundle: String },
}
