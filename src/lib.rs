//! Typed async client for the RosterHub roster-management API.
//!
//! Covers members, member groups, and entity custom fields. The interesting
//! part is custom-field updates: the server's PUT has replace semantics, so
//! a partial batch is reconciled against the entity's last-fetched snapshot
//! before anything is written — see [`custom_fields::reconcile`].
//!
//! Modules:
//! - config: base URL, token, page size
//! - error: one error enum for transport, API, and policy failures
//! - http: bearer-auth transport with pagination and bounded retry
//! - types: entities, custom fields, update bodies, query options
//! - members: member/group endpoint methods
//! - custom_fields: reconciliation + the custom-fields write
//!
//! ```no_run
//! use rosterhub::{ApiConfig, CustomFieldUpdate, MemberQuery, RosterClient};
//!
//! # async fn run() -> Result<(), rosterhub::ApiError> {
//! let client = RosterClient::new(ApiConfig::new("api-token"))?;
//!
//! let query = MemberQuery { include_custom_fields: true, ..Default::default() };
//! let members = client.get_members("club", "42", &query).await?;
//!
//! let update = CustomFieldUpdate { id: 1, value: "vegetarian".into() };
//! client.update_custom_fields(&members[0], &[update], false).await?;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod custom_fields;
pub mod error;
mod http;
pub mod members;
pub mod types;

pub use config::ApiConfig;
pub use custom_fields::reconcile;
pub use error::ApiError;
pub use members::RosterClient;
pub use types::{
    CustomFieldUpdate, CustomFieldValue, Entity, EntityKind, Group, GroupQuery, Member,
    MemberQuery, MemberUpdate,
};
