//! Member and group endpoints.
//!
//! Thin orchestration: builds resource paths and query parameters, hands
//! the round-trip to the transport, and stamps member responses into
//! [`Entity::Member`] right after deserialization (the raw JSON does not
//! say what kind of entity it is).

use crate::config::ApiConfig;
use crate::error::ApiError;
use crate::http::RequestClient;
use crate::types::{Entity, Group, GroupQuery, Member, MemberQuery, MemberUpdate};

/// Typed client for the RosterHub API.
///
/// Stateless against the remote service: every call issues at most one
/// logical fetch (possibly multi-page) or one write, and nothing is cached
/// across calls.
#[derive(Debug)]
pub struct RosterClient {
    pub(crate) transport: RequestClient,
}

impl RosterClient {
    pub fn new(config: ApiConfig) -> Result<Self, ApiError> {
        Ok(Self {
            transport: RequestClient::new(config)?,
        })
    }

    /// Fetch one member, stamped as [`Entity::Member`].
    pub async fn get_member(
        &self,
        context: &str,
        context_id: &str,
        member_id: &str,
        include_details: bool,
    ) -> Result<Entity, ApiError> {
        let mut params = Vec::new();
        if include_details {
            params.push(("includeDetails".to_string(), "true".to_string()));
        }

        let member: Member = self
            .transport
            .get_one(&format!("{context}/{context_id}/members/{member_id}"), &params)
            .await?;
        Ok(Entity::Member(member))
    }

    /// Fetch all members matching `query`, across every page, each stamped
    /// as [`Entity::Member`].
    pub async fn get_members(
        &self,
        context: &str,
        context_id: &str,
        query: &MemberQuery,
    ) -> Result<Vec<Entity>, ApiError> {
        let members: Vec<Member> = self
            .transport
            .get_all(&format!("{context}/{context_id}/members"), &query.to_params())
            .await?;
        Ok(members.into_iter().map(Entity::Member).collect())
    }

    /// Fetch one member group.
    pub async fn get_group(
        &self,
        context: &str,
        context_id: &str,
        group_id: &str,
    ) -> Result<Group, ApiError> {
        self.transport
            .get_one(
                &format!("{context}/{context_id}/member-groups/{group_id}"),
                &[],
            )
            .await
    }

    /// Fetch all member groups matching `query`, across every page.
    pub async fn get_groups(
        &self,
        context: &str,
        context_id: &str,
        query: &GroupQuery,
    ) -> Result<Vec<Group>, ApiError> {
        self.transport
            .get_all(
                &format!("{context}/{context_id}/member-groups"),
                &query.to_params(),
            )
            .await
    }

    /// Apply a partial update to a member. An empty update succeeds
    /// without a network call — the API rejects empty PUT bodies.
    pub async fn update_member(
        &self,
        context: &str,
        context_id: &str,
        member_id: &str,
        update: &MemberUpdate,
    ) -> Result<(), ApiError> {
        if update.is_empty() {
            log::debug!("skipping member update for {member_id}: empty update body");
            return Ok(());
        }

        self.transport
            .put(&format!("{context}/{context_id}/members/{member_id}"), update)
            .await
    }
}
