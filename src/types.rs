//! Data model for the RosterHub API.
//!
//! DTOs mirror the server's camelCase JSON. Raw responses do not
//! self-identify their entity kind, so list/detail endpoints deserialize
//! into the concrete shape and the caller wraps it in [`Entity`] — the
//! variant choice is the "stamp" that records what was fetched.

use serde::{Deserialize, Serialize};

// ============================================================================
// Entities
// ============================================================================

/// Kind of entity a custom-field write targets. Serializes lowercase,
/// matching the `team/custom-fields/{kind}/{id}` path segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    Member,
    Group,
}

impl EntityKind {
    pub fn as_str(self) -> &'static str {
        match self {
            EntityKind::Member => "member",
            EntityKind::Group => "group",
        }
    }
}

/// A fetched entity, tagged with the kind it was fetched as.
#[derive(Debug, Clone)]
pub enum Entity {
    Member(Member),
    Group(Group),
}

impl Entity {
    pub fn kind(&self) -> EntityKind {
        match self {
            Entity::Member(_) => EntityKind::Member,
            Entity::Group(_) => EntityKind::Group,
        }
    }

    pub fn id(&self) -> &str {
        match self {
            Entity::Member(m) => &m.id,
            Entity::Group(g) => &g.id,
        }
    }

    /// Custom-field snapshot observed at fetch time. `None` means the
    /// entity was fetched without custom-field data, not that it has none.
    pub fn custom_fields(&self) -> Option<&[CustomFieldValue]> {
        match self {
            Entity::Member(m) => m.custom_fields.as_deref(),
            Entity::Group(g) => g.custom_fields.as_deref(),
        }
    }
}

/// A roster member.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default)]
    pub custom_fields: Option<Vec<CustomFieldValue>>,
}

/// A member group.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Group {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub member_count: Option<u64>,
    #[serde(default)]
    pub custom_fields: Option<Vec<CustomFieldValue>>,
}

// ============================================================================
// Custom fields
// ============================================================================

/// Server-side value and metadata for one custom field on one entity,
/// as observed at fetch time. Refreshed only by re-fetching the entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomFieldValue {
    pub id: u64,
    #[serde(default)]
    pub value: serde_json::Value,
    /// Bundle this field belongs to, if any. Bundled fields must be
    /// written together as a complete bundle.
    #[serde(default)]
    pub bundle: Option<String>,
    /// Whether members may edit this field on their own record.
    #[serde(default)]
    pub member_edit_own: bool,
}

/// A proposed change to one custom field. Ids are unique within a batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomFieldUpdate {
    pub id: u64,
    pub value: serde_json::Value,
}

// ============================================================================
// Update bodies and query options
// ============================================================================

/// Partial-member PUT body. Only fields that are set are serialized;
/// omitted fields remain unchanged on the server.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

impl MemberUpdate {
    /// True when the update would serialize to an empty body. Empty
    /// updates are skipped without a network call.
    pub fn is_empty(&self) -> bool {
        self.first_name.is_none()
            && self.last_name.is_none()
            && self.email.is_none()
            && self.phone.is_none()
            && self.role.is_none()
    }
}

/// Filters for member listing. A parameter is sent only when set; boolean
/// flags serialize as the literal string `"true"` and are omitted when
/// false (the server treats any presence as enabled).
#[derive(Debug, Clone, Default)]
pub struct MemberQuery {
    pub group_id: Option<String>,
    pub include_details: bool,
    pub include_custom_fields: bool,
}

impl MemberQuery {
    pub(crate) fn to_params(&self) -> Vec<(String, String)> {
        let mut params = Vec::new();
        if let Some(group_id) = &self.group_id {
            params.push(("groupId".to_string(), group_id.clone()));
        }
        if self.include_details {
            params.push(("includeDetails".to_string(), "true".to_string()));
        }
        if self.include_custom_fields {
            params.push(("includeCustomFields".to_string(), "true".to_string()));
        }
        params
    }
}

/// Filters for group listing.
#[derive(Debug, Clone, Default)]
pub struct GroupQuery {
    pub member_id: Option<String>,
    pub title: Option<String>,
}

impl GroupQuery {
    pub(crate) fn to_params(&self) -> Vec<(String, String)> {
        let mut params = Vec::new();
        if let Some(member_id) = &self.member_id {
            params.push(("memberId".to_string(), member_id.clone()));
        }
        if let Some(title) = &self.title {
            params.push(("title".to_string(), title.clone()));
        }
        params
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_member_deserialization() {
        let json = r#"{
            "id": "m-1017",
            "firstName": "Alice",
            "lastName": "Nguyen",
            "email": "alice@example.org",
            "isActive": true,
            "customFields": [
                {"id": 1, "value": "vegetarian", "memberEditOwn": true},
                {"id": 2, "value": "M", "bundle": "kit", "memberEditOwn": false}
            ]
        }"#;

        let member: Member = serde_json::from_str(json).unwrap();
        assert_eq!(member.id, "m-1017");
        assert_eq!(member.first_name.as_deref(), Some("Alice"));
        assert!(member.is_active);

        let fields = member.custom_fields.as_deref().unwrap();
        assert_eq!(fields.len(), 2);
        assert_eq!(fields[0].value, json!("vegetarian"));
        assert!(fields[0].member_edit_own);
        assert!(fields[0].bundle.is_none());
        assert_eq!(fields[1].bundle.as_deref(), Some("kit"));
    }

    #[test]
    fn test_member_without_custom_fields_is_none() {
        // Absent list means "not fetched", which must stay distinguishable
        // from an empty list.
        let member: Member = serde_json::from_str(r#"{"id": "m-1"}"#).unwrap();
        assert!(member.custom_fields.is_none());

        let member: Member =
            serde_json::from_str(r#"{"id": "m-1", "customFields": []}"#).unwrap();
        assert_eq!(member.custom_fields.as_deref(), Some(&[][..]));
    }

    #[test]
    fn test_entity_stamping() {
        let member: Member = serde_json::from_str(r#"{"id": "m-9"}"#).unwrap();
        let entity = Entity::Member(member);
        assert_eq!(entity.kind(), EntityKind::Member);
        assert_eq!(entity.kind().as_str(), "member");
        assert_eq!(entity.id(), "m-9");
        assert!(entity.custom_fields().is_none());
    }

    #[test]
    fn test_member_update_skips_unset_fields() {
        let update = MemberUpdate {
            email: Some("new@example.org".to_string()),
            ..Default::default()
        };
        let body = serde_json::to_value(&update).unwrap();
        assert_eq!(body, json!({"email": "new@example.org"}));
        assert!(!update.is_empty());
        assert!(MemberUpdate::default().is_empty());
    }

    #[test]
    fn test_member_query_params_only_when_set() {
        assert!(MemberQuery::default().to_params().is_empty());

        let query = MemberQuery {
            group_id: Some("g-3".to_string()),
            include_details: false,
            include_custom_fields: true,
        };
        assert_eq!(
            query.to_params(),
            vec![
                ("groupId".to_string(), "g-3".to_string()),
                ("includeCustomFields".to_string(), "true".to_string()),
            ]
        );
    }

    #[test]
    fn test_group_query_params_only_when_set() {
        assert!(GroupQuery::default().to_params().is_empty());

        let query = GroupQuery {
            member_id: Some("m-1".to_string()),
            title: None,
        };
        assert_eq!(
            query.to_params(),
            vec![("memberId".to_string(), "m-1".to_string())]
        );
    }

    #[test]
    fn test_custom_field_value_defaults() {
        let field: CustomFieldValue = serde_json::from_str(r#"{"id": 4}"#).unwrap();
        assert_eq!(field.value, serde_json::Value::Null);
        assert!(field.bundle.is_none());
        assert!(!field.member_edit_own);
    }
}
