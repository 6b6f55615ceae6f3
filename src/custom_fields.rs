//! Custom-field reconciliation.
//!
//! The custom-fields PUT has replace semantics: the server applies exactly
//! the fields it receives. A caller usually supplies only the fields it
//! means to change, so before writing we merge that partial batch against
//! the entity's last-fetched snapshot — keeping the caller's entries,
//! backfilling every other eligible unbundled field with its current value,
//! and rejecting anything the caller may not or cannot touch. One write per
//! call, never a partial application.

use serde::Serialize;

use crate::error::ApiError;
use crate::members::RosterClient;
use crate::types::{CustomFieldUpdate, CustomFieldValue, Entity};

#[derive(Serialize)]
struct CustomFieldsBody<'a> {
    fields: &'a [CustomFieldUpdate],
}

/// Merge a partial update batch against the field snapshot, producing the
/// complete set to send, or the first policy violation.
///
/// Walking the snapshot in order:
/// - a field with a proposed update is validated: under
///   `only_member_edit_own`, fields without `member_edit_own` are rejected;
///   bundled fields are always rejected (this client cannot compute the
///   rest of a bundle, and partial bundle writes are invalid server-side);
/// - a field without one is backfilled with its current value, unless it
///   is bundled or outside the caller's edit scope, in which case it is
///   omitted from the write entirely.
///
/// The result keeps the caller's entries first, in caller order, with
/// backfills appended in snapshot order. The input batch is not modified.
/// Updates whose id matches no snapshot field pass through untouched.
pub fn reconcile(
    snapshot: &[CustomFieldValue],
    updates: &[CustomFieldUpdate],
    only_member_edit_own: bool,
) -> Result<Vec<CustomFieldUpdate>, ApiError> {
    let mut reconciled = updates.to_vec();

    for field in snapshot {
        let proposed = updates.iter().any(|u| u.id == field.id);
        if proposed {
            if only_member_edit_own && !field.member_edit_own {
                return Err(ApiError::FieldNotMemberEditable { id: field.id });
            }
            if let Some(bundle) = &field.bundle {
                return Err(ApiError::BundledFieldUpdate {
                    id: field.id,
                    bundle: bundle.clone(),
                });
            }
        } else {
            if field.bundle.is_some() || (only_member_edit_own && !field.member_edit_own) {
                continue;
            }
            reconciled.push(CustomFieldUpdate {
                id: field.id,
                value: field.value.clone(),
            });
        }
    }

    Ok(reconciled)
}

impl RosterClient {
    /// Update custom fields on a previously fetched entity.
    ///
    /// `updates` may be partial; the write sent to the server is the full
    /// reconciled set (see [`reconcile`]). The entity must have been
    /// fetched with custom-field data, otherwise there is no baseline to
    /// merge against and the call fails with
    /// [`ApiError::CustomFieldsNotLoaded`]. An empty batch succeeds
    /// without a network call.
    pub async fn update_custom_fields(
        &self,
        entity: &Entity,
        updates: &[CustomFieldUpdate],
        only_member_edit_own: bool,
    ) -> Result<(), ApiError> {
        if updates.is_empty() {
            log::debug!(
                "skipping custom field update for {} {}: empty batch",
                entity.kind().as_str(),
                entity.id()
            );
            return Ok(());
        }

        let snapshot = entity
            .custom_fields()
            .ok_or(ApiError::CustomFieldsNotLoaded)?;
        let fields = reconcile(snapshot, updates, only_member_edit_own)?;

        self.transport
            .put(
                &format!("team/custom-fields/{}/{}", entity.kind().as_str(), entity.id()),
                &CustomFieldsBody { fields: &fields },
            )
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn field(id: u64, value: &str, bundle: Option<&str>, member_edit_own: bool) -> CustomFieldValue {
        CustomFieldValue {
            id,
            value: json!(value),
            bundle: bundle.map(str::to_string),
            member_edit_own,
        }
    }

    fn update(id: u64, value: &str) -> CustomFieldUpdate {
        CustomFieldUpdate {
            id,
            value: json!(value),
        }
    }

    #[test]
    fn test_empty_updates_reconcile_to_snapshot() {
        let snapshot = vec![field(1, "a", None, true), field(2, "b", None, false)];
        let result = reconcile(&snapshot, &[], false).unwrap();
        assert_eq!(result, vec![update(1, "a"), update(2, "b")]);
    }

    #[test]
    fn test_partial_update_backfills_remaining_fields() {
        let snapshot = vec![field(1, "a", None, true), field(2, "b", None, false)];
        let result = reconcile(&snapshot, &[update(1, "z")], false).unwrap();
        assert_eq!(result, vec![update(1, "z"), update(2, "b")]);
    }

    #[test]
    fn test_idempotent_when_updates_match_snapshot() {
        let snapshot = vec![field(1, "a", None, true), field(2, "b", None, false)];
        let current = vec![update(1, "a"), update(2, "b")];
        let result = reconcile(&snapshot, &current, false).unwrap();
        assert_eq!(result, current);
    }

    #[test]
    fn test_bundled_field_update_always_rejected() {
        let snapshot = vec![field(3, "c", Some("B1"), true)];
        for restricted in [false, true] {
            let err = reconcile(&snapshot, &[update(3, "z")], restricted).unwrap_err();
            assert!(matches!(
                err,
                ApiError::BundledFieldUpdate { id: 3, ref bundle } if bundle.as_str() == "B1"
            ));
        }
    }

    #[test]
    fn test_bundled_field_never_backfilled() {
        let snapshot = vec![field(1, "a", None, true), field(3, "c", Some("B1"), true)];
        let result = reconcile(&snapshot, &[update(1, "z")], false).unwrap();
        assert_eq!(result, vec![update(1, "z")]);
    }

    #[test]
    fn test_member_scope_rejects_non_editable_field() {
        let snapshot = vec![field(1, "a", None, true), field(2, "b", None, false)];
        let err = reconcile(&snapshot, &[update(2, "z")], true).unwrap_err();
        assert!(matches!(err, ApiError::FieldNotMemberEditable { id: 2 }));

        // Unrestricted, the same update is fine.
        let result = reconcile(&snapshot, &[update(2, "z")], false).unwrap();
        assert_eq!(result, vec![update(2, "z"), update(1, "a")]);
    }

    #[test]
    fn test_member_scope_omits_non_editable_backfill() {
        // Fields outside the member's scope are left out of the write
        // rather than backfilled on the member's behalf.
        let snapshot = vec![field(1, "a", None, true), field(2, "b", None, false)];
        let result = reconcile(&snapshot, &[update(1, "z")], true).unwrap();
        assert_eq!(result, vec![update(1, "z")]);
    }

    #[test]
    fn test_scope_check_precedes_bundle_check() {
        let snapshot = vec![field(5, "x", Some("B2"), false)];
        let err = reconcile(&snapshot, &[update(5, "y")], true).unwrap_err();
        assert!(matches!(err, ApiError::FieldNotMemberEditable { id: 5 }));
    }

    #[test]
    fn test_unknown_field_updates_pass_through() {
        let snapshot = vec![field(1, "a", None, true)];
        let result = reconcile(&snapshot, &[update(99, "q")], false).unwrap();
        assert_eq!(result, vec![update(99, "q"), update(1, "a")]);
    }

    #[test]
    fn test_input_batch_is_untouched() {
        let snapshot = vec![field(1, "a", None, true), field(2, "b", None, true)];
        let updates = vec![update(1, "z")];
        let result = reconcile(&snapshot, &updates, false).unwrap();
        assert_eq!(updates, vec![update(1, "z")]);
        assert_eq!(result.len(), 2);
    }

    #[test]
    fn test_empty_snapshot_reconciles_to_updates() {
        // Only an *absent* snapshot is an error (checked by the caller);
        // an empty one just yields the caller's batch.
        let result = reconcile(&[], &[update(1, "z")], true).unwrap();
        assert_eq!(result, vec![update(1, "z")]);
    }

    #[test]
    fn test_fields_body_wire_shape() {
        let fields = vec![update(1, "z"), update(2, "b")];
        let body = serde_json::to_value(CustomFieldsBody { fields: &fields }).unwrap();
        assert_eq!(
            body,
            json!({"fields": [{"id": 1, "value": "z"}, {"id": 2, "value": "b"}]})
        );
    }
}
