use apibatch_types::ApiAction;
use proptest::prelude::*;
use std::collections::HashSet;
use std::str::FromStr;

const ALL_ACTIONS: [ApiAction; 5] = [
    ApiAction::Post,
    ApiAction::Sync,
    ApiAction::Delete,
    ApiAction::Update,
    ApiAction::Patch,
];

// ── Display & parse ──────────────────────────────────────────────

#[test]
fn action_display_lowercase() {
    assert_eq!(ApiAction::Post.to_string(), "post");
    assert_eq!(ApiAction::Sync.to_string(), "sync");
    assert_eq!(ApiAction::Delete.to_string(), "delete");
    assert_eq!(ApiAction::Update.to_string(), "update");
    assert_eq!(ApiAction::Patch.to_string(), "patch");
}

#[test]
fn action_display_parse_roundtrip() {
    for action in ALL_ACTIONS {
        let parsed = ApiAction::from_str(&action.to_string()).unwrap();
        assert_eq!(parsed, action);
    }
}

#[test]
fn action_parse_is_case_insensitive() {
    assert_eq!(ApiAction::from_str("POST").unwrap(), ApiAction::Post);
    assert_eq!(ApiAction::from_str("Sync").unwrap(), ApiAction::Sync);
}

#[test]
fn action_parse_unknown() {
    let err = ApiAction::from_str("get").unwrap_err();
    assert_eq!(err.to_string(), "unknown action: get");
}

#[test]
fn action_as_str_matches_display() {
    assert_eq!(ApiAction::Post.as_str(), ApiAction::Post.to_string());
}

// ── Serde ────────────────────────────────────────────────────────

#[test]
fn action_serde_roundtrip() {
    let json = serde_json::to_string(&ApiAction::Sync).unwrap();
    assert_eq!(json, "\"sync\"");
    let parsed: ApiAction = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, ApiAction::Sync);
}

// ── Hash & eq ────────────────────────────────────────────────────

#[test]
fn action_hash_and_eq() {
    let mut set = HashSet::new();
    set.insert(ApiAction::Post);
    set.insert(ApiAction::Post);
    assert_eq!(set.len(), 1);
}

// ── Properties ───────────────────────────────────────────────────

proptest! {
    /// Parsing arbitrary input never panics.
    #[test]
    fn action_parse_never_panics(s in ".*") {
        let _ = ApiAction::from_str(&s);
    }

    /// Any casing of a known name parses back to the same action.
    #[test]
    fn action_parse_any_casing(
        action in prop::sample::select(ALL_ACTIONS.to_vec()),
        upper in any::<bool>(),
    ) {
        let name = if upper {
            action.as_str().to_uppercase()
        } else {
            action.as_str().to_string()
        };
        prop_assert_eq!(ApiAction::from_str(&name).unwrap(), action);
    }
}
