//! Property-based tests for inbound classification.
//!
//! The classifier sits on the untrusted boundary, so it must produce exactly
//! one outcome for any input and never reinterpret a payload as a different
//! shape.

use proptest::prelude::*;
use relaychat_proto::{InboundEvent, ProtocolError};
use serde_json::{Value, json};

fn username() -> impl Strategy<Value = String> {
    "[A-Za-z0-9_.-]{1,16}"
}

proptest! {
    #[test]
    fn prop_decode_never_panics(text in ".{0,256}") {
        let _ = InboundEvent::decode(&text);
    }

    #[test]
    fn prop_arrays_are_snapshots_in_order(roster in prop::collection::vec(username(), 0..20)) {
        let payload: Value =
            roster.iter().map(|name| json!({ "username": name })).collect::<Vec<_>>().into();

        let event = InboundEvent::classify(payload);
        prop_assert_eq!(event, Ok(InboundEvent::PresenceSnapshot { roster }));
    }

    #[test]
    fn prop_logout_tag_wins_over_message_fields(name in username(), content in ".{0,64}") {
        // A logout notice that also happens to carry message fields is still a logout.
        let payload = json!({ "type": "logout", "username": name, "from": "x", "content": content });

        let event = InboundEvent::classify(payload);
        prop_assert_eq!(event, Ok(InboundEvent::LogoutNotice { username: name }));
    }

    #[test]
    fn prop_objects_without_message_fields_are_malformed(key in "[a-z]{1,8}", value in ".{0,32}") {
        prop_assume!(key != "from" && key != "content" && key != "type");
        let payload = json!({ key: value });

        let event = InboundEvent::classify(payload);
        prop_assert!(
            matches!(event, Err(ProtocolError::MalformedEvent { .. })),
            "expected MalformedEvent, got {:?}",
            event
        );
    }
}
