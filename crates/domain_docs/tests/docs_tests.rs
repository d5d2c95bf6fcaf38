//! Tests for the document types and status workflow

use chrono::NaiveDate;
use rust_decimal_macros::dec;

use core_kernel::Currency;
use domain_docs::{DocumentError, DocumentStatus, NewManifest, NewManifestItem};

use DocumentStatus::*;

#[test]
fn test_draft_can_reach_every_other_state() {
    assert!(Draft.can_transition_to(Pending));
    assert!(Draft.can_transition_to(Confirmed));
    assert!(Draft.can_transition_to(Rejected));
}

#[test]
fn test_pending_can_only_settle() {
    assert!(Pending.can_transition_to(Confirmed));
    assert!(Pending.can_transition_to(Rejected));
    assert!(!Pending.can_transition_to(Draft));
    assert!(!Pending.can_transition_to(Pending));
}

#[test]
fn test_confirmed_and_rejected_are_terminal() {
    for terminal in [Confirmed, Rejected] {
        for target in [Draft, Pending, Confirmed, Rejected] {
            assert!(
                !terminal.can_transition_to(target),
                "{terminal} must not transition to {target}"
            );
        }
    }
}

#[test]
fn test_reconfirming_a_confirmed_document_fails() {
    let settled = Draft.transition_to(Confirmed).unwrap();

    let err = settled.transition_to(Confirmed).unwrap_err();
    assert_eq!(
        err,
        DocumentError::InvalidStatusTransition {
            from: "confirmed".to_string(),
            to: "confirmed".to_string(),
        }
    );
}

#[test]
fn test_rejecting_a_rejected_document_fails() {
    let settled = Draft.transition_to(Rejected).unwrap();
    assert!(settled.transition_to(Rejected).is_err());
}

#[test]
fn test_self_transition_from_draft_is_not_allowed() {
    assert!(Draft.transition_to(Draft).is_err());
}

#[test]
fn test_status_serializes_lowercase() {
    assert_eq!(serde_json::to_string(&Confirmed).unwrap(), "\"confirmed\"");
    let parsed: DocumentStatus = serde_json::from_str("\"pending\"").unwrap();
    assert_eq!(parsed, Pending);
}

#[test]
fn test_manifest_payload_round_trips_through_json() {
    let payload = NewManifest {
        mawb_number: "784-12345675".to_string(),
        flight_number: "CZ3101".to_string(),
        flight_date: NaiveDate::from_ymd_opt(2024, 6, 15).unwrap(),
        departure_port: "CAN".to_string(),
        destination_port: "AMS".to_string(),
        carrier: "CZ".to_string(),
        currency: Currency::CNY,
        items: vec![NewManifestItem {
            hawb_number: "HWB00012345".to_string(),
            pieces: 3,
            gross_weight_kg: dec!(120.50),
            category_code: "2".to_string(),
            vat: dec!(13.00),
            duty: dec!(0),
            consignee: None,
            description: Some("garments".to_string()),
        }],
    };

    let json = serde_json::to_string(&payload).unwrap();
    let back: NewManifest = serde_json::from_str(&json).unwrap();

    assert_eq!(back.mawb_number, payload.mawb_number);
    assert_eq!(back.items.len(), 1);
    assert_eq!(back.items[0].gross_weight_kg, dec!(120.50));
    assert_eq!(back.currency, Currency::CNY);
}
