use maternal_api::domain::{
    care::entity::{AncRecord, AncVisit, NoteKind, RecordKind},
    patient::value_objects::PhoneNumber,
    shared::errors::DomainError,
    user::entity::{Actor, User},
};
use uuid::Uuid;

#[test]
fn phone_accepts_common_formats() {
    for phone in ["0712345678", "+254 712 345 678", "0712-345-678"] {
        assert!(PhoneNumber::new(phone.to_string()).is_ok(), "{phone} should be valid");
    }
}

#[test]
fn phone_rejects_letters_and_short_numbers() {
    assert!(PhoneNumber::new("call me".to_string()).is_err());
    assert!(PhoneNumber::new("12".to_string()).is_err());
    assert!(PhoneNumber::new("++254712345678".to_string()).is_err());
}

#[test]
fn record_kinds_parse_from_names_and_legacy_codes() {
    assert_eq!("anc".parse::<RecordKind>().unwrap(), RecordKind::Anc);
    assert_eq!("1".parse::<RecordKind>().unwrap(), RecordKind::Ldr);
    assert_eq!("PNC".parse::<RecordKind>().unwrap(), RecordKind::Pnc);
    assert!(matches!(
        "3".parse::<RecordKind>(),
        Err(DomainError::NotFound(_))
    ));
}

#[test]
fn antenatal_is_not_a_note_kind() {
    assert!("anc".parse::<NoteKind>().is_err());
    assert_eq!("ldr".parse::<NoteKind>().unwrap().table(), "ldr_notes");
}

#[test]
fn visit_records_leave_intake_fields_empty() {
    let record = AncRecord::new_visit(
        Uuid::now_v7(),
        Uuid::now_v7(),
        AncVisit {
            folic_acid: true,
            ..Default::default()
        },
    );
    assert!(!record.compulsory);
    assert!(record.folic_acid);
    assert_eq!(record.expected_delivery_date, None);
    assert_eq!(record.gravida, None);
}

#[test]
fn actor_rules() {
    let user = User::new("midwife".into(), "hash".into(), false);
    let actor = Actor::from(&user);
    assert_eq!(actor.require_admin(), Err(DomainError::Forbidden));
    assert_eq!(actor.require_author(user.id), Ok(()));
    assert_eq!(actor.require_author(Uuid::now_v7()), Err(DomainError::Forbidden));
}

#[test]
fn password_hash_is_never_serialized() {
    let user = User::new("midwife".into(), "$2b$12$secret".into(), false);
    let json = serde_json::to_value(&user).unwrap();
    assert!(json.get("password_hash").is_none());
    assert_eq!(json["username"], "midwife");
}
