use chrono::TimeZone;
use chrono::Utc;

use super::Role;
use super::Transcript;

#[test]
fn it_appends_in_order() {
    let mut transcript = Transcript::default();
    transcript.push(Role::User, "Why does this fail?");
    transcript.push(Role::Assistant, "Missing semicolon.");

    let roles = transcript
        .messages()
        .iter()
        .map(|e| return e.role())
        .collect::<Vec<Role>>();

    assert_eq!(roles, vec![Role::User, Role::Assistant]);
    assert_eq!(transcript.len(), 2);
    assert_eq!(transcript.last().unwrap().content(), "Missing semicolon.");
}

#[test]
fn it_uses_creation_time_as_id() {
    let now = Utc.timestamp_millis_opt(1_700_000_000_000).unwrap();
    let mut transcript = Transcript::default();
    let msg = transcript.push_at(Role::User, "Hi", now);

    assert_eq!(msg.id(), 1_700_000_000_000);
    assert_eq!(msg.timestamp(), now);
}

#[test]
fn it_breaks_id_ties_by_append_order() {
    let now = Utc.timestamp_millis_opt(1_700_000_000_000).unwrap();
    let earlier = Utc.timestamp_millis_opt(1_699_999_999_000).unwrap();
    let mut transcript = Transcript::default();
    transcript.push_at(Role::User, "first", now);
    transcript.push_at(Role::Assistant, "second", now);
    transcript.push_at(Role::User, "third", earlier);

    let ids = transcript
        .messages()
        .iter()
        .map(|e| return e.id())
        .collect::<Vec<i64>>();

    assert_eq!(
        ids,
        vec![1_700_000_000_000, 1_700_000_000_001, 1_700_000_000_002]
    );
}

#[test]
fn it_clears() {
    let mut transcript = Transcript::default();
    transcript.push(Role::User, "Hi");
    transcript.clear();

    assert!(transcript.is_empty());
    assert!(transcript.last().is_none());
}

#[test]
fn it_serializes_roles_lowercase() {
    let now = Utc.timestamp_millis_opt(0).unwrap();
    let mut transcript = Transcript::default();
    transcript.push_at(Role::Assistant, "Try Y", now);

    let json = serde_json::to_string(transcript.messages()).unwrap();
    insta::assert_snapshot!(json, @r###"[{"id":0,"role":"assistant","content":"Try Y","timestamp":"1970-01-01T00:00:00Z"}]"###);
}
