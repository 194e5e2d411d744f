//! Integration tests for the resource façade
//!
//! Checks that each resource method sends the documented verb, path, query
//! and body, and decodes the documented response shape.

#![allow(dead_code)]

#[path = "support.rs"]
mod support;

use chrono::{TimeZone, Utc};
use pluralkit_domain::{
    AutoproxyMode, AutoproxyPatch, Field, GroupPatch, MemberPatch, PkError, SwitchCreate,
    SwitchPatch, SystemRef,
};
use serde_json::json;
use support::{anonymous_client_for, client_for};
use uuid::Uuid;
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const SWITCH_ID: &str = "9f3c2b1a-0000-4d5e-8f7a-6b5c4d3e2f1a";

fn member(id: &str, name: &str) -> serde_json::Value {
    json!({ "id": id, "name": name, "proxy_tags": [] })
}

fn fronters(members: &[(&str, &str)]) -> serde_json::Value {
    json!({
        "id": SWITCH_ID,
        "timestamp": "2024-03-01T12:00:00Z",
        "members": members.iter().map(|(id, name)| member(id, name)).collect::<Vec<_>>(),
    })
}

fn switch_id() -> Uuid {
    Uuid::parse_str(SWITCH_ID).expect("valid uuid")
}

// ============================================================================
// Systems
// ============================================================================

#[tokio::test]
async fn system_lookup_by_discord_account() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/systems/466378653216014359"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": "exmpl" })))
        .expect(1)
        .mount(&server)
        .await;

    let client = anonymous_client_for(&server);
    let system = client.get_system(&SystemRef::from(466378653216014359_u64)).await.unwrap();
    assert_eq!(system.id, "exmpl");
}

#[tokio::test]
async fn update_system_sends_only_changed_fields() {
    let server = MockServer::start().await;
    Mock::given(method("PATCH"))
        .and(path("/systems/@me"))
        .and(body_json(json!({ "name": "Renamed", "tag": null })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "id": "abcde", "name": "Renamed" })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let patch = pluralkit_domain::SystemPatch {
        name: Field::set("Renamed"),
        tag: Field::Clear,
        ..Default::default()
    };
    let system = client.update_system(&SystemRef::Me, &patch).await.unwrap();
    assert_eq!(system.name.as_deref(), Some("Renamed"));
}

#[tokio::test]
async fn autoproxy_passes_guild_and_channel_as_query() {
    let server = MockServer::start().await;
    Mock::given(method("PATCH"))
        .and(path("/systems/@me/autoproxy"))
        .and(query_param("guild_id", "100"))
        .and(query_param("channel_id", "200"))
        .and(body_json(json!({ "autoproxy_mode": "front" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "autoproxy_mode": "front",
            "autoproxy_member": null,
            "last_latch_timestamp": null
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let patch = AutoproxyPatch { autoproxy_mode: Some(AutoproxyMode::Front), ..Default::default() };
    let settings = client.update_autoproxy_settings(100, Some(200), &patch).await.unwrap();
    assert_eq!(settings.autoproxy_mode, AutoproxyMode::Front);
}

// ============================================================================
// Token requirements
// ============================================================================

#[tokio::test]
async fn writes_without_token_fail_before_sending() {
    let server = MockServer::start().await;
    Mock::given(wiremock::matchers::any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let client = anonymous_client_for(&server);

    let results = [
        client.create_member(&MemberPatch::named("New")).await.map(|_| ()),
        client.delete_member("abcde").await,
        client.add_group_members("grp01", &["abcde"]).await,
        client.create_switch(&SwitchCreate::now(["abcde"])).await.map(|_| ()),
        client.get_system_guild_settings(100).await.map(|_| ()),
        client.get_autoproxy_settings(100, None).await.map(|_| ()),
    ];

    for result in results {
        match result {
            Err(err @ PkError::Unauthorized(_)) => assert_eq!(err.status(), None),
            other => panic!("expected local Unauthorized, got {other:?}"),
        }
    }
}

// ============================================================================
// Members
// ============================================================================

#[tokio::test]
async fn create_member_posts_the_patch() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/members"))
        .and(body_json(json!({ "name": "New" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(member("newmb", "New")))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let created = client.create_member(&MemberPatch::named("New")).await.unwrap();
    assert_eq!(created.id, "newmb");
    assert_eq!(created.name, "New");
}

#[tokio::test]
async fn create_member_requires_a_name() {
    let server = MockServer::start().await;
    let client = client_for(&server);

    let err = client.create_member(&MemberPatch::default()).await.unwrap_err();
    assert!(err.field_errors().is_some_and(|fields| fields.contains_key("name")));
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn delete_member_accepts_no_content() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/members/abcde"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    client.delete_member("abcde").await.unwrap();
}

#[tokio::test]
async fn rejected_member_update_reports_the_field() {
    let server = MockServer::start().await;
    Mock::given(method("PATCH"))
        .and(path("/members/wxyz"))
        .and(body_json(json!({ "name": "New" })))
        .respond_with(ResponseTemplate::new(422).set_body_json(json!({
            "code": 40001,
            "message": "Error parsing JSON model",
            "errors": [{ "field": "name", "message": "too long" }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    match client.update_member("wxyz", &MemberPatch::named("New")).await {
        Err(PkError::Validation { fields, .. }) => {
            assert_eq!(fields.len(), 1);
            assert_eq!(fields.get("name").map(String::as_str), Some("too long"));
        }
        other => panic!("expected Validation, got {other:?}"),
    }
}

#[tokio::test]
async fn member_group_changes_post_the_id_list() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/members/abcde/groups/overwrite"))
        .and(body_json(json!(["grp01", "grp02"])))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    client.overwrite_member_groups("abcde", &["grp01", "grp02"]).await.unwrap();
}

#[tokio::test]
async fn member_reference_is_path_encoded() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/members/a%20b"))
        .respond_with(ResponseTemplate::new(200).set_body_json(member("a b", "Spaced")))
        .expect(1)
        .mount(&server)
        .await;

    let client = anonymous_client_for(&server);
    let found = client.get_member("a b").await.unwrap();
    assert_eq!(found.name, "Spaced");
}

// ============================================================================
// Groups
// ============================================================================

#[tokio::test]
async fn system_groups_can_include_members() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/systems/@me/groups"))
        .and(query_param("with_members", "true"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": "grp01", "name": "Team", "members": ["7a1b2c3d-0000-4000-8000-000000000001"] }
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let groups = client.get_system_groups(&SystemRef::Me, true).await.unwrap();
    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].members.as_ref().map(Vec::len), Some(1));
}

#[tokio::test]
async fn group_create_and_member_add() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/groups"))
        .and(body_json(json!({ "name": "Team" })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "id": "grp01", "name": "Team" })),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/groups/grp01/members/add"))
        .and(body_json(json!(["abcde", "fghij"])))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let group = client.create_group(&GroupPatch::named("Team")).await.unwrap();
    client.add_group_members(&group.id, &["abcde".to_string(), "fghij".to_string()]).await.unwrap();
}

// ============================================================================
// Switches and fronters
// ============================================================================

#[tokio::test]
async fn no_fronters_is_none() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/systems/@me/fronters"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    assert!(client.get_system_fronters(&SystemRef::Me).await.unwrap().is_none());
}

#[tokio::test]
async fn fronters_keep_member_order() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/systems/abcde/fronters"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(fronters(&[("mem02", "Second"), ("mem01", "First")])),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = anonymous_client_for(&server);
    let current = client.get_system_fronters(&SystemRef::from("abcde")).await.unwrap().unwrap();
    assert_eq!(current.primary_fronter().map(|m| m.id.as_str()), Some("mem02"));
    assert_eq!(current.members[1].id, "mem01");
}

#[tokio::test]
async fn create_switch_sends_members_in_order() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/systems/@me/switches"))
        .and(body_json(json!({ "members": ["mem02", "mem01"] })))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(fronters(&[("mem02", "Second"), ("mem01", "First")])),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let created = client.create_switch(&SwitchCreate::now(["mem02", "mem01"])).await.unwrap();
    assert_eq!(created.id, switch_id());
}

#[tokio::test]
async fn switch_history_paging_query() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/systems/@me/switches"))
        .and(query_param("before", "2024-03-01T12:00:00.000Z"))
        .and(query_param("limit", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": SWITCH_ID, "timestamp": "2024-02-29T08:00:00Z", "members": ["mem01"] }
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let before = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
    let switches = client.get_system_switches(&SystemRef::Me, Some(before), Some(2)).await.unwrap();
    assert_eq!(switches.len(), 1);
    assert_eq!(switches[0].primary_fronter(), Some("mem01"));
}

#[tokio::test]
async fn switch_edits_target_the_switch_id() {
    let server = MockServer::start().await;
    let switch_path = format!("/systems/@me/switches/{SWITCH_ID}");
    Mock::given(method("PATCH"))
        .and(path(switch_path.as_str()))
        .and(body_json(json!({ "timestamp": "2024-03-01T12:00:00Z" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(fronters(&[("mem01", "First")])))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PATCH"))
        .and(path(format!("{switch_path}/members").as_str()))
        .and(body_json(json!(["mem01"])))
        .respond_with(ResponseTemplate::new(200).set_body_json(fronters(&[("mem01", "First")])))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path(switch_path.as_str()))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let moved = SwitchPatch { timestamp: Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap() };
    client.update_switch(switch_id(), &moved).await.unwrap();
    client.update_switch_members(switch_id(), &["mem01"]).await.unwrap();
    client.delete_switch(switch_id()).await.unwrap();
}

// ============================================================================
// Messages
// ============================================================================

#[tokio::test]
async fn message_lookup_decodes_string_snowflakes() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/messages/1100000000000000001"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "timestamp": "2024-03-01T12:00:00Z",
            "id": "1100000000000000002",
            "original": "1100000000000000001",
            "sender": "466378653216014359",
            "channel": "1000000000000000000",
            "guild": "900000000000000000",
            "system": { "id": "abcde" },
            "member": { "id": "mem01", "name": "First" }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = anonymous_client_for(&server);
    let message = client.get_message(1100000000000000001).await.unwrap();

    assert_eq!(message.id, 1100000000000000002);
    assert_eq!(message.original, Some(1100000000000000001));
    assert_eq!(message.sender, 466378653216014359);
    assert_eq!(message.member.map(|m| m.name), Some("First".to_string()));
}
