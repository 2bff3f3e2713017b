use test_utils::serenity::create_test_role;

use super::*;
use crate::server::service::normalize::to_raw;

fn normalized_guild() -> Record {
    normalize_object(ObjectKind::Guild, &raw_guild(), &context())
}

/// Tests guild references resolve through the context.
///
/// Expected: owner, default role, booster role and bot member as `{id, name}`
#[test]
fn resolves_guild_references() {
    let guild = normalized_guild();

    assert_eq!(guild["id"], json!(1));
    assert_eq!(guild["owner_id"], json!(100));
    assert_eq!(guild["owner"], json!({ "id": 100, "name": "owner" }));
    assert_eq!(guild["default_role"], json!({ "id": 1, "name": "@everyone" }));
    assert_eq!(
        guild["premium_subscriber_role"],
        json!({ "id": 30, "name": "Booster" })
    );
    assert_eq!(guild["me"], json!({ "id": 999, "name": "backup-bot" }));
}

/// Tests channel lists split by type and sort by position then ID.
///
/// Expected: text list holds text and news channels only
#[test]
fn splits_channels_by_type() {
    let guild = normalized_guild();

    assert_eq!(
        guild["text_channels"],
        json!([
            { "id": 12, "name": "announcements" },
            { "id": 10, "name": "general" }
        ])
    );
    assert_eq!(guild["voice_channels"], json!([{ "id": 11, "name": "voice" }]));
    assert_eq!(
        guild["categories"],
        json!([{ "id": 13, "name": "Text Channels" }])
    );
    assert_eq!(guild["stage_channels"], json!([]));
    assert_eq!(guild["channels"].as_array().map(Vec::len), Some(4));
}

/// Tests members collapse to references and boosters are listed.
///
/// Expected: both members referenced, only the booster in `premium_subscribers`
#[test]
fn lists_members_and_boosters() {
    let guild = normalized_guild();

    assert_eq!(
        guild["members"],
        json!([
            { "id": 100, "name": "owner" },
            { "id": 200, "name": "booster" }
        ])
    );
    assert_eq!(
        guild["premium_subscribers"],
        json!([{ "id": 200, "name": "booster" }])
    );
}

/// Tests roles are normalized with their own field table, ordered by position.
///
/// Expected: colour as RGB, permissions as integer, booster tag recognised
#[test]
fn normalizes_nested_roles() {
    let guild = normalized_guild();
    let roles = guild["roles"].as_array().cloned().unwrap_or_default();

    let names: Vec<_> = roles.iter().map(|r| r["name"].clone()).collect();
    assert_eq!(names, vec![json!("@everyone"), json!("Booster"), json!("Admin")]);

    let admin = &roles[2];
    assert_eq!(admin["color"], json!([255, 128, 0]));
    assert_eq!(admin["permissions"], json!(8));
    assert_eq!(admin["tags"], Value::Null);

    let booster = &roles[1];
    assert_eq!(booster["tags"]["premium_subscriber"], json!(true));
}

/// Tests a Serenity role normalizes from its serialized wire form.
///
/// Expected: the role table applies; the `colors` object has no output field
#[test]
fn normalizes_serenity_role() {
    let role = create_test_role(20, "Admin", 0xFF8000, 5);
    let raw = to_raw(&role).unwrap();

    let record = normalize_object(ObjectKind::Role, &raw, &context());

    assert_eq!(record["id"], json!(20));
    assert_eq!(record["name"], json!("Admin"));
    assert_eq!(record["color"], json!([255, 128, 0]));
    assert_eq!(record["position"], json!(5));
    assert_eq!(record["permissions"], json!(0));
    assert!(!record.contains_key("colors"));
    assert!(!record.contains_key("guild_id"));
}

/// Tests the icon hash becomes a CDN URL, null without icon.
///
/// Expected: animated hashes use the gif extension
#[test]
fn resolves_icon_url() {
    let ctx = context();
    let object = raw(json!({ "id": "1" }));

    let url = normalize_field(ObjectKind::Guild, "icon", &json!("a_abc"), &object, &ctx);
    assert_eq!(
        url,
        vec![("icon", json!("https://cdn.discordapp.com/icons/1/a_abc.gif"))]
    );

    let none = normalize_field(ObjectKind::Guild, "icon", &Value::Null, &object, &ctx);
    assert_eq!(none, vec![("icon", Value::Null)]);
}

/// Tests numbered levels become names or `{name, value}`.
///
/// Expected: verification level collapsed to its name, MFA level with value
#[test]
fn normalizes_levels() {
    let ctx = context();
    let object = Record::new();

    let verification =
        normalize_field(ObjectKind::Guild, "verification_level", &json!(1), &object, &ctx);
    assert_eq!(verification, vec![("verification_level", json!("Low"))]);

    let mfa = normalize_field(ObjectKind::Guild, "mfa_level", &json!(1), &object, &ctx);
    assert_eq!(mfa, vec![("mfa_level", json!({ "name": "Elevated", "value": 1 }))]);
}

/// Tests system channel flags expand to named booleans.
///
/// Expected: SUPPRESS_JOIN_NOTIFICATIONS (1 << 0) set
#[test]
fn expands_system_channel_flags() {
    let ctx = context();
    let flags = normalize_field(
        ObjectKind::Guild,
        "system_channel_flags",
        &json!(1),
        &Record::new(),
        &ctx,
    );

    let (_, value) = &flags[0];
    assert_eq!(value["suppress_join_notifications"], json!(true));
    assert_eq!(value["suppress_premium_subscriptions"], json!(false));
}
