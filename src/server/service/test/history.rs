use serde_json::json;
use test_utils::serenity::{
    channel_json, create_test_message, create_test_message_with, snowflake, TestGuildBuilder,
};

use super::*;
use crate::server::{
    model::backup::BackupChannel,
    service::{guild::GuildSnapshotBuilder, history::ChannelHistoryCollector},
};

const GUILD_ID: u64 = 1;
const CHANNEL_ID: u64 = 10;

fn builder() -> GuildSnapshotBuilder {
    let guild = TestGuildBuilder::new(GUILD_ID, "Test Guild")
        .channel(channel_json(CHANNEL_ID, GUILD_ID, "general", 0, 0))
        .build();
    GuildSnapshotBuilder::new(&guild, None).unwrap()
}

fn channel() -> BackupChannel {
    BackupChannel::new(ChannelId::new(CHANNEL_ID), "general")
}

/// Tests N messages with distinct timestamps yield N entries.
///
/// Expected: Ok with 5 entries
#[tokio::test]
async fn collects_every_message() {
    let messages = (1..=5)
        .map(|n| create_test_message(snowflake(n * 1000), CHANNEL_ID, "hello"))
        .collect();
    let source = FakeSource::default().with_messages(CHANNEL_ID, messages);
    let builder = builder();

    let history = ChannelHistoryCollector::new(&source, builder.context(), None)
        .collect(&channel())
        .await
        .unwrap();

    assert_eq!(history.len(), 5);
}

/// Tests history keys ascend although pages arrive newest first.
///
/// Expected: keys strictly ascending, matching message order by creation time
#[tokio::test]
async fn keys_ascend_chronologically() {
    // 9.5 s sorts before 10 s only if the seconds are zero-padded
    let messages = vec![
        create_test_message(snowflake(100_000), CHANNEL_ID, "third"),
        create_test_message(snowflake(10_000), CHANNEL_ID, "second"),
        create_test_message(snowflake(9_500), CHANNEL_ID, "first"),
    ];
    let source = FakeSource::default().with_messages(CHANNEL_ID, messages);
    let builder = builder();

    let history = ChannelHistoryCollector::new(&source, builder.context(), None)
        .collect(&channel())
        .await
        .unwrap();

    let keys: Vec<_> = history.keys().cloned().collect();
    assert!(keys.windows(2).all(|pair| pair[0] < pair[1]));

    let contents: Vec<_> = history.values().map(|m| m["content"].clone()).collect();
    assert_eq!(contents, vec![json!("first"), json!("second"), json!("third")]);
    assert_eq!(keys[0], "2015-01-01 00:00:09.500000+00:00");
}

/// Tests messages sharing a creation timestamp overwrite one another.
///
/// Expected: one entry holding the message seen last
#[tokio::test]
async fn same_timestamp_keeps_last_message() {
    // Both IDs carry the same timestamp, they differ in the low sequence bits
    let messages = vec![
        create_test_message(snowflake(1000) | 1, CHANNEL_ID, "newer"),
        create_test_message(snowflake(1000), CHANNEL_ID, "older"),
    ];
    let source = FakeSource::default().with_messages(CHANNEL_ID, messages);
    let builder = builder();

    let history = ChannelHistoryCollector::new(&source, builder.context(), None)
        .collect(&channel())
        .await
        .unwrap();

    assert_eq!(history.len(), 1);
    assert_eq!(history.values().next().unwrap()["content"], json!("older"));
}

/// Tests records reference their channel and guild.
///
/// Expected: `channel` and `guild` as `{id, name}`, author collapsed
#[tokio::test]
async fn records_reference_channel_and_guild() {
    let source = FakeSource::default().with_messages(
        CHANNEL_ID,
        vec![create_test_message_with(
            snowflake(1000),
            CHANNEL_ID,
            "hi",
            json!({ "mention_roles": [GUILD_ID.to_string()] }),
        )],
    );
    let builder = builder();

    let history = ChannelHistoryCollector::new(&source, builder.context(), None)
        .collect(&channel())
        .await
        .unwrap();
    let record = history.values().next().unwrap();

    assert_eq!(record["channel"], json!({ "id": CHANNEL_ID, "name": "general" }));
    assert_eq!(record["guild"], json!({ "id": GUILD_ID, "name": "Test Guild" }));
    assert_eq!(record["author"], json!({ "id": 100, "name": "author" }));
    assert_eq!(
        record["role_mentions"],
        json!([{ "id": GUILD_ID, "name": "@everyone" }])
    );
    assert_eq!(record["reference"], serde_json::Value::Null);
    assert!(!record.contains_key("nonce"));
}

/// Tests a channel without read permission yields the forbidden signal and no history.
///
/// Expected: Serenity's missing-permission error, recognised by `is_forbidden`
#[tokio::test]
async fn forbidden_channel_is_signalled() {
    let source = FakeSource::default().with_forbidden(CHANNEL_ID);
    let builder = builder();

    let result = ChannelHistoryCollector::new(&source, builder.context(), None)
        .collect(&channel())
        .await;

    let err = result.unwrap_err();
    assert!(matches!(
        &err,
        AppError::DiscordErr(e)
            if matches!(e.as_ref(), serenity::Error::Model(ModelError::InvalidPermissions { .. }))
    ));
    assert!(err.is_forbidden());
}

/// Tests an empty channel yields an empty history.
///
/// Expected: Ok with 0 entries
#[tokio::test]
async fn empty_channel_yields_empty_history() {
    let source = FakeSource::default().with_messages(CHANNEL_ID, Vec::new());
    let builder = builder();

    let history = ChannelHistoryCollector::new(&source, builder.context(), None)
        .collect(&channel())
        .await
        .unwrap();

    assert!(history.is_empty());
}
