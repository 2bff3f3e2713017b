//! Message history stage.
//!
//! A channel's history is streamed page by page and every message is normalized with
//! the working [`FieldSet`] computed from the first message of the channel. The final
//! history is keyed by the stringified creation timestamp of each message; messages
//! sharing a timestamp overwrite one another.

use futures::TryStreamExt;
use serde_json::Value;

use crate::server::{
    error::AppError,
    model::{
        backup::{BackupChannel, BackupStage},
        snapshot::{ChannelHistory, EntityRef, MessageRecord},
    },
};

use super::{
    fetch::AttachmentFetcher,
    normalize::{to_raw, FieldSet, NormalizeContext, ObjectKind},
    source::PlatformSource,
};

/// Number of messages between pagination progress logs.
const LOG_INTERVAL: usize = 1000;

pub struct ChannelHistoryCollector<'a> {
    source: &'a dyn PlatformSource,
    context: &'a NormalizeContext,
    /// Set when the binary fetch toggle is enabled.
    fetcher: Option<&'a AttachmentFetcher>,
}

impl<'a> ChannelHistoryCollector<'a> {
    pub fn new(
        source: &'a dyn PlatformSource,
        context: &'a NormalizeContext,
        fetcher: Option<&'a AttachmentFetcher>,
    ) -> Self {
        Self {
            source,
            context,
            fetcher,
        }
    }

    /// Retrieves and normalizes the complete history of a channel.
    ///
    /// An access-denied response aborts the channel; nothing collected so far is
    /// returned. Callers tell it apart from other failures with
    /// [`AppError::is_forbidden`].
    ///
    /// # Arguments
    /// - `channel` - Channel to collect
    ///
    /// # Returns
    /// - `Ok(ChannelHistory)` - Messages keyed by creation timestamp, ascending
    /// - `Err(AppError)` - A page could not be fetched or a message not serialized
    pub async fn collect(&self, channel: &BackupChannel) -> Result<ChannelHistory, AppError> {
        let context = self
            .context
            .for_channel(EntityRef::new(channel.id.get(), channel.name.as_str()));
        let mut stream = self.source.messages(channel.id);
        let mut field_set: Option<FieldSet> = None;
        let mut records = Vec::new();

        while let Some(message) = stream.try_next().await? {
            let raw = to_raw(&message)?;
            let fields = field_set.get_or_insert_with(|| {
                tracing::debug!("Backup stage: {:?}", BackupStage::Normalizing);
                FieldSet::from_object(ObjectKind::Message, &raw)
            });
            let mut record = fields.apply(&raw, &context);

            if let Some(fetcher) = self.fetcher {
                fetcher.fill(&mut record).await;
            }
            records.push(record);

            if records.len() % LOG_INTERVAL == 0 {
                tracing::debug!("Fetched {} messages of channel {}", records.len(), channel.id);
            }
        }

        Ok(into_history(records))
    }
}

/// Keys message records by their `created_at` field.
///
/// Records without a creation timestamp are dropped.
pub fn into_history(records: Vec<MessageRecord>) -> ChannelHistory {
    records
        .into_iter()
        .filter_map(|record| {
            let key = record.get("created_at").and_then(Value::as_str)?.to_string();
            Some((key, record))
        })
        .collect()
}
