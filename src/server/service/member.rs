use futures::TryStreamExt;
use serenity::all::GuildId;
use std::collections::BTreeMap;

use crate::server::{error::AppError, model::snapshot::MemberRecord};

use super::{
    normalize::{normalize_object, to_raw, NormalizeContext, ObjectKind},
    source::PlatformSource,
};

/// Number of members between pagination progress logs.
const LOG_INTERVAL: usize = 1000;

/// Retrieves and normalizes the member list of a guild.
pub struct MemberEnumerator<'a> {
    source: &'a dyn PlatformSource,
    context: &'a NormalizeContext,
}

impl<'a> MemberEnumerator<'a> {
    pub fn new(source: &'a dyn PlatformSource, context: &'a NormalizeContext) -> Self {
        Self { source, context }
    }

    /// Retrieves every member of the guild.
    ///
    /// # Arguments
    /// - `guild_id` - Guild to enumerate
    ///
    /// # Returns
    /// - `Ok(BTreeMap)` - Normalized members keyed by user ID
    /// - `Err(AppError)` - A member page could not be fetched
    pub async fn enumerate(
        &self,
        guild_id: GuildId,
    ) -> Result<BTreeMap<u64, MemberRecord>, AppError> {
        let mut stream = self.source.members(guild_id);
        let mut records = Vec::new();

        while let Some(member) = stream.try_next().await? {
            let raw = to_raw(&member)?;
            records.push(normalize_object(ObjectKind::Member, &raw, self.context));

            if records.len() % LOG_INTERVAL == 0 {
                tracing::debug!("Fetched {} members of guild {}", records.len(), guild_id);
            }
        }

        tracing::debug!("Fetched {} members of guild {}", records.len(), guild_id);

        Ok(collapse_by_id(records))
    }
}

/// Keys member records by their `id` field. Later records overwrite earlier ones with
/// the same ID; records without an ID are dropped.
pub fn collapse_by_id(records: Vec<MemberRecord>) -> BTreeMap<u64, MemberRecord> {
    records
        .into_iter()
        .filter_map(|record| {
            let id = record.get("id").and_then(serde_json::Value::as_u64)?;
            Some((id, record))
        })
        .collect()
}
