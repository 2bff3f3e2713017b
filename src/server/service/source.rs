use futures::{stream::BoxStream, StreamExt};
use serenity::{
    all::{ChannelId, GuildId, Member, Message},
    http::Http,
};
use std::sync::Arc;

use crate::server::error::AppError;

pub type MemberStream<'a> = BoxStream<'a, Result<Member, AppError>>;
pub type MessageStream<'a> = BoxStream<'a, Result<Message, AppError>>;

/// Paginated access to the parts of a guild that are not held in the gateway cache.
///
/// Both streams fetch one page at a time and suspend at every page boundary.
pub trait PlatformSource: Send + Sync {
    /// Every member of the guild.
    fn members(&self, guild_id: GuildId) -> MemberStream<'_>;

    /// The complete message history of a channel, newest first.
    fn messages(&self, channel_id: ChannelId) -> MessageStream<'_>;
}

/// Source backed by the Discord HTTP API.
pub struct SerenitySource {
    http: Arc<Http>,
}

impl SerenitySource {
    pub fn new(http: Arc<Http>) -> Self {
        Self { http }
    }
}

impl PlatformSource for SerenitySource {
    fn members(&self, guild_id: GuildId) -> MemberStream<'_> {
        guild_id
            .members_iter(Arc::clone(&self.http))
            .map(|member| member.map_err(AppError::from))
            .boxed()
    }

    fn messages(&self, channel_id: ChannelId) -> MessageStream<'_> {
        channel_id
            .messages_iter(Arc::clone(&self.http))
            .map(|message| message.map_err(AppError::from))
            .boxed()
    }
}
