//! In-memory fakes for the collaborators of a backup run.

use futures::{stream, StreamExt};
use serenity::{
    all::{ChannelId, GuildId, Member, Message, ModelError, Permissions},
    async_trait,
};
use std::{collections::HashMap, sync::Mutex, time::Duration};

use crate::server::{
    error::AppError,
    model::progress::ProgressStatus,
    util::pacer::Pacer,
};

use super::{
    package::Artifact,
    progress::StatusSurface,
    source::{MemberStream, MessageStream, PlatformSource},
    upload::ArtifactUploader,
};

mod history;

/// History of a fake channel.
enum FakeHistory {
    Messages(Vec<Message>),
    Forbidden,
}

#[derive(Default)]
struct FakeSource {
    members: Vec<Member>,
    channels: HashMap<ChannelId, FakeHistory>,
}

impl FakeSource {
    fn with_members(mut self, members: Vec<Member>) -> Self {
        self.members = members;
        self
    }

    fn with_messages(mut self, channel_id: u64, messages: Vec<Message>) -> Self {
        self.channels
            .insert(ChannelId::new(channel_id), FakeHistory::Messages(messages));
        self
    }

    fn with_forbidden(mut self, channel_id: u64) -> Self {
        self.channels
            .insert(ChannelId::new(channel_id), FakeHistory::Forbidden);
        self
    }
}

impl PlatformSource for FakeSource {
    fn members(&self, _guild_id: GuildId) -> MemberStream<'_> {
        stream::iter(self.members.iter().cloned().map(Ok)).boxed()
    }

    fn messages(&self, channel_id: ChannelId) -> MessageStream<'_> {
        match self.channels.get(&channel_id) {
            Some(FakeHistory::Messages(messages)) => {
                stream::iter(messages.iter().cloned().map(Ok)).boxed()
            }
            Some(FakeHistory::Forbidden) => stream::iter(vec![Err(missing_permissions())]).boxed(),
            None => stream::empty().boxed(),
        }
    }
}

/// The error Serenity raises when the bot may not read a channel's history.
fn missing_permissions() -> AppError {
    AppError::from(serenity::Error::Model(ModelError::InvalidPermissions {
        required: Permissions::READ_MESSAGE_HISTORY,
        present: Permissions::VIEW_CHANNEL,
    }))
}

/// Keeps every published status.
#[derive(Default)]
struct RecordingSurface {
    published: Vec<ProgressStatus>,
}

impl RecordingSurface {
    fn latest_updates(&self) -> Vec<&str> {
        self.published.iter().map(|s| s.latest.as_str()).collect()
    }

    fn last(&self) -> &ProgressStatus {
        self.published.last().expect("nothing was published")
    }
}

#[async_trait]
impl StatusSurface for RecordingSurface {
    async fn publish(&mut self, status: &ProgressStatus) -> Result<(), AppError> {
        self.published.push(status.clone());
        Ok(())
    }
}

/// Returns immediately and records the requested pauses.
#[derive(Default)]
struct NoPacer {
    pauses: Mutex<Vec<Duration>>,
}

impl NoPacer {
    fn pauses(&self) -> Vec<Duration> {
        self.pauses.lock().unwrap().clone()
    }
}

#[async_trait]
impl Pacer for NoPacer {
    async fn pause(&self, duration: Duration) {
        self.pauses.lock().unwrap().push(duration);
    }
}

/// Accepts every upload and returns a fixed link.
struct FakeUploader {
    link: Option<String>,
    uploaded: Mutex<Vec<Artifact>>,
}

impl FakeUploader {
    fn returning(link: Option<&str>) -> Self {
        Self {
            link: link.map(str::to_string),
            uploaded: Mutex::new(Vec::new()),
        }
    }

    fn uploaded(&self) -> Vec<Artifact> {
        self.uploaded.lock().unwrap().clone()
    }
}

#[async_trait]
impl ArtifactUploader for FakeUploader {
    async fn upload(&self, artifact: &Artifact) -> Result<Option<String>, AppError> {
        self.uploaded.lock().unwrap().push(artifact.clone());
        Ok(self.link.clone())
    }
}
