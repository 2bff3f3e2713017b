//! Backup orchestration.
//!
//! A backup run moves through the [`BackupStage`]s in order: the status message is
//! posted, guild metadata and members are collected, every selected channel's history
//! is collected, and the snapshot is packaged and uploaded. A channel the bot cannot
//! read is recorded as failed and the run continues with the next channel; every other
//! error ends the run.

use chrono::Local;
use serenity::all::Guild;
use std::time::Instant;

use crate::server::{
    error::AppError,
    model::{
        backup::{BackupOptions, BackupReport, BackupStage, BackupTarget},
        snapshot::{EntityRef, GuildSnapshot},
    },
    util::{naming::archive_filename, pacer::Pacer},
};

use super::{
    fetch::AttachmentFetcher,
    guild::GuildSnapshotBuilder,
    history::ChannelHistoryCollector,
    member::MemberEnumerator,
    package::ArtifactPackager,
    progress::{
        format_elapsed, ProgressReporter, StatusSurface, GUILD_MESSAGE, MEMBERS_MESSAGE,
    },
    source::PlatformSource,
    upload::ArtifactUploader,
};

/// Runs backups against the collaborators of one process.
pub struct BackupOrchestrator<'a> {
    source: &'a dyn PlatformSource,
    uploader: &'a dyn ArtifactUploader,
    pacer: &'a dyn Pacer,
    fetcher: Option<&'a AttachmentFetcher>,
    options: BackupOptions,
}

impl<'a> BackupOrchestrator<'a> {
    pub fn new(
        source: &'a dyn PlatformSource,
        uploader: &'a dyn ArtifactUploader,
        pacer: &'a dyn Pacer,
        options: BackupOptions,
    ) -> Self {
        Self {
            source,
            uploader,
            pacer,
            fetcher: None,
            options,
        }
    }

    /// Uses `fetcher` to download attachment bytes when the fetch toggle is enabled.
    pub fn with_fetcher(mut self, fetcher: &'a AttachmentFetcher) -> Self {
        if self.options.fetch_attachments {
            self.fetcher = Some(fetcher);
        }
        self
    }

    /// Backs up the selected channels of a guild.
    ///
    /// # Arguments
    /// - `guild` - Guild as held in the gateway cache
    /// - `me` - The bot's own member reference
    /// - `target` - Channels selected by the command argument
    /// - `surface` - Where the live status is displayed
    ///
    /// # Returns
    /// - `Ok(BackupReport)` - Every selected channel was attempted and the upload resolved
    /// - `Err(AppError)` - A stage other than a forbidden channel failed
    pub async fn run(
        &self,
        guild: &Guild,
        me: Option<EntityRef>,
        target: BackupTarget,
        surface: &mut dyn StatusSurface,
    ) -> Result<BackupReport, AppError> {
        let started = Instant::now();
        let mut stages = Vec::new();
        let builder = GuildSnapshotBuilder::new(guild, me)?;
        let channels: Vec<_> = builder
            .text_channels()
            .iter()
            .filter(|channel| target.includes(channel.id))
            .collect();

        let total = target.announced_total(builder.text_channels().len());
        let mut reporter = ProgressReporter::new(surface, total);

        enter(&mut stages, BackupStage::AnnouncingStart);
        reporter.announce_start().await?;
        self.pacer.pause(self.options.start_delay).await;

        enter(&mut stages, BackupStage::FetchingGuildMetadata);
        reporter.update(GUILD_MESSAGE).await?;
        let mut snapshot = GuildSnapshot {
            guild: builder.build(),
            ..GuildSnapshot::default()
        };

        enter(&mut stages, BackupStage::FetchingMembers);
        reporter.update(MEMBERS_MESSAGE).await?;
        snapshot.members = MemberEnumerator::new(self.source, builder.context())
            .enumerate(guild.id)
            .await?;
        tracing::info!("Collected {} members of {}", snapshot.members.len(), guild.name);

        let collector = ChannelHistoryCollector::new(self.source, builder.context(), self.fetcher);
        let mut succeeded = Vec::new();
        let mut failed = Vec::new();

        for channel in channels {
            enter(&mut stages, BackupStage::FetchingHistory);
            let channel_started = Instant::now();

            match collector.collect(channel).await {
                Ok(history) => {
                    enter(&mut stages, BackupStage::Recording);
                    let elapsed = channel_started.elapsed();
                    tracing::info!(
                        "Backed up {} messages of #{} ({}) in {}",
                        history.len(),
                        channel.name,
                        channel.id,
                        format_elapsed(elapsed)
                    );

                    reporter.channel_finished(channel, history.len(), elapsed).await?;
                    succeeded.push(channel.mention());
                    snapshot.channels.insert(channel.id.get(), history);
                }
                Err(e) if e.is_forbidden() => {
                    tracing::warn!("Skipping #{} ({}): {}", channel.name, channel.id, e);

                    reporter.channel_forbidden(channel).await?;
                    failed.push(channel.mention());
                    self.pacer.pause(self.options.skip_delay).await;
                }
                Err(e) => return Err(e),
            }
        }

        enter(&mut stages, BackupStage::Packaging);
        let archive_name = archive_filename(&guild.name, &Local::now());
        let artifact = ArtifactPackager::package(&snapshot, &archive_name)?;
        tracing::info!("Packaged {} ({} bytes)", artifact.name, artifact.bytes.len());

        enter(&mut stages, BackupStage::Uploading);
        let link = self.uploader.upload(&artifact).await?;
        match &link {
            Some(link) => tracing::info!("Uploaded {} to {}", artifact.name, link),
            None => tracing::warn!("Upload of {} produced no link", artifact.name),
        }

        enter(&mut stages, BackupStage::Done);
        let report = BackupReport {
            completed: reporter.status().completed_channels,
            total,
            messages: reporter.status().messages,
            succeeded,
            failed,
            archive_name,
            link,
            elapsed: started.elapsed(),
            stages,
        };
        reporter.finish(&report).await?;

        Ok(report)
    }
}

fn enter(stages: &mut Vec<BackupStage>, stage: BackupStage) {
    tracing::debug!("Backup stage: {:?}", stage);
    stages.push(stage);
}
