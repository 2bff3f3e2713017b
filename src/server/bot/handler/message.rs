//! Handler of the `backup` command.
//!
//! The command is only accepted in guild channels, from non-bot administrators. The
//! argument is validated before any backup work starts; a rejection is answered in the
//! channel and nothing else happens.

use serenity::all::{Context, GuildId, Message, RoleId};

use crate::server::{
    error::AppError,
    model::{backup::BackupStage, snapshot::EntityRef},
    service::{
        backup::BackupOrchestrator, guild::is_administrator, progress::DiscordStatusSurface,
        source::SerenitySource,
    },
    state::BackupState,
    util::parse::{command_argument, parse_backup_argument},
};

const NOT_ADMINISTRATOR: &str = "❌ You need the Administrator permission to run a backup.";

/// Handle message creation in a channel
pub async fn handle_message(state: &BackupState, ctx: Context, message: Message) {
    if message.author.bot {
        return;
    }

    // Only guild channels can be backed up (not DMs)
    let Some(guild_id) = message.guild_id else {
        return;
    };

    let Some(arg) = command_argument(&state.command_prefix, &message.content) else {
        return;
    };
    tracing::debug!("Backup stage: {:?}", BackupStage::Idle);

    tracing::info!(
        guild_id = guild_id.get(),
        user_id = message.author.id.get(),
        "Backup requested from {} in guild {}",
        message.author.name,
        guild_id
    );

    let Err(e) = run_backup(state, &ctx, &message, guild_id, arg).await else {
        return;
    };

    match rejection(&e) {
        Some(reply) => {
            if let Err(e) = message.channel_id.say(&ctx.http, reply).await {
                tracing::error!("Failed to answer backup command in {}: {}", message.channel_id, e);
            }
        }
        None => tracing::error!("Backup of guild {} failed: {}", guild_id, e),
    }
}

/// Reply for errors that reject the command rather than fail the backup.
fn rejection(err: &AppError) -> Option<String> {
    match err {
        AppError::ArgumentErr(e) => Some(e.to_string()),
        _ => None,
    }
}

async fn run_backup(
    state: &BackupState,
    ctx: &Context,
    message: &Message,
    guild_id: GuildId,
    arg: Option<&str>,
) -> Result<(), AppError> {
    let guild = ctx
        .cache
        .guild(guild_id)
        .map(|guild| guild.clone())
        .ok_or_else(|| AppError::NotFound(format!("Guild {} is not cached", guild_id)))?;

    let role_ids = author_roles(ctx, message, guild_id).await?;
    if !is_administrator(&guild, message.author.id, &role_ids) {
        message.channel_id.say(&ctx.http, NOT_ADMINISTRATOR).await?;
        return Ok(());
    }

    tracing::debug!("Backup stage: {:?}", BackupStage::ValidatingArgument);
    let target = parse_backup_argument(&state.command_prefix, arg)?;

    let me = {
        let user = ctx.cache.current_user();
        EntityRef::new(user.id.get(), user.name.clone())
    };

    let source = SerenitySource::new(ctx.http.clone());
    let mut surface = DiscordStatusSurface::new(ctx.http.clone(), message.channel_id);
    let orchestrator = BackupOrchestrator::new(
        &source,
        state.uploader.as_ref(),
        &state.pacer,
        state.options,
    )
    .with_fetcher(&state.fetcher);

    let report = orchestrator
        .run(&guild, Some(me), target, &mut surface)
        .await?;

    tracing::info!(
        guild_id = guild_id.get(),
        "Backup of {} finished: {}/{} channels, {} messages in {:.2}s",
        guild.name,
        report.completed,
        report.total,
        report.messages,
        report.elapsed.as_secs_f64()
    );

    Ok(())
}

/// Roles of the message author, from the message itself or fetched from Discord.
async fn author_roles(
    ctx: &Context,
    message: &Message,
    guild_id: GuildId,
) -> Result<Vec<RoleId>, AppError> {
    if let Some(member) = &message.member {
        return Ok(member.roles.clone());
    }

    let member = guild_id.member(&ctx.http, message.author.id).await?;
    Ok(member.roles)
}
