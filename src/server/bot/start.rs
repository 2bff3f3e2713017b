use serenity::all::{Client, GatewayIntents};

use crate::server::{
    bot::handler::Handler, config::Config, error::AppError, state::BackupState,
};

/// Connects the bot to Discord and processes events until shutdown.
///
/// # Arguments
/// - `config` - Application configuration holding the bot token
/// - `state` - State shared by every backup run
///
/// # Returns
/// - `Ok(())` - The client shut down
/// - `Err(AppError::DiscordErr)` - The client could not be built or lost its connection
pub async fn start_bot(config: &Config, state: BackupState) -> Result<(), AppError> {
    // GUILD_MEMBERS and MESSAGE_CONTENT are privileged intents
    let intents = GatewayIntents::non_privileged()
        | GatewayIntents::GUILD_MEMBERS
        | GatewayIntents::MESSAGE_CONTENT;

    let mut client = Client::builder(&config.bot_token, intents)
        .event_handler(Handler::new(state))
        .await?;

    tracing::info!("Starting Discord bot...");

    client.start().await?;

    Ok(())
}
