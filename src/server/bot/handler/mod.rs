use serenity::all::{Context, EventHandler, Message, Ready};
use serenity::async_trait;

use crate::server::state::BackupState;

pub mod message;
pub mod ready;

/// Discord bot event handler
pub struct Handler {
    pub state: BackupState,
}

impl Handler {
    pub fn new(state: BackupState) -> Self {
        Self { state }
    }
}

#[async_trait]
impl EventHandler for Handler {
    /// Called when the bot is ready and connected to Discord
    async fn ready(&self, ctx: Context, ready: Ready) {
        ready::handle_ready(ctx, ready).await;
    }

    /// Called when a message is sent in a channel
    async fn message(&self, ctx: Context, message: Message) {
        message::handle_message(&self.state, ctx, message).await;
    }
}
