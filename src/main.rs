mod server;

use crate::server::{bot, config::Config, error::AppError, startup, state::BackupState};

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    startup::init_tracing();

    let config = Config::from_env()?;
    let http_client = startup::setup_reqwest_client()?;
    let state = BackupState::new(&config, http_client)?;

    tracing::info!("Uploading archives via {}", state.uploader.strategy_name());

    bot::start::start_bot(&config, state).await
}
