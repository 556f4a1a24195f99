use std::error::Error;
use std::sync::Arc;
use teloxide::prelude::*;

use jeopardy_trivia_bot::{board_callback_handler, command_handler, BotState, Command, Config, JServiceClient};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // before the logger so RUST_LOG can live in .env
    let dotenv = dotenvy::dotenv();
    pretty_env_logger::init();
    log::info!("Starting jeopardy bot...");

    match dotenv {
        Ok(path) => log::info!("Loaded environment from {}", path.display()),
        Err(e) if e.not_found() => log::info!("No .env file, using process environment"),
        Err(e) => return Err(e.into()),
    }

    let config = Config::from_env()?;
    log::info!(
        "Boards are {} categories x {} clues from {}",
        config.category_count,
        config.clues_per_category,
        config.api_base_url
    );

    let source = JServiceClient::new(config.api_base_url.clone(), config.request_timeout)?;
    let state = Arc::new(BotState::new(config, Arc::new(source)));

    // Initialize bot with token from environment
    let bot = Bot::from_env();

    let handler = dptree::entry()
        .branch(Update::filter_message().filter_command::<Command>().endpoint(
            |bot: Bot, msg: Message, cmd: Command, state: Arc<BotState>| async move {
                command_handler(bot, msg, cmd, state).await
            },
        ))
        .branch(board_callback_handler(state.clone()));

    log::info!("Starting command dispatching...");

    Dispatcher::builder(bot, handler)
        .dependencies(dptree::deps![state])
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;

    Ok(())
}
