use std::error::Error;
use std::sync::Arc;
use teloxide::prelude::*;

use crate::keyboard::{board_text, create_board_keyboard};
use crate::state::BotState;

/// Starts loading a new board for `chat_id` in the background so button
/// presses keep flowing while the trivia source answers.
pub fn spawn_board_load(bot: Bot, chat_id: ChatId, state: Arc<BotState>) {
    tokio::spawn(async move {
        if let Err(e) = load_board(bot, chat_id, state).await {
            log::error!("Board load for chat {} failed: {}", chat_id.0, e);
        }
    });
}

pub async fn load_board(
    bot: Bot,
    chat_id: ChatId,
    state: Arc<BotState>,
) -> Result<(), Box<dyn Error + Send + Sync>> {
    let ticket = state.begin_load(chat_id.0).await;
    log::info!("Loading board generation {} for chat {}", ticket.generation, chat_id.0);

    let loading = bot
        .send_message(chat_id, "⏳ Loading a fresh board...")
        .await?;

    let game = match state.build_game().await {
        Ok(game) => game,
        Err(e) => {
            if !state.is_current(ticket).await {
                log::warn!(
                    "Stale board generation {} for chat {} failed: {}",
                    ticket.generation,
                    chat_id.0,
                    e
                );
                bot.edit_message_text(chat_id, loading.id, "This board was replaced by a newer one.")
                    .await?;
                return Ok(());
            }

            log::error!("Failed to build board for chat {}: {}", chat_id.0, e);
            bot.edit_message_text(
                chat_id,
                loading.id,
                format!("❌ Couldn't load a board: {}\nUse /play to try again.", e),
            )
            .await?;
            return Ok(());
        }
    };

    let text = board_text(&game, None);
    let keyboard = create_board_keyboard(&game, ticket.generation)?;

    if !state.install(ticket, game).await {
        log::warn!(
            "Discarding stale board generation {} for chat {}",
            ticket.generation,
            chat_id.0
        );
        bot.edit_message_text(chat_id, loading.id, "This board was replaced by a newer one.")
            .await?;
        return Ok(());
    }

    bot.edit_message_text(chat_id, loading.id, text)
        .reply_markup(keyboard)
        .await?;
    log::info!("Board generation {} ready for chat {}", ticket.generation, chat_id.0);

    Ok(())
}
