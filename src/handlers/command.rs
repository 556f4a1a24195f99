use std::error::Error;
use std::sync::Arc;
use teloxide::prelude::*;
use teloxide::utils::command::BotCommands;

use crate::handlers::spawn_board_load;
use crate::keyboard::{board_text, create_board_keyboard};
use crate::{BotState, Command};

pub async fn command_handler(
    bot: Bot,
    msg: Message,
    cmd: Command,
    state: Arc<BotState>,
) -> Result<(), Box<dyn Error + Send + Sync>> {
    match cmd {
        Command::Start => {
            bot.send_message(
                msg.chat.id,
                format!(
                    "🎯 Welcome to Jeopardy!\n\n\
                     Use /play to deal a board of {} categories with {} clues each.\n\
                     Tap a ❓ to see the question, tap it again to see the answer.\n\
                     Use /board to bring the current board back, /help for all commands.",
                    state.config.category_count, state.config.clues_per_category
                ),
            )
            .await?;
        }
        Command::Play => {
            spawn_board_load(bot, msg.chat.id, state);
        }
        Command::Board => match state.current_board(msg.chat.id.0).await {
            Some((generation, game, last_revealed)) => {
                bot.send_message(msg.chat.id, board_text(&game, last_revealed))
                    .reply_markup(create_board_keyboard(&game, generation)?)
                    .await?;
            }
            None => {
                bot.send_message(msg.chat.id, "No board yet. Use /play to deal one!")
                    .await?;
            }
        },
        Command::Help => {
            bot.send_message(msg.chat.id, Command::descriptions().to_string())
                .await?;
        }
    }
    Ok(())
}
