use std::error::Error;
use std::sync::Arc;
use teloxide::dispatching::DpHandlerDescription;
use teloxide::prelude::*;
use teloxide::types::CallbackQuery;

use crate::handlers::spawn_board_load;
use crate::keyboard::{board_text, create_board_keyboard, BoardAction};
use crate::state::{BotState, PressOutcome};
use crate::types::CellCoord;

pub fn board_callback_handler(
    state: Arc<BotState>,
) -> dptree::Handler<'static, DependencyMap, Result<(), Box<dyn Error + Send + Sync>>, DpHandlerDescription>
{
    Update::filter_callback_query().endpoint(move |bot: Bot, q: CallbackQuery| {
        let state = state.clone();
        async move { handle_callback_query(bot, q, state).await }
    })
}

pub async fn handle_callback_query(
    bot: Bot,
    query: CallbackQuery,
    state: Arc<BotState>,
) -> Result<(), Box<dyn Error + Send + Sync>> {
    let mut notice = None;
    let mut redraw = None;

    if let (Some(message), Some(data)) = (&query.message, &query.data) {
        let chat_id = message.chat.id;

        match BoardAction::decode(data) {
            Err(e) => {
                log::warn!("Ignoring callback data {:?} from chat {}: {}", data, chat_id.0, e);
            }
            Ok(BoardAction::Restart) => {
                spawn_board_load(bot.clone(), chat_id, state.clone());
            }
            Ok(BoardAction::Cell {
                generation,
                category,
                clue,
            }) => {
                let coord = CellCoord::new(category, clue);
                match state.press(chat_id.0, generation, coord).await {
                    PressOutcome::Advanced { state: reveal, coord, game } => {
                        log::debug!("Chat {} cell {:?} is now {:?}", chat_id.0, coord, reveal);
                        redraw = Some((chat_id, message.id, generation, coord, game));
                    }
                    PressOutcome::Unchanged => {}
                    PressOutcome::Stale => {
                        notice = Some("This board is no longer active. Use /play for a new one.");
                    }
                    PressOutcome::OffBoard => {
                        log::warn!("Chat {} pressed {:?}, which is off the board", chat_id.0, coord);
                    }
                }
            }
        }
    }

    // answered before redrawing so a failed edit can't leave the button spinning
    let answer = bot.answer_callback_query(query.id);
    match notice {
        Some(text) => answer.text(text).await?,
        None => answer.await?,
    };

    if let Some((chat_id, message_id, generation, coord, game)) = redraw {
        bot.edit_message_text(chat_id, message_id, board_text(&game, Some(coord)))
            .reply_markup(create_board_keyboard(&game, generation)?)
            .await?;

        if game.is_finished() {
            bot.send_message(chat_id, "🏁 Board cleared! Use /play for another round.")
                .await?;
        }
    }

    Ok(())
}
