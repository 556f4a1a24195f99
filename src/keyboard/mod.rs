use serde::{Deserialize, Serialize};
use teloxide::types::{InlineKeyboardButton, InlineKeyboardMarkup};

use crate::types::{CellCoord, Clue, Game, RevealState};

const QUESTION_LABEL_CHARS: usize = 14;
const ANSWER_LABEL_CHARS: usize = 12;

/// What a board button asks for. Serialized as compact JSON into the
/// button's callback data, which Telegram caps at 64 bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "t", rename_all = "lowercase")]
pub enum BoardAction {
    Cell {
        #[serde(rename = "g")]
        generation: u64,
        #[serde(rename = "c")]
        category: usize,
        #[serde(rename = "q")]
        clue: usize,
    },
    Restart,
}

impl BoardAction {
    pub fn cell(generation: u64, coord: CellCoord) -> Self {
        BoardAction::Cell {
            generation,
            category: coord.category,
            clue: coord.clue,
        }
    }

    pub fn encode(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn decode(data: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(data)
    }
}

/// One row per clue index, one column per category, then a restart row.
pub fn create_board_keyboard(
    game: &Game,
    generation: u64,
) -> Result<InlineKeyboardMarkup, serde_json::Error> {
    let mut keyboard = Vec::with_capacity(game.clues_per_category() + 1);

    for clue_index in 0..game.clues_per_category() {
        let row = game
            .categories()
            .iter()
            .enumerate()
            .filter_map(|(category_index, category)| {
                let clue = category.clues().get(clue_index)?;
                Some((CellCoord::new(category_index, clue_index), clue))
            })
            .map(|(coord, clue)| {
                let data = BoardAction::cell(generation, coord).encode()?;
                Ok::<_, serde_json::Error>(InlineKeyboardButton::callback(cell_label(clue), data))
            })
            .collect::<Result<Vec<_>, _>>()?;
        keyboard.push(row);
    }

    keyboard.push(vec![InlineKeyboardButton::callback(
        "🔄 Restart".to_string(),
        BoardAction::Restart.encode()?,
    )]);

    Ok(InlineKeyboardMarkup::new(keyboard))
}

pub fn cell_label(clue: &Clue) -> String {
    match clue.reveal_state() {
        RevealState::Hidden => "❓".to_string(),
        RevealState::Question => truncate(clue.question(), QUESTION_LABEL_CHARS),
        RevealState::Answer => format!("✅ {}", truncate(clue.answer(), ANSWER_LABEL_CHARS)),
    }
}

/// Message text above the board: column titles and the last revealed clue.
pub fn board_text(game: &Game, last_revealed: Option<CellCoord>) -> String {
    let mut text = String::from("🎯 Jeopardy!\n\n");
    for (i, category) in game.categories().iter().enumerate() {
        text.push_str(&format!("{}. {}\n", i + 1, category.title()));
    }

    if let Some(coord) = last_revealed {
        if let (Some(category), Some(clue)) = (game.categories().get(coord.category), game.clue(coord)) {
            match clue.reveal_state() {
                RevealState::Question => {
                    text.push_str(&format!("\n❓ {}: {}\n", category.title(), clue.question()))
                }
                RevealState::Answer => text.push_str(&format!(
                    "\n❓ {}: {}\n✅ {}\n",
                    category.title(),
                    clue.question(),
                    clue.answer()
                )),
                RevealState::Hidden => {}
            }
        }
    }

    text.push_str(&format!(
        "\nAnswers revealed: {}/{}",
        game.revealed_count(),
        game.category_count() * game.clues_per_category()
    ));
    text
}

// Telegram rejects buttons with empty text
fn truncate(text: &str, max_chars: usize) -> String {
    let text = text.trim();
    if text.is_empty() {
        return "…".to_string();
    }
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let mut short: String = text.chars().take(max_chars.saturating_sub(1)).collect();
    short.push('…');
    short
}
