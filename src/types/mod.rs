mod api;
mod category;
mod game;
pub use api::*;
pub use category::*;
pub use game::*;

/// How much of a clue the board currently shows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RevealState {
    #[default]
    Hidden,
    Question,
    Answer,
}

impl RevealState {
    /// The state one click later. `Answer` is terminal.
    pub fn next(self) -> Self {
        match self {
            RevealState::Hidden => RevealState::Question,
            RevealState::Question | RevealState::Answer => RevealState::Answer,
        }
    }
}

/// Position of a cell on the board: column (category) then row (clue).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellCoord {
    pub category: usize,
    pub clue: usize,
}

impl CellCoord {
    pub fn new(category: usize, clue: usize) -> Self {
        Self { category, clue }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Clue {
    question: String,
    answer: String,
    reveal_state: RevealState,
}

impl Clue {
    pub fn new(question: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            answer: answer.into(),
            reveal_state: RevealState::Hidden,
        }
    }

    pub fn question(&self) -> &str {
        &self.question
    }

    pub fn answer(&self) -> &str {
        &self.answer
    }

    pub fn reveal_state(&self) -> RevealState {
        self.reveal_state
    }

    /// Moves the clue one step forward and returns the new state.
    /// Clicking a clue that already shows its answer changes nothing.
    pub fn advance_reveal(&mut self) -> RevealState {
        self.reveal_state = self.reveal_state.next();
        self.reveal_state
    }

    /// Text the board should display for this clue, if any.
    pub fn visible_text(&self) -> Option<&str> {
        match self.reveal_state {
            RevealState::Hidden => None,
            RevealState::Question => Some(&self.question),
            RevealState::Answer => Some(&self.answer),
        }
    }
}
