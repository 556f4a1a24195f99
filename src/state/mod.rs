use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::config::Config;
use crate::error::GameError;
use crate::source::DataSource;
use crate::types::{CellCoord, Game, RevealState};

/// Per-chat board slot. `generation` bumps on every restart so results and
/// button presses aimed at an older board can be told apart.
#[derive(Debug, Default)]
pub struct Session {
    pub generation: u64,
    pub game: Option<Game>,
    pub last_revealed: Option<CellCoord>,
}

/// Handed out when a chat starts loading a board; only the newest ticket for
/// a chat may install its game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket {
    pub chat_id: i64,
    pub generation: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PressOutcome {
    /// The press was for a board that is gone or still loading.
    Stale,
    OffBoard,
    /// The clue already showed its answer.
    Unchanged,
    Advanced {
        state: RevealState,
        coord: CellCoord,
        game: Game,
    },
}

pub struct BotState {
    pub config: Config,
    pub source: Arc<dyn DataSource>,
    pub sessions: Mutex<HashMap<i64, Session>>,
    pub rng: Mutex<StdRng>,
}

impl BotState {
    pub fn new(config: Config, source: Arc<dyn DataSource>) -> Self {
        Self::with_rng(config, source, StdRng::from_entropy())
    }

    pub fn with_rng(config: Config, source: Arc<dyn DataSource>, rng: StdRng) -> Self {
        Self {
            config,
            source,
            sessions: Mutex::new(HashMap::new()),
            rng: Mutex::new(rng),
        }
    }

    /// Drops the chat's current board and returns a ticket for its
    /// replacement.
    pub async fn begin_load(&self, chat_id: i64) -> LoadTicket {
        let mut sessions = self.sessions.lock().await;
        let session = sessions.entry(chat_id).or_default();
        session.generation += 1;
        session.game = None;
        session.last_revealed = None;
        LoadTicket {
            chat_id,
            generation: session.generation,
        }
    }

    /// Builds and populates a fresh game sized by the config.
    pub async fn build_game(&self) -> Result<Game, GameError> {
        // seed a private rng so the shared lock isn't held across requests
        let mut rng = {
            let mut shared = self.rng.lock().await;
            StdRng::from_seed(shared.gen())
        };
        let mut game = Game::new(self.config.category_count, self.config.clues_per_category);
        game.populate(self.source.as_ref(), &mut rng).await?;
        Ok(game)
    }

    /// Whether `ticket` still belongs to the chat's newest load.
    pub async fn is_current(&self, ticket: LoadTicket) -> bool {
        let sessions = self.sessions.lock().await;
        sessions
            .get(&ticket.chat_id)
            .is_some_and(|session| session.generation == ticket.generation)
    }

    /// Stores `game` as the chat's board unless a newer load has started.
    pub async fn install(&self, ticket: LoadTicket, game: Game) -> bool {
        let mut sessions = self.sessions.lock().await;
        match sessions.get_mut(&ticket.chat_id) {
            Some(session) if session.generation == ticket.generation => {
                session.game = Some(game);
                true
            }
            _ => false,
        }
    }

    /// Current board and its generation, if the chat has one.
    pub async fn current_board(&self, chat_id: i64) -> Option<(u64, Game, Option<CellCoord>)> {
        let sessions = self.sessions.lock().await;
        let session = sessions.get(&chat_id)?;
        let game = session.game.clone()?;
        Some((session.generation, game, session.last_revealed))
    }

    pub async fn press(&self, chat_id: i64, generation: u64, coord: CellCoord) -> PressOutcome {
        let mut sessions = self.sessions.lock().await;
        let Some(session) = sessions.get_mut(&chat_id) else {
            return PressOutcome::Stale;
        };
        if session.generation != generation {
            return PressOutcome::Stale;
        }
        let Some(game) = session.game.as_mut() else {
            return PressOutcome::Stale;
        };

        let before = match game.clue(coord) {
            Some(clue) => clue.reveal_state(),
            None => return PressOutcome::OffBoard,
        };
        let Some(state) = game.advance(coord) else {
            return PressOutcome::OffBoard;
        };
        if state == before {
            return PressOutcome::Unchanged;
        }

        session.last_revealed = Some(coord);
        PressOutcome::Advanced {
            state,
            coord,
            game: game.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::fake::FakeSource;
    use crate::types::{CategoryDetail, RawClue};

    fn state_with(categories: u64, clues: usize, config: Config) -> BotState {
        let details = (1..=categories)
            .map(|id| CategoryDetail {
                id,
                title: format!("category {}", id),
                clues_count: clues,
                clues: (0..clues)
                    .map(|i| RawClue::new(format!("q{}", i), format!("a{}", i)))
                    .collect(),
            })
            .collect();
        BotState::with_rng(
            config,
            Arc::new(FakeSource::with_categories(details)),
            StdRng::seed_from_u64(9),
        )
    }

    fn small_config() -> Config {
        Config {
            category_count: 2,
            clues_per_category: 2,
            ..Config::default()
        }
    }

    #[tokio::test]
    async fn test_load_and_press() {
        let state = state_with(10, 5, small_config());
        let ticket = state.begin_load(1).await;
        let game = state.build_game().await.unwrap();
        assert!(state.install(ticket, game).await);

        let coord = CellCoord::new(1, 1);
        match state.press(1, ticket.generation, coord).await {
            PressOutcome::Advanced { state: reveal, game, .. } => {
                assert_eq!(reveal, RevealState::Question);
                assert_eq!(game.clue(coord).unwrap().reveal_state(), RevealState::Question);
            }
            other => panic!("unexpected outcome {:?}", other),
        }
        assert!(matches!(
            state.press(1, ticket.generation, coord).await,
            PressOutcome::Advanced {
                state: RevealState::Answer,
                ..
            }
        ));
        assert_eq!(
            state.press(1, ticket.generation, coord).await,
            PressOutcome::Unchanged
        );
        assert_eq!(
            state.press(1, ticket.generation, CellCoord::new(5, 0)).await,
            PressOutcome::OffBoard
        );

        let (_, _, last) = state.current_board(1).await.unwrap();
        assert_eq!(last, Some(coord));
    }

    #[tokio::test]
    async fn test_stale_ticket_cannot_install() {
        let state = state_with(10, 5, small_config());
        let old = state.begin_load(7).await;
        let new = state.begin_load(7).await;

        let newer_game = state.build_game().await.unwrap();
        assert!(state.install(new, newer_game.clone()).await);

        assert!(!state.is_current(old).await);
        assert!(state.is_current(new).await);

        let stale_game = state.build_game().await.unwrap();
        assert!(!state.install(old, stale_game).await);

        let (generation, game, _) = state.current_board(7).await.unwrap();
        assert_eq!(generation, new.generation);
        assert_eq!(game, newer_game);
    }

    #[tokio::test]
    async fn test_press_on_replaced_board_is_ignored() {
        let state = state_with(10, 5, small_config());
        let first = state.begin_load(3).await;
        let game = state.build_game().await.unwrap();
        state.install(first, game).await;

        let second = state.begin_load(3).await;
        // still loading the second board
        assert_eq!(
            state.press(3, first.generation, CellCoord::new(0, 0)).await,
            PressOutcome::Stale
        );

        let game = state.build_game().await.unwrap();
        state.install(second, game).await;
        assert_eq!(
            state.press(3, first.generation, CellCoord::new(0, 0)).await,
            PressOutcome::Stale
        );
        let (_, game, _) = state.current_board(3).await.unwrap();
        assert_eq!(game.revealed_count(), 0);
        assert_eq!(
            game.clue(CellCoord::new(0, 0)).unwrap().reveal_state(),
            RevealState::Hidden
        );
    }

    #[tokio::test]
    async fn test_failed_build_leaves_chat_without_board() {
        let state = state_with(1, 5, small_config());
        state.begin_load(4).await;

        let err = state.build_game().await.unwrap_err();
        assert!(matches!(err, GameError::InsufficientCandidates { .. }));
        let ticket = LoadTicket {
            chat_id: 4,
            generation: 1,
        };
        assert!(state.is_current(ticket).await);
        state.begin_load(4).await;
        assert!(!state.is_current(ticket).await);
        assert!(state.current_board(4).await.is_none());
        assert_eq!(state.press(4, 1, CellCoord::new(0, 0)).await, PressOutcome::Stale);
    }
}
