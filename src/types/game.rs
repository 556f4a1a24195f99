use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::HashSet;

use crate::error::GameError;
use crate::source::DataSource;
use crate::types::{Category, CategorySummary, CellCoord, Clue, RevealState};

/// Largest batch the categories endpoint hands out in one request.
pub const CANDIDATE_BATCH_SIZE: usize = 100;

/// One board: `category_count` columns of `clues_per_category` clues.
///
/// A game is either empty or fully populated. [`Game::populate`] builds the
/// whole board before committing it, so a failure half way through never
/// leaves a partial board behind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Game {
    category_count: usize,
    clues_per_category: usize,
    categories: Vec<Category>,
}

impl Game {
    pub fn new(category_count: usize, clues_per_category: usize) -> Self {
        Self {
            category_count,
            clues_per_category,
            categories: Vec::new(),
        }
    }

    pub fn category_count(&self) -> usize {
        self.category_count
    }

    pub fn clues_per_category(&self) -> usize {
        self.clues_per_category
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn is_populated(&self) -> bool {
        !self.categories.is_empty()
    }

    /// Requests up to `count` candidate categories from the source.
    pub async fn fetch_category_candidates(
        source: &dyn DataSource,
        count: usize,
    ) -> Result<Vec<CategorySummary>, GameError> {
        source.list_categories(count).await
    }

    /// Picks `count` distinct category ids out of one full candidate batch.
    pub async fn select_random_category_ids<R>(
        source: &dyn DataSource,
        count: usize,
        rng: &mut R,
    ) -> Result<Vec<u64>, GameError>
    where
        R: Rng + Send + ?Sized,
    {
        let batch = Self::fetch_category_candidates(source, CANDIDATE_BATCH_SIZE).await?;

        let mut seen = HashSet::new();
        let distinct: Vec<u64> = batch
            .iter()
            .map(|candidate| candidate.id)
            .filter(|id| seen.insert(*id))
            .collect();

        if distinct.len() < count {
            return Err(GameError::InsufficientCandidates {
                requested: count,
                available: distinct.len(),
            });
        }

        Ok(distinct.choose_multiple(rng, count).copied().collect())
    }

    /// Fills the board from `source`. On error the board is left exactly as
    /// it was before the call.
    pub async fn populate<R>(&mut self, source: &dyn DataSource, rng: &mut R) -> Result<(), GameError>
    where
        R: Rng + Send + ?Sized,
    {
        let ids = Self::select_random_category_ids(source, self.category_count, rng).await?;
        log::info!("Selected categories {:?}", ids);

        let mut categories = Vec::with_capacity(ids.len());
        for id in ids {
            let category = Category::build(id, self.clues_per_category, source, rng).await?;
            categories.push(category);
        }

        self.categories = categories;
        Ok(())
    }

    pub fn clue(&self, coord: CellCoord) -> Option<&Clue> {
        self.categories.get(coord.category)?.clues().get(coord.clue)
    }

    /// Advances the clue at `coord`. `None` if the coordinate is off the board.
    pub fn advance(&mut self, coord: CellCoord) -> Option<RevealState> {
        let clue = self.categories.get_mut(coord.category)?.clue_mut(coord.clue)?;
        Some(clue.advance_reveal())
    }

    /// Number of clues showing their answer.
    pub fn revealed_count(&self) -> usize {
        self.categories
            .iter()
            .flat_map(|category| category.clues())
            .filter(|clue| clue.reveal_state() == RevealState::Answer)
            .count()
    }

    pub fn is_finished(&self) -> bool {
        self.is_populated()
            && self.revealed_count() == self.category_count * self.clues_per_category
    }
}
