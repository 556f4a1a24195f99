use rand::seq::SliceRandom;
use rand::Rng;

use crate::error::GameError;
use crate::source::DataSource;
use crate::types::{CategoryDetail, Clue};

/// A titled column of clues, sampled from one remote category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    id: u64,
    title: String,
    clues: Vec<Clue>,
}

impl Category {
    /// Fetches the detail for `category_id` and samples `clue_sample_size`
    /// clues from it.
    pub async fn build<R>(
        category_id: u64,
        clue_sample_size: usize,
        source: &dyn DataSource,
        rng: &mut R,
    ) -> Result<Self, GameError>
    where
        R: Rng + Send + ?Sized,
    {
        let detail = source.get_category_detail(category_id).await?;
        log::debug!(
            "Fetched category {} ({:?}) with {} clues",
            detail.id,
            detail.title,
            detail.clues.len()
        );
        Self::from_detail(detail, clue_sample_size, rng)
    }

    pub fn from_detail<R>(
        detail: CategoryDetail,
        clue_sample_size: usize,
        rng: &mut R,
    ) -> Result<Self, GameError>
    where
        R: Rng + ?Sized,
    {
        if detail.clues.len() < clue_sample_size {
            return Err(GameError::DataInsufficient {
                category_id: detail.id,
                requested: clue_sample_size,
                available: detail.clues.len(),
            });
        }

        let clues = detail
            .clues
            .choose_multiple(rng, clue_sample_size)
            .map(|raw| Clue::new(raw.question.clone(), raw.answer.clone()))
            .collect();

        Ok(Self {
            id: detail.id,
            title: detail.title,
            clues,
        })
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn clues(&self) -> &[Clue] {
        &self.clues
    }

    pub(crate) fn clue_mut(&mut self, index: usize) -> Option<&mut Clue> {
        self.clues.get_mut(index)
    }
}
