use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

use super::DataSource;
use crate::error::GameError;
use crate::types::{CategoryDetail, CategorySummary};

/// In-memory source that records every call made against it.
pub(crate) struct FakeSource {
    candidates: Vec<CategorySummary>,
    details: HashMap<u64, CategoryDetail>,
    list_calls: Mutex<Vec<usize>>,
    detail_calls: Mutex<Vec<u64>>,
}

impl FakeSource {
    pub fn with_categories(details: Vec<CategoryDetail>) -> Self {
        let candidates = details
            .iter()
            .map(|d| CategorySummary {
                id: d.id,
                title: d.title.clone(),
                clues_count: d.clues.len(),
            })
            .collect();
        Self {
            candidates,
            details: details.into_iter().map(|d| (d.id, d)).collect(),
            list_calls: Mutex::new(Vec::new()),
            detail_calls: Mutex::new(Vec::new()),
        }
    }

    /// Appends `n` repeats of existing candidates to the batch.
    pub fn duplicate_candidates(&mut self, n: usize) {
        let extra: Vec<_> = self.candidates.iter().cycle().take(n).cloned().collect();
        self.candidates.extend(extra);
    }

    pub fn list_calls(&self) -> Vec<usize> {
        self.list_calls.lock().unwrap().clone()
    }

    pub fn detail_calls(&self) -> Vec<u64> {
        self.detail_calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl DataSource for FakeSource {
    async fn list_categories(&self, count: usize) -> Result<Vec<CategorySummary>, GameError> {
        self.list_calls.lock().unwrap().push(count);
        Ok(self.candidates.iter().take(count).cloned().collect())
    }

    async fn get_category_detail(&self, id: u64) -> Result<CategoryDetail, GameError> {
        self.detail_calls.lock().unwrap().push(id);
        self.details.get(&id).cloned().ok_or(GameError::NotFound(id))
    }
}
