use crate::models::SalesSummary;
use async_trait::async_trait;
use tokio::sync::RwLock;

/// Holds every summary produced during the process lifetime.
#[async_trait]
pub trait SummaryStore: Send + Sync {
    /// Adds a summary after all existing ones.
    async fn append(&self, summary: SalesSummary);

    /// Snapshot of all summaries in insertion order.
    async fn read_all(&self) -> Vec<SalesSummary>;

    async fn count(&self) -> usize;
}

#[derive(Debug, Default)]
pub struct InMemorySummaryStore {
    summaries: RwLock<Vec<SalesSummary>>,
}

impl InMemorySummaryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SummaryStore for InMemorySummaryStore {
    async fn append(&self, summary: SalesSummary) {
        self.summaries.write().await.push(summary);
    }

    async fn read_all(&self) -> Vec<SalesSummary> {
        self.summaries.read().await.clone()
    }

    async fn count(&self) -> usize {
        self.summaries.read().await.len()
    }
}
