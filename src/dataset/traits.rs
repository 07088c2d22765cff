use crate::model::{DatasetError, DatasetQuery, Record};

#[async_trait::async_trait]
pub trait DatasetSource: Send + Sync {
    /// Identifier of the remote resource, reported as `source_id` in quotes.
    fn source_id(&self) -> &str;

    async fn fetch(&self, query: &DatasetQuery) -> Result<Vec<Record>, DatasetError>;
}
