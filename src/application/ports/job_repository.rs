use async_trait::async_trait;

use crate::domain::{Job, JobId};

use super::RepositoryError;

/// Keyed job store. Writes replace the whole record; there is no
/// read-modify-write, so callers must be the only writer for an id.
#[async_trait]
pub trait JobRepository: Send + Sync {
    async fn get(&self, id: &JobId) -> Result<Option<Job>, RepositoryError>;

    async fn put(&self, job: &Job) -> Result<(), RepositoryError>;

    async fn delete(&self, id: &JobId) -> Result<(), RepositoryError>;

    async fn list(&self) -> Result<Vec<Job>, RepositoryError>;
}
