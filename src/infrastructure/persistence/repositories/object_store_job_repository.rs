use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use futures::TryStreamExt;
use object_store::local::LocalFileSystem;
use object_store::memory::InMemory;
use object_store::path::Path as StorePath;
use object_store::{ObjectStore, PutPayload};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::application::ports::{JobRepository, RepositoryError};
use crate::domain::{Job, JobId, JobStatus};

const KEY_PREFIX: &str = "question_";
const KEY_SUFFIX: &str = ".json";

/// One JSON document per job, named `question_{id}.json`.
///
/// Each `put` replaces the whole object. The local backend writes through a
/// temporary file and a rename, so a concurrent `get` sees either the old or
/// the new record, never a partial one.
pub struct ObjectStoreJobRepository {
    inner: Arc<dyn ObjectStore>,
}

#[derive(Serialize, Deserialize)]
struct JobRecord {
    status: String,
    result: String,
    created_at: i64,
    #[serde(default)]
    updated_at: Option<i64>,
}

impl ObjectStoreJobRepository {
    pub fn new(inner: Arc<dyn ObjectStore>) -> Self {
        Self { inner }
    }

    pub fn local(base_path: PathBuf) -> Result<Self, RepositoryError> {
        std::fs::create_dir_all(&base_path)
            .map_err(|e| RepositoryError::ConnectionFailed(e.to_string()))?;
        let fs = LocalFileSystem::new_with_prefix(base_path)
            .map_err(|e| RepositoryError::ConnectionFailed(e.to_string()))?;
        Ok(Self::new(Arc::new(fs)))
    }

    pub fn in_memory() -> Self {
        Self::new(Arc::new(InMemory::new()))
    }
}

fn is_valid_key(id: &JobId) -> bool {
    let raw = id.as_str();
    !raw.is_empty()
        && raw
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}

fn location(id: &JobId) -> Result<StorePath, RepositoryError> {
    if !is_valid_key(id) {
        return Err(RepositoryError::InvalidKey(id.to_string()));
    }
    Ok(StorePath::from(format!("{}{}{}", KEY_PREFIX, id, KEY_SUFFIX)))
}

fn id_from_filename(filename: &str) -> Option<JobId> {
    filename
        .strip_prefix(KEY_PREFIX)
        .and_then(|rest| rest.strip_suffix(KEY_SUFFIX))
        .map(JobId::from_raw)
}

fn timestamp(secs: i64) -> Result<DateTime<Utc>, RepositoryError> {
    DateTime::from_timestamp(secs, 0)
        .ok_or_else(|| RepositoryError::CorruptRecord(format!("timestamp out of range: {}", secs)))
}

fn encode(job: &Job) -> Result<Vec<u8>, RepositoryError> {
    let record = JobRecord {
        status: job.status.as_str().to_string(),
        result: job.result.clone(),
        created_at: job.created_at.timestamp(),
        updated_at: Some(job.updated_at.timestamp()),
    };
    serde_json::to_vec(&record).map_err(|e| RepositoryError::QueryFailed(e.to_string()))
}

fn decode(id: &JobId, bytes: &[u8]) -> Result<Job, RepositoryError> {
    let record: JobRecord = serde_json::from_slice(bytes)
        .map_err(|e| RepositoryError::CorruptRecord(format!("{}: {}", id, e)))?;

    let status = record
        .status
        .parse::<JobStatus>()
        .map_err(RepositoryError::CorruptRecord)?;
    let created_at = timestamp(record.created_at)?;
    let updated_at = match record.updated_at {
        Some(secs) => timestamp(secs)?,
        None => created_at,
    };

    Ok(Job {
        id: id.clone(),
        status,
        result: record.result,
        created_at,
        updated_at,
    })
}

#[async_trait]
impl JobRepository for ObjectStoreJobRepository {
    #[instrument(skip(self), fields(job_id = %id))]
    async fn get(&self, id: &JobId) -> Result<Option<Job>, RepositoryError> {
        // Ids that cannot name a record cannot have been stored.
        let Ok(path) = location(id) else {
            return Ok(None);
        };

        let result = match self.inner.get(&path).await {
            Ok(result) => result,
            Err(object_store::Error::NotFound { .. }) => return Ok(None),
            Err(e) => return Err(RepositoryError::QueryFailed(e.to_string())),
        };

        let bytes = result
            .bytes()
            .await
            .map_err(|e| RepositoryError::QueryFailed(e.to_string()))?;

        decode(id, &bytes).map(Some)
    }

    #[instrument(skip(self, job), fields(job_id = %job.id, status = %job.status))]
    async fn put(&self, job: &Job) -> Result<(), RepositoryError> {
        let path = location(&job.id)?;
        let bytes = encode(job)?;

        self.inner
            .put(&path, PutPayload::from(bytes))
            .await
            .map_err(|e| RepositoryError::QueryFailed(e.to_string()))?;

        Ok(())
    }

    #[instrument(skip(self), fields(job_id = %id))]
    async fn delete(&self, id: &JobId) -> Result<(), RepositoryError> {
        let path = location(id)?;

        match self.inner.delete(&path).await {
            Ok(()) | Err(object_store::Error::NotFound { .. }) => Ok(()),
            Err(e) => Err(RepositoryError::QueryFailed(e.to_string())),
        }
    }

    #[instrument(skip(self))]
    async fn list(&self) -> Result<Vec<Job>, RepositoryError> {
        let metas: Vec<_> = self
            .inner
            .list(None)
            .try_collect()
            .await
            .map_err(|e| RepositoryError::QueryFailed(e.to_string()))?;

        let mut jobs = Vec::with_capacity(metas.len());
        for meta in metas {
            let Some(id) = meta.location.filename().and_then(id_from_filename) else {
                continue;
            };

            match self.get(&id).await {
                Ok(Some(job)) => jobs.push(job),
                Ok(None) => {}
                Err(e) => tracing::warn!(job_id = %id, error = %e, "Skipping unreadable job record"),
            }
        }

        Ok(jobs)
    }
}
