use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};

use crate::application::ports::{JobRepository, RepositoryError};

/// Deletes job records older than the retention period, pending or not.
pub struct RetentionSweeper {
    job_repository: Arc<dyn JobRepository>,
    ttl: chrono::Duration,
    interval: Duration,
}

impl RetentionSweeper {
    pub fn new(job_repository: Arc<dyn JobRepository>, ttl: Duration, interval: Duration) -> Self {
        Self {
            job_repository,
            ttl: chrono::Duration::from_std(ttl).unwrap_or(chrono::Duration::MAX),
            interval,
        }
    }

    pub async fn sweep_once(&self, now: DateTime<Utc>) -> Result<usize, RepositoryError> {
        let Some(cutoff) = now.checked_sub_signed(self.ttl) else {
            return Ok(0);
        };
        let jobs = self.job_repository.list().await?;

        let mut deleted = 0;
        for job in jobs.iter().filter(|job| job.created_at < cutoff) {
            self.job_repository.delete(&job.id).await?;
            deleted += 1;
        }

        Ok(deleted)
    }

    pub async fn run(self) {
        tracing::info!(
            ttl_secs = self.ttl.num_seconds(),
            interval_secs = self.interval.as_secs(),
            "Retention sweeper started"
        );

        let mut ticker = tokio::time::interval(self.interval);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

        loop {
            ticker.tick().await;
            match self.sweep_once(Utc::now()).await {
                Ok(0) => {}
                Ok(deleted) => tracing::info!(deleted, "Expired jobs removed"),
                Err(e) => tracing::error!(error = %e, "Retention sweep failed"),
            }
        }
    }
}
