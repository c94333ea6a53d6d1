use chrono::{DateTime, Utc};

use super::{COMPLETION_MARKER, JobId, JobStatus};

#[derive(Debug, Clone)]
pub struct Job {
    pub id: JobId,
    pub status: JobStatus,
    pub result: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Job {
    pub fn new() -> Self {
        let now = Utc::now();
        Self {
            id: JobId::new(),
            status: JobStatus::Pending,
            result: String::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Terminal transition. The marker is appended unconditionally, so an
    /// apology text completes a job the same way a real answer does.
    pub fn complete(self, answer: &str) -> Self {
        Self {
            status: JobStatus::Completed,
            result: format!("{}{}", answer, COMPLETION_MARKER),
            updated_at: Utc::now(),
            ..self
        }
    }

    pub fn is_complete(&self) -> bool {
        self.result.contains(COMPLETION_MARKER)
    }
}

impl Default for Job {
    fn default() -> Self {
        Self::new()
    }
}
