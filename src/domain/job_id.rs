use std::fmt;

use uuid::Uuid;

const PREFIX: &str = "qid_";

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct JobId(String);

impl JobId {
    pub fn new() -> Self {
        Self(format!("{}{}", PREFIX, Uuid::new_v4().simple()))
    }

    /// Wraps an id supplied by a client. No format is enforced here; the
    /// repository decides whether it can address it.
    pub fn from_raw(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for JobId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
