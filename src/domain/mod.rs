mod completion;
mod job;
mod job_id;
mod job_status;

pub use completion::{COMPLETION_MARKER, verify_marker};
pub use job::Job;
pub use job_id::JobId;
pub use job_status::JobStatus;
