mod job_repository_factory;
mod repositories;

pub use job_repository_factory::JobRepositoryFactory;
pub use repositories::ObjectStoreJobRepository;
