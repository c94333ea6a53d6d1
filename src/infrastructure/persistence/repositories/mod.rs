mod object_store_job_repository;

pub use object_store_job_repository::ObjectStoreJobRepository;
