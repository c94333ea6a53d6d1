use std::path::PathBuf;
use std::sync::Arc;

use crate::application::ports::{JobRepository, RepositoryError};
use crate::presentation::config::{StorageProviderSetting, StorageSettings};

use super::ObjectStoreJobRepository;

pub struct JobRepositoryFactory;

impl JobRepositoryFactory {
    pub fn create(settings: &StorageSettings) -> Result<Arc<dyn JobRepository>, RepositoryError> {
        match settings.provider {
            StorageProviderSetting::Local => {
                let path = PathBuf::from(&settings.local_path);
                let repository = ObjectStoreJobRepository::local(path)?;
                Ok(Arc::new(repository))
            }
            StorageProviderSetting::Memory => Ok(Arc::new(ObjectStoreJobRepository::in_memory())),
        }
    }
}
