use std::sync::Arc;

use crate::app::App;
use crate::config::{AppConfig, StorageBackend, StorageConfig};

use crate::domain::repositories::account::AccountRepository;
use crate::domain::repositories::user::UserRepository;
use crate::domain::services::credential::CredentialService;

use crate::services::credential::CredentialServiceImpl;
use crate::services::directory::UserDirectory;

use crate::infrastructure::repositories::account::AccountRepositoryImpl;
use crate::infrastructure::repositories::user::UserRepositoryImpl;
use crate::infrastructure::storage::{FileStore, KeyValueStore, MemoryStore};

pub struct Container {
    pub store: Arc<dyn KeyValueStore>,
    pub credential_service: Arc<dyn CredentialService>,
}

impl Container {
    pub fn new(config: &AppConfig) -> Self {
        Self::with_store(store(&config.storage), config.auth.verify_credentials)
    }

    pub fn with_store(store: Arc<dyn KeyValueStore>, verify_credentials: bool) -> Self {
        Container {
            credential_service: credential_service(store.clone(), verify_credentials),
            store,
        }
    }

    pub fn directory(&self) -> UserDirectory {
        let user_repository: Arc<dyn UserRepository> =
            Arc::new(UserRepositoryImpl::new(self.store.clone()));

        UserDirectory::new(user_repository)
    }

    pub fn app(&self) -> App {
        App::new(self.credential_service.clone(), self.directory())
    }
}

fn store(storage_config: &StorageConfig) -> Arc<dyn KeyValueStore> {
    match storage_config.backend {
        StorageBackend::File => Arc::new(FileStore::new(&storage_config.directory)),
        StorageBackend::Memory => Arc::new(MemoryStore::new()),
    }
}

fn credential_service(
    store: Arc<dyn KeyValueStore>,
    verify_credentials: bool,
) -> Arc<dyn CredentialService> {
    let account_repository: Arc<dyn AccountRepository> =
        Arc::new(AccountRepositoryImpl::new(store));

    Arc::new(CredentialServiceImpl::new(account_repository).verifying(verify_credentials))
}
