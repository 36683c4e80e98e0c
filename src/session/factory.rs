use std::sync::Arc;
use crate::core::domain::Configuration;
use crate::core::repository::RepositoryStore;
use crate::gateway::pages::{Navigator, Notifier, PageSurface};
use crate::session::domain::service::SessionServiceImpl;
use crate::session::domain::SessionService;
use crate::session::store::ddb_identity_store::DDBIdentityStore;
use crate::session::store::IdentityStore;
use crate::utils::ddb::{build_db_client, create_table};

pub(crate) async fn create_identity_store(config: &Configuration, store: RepositoryStore) -> Box<dyn IdentityStore> {
    match store {
        RepositoryStore::DynamoDB => {
            let client = build_db_client(store).await;
            Box::new(DDBIdentityStore::new(client, config.sessions_table.as_str()))
        }
        RepositoryStore::LocalDynamoDB => {
            let client = build_db_client(store).await;
            let _ = create_table(&client, config.sessions_table.as_str(), "session_id", "kind", "contact").await;
            Box::new(DDBIdentityStore::new(client, config.sessions_table.as_str()))
        }
    }
}

pub(crate) async fn create_session_service(config: &Configuration, store: RepositoryStore,
                                           navigator: Arc<dyn Navigator>, notifier: Arc<dyn Notifier>,
                                           surface: Arc<dyn PageSurface>) -> Box<dyn SessionService> {
    let identity_store = create_identity_store(config, store).await;
    Box::new(SessionServiceImpl::new(identity_store, navigator, notifier, surface))
}
