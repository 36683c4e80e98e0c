use async_trait::async_trait;
use std::collections::HashMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use crate::core::clinic::{ClinicResult, PaginatedResult};
use crate::gateway::PhotoStoreVia;

#[async_trait]
pub trait Repository<Entity>: Sync + Send {
    // create an entity
    async fn create(&self, entity: &Entity) -> ClinicResult<usize>;

    // update an entity by id with an attribute patch; only the given
    // attributes change, so role-scoped payloads stay role-scoped
    async fn update(&self, id: &str, patch: &Map<String, Value>) -> ClinicResult<usize>;

    // get an entity
    async fn get(&self, id: &str) -> ClinicResult<Entity>;

    // delete an entity
    async fn delete(&self, id: &str) -> ClinicResult<usize>;

    // find by equality predicate
    async fn query(&self, predicate: &HashMap::<String, String>,
                   page: Option<&str>, page_size: usize) -> ClinicResult<PaginatedResult<Entity>>;
}

#[derive(Debug, PartialEq, Serialize, Deserialize, Clone, Copy)]
pub(crate) enum RepositoryStore {
    DynamoDB,
    LocalDynamoDB,
}

impl RepositoryStore {
    pub fn photo_store(&self) -> PhotoStoreVia {
        match self {
            RepositoryStore::DynamoDB => { PhotoStoreVia::S3 }
            RepositoryStore::LocalDynamoDB => { PhotoStoreVia::LocalDynamoDB }
        }
    }
}
