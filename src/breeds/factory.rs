use crate::breeds::repository::BreedRepository;
use crate::breeds::repository::ddb_breed_repository::DDBBreedRepository;
use crate::core::domain::Configuration;
use crate::core::repository::RepositoryStore;
use crate::utils::ddb::{build_db_client, create_table};

pub(crate) async fn create_breed_repository(config: &Configuration, store: RepositoryStore) -> Box<dyn BreedRepository> {
    match store {
        RepositoryStore::DynamoDB => {
            let client = build_db_client(store).await;
            Box::new(DDBBreedRepository::new(client, config.breeds_table.as_str()))
        }
        RepositoryStore::LocalDynamoDB => {
            let client = build_db_client(store).await;
            let _ = create_table(&client, config.breeds_table.as_str(), "breed_id", "species", "name").await;
            Box::new(DDBBreedRepository::new(client, config.breeds_table.as_str()))
        }
    }
}
