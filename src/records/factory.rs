use std::sync::Arc;
use crate::breeds::factory::create_breed_repository;
use crate::core::domain::Configuration;
use crate::core::repository::RepositoryStore;
use crate::gateway::factory::create_photo_store;
use crate::gateway::pages::{Navigator, Notifier};
use crate::pets::factory::create_pet_repository;
use crate::records::domain::service::RecordEditorImpl;
use crate::records::domain::RecordEditor;
use crate::session::domain::model::Identity;

pub(crate) async fn create_record_editor(config: &Configuration, store: RepositoryStore, identity: Identity,
                                         navigator: Arc<dyn Navigator>, notifier: Arc<dyn Notifier>) -> Box<dyn RecordEditor> {
    let pet_repository = create_pet_repository(config, store).await;
    let breed_repository = create_breed_repository(config, store).await;
    let photo_store = create_photo_store(config, store.photo_store()).await;
    Box::new(RecordEditorImpl::new(config, identity, pet_repository, breed_repository,
                                   photo_store, navigator, notifier))
}
