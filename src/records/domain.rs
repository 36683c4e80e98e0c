use async_trait::async_trait;
use crate::core::clinic::{ClinicResult, PaginatedResult};
use crate::pets::dto::PetDto;
use crate::records::dto::{FormState, PetForm};

pub mod service;

// RecordEditor drives the pet create/edit page: it computes the form state on
// load and runs the guarded submission flow. Failures along the way surface as
// user notices rather than errors; the page always stays interactive.
#[async_trait]
pub(crate) trait RecordEditor: Sync + Send {
    // the load flow: breed reference data, optional prefill, field locking
    async fn load_form(&self, pet_id: Option<&str>) -> FormState;

    // the submission flow; true when the record was persisted
    async fn submit(&self, form: &PetForm) -> bool;

    // the listing page data, optionally filtered by owner phone
    async fn list_pets(&self, owner_phone: Option<&str>,
                       page: Option<&str>, page_size: usize) -> ClinicResult<PaginatedResult<PetDto>>;
}
