use std::sync::Arc;
use serde_json::{Map, Value};
use tracing::log::warn;
use async_trait::async_trait;
use uuid::Uuid;
use crate::breeds::domain::filter_by_species;
use crate::breeds::domain::model::BreedEntity;
use crate::breeds::repository::BreedRepository;
use crate::core::clinic::{ClinicError, ClinicResult, PaginatedResult, Role};
use crate::core::domain::{Configuration, SchemaRevision};
use crate::gateway::pages::{Navigator, Notifier, Page};
use crate::gateway::photos::PhotoStore;
use crate::pets::domain::model::PetEntity;
use crate::pets::dto::PetDto;
use crate::pets::repository::PetRepository;
use crate::records::domain::RecordEditor;
use crate::records::dto::{BreedOption, FormState, PetForm};
use crate::session::domain::model::Identity;

pub(crate) struct RecordEditorImpl {
    schema: SchemaRevision,
    photos_prefix: String,
    identity: Identity,
    pet_repository: Box<dyn PetRepository>,
    breed_repository: Box<dyn BreedRepository>,
    photo_store: Box<dyn PhotoStore>,
    navigator: Arc<dyn Navigator>,
    notifier: Arc<dyn Notifier>,
}

impl RecordEditorImpl {
    pub(crate) fn new(config: &Configuration, identity: Identity,
                      pet_repository: Box<dyn PetRepository>,
                      breed_repository: Box<dyn BreedRepository>,
                      photo_store: Box<dyn PhotoStore>,
                      navigator: Arc<dyn Navigator>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            schema: config.schema,
            photos_prefix: config.photos_prefix.to_string(),
            identity,
            pet_repository,
            breed_repository,
            photo_store,
            navigator,
            notifier,
        }
    }

    async fn load_breeds(&self) -> Vec<BreedEntity> {
        match self.breed_repository.list_all().await {
            Ok(breeds) => breeds,
            Err(err) => {
                warn!("failed to load breeds {:?}", err);
                self.notifier.notify("Could not load breeds");
                vec![]
            }
        }
    }

    fn fill_breed_options(&self, state: &mut FormState, breeds: &[BreedEntity]) {
        let options = filter_by_species(breeds, state.values.species.as_str());
        state.breed_options = options.iter()
            .map(|breed| BreedOption { breed_id: breed.breed_id.to_string(), name: breed.name.to_string() })
            .collect();
        state.breed_enabled = !state.breed_options.is_empty();
    }

    fn prefill(&self, state: &mut FormState, pet: &PetEntity, breeds: &[BreedEntity]) {
        state.values.pet_id = Some(pet.pet_id.to_string());
        state.values.name = pet.name.to_string();
        state.values.age_years = pet.age_years.to_string();
        state.values.age_months = pet.age_months.map(|m| m.to_string()).unwrap_or_default();
        state.values.weight_kg = pet.weight_kg.map(|w| w.to_string()).unwrap_or_default();
        state.values.color = pet.color.clone().unwrap_or_default();
        state.values.owner_phone = pet.owner_phone.to_string();
        state.values.observations = pet.observations.clone().unwrap_or_default();
        state.values.treatment = pet.treatment.clone().unwrap_or_default();
        if let Some(breed) = breeds.iter().find(|b| b.breed_id == pet.breed_id) {
            state.values.species = breed.species_name();
        }
        state.values.breed_id = pet.breed_id.to_string();
        if let Some(url) = &pet.photo_url {
            state.photo_preview = Some(url.to_string());
            state.values.photo_preview_url = Some(url.to_string());
        }
    }

    // uploads the selected photo under a fresh path and resolves its public
    // url; on failure the previous url (if any) is kept
    async fn upload_photo_if_any(&self, form: &PetForm, existing_url: Option<String>) -> Option<String> {
        let photo = match &form.photo {
            Some(photo) => photo,
            None => return existing_url,
        };
        let ext = photo_extension(photo.file_name.as_str());
        let path = format!("{}/{}.{}", self.photos_prefix, Uuid::new_v4(), ext);
        match self.photo_store.upload(path.as_str(), photo_content_type(ext.as_str()), photo.bytes.clone()).await {
            Ok(()) => Some(self.photo_store.public_url(path.as_str())),
            Err(err) => {
                self.notifier.notify(format!("Could not upload the photo: {}", err).as_str());
                existing_url
            }
        }
    }
}

#[async_trait]
impl RecordEditor for RecordEditorImpl {
    async fn load_form(&self, pet_id: Option<&str>) -> FormState {
        let role = self.identity.role();
        let breeds = self.load_breeds().await;
        let mut state = FormState::empty(role);
        self.fill_breed_options(&mut state, &breeds);
        if let Some(id) = pet_id {
            match self.pet_repository.get(id).await {
                Ok(pet) => {
                    self.prefill(&mut state, &pet, &breeds);
                    self.fill_breed_options(&mut state, &breeds);
                }
                Err(ClinicError::NotFound { .. }) => {
                    self.notifier.notify(format!("No pet exists with id={}", id).as_str());
                }
                Err(err) => {
                    self.notifier.notify(format!("Could not load pet: {}", err).as_str());
                }
            }
        }
        state
    }

    async fn submit(&self, form: &PetForm) -> bool {
        let role = self.identity.role();
        let pet_id = form.pet_id.as_deref().filter(|id| !id.trim().is_empty());
        if role == Role::Receptionist && pet_id.is_none() {
            self.notifier.notify("Receptionists may only update weight and photo of registered pets.");
            return false;
        }

        // the photo goes up first; a later validation or write failure leaves
        // the uploaded object orphaned, which is accepted behavior for now
        let photo_url = self.upload_photo_if_any(form, existing_photo_url(form)).await;

        let parsed = match parse_and_validate(form, role) {
            Ok(parsed) => parsed,
            Err(message) => {
                self.notifier.notify(message.as_str());
                return false;
            }
        };

        let result = if let Some(id) = pet_id {
            let payload = build_payload(role, &parsed, photo_url.as_deref(), self.schema);
            self.pet_repository.update(id, &payload).await
        } else {
            self.pet_repository.create(&build_entity(&parsed, photo_url.as_deref())).await
        };

        match result {
            Ok(_) => {
                self.notifier.notify("Pet saved");
                self.navigator.navigate(Page::PetListing);
                true
            }
            Err(err) => {
                self.notifier.notify(format!("Could not save: {}", err).as_str());
                false
            }
        }
    }

    async fn list_pets(&self, owner_phone: Option<&str>,
                       page: Option<&str>, page_size: usize) -> ClinicResult<PaginatedResult<PetDto>> {
        let res = match owner_phone {
            Some(phone) => self.pet_repository.find_by_owner_phone(phone, page, page_size).await?,
            None => self.pet_repository.list(page, page_size).await?,
        };
        let records = res.records.iter().map(PetDto::from).collect();
        Ok(PaginatedResult::new(page, page_size, res.next_page, records))
    }
}

// the previous photo reference; a blob-scheme preview is only local to the
// page and never counts as a stored url
pub(crate) fn existing_photo_url(form: &PetForm) -> Option<String> {
    form.photo_preview_url.as_deref()
        .filter(|url| !url.is_empty() && !url.starts_with("blob:"))
        .map(str::to_string)
}

pub(crate) fn photo_extension(file_name: &str) -> String {
    std::path::Path::new(file_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_lowercase())
        .filter(|ext| !ext.is_empty())
        .unwrap_or_else(|| "jpg".to_string())
}

pub(crate) fn photo_content_type(ext: &str) -> &'static str {
    match ext {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "webp" => "image/webp",
        _ => "application/octet-stream",
    }
}

// ParsedForm holds the typed field values after validation.
#[derive(Debug, PartialEq)]
pub(crate) struct ParsedForm {
    pub name: String,
    pub age_years: Option<i64>,
    pub age_months: Option<i64>,
    pub weight_kg: Option<f64>,
    pub color: Option<String>,
    pub owner_phone: String,
    pub breed_id: String,
    pub observations: Option<String>,
    pub treatment: Option<String>,
}

fn blank_to_none(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

// The validation ladder. Receptionists cannot edit the identity fields, so
// those rules only bind the other roles; the weight rule binds everyone.
pub(crate) fn parse_and_validate(form: &PetForm, role: Role) -> Result<ParsedForm, String> {
    let receptionist = role == Role::Receptionist;
    let name = form.name.trim().to_string();
    let owner_phone = form.owner_phone.trim().to_string();
    let breed_id = form.breed_id.trim().to_string();
    let age_years = form.age_years.trim().parse::<i64>().ok();
    let months_blank = form.age_months.trim().is_empty();
    let age_months = form.age_months.trim().parse::<i64>().ok();
    let weight_blank = form.weight_kg.trim().is_empty();
    let weight_kg = form.weight_kg.trim().parse::<f64>().ok().filter(|w| w.is_finite());

    if !receptionist && (name.is_empty() || age_years.is_none() || owner_phone.is_empty() || breed_id.is_empty()) {
        return Err("Complete name, age (years), phone and breed.".to_string());
    }
    if !receptionist && !months_blank {
        match age_months {
            Some(months) if (0..=11).contains(&months) => {}
            _ => return Err("Age in months must be between 0 and 11.".to_string()),
        }
    }
    if !weight_blank {
        match weight_kg {
            Some(weight) if weight >= 0.0 => {}
            _ => return Err("Weight must be a non-negative number.".to_string()),
        }
    }

    Ok(ParsedForm {
        name,
        age_years,
        age_months: if months_blank { None } else { age_months },
        weight_kg: if weight_blank { None } else { weight_kg },
        color: blank_to_none(form.color.as_str()),
        owner_phone,
        breed_id,
        observations: blank_to_none(form.observations.as_str()),
        treatment: blank_to_none(form.treatment.as_str()),
    })
}

fn opt_string(value: &Option<String>) -> Value {
    match value {
        Some(value) => Value::String(value.to_string()),
        None => Value::Null,
    }
}

fn opt_number(value: Option<i64>) -> Value {
    match value {
        Some(value) => Value::from(value),
        None => Value::Null,
    }
}

fn opt_float(value: Option<f64>) -> Value {
    match value {
        Some(value) => Value::from(value),
        None => Value::Null,
    }
}

// The role-scoped update payload: receptionists express weight and photo and
// nothing else, the other roles the full field set with blanks as nulls.
pub(crate) fn build_payload(role: Role, parsed: &ParsedForm,
                            photo_url: Option<&str>, schema: SchemaRevision) -> Map<String, Value> {
    let mut payload = Map::new();
    let photo = match photo_url {
        Some(url) => Value::String(url.to_string()),
        None => Value::Null,
    };
    if role == Role::Receptionist {
        payload.insert("weight_kg".to_string(), opt_float(parsed.weight_kg));
        payload.insert("photo_url".to_string(), photo);
        return payload;
    }
    payload.insert("name".to_string(), Value::String(parsed.name.to_string()));
    payload.insert("age_years".to_string(), opt_number(parsed.age_years));
    payload.insert("age_months".to_string(), opt_number(parsed.age_months));
    payload.insert("weight_kg".to_string(), opt_float(parsed.weight_kg));
    payload.insert("color".to_string(), opt_string(&parsed.color));
    payload.insert("owner_phone".to_string(), Value::String(parsed.owner_phone.to_string()));
    payload.insert("breed_id".to_string(), Value::String(parsed.breed_id.to_string()));
    payload.insert("photo_url".to_string(), photo);
    payload.insert(schema.notes_attribute().to_string(), opt_string(&parsed.observations));
    payload.insert("treatment".to_string(), opt_string(&parsed.treatment));
    payload
}

fn build_entity(parsed: &ParsedForm, photo_url: Option<&str>) -> PetEntity {
    let mut pet = PetEntity::new(parsed.name.as_str(), parsed.age_years.unwrap_or(0),
                                 parsed.owner_phone.as_str(), parsed.breed_id.as_str());
    pet.age_months = parsed.age_months;
    pet.weight_kg = parsed.weight_kg;
    pet.color = parsed.color.clone();
    pet.photo_url = photo_url.map(str::to_string);
    pet.observations = parsed.observations.clone();
    pet.treatment = parsed.treatment.clone();
    pet
}

impl From<&PetEntity> for PetDto {
    fn from(other: &PetEntity) -> Self {
        Self {
            pet_id: other.pet_id.to_string(),
            name: other.name.to_string(),
            age_years: other.age_years,
            age_months: other.age_months,
            weight_kg: other.weight_kg,
            color: other.color.clone(),
            owner_phone: other.owner_phone.to_string(),
            breed_id: other.breed_id.to_string(),
            photo_url: other.photo_url.clone(),
            observations: other.observations.clone(),
            treatment: other.treatment.clone(),
            created_at: other.created_at,
            updated_at: other.updated_at,
        }
    }
}
