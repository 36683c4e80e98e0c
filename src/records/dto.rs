use serde::{Deserialize, Serialize};
use crate::core::clinic::Role;
use crate::pets::domain::{locked_fields, PetField};

// PhotoUpload carries the selected photo file exactly as submitted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct PhotoUpload {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

// PetForm mirrors the raw form fields as the page submits them. Numbers stay
// strings here; parsing and validation happen on submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub(crate) struct PetForm {
    pub pet_id: Option<String>,
    pub name: String,
    pub age_years: String,
    pub age_months: String,
    pub weight_kg: String,
    pub color: String,
    pub owner_phone: String,
    pub species: String,
    pub breed_id: String,
    pub observations: String,
    pub treatment: String,
    pub photo_preview_url: Option<String>,
    pub photo: Option<PhotoUpload>,
}

// BreedOption is one selectable entry of the breed selector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct BreedOption {
    pub breed_id: String,
    pub name: String,
}

// FormState is everything the page needs to draw the editor: prefilled
// values, the filtered breed options and the fields the current role may not
// touch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct FormState {
    pub values: PetForm,
    pub breed_options: Vec<BreedOption>,
    pub breed_enabled: bool,
    pub photo_preview: Option<String>,
    pub locked_fields: Vec<PetField>,
}

impl FormState {
    pub fn empty(role: Role) -> Self {
        Self {
            values: PetForm::default(),
            breed_options: vec![],
            breed_enabled: false,
            photo_preview: None,
            locked_fields: locked_fields(role),
        }
    }
}
