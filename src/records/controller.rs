use std::collections::HashMap;
use std::sync::Arc;
use axum::extract::{Query, State};
use axum::response::Json;
use serde_json::Value;
use crate::core::clinic::Role;
use crate::core::command::Command;
use crate::core::controller::{AppState, json_to_server_error, ServerError};
use crate::gateway::pages::{default_nav, MemoryPage, PageActions, PageSurface};
use crate::records::command::list_pets_cmd::{ListPetsCommand, ListPetsCommandRequest, ListPetsCommandResponse};
use crate::records::command::load_form_cmd::{LoadFormCommand, LoadFormCommandRequest, LoadFormCommandResponse};
use crate::records::command::save_pet_cmd::{SavePetCommand, SavePetCommandResponse};
use crate::records::dto::PetForm;
use crate::records::factory;
use crate::session::domain::model::Identity;
use crate::session::factory as session_factory;

// the editor and listing pages admit every real staff role; field-level
// restrictions are enforced further down
const EDITOR_ROLES: [Role; 3] = [Role::Administrator, Role::Receptionist, Role::Veterinarian];

async fn require_editor_access(state: &AppState, actions: &Arc<PageActions>) -> Option<Identity> {
    let surface: Arc<dyn PageSurface> = Arc::new(MemoryPage::new(default_nav()));
    let session = session_factory::create_session_service(
        &state.config, state.store, actions.clone(), actions.clone(), surface).await;
    session.require_access(Some(&EDITOR_ROLES)).await
}

pub(crate) async fn load_pet_form(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>) -> Result<Json<LoadFormCommandResponse>, ServerError> {
    let actions = Arc::new(PageActions::new());
    let identity = match require_editor_access(&state, &actions).await {
        Some(identity) => identity,
        None => return Ok(Json(LoadFormCommandResponse::denied(&actions))),
    };
    let editor = factory::create_record_editor(
        &state.config, state.store, identity, actions.clone(), actions.clone()).await;
    let req = LoadFormCommandRequest { pet_id: params.get("id").map(|id| id.to_string()) };
    let res = LoadFormCommand::new(editor, actions).execute(req).await?;
    Ok(Json(res))
}

pub(crate) async fn save_pet_form(
    State(state): State<AppState>,
    json: Json<Value>) -> Result<Json<SavePetCommandResponse>, ServerError> {
    let form: PetForm = serde_json::from_value(json.0).map_err(json_to_server_error)?;
    let actions = Arc::new(PageActions::new());
    let identity = match require_editor_access(&state, &actions).await {
        Some(identity) => identity,
        None => return Ok(Json(SavePetCommandResponse::denied(&actions))),
    };
    let editor = factory::create_record_editor(
        &state.config, state.store, identity, actions.clone(), actions.clone()).await;
    let res = SavePetCommand::new(editor, actions).execute(form).await?;
    Ok(Json(res))
}

pub(crate) async fn list_pets(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>) -> Result<Json<ListPetsCommandResponse>, ServerError> {
    let actions = Arc::new(PageActions::new());
    let identity = match require_editor_access(&state, &actions).await {
        Some(identity) => identity,
        None => return Ok(Json(ListPetsCommandResponse { pets: vec![], next_page: None })),
    };
    let editor = factory::create_record_editor(
        &state.config, state.store, identity, actions.clone(), actions.clone()).await;
    let req = ListPetsCommandRequest {
        owner_phone: params.get("owner_phone").map(|phone| phone.to_string()),
        page: params.get("page").map(|page| page.to_string()),
        page_size: params.get("page_size").and_then(|size| size.parse::<usize>().ok()).unwrap_or(50),
    };
    let res = ListPetsCommand::new(editor).execute(req).await?;
    Ok(Json(res))
}
