use std::sync::Arc;
use axum::extract::State;
use axum::response::Json;
use crate::core::command::Command;
use crate::core::controller::{AppState, ServerError};
use crate::gateway::pages::{default_nav, MemoryPage, PageActions};
use crate::session::command::end_session_cmd::{EndSessionCommand, EndSessionCommandRequest, EndSessionCommandResponse};
use crate::session::command::render_nav_cmd::{RenderNavCommand, RenderNavCommandRequest, RenderNavCommandResponse};
use crate::session::factory;

pub(crate) async fn render_nav(
    State(state): State<AppState>) -> Result<Json<RenderNavCommandResponse>, ServerError> {
    let actions = Arc::new(PageActions::new());
    let surface = Arc::new(MemoryPage::new(default_nav()));
    let svc = factory::create_session_service(
        &state.config, state.store, actions.clone(), actions.clone(), surface.clone()).await;
    let res = RenderNavCommand::new(svc, surface).execute(RenderNavCommandRequest {}).await?;
    Ok(Json(res))
}

pub(crate) async fn logout(
    State(state): State<AppState>) -> Result<Json<EndSessionCommandResponse>, ServerError> {
    let actions = Arc::new(PageActions::new());
    let surface = Arc::new(MemoryPage::new(default_nav()));
    let svc = factory::create_session_service(
        &state.config, state.store, actions.clone(), actions.clone(), surface).await;
    let res = EndSessionCommand::new(svc, actions).execute(EndSessionCommandRequest {}).await?;
    Ok(Json(res))
}
