use std::sync::Arc;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::core::command::{Command, CommandError};
use crate::gateway::pages::{MemoryPage, PageSnapshot};
use crate::session::domain::SessionService;

pub(crate) struct RenderNavCommand {
    session_service: Box<dyn SessionService>,
    surface: Arc<MemoryPage>,
}

impl RenderNavCommand {
    pub(crate) fn new(session_service: Box<dyn SessionService>, surface: Arc<MemoryPage>) -> Self {
        Self {
            session_service,
            surface,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct RenderNavCommandRequest {
}

#[derive(Debug, Serialize)]
pub(crate) struct RenderNavCommandResponse {
    pub page: PageSnapshot,
}

#[async_trait]
impl Command<RenderNavCommandRequest, RenderNavCommandResponse> for RenderNavCommand {
    async fn execute(&self, _req: RenderNavCommandRequest) -> Result<RenderNavCommandResponse, CommandError> {
        self.session_service.render_role_ui(None).await;
        Ok(RenderNavCommandResponse { page: self.surface.snapshot() })
    }
}
