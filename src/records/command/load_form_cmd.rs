use std::sync::Arc;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::core::command::{Command, CommandError};
use crate::gateway::pages::PageActions;
use crate::records::domain::RecordEditor;
use crate::records::dto::FormState;

pub(crate) struct LoadFormCommand {
    editor: Box<dyn RecordEditor>,
    actions: Arc<PageActions>,
}

impl LoadFormCommand {
    pub(crate) fn new(editor: Box<dyn RecordEditor>, actions: Arc<PageActions>) -> Self {
        Self {
            editor,
            actions,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct LoadFormCommandRequest {
    pub pet_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub(crate) struct LoadFormCommandResponse {
    pub state: Option<FormState>,
    pub notices: Vec<String>,
    pub redirect: Option<String>,
}

impl LoadFormCommandResponse {
    // the page state when access was denied: nothing to draw, only actions
    pub(crate) fn denied(actions: &PageActions) -> Self {
        Self {
            state: None,
            notices: actions.take_notices(),
            redirect: actions.redirect_path(),
        }
    }
}

#[async_trait]
impl Command<LoadFormCommandRequest, LoadFormCommandResponse> for LoadFormCommand {
    async fn execute(&self, req: LoadFormCommandRequest) -> Result<LoadFormCommandResponse, CommandError> {
        let state = self.editor.load_form(req.pet_id.as_deref()).await;
        Ok(LoadFormCommandResponse {
            state: Some(state),
            notices: self.actions.take_notices(),
            redirect: self.actions.redirect_path(),
        })
    }
}
