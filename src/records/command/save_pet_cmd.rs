use std::sync::Arc;
use async_trait::async_trait;
use serde::Serialize;
use crate::core::command::{Command, CommandError};
use crate::gateway::pages::PageActions;
use crate::records::domain::RecordEditor;
use crate::records::dto::PetForm;

pub(crate) struct SavePetCommand {
    editor: Box<dyn RecordEditor>,
    actions: Arc<PageActions>,
}

impl SavePetCommand {
    pub(crate) fn new(editor: Box<dyn RecordEditor>, actions: Arc<PageActions>) -> Self {
        Self {
            editor,
            actions,
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct SavePetCommandResponse {
    pub saved: bool,
    pub notices: Vec<String>,
    pub redirect: Option<String>,
}

impl SavePetCommandResponse {
    pub(crate) fn denied(actions: &PageActions) -> Self {
        Self {
            saved: false,
            notices: actions.take_notices(),
            redirect: actions.redirect_path(),
        }
    }
}

#[async_trait]
impl Command<PetForm, SavePetCommandResponse> for SavePetCommand {
    async fn execute(&self, req: PetForm) -> Result<SavePetCommandResponse, CommandError> {
        let saved = self.editor.submit(&req).await;
        Ok(SavePetCommandResponse {
            saved,
            notices: self.actions.take_notices(),
            redirect: self.actions.redirect_path(),
        })
    }
}
