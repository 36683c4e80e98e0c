use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::core::command::{Command, CommandError};
use crate::pets::dto::PetDto;
use crate::records::domain::RecordEditor;

pub(crate) struct ListPetsCommand {
    editor: Box<dyn RecordEditor>,
}

impl ListPetsCommand {
    pub(crate) fn new(editor: Box<dyn RecordEditor>) -> Self {
        Self {
            editor,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct ListPetsCommandRequest {
    pub owner_phone: Option<String>,
    pub page: Option<String>,
    pub page_size: usize,
}

#[derive(Debug, Serialize)]
pub(crate) struct ListPetsCommandResponse {
    pub pets: Vec<PetDto>,
    pub next_page: Option<String>,
}

#[async_trait]
impl Command<ListPetsCommandRequest, ListPetsCommandResponse> for ListPetsCommand {
    async fn execute(&self, req: ListPetsCommandRequest) -> Result<ListPetsCommandResponse, CommandError> {
        let res = self.editor.list_pets(req.owner_phone.as_deref(),
                                        req.page.as_deref(), req.page_size).await
            .map_err(CommandError::from)?;
        Ok(ListPetsCommandResponse {
            pets: res.records,
            next_page: res.next_page,
        })
    }
}
