use std::sync::Arc;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::core::command::{Command, CommandError};
use crate::gateway::pages::PageActions;
use crate::session::domain::SessionService;

pub(crate) struct EndSessionCommand {
    session_service: Box<dyn SessionService>,
    actions: Arc<PageActions>,
}

impl EndSessionCommand {
    pub(crate) fn new(session_service: Box<dyn SessionService>, actions: Arc<PageActions>) -> Self {
        Self {
            session_service,
            actions,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct EndSessionCommandRequest {
}

#[derive(Debug, Serialize)]
pub(crate) struct EndSessionCommandResponse {
    pub redirect: Option<String>,
}

#[async_trait]
impl Command<EndSessionCommandRequest, EndSessionCommandResponse> for EndSessionCommand {
    async fn execute(&self, _req: EndSessionCommandRequest) -> Result<EndSessionCommandResponse, CommandError> {
        self.session_service.end_session().await;
        Ok(EndSessionCommandResponse { redirect: self.actions.redirect_path() })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use crate::core::command::Command;
    use crate::gateway::pages::{default_nav, MemoryPage, PageActions};
    use crate::session::command::end_session_cmd::{EndSessionCommand, EndSessionCommandRequest};
    use crate::session::domain::model::Identity;
    use crate::session::domain::service::SessionServiceImpl;
    use crate::session::store::memory_identity_store::MemoryIdentityStore;

    #[tokio::test]
    async fn test_should_end_session_and_redirect_to_login() {
        let raw = serde_json::to_string(&Identity::new("Veterinario", "Victor", "victor@clinic.mx")).expect("should serialize");
        let actions = Arc::new(PageActions::new());
        let surface = Arc::new(MemoryPage::new(default_nav()));
        let service = SessionServiceImpl::new(
            Box::new(MemoryIdentityStore::with_identity(raw.as_str())),
            actions.clone(), actions.clone(), surface);
        let cmd = EndSessionCommand::new(Box::new(service), actions);
        let res = cmd.execute(EndSessionCommandRequest {}).await.expect("should end session");
        assert_eq!(Some("login.html".to_string()), res.redirect);
    }
}
