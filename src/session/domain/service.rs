use std::sync::Arc;
use tracing::log::warn;
use async_trait::async_trait;
use crate::core::clinic::Role;
use crate::gateway::pages::{Navigator, Notifier, Page, PageSurface};
use crate::session::domain::model::Identity;
use crate::session::domain::SessionService;
use crate::session::store::IdentityStore;

pub(crate) struct SessionServiceImpl {
    identity_store: Box<dyn IdentityStore>,
    navigator: Arc<dyn Navigator>,
    notifier: Arc<dyn Notifier>,
    surface: Arc<dyn PageSurface>,
}

impl SessionServiceImpl {
    pub(crate) fn new(identity_store: Box<dyn IdentityStore>,
                      navigator: Arc<dyn Navigator>, notifier: Arc<dyn Notifier>,
                      surface: Arc<dyn PageSurface>) -> Self {
        Self {
            identity_store,
            navigator,
            notifier,
            surface,
        }
    }
}

#[async_trait]
impl SessionService for SessionServiceImpl {
    async fn resolve_identity(&self) -> Option<Identity> {
        let raw = match self.identity_store.load().await {
            Ok(raw) => raw?,
            Err(err) => {
                warn!("failed to load identity {:?}", err);
                return None;
            }
        };
        match serde_json::from_str::<Identity>(raw.as_str()) {
            Ok(identity) => Some(identity),
            Err(err) => {
                warn!("failed to parse identity {:?}", err);
                None
            }
        }
    }

    async fn require_access(&self, allowed: Option<&[Role]>) -> Option<Identity> {
        let identity = match self.resolve_identity().await {
            Some(identity) => identity,
            None => {
                self.navigator.navigate(Page::Login);
                return None;
            }
        };
        if let Some(roles) = allowed {
            if !roles.is_empty() && !roles.contains(&identity.role()) {
                self.notifier.notify("Access restricted.");
                self.navigator.navigate(Page::Landing);
                return None;
            }
        }
        Some(identity)
    }

    async fn end_session(&self) {
        if let Err(err) = self.identity_store.clear().await {
            warn!("failed to clear identity {:?}", err);
        }
        self.navigator.navigate(Page::Login);
    }

    async fn render_role_ui(&self, identity: Option<&Identity>) {
        let resolved;
        let identity = match identity {
            Some(identity) => identity,
            None => match self.resolve_identity().await {
                Some(found) => {
                    resolved = found;
                    &resolved
                }
                None => return,
            },
        };
        let role = identity.role();
        self.surface.set_user_indicator(
            format!("{} | {}", identity.role_label(), identity.contact).as_str());
        for entry in self.surface.nav_annotations() {
            self.surface.set_nav_visible(entry.id.as_str(), entry.allows(role));
        }
        if identity.is_vet() {
            self.surface.set_pets_entry(Page::MyPetListing, "My pets");
        } else {
            self.surface.set_pets_entry(Page::PetListing, "Pets");
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use crate::core::clinic::Role;
    use crate::gateway::pages::{default_nav, MemoryPage, Page, PageActions};
    use crate::session::domain::model::Identity;
    use crate::session::domain::service::SessionServiceImpl;
    use crate::session::domain::SessionService;
    use crate::session::store::memory_identity_store::MemoryIdentityStore;

    fn identity_json(role_name: &str) -> String {
        serde_json::to_string(&Identity::new(role_name, "Ana", "ana@clinic.mx")).expect("should serialize")
    }

    fn build_service(store: MemoryIdentityStore) -> (SessionServiceImpl, Arc<PageActions>, Arc<MemoryPage>) {
        let actions = Arc::new(PageActions::new());
        let page = Arc::new(MemoryPage::new(default_nav()));
        let service = SessionServiceImpl::new(
            Box::new(store), actions.clone(), actions.clone(), page.clone());
        (service, actions, page)
    }

    #[tokio::test]
    async fn test_should_redirect_to_login_without_identity() {
        let (service, actions, _page) = build_service(MemoryIdentityStore::new());
        assert!(service.require_access(None).await.is_none());
        assert_eq!(Some(Page::Login), actions.destination());
        assert_eq!(0, actions.take_notices().len());
    }

    #[tokio::test]
    async fn test_should_treat_corrupt_identity_as_logged_out() {
        let (service, actions, _page) = build_service(MemoryIdentityStore::with_identity("{not json"));
        assert!(service.resolve_identity().await.is_none());
        assert!(service.require_access(None).await.is_none());
        assert_eq!(Some(Page::Login), actions.destination());
    }

    #[tokio::test]
    async fn test_should_pass_identity_through_with_empty_allowed_list() {
        let raw = identity_json("Veterinario");
        let (service, actions, _page) = build_service(MemoryIdentityStore::with_identity(raw.as_str()));
        let identity = service.require_access(None).await.expect("should grant");
        assert_eq!(Role::Veterinarian, identity.role());
        let identity = service.require_access(Some(&[])).await.expect("should grant");
        assert_eq!("Veterinario", identity.role_name.as_str());
        assert_eq!(None, actions.destination());
    }

    #[tokio::test]
    async fn test_should_deny_role_not_in_allowed_list() {
        let raw = identity_json("Recepcionista");
        let (service, actions, _page) = build_service(MemoryIdentityStore::with_identity(raw.as_str()));
        let denied = service.require_access(Some(&[Role::Administrator])).await;
        assert!(denied.is_none());
        assert_eq!(Some(Page::Landing), actions.destination());
        assert_eq!(vec!["Access restricted.".to_string()], actions.take_notices());
    }

    #[tokio::test]
    async fn test_should_grant_allowed_role_any_casing() {
        let raw = identity_json(" ADMINISTRADOR ");
        let (service, _actions, _page) = build_service(MemoryIdentityStore::with_identity(raw.as_str()));
        let identity = service.require_access(Some(&[Role::Administrator, Role::Veterinarian])).await;
        assert!(identity.is_some());
    }

    #[tokio::test]
    async fn test_should_clear_identity_on_end_session() {
        let raw = identity_json("Administrador");
        let (service, actions, _page) = build_service(MemoryIdentityStore::with_identity(raw.as_str()));
        service.end_session().await;
        assert_eq!(Some(Page::Login), actions.destination());
        assert!(service.resolve_identity().await.is_none());
    }

    #[tokio::test]
    async fn test_should_render_role_ui_for_receptionist() {
        let raw = identity_json("Recepcionista");
        let (service, _actions, page) = build_service(MemoryIdentityStore::with_identity(raw.as_str()));
        service.render_role_ui(None).await;
        let snapshot = page.snapshot();
        assert_eq!(Some("Recepcionista | ana@clinic.mx".to_string()), snapshot.user_indicator);
        assert!(snapshot.hidden_nav.contains(&"nav-accounts".to_string()));
        assert!(snapshot.hidden_nav.contains(&"nav-my-appointments".to_string()));
        assert!(!snapshot.hidden_nav.contains(&"nav-appointments".to_string()));
        assert!(!snapshot.hidden_nav.contains(&"nav-pets".to_string()));
        assert_eq!(Some("pets.html".to_string()), snapshot.pets_href);
        assert_eq!(Some("Pets".to_string()), snapshot.pets_label);
    }

    #[tokio::test]
    async fn test_should_swap_pets_entry_for_veterinarian() {
        let raw = identity_json("Veterinario");
        let (service, _actions, page) = build_service(MemoryIdentityStore::with_identity(raw.as_str()));
        service.render_role_ui(None).await;
        let snapshot = page.snapshot();
        assert_eq!(Some("my_pets.html".to_string()), snapshot.pets_href);
        assert_eq!(Some("My pets".to_string()), snapshot.pets_label);
        assert!(snapshot.hidden_nav.contains(&"nav-appointments".to_string()));
        assert!(!snapshot.hidden_nav.contains(&"nav-my-appointments".to_string()));
    }

    #[tokio::test]
    async fn test_should_not_render_without_identity() {
        let (service, _actions, page) = build_service(MemoryIdentityStore::new());
        service.render_role_ui(None).await;
        let snapshot = page.snapshot();
        assert_eq!(None, snapshot.user_indicator);
        assert_eq!(0, snapshot.hidden_nav.len());
        assert_eq!(None, snapshot.pets_href);
    }
}
