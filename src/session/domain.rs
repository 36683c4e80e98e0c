use async_trait::async_trait;
use crate::core::clinic::Role;
use crate::session::domain::model::Identity;

pub mod model;
pub mod service;

// SessionService guards page access and renders role-conditional navigation.
// Every page flow re-evaluates from scratch; there is no cached session state.
#[async_trait]
pub(crate) trait SessionService: Sync + Send {
    // resolves the persisted identity; storage or parse failures mean logged-out
    async fn resolve_identity(&self) -> Option<Identity>;

    // returns the identity when access is granted, otherwise redirects
    // (login when unauthenticated, landing page with a notice when the role
    // is not allowed) and returns None
    async fn require_access(&self, allowed: Option<&[Role]>) -> Option<Identity>;

    // clears the persisted identity and redirects to the login entry point
    async fn end_session(&self);

    // resolves the identity when not supplied and updates the page chrome;
    // no-ops when nobody is logged in
    async fn render_role_ui(&self, identity: Option<&Identity>);
}
